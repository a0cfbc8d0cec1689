use crate::core::data::complex::Complex;
use crate::core::data::extended_scalar::{ExtendedScalar, scale_by_pow10};
use std::ops::{Add, Mul, Sub};

/// Complex value with both components held as [`ExtendedScalar`].
///
/// Every operation normalizes its result so mantissas stay in `[1, 10)` while
/// iterating; without that the mantissa of a repeated product drifts out of
/// the `f64` range long before the exponent does.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ExtendedComplex {
    pub real: ExtendedScalar,
    pub imag: ExtendedScalar,
}

impl ExtendedComplex {
    pub const ZERO: Self = Self {
        real: ExtendedScalar::ZERO,
        imag: ExtendedScalar::ZERO,
    };

    #[must_use]
    pub fn new(real: ExtendedScalar, imag: ExtendedScalar) -> Self {
        Self {
            real: real.normalize(),
            imag: imag.normalize(),
        }
    }

    #[must_use]
    pub fn from_complex(value: Complex) -> Self {
        Self {
            real: ExtendedScalar::from_f64(value.real),
            imag: ExtendedScalar::from_f64(value.imag),
        }
    }

    #[must_use]
    pub fn to_complex(&self) -> Complex {
        Complex {
            real: self.real.to_f64(),
            imag: self.imag.to_f64(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.real.is_valid() && self.imag.is_valid()
    }

    #[must_use]
    pub fn magnitude_squared(&self) -> ExtendedScalar {
        (self.real * self.real + self.imag * self.imag).normalize()
    }

    /// Argument computed after bringing both components to a shared
    /// exponent, so the angle survives magnitudes outside the `f64` range.
    #[must_use]
    pub fn argument(&self) -> f64 {
        let shared = if self.real.is_zero() {
            self.imag.exponent()
        } else if self.imag.is_zero() {
            self.real.exponent()
        } else {
            self.real.exponent().max(self.imag.exponent())
        };

        let real = scale_by_pow10(self.real.mantissa(), self.real.exponent() - shared);
        let imag = scale_by_pow10(self.imag.mantissa(), self.imag.exponent() - shared);

        imag.atan2(real)
    }

    /// Real power via the polar form, with the magnitude carried as a decimal
    /// logarithm. A power of exactly 2 takes the plain product.
    #[must_use]
    pub fn pow(self, power: f64) -> Self {
        if power == 2.0 {
            return self * self;
        }

        if self.real.is_zero() && self.imag.is_zero() {
            return if power > 0.0 {
                Self::ZERO
            } else {
                Self {
                    real: ExtendedScalar::INVALID,
                    imag: ExtendedScalar::INVALID,
                }
            };
        }

        let log10_modulus = 0.5 * self.magnitude_squared().log10_abs();
        let magnitude = ExtendedScalar::from_log10(power * log10_modulus);
        let angle = power * self.argument();

        Self::new(
            magnitude * ExtendedScalar::from_f64(angle.cos()),
            magnitude * ExtendedScalar::from_f64(angle.sin()),
        )
    }
}

impl Add for ExtendedComplex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.real + other.real, self.imag + other.imag)
    }
}

impl Sub for ExtendedComplex {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.real - other.real, self.imag - other.imag)
    }
}

impl Mul for ExtendedComplex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::new(
            self.real * other.real - self.imag * other.imag,
            self.real * other.imag + self.imag * other.real,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extended(real: f64, imag: f64) -> ExtendedComplex {
        ExtendedComplex::from_complex(Complex::new(real, imag))
    }

    fn assert_matches_native(actual: ExtendedComplex, expected: Complex) {
        let actual = actual.to_complex();
        assert!(
            (actual.real - expected.real).abs() < 1e-9 && (actual.imag - expected.imag).abs() < 1e-9,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_mul_matches_native() {
        let result = extended(1.0, 2.0) * extended(3.0, 4.0);

        assert_matches_native(result, Complex::new(-5.0, 10.0));
    }

    #[test]
    fn test_add_and_sub_match_native() {
        let a = extended(0.25, -1.5);
        let b = extended(-3.0, 0.125);

        assert_matches_native(a + b, Complex::new(-2.75, -1.375));
        assert_matches_native(a - b, Complex::new(3.25, -1.625));
    }

    #[test]
    fn test_magnitude_squared() {
        let squared = extended(3.0, 4.0).magnitude_squared();

        assert!((squared.to_f64() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_polar_pow_matches_native() {
        let native = Complex::new(0.3, 0.4);
        let value = ExtendedComplex::from_complex(native);

        assert_matches_native(value.pow(3.0), native.pow(3.0));
        assert_matches_native(value.pow(6.0), native.pow(6.0));
        assert_matches_native(value.pow(2.5), native.pow(2.5));
    }

    #[test]
    fn test_pow_of_tiny_value_stays_representable() {
        let tiny = ExtendedComplex::new(ExtendedScalar::new(3.0, -400), ExtendedScalar::new(4.0, -400));

        let cubed = tiny.pow(3.0);

        // |z| = 5e-400, so |z³|² = 1.5625e-2396
        let magnitude_squared = cubed.magnitude_squared().normalize();
        assert!(cubed.is_valid());
        assert_eq!(magnitude_squared.exponent(), -2396);
        assert!((magnitude_squared.mantissa() - 1.5625).abs() < 1e-9);
    }

    #[test]
    fn test_argument_of_values_below_f64_range() {
        let value = ExtendedComplex::new(ExtendedScalar::new(1.0, -500), ExtendedScalar::new(1.0, -500));

        assert!((value.argument() - std::f64::consts::FRAC_PI_4).abs() < 1e-15);
    }

    #[test]
    fn test_pow_of_zero() {
        assert_eq!(ExtendedComplex::ZERO.pow(3.0), ExtendedComplex::ZERO);
        assert!(!ExtendedComplex::ZERO.pow(-1.0).is_valid());
    }
}
