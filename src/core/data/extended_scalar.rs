//! Mantissa/exponent scalar with a decimal exponent held in an `i64`.
//!
//! Values are `mantissa × 10^exponent`. The mantissa is a plain `f64`, so the
//! type keeps roughly sixteen significant digits but trades that for an
//! exponent range far beyond what an `f64` can represent. Arithmetic is cheap
//! and approximate: addition and subtraction rescale the right operand to the
//! left operand's exponent, which loses the right operand's low digits in
//! proportion to the exponent gap. Callers that need decimal-exact sums must
//! not use this type.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Largest power of ten applied to an `f64` in one step.
const MAX_POW10_STEP: i64 = 300;

/// Beyond this many decades the left operand of a sum no longer contributes.
const MAX_ALIGN_DECADES: i64 = 300;

/// Multiplies `value` by `10^power` without intermediate overflow.
pub(crate) fn scale_by_pow10(mut value: f64, mut power: i64) -> f64 {
    while power > MAX_POW10_STEP {
        value *= 1e300;
        power -= MAX_POW10_STEP;
        if !value.is_finite() || value == 0.0 {
            return value;
        }
    }

    while power < -MAX_POW10_STEP {
        value *= 1e-300;
        power += MAX_POW10_STEP;
        if !value.is_finite() || value == 0.0 {
            return value;
        }
    }

    if power >= 0 {
        value * 10f64.powi(power as i32)
    } else {
        value / 10f64.powi((-power) as i32)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ExtendedScalar {
    mantissa: f64,
    exponent: i64,
}

impl ExtendedScalar {
    pub const ZERO: Self = Self {
        mantissa: 0.0,
        exponent: 0,
    };

    pub const ONE: Self = Self {
        mantissa: 1.0,
        exponent: 0,
    };

    /// Canonical invalid value, returned when an operand is already invalid.
    pub const INVALID: Self = Self {
        mantissa: f64::NAN,
        exponent: i64::MAX,
    };

    /// Builds a value from raw fields without normalizing.
    #[must_use]
    pub const fn new(mantissa: f64, exponent: i64) -> Self {
        Self { mantissa, exponent }
    }

    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value == 0.0 {
            return Self::ZERO;
        }

        if !value.is_finite() {
            return Self {
                mantissa: value,
                exponent: 0,
            };
        }

        let exponent = value.abs().log10().floor() as i64;
        let mantissa = scale_by_pow10(value, -exponent);

        Self { mantissa, exponent }.normalize()
    }

    /// Converts back to an `f64`. Overflows to `±inf` or underflows to zero
    /// when the exponent is outside the native range.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.mantissa == 0.0 {
            return 0.0;
        }

        scale_by_pow10(self.mantissa, self.exponent)
    }

    #[must_use]
    pub fn mantissa(&self) -> f64 {
        self.mantissa
    }

    #[must_use]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    /// Mantissa is finite and the exponent is not one of the two sentinels.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.mantissa.is_finite() && self.exponent != i64::MAX && self.exponent != i64::MIN
    }

    /// Re-expresses the value with `1 <= |mantissa| < 10`, or as canonical
    /// zero. Invalid values are returned unchanged.
    #[must_use]
    pub fn normalize(self) -> Self {
        if !self.is_valid() {
            return self;
        }

        if self.mantissa == 0.0 {
            return Self::ZERO;
        }

        let magnitude = self.mantissa.abs();
        if (1.0..10.0).contains(&magnitude) {
            return self;
        }

        let shift = magnitude.log10().floor() as i64;
        let mut mantissa = scale_by_pow10(self.mantissa, -shift);
        let mut exponent = self.exponent.saturating_add(shift);

        // log10 can land one decade off near exact powers of ten
        if mantissa.abs() < 1.0 {
            mantissa *= 10.0;
            exponent = exponent.saturating_sub(1);
        }
        if mantissa.abs() >= 10.0 {
            mantissa /= 10.0;
            exponent = exponent.saturating_add(1);
        }

        Self { mantissa, exponent }
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            exponent: self.exponent,
        }
    }

    /// Decimal logarithm of the magnitude, as an `f64`.
    #[must_use]
    pub fn log10_abs(&self) -> f64 {
        self.mantissa.abs().log10() + self.exponent as f64
    }

    /// Builds a positive value from its decimal logarithm.
    #[must_use]
    pub fn from_log10(log10: f64) -> Self {
        if !log10.is_finite() {
            return if log10 == f64::NEG_INFINITY {
                Self::ZERO
            } else {
                Self::INVALID
            };
        }

        let exponent = log10.floor();
        let mantissa = 10f64.powf(log10 - exponent);

        Self {
            mantissa,
            exponent: exponent as i64,
        }
        .normalize()
    }

    fn sign(&self) -> i8 {
        if self.mantissa > 0.0 {
            1
        } else if self.mantissa < 0.0 {
            -1
        } else {
            0
        }
    }
}

impl Default for ExtendedScalar {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for ExtendedScalar {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<u32> for ExtendedScalar {
    fn from(value: u32) -> Self {
        Self::from_f64(f64::from(value))
    }
}

impl Add for ExtendedScalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        if !self.is_valid() || !rhs.is_valid() {
            return Self::INVALID;
        }

        if rhs.mantissa == 0.0 {
            return self;
        }
        if self.mantissa == 0.0 {
            return rhs;
        }

        let shift = i128::from(rhs.exponent) - i128::from(self.exponent);
        if shift > i128::from(MAX_ALIGN_DECADES) {
            return rhs;
        }

        let aligned = scale_by_pow10(rhs.mantissa, shift.max(i128::from(i64::MIN)) as i64);

        Self {
            mantissa: self.mantissa + aligned,
            exponent: self.exponent,
        }
    }
}

impl Sub for ExtendedScalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for ExtendedScalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if !self.is_valid() || !rhs.is_valid() {
            return Self::INVALID;
        }

        let mantissa = self.mantissa * rhs.mantissa;
        if mantissa == 0.0 {
            return Self::ZERO;
        }

        match self.exponent.checked_add(rhs.exponent) {
            Some(exponent) => Self { mantissa, exponent },
            None => Self::INVALID,
        }
    }
}

impl Div for ExtendedScalar {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        if !self.is_valid() || !rhs.is_valid() {
            return Self::INVALID;
        }

        let mantissa = self.mantissa / rhs.mantissa;
        if mantissa == 0.0 {
            return Self::ZERO;
        }

        match self.exponent.checked_sub(rhs.exponent) {
            Some(exponent) => Self { mantissa, exponent },
            None => Self::INVALID,
        }
    }
}

impl Neg for ExtendedScalar {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            mantissa: -self.mantissa,
            exponent: self.exponent,
        }
    }
}

// Both operands are normalized before comparing, so equal quantities held in
// different forms compare equal.
impl PartialEq for ExtendedScalar {
    fn eq(&self, other: &Self) -> bool {
        let a = self.normalize();
        let b = other.normalize();

        a.is_valid() && b.is_valid() && a.mantissa == b.mantissa && a.exponent == b.exponent
    }
}

impl PartialOrd for ExtendedScalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let a = self.normalize();
        let b = other.normalize();

        if !a.is_valid() || !b.is_valid() {
            return None;
        }

        let (sign_a, sign_b) = (a.sign(), b.sign());
        if sign_a != sign_b {
            return Some(sign_a.cmp(&sign_b));
        }
        if sign_a == 0 {
            return Some(Ordering::Equal);
        }

        let gap = i128::from(a.exponent) - i128::from(b.exponent);
        if gap.abs() > 1 {
            let by_exponent = a.exponent.cmp(&b.exponent);
            return Some(if sign_a > 0 {
                by_exponent
            } else {
                by_exponent.reverse()
            });
        }

        let rescaled = scale_by_pow10(b.mantissa, -(gap as i64));
        a.mantissa.partial_cmp(&rescaled)
    }
}

impl fmt::Display for ExtendedScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x10^{}", self.mantissa, self.exponent)
    }
}
