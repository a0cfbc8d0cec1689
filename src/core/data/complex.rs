use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const ZERO: Self = Self {
        real: 0.0,
        imag: 0.0,
    };

    #[must_use]
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    /// `real² + imag²`, used for the bailout test so the hot loop avoids a sqrt.
    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    #[must_use]
    pub fn modulus(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    #[must_use]
    pub fn argument(&self) -> f64 {
        self.imag.atan2(self.real)
    }

    /// Raises to a real power through the polar form
    /// `r^p (cos pθ + i sin pθ)`. A power of exactly 2 takes the plain
    /// product so the classic Mandelbrot iteration stays exact.
    #[must_use]
    pub fn pow(self, power: f64) -> Self {
        if power == 2.0 {
            return self * self;
        }

        let magnitude = self.modulus().powf(power);
        let angle = power * self.argument();

        Self {
            real: magnitude * angle.cos(),
            imag: magnitude * angle.sin(),
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            real: self.real + other.real,
            imag: self.imag + other.imag,
        }
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            real: self.real - other.real,
            imag: self.imag - other.imag,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            real: self.real * other.real - self.imag * other.imag,
            imag: self.real * other.imag + self.imag * other.real,
        }
    }
}

impl Div for Complex {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        let divisor = other.magnitude_squared();

        Self {
            real: (self.real * other.real + self.imag * other.imag) / divisor,
            imag: (self.imag * other.real - self.real * other.imag) / divisor,
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} + {}i)", self.real, self.imag)
    }
}
