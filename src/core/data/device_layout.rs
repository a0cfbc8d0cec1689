//! Fixed transfer records shared with compute devices.
//!
//! Every record is `#[repr(C)]` and built only from 32-bit words so the byte
//! image is the same on the host and on the device. A 64-bit float travels as
//! two words (`low`, `high`) of its IEEE-754 bit pattern and must be rebuilt
//! bit for bit on the other side.

use crate::core::data::complex::Complex;
use crate::core::data::extended_scalar::ExtendedScalar;
use crate::core::data::view_bounds::ViewBounds;
use bytemuck::{Pod, Zeroable};

/// Bumped whenever a record below changes shape.
pub const LAYOUT_VERSION: u32 = 1;

/// Exponents at or beyond this magnitude no longer fit a normal `f64`.
const NATIVE_EXPONENT_LIMIT: u64 = 290;

#[must_use]
pub fn split_f64(value: f64) -> (u32, u32) {
    let bits = value.to_bits();
    (bits as u32, (bits >> 32) as u32)
}

#[must_use]
pub fn join_f64(low: u32, high: u32) -> f64 {
    f64::from_bits(u64::from(high) << 32 | u64::from(low))
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct DeviceScalar {
    pub exponent: i32,
    pub mantissa_low: u32,
    pub mantissa_high: u32,
}

impl DeviceScalar {
    /// Invalid values, and exponents the 32-bit field cannot hold, become the
    /// `i32::MAX` sentinel.
    #[must_use]
    pub fn from_extended(value: ExtendedScalar) -> Self {
        let value = value.normalize();
        let exponent = i32::try_from(value.exponent())
            .ok()
            .filter(|exponent| *exponent != i32::MAX && *exponent != i32::MIN);

        match exponent {
            Some(exponent) if value.is_valid() => {
                let (mantissa_low, mantissa_high) = split_f64(value.mantissa());
                Self {
                    exponent,
                    mantissa_low,
                    mantissa_high,
                }
            }
            _ => {
                let (mantissa_low, mantissa_high) = split_f64(f64::NAN);
                Self {
                    exponent: i32::MAX,
                    mantissa_low,
                    mantissa_high,
                }
            }
        }
    }

    #[must_use]
    pub fn to_extended(self) -> ExtendedScalar {
        if self.exponent == i32::MAX || self.exponent == i32::MIN {
            return ExtendedScalar::INVALID;
        }

        ExtendedScalar::new(
            join_f64(self.mantissa_low, self.mantissa_high),
            i64::from(self.exponent),
        )
    }
}

/// Numeric representation the kernel iterates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Native,
    Extended,
}

impl Precision {
    /// Native `f64` while the bounds and the per-pixel step stay inside the
    /// normal `f64` exponent range, extended otherwise.
    #[must_use]
    pub fn for_view(bounds: &ViewBounds, width: u32, height: u32) -> Self {
        let step_x = bounds.width() / ExtendedScalar::from(width);
        let step_y = bounds.height() / ExtendedScalar::from(height);

        let outside_native = [
            bounds.x_min(),
            bounds.x_max(),
            bounds.y_min(),
            bounds.y_max(),
            step_x,
            step_y,
        ]
        .into_iter()
        .map(ExtendedScalar::normalize)
        .any(|value| !value.is_zero() && value.exponent().unsigned_abs() > NATIVE_EXPONENT_LIMIT);

        if outside_native {
            Self::Extended
        } else {
            Self::Native
        }
    }

    #[must_use]
    pub fn to_word(self) -> u32 {
        match self {
            Self::Native => 0,
            Self::Extended => 1,
        }
    }

    #[must_use]
    pub fn from_word(word: u32) -> Option<Self> {
        match word {
            0 => Some(Self::Native),
            1 => Some(Self::Extended),
            _ => None,
        }
    }
}

/// What a launch asks the device for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelMode {
    /// Iteration counts for every pixel.
    Render,
    /// Coordinate and iteration count of the probe pixel only.
    Probe,
}

impl KernelMode {
    #[must_use]
    pub fn to_word(self) -> u32 {
        match self {
            Self::Render => 0,
            Self::Probe => 1,
        }
    }

    #[must_use]
    pub fn from_word(word: u32) -> Option<Self> {
        match word {
            0 => Some(Self::Render),
            1 => Some(Self::Probe),
            _ => None,
        }
    }
}

/// One kernel launch: view, image size, escape parameters, mode and the
/// probe pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct KernelLaunch {
    pub layout_version: u32,
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub x_min: DeviceScalar,
    pub x_max: DeviceScalar,
    pub y_min: DeviceScalar,
    pub y_max: DeviceScalar,
    pub power_low: u32,
    pub power_high: u32,
    pub seed_real_low: u32,
    pub seed_real_high: u32,
    pub seed_imag_low: u32,
    pub seed_imag_high: u32,
    pub julia_mode: u32,
    pub precision: u32,
    pub mode: u32,
    pub probe_x: u32,
    pub probe_y: u32,
}

impl KernelLaunch {
    #[must_use]
    pub fn power(&self) -> f64 {
        join_f64(self.power_low, self.power_high)
    }

    #[must_use]
    pub fn julia_seed(&self) -> Complex {
        Complex::new(
            join_f64(self.seed_real_low, self.seed_real_high),
            join_f64(self.seed_imag_low, self.seed_imag_high),
        )
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Probe result written back for the selected pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct DeviceProbe {
    pub x: DeviceScalar,
    pub y: DeviceScalar,
    pub iterations: u32,
}
