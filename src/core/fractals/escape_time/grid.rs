use crate::core::data::complex::Complex;
use crate::core::data::extended_complex::ExtendedComplex;
use crate::core::data::extended_scalar::ExtendedScalar;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::view_bounds::ViewBounds;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    PixelOutside { pixel: Point, pixel_rect: PixelRect },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelOutside { pixel, pixel_rect } => write!(
                f,
                "pixel (x: {}, y: {}) is outside the {}x{} view",
                pixel.x,
                pixel.y,
                pixel_rect.width(),
                pixel_rect.height()
            ),
        }
    }
}

impl Error for GridError {}

/// Pixel to coordinate mapping for one render:
/// `x = x_min + column * (x_max - x_min) / width`, and the same for rows
/// against the height. Row 0 maps to `y_min`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelGrid {
    pixel_rect: PixelRect,
    x_min: ExtendedScalar,
    y_min: ExtendedScalar,
    x_step: ExtendedScalar,
    y_step: ExtendedScalar,
    native_x_min: f64,
    native_y_min: f64,
    native_x_step: f64,
    native_y_step: f64,
}

impl PixelGrid {
    #[must_use]
    pub fn new(bounds: &ViewBounds, pixel_rect: PixelRect) -> Self {
        let x_step = (bounds.width() / ExtendedScalar::from(pixel_rect.width())).normalize();
        let y_step = (bounds.height() / ExtendedScalar::from(pixel_rect.height())).normalize();

        Self {
            pixel_rect,
            x_min: bounds.x_min(),
            y_min: bounds.y_min(),
            x_step,
            y_step,
            native_x_min: bounds.x_min().to_f64(),
            native_y_min: bounds.y_min().to_f64(),
            native_x_step: x_step.to_f64(),
            native_y_step: y_step.to_f64(),
        }
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn x_step(&self) -> ExtendedScalar {
        self.x_step
    }

    #[must_use]
    pub fn y_step(&self) -> ExtendedScalar {
        self.y_step
    }

    fn offsets(&self, pixel: Point) -> Result<(u32, u32), GridError> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(GridError::PixelOutside {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        }

        Ok((
            (pixel.x - self.pixel_rect.top_left().x) as u32,
            (pixel.y - self.pixel_rect.top_left().y) as u32,
        ))
    }

    pub fn coordinate(&self, pixel: Point) -> Result<Complex, GridError> {
        let (column, row) = self.offsets(pixel)?;

        Ok(Complex {
            real: self.native_x_min + f64::from(column) * self.native_x_step,
            imag: self.native_y_min + f64::from(row) * self.native_y_step,
        })
    }

    pub fn extended_coordinate(&self, pixel: Point) -> Result<ExtendedComplex, GridError> {
        let (column, row) = self.offsets(pixel)?;

        Ok(ExtendedComplex::new(
            self.x_min + ExtendedScalar::from(column) * self.x_step,
            self.y_min + ExtendedScalar::from(row) * self.y_step,
        ))
    }
}
