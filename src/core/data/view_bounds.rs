use crate::core::data::extended_scalar::ExtendedScalar;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewBoundsError {
    NotOrdered { axis: char },
    Invalid { axis: char },
}

impl fmt::Display for ViewBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOrdered { axis } => {
                write!(f, "{} bounds must satisfy min < max", axis)
            }
            Self::Invalid { axis } => write!(f, "{} bounds are not finite", axis),
        }
    }
}

impl Error for ViewBoundsError {}

/// Rectangle of the complex plane held in extended precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewBounds {
    x_min: ExtendedScalar,
    x_max: ExtendedScalar,
    y_min: ExtendedScalar,
    y_max: ExtendedScalar,
}

impl ViewBounds {
    pub fn new(
        x_min: ExtendedScalar,
        x_max: ExtendedScalar,
        y_min: ExtendedScalar,
        y_max: ExtendedScalar,
    ) -> Result<Self, ViewBoundsError> {
        Self::check_axis('x', x_min, x_max)?;
        Self::check_axis('y', y_min, y_max)?;

        Ok(Self {
            x_min: x_min.normalize(),
            x_max: x_max.normalize(),
            y_min: y_min.normalize(),
            y_max: y_max.normalize(),
        })
    }

    pub fn from_f64(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, ViewBoundsError> {
        Self::new(x_min.into(), x_max.into(), y_min.into(), y_max.into())
    }

    fn check_axis(axis: char, min: ExtendedScalar, max: ExtendedScalar) -> Result<(), ViewBoundsError> {
        if !min.is_valid() || !max.is_valid() {
            return Err(ViewBoundsError::Invalid { axis });
        }

        if min < max {
            Ok(())
        } else {
            Err(ViewBoundsError::NotOrdered { axis })
        }
    }

    #[must_use]
    pub fn x_min(&self) -> ExtendedScalar {
        self.x_min
    }

    #[must_use]
    pub fn x_max(&self) -> ExtendedScalar {
        self.x_max
    }

    #[must_use]
    pub fn y_min(&self) -> ExtendedScalar {
        self.y_min
    }

    #[must_use]
    pub fn y_max(&self) -> ExtendedScalar {
        self.y_max
    }

    #[must_use]
    pub fn width(&self) -> ExtendedScalar {
        (self.x_max - self.x_min).normalize()
    }

    #[must_use]
    pub fn height(&self) -> ExtendedScalar {
        (self.y_max - self.y_min).normalize()
    }

    /// Moves all four edges by `dx` spans horizontally and `dy` spans vertically.
    pub fn translated(&self, dx: f64, dy: f64) -> Result<Self, ViewBoundsError> {
        let shift_x = self.width() * ExtendedScalar::from_f64(dx);
        let shift_y = self.height() * ExtendedScalar::from_f64(dy);

        Self::new(
            self.x_min + shift_x,
            self.x_max + shift_x,
            self.y_min + shift_y,
            self.y_max + shift_y,
        )
    }

    /// Moves every edge inward by `amount` spans; negative amounts grow the
    /// rect. Fails rather than returning an inverted or collapsed rect.
    pub fn shrunk(&self, amount: f64) -> Result<Self, ViewBoundsError> {
        let inset_x = self.width() * ExtendedScalar::from_f64(amount);
        let inset_y = self.height() * ExtendedScalar::from_f64(amount);

        Self::new(
            self.x_min + inset_x,
            self.x_max - inset_x,
            self.y_min + inset_y,
            self.y_max - inset_y,
        )
    }
}

impl fmt::Display for ViewBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x [{}, {}] y [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: ExtendedScalar, expected: f64) {
        assert!(
            (actual.to_f64() - expected).abs() < 1e-12,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_new_valid() {
        let bounds = ViewBounds::from_f64(-2.1, 1.0, -1.3, 1.3).unwrap();

        assert_close(bounds.width(), 3.1);
        assert_close(bounds.height(), 2.6);
    }

    #[test]
    fn test_rejects_unordered_and_collapsed_axes() {
        assert_eq!(
            ViewBounds::from_f64(1.0, -1.0, -1.0, 1.0),
            Err(ViewBoundsError::NotOrdered { axis: 'x' })
        );
        assert_eq!(
            ViewBounds::from_f64(-1.0, 1.0, 0.5, 0.5),
            Err(ViewBoundsError::NotOrdered { axis: 'y' })
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(
            ViewBounds::from_f64(f64::NAN, 1.0, -1.0, 1.0),
            Err(ViewBoundsError::Invalid { axis: 'x' })
        );
    }

    #[test]
    fn test_translated_moves_by_fraction_of_span() {
        let bounds = ViewBounds::from_f64(0.0, 2.0, -1.0, 1.0).unwrap();

        let moved = bounds.translated(0.5, -0.25).unwrap();

        assert_close(moved.x_min(), 1.0);
        assert_close(moved.x_max(), 3.0);
        assert_close(moved.y_min(), -1.5);
        assert_close(moved.y_max(), 0.5);
    }

    #[test]
    fn test_shrunk_is_symmetric() {
        let bounds = ViewBounds::from_f64(-2.0, 2.0, -1.0, 1.0).unwrap();

        let zoomed = bounds.shrunk(0.25).unwrap();

        assert_close(zoomed.x_min(), -1.0);
        assert_close(zoomed.x_max(), 1.0);
        assert_close(zoomed.y_min(), -0.5);
        assert_close(zoomed.y_max(), 0.5);

        let grown = bounds.shrunk(-0.5).unwrap();
        assert_close(grown.width(), 8.0);
    }

    #[test]
    fn test_shrunk_rejects_inversion() {
        let bounds = ViewBounds::from_f64(-2.0, 2.0, -1.0, 1.0).unwrap();

        assert!(bounds.shrunk(0.5).is_err());
        assert!(bounds.shrunk(0.75).is_err());
    }

    #[test]
    fn test_deep_bounds_keep_their_span() {
        let centre = ExtendedScalar::from_f64(-0.75);
        let half = ExtendedScalar::new(1.0, -400);
        let bounds = ViewBounds::new(centre - half, centre + half, centre - half, centre + half);

        // the span vanishes next to the centre at f64-like precision
        assert!(bounds.is_err());

        let tiny = ViewBounds::new(-half, half, -half, half).unwrap();
        assert_eq!(tiny.width().exponent(), -400);
        assert!((tiny.width().mantissa() - 2.0).abs() < 1e-12);
    }
}
