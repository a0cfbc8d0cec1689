use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

/// Computes every pixel of `pixel_rect` on the calling thread, row-major.
pub fn generate_fractal_serial<Alg: FractalAlgorithm>(
    pixel_rect: PixelRect,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure> {
    let x_start = pixel_rect.top_left().x;
    let x_end = pixel_rect.bottom_right().x;

    (pixel_rect.top_left().y..=pixel_rect.bottom_right().y)
        .flat_map(|y| (x_start..=x_end).map(move |x| Point { x, y }))
        .map(|pixel| algorithm.compute(pixel))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::fmt;

    #[derive(Debug)]
    struct StubError {}

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    struct StubCoordinates {}

    impl FractalAlgorithm for StubCoordinates {
        type Success = (i32, i32);
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok((pixel.x, pixel.y))
        }
    }

    struct StubFailsOnPixel {
        pixel: Point,
    }

    impl FractalAlgorithm for StubFailsOnPixel {
        type Success = u32;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            if pixel == self.pixel {
                Err(StubError {})
            } else {
                Ok(0)
            }
        }
    }

    #[test]
    fn test_covers_inclusive_rect_in_row_major_order() {
        let pixel_rect = PixelRect::new(Point { x: 1, y: 5 }, Point { x: 2, y: 6 }).unwrap();

        let results = generate_fractal_serial(pixel_rect, &StubCoordinates {}).unwrap();

        assert_eq!(results, vec![(1, 5), (2, 5), (1, 6), (2, 6)]);
    }

    #[test]
    fn test_single_pixel_rect() {
        let pixel_rect = PixelRect::from_size(1, 1).unwrap();

        let results = generate_fractal_serial(pixel_rect, &StubCoordinates {}).unwrap();

        assert_eq!(results, vec![(0, 0)]);
    }

    #[test]
    fn test_propagates_algorithm_failure() {
        let pixel_rect = PixelRect::from_size(4, 4).unwrap();
        let algorithm = StubFailsOnPixel {
            pixel: Point { x: 3, y: 3 },
        };

        assert!(generate_fractal_serial(pixel_rect, &algorithm).is_err());
    }
}
