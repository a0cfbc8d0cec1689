use rayon::prelude::*;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

/// Computes rows in parallel on the current rayon pool and flattens them back
/// into the same row-major order as [`generate_fractal_serial`].
///
/// Run it inside `ThreadPool::install` to use a dedicated pool.
///
/// [`generate_fractal_serial`]: super::generate_fractal_serial::generate_fractal_serial
pub fn generate_fractal_parallel_rayon<Alg>(
    pixel_rect: PixelRect,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send,
    Alg::Failure: Send,
{
    let x_start = pixel_rect.top_left().x;
    let x_end = pixel_rect.bottom_right().x;
    let row_width = pixel_rect.width() as usize;

    let rows: Vec<Vec<Alg::Success>> = (pixel_rect.top_left().y..=pixel_rect.bottom_right().y)
        .into_par_iter()
        .map(|y| -> Result<Vec<Alg::Success>, Alg::Failure> {
            let mut row = Vec::with_capacity(row_width);

            for x in x_start..=x_end {
                row.push(algorithm.compute(Point { x, y })?);
            }

            Ok(row)
        })
        .collect::<Result<_, _>>()?;

    Ok(rows.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
    use std::error::Error;

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl std::fmt::Display for StubError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    struct StubSuccessAlgorithm {}

    impl FractalAlgorithm for StubSuccessAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok((pixel.x * 1000 + pixel.y) as u64)
        }
    }

    struct StubFailureAlgorithm {}

    impl FractalAlgorithm for StubFailureAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, _: Point) -> Result<Self::Success, Self::Failure> {
            Err(StubError {})
        }
    }

    #[test]
    fn test_rayon_generates_same_results_as_serial() {
        let pixel_rect = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 10, y: 8 }).unwrap();

        let serial = generate_fractal_serial(pixel_rect, &StubSuccessAlgorithm {}).unwrap();
        let parallel = generate_fractal_parallel_rayon(pixel_rect, &StubSuccessAlgorithm {}).unwrap();

        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_rayon_with_large_rect() {
        let pixel_rect = PixelRect::from_size(300, 200).unwrap();

        let results = generate_fractal_parallel_rayon(pixel_rect, &StubSuccessAlgorithm {}).unwrap();

        assert_eq!(results.len(), 60_000);
        assert_eq!(results[301], 1001);
    }

    #[test]
    fn test_rayon_propagates_algorithm_failure() {
        let pixel_rect = PixelRect::from_size(4, 5).unwrap();

        let result = generate_fractal_parallel_rayon(pixel_rect, &StubFailureAlgorithm {});

        assert_eq!(result, Err(StubError {}));
    }

    #[test]
    fn test_rayon_inside_dedicated_pool() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let pixel_rect = PixelRect::from_size(7, 3).unwrap();

        let results = pool
            .install(|| generate_fractal_parallel_rayon(pixel_rect, &StubSuccessAlgorithm {}))
            .unwrap();

        assert_eq!(results.len(), 21);
    }
}
