use crate::core::data::colour::Colour;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GradientError {
    Empty,
}

impl fmt::Display for GradientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no gradient configured"),
        }
    }
}

impl Error for GradientError {}

/// Ordered colour stops sampled by piecewise-linear interpolation. Stop `k`
/// of `n` sits at fraction `k / n`; the last stop also covers fraction 1.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColourGradient {
    stops: Vec<Colour>,
}

impl ColourGradient {
    #[must_use]
    pub fn new(stops: Vec<Colour>) -> Self {
        Self { stops }
    }

    #[must_use]
    pub fn stops(&self) -> &[Colour] {
        &self.stops
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn sample(&self, fraction: f64) -> Result<Colour, GradientError> {
        let last = match self.stops.len() {
            0 => return Err(GradientError::Empty),
            len => len - 1,
        };

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let scaled = fraction * self.stops.len() as f64;
        let index = scaled.floor();
        let weight = scaled - index;

        let index = index as usize;
        let from = self.stops[index.min(last)];
        let to = self.stops[(index + 1).min(last)];

        Ok(Colour {
            r: lerp_channel(from.r, to.r, weight),
            g: lerp_channel(from.g, to.g, weight),
            b: lerp_channel(from.b, to.b, weight),
        })
    }
}

fn lerp_channel(from: u8, to: u8, weight: f64) -> u8 {
    let from = f64::from(from);
    let to = f64::from(to);

    (from + (to - from) * weight).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> ColourGradient {
        ColourGradient::new(vec![
            Colour::new(0, 0, 0),
            Colour::new(255, 0, 0),
            Colour::new(0, 255, 0),
            Colour::new(10, 20, 30),
            Colour::new(255, 255, 255),
        ])
    }

    #[test]
    fn test_empty_gradient_reports_error() {
        let empty = ColourGradient::default();

        assert_eq!(empty.sample(0.5), Err(GradientError::Empty));
    }

    #[test]
    fn test_sample_hits_stops_exactly_at_boundaries() {
        let gradient = gradient();
        let n = gradient.stops().len();

        for k in 0..n {
            let fraction = k as f64 / n as f64;
            assert_eq!(gradient.sample(fraction), Ok(gradient.stops()[k]), "stop {}", k);
        }
    }

    #[test]
    fn test_sample_interpolates_between_stops() {
        let gradient = ColourGradient::new(vec![Colour::new(0, 0, 0), Colour::new(200, 100, 50)]);

        // 0.25 * 2 = 0.5, halfway from stop 0 to stop 1
        assert_eq!(gradient.sample(0.25), Ok(Colour::new(100, 50, 25)));
    }

    #[test]
    fn test_sample_clamps_at_and_beyond_one() {
        let gradient = gradient();
        let last = *gradient.stops().last().unwrap();

        assert_eq!(gradient.sample(1.0), Ok(last));
        assert_eq!(gradient.sample(1.000_000_1), Ok(last));
        assert_eq!(gradient.sample(-0.5), Ok(gradient.stops()[0]));
        assert_eq!(gradient.sample(f64::NAN), Ok(gradient.stops()[0]));
    }

    #[test]
    fn test_single_stop_gradient_is_flat() {
        let colour = Colour::new(12, 34, 56);
        let gradient = ColourGradient::new(vec![colour]);

        assert_eq!(gradient.sample(0.0), Ok(colour));
        assert_eq!(gradient.sample(0.7), Ok(colour));
    }
}
