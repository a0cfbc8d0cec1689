use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::colour_mapping::gradient::ColourGradient;
use crate::core::data::colour::Colour;
use std::error::Error;

/// Colours an iteration count `i` of budget `N` by sampling the gradient at
/// `max(1 - i / N, 0)`.
#[derive(Debug, Clone)]
pub struct EscapeFractionColourMap<'a> {
    gradient: &'a ColourGradient,
    max_iterations: u32,
}

impl<'a> EscapeFractionColourMap<'a> {
    #[must_use]
    pub fn new(gradient: &'a ColourGradient, max_iterations: u32) -> Self {
        Self {
            gradient,
            max_iterations,
        }
    }

    #[must_use]
    pub fn fraction(&self, iterations: u32) -> f64 {
        if self.max_iterations == 0 {
            return 0.0;
        }

        (1.0 - f64::from(iterations) / f64::from(self.max_iterations)).max(0.0)
    }
}

impl ColourMap<u32> for EscapeFractionColourMap<'_> {
    fn map(&self, iterations: u32) -> Result<Colour, Box<dyn Error>> {
        Ok(self.gradient.sample(self.fraction(iterations))?)
    }

    fn display_name(&self) -> &str {
        "Escape fraction"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> ColourGradient {
        ColourGradient::new(vec![
            Colour::new(0, 0, 0),
            Colour::new(100, 100, 100),
            Colour::new(200, 200, 200),
            Colour::new(250, 250, 250),
        ])
    }

    #[test]
    fn test_bounded_points_use_first_stop() {
        let gradient = gradient();
        let map = EscapeFractionColourMap::new(&gradient, 40);

        assert_eq!(map.map(40).unwrap(), Colour::new(0, 0, 0));
        assert_eq!(map.map(90).unwrap(), Colour::new(0, 0, 0));
    }

    #[test]
    fn test_fraction_matches_iteration_share() {
        let gradient = gradient();
        let map = EscapeFractionColourMap::new(&gradient, 40);

        assert_eq!(map.fraction(10), 0.75);
        // 0.75 * 4 = 3, exactly the last stop
        assert_eq!(map.map(10).unwrap(), Colour::new(250, 250, 250));
        assert_eq!(map.map(30).unwrap(), Colour::new(100, 100, 100));
    }

    #[test]
    fn test_empty_gradient_fails() {
        let empty = ColourGradient::default();
        let map = EscapeFractionColourMap::new(&empty, 10);

        assert!(map.map(3).is_err());
    }
}
