use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum GeneratePixelBufferError {
    ColourMap(Box<dyn Error>),
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for GeneratePixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColourMap(err) => write!(f, "colour map error: {}", err),
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for GeneratePixelBufferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ColourMap(err) => Some(err.as_ref()),
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl From<PixelBufferError> for GeneratePixelBufferError {
    fn from(err: PixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Maps row-major values to colours and packs them into a [`PixelBuffer`].
pub fn generate_pixel_buffer<T, CMap: ColourMap<T>>(
    input: Vec<T>,
    mapper: &CMap,
    pixel_rect: PixelRect,
) -> Result<PixelBuffer, GeneratePixelBufferError> {
    let mut buffer: PixelBufferData = Vec::with_capacity(input.len() * 3);

    for value in input {
        let Colour { r, g, b } = mapper.map(value).map_err(GeneratePixelBufferError::ColourMap)?;

        buffer.extend_from_slice(&[r, g, b]);
    }

    Ok(PixelBuffer::from_data(pixel_rect, buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::point::Point;

    struct StubColourMapSuccess {}

    impl ColourMap<u8> for StubColourMapSuccess {
        fn map(&self, value: u8) -> Result<Colour, Box<dyn Error>> {
            Ok(Colour {
                r: value,
                g: value,
                b: value,
            })
        }

        fn display_name(&self) -> &str {
            "Stub Success"
        }
    }

    struct StubColourMapFailure {}

    impl ColourMap<u8> for StubColourMapFailure {
        fn map(&self, _: u8) -> Result<Colour, Box<dyn Error>> {
            Err("StubColourMapError".into())
        }

        fn display_name(&self) -> &str {
            "Stub Failure"
        }
    }

    #[test]
    fn test_generates_pixel_buffer_correctly() {
        let pixel_rect = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 2, y: 1 }).unwrap();

        let results = generate_pixel_buffer(vec![1, 2, 3, 4, 5, 6], &StubColourMapSuccess {}, pixel_rect).unwrap();

        assert_eq!(
            results.buffer(),
            &vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6]
        );
        assert_eq!(results.pixel_rect(), pixel_rect);
    }

    #[test]
    fn test_propagates_colour_map_failure() {
        let pixel_rect = PixelRect::from_size(3, 2).unwrap();

        let results = generate_pixel_buffer(vec![1, 2, 3, 4, 5, 6], &StubColourMapFailure {}, pixel_rect);

        assert!(matches!(results, Err(GeneratePixelBufferError::ColourMap(_))));
    }

    #[test]
    fn test_pixel_rect_input_size_mismatch_returns_err() {
        let pixel_rect = PixelRect::from_size(2, 2).unwrap();

        let results = generate_pixel_buffer(vec![1, 2, 3, 4, 5, 6], &StubColourMapSuccess {}, pixel_rect);

        assert!(matches!(
            results,
            Err(GeneratePixelBufferError::PixelBuffer(PixelBufferError::BoundsMismatch {
                expected: 12,
                actual: 18
            }))
        ));
    }
}
