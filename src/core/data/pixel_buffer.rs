use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

const BYTES_PER_PIXEL: usize = 3;

fn byte_len(pixel_rect: PixelRect) -> usize {
    pixel_rect.size() as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds { pixel: Point, pixel_rect: PixelRect },
    BoundsMismatch { expected: usize, actual: usize },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch { expected, actual } => {
                write!(
                    f,
                    "pixel rect needs {} bytes but the buffer holds {}",
                    expected, actual
                )
            }
            Self::PixelOutsideBounds { pixel, pixel_rect } => {
                write!(
                    f,
                    "pixel ({}, {}) outside of {}x{} pixel rect",
                    pixel.x,
                    pixel.y,
                    pixel_rect.width(),
                    pixel_rect.height()
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGB frame. Produced once per render and handed to the
/// presentation layer by value.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixel_rect: PixelRect,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        Self {
            pixel_rect,
            buffer: vec![0; byte_len(pixel_rect)],
        }
    }

    pub fn from_data(
        pixel_rect: PixelRect,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let expected = byte_len(pixel_rect);

        if expected != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected,
                actual: buffer.len(),
            });
        }

        Ok(Self { pixel_rect, buffer })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_rect.height()
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn into_data(self) -> PixelBufferData {
        self.buffer
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        }

        let column = (pixel.x - self.pixel_rect.top_left().x) as usize;
        let row = (pixel.y - self.pixel_rect.top_left().y) as usize;

        Ok((row * self.pixel_rect.width() as usize + column) * BYTES_PER_PIXEL)
    }

    pub fn colour_at(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(pixel)?;

        Ok(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index_of(pixel)?;

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(width: u32, height: u32) -> PixelRect {
        PixelRect::from_size(width, height).unwrap()
    }

    #[test]
    fn test_new_creates_zeroed_buffer() {
        let buffer = PixelBuffer::new(rect(10, 4));

        assert_eq!(buffer.buffer().len(), 120); // 10 * 4 * 3
        assert!(buffer.buffer().iter().all(|&b| b == 0));
        assert_eq!(buffer.width(), 10);
        assert_eq!(buffer.height(), 4);
    }

    #[test]
    fn test_from_data_checks_length() {
        let result = PixelBuffer::from_data(rect(2, 2), vec![0; 11]);

        assert_eq!(
            result,
            Err(PixelBufferError::BoundsMismatch {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn test_row_major_layout() {
        let data = vec![
            255, 0, 0, // (0,0)
            0, 255, 0, // (1,0)
            0, 0, 255, // (0,1)
            9, 9, 9, // (1,1)
        ];
        let buffer = PixelBuffer::from_data(rect(2, 2), data).unwrap();

        assert_eq!(buffer.colour_at(Point { x: 1, y: 0 }), Ok(Colour::new(0, 255, 0)));
        assert_eq!(buffer.colour_at(Point { x: 0, y: 1 }), Ok(Colour::new(0, 0, 255)));
        assert_eq!(buffer.colour_at(Point { x: 1, y: 1 }), Ok(Colour::new(9, 9, 9)));
    }

    #[test]
    fn test_set_pixel_with_offset_rect() {
        let offset = PixelRect::new(Point { x: 10, y: 20 }, Point { x: 12, y: 22 }).unwrap();
        let mut buffer = PixelBuffer::new(offset);

        buffer.set_pixel(Point { x: 11, y: 21 }, Colour::new(1, 2, 3)).unwrap();

        assert_eq!(&buffer.buffer()[12..15], &[1, 2, 3]);
    }

    #[test]
    fn test_set_pixel_outside_bounds() {
        let pixel_rect = rect(3, 3);
        let mut buffer = PixelBuffer::new(pixel_rect);

        let result = buffer.set_pixel(Point { x: 3, y: 0 }, Colour::new(1, 1, 1));

        assert_eq!(
            result,
            Err(PixelBufferError::PixelOutsideBounds {
                pixel: Point { x: 3, y: 0 },
                pixel_rect
            })
        );
    }
}
