use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Binary PPM (P6): header with width, height and max colour, then raw RGB.
pub fn encode_ppm(buffer: &PixelBuffer, mut out: impl Write) -> std::io::Result<()> {
    writeln!(out, "P6")?;
    writeln!(out, "{} {}", buffer.width(), buffer.height())?;
    writeln!(out, "255")?;
    out.write_all(buffer.buffer())?;
    out.flush()
}

pub fn write_ppm(buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
    let file = File::create(filepath)?;
    encode_ppm(buffer, BufWriter::new(file))
}
