//! PNG image format support
//!
//! Every PNG color type decodes to 8-bit gray: palettes and low bit depths
//! are expanded by the decoder, 16-bit samples are stripped to 8 bits, and
//! color is reduced to luminance. Alpha is ignored. Output is always 8-bit
//! grayscale.

use crate::{IoError, IoResult, luminance};
use grassfire_core::{ImageFormat, Pix};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let samples = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpected PNG output after expansion: {:?} {:?}",
                other, output_info.bit_depth
            )));
        }
    };
    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG bit depth after expansion: {:?}",
            output_info.bit_depth
        )));
    }

    let mut pix_mut = Pix::new(width, height)?.to_mut();
    pix_mut.set_informat(ImageFormat::Png);

    for y in 0..height {
        let src = &data[y as usize * bytes_per_row..];
        let out = pix_mut.row_data_mut(y);
        for (v, px) in out.iter_mut().zip(src.chunks_exact(samples)) {
            *v = if samples >= 3 {
                luminance(px[0], px[1], px[2])
            } else {
                px[0]
            };
        }
    }

    Ok(pix_mut.into())
}

/// Write an 8-bit grayscale PNG image
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(pix.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_gray() {
        let data: Vec<u8> = (0..48u32).map(|i| (i * 5) as u8).collect();
        let pix = Pix::from_vec(8, 6, data).unwrap();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.width(), 8);
        assert_eq!(pix2.height(), 6);
        assert!(pix2.equals(&pix));
    }

    #[test]
    fn test_png_rgb_reduces_to_luminance() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            let mut w = encoder.write_header().unwrap();
            w.write_image_data(&[255, 0, 0, 10, 10, 10]).unwrap();
            w.finish().unwrap();
        }
        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(luminance(255, 0, 0)));
        assert_eq!(pix.get_pixel(1, 0), Some(10));
    }
}
