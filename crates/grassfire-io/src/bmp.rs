//! BMP image format support
//!
//! Reads Windows Bitmap (BMP) files into 8-bit gray images and writes
//! 8-bit palettized BMP files with an identity gray palette.
//!
//! Palettized input (1, 4 and 8 bpp) is converted through its palette, so a
//! file with a non-gray palette still decodes to the luminance of each entry.
//! 24 and 32 bpp input is converted to luminance.

use crate::{IoError, IoResult, luminance};
use grassfire_core::{ImageFormat, Pix};
use std::io::{Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// Palette entries written for 8-bit output
const GRAY_PALETTE_LEN: usize = 256;

fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn le_i32(b: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

/// BMP rows are padded to a multiple of 4 bytes.
fn row_stride(width: u32, bits_per_pixel: u16) -> usize {
    (width as usize * bits_per_pixel as usize).div_ceil(32) * 4
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }

    let pixel_offset = le_u32(&file_header, 10) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let raw_width = le_i32(&info_header, 4);
    let raw_height = le_i32(&info_header, 8);

    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    let colors_used = le_u32(&info_header, 32) as usize;

    // BI_RGB, or BI_BITFIELDS with the standard masks
    if compression != 0 && compression != 3 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }

    if raw_width <= 0 || raw_height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid BMP dimensions: {}x{}",
            raw_width, raw_height
        )));
    }
    let width = raw_width.unsigned_abs();
    let top_down = raw_height < 0;
    let height = raw_height.unsigned_abs();

    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    let extra_header = header_size as usize - BMP_INFO_HEADER_SIZE as usize;
    if extra_header > 0 {
        let mut skip = vec![0u8; extra_header];
        reader.read_exact(&mut skip)?;
    }
    let mut consumed = BMP_FILE_HEADER_SIZE + header_size as usize;

    // Palette entries as gray levels (for 1, 4, 8 bit images)
    let palette: Vec<u8> = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let num_colors = if colors_used == 0 {
            max_colors
        } else {
            colors_used.min(max_colors)
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw)?;
        consumed += raw.len();
        raw.chunks_exact(4)
            .map(|q| luminance(q[2], q[1], q[0]))
            .collect()
    } else {
        Vec::new()
    };

    if pixel_offset > consumed {
        let mut skip = vec![0u8; pixel_offset - consumed];
        reader.read_exact(&mut skip)?;
    }

    let mut pix_mut = Pix::new(width, height)?.to_mut();
    pix_mut.set_informat(ImageFormat::Bmp);

    let lookup = |index: u8| palette.get(index as usize).copied().unwrap_or(0);
    let mut row_buffer = vec![0u8; row_stride(width, bits_per_pixel)];

    for row in 0..height {
        reader.read_exact(&mut row_buffer)?;

        let y = if top_down { row } else { height - 1 - row };
        let out = pix_mut.row_data_mut(y);

        match bits_per_pixel {
            1 => {
                for (x, v) in out.iter_mut().enumerate() {
                    let bit = (row_buffer[x / 8] >> (7 - (x % 8))) & 1;
                    *v = lookup(bit);
                }
            }
            4 => {
                for (x, v) in out.iter_mut().enumerate() {
                    let byte = row_buffer[x / 2];
                    let index = if x % 2 == 0 { byte >> 4 } else { byte & 0xF };
                    *v = lookup(index);
                }
            }
            8 => {
                for (v, &index) in out.iter_mut().zip(&row_buffer) {
                    *v = lookup(index);
                }
            }
            24 => {
                for (v, bgr) in out.iter_mut().zip(row_buffer.chunks_exact(3)) {
                    *v = luminance(bgr[2], bgr[1], bgr[0]);
                }
            }
            _ => {
                for (v, bgra) in out.iter_mut().zip(row_buffer.chunks_exact(4)) {
                    *v = luminance(bgra[2], bgra[1], bgra[0]);
                }
            }
        }
    }

    Ok(pix_mut.into())
}

/// Write an 8-bit palettized BMP image (bottom-up, gray palette).
pub fn write_bmp<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let bits_per_pixel: u16 = 8;

    let stride = row_stride(width, bits_per_pixel);
    let pixel_data_size = stride * height as usize;
    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize + GRAY_PALETTE_LEN * 4;
    let file_size = u32::try_from(pixel_offset + pixel_data_size)
        .map_err(|_| IoError::EncodeError("image too large for BMP".to_string()))?;

    // File header
    writer.write_all(b"BM")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(&[0u8; 4])?; // Reserved
    writer.write_all(&(pixel_offset as u32).to_le_bytes())?;

    // Info header
    writer.write_all(&BMP_INFO_HEADER_SIZE.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    writer.write_all(&(height as i32).to_le_bytes())?; // Bottom-up
    writer.write_all(&1u16.to_le_bytes())?; // Planes
    writer.write_all(&bits_per_pixel.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?; // Compression
    writer.write_all(&(pixel_data_size as u32).to_le_bytes())?;
    writer.write_all(&0i32.to_le_bytes())?; // X pixels per meter
    writer.write_all(&0i32.to_le_bytes())?; // Y pixels per meter
    writer.write_all(&(GRAY_PALETTE_LEN as u32).to_le_bytes())?; // Colors used
    writer.write_all(&0u32.to_le_bytes())?; // Important colors

    for i in 0..GRAY_PALETTE_LEN {
        let val = i as u8;
        writer.write_all(&[val, val, val, 0])?;
    }

    let mut row_buffer = vec![0u8; stride];
    for row in 0..height {
        let y = height - 1 - row;
        row_buffer[..width as usize].copy_from_slice(pix.row_data(y));
        writer.write_all(&row_buffer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmp_roundtrip_8bit() {
        // Odd width exercises row padding
        let mut pix_mut = Pix::new(7, 5).unwrap().to_mut();
        for y in 0..5 {
            for x in 0..7 {
                pix_mut.set_pixel(x, y, ((x + y) * 20) as u8).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_bmp(&pix, &mut buffer).unwrap();
        assert_eq!(buffer.len(), 14 + 40 + 1024 + 8 * 5);

        let pix2 = read_bmp(std::io::Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.width(), 7);
        assert_eq!(pix2.height(), 5);
        assert_eq!(pix2.informat(), ImageFormat::Bmp);
        assert!(pix2.equals(&pix));
    }

    /// Hand-built 2x2 24-bit top-down BMP
    fn rgb_bmp() -> Vec<u8> {
        let stride = 8; // 2 * 3 bytes padded to 8
        let mut buf = Vec::new();
        buf.extend_from_slice(b"BM");
        buf.extend_from_slice(&((54 + stride * 2) as u32).to_le_bytes());
        buf.extend_from_slice(&[0; 4]);
        buf.extend_from_slice(&54u32.to_le_bytes());
        buf.extend_from_slice(&40u32.to_le_bytes());
        buf.extend_from_slice(&2i32.to_le_bytes());
        buf.extend_from_slice(&(-2i32).to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&24u16.to_le_bytes());
        buf.extend_from_slice(&[0; 24]);
        // row 0: white, black
        buf.extend_from_slice(&[255, 255, 255, 0, 0, 0, 0, 0]);
        // row 1: pure red, pure blue (BGR order)
        buf.extend_from_slice(&[0, 0, 255, 255, 0, 0, 0, 0]);
        buf
    }

    #[test]
    fn test_read_24bit_top_down() {
        let pix = read_bmp(std::io::Cursor::new(rgb_bmp())).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(255));
        assert_eq!(pix.get_pixel(1, 0), Some(0));
        assert_eq!(pix.get_pixel(0, 1), Some(luminance(255, 0, 0)));
        assert_eq!(pix.get_pixel(1, 1), Some(luminance(0, 0, 255)));
    }

    #[test]
    fn test_read_rejects_garbage() {
        assert!(read_bmp(std::io::Cursor::new(b"XX".repeat(40))).is_err());
        let mut truncated = rgb_bmp();
        truncated.truncate(60);
        assert!(read_bmp(std::io::Cursor::new(truncated)).is_err());
    }
}
