//! PNM (portable anymap) support
//!
//! Reads the bitmap and graymap variants (P1, P2, P4, P5) and writes
//! binary graymaps (P5, maxval 255). Bitmap pixels map to 0 for set
//! ("ink") bits and 255 for clear bits, matching the PBM convention that
//! 1 is black.

use crate::{IoError, IoResult};
use grassfire_core::{ImageFormat, Pix};
use std::io::{Read, Write};

/// Cursor over a PNM byte stream.
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and `#` comments.
    fn skip_space(&mut self) {
        while let Some(&c) = self.data.get(self.pos) {
            if c == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_uint(&mut self, what: &str) -> IoResult<u32> {
        self.skip_space();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("PNM: expected {what}")))
    }

    /// Next single `0`/`1` digit of an ASCII bitmap (digits need no separator).
    fn next_bit(&mut self) -> IoResult<u8> {
        self.skip_space();
        match self.data.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1)
            }
            _ => Err(IoError::InvalidData("PNM: expected bit".to_string())),
        }
    }

    /// Raster after the single whitespace byte that ends the header.
    fn raster(&self) -> &'a [u8] {
        &self.data[(self.pos + 1).min(self.data.len())..]
    }
}

fn scale_to_8bit(value: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        value.min(255) as u8
    } else {
        ((value.min(maxval) * 255 + maxval / 2) / maxval) as u8
    }
}

/// Read a PNM image
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    if data.len() < 2 || data[0] != b'P' {
        return Err(IoError::InvalidData("not a PNM file".to_string()));
    }
    let kind = data[1];
    if !matches!(kind, b'1' | b'2' | b'4' | b'5') {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM type P{}",
            kind as char
        )));
    }

    let mut tokens = Tokens::new(&data[2..]);
    let width = tokens.next_uint("width")?;
    let height = tokens.next_uint("height")?;
    let maxval = if matches!(kind, b'2' | b'5') {
        let m = tokens.next_uint("maxval")?;
        if m == 0 || m > 65535 {
            return Err(IoError::InvalidData(format!("PNM: bad maxval {m}")));
        }
        m
    } else {
        1
    };

    let mut pix_mut = Pix::new(width, height)?.to_mut();
    pix_mut.set_informat(ImageFormat::Pnm);
    let npix = width as usize * height as usize;
    let truncated = || IoError::InvalidData("PNM: truncated raster".to_string());

    match kind {
        b'1' => {
            for v in pix_mut.data_mut() {
                *v = if tokens.next_bit()? == 1 { 0 } else { 255 };
            }
        }
        b'2' => {
            for v in pix_mut.data_mut() {
                *v = scale_to_8bit(tokens.next_uint("sample")?, maxval);
            }
        }
        b'4' => {
            let raster = tokens.raster();
            let stride = (width as usize).div_ceil(8);
            if raster.len() < stride * height as usize {
                return Err(truncated());
            }
            for y in 0..height {
                let src = &raster[y as usize * stride..];
                for (x, v) in pix_mut.row_data_mut(y).iter_mut().enumerate() {
                    let bit = (src[x / 8] >> (7 - (x % 8))) & 1;
                    *v = if bit == 1 { 0 } else { 255 };
                }
            }
        }
        _ => {
            let raster = tokens.raster();
            let bytes_per_sample = if maxval > 255 { 2 } else { 1 };
            if raster.len() < npix * bytes_per_sample {
                return Err(truncated());
            }
            for (i, v) in pix_mut.data_mut().iter_mut().enumerate() {
                let sample = if bytes_per_sample == 2 {
                    u16::from_be_bytes([raster[2 * i], raster[2 * i + 1]]) as u32
                } else {
                    raster[i] as u32
                };
                *v = scale_to_8bit(sample, maxval);
            }
        }
    }

    Ok(pix_mut.into())
}

/// Write a binary graymap (P5, maxval 255)
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", pix.width(), pix.height())?;
    writer.write_all(pix.data())?;
    Ok(())
}
