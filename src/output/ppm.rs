//! Binary PPM (P6) codec.
//!
//! Layout: ASCII magic `P6`, whitespace, width, whitespace, height,
//! whitespace, maximum channel value, a single whitespace byte, then
//! `width * height` RGB samples, top row first. Samples are one byte when
//! the maximum value is below 256 and two bytes (big-endian) otherwise.
//! `#` starts a comment that runs to the end of the line anywhere in the
//! header before the maximum value.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::pixel_buffer::{PixelBuffer, CHANNELS};

/// Magic number of binary PPM files.
const MAGIC: &[u8; 2] = b"P6";

/// Largest maximum value allowed by the format.
const MAX_VALUE_LIMIT: u32 = 65535;

/// Parsed PPM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmHeader {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Declared maximum channel value (1..=65535).
    pub max_value: u32,
}

impl PpmHeader {
    /// Bytes per channel sample.
    #[must_use]
    pub const fn sample_bytes(&self) -> usize {
        if self.max_value < 256 {
            1
        } else {
            2
        }
    }

    /// Size of the raster that follows the header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedHeader`] if the size does not fit in `usize`.
    pub fn raster_len(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(CHANNELS * self.sample_bytes()))
            .ok_or_else(|| {
                Error::MalformedHeader(format!(
                    "raster size of {}x{} image overflows",
                    self.width, self.height
                ))
            })
    }

    /// Parse a header from the start of `bytes`.
    ///
    /// Returns the header and the offset of the first raster byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the magic number is not `P6`
    /// and [`Error::MalformedHeader`] for missing, non-numeric or out-of-range
    /// fields.
    pub fn parse(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
            let found = String::from_utf8_lossy(&bytes[..bytes.len().min(2)]).into_owned();
            return Err(Error::UnsupportedFormat(format!(
                "expected magic number P6, found {found:?}"
            )));
        }

        let mut cursor = HeaderCursor {
            bytes,
            pos: MAGIC.len(),
        };

        if !cursor.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            return Err(Error::MalformedHeader(
                "magic number must be followed by whitespace".to_string(),
            ));
        }

        let width = cursor.field("width")?;
        let height = cursor.field("height")?;
        let max_value = cursor.field("max value")?;

        if width == 0 || height == 0 {
            return Err(Error::MalformedHeader(format!(
                "image dimensions must be positive, found {width}x{height}"
            )));
        }
        if max_value == 0 || max_value > MAX_VALUE_LIMIT {
            return Err(Error::MalformedHeader(format!(
                "max value must be in 1..={MAX_VALUE_LIMIT}, found {max_value}"
            )));
        }

        // Exactly one whitespace byte separates the header from the raster.
        match cursor.peek() {
            Some(b) if b.is_ascii_whitespace() => cursor.pos += 1,
            Some(_) => {
                return Err(Error::MalformedHeader(
                    "max value must be followed by a single whitespace byte".to_string(),
                ))
            }
            None => {
                return Err(Error::MalformedHeader(
                    "header ends before pixel data".to_string(),
                ))
            }
        }

        let header = Self {
            width,
            height,
            max_value,
        };
        header.raster_len()?;

        Ok((header, cursor.pos))
    }
}

struct HeaderCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl HeaderCursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn field(&mut self, name: &str) -> Result<u32> {
        self.skip_separators();

        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
                .ok_or_else(|| Error::MalformedHeader(format!("{name} is too large")))?;
            self.pos += 1;
        }

        if self.pos == start {
            return Err(match self.peek() {
                Some(b) => Error::MalformedHeader(format!(
                    "expected {name}, found byte {:?}",
                    char::from(b)
                )),
                None => Error::MalformedHeader(format!("header ends before {name}")),
            });
        }

        Ok(value)
    }
}

/// Binary PPM reader and writer.
pub struct PpmCodec;

impl PpmCodec {
    /// Write a pixel buffer as P6 with maximum value 255.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn encode<W: Write>(buf: &PixelBuffer, mut writer: W) -> Result<()> {
        write!(writer, "P6\n{} {}\n255\n", buf.width(), buf.height())?;
        writer.write_all(buf.pixels())?;
        writer.flush()?;
        Ok(())
    }

    /// Encode a pixel buffer to P6 bytes.
    #[must_use]
    pub fn to_bytes(buf: &PixelBuffer) -> Vec<u8> {
        let header = format!("P6\n{} {}\n255\n", buf.width(), buf.height());
        let mut bytes = Vec::with_capacity(header.len() + buf.pixels().len());
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(buf.pixels());
        bytes
    }

    /// Write a pixel buffer to a P6 file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or writing fails.
    pub fn write_to_file<P: AsRef<Path>>(buf: &PixelBuffer, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Self::encode(buf, BufWriter::new(file))?;

        tracing::debug!(
            path = %path.display(),
            width = buf.width(),
            height = buf.height(),
            "wrote PPM image"
        );
        Ok(())
    }

    /// Read a P6 image, rescaling each sample to `floor(255 * raw / max)`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the data is not a complete P6
    /// image. No partial image is returned.
    pub fn decode<R: Read>(mut reader: R) -> Result<PixelBuffer> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Decode P6 bytes.
    ///
    /// # Errors
    ///
    /// See [`PpmCodec::decode`].
    pub fn from_bytes(bytes: &[u8]) -> Result<PixelBuffer> {
        let (header, offset) = PpmHeader::parse(bytes)?;

        let expected = header.raster_len()?;
        let raster = &bytes[offset..];
        if raster.len() < expected {
            return Err(Error::TruncatedData {
                expected,
                actual: raster.len(),
            });
        }
        let raster = &raster[..expected];

        let pixels = match (header.sample_bytes(), header.max_value) {
            (1, 255) => raster.to_vec(),
            (1, max) => raster.iter().map(|&raw| rescale(u32::from(raw), max)).collect(),
            (_, max) => raster
                .chunks_exact(2)
                .map(|pair| rescale(u32::from(u16::from_be_bytes([pair[0], pair[1]])), max))
                .collect(),
        };

        tracing::debug!(
            width = header.width,
            height = header.height,
            max_value = header.max_value,
            "decoded PPM image"
        );

        PixelBuffer::from_raw(header.width, header.height, pixels)
    }

    /// Read a P6 file.
    ///
    /// # Errors
    ///
    /// See [`PpmCodec::decode`].
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let buf = Self::decode(BufReader::new(file))?;

        tracing::debug!(path = %path.display(), "read PPM image");
        Ok(buf)
    }
}

/// `floor(255 * raw / max)`, saturating for samples above the declared max.
#[inline]
fn rescale(raw: u32, max: u32) -> u8 {
    (255 * raw / max).min(255) as u8
}
