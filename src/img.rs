use crate::error::EncodeError;

/// One RGB sample triple, red first.
pub type Pixel = [u8; 3];

/// Largest width or height a PNG header may declare.
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Row-major RGB buffer, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage<'a>(u32, u32, &'a [Pixel]);

impl<'a> RawImage<'a> {
    pub fn new(width: u32, height: u32, pixels: &'a [Pixel]) -> Result<Self, EncodeError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(EncodeError::InvalidDimensions { width, height });
        }
        let expected = width as u64 * height as u64;
        if pixels.len() as u64 != expected {
            return Err(EncodeError::InvalidPixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(RawImage(width, height, pixels))
    }

    pub fn width(&self) -> u32 {
        self.0
    }

    pub fn height(&self) -> u32 {
        self.1
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [Pixel]> {
        self.2.chunks(self.0 as usize)
    }

    /// Filtered scanline stream: every row is prefixed with filter type 0 (None).
    pub fn scanlines(&self) -> Vec<u8> {
        let row_len = 1 + self.0 as usize * 3;
        let mut bytes = Vec::with_capacity(row_len * self.1 as usize);
        for row in self.rows() {
            bytes.push(0);
            bytes.extend(row.iter().flatten());
        }
        bytes
    }
}
