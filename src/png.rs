use crate::error::{ChunkTypeError, EncodeError};
use crate::img::{Pixel, RawImage};

use crc::{CRC_32_ISO_HDLC, Crc};
use miniz_oxide::deflate::CompressionLevel;
use miniz_oxide::deflate::core::{
    CompressorOxide, TDEFLFlush, TDEFLStatus, compress_to_output,
    create_comp_flags_from_zip_params,
};
use std::fmt::{self, Display};
use std::str::{FromStr, from_utf8};

const CHECKSUM: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

// Positive window bits ask the compressor for a zlib header and adler32 trailer.
const ZLIB_WINDOW_BITS: i32 = 15;

/// Largest payload a chunk length prefix may declare.
pub const MAX_CHUNK_LEN: usize = i32::MAX as usize;

pub const STANDARD_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub const BIT_DEPTH: u8 = 8;
pub const COLOR_TYPE_TRUECOLOR: u8 = 2;
pub const COMPRESSION_METHOD: u8 = 0;
pub const FILTER_METHOD: u8 = 0;
pub const INTERLACE_METHOD: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkType {
    data: [u8; 4],
}

impl ChunkType {
    pub const IHDR: ChunkType = ChunkType { data: *b"IHDR" };
    pub const IDAT: ChunkType = ChunkType { data: *b"IDAT" };
    pub const IEND: ChunkType = ChunkType { data: *b"IEND" };

    pub fn bytes(&self) -> [u8; 4] {
        self.data
    }
    pub fn is_critical(&self) -> bool {
        self.data[0].is_ascii_uppercase()
    }
    pub fn is_public(&self) -> bool {
        self.data[1].is_ascii_uppercase()
    }
    pub fn is_reserved_bit_valid(&self) -> bool {
        self.data[2].is_ascii_uppercase()
    }
    pub fn is_safe_to_copy(&self) -> bool {
        self.data[3].is_ascii_lowercase()
    }
}

fn is_valid_chunk_type(data: [u8; 4]) -> bool {
    data.iter().all(u8::is_ascii_alphabetic)
}

impl TryFrom<[u8; 4]> for ChunkType {
    type Error = ChunkTypeError;

    fn try_from(value: [u8; 4]) -> Result<Self, Self::Error> {
        if is_valid_chunk_type(value) {
            Ok(ChunkType { data: value })
        } else {
            Err(ChunkTypeError::NotAlphabetic(value))
        }
    }
}

impl FromStr for ChunkType {
    type Err = ChunkTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .map_err(|_| ChunkTypeError::Length(s.len()))?;
        ChunkType::try_from(bytes)
    }
}

impl Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Construction guarantees ASCII letters.
        let s = from_utf8(&self.data).map_err(|_| fmt::Error)?;
        write!(f, "{}", s)
    }
}

/// A PNG chunk. Length and CRC are always derived from the current payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    chunk_type: ChunkType,
    data: Vec<u8>,
}

impl Chunk {
    /// Callers keep `data` within `MAX_CHUNK_LEN`; `compress` enforces it for IDAT.
    pub fn new(chunk_type: ChunkType, data: Vec<u8>) -> Chunk {
        debug_assert!(chunk_type.is_reserved_bit_valid());
        debug_assert!(data.len() <= MAX_CHUNK_LEN);
        Chunk { chunk_type, data }
    }

    pub fn length(&self) -> u32 {
        u32::try_from(self.data.len()).unwrap_or(u32::MAX)
    }

    pub fn chunk_type(&self) -> &ChunkType {
        &self.chunk_type
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// CRC-32 over the type tag followed by the payload.
    pub fn crc(&self) -> u32 {
        let mut digest = CHECKSUM.digest();
        digest.update(&self.chunk_type.bytes());
        digest.update(&self.data);
        digest.finalize()
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::with_capacity(self.data.len() + 12);
        bytes.extend_from_slice(&self.length().to_be_bytes());
        bytes.extend_from_slice(&self.chunk_type.bytes());
        bytes.extend_from_slice(self.data());
        bytes.extend_from_slice(&self.crc().to_be_bytes());
        bytes
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-byte chunk of type {} with crc {:08X}",
            self.length(),
            self.chunk_type,
            self.crc()
        )
    }
}

pub fn as_bytes(chunks: &[Chunk]) -> Vec<u8> {
    STANDARD_HEADER
        .iter()
        .copied()
        .chain(chunks.iter().flat_map(|chunk| chunk.as_bytes()))
        .collect()
}

fn header_chunk(img: &RawImage) -> Chunk {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&img.width().to_be_bytes());
    data.extend_from_slice(&img.height().to_be_bytes());
    data.extend_from_slice(&[
        BIT_DEPTH,
        COLOR_TYPE_TRUECOLOR,
        COMPRESSION_METHOD,
        FILTER_METHOD,
        INTERLACE_METHOD,
    ]);
    Chunk::new(ChunkType::IHDR, data)
}

/// zlib-wrapped deflate at the best-compression level.
fn compress(raw: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let flags = create_comp_flags_from_zip_params(
        CompressionLevel::BestCompression as i32,
        ZLIB_WINDOW_BITS,
        0,
    );
    let mut compressor = CompressorOxide::new(flags);
    let mut out = Vec::with_capacity(raw.len() / 4 + 64);
    let (status, consumed) = compress_to_output(&mut compressor, raw, TDEFLFlush::Finish, |buf| {
        out.extend_from_slice(buf);
        true
    });
    match status {
        TDEFLStatus::Done if consumed == raw.len() => {
            check_chunk_len(out.len())?;
            Ok(out)
        }
        TDEFLStatus::Done => Err(EncodeError::CompressionFailure(format!(
            "consumed {} of {} input bytes",
            consumed,
            raw.len()
        ))),
        other => Err(EncodeError::CompressionFailure(format!(
            "compressor stopped with status {:?}",
            other
        ))),
    }
}

fn check_chunk_len(len: usize) -> Result<(), EncodeError> {
    if len > MAX_CHUNK_LEN {
        return Err(EncodeError::CompressionFailure(format!(
            "{} compressed bytes exceed the {} byte chunk limit",
            len, MAX_CHUNK_LEN
        )));
    }
    Ok(())
}

/// Encode a row-major RGB buffer as an 8-bit truecolor, non-interlaced PNG.
pub fn encode_img(width: u32, height: u32, pixels: &[Pixel]) -> Result<Vec<u8>, EncodeError> {
    let img = RawImage::new(width, height, pixels)?;

    let chunks = [
        header_chunk(&img),
        Chunk::new(ChunkType::IDAT, compress(&img.scanlines())?),
        Chunk::new(ChunkType::IEND, Vec::new()),
    ];
    for c in &chunks {
        debug_assert!(c.chunk_type().is_critical() && c.chunk_type().is_public());
        log::debug!("{}", c);
    }

    Ok(as_bytes(&chunks))
}
