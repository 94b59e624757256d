use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning a pixel buffer into PNG bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("image dimensions {width}x{height} are outside 1..=2^31-1")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("expected {expected} pixels, got {actual}")]
    InvalidPixelCount { expected: u64, actual: usize },
    #[error("deflate compressor failed: {0}")]
    CompressionFailure(String),
}

/// A byte sequence that cannot name a PNG chunk.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkTypeError {
    #[error("chunk type must be 4 bytes, got {0}")]
    Length(usize),
    #[error("chunk type {0:?} must be ASCII letters")]
    NotAlphabetic([u8; 4]),
}

/// Failures while producing the icon set, tagged with the icon and stage involved.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not create output directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not encode {size}x{size} icon")]
    Encode {
        size: u32,
        #[source]
        source: EncodeError,
    },
    #[error("could not write {size}x{size} icon to {}", .path.display())]
    StorageWriteFailure {
        size: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
