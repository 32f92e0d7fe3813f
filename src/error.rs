//! Error types for the EXIF codec.
//!
//! Parsing errors are raised synchronously when a block is constructed and are
//! never recovered internally. Undefined-format payloads and text rendering
//! have no error path at all.

use thiserror::Error;

/// Result alias used throughout the codec.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a byte sequence was rejected as EXIF/TIFF data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidDataKind {
    /// Fewer bytes than the structure being read requires.
    #[error("expected at least {expected} bytes of EXIF data, found just {found} bytes")]
    TooShort { expected: usize, found: usize },
    /// The leading six bytes are not `Exif\0\0`.
    #[error("EXIF header not found")]
    BadSignature,
    /// The TIFF header does not start with `II` or `MM`.
    #[error("unknown TIFF byte order marker 0x{0:04X}")]
    BadByteOrder(u16),
    /// The TIFF header magic is not 42.
    #[error("bad TIFF magic number {0}")]
    BadTiffMagic(u16),
    /// An offset or length points outside the available bytes.
    #[error("offset {offset} + {len} bytes is outside the {available} available bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },
    /// An IFD offset was reached twice while walking the directory tree.
    #[error("IFD at offset {0} was already visited")]
    IfdLoop(u32),
}

/// Errors produced by the codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid EXIF data: {0}")]
    InvalidData(InvalidDataKind),

    /// A user-comment encoding label does not fit the 8-byte field.
    #[error("user comment encoding label is {len} bytes, the field holds 8")]
    EncodingTooLong { len: usize },

    /// A mutation needed an IFD that the container does not have.
    #[error("no {0} IFD in this TIFF structure")]
    UnknownIfd(&'static str),

    /// Re-encoding would drop or misplace data found while parsing.
    #[error("cannot re-encode without losing data: {0}")]
    Unmovable(String),
}

impl Error {
    /// The invalid-data kind, if this is a parse failure.
    pub fn invalid_data_kind(&self) -> Option<&InvalidDataKind> {
        match self {
            Error::InvalidData(kind) => Some(kind),
            _ => None,
        }
    }
}

impl From<InvalidDataKind> for Error {
    fn from(kind: InvalidDataKind) -> Self {
        Error::InvalidData(kind)
    }
}
