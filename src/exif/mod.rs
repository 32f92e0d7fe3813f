//! EXIF block parsing and re-emission.
//!
//! - [`ExifBlock`]: `Exif\0\0` signature + nested [`Tiff`] structure
//! - [`Entry`]: one IFD entry; undefined-format data is split into
//!   [`UndefinedEntry`], [`UserCommentEntry`] and [`VersionEntry`]
//! - [`ByteWindow`]: the byte view every parser reads through
//!
//! Parsing then serializing an unchanged block reproduces its bytes exactly.

mod block;
mod entry;
mod format;
pub mod tag;
mod tiff;
mod undefined;
mod window;

#[cfg(test)]
pub(crate) mod testdata;

pub use block::{EXIF_HEADER, ExifBlock};
pub use entry::{Entry, EntryRecord, ValueEntry};
pub use format::Format;
pub use tag::IfdKind;
pub use tiff::{IFD_ENTRY_LEN, Ifd, TIFF_HEADER_LEN, TIFF_MAGIC, Tiff};
pub use undefined::{
    ENCODING_FIELD_LEN, EncodingOverflow, UndefinedEntry, UserCommentEntry, VERSION_LEN,
    VersionEntry, undefined_text,
};
pub use window::{ByteOrder, ByteWindow};
