//! # exif-codec
//!
//! Parse, inspect and re-emit EXIF blocks (the `Exif\0\0` signature plus the
//! TIFF structure behind it) with structured handling for undefined-format
//! tags such as UserComment, ExifVersion and FileSource.
//!
//! ## Quick Start
//!
//! The pipeline module handles the read → parse → report flow for JPEG files
//! and raw `.exif` dumps:
//!
//! ```rust,no_run
//! use exif_codec::config::Config;
//! use exif_codec::pipeline::{collect_files, inspect_file};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!
//!     for path in collect_files(&[PathBuf::from("./photos")]) {
//!         let result = inspect_file(&path, &config);
//!         if let Some(ref err) = result.error {
//!             eprintln!("Error reading {}: {err}", path.display());
//!             continue;
//!         }
//!         for entry in &result.entries {
//!             println!("0x{:04X} {}", entry.tag, entry.text);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! Blocks can be parsed from bytes directly. An unchanged block serializes
//! back to exactly the bytes it was parsed from:
//!
//! ```rust
//! use exif_codec::exif::{tag, EntryRecord, ExifBlock, IfdKind, UserCommentEntry};
//!
//! fn edit(data: &[u8]) -> exif_codec::Result<Vec<u8>> {
//!     let mut block = ExifBlock::from_bytes(data)?;
//!     assert_eq!(block.to_bytes(), data);
//!
//!     if let Some(version) = block.tiff().entry(tag::EXIF_VERSION) {
//!         println!("{}", version.text(true));
//!     }
//!
//!     if let Some(exif) = block.tiff_mut().ifd_mut(IfdKind::Exif) {
//!         exif.set_entry(UserCommentEntry::new("Hello", "ASCII")?);
//!     }
//!     Ok(block.to_bytes())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`exif`]: block, TIFF and entry codecs
//! - [`pipeline`]: file discovery, JPEG APP1 extraction, inspection and comment rewriting
//! - [`config`]: JSON configuration (codec policies and output options)
//! - [`error`]: codec error types

pub mod config;
pub mod error;
pub mod exif;
pub mod pipeline;

pub use error::{Error, InvalidDataKind, Result};
