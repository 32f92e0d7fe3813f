use anyhow::{Context, Result};
use img_parts::Bytes;
use img_parts::jpeg::{Jpeg, JpegSegment};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;
use crate::exif::tag::{self, tag_name};
use crate::exif::{
    ByteOrder, EXIF_HEADER, EntryRecord, ExifBlock, Format, Ifd, IfdKind, Tiff, UserCommentEntry,
};

/// Supported file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "exif"];

/// JPEG APP1 marker, the segment EXIF lives in.
const APP1: u8 = 0xE1;

/// Largest segment payload a JPEG length field can describe.
const MAX_SEGMENT_CONTENTS: usize = u16::MAX as usize - 2;

/// Where the EXIF block of a file lives.
///
/// # Example
///
/// ```rust
/// use exif_codec::pipeline::SourceKind;
/// use std::path::Path;
///
/// assert_eq!(SourceKind::from_path(Path::new("photo.JPG")), Some(SourceKind::Jpeg));
/// assert_eq!(SourceKind::from_path(Path::new("dump.exif")), Some(SourceKind::RawExif));
/// assert_eq!(SourceKind::from_path(Path::new("notes.txt")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceKind {
    /// JPEG: EXIF in the first APP1 segment starting with `Exif\0\0`
    Jpeg,
    /// A bare EXIF block, signature included
    RawExif,
}

impl SourceKind {
    /// Determine the source kind from a file path extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "exif" => Some(Self::RawExif),
            _ => None,
        }
    }
}

/// One entry as shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub ifd: IfdKind,
    pub tag: u16,
    pub name: Option<&'static str>,
    pub format: Format,
    pub components: usize,
    pub text: String,
}

/// The result of inspecting a single file.
///
/// Errors are recorded in `error` instead of aborting a batch.
#[derive(Debug, Clone, Serialize)]
pub struct InspectResult {
    pub path: PathBuf,
    pub kind: Option<SourceKind>,
    /// Size of the EXIF block, signature included.
    pub size: Option<usize>,
    pub byte_order: Option<ByteOrder>,
    pub entries: Vec<EntryReport>,
    /// `Some(true)` when re-serializing reproduced the block exactly.
    pub round_trip_ok: Option<bool>,
    pub error: Option<String>,
}

/// The outcome of rewriting a file's user comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResult {
    pub path: PathBuf,
    /// The comment text that was replaced, if there was one.
    pub previous: Option<String>,
    /// Size of the new EXIF block.
    pub size: usize,
    /// `false` in dry-run mode.
    pub written: bool,
}

/// Collect supported files from the given paths.
///
/// Accepts a mix of file paths and directory paths. Directories are walked
/// recursively (following symlinks).
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_supported(path) {
                files.push(path.clone());
            } else {
                log::warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let p = entry.path();
                if p.is_file() && is_supported(p) {
                    files.push(p.to_path_buf());
                }
            }
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    files
}

/// Check if a file has a supported extension.
fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Create a backup of the original file. An existing backup is kept.
fn backup_file(path: &Path) -> Result<PathBuf> {
    let backup_path = path.with_extension(format!(
        "{}.bak",
        path.extension().unwrap_or_default().to_string_lossy()
    ));

    if !backup_path.exists() {
        std::fs::copy(path, &backup_path).context("Failed to create backup")?;
        log::debug!("Backup created: {}", backup_path.display());
    }

    Ok(backup_path)
}

/// Find the EXIF APP1 segment in a JPEG.
fn find_exif_segment_pos(jpeg: &Jpeg) -> Option<usize> {
    jpeg.segments()
        .iter()
        .position(|s| s.marker() == APP1 && s.contents().starts_with(EXIF_HEADER))
}

fn read_jpeg(file_bytes: Vec<u8>) -> Result<Jpeg> {
    Jpeg::from_bytes(Bytes::from(file_bytes))
        .map_err(|e| anyhow::anyhow!("Failed to parse JPEG: {e}"))
}

/// Extract the EXIF block bytes (signature included) from file contents.
pub fn exif_bytes(kind: SourceKind, file_bytes: Vec<u8>) -> Result<Vec<u8>> {
    match kind {
        SourceKind::RawExif => Ok(file_bytes),
        SourceKind::Jpeg => {
            let jpeg = read_jpeg(file_bytes)?;
            let pos = find_exif_segment_pos(&jpeg).context("No EXIF segment found")?;
            Ok(jpeg.segments()[pos].contents().to_vec())
        }
    }
}

/// Read and parse the EXIF block of a file.
pub fn load_block(path: &Path) -> Result<ExifBlock> {
    let kind = SourceKind::from_path(path).context("Unsupported file type")?;
    let file_bytes = std::fs::read(path).context("Failed to read file")?;
    let block_bytes = exif_bytes(kind, file_bytes)?;
    ExifBlock::from_bytes(&block_bytes).context("Failed to parse EXIF block")
}

/// Flatten a TIFF structure into display rows, IFDs in tree order.
pub fn report_entries(tiff: &Tiff, brief: bool) -> Vec<EntryReport> {
    fn walk(ifd: &Ifd, brief: bool, out: &mut Vec<EntryReport>) {
        for entry in ifd.entries() {
            out.push(EntryReport {
                ifd: ifd.kind(),
                tag: entry.tag(),
                name: tag_name(ifd.kind(), entry.tag()),
                format: entry.format(),
                components: entry.components(),
                text: entry.text(brief),
            });
        }
        for child in ifd.children() {
            walk(child, brief, out);
        }
    }

    let mut out = Vec::new();
    for ifd in tiff.ifds() {
        walk(ifd, brief, &mut out);
    }
    out
}

/// Inspect one file: parse its EXIF block and describe every entry.
pub fn inspect_file(path: &Path, config: &Config) -> InspectResult {
    let mut result = InspectResult {
        path: path.to_path_buf(),
        kind: SourceKind::from_path(path),
        size: None,
        byte_order: None,
        entries: Vec::new(),
        round_trip_ok: None,
        error: None,
    };

    let Some(kind) = result.kind else {
        result.error = Some("Unsupported file type".to_string());
        return result;
    };

    let block_bytes = match std::fs::read(path)
        .context("Failed to read file")
        .and_then(|bytes| exif_bytes(kind, bytes))
    {
        Ok(b) => b,
        Err(e) => {
            result.error = Some(format!("{e:#}"));
            return result;
        }
    };

    let block = match ExifBlock::from_bytes(&block_bytes) {
        Ok(b) => b,
        Err(e) => {
            result.error = Some(format!("Failed to parse EXIF block: {e}"));
            return result;
        }
    };

    log::debug!("{block}");
    result.size = Some(block.size());
    result.byte_order = Some(block.tiff().byte_order());
    result.entries = report_entries(block.tiff(), config.output.brief);
    if config.output.verify_round_trip {
        let ok = block.to_bytes() == block_bytes;
        if !ok {
            log::warn!("Round trip mismatch for {}", path.display());
        }
        result.round_trip_ok = Some(ok);
    }

    result
}

/// Replace (or add) the UserComment entry in the Exif IFD of a file.
///
/// The encoding label follows `config.codec.encoding_overflow`; nothing is
/// written when `config.output.dry_run` is set. Blocks holding data the
/// re-encoder cannot move fail with [`Error::Unmovable`] before any change,
/// and the original is copied to `<name>.<ext>.bak` first when
/// `config.output.backup_originals` is set.
pub fn set_user_comment(
    path: &Path,
    comment: &str,
    encoding: &str,
    config: &Config,
) -> Result<CommentResult> {
    let kind = SourceKind::from_path(path).context("Unsupported file type")?;
    let file_bytes = std::fs::read(path).context("Failed to read file")?;

    let mut jpeg = None;
    let block_bytes = match kind {
        SourceKind::RawExif => file_bytes,
        SourceKind::Jpeg => {
            let parsed = read_jpeg(file_bytes)?;
            let pos = find_exif_segment_pos(&parsed).context("No EXIF segment found")?;
            let contents = parsed.segments()[pos].contents().to_vec();
            jpeg = Some((parsed, pos));
            contents
        }
    };

    let mut block = ExifBlock::from_bytes(&block_bytes).context("Failed to parse EXIF block")?;
    block.tiff().check_relayout()?;
    let entry =
        UserCommentEntry::with_overflow(comment, encoding, config.codec.encoding_overflow)?;
    let exif_ifd = block
        .tiff_mut()
        .ifd_mut(IfdKind::Exif)
        .ok_or(Error::UnknownIfd("Exif"))?;
    let previous = exif_ifd.set_entry(entry).map(|e| e.text(false));
    log::debug!(
        "UserComment (0x{:04X}) {} in {}",
        tag::USER_COMMENT,
        if previous.is_some() { "replaced" } else { "added" },
        path.display()
    );

    let new_bytes = block.to_bytes();
    let mut result = CommentResult {
        path: path.to_path_buf(),
        previous,
        size: new_bytes.len(),
        written: false,
    };
    if config.output.dry_run {
        return Ok(result);
    }

    let output = match jpeg {
        None => new_bytes,
        Some((mut parsed, pos)) => {
            if new_bytes.len() > MAX_SEGMENT_CONTENTS {
                anyhow::bail!(
                    "EXIF block of {} bytes does not fit in a JPEG segment",
                    new_bytes.len()
                );
            }
            parsed.segments_mut()[pos] =
                JpegSegment::new_with_contents(APP1, Bytes::from(new_bytes));
            parsed.encoder().bytes().to_vec()
        }
    };
    if config.output.backup_originals {
        backup_file(path)?;
    }
    std::fs::write(path, &output).context("Failed to write file")?;
    result.written = true;

    Ok(result)
}
