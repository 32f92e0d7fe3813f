//! Entries of format undefined.
//!
//! [`UndefinedEntry`] holds opaque bytes for any tag. [`UserCommentEntry`]
//! and [`VersionEntry`] layer structure on top of the same raw payload for
//! the user-comment and version tags; both keep their raw bytes in an inner
//! [`UndefinedEntry`] and go through [`UndefinedEntry::set_undefined`] for
//! every change, so the component count always equals the payload length.
//!
//! Text rendering for generic undefined data is a pure function of the tag
//! and the raw bytes, see [`undefined_text`].

use serde::{Deserialize, Serialize};

use super::tag;
use crate::error::{Error, Result};

/// Width of the character-code field that prefixes a user comment.
pub const ENCODING_FIELD_LEN: usize = 8;

/// Width of a version payload: two major and two minor ASCII digits.
pub const VERSION_LEN: usize = 4;

/// Describe undefined-format data for `tag`.
///
/// Only FileSource, ComponentsConfiguration and MakerNote have a specific
/// rendering; everything else is `"(undefined)"`. Bytes missing from a short
/// payload read as zero.
pub fn undefined_text(tag_id: u16, bytes: &[u8]) -> String {
    let byte_at = |i: usize| bytes.get(i).copied().unwrap_or(0);
    match tag_id {
        tag::FILE_SOURCE => match byte_at(0) {
            0x03 => "DSC".to_string(),
            other => format!("0x{other:02X}"),
        },
        tag::COMPONENTS_CONFIGURATION => (0..4)
            .map(|i| component_name(byte_at(i)))
            .collect::<Vec<_>>()
            .join(" "),
        tag::MAKER_NOTE => format!("{} bytes unknown data", bytes.len()),
        _ => "(undefined)".to_string(),
    }
}

fn component_name(code: u8) -> &'static str {
    match code {
        0 => "-",
        1 => "Y",
        2 => "Cb",
        3 => "Cr",
        4 => "R",
        5 => "G",
        6 => "B",
        _ => "reserved",
    }
}

/// Raw bytes of format undefined for any tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedEntry {
    tag: u16,
    bytes: Vec<u8>,
}

impl UndefinedEntry {
    /// Any byte sequence is accepted, including an empty one.
    pub fn new(tag_id: u16, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: tag_id,
            bytes: bytes.into(),
        }
    }

    /// Replace the payload. The component count follows the new length.
    pub fn set_undefined(&mut self, bytes: impl Into<Vec<u8>>) {
        self.bytes = bytes.into();
    }

    pub fn tag(&self) -> u16 {
        self.tag
    }

    pub fn components(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Tag-specific description. `brief` has no effect on generic data.
    pub fn text(&self, _brief: bool) -> String {
        undefined_text(self.tag, &self.bytes)
    }
}

/// What to do with a user-comment encoding label longer than its 8-byte field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingOverflow {
    /// Fail with [`Error::EncodingTooLong`].
    #[default]
    Reject,
    /// Store the label unpadded; the field stays oversized.
    Pad,
}

/// The UserComment tag: an 8-byte, zero-padded character-code label
/// (`ASCII`, `JIS`, `Unicode`, or empty for undefined) followed by the comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCommentEntry {
    raw: UndefinedEntry,
    comment: String,
    encoding: String,
}

impl Default for UserCommentEntry {
    fn default() -> Self {
        let mut entry = Self {
            raw: UndefinedEntry::new(tag::USER_COMMENT, Vec::new()),
            comment: String::new(),
            encoding: String::new(),
        };
        entry.store("", "ASCII");
        entry
    }
}

impl UserCommentEntry {
    /// Make a user comment, rejecting encoding labels over 8 bytes.
    pub fn new(comment: &str, encoding: &str) -> Result<Self> {
        Self::with_overflow(comment, encoding, EncodingOverflow::Reject)
    }

    pub fn with_overflow(
        comment: &str,
        encoding: &str,
        overflow: EncodingOverflow,
    ) -> Result<Self> {
        let mut entry = Self::default();
        entry.set_comment_with(comment, encoding, overflow)?;
        Ok(entry)
    }

    /// Rebuild a user comment from a raw payload.
    ///
    /// Returns `None` unless the payload has a full label field and both the
    /// label (trailing NULs removed) and the comment are valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < ENCODING_FIELD_LEN {
            return None;
        }
        let (label, comment) = bytes.split_at(ENCODING_FIELD_LEN);
        let label_len = label.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        let encoding = std::str::from_utf8(&label[..label_len]).ok()?;
        let comment = std::str::from_utf8(comment).ok()?;
        Some(Self {
            raw: UndefinedEntry::new(tag::USER_COMMENT, bytes),
            comment: comment.to_string(),
            encoding: encoding.to_string(),
        })
    }

    pub fn set_comment(&mut self, comment: &str, encoding: &str) -> Result<()> {
        self.set_comment_with(comment, encoding, EncodingOverflow::Reject)
    }

    pub fn set_comment_with(
        &mut self,
        comment: &str,
        encoding: &str,
        overflow: EncodingOverflow,
    ) -> Result<()> {
        if encoding.len() > ENCODING_FIELD_LEN && overflow == EncodingOverflow::Reject {
            return Err(Error::EncodingTooLong {
                len: encoding.len(),
            });
        }
        self.store(comment, encoding);
        Ok(())
    }

    fn store(&mut self, comment: &str, encoding: &str) {
        let mut bytes = encoding.as_bytes().to_vec();
        if bytes.len() < ENCODING_FIELD_LEN {
            bytes.resize(ENCODING_FIELD_LEN, 0);
        }
        bytes.extend_from_slice(comment.as_bytes());
        self.comment = comment.to_string();
        self.encoding = encoding.to_string();
        self.raw.set_undefined(bytes);
    }

    /// The comment as it was set, not re-derived from the payload.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn raw(&self) -> &UndefinedEntry {
        &self.raw
    }

    /// The comment itself, whatever `brief` says.
    pub fn text(&self, _brief: bool) -> String {
        self.comment.clone()
    }
}

/// ExifVersion, FlashPixVersion and InteroperabilityVersion: a version number
/// stored as four ASCII digits, `"0220"` for 2.2.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionEntry {
    raw: UndefinedEntry,
    version: f64,
}

impl VersionEntry {
    pub fn new(tag_id: u16, version: f64) -> Self {
        let mut entry = Self {
            raw: UndefinedEntry::new(tag_id, Vec::new()),
            version: 0.0,
        };
        entry.set_version(version);
        entry
    }

    /// Rebuild a version entry from its four-digit payload.
    ///
    /// Returns `None` for anything that is not exactly four ASCII digits.
    pub fn from_bytes(tag_id: u16, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != VERSION_LEN || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let digit = |i: usize| u32::from(bytes[i] - b'0');
        let major = digit(0) * 10 + digit(1);
        let minor = digit(2) * 10 + digit(3);
        let version = f64::from(major) + f64::from(minor) / 100.0;
        let entry = Self::new(tag_id, version);
        (entry.raw.bytes() == bytes).then_some(entry)
    }

    pub fn set_version(&mut self, version: f64) {
        self.version = version;
        self.raw.set_undefined(encode_version(version));
    }

    /// The value as it was set, not re-derived from the payload.
    pub fn version(&self) -> f64 {
        self.version
    }

    pub fn raw(&self) -> &UndefinedEntry {
        &self.raw
    }

    /// `"Exif Version 2.2"`, or `"Exif 2.2"` when `brief`.
    pub fn text(&self, brief: bool) -> String {
        let prefix = if brief { "" } else { "Version " };
        let name = match self.raw.tag() {
            tag::EXIF_VERSION => "Exif ",
            tag::FLASH_PIX_VERSION => "FlashPix ",
            tag::INTEROPERABILITY_VERSION => "Interoperability ",
            _ => "",
        };
        format!("{name}{prefix}{}", self.version)
    }
}

/// Two-digit major and minor parts. A minor part that rounds to 100 carries
/// into the major part, and the major part is clamped to 0..=99.
fn encode_version(version: f64) -> Vec<u8> {
    let version = if version.is_finite() { version } else { 0.0 };
    let mut major = version.floor();
    let mut minor = ((version - major) * 100.0).round();
    if minor >= 100.0 {
        major += 1.0;
        minor -= 100.0;
    }
    let major = major.clamp(0.0, 99.0) as u8;
    let minor = minor.clamp(0.0, 99.0) as u8;
    format!("{major:02}{minor:02}").into_bytes()
}
