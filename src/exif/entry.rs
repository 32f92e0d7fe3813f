use super::format::Format;
use super::tag;
use super::undefined::{UndefinedEntry, UserCommentEntry, VersionEntry};

/// The shape every IFD entry has: tag, format, component count and raw bytes.
///
/// For undefined-format entries the component count always equals the
/// payload length.
pub trait EntryRecord {
    fn tag(&self) -> u16;
    fn format(&self) -> Format;
    fn components(&self) -> usize;
    fn bytes(&self) -> &[u8];
    /// Human-readable value; `brief` asks for a shorter form where one exists.
    fn text(&self, brief: bool) -> String;
}

/// An entry of any format other than undefined.
///
/// The payload stays in the byte order of the TIFF structure it came from;
/// this type does no numeric decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEntry {
    tag: u16,
    format: Format,
    components: usize,
    bytes: Vec<u8>,
}

impl ValueEntry {
    pub fn new(tag: u16, format: Format, components: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            format,
            components,
            bytes: bytes.into(),
        }
    }

    /// An ASCII entry holding `value` plus the terminating NUL.
    pub fn ascii(tag: u16, value: &str) -> Self {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        Self::new(tag, Format::Ascii, bytes.len(), bytes)
    }
}

impl EntryRecord for ValueEntry {
    fn tag(&self) -> u16 {
        self.tag
    }

    fn format(&self) -> Format {
        self.format
    }

    fn components(&self) -> usize {
        self.components
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn text(&self, _brief: bool) -> String {
        if self.format == Format::Ascii {
            let end = self.bytes.iter().position(|&b| b == 0).unwrap_or(self.bytes.len());
            return String::from_utf8_lossy(&self.bytes[..end]).into_owned();
        }
        let plural = if self.components == 1 { "" } else { "s" };
        format!("{} {} value{plural}", self.components, self.format)
    }
}

/// One entry of an IFD.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Undefined(UndefinedEntry),
    UserComment(UserCommentEntry),
    Version(VersionEntry),
    Value(ValueEntry),
}

impl Entry {
    /// Build the entry variant that fits `tag` and `format`.
    ///
    /// Undefined data for the user-comment and version tags becomes the
    /// structured variant when the payload decodes and re-encodes to exactly
    /// the same bytes; anything else stays generic so no bytes are lost.
    pub fn from_raw(tag_id: u16, format: Format, components: usize, bytes: &[u8]) -> Self {
        if format != Format::Undefined {
            return Entry::Value(ValueEntry::new(tag_id, format, components, bytes));
        }
        let structured = match tag_id {
            tag::USER_COMMENT => UserCommentEntry::from_bytes(bytes).map(Entry::UserComment),
            tag::EXIF_VERSION | tag::FLASH_PIX_VERSION | tag::INTEROPERABILITY_VERSION => {
                VersionEntry::from_bytes(tag_id, bytes).map(Entry::Version)
            }
            _ => None,
        };
        structured.unwrap_or_else(|| {
            log::debug!("Keeping tag 0x{tag_id:04X} as generic undefined data");
            Entry::Undefined(UndefinedEntry::new(tag_id, bytes))
        })
    }

    fn undefined(&self) -> Option<&UndefinedEntry> {
        match self {
            Entry::Undefined(e) => Some(e),
            Entry::UserComment(e) => Some(e.raw()),
            Entry::Version(e) => Some(e.raw()),
            Entry::Value(_) => None,
        }
    }

    fn value(&self) -> Option<&ValueEntry> {
        match self {
            Entry::Value(e) => Some(e),
            _ => None,
        }
    }
}

impl EntryRecord for Entry {
    fn tag(&self) -> u16 {
        match self.undefined() {
            Some(raw) => raw.tag(),
            None => self.value().map_or(0, ValueEntry::tag),
        }
    }

    fn format(&self) -> Format {
        match self {
            Entry::Value(e) => e.format(),
            _ => Format::Undefined,
        }
    }

    fn components(&self) -> usize {
        match self.undefined() {
            Some(raw) => raw.components(),
            None => self.value().map_or(0, ValueEntry::components),
        }
    }

    fn bytes(&self) -> &[u8] {
        match self {
            Entry::Value(e) => e.bytes(),
            Entry::Undefined(e) => e.bytes(),
            Entry::UserComment(e) => e.raw().bytes(),
            Entry::Version(e) => e.raw().bytes(),
        }
    }

    fn text(&self, brief: bool) -> String {
        match self {
            Entry::Undefined(e) => e.text(brief),
            Entry::UserComment(e) => e.text(brief),
            Entry::Version(e) => e.text(brief),
            Entry::Value(e) => e.text(brief),
        }
    }
}

impl From<UndefinedEntry> for Entry {
    fn from(e: UndefinedEntry) -> Self {
        Entry::Undefined(e)
    }
}

impl From<UserCommentEntry> for Entry {
    fn from(e: UserCommentEntry) -> Self {
        Entry::UserComment(e)
    }
}

impl From<VersionEntry> for Entry {
    fn from(e: VersionEntry) -> Self {
        Entry::Version(e)
    }
}

impl From<ValueEntry> for Entry {
    fn from(e: ValueEntry) -> Self {
        Entry::Value(e)
    }
}
