//! TIFF structure nested inside an EXIF block.
//!
//! Parsing walks IFD0, the IFD1 it chains to, and the Exif, GPS and
//! Interoperability directories referenced by pointer tags. Each entry is
//! handed to [`Entry::from_raw`] to pick its variant.
//!
//! Serialization returns the parsed bytes untouched until a directory is
//! borrowed mutably; after that a fresh canonical layout is produced. The
//! IFD1 JPEG thumbnail moves with its directory. Data the canonical layout
//! cannot carry is listed by [`Tiff::unmovable`].

use std::collections::HashSet;
use std::fmt;

use super::entry::{Entry, EntryRecord};
use super::format::Format;
use super::tag::{self, IfdKind, tag_name};
use super::window::{ByteOrder, ByteWindow};
use crate::error::{Error, InvalidDataKind, Result};

/// TIFF magic number.
pub const TIFF_MAGIC: u16 = 42;
/// Size of the TIFF header in bytes.
pub const TIFF_HEADER_LEN: usize = 8;
/// Size of one IFD entry in bytes.
pub const IFD_ENTRY_LEN: usize = 12;

/// One image file directory and the directories its pointer tags refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Ifd {
    kind: IfdKind,
    entries: Vec<Entry>,
    children: Vec<Ifd>,
    /// JPEG thumbnail referenced by `JPEGInterchangeFormat`.
    thumbnail: Option<Vec<u8>>,
}

impl Ifd {
    pub fn new(kind: IfdKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            children: Vec::new(),
            thumbnail: None,
        }
    }

    pub fn kind(&self) -> IfdKind {
        self.kind
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Nested Exif / GPS / Interoperability directories.
    pub fn children(&self) -> &[Ifd] {
        &self.children
    }

    pub fn entry(&self, tag_id: u16) -> Option<&Entry> {
        self.entries.iter().find(|e| e.tag() == tag_id)
    }

    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.thumbnail.as_deref()
    }

    /// Insert `entry`, replacing any entry with the same tag. Returns the
    /// replaced entry.
    pub fn set_entry(&mut self, entry: impl Into<Entry>) -> Option<Entry> {
        let entry = entry.into();
        match self.entries.iter_mut().find(|e| e.tag() == entry.tag()) {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn remove_entry(&mut self, tag_id: u16) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| e.tag() == tag_id)?;
        Some(self.entries.remove(pos))
    }

    fn find(&self, kind: IfdKind) -> Option<&Ifd> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(kind))
    }

    fn find_mut(&mut self, kind: IfdKind) -> Option<&mut Ifd> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(kind))
    }

    fn find_entry(&self, tag_id: u16) -> Option<&Entry> {
        self.entry(tag_id)
            .or_else(|| self.children.iter().find_map(|c| c.find_entry(tag_id)))
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        writeln!(f, "{pad}{} IFD with {} entries:", self.kind, self.entries.len())?;
        for entry in &self.entries {
            let name = tag_name(self.kind, entry.tag()).unwrap_or("Unknown");
            writeln!(
                f,
                "{pad}  0x{:04X} {name} ({}, {}): {}",
                entry.tag(),
                entry.format(),
                entry.components(),
                entry.text(false)
            )?;
        }
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// A TIFF header plus its chain of IFDs.
#[derive(Debug, Clone, PartialEq)]
pub struct Tiff {
    order: ByteOrder,
    ifds: Vec<Ifd>,
    /// Bytes this structure was parsed from, dropped on the first mutable borrow.
    source: Option<Vec<u8>>,
    /// Parsed data that re-encoding would lose or leave dangling.
    unmovable: Vec<String>,
}

impl Tiff {
    /// An empty structure with a single, empty IFD0.
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            ifds: vec![Ifd::new(IfdKind::Ifd0)],
            source: None,
            unmovable: Vec::new(),
        }
    }

    /// Parse the TIFF structure visible through `window`. Offsets are
    /// relative to the window start.
    pub fn parse(mut window: ByteWindow<'_>) -> Result<Self> {
        if window.len() < TIFF_HEADER_LEN {
            return Err(InvalidDataKind::TooShort {
                expected: TIFF_HEADER_LEN,
                found: window.len(),
            }
            .into());
        }
        let order = match window.bytes(0, 2)? {
            b"II" => ByteOrder::Little,
            b"MM" => ByteOrder::Big,
            other => {
                let marker = u16::from_be_bytes([other[0], other[1]]);
                return Err(InvalidDataKind::BadByteOrder(marker).into());
            }
        };
        window.set_byte_order(order);

        let magic = window.read_u16(2)?;
        if magic != TIFF_MAGIC {
            return Err(InvalidDataKind::BadTiffMagic(magic).into());
        }

        let mut parser = Parser {
            window,
            visited: HashSet::new(),
            unmovable: Vec::new(),
        };
        let mut ifds = Vec::new();
        let mut offset = window.read_u32(4)?;
        for kind in [IfdKind::Ifd0, IfdKind::Ifd1] {
            if offset == 0 {
                break;
            }
            let (ifd, next) = parser.parse_ifd(offset, kind)?;
            ifds.push(ifd);
            offset = next;
        }
        if offset != 0 {
            log::warn!("Ignoring IFDs chained after IFD1 (next offset {offset})");
            parser
                .unmovable
                .push(format!("IFD chained after IFD1 at offset {offset}"));
        }

        Ok(Self {
            order,
            ifds,
            source: Some(window.as_slice().to_vec()),
            unmovable: parser.unmovable,
        })
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Top-level IFDs: IFD0 and, if present, IFD1.
    pub fn ifds(&self) -> &[Ifd] {
        &self.ifds
    }

    /// Find an IFD of `kind` anywhere in the tree.
    pub fn ifd(&self, kind: IfdKind) -> Option<&Ifd> {
        self.ifds.iter().find_map(|i| i.find(kind))
    }

    /// Mutable access to an IFD. Once one is found, [`Tiff::to_bytes`]
    /// re-encodes.
    pub fn ifd_mut(&mut self, kind: IfdKind) -> Option<&mut Ifd> {
        let ifd = self.ifds.iter_mut().find_map(|i| i.find_mut(kind));
        if ifd.is_some() {
            self.source = None;
        }
        ifd
    }

    /// First entry with `tag_id`, searching IFD0, its sub-IFDs, then IFD1.
    pub fn entry(&self, tag_id: u16) -> Option<&Entry> {
        self.ifds.iter().find_map(|i| i.find_entry(tag_id))
    }

    /// True once the structure may differ from the bytes it was parsed from.
    pub fn is_modified(&self) -> bool {
        self.source.is_none()
    }

    /// Data found while parsing that a canonical re-encode drops or leaves
    /// pointing at the wrong bytes.
    pub fn unmovable(&self) -> &[String] {
        &self.unmovable
    }

    /// Fails with [`Error::Unmovable`] if re-encoding would lose data.
    pub fn check_relayout(&self) -> Result<()> {
        if self.unmovable.is_empty() {
            return Ok(());
        }
        Err(Error::Unmovable(self.unmovable.join("; ")))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.source {
            Some(bytes) => bytes.clone(),
            None => self.encode(),
        }
    }

    /// Canonical layout: header, then each IFD followed by its out-of-line
    /// values, its thumbnail and its sub-IFDs. Entries are sorted by tag and
    /// everything is word-aligned.
    fn encode(&self) -> Vec<u8> {
        let o = self.order;
        let mut out = Vec::new();
        out.extend_from_slice(&o.marker());
        out.extend_from_slice(&o.u16_bytes(TIFF_MAGIC));
        out.extend_from_slice(&o.u32_bytes(0));

        let mut link = 4;
        for ifd in &self.ifds {
            align(&mut out);
            let start = out.len() as u32;
            out[link..link + 4].copy_from_slice(&o.u32_bytes(start));
            link = self.write_ifd(ifd, &mut out);
        }
        out
    }

    /// Write `ifd` at the end of `out`; returns the position of its
    /// next-IFD pointer.
    fn write_ifd(&self, ifd: &Ifd, out: &mut Vec<u8>) -> usize {
        enum Value<'a> {
            Bytes(&'a [u8]),
            Thumbnail,
            Child(&'a Ifd),
        }

        let o = self.order;
        let mut records: Vec<(u16, Format, usize, Value<'_>)> = ifd
            .entries
            .iter()
            .map(|e| {
                let moves_thumbnail =
                    e.tag() == tag::JPEG_INTERCHANGE_FORMAT && ifd.thumbnail.is_some();
                let value = if moves_thumbnail {
                    Value::Thumbnail
                } else {
                    Value::Bytes(e.bytes())
                };
                (e.tag(), e.format(), e.components(), value)
            })
            .collect();
        records.extend(ifd.children.iter().filter_map(|child| {
            let tag_id = child.kind.pointer_tag()?;
            Some((tag_id, Format::Long, 1, Value::Child(child)))
        }));
        records.sort_by_key(|r| r.0);

        let start = out.len();
        let data_base = start + 2 + records.len() * IFD_ENTRY_LEN + 4;
        let data_len: usize = records
            .iter()
            .map(|r| match &r.3 {
                Value::Bytes(bytes) if bytes.len() > 4 => bytes.len() + bytes.len() % 2,
                _ => 0,
            })
            .sum();
        let thumbnail_at = data_base + data_len;
        let mut data = Vec::new();
        let mut child_slots = Vec::new();

        out.extend_from_slice(&o.u16_bytes(records.len() as u16));
        for (tag_id, format, components, value) in &records {
            out.extend_from_slice(&o.u16_bytes(*tag_id));
            out.extend_from_slice(&o.u16_bytes(format.code()));
            out.extend_from_slice(&o.u32_bytes(*components as u32));
            match value {
                Value::Bytes(bytes) if bytes.len() <= 4 => {
                    let mut inline = [0u8; 4];
                    inline[..bytes.len()].copy_from_slice(bytes);
                    out.extend_from_slice(&inline);
                }
                Value::Bytes(bytes) => {
                    out.extend_from_slice(&o.u32_bytes((data_base + data.len()) as u32));
                    data.extend_from_slice(bytes);
                    align(&mut data);
                }
                Value::Thumbnail => out.extend_from_slice(&o.u32_bytes(thumbnail_at as u32)),
                Value::Child(child) => {
                    child_slots.push((out.len(), *child));
                    out.extend_from_slice(&o.u32_bytes(0));
                }
            }
        }
        let next_pos = out.len();
        out.extend_from_slice(&o.u32_bytes(0));
        out.extend_from_slice(&data);
        if let Some(thumbnail) = &ifd.thumbnail {
            out.extend_from_slice(thumbnail);
        }

        for (slot, child) in child_slots {
            align(out);
            let offset = out.len() as u32;
            out[slot..slot + 4].copy_from_slice(&o.u32_bytes(offset));
            self.write_ifd(child, out);
        }
        next_pos
    }
}

impl fmt::Display for Tiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIFF structure ({:?} endian):", self.order)?;
        for ifd in &self.ifds {
            ifd.fmt_indented(f, 1)?;
        }
        Ok(())
    }
}

fn align(buf: &mut Vec<u8>) {
    if buf.len() % 2 == 1 {
        buf.push(0);
    }
}

struct Parser<'a> {
    window: ByteWindow<'a>,
    visited: HashSet<u32>,
    unmovable: Vec<String>,
}

impl Parser<'_> {
    /// Parse the IFD at `offset`; returns it with the next-IFD offset.
    fn parse_ifd(&mut self, offset: u32, kind: IfdKind) -> Result<(Ifd, u32)> {
        if !self.visited.insert(offset) {
            return Err(InvalidDataKind::IfdLoop(offset).into());
        }
        let w = self.window;
        let base = offset as usize;
        let count = w.read_u16(base)? as usize;
        log::debug!("Parsing {kind} IFD at offset {offset} with {count} entries");

        let mut ifd = Ifd::new(kind);
        for i in 0..count {
            let at = base + 2 + i * IFD_ENTRY_LEN;
            let tag_id = w.read_u16(at)?;
            let code = w.read_u16(at + 2)?;
            let components = w.read_u32(at + 4)? as usize;

            if let Some(child_kind) = IfdKind::from_pointer_tag(tag_id) {
                let child_offset = w.read_u32(at + 8)?;
                let (child, _) = self.parse_ifd(child_offset, child_kind)?;
                ifd.children.push(child);
                continue;
            }

            let Some(format) = Format::from_code(code) else {
                log::warn!("Skipping tag 0x{tag_id:04X} with unknown format {code}");
                self.unmovable
                    .push(format!("{kind} tag 0x{tag_id:04X} with unknown format {code}"));
                continue;
            };
            if matches!(tag_id, tag::STRIP_OFFSETS | tag::TILE_OFFSETS) {
                self.unmovable
                    .push(format!("{kind} image data referenced by tag 0x{tag_id:04X}"));
            }
            let len = components.saturating_mul(format.unit_size());
            let bytes = if len <= 4 {
                w.bytes(at + 8, len)?
            } else {
                w.bytes(w.read_u32(at + 8)? as usize, len)?
            };
            ifd.entries.push(Entry::from_raw(tag_id, format, components, bytes));
        }

        self.read_thumbnail(&mut ifd);

        let next = w.read_u32(base + 2 + count * IFD_ENTRY_LEN).unwrap_or(0);
        Ok((ifd, next))
    }

    /// Capture the bytes named by `JPEGInterchangeFormat` and its length.
    fn read_thumbnail(&mut self, ifd: &mut Ifd) {
        let (Some(offset), Some(len)) = (
            ifd.entry(tag::JPEG_INTERCHANGE_FORMAT).and_then(|e| self.scalar(e)),
            ifd.entry(tag::JPEG_INTERCHANGE_FORMAT_LENGTH).and_then(|e| self.scalar(e)),
        ) else {
            return;
        };
        match self.window.bytes(offset as usize, len as usize) {
            Ok(bytes) => ifd.thumbnail = Some(bytes.to_vec()),
            Err(e) => {
                log::warn!("{} thumbnail is unreadable: {e}", ifd.kind);
                self.unmovable
                    .push(format!("{} thumbnail outside the TIFF data", ifd.kind));
            }
        }
    }

    /// The single SHORT or LONG value of an entry.
    fn scalar(&self, entry: &Entry) -> Option<u32> {
        let order = self.window.byte_order();
        let bytes = entry.bytes();
        match (entry.format(), entry.components()) {
            (Format::Long, 1) => bytes.try_into().ok().map(|b| order.u32_from(b)),
            (Format::Short, 1) => bytes.try_into().ok().map(|b| u32::from(order.u16_from(b))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::exif::tag;
    use crate::exif::testdata::{THUMBNAIL, chained_tiff, sample_tiff, thumbnail_tiff};
    use crate::exif::undefined::UserCommentEntry;

    fn parse(bytes: &[u8]) -> Result<Tiff> {
        Tiff::parse(ByteWindow::new(bytes))
    }

    // ── parsing ──────────────────────────────────────────────────────

    #[test]
    fn parses_sample_tree() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let tiff = parse(&sample_tiff(order)).unwrap();
            assert_eq!(tiff.byte_order(), order);
            assert_eq!(tiff.ifds().len(), 1);

            let ifd0 = &tiff.ifds()[0];
            assert_eq!(ifd0.kind(), IfdKind::Ifd0);
            assert_eq!(ifd0.entries().len(), 1);
            assert_eq!(ifd0.entry(tag::MAKE).unwrap().text(false), "Canon");

            let exif = tiff.ifd(IfdKind::Exif).unwrap();
            assert_eq!(exif.entries().len(), 4);
            assert!(matches!(exif.entry(tag::EXIF_VERSION), Some(Entry::Version(_))));
            assert!(matches!(exif.entry(tag::USER_COMMENT), Some(Entry::UserComment(_))));
            assert_eq!(exif.entry(tag::FILE_SOURCE).unwrap().text(false), "DSC");
            assert_eq!(
                exif.entry(tag::COMPONENTS_CONFIGURATION).unwrap().text(false),
                "Y Cb Cr -"
            );

            let interop = tiff.ifd(IfdKind::Interoperability).unwrap();
            assert_eq!(
                interop.entry(tag::INTEROPERABILITY_VERSION).unwrap().text(false),
                "Interoperability Version 1"
            );
            assert!(tiff.ifd(IfdKind::Gps).is_none());
        }
    }

    #[test]
    fn parses_ifd_chain() {
        let tiff = parse(&chained_tiff(ByteOrder::Big)).unwrap();
        assert_eq!(tiff.ifds().len(), 2);
        assert_eq!(tiff.ifds()[1].kind(), IfdKind::Ifd1);
        let ifd0 = tiff.ifd(IfdKind::Ifd0).unwrap();
        assert_eq!(ifd0.entry(tag::ORIENTATION).unwrap().bytes(), &[0, 1]);
    }

    #[test]
    fn entry_lookup_searches_tree() {
        let tiff = parse(&sample_tiff(ByteOrder::Little)).unwrap();
        assert_eq!(tiff.entry(tag::USER_COMMENT).unwrap().text(true), "Hello");
        assert!(tiff.entry(tag::MAKER_NOTE).is_none());
    }

    #[test]
    fn rejects_bad_headers() {
        let err = parse(b"II*\0").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidData(InvalidDataKind::TooShort { expected: 8, found: 4 })
        ));
        let err = parse(b"XX*\0\x08\0\0\0").unwrap_err();
        assert_eq!(err, Error::InvalidData(InvalidDataKind::BadByteOrder(0x5858)));
        let err = parse(b"II+\0\x08\0\0\0").unwrap_err();
        assert_eq!(err, Error::InvalidData(InvalidDataKind::BadTiffMagic(43)));
    }

    #[test]
    fn rejects_out_of_bounds_values() {
        let mut bytes = sample_tiff(ByteOrder::Little);
        // point the UserComment data past the end
        let slot = 44 + 2 + 2 * IFD_ENTRY_LEN + 8;
        bytes[slot..slot + 4].copy_from_slice(&1000u32.to_le_bytes());
        let err = parse(&bytes).unwrap_err();
        assert!(matches!(err, Error::InvalidData(InvalidDataKind::OutOfBounds { .. })));
    }

    #[test]
    fn rejects_ifd_loops() {
        let mut bytes = sample_tiff(ByteOrder::Little);
        // make the Interoperability pointer refer back to the Exif IFD
        let slot = 44 + 2 + 3 * IFD_ENTRY_LEN + 8;
        bytes[slot..slot + 4].copy_from_slice(&44u32.to_le_bytes());
        let err = parse(&bytes).unwrap_err();
        assert_eq!(err, Error::InvalidData(InvalidDataKind::IfdLoop(44)));
    }

    #[test]
    fn skips_unknown_formats() {
        let mut bytes = chained_tiff(ByteOrder::Little);
        // Orientation's format becomes 99
        bytes[12..14].copy_from_slice(&99u16.to_le_bytes());
        let tiff = parse(&bytes).unwrap();
        assert!(tiff.ifds()[0].entries().is_empty());
        assert_eq!(tiff.to_bytes(), bytes);
        assert_eq!(tiff.unmovable().len(), 1);
        let err = tiff.check_relayout().unwrap_err();
        assert!(matches!(err, Error::Unmovable(ref why) if why.contains("0x0112")), "{err}");
    }

    #[test]
    fn ifds_after_ifd1_are_unmovable() {
        let mut bytes = chained_tiff(ByteOrder::Little);
        // IFD1's next-IFD pointer
        bytes[40..44].copy_from_slice(&8u32.to_le_bytes());
        let tiff = parse(&bytes).unwrap();
        assert_eq!(tiff.ifds().len(), 2);
        assert!(tiff.check_relayout().is_err());
        assert_eq!(tiff.to_bytes(), bytes);
    }

    #[test]
    fn strip_offsets_are_unmovable() {
        let mut bytes = chained_tiff(ByteOrder::Big);
        // Orientation becomes StripOffsets
        bytes[10..12].copy_from_slice(&tag::STRIP_OFFSETS.to_be_bytes());
        let tiff = parse(&bytes).unwrap();
        assert!(tiff.check_relayout().is_err());
    }

    #[test]
    fn sample_trees_can_be_relaid_out() {
        for bytes in [sample_tiff(ByteOrder::Big), thumbnail_tiff(ByteOrder::Little)] {
            let tiff = parse(&bytes).unwrap();
            assert!(tiff.unmovable().is_empty());
            assert!(tiff.check_relayout().is_ok());
        }
    }

    // ── thumbnails ───────────────────────────────────────────────────

    #[test]
    fn captures_ifd1_thumbnail() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let tiff = parse(&thumbnail_tiff(order)).unwrap();
            assert_eq!(tiff.ifds()[1].kind(), IfdKind::Ifd1);
            assert_eq!(tiff.ifds()[1].thumbnail(), Some(&THUMBNAIL[..]));
            assert_eq!(tiff.ifds()[0].thumbnail(), None);
        }
    }

    #[test]
    fn thumbnail_moves_with_rewrite() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let mut tiff = parse(&thumbnail_tiff(order)).unwrap();
            tiff.ifd_mut(IfdKind::Exif)
                .unwrap()
                .set_entry(UserCommentEntry::new("hi", "ASCII").unwrap());

            let reparsed = parse(&tiff.to_bytes()).unwrap();
            assert_eq!(reparsed.ifds()[1].thumbnail(), Some(&THUMBNAIL[..]));
            // IFD0 (30) + Exif IFD (30) + comment (10) + IFD1 (30) after the header
            assert_eq!(
                reparsed.entry(tag::JPEG_INTERCHANGE_FORMAT).unwrap().bytes(),
                &order.u32_bytes(108)
            );
            assert_eq!(reparsed.entry(tag::USER_COMMENT).unwrap().text(false), "hi");
        }
    }

    #[test]
    fn unreadable_thumbnail_is_unmovable() {
        let mut bytes = thumbnail_tiff(ByteOrder::Little);
        // JPEGInterchangeFormat value slot
        bytes[66..70].copy_from_slice(&1000u32.to_le_bytes());
        let tiff = parse(&bytes).unwrap();
        assert_eq!(tiff.ifds()[1].thumbnail(), None);
        assert!(tiff.check_relayout().is_err());
    }

    #[test]
    fn empty_ifd0_offset() {
        let tiff = parse(b"MM\0*\0\0\0\0").unwrap();
        assert!(tiff.ifds().is_empty());
    }

    // ── serialization ────────────────────────────────────────────────

    #[test]
    fn unmodified_round_trip() {
        for bytes in [sample_tiff(ByteOrder::Little), chained_tiff(ByteOrder::Big)] {
            let tiff = parse(&bytes).unwrap();
            assert!(!tiff.is_modified());
            assert_eq!(tiff.to_bytes(), bytes);
        }
    }

    #[test]
    fn canonical_encoding_matches_canonical_input() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            for bytes in [sample_tiff(order), chained_tiff(order), thumbnail_tiff(order)] {
                let mut tiff = parse(&bytes).unwrap();
                tiff.ifd_mut(IfdKind::Ifd0).unwrap();
                assert!(tiff.is_modified());
                assert_eq!(tiff.encode(), bytes);
            }
        }
    }

    #[test]
    fn mutation_is_re_encoded() {
        let mut tiff = parse(&sample_tiff(ByteOrder::Big)).unwrap();
        let exif = tiff.ifd_mut(IfdKind::Exif).unwrap();
        let replaced = exif.set_entry(UserCommentEntry::new("A longer comment", "ASCII").unwrap());
        assert!(replaced.is_some());

        let reparsed = parse(&tiff.to_bytes()).unwrap();
        let Some(Entry::UserComment(comment)) = reparsed.entry(tag::USER_COMMENT) else {
            panic!("user comment lost");
        };
        assert_eq!(comment.comment(), "A longer comment");
        assert_eq!(reparsed.entry(tag::MAKE).unwrap().text(false), "Canon");
        assert_eq!(
            reparsed.entry(tag::INTEROPERABILITY_VERSION).unwrap().bytes(),
            b"0100"
        );
        assert_eq!(reparsed.ifd(IfdKind::Exif), tiff.ifd(IfdKind::Exif));
    }

    #[test]
    fn missed_ifd_mut_keeps_source() {
        let mut bytes = b"II*\0\x08\0\0\0\0\0\0\0\0\0".to_vec();
        bytes.extend_from_slice(&[0xEE; 3]);
        let mut tiff = parse(&bytes).unwrap();
        assert!(tiff.ifd_mut(IfdKind::Gps).is_none());
        assert!(!tiff.is_modified());
        assert_eq!(tiff.to_bytes(), bytes);
    }

    #[test]
    fn remove_entry_drops_it_from_output() {
        let mut tiff = parse(&sample_tiff(ByteOrder::Little)).unwrap();
        let removed = tiff.ifd_mut(IfdKind::Exif).unwrap().remove_entry(tag::FILE_SOURCE);
        assert!(removed.is_some());
        let reparsed = parse(&tiff.to_bytes()).unwrap();
        assert!(reparsed.entry(tag::FILE_SOURCE).is_none());
        assert_eq!(reparsed.ifd(IfdKind::Exif).unwrap().entries().len(), 3);
    }

    #[test]
    fn new_tiff_encodes_empty_ifd0() {
        let tiff = Tiff::new(ByteOrder::Little);
        assert_eq!(
            tiff.to_bytes(),
            vec![b'I', b'I', 42, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn display_lists_entries() {
        let tiff = parse(&sample_tiff(ByteOrder::Little)).unwrap();
        let dump = tiff.to_string();
        assert!(dump.contains("IFD0 IFD with 1 entries"));
        assert!(dump.contains("0x9286 UserComment (Undefined, 13): Hello"));
        assert!(dump.contains("0x9000 ExifVersion (Undefined, 4): Exif Version 2.2"));
    }
}
