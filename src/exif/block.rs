use std::fmt;

use super::tiff::Tiff;
use super::window::ByteWindow;
use crate::error::{InvalidDataKind, Result};

/// The six bytes every EXIF block starts with.
pub const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

/// An EXIF block: the `Exif\0\0` signature followed by a TIFF structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ExifBlock {
    size: usize,
    tiff: Tiff,
}

impl ExifBlock {
    /// Validate the signature and parse the TIFF structure after it.
    ///
    /// Fails with `TooShort` below six bytes and `BadSignature` when the
    /// signature does not match exactly; TIFF errors propagate unchanged.
    pub fn parse(mut window: ByteWindow<'_>) -> Result<Self> {
        let size = window.len();
        log::debug!("Parsing {size} bytes of EXIF data...");

        if size < EXIF_HEADER.len() {
            return Err(InvalidDataKind::TooShort {
                expected: EXIF_HEADER.len(),
                found: size,
            }
            .into());
        }
        if !window.starts_with_at(0, EXIF_HEADER) {
            return Err(InvalidDataKind::BadSignature.into());
        }
        window.set_window_start(EXIF_HEADER.len())?;

        let tiff = Tiff::parse(window)?;
        Ok(Self { size, tiff })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(ByteWindow::new(data))
    }

    /// Length of the parsed input, signature included.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiff(&self) -> &Tiff {
        &self.tiff
    }

    pub fn tiff_mut(&mut self) -> &mut Tiff {
        &mut self.tiff
    }

    /// Signature plus the TIFF bytes. Equal to the parsed input as long as
    /// nothing was changed through [`Tiff::ifd_mut`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let tiff = self.tiff.to_bytes();
        let mut out = Vec::with_capacity(EXIF_HEADER.len() + tiff.len());
        out.extend_from_slice(EXIF_HEADER);
        out.extend_from_slice(&tiff);
        out
    }
}

impl fmt::Display for ExifBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dumping {} bytes of EXIF data...", self.size)?;
        write!(f, "{}", self.tiff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::exif::entry::EntryRecord;
    use crate::exif::tag::{self, IfdKind};
    use crate::exif::testdata::sample_exif;
    use crate::exif::undefined::VersionEntry;
    use crate::exif::window::ByteOrder;

    // ── header validation ────────────────────────────────────────────

    #[test]
    fn too_short_inputs() {
        for len in 0..6 {
            let data = &b"Exif\0\0"[..len];
            let err = ExifBlock::from_bytes(data).unwrap_err();
            assert_eq!(
                err,
                Error::InvalidData(InvalidDataKind::TooShort { expected: 6, found: len }),
                "len {len}"
            );
        }
    }

    #[test]
    fn bad_signature_is_case_sensitive() {
        let mut data = sample_exif(ByteOrder::Little);
        data[..6].copy_from_slice(b"EXIF\0\0");
        let err = ExifBlock::from_bytes(&data).unwrap_err();
        assert_eq!(err.invalid_data_kind(), Some(&InvalidDataKind::BadSignature));
    }

    #[test]
    fn bad_signature_without_payload() {
        let err = ExifBlock::from_bytes(b"Exif\0X").unwrap_err();
        assert_eq!(err, Error::InvalidData(InvalidDataKind::BadSignature));
    }

    #[test]
    fn bare_signature_fails_in_tiff() {
        let err = ExifBlock::from_bytes(b"Exif\0\0").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidData(InvalidDataKind::TooShort { expected: 8, found: 0 })
        );
    }

    // ── round trip ───────────────────────────────────────────────────

    #[test]
    fn round_trip_and_size() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let data = sample_exif(order);
            let block = ExifBlock::from_bytes(&data).unwrap();
            assert_eq!(block.size(), data.len());
            assert_eq!(block.to_bytes(), data);
        }
    }

    #[test]
    fn round_trip_keeps_non_canonical_layout() {
        // trailing padding the canonical writer would not produce
        let mut data = sample_exif(ByteOrder::Little);
        data.extend_from_slice(&[0xAA; 7]);
        let block = ExifBlock::from_bytes(&data).unwrap();
        assert_eq!(block.size(), data.len());
        assert_eq!(block.to_bytes(), data);
    }

    #[test]
    fn exposes_nested_entries() {
        let block = ExifBlock::from_bytes(&sample_exif(ByteOrder::Big)).unwrap();
        let tiff = block.tiff();
        assert_eq!(tiff.entry(tag::EXIF_VERSION).unwrap().text(true), "Exif 2.2");
        assert_eq!(tiff.entry(tag::USER_COMMENT).unwrap().text(false), "Hello");
    }

    #[test]
    fn mutation_through_tiff() {
        let mut block = ExifBlock::from_bytes(&sample_exif(ByteOrder::Little)).unwrap();
        block
            .tiff_mut()
            .ifd_mut(IfdKind::Exif)
            .unwrap()
            .set_entry(VersionEntry::new(tag::EXIF_VERSION, 2.3));

        let bytes = block.to_bytes();
        assert!(bytes.starts_with(EXIF_HEADER));
        let reparsed = ExifBlock::from_bytes(&bytes).unwrap();
        assert_eq!(reparsed.tiff().entry(tag::EXIF_VERSION).unwrap().bytes(), b"0230");
        assert_eq!(reparsed.size(), bytes.len());
    }

    #[test]
    fn display_dump() {
        let block = ExifBlock::from_bytes(&sample_exif(ByteOrder::Little)).unwrap();
        let dump = block.to_string();
        assert!(dump.starts_with("Dumping 160 bytes of EXIF data...\n"));
        assert!(dump.contains("FileSource"));
    }
}
