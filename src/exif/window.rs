use crate::error::{InvalidDataKind, Result};

/// Byte order of multi-byte integers in a TIFF structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ByteOrder {
    /// `II`: Intel, little-endian.
    Little,
    /// `MM`: Motorola, big-endian.
    Big,
}

impl ByteOrder {
    /// The two-byte marker that opens a TIFF header in this order.
    pub fn marker(self) -> [u8; 2] {
        match self {
            ByteOrder::Little => *b"II",
            ByteOrder::Big => *b"MM",
        }
    }

    pub fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    pub fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    pub(super) fn u16_from(self, b: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Little => u16::from_le_bytes(b),
            ByteOrder::Big => u16::from_be_bytes(b),
        }
    }

    pub(super) fn u32_from(self, b: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le_bytes(b),
            ByteOrder::Big => u32::from_be_bytes(b),
        }
    }
}

/// Immutable view over a byte buffer with a movable start offset.
///
/// All offsets passed to the accessors are relative to the current window
/// start, so a TIFF structure nested after the EXIF signature can be read
/// with TIFF-relative offsets once the window has been shifted.
#[derive(Debug, Clone, Copy)]
pub struct ByteWindow<'a> {
    data: &'a [u8],
    start: usize,
    order: ByteOrder,
}

impl<'a> ByteWindow<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            start: 0,
            order: ByteOrder::Little,
        }
    }

    /// Number of bytes visible through the window.
    pub fn len(&self) -> usize {
        self.data.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The visible bytes.
    pub fn as_slice(&self) -> &'a [u8] {
        &self.data[self.start..]
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Move the window start forward by `offset` bytes.
    pub fn set_window_start(&mut self, offset: usize) -> Result<()> {
        if offset > self.len() {
            return Err(InvalidDataKind::OutOfBounds {
                offset,
                len: 0,
                available: self.len(),
            }
            .into());
        }
        self.start += offset;
        Ok(())
    }

    /// True if the bytes at `offset` equal `needle`. Never fails: a needle
    /// running past the end simply does not match.
    pub fn starts_with_at(&self, offset: usize, needle: &[u8]) -> bool {
        self.as_slice()
            .get(offset..)
            .is_some_and(|rest| rest.starts_with(needle))
    }

    /// Borrow `len` bytes at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let available = self.len();
        offset
            .checked_add(len)
            .filter(|&end| end <= available)
            .map(|end| &self.as_slice()[offset..end])
            .ok_or_else(|| {
                InvalidDataKind::OutOfBounds {
                    offset,
                    len,
                    available,
                }
                .into()
            })
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16> {
        let b = self.bytes(offset, 2)?;
        Ok(self.order.u16_from([b[0], b[1]]))
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32> {
        let b = self.bytes(offset, 4)?;
        Ok(self.order.u32_from([b[0], b[1], b[2], b[3]]))
    }
}
