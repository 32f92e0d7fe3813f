//! Hand-built EXIF fixtures for tests.
//!
//! The sample layout is already canonical (entries sorted by tag, data and
//! sub-IFDs word-aligned right after each directory), so re-encoding a parsed
//! sample must reproduce it byte for byte.

use super::window::ByteOrder;

fn put_entry(t: &mut Vec<u8>, order: ByteOrder, tag: u16, format: u16, count: u32, value: [u8; 4]) {
    t.extend_from_slice(&order.u16_bytes(tag));
    t.extend_from_slice(&order.u16_bytes(format));
    t.extend_from_slice(&order.u32_bytes(count));
    t.extend_from_slice(&value);
}

fn header(order: ByteOrder) -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&order.marker());
    t.extend_from_slice(&order.u16_bytes(42));
    t.extend_from_slice(&order.u32_bytes(8));
    t
}

/// IFD0 (Make, Exif pointer) → Exif IFD (ExifVersion 2.2, ComponentsConfiguration
/// Y Cb Cr -, UserComment "Hello", Interoperability pointer, FileSource DSC)
/// → Interoperability IFD (InteroperabilityIndex R98, InteroperabilityVersion 1.0).
pub(crate) fn sample_tiff(order: ByteOrder) -> Vec<u8> {
    let mut t = header(order);

    // IFD0 @ 8
    t.extend_from_slice(&order.u16_bytes(2));
    put_entry(&mut t, order, 0x010F, 2, 6, order.u32_bytes(38));
    put_entry(&mut t, order, 0x8769, 4, 1, order.u32_bytes(44));
    t.extend_from_slice(&order.u32_bytes(0));
    t.extend_from_slice(b"Canon\0");

    // Exif IFD @ 44
    t.extend_from_slice(&order.u16_bytes(5));
    put_entry(&mut t, order, 0x9000, 7, 4, *b"0220");
    put_entry(&mut t, order, 0x9101, 7, 4, [1, 2, 3, 0]);
    put_entry(&mut t, order, 0x9286, 7, 13, order.u32_bytes(110));
    put_entry(&mut t, order, 0xA005, 4, 1, order.u32_bytes(124));
    put_entry(&mut t, order, 0xA300, 7, 1, [3, 0, 0, 0]);
    t.extend_from_slice(&order.u32_bytes(0));
    t.extend_from_slice(b"ASCII\0\0\0Hello");
    t.push(0);

    // Interoperability IFD @ 124
    t.extend_from_slice(&order.u16_bytes(2));
    put_entry(&mut t, order, 0x0001, 2, 4, *b"R98\0");
    put_entry(&mut t, order, 0x0002, 7, 4, *b"0100");
    t.extend_from_slice(&order.u32_bytes(0));

    assert_eq!(t.len(), 154);
    t
}

/// IFD0 (Orientation) chained to IFD1 (JPEGInterchangeFormatLength).
pub(crate) fn chained_tiff(order: ByteOrder) -> Vec<u8> {
    let mut t = header(order);

    // IFD0 @ 8
    t.extend_from_slice(&order.u16_bytes(1));
    let mut orientation = [0u8; 4];
    orientation[..2].copy_from_slice(&order.u16_bytes(1));
    put_entry(&mut t, order, 0x0112, 3, 1, orientation);
    t.extend_from_slice(&order.u32_bytes(26));

    // IFD1 @ 26
    t.extend_from_slice(&order.u16_bytes(1));
    put_entry(&mut t, order, 0x0202, 4, 1, order.u32_bytes(0));
    t.extend_from_slice(&order.u32_bytes(0));

    assert_eq!(t.len(), 44);
    t
}

/// The JPEG thumbnail carried by [`thumbnail_tiff`].
pub(crate) const THUMBNAIL: [u8; 6] = [0xFF, 0xD8, 0xAA, 0xBB, 0xFF, 0xD9];

/// IFD0 (Orientation, Exif pointer) → Exif IFD (ExifVersion 2.2), chained to
/// IFD1 (JPEGInterchangeFormat, JPEGInterchangeFormatLength) with
/// [`THUMBNAIL`] right after it.
pub(crate) fn thumbnail_tiff(order: ByteOrder) -> Vec<u8> {
    let mut t = header(order);

    // IFD0 @ 8
    t.extend_from_slice(&order.u16_bytes(2));
    let mut orientation = [0u8; 4];
    orientation[..2].copy_from_slice(&order.u16_bytes(1));
    put_entry(&mut t, order, 0x0112, 3, 1, orientation);
    put_entry(&mut t, order, 0x8769, 4, 1, order.u32_bytes(38));
    t.extend_from_slice(&order.u32_bytes(56));

    // Exif IFD @ 38
    t.extend_from_slice(&order.u16_bytes(1));
    put_entry(&mut t, order, 0x9000, 7, 4, *b"0220");
    t.extend_from_slice(&order.u32_bytes(0));

    // IFD1 @ 56
    t.extend_from_slice(&order.u16_bytes(2));
    put_entry(&mut t, order, 0x0201, 4, 1, order.u32_bytes(86));
    put_entry(&mut t, order, 0x0202, 4, 1, order.u32_bytes(THUMBNAIL.len() as u32));
    t.extend_from_slice(&order.u32_bytes(0));

    // thumbnail @ 86
    t.extend_from_slice(&THUMBNAIL);

    assert_eq!(t.len(), 92);
    t
}

/// `Exif\0\0` followed by [`sample_tiff`].
pub(crate) fn sample_exif(order: ByteOrder) -> Vec<u8> {
    let mut block = b"Exif\0\0".to_vec();
    block.extend_from_slice(&sample_tiff(order));
    block
}
