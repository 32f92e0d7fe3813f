//! Tag identifiers and IFD kinds.
//!
//! Only the tags the codec itself needs to recognize, plus a small set of
//! common names for display. This is not a full EXIF tag catalog.

use std::fmt;

// IFD0 / IFD1
pub const IMAGE_DESCRIPTION: u16 = 0x010E;
pub const MAKE: u16 = 0x010F;
pub const MODEL: u16 = 0x0110;
pub const STRIP_OFFSETS: u16 = 0x0111;
pub const ORIENTATION: u16 = 0x0112;
pub const X_RESOLUTION: u16 = 0x011A;
pub const Y_RESOLUTION: u16 = 0x011B;
pub const RESOLUTION_UNIT: u16 = 0x0128;
pub const SOFTWARE: u16 = 0x0131;
pub const DATE_TIME: u16 = 0x0132;
pub const TILE_OFFSETS: u16 = 0x0144;
pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x0201;
pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x0202;
pub const YCBCR_POSITIONING: u16 = 0x0213;
pub const COPYRIGHT: u16 = 0x8298;

// Sub-IFD pointers
pub const EXIF_IFD_POINTER: u16 = 0x8769;
pub const GPS_INFO_IFD_POINTER: u16 = 0x8825;
pub const INTEROPERABILITY_IFD_POINTER: u16 = 0xA005;

// Exif IFD
pub const EXPOSURE_TIME: u16 = 0x829A;
pub const FNUMBER: u16 = 0x829D;
pub const ISO_SPEED_RATINGS: u16 = 0x8827;
pub const EXIF_VERSION: u16 = 0x9000;
pub const DATE_TIME_ORIGINAL: u16 = 0x9003;
pub const COMPONENTS_CONFIGURATION: u16 = 0x9101;
pub const FOCAL_LENGTH: u16 = 0x920A;
pub const MAKER_NOTE: u16 = 0x927C;
pub const USER_COMMENT: u16 = 0x9286;
pub const FLASH_PIX_VERSION: u16 = 0xA000;
pub const COLOR_SPACE: u16 = 0xA001;
pub const PIXEL_X_DIMENSION: u16 = 0xA002;
pub const PIXEL_Y_DIMENSION: u16 = 0xA003;
pub const FILE_SOURCE: u16 = 0xA300;
pub const SCENE_TYPE: u16 = 0xA301;

// Interoperability IFD
pub const INTEROPERABILITY_INDEX: u16 = 0x0001;
pub const INTEROPERABILITY_VERSION: u16 = 0x0002;

/// The directories an EXIF TIFF structure can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum IfdKind {
    /// Primary image.
    Ifd0,
    /// Thumbnail image.
    Ifd1,
    Exif,
    Gps,
    Interoperability,
}

impl IfdKind {
    /// The kind of nested IFD a pointer tag refers to, if `tag` is one.
    pub fn from_pointer_tag(tag: u16) -> Option<Self> {
        match tag {
            EXIF_IFD_POINTER => Some(IfdKind::Exif),
            GPS_INFO_IFD_POINTER => Some(IfdKind::Gps),
            INTEROPERABILITY_IFD_POINTER => Some(IfdKind::Interoperability),
            _ => None,
        }
    }

    /// The pointer tag that refers to this kind of nested IFD.
    pub fn pointer_tag(self) -> Option<u16> {
        match self {
            IfdKind::Exif => Some(EXIF_IFD_POINTER),
            IfdKind::Gps => Some(GPS_INFO_IFD_POINTER),
            IfdKind::Interoperability => Some(INTEROPERABILITY_IFD_POINTER),
            IfdKind::Ifd0 | IfdKind::Ifd1 => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IfdKind::Ifd0 => "IFD0",
            IfdKind::Ifd1 => "IFD1",
            IfdKind::Exif => "Exif",
            IfdKind::Gps => "GPS",
            IfdKind::Interoperability => "Interoperability",
        }
    }
}

impl fmt::Display for IfdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a tag, or `None` when it is not in the table.
///
/// The interoperability tags share ids with GPS tags, so `ifd` decides which
/// table applies.
pub fn tag_name(ifd: IfdKind, tag: u16) -> Option<&'static str> {
    if ifd == IfdKind::Interoperability {
        return match tag {
            INTEROPERABILITY_INDEX => Some("InteroperabilityIndex"),
            INTEROPERABILITY_VERSION => Some("InteroperabilityVersion"),
            _ => None,
        };
    }
    if ifd == IfdKind::Gps {
        return match tag {
            0x0000 => Some("GPSVersionID"),
            0x0001 => Some("GPSLatitudeRef"),
            0x0002 => Some("GPSLatitude"),
            0x0003 => Some("GPSLongitudeRef"),
            0x0004 => Some("GPSLongitude"),
            0x0005 => Some("GPSAltitudeRef"),
            0x0006 => Some("GPSAltitude"),
            _ => None,
        };
    }
    Some(match tag {
        IMAGE_DESCRIPTION => "ImageDescription",
        MAKE => "Make",
        MODEL => "Model",
        STRIP_OFFSETS => "StripOffsets",
        ORIENTATION => "Orientation",
        X_RESOLUTION => "XResolution",
        Y_RESOLUTION => "YResolution",
        RESOLUTION_UNIT => "ResolutionUnit",
        SOFTWARE => "Software",
        DATE_TIME => "DateTime",
        TILE_OFFSETS => "TileOffsets",
        JPEG_INTERCHANGE_FORMAT => "JPEGInterchangeFormat",
        JPEG_INTERCHANGE_FORMAT_LENGTH => "JPEGInterchangeFormatLength",
        YCBCR_POSITIONING => "YCbCrPositioning",
        COPYRIGHT => "Copyright",
        EXIF_IFD_POINTER => "ExifIFDPointer",
        GPS_INFO_IFD_POINTER => "GPSInfoIFDPointer",
        INTEROPERABILITY_IFD_POINTER => "InteroperabilityIFDPointer",
        EXPOSURE_TIME => "ExposureTime",
        FNUMBER => "FNumber",
        ISO_SPEED_RATINGS => "ISOSpeedRatings",
        EXIF_VERSION => "ExifVersion",
        DATE_TIME_ORIGINAL => "DateTimeOriginal",
        COMPONENTS_CONFIGURATION => "ComponentsConfiguration",
        FOCAL_LENGTH => "FocalLength",
        MAKER_NOTE => "MakerNote",
        USER_COMMENT => "UserComment",
        FLASH_PIX_VERSION => "FlashPixVersion",
        COLOR_SPACE => "ColorSpace",
        PIXEL_X_DIMENSION => "PixelXDimension",
        PIXEL_Y_DIMENSION => "PixelYDimension",
        FILE_SOURCE => "FileSource",
        SCENE_TYPE => "SceneType",
        _ => return None,
    })
}
