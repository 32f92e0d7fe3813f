use std::fmt;

/// Format of an IFD entry's components, as stored in the entry's type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Format {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    /// Opaque bytes whose meaning depends on the tag.
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
}

impl Format {
    /// Decode the TIFF type code. Unknown codes yield `None`.
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            1 => Format::Byte,
            2 => Format::Ascii,
            3 => Format::Short,
            4 => Format::Long,
            5 => Format::Rational,
            6 => Format::SByte,
            7 => Format::Undefined,
            8 => Format::SShort,
            9 => Format::SLong,
            10 => Format::SRational,
            11 => Format::Float,
            12 => Format::Double,
            _ => return None,
        })
    }

    pub fn code(self) -> u16 {
        match self {
            Format::Byte => 1,
            Format::Ascii => 2,
            Format::Short => 3,
            Format::Long => 4,
            Format::Rational => 5,
            Format::SByte => 6,
            Format::Undefined => 7,
            Format::SShort => 8,
            Format::SLong => 9,
            Format::SRational => 10,
            Format::Float => 11,
            Format::Double => 12,
        }
    }

    /// Size in bytes of one component.
    pub fn unit_size(self) -> usize {
        match self {
            Format::Byte | Format::Ascii | Format::SByte | Format::Undefined => 1,
            Format::Short | Format::SShort => 2,
            Format::Long | Format::SLong | Format::Float => 4,
            Format::Rational | Format::SRational | Format::Double => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Byte => "Byte",
            Format::Ascii => "Ascii",
            Format::Short => "Short",
            Format::Long => "Long",
            Format::Rational => "Rational",
            Format::SByte => "SByte",
            Format::Undefined => "Undefined",
            Format::SShort => "SShort",
            Format::SLong => "SLong",
            Format::SRational => "SRational",
            Format::Float => "Float",
            Format::Double => "Double",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
