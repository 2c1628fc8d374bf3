//! Tag identifiers and the on-disk value encodings of classic TIFF.

macro_rules! tags {
    {
        // Permit arbitrary meta items, which include documentation.
        $( #[$enum_attr:meta] )*
        $vis:vis enum $name:ident($ty:tt) $(unknown(#[$unknown_meta:meta] $unknown_doc:ident))* {
            // Each of the `Name = Val,` permitting documentation.
            $($(#[$ident_attr:meta])* $tag:ident = $val:expr,)*
        }
    } => {
        $( #[$enum_attr] )*
        #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
        #[non_exhaustive]
        #[repr($ty)]
        pub enum $name {
            $($(#[$ident_attr])* $tag = $val,)*
            $(
                #[$unknown_meta]
                Unknown($ty) = <$ty>::MAX,
            )*
        }

        impl $name {
            #[inline(always)]
            pub const fn from_u16(val: $ty) -> Option<Self> {
                match val {
                    $( $val => Some($name::$tag), )*
                    _ => None,
                }
            }

            $(
            #[inline(always)]
            pub const fn from_u16_exhaustive($unknown_doc: $ty) -> Self {
                match Self::from_u16($unknown_doc) {
                    Some(v) => v,
                    None => $name::Unknown($unknown_doc),
                }
            }
            )*

            #[inline(always)]
            pub const fn to_u16(&self) -> $ty {
                match *self {
                    $( $name::$tag => $val, )*
                    $( $name::Unknown($unknown_doc) => $unknown_doc, )*
                }
            }
        }
    };
}

// Note: these tags appear in the order they are mentioned in the TIFF reference
tags! {
/// Baseline TIFF tags
pub enum Tag(u16) unknown(
    /// A private or extension tag
    unknown
) {
    Artist = 315,
    // grayscale images PhotometricInterpretation 1 or 3
    BitsPerSample = 258,
    CellLength = 265,
    CellWidth = 264,
    // palette-color images (PhotometricInterpretation 3)
    ColorMap = 320,
    Compression = 259,
    Copyright = 33_432,
    DateTime = 306,
    ExtraSamples = 338,
    FillOrder = 266,
    FreeByteCounts = 289,
    FreeOffsets = 288,
    GrayResponseCurve = 291,
    GrayResponseUnit = 290,
    HostComputer = 316,
    ImageDescription = 270,
    ImageLength = 257,
    ImageWidth = 256,
    Make = 271,
    MaxSampleValue = 281,
    MinSampleValue = 280,
    Model = 272,
    NewSubfileType = 254,
    Orientation = 274,
    PhotometricInterpretation = 262,
    PlanarConfiguration = 284,
    ResolutionUnit = 296,
    RowsPerStrip = 278,
    SamplesPerPixel = 277,
    Software = 305,
    StripByteCounts = 279,
    StripOffsets = 273,
    SubIfd = 330,
    XResolution = 282,
    Xmp = 700,
    YResolution = 283,
}
}

tags! {
/// The type of an IFD entry (a 2 byte field).
pub enum Type(u16) {
    /// 8-bit unsigned integer
    BYTE = 1,
    /// 8-bit byte that contains a 7-bit ASCII code; the last byte must be zero
    ASCII = 2,
    /// 16-bit unsigned integer
    SHORT = 3,
    /// 32-bit unsigned integer
    LONG = 4,
    /// Fraction stored as two 32-bit unsigned integers
    RATIONAL = 5,
    /// 8-bit signed integer
    SBYTE = 6,
    /// 8-bit byte that may contain anything, depending on the field
    UNDEFINED = 7,
    /// 16-bit signed integer
    SSHORT = 8,
    /// 32-bit signed integer
    SLONG = 9,
    /// Fraction stored as two 32-bit signed integers
    SRATIONAL = 10,
    /// 32-bit IEEE floating point
    FLOAT = 11,
    /// 64-bit IEEE floating point
    DOUBLE = 12,
    /// 32-bit unsigned integer used to point to another valid IFD
    IFD = 13,
}
}

impl Type {
    /// The number of bytes one element of this type occupies on disk.
    ///
    /// The registry never reads file bytes itself; this is the sizing table a
    /// binary decoder consults to know how many bytes to fetch per element.
    pub fn byte_len(&self) -> u8 {
        match *self {
            Type::BYTE | Type::SBYTE | Type::ASCII | Type::UNDEFINED => 1,
            Type::SHORT | Type::SSHORT => 2,
            Type::LONG | Type::SLONG | Type::FLOAT | Type::IFD => 4,
            Type::DOUBLE | Type::RATIONAL | Type::SRATIONAL => 8,
        }
    }

    /// Total byte size of `count` elements of this type, or `None` on overflow.
    pub fn value_bytes(&self, count: u64) -> Option<u64> {
        count.checked_mul(u64::from(self.byte_len()))
    }
}

#[test]
fn tag_round_trip() {
    assert_eq!(Tag::from_u16(258), Some(Tag::BitsPerSample));
    assert_eq!(Tag::BitsPerSample.to_u16(), 258);
    assert_eq!(Tag::from_u16(60_000), None);
    assert_eq!(Tag::from_u16_exhaustive(60_000), Tag::Unknown(60_000));
    assert_eq!(Tag::Unknown(60_000).to_u16(), 60_000);
}

#[test]
fn type_widths() {
    let widths = [
        (Type::BYTE, 1),
        (Type::ASCII, 1),
        (Type::SHORT, 2),
        (Type::LONG, 4),
        (Type::RATIONAL, 8),
        (Type::SBYTE, 1),
        (Type::UNDEFINED, 1),
        (Type::SSHORT, 2),
        (Type::SLONG, 4),
        (Type::SRATIONAL, 8),
        (Type::FLOAT, 4),
        (Type::DOUBLE, 8),
        (Type::IFD, 4),
    ];

    for (ty, width) in widths {
        assert_eq!(ty.byte_len(), width, "{ty:?}");
    }
}

#[test]
fn value_bytes_checked() {
    assert_eq!(Type::SHORT.value_bytes(3), Some(6));
    assert_eq!(Type::RATIONAL.value_bytes(u64::MAX), None);
}
