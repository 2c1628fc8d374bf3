//! Decoded entry values and the per-validation directory state.

use std::collections::BTreeMap;

use crate::tags::Type;

use self::Value::{
    Ascii, Byte, Double, Float, Ifd, List, Rational, SRational, Short, Signed, SignedByte,
    SignedShort, Undefined, Unsigned,
};

/// A decoded IFD entry value.
///
/// This is the in-memory form handed over by a binary decoder; the registry
/// never parses file bytes itself. Multi-valued entries arrive as [`List`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    Byte(u8),
    Short(u16),
    SignedByte(i8),
    SignedShort(i16),
    Signed(i32),
    Unsigned(u32),
    Float(f32),
    Double(f64),
    Rational(u32, u32),
    SRational(i32, i32),
    Ascii(String),
    Ifd(u32),
    Undefined(u8),
    List(Vec<Value>),
}

impl Value {
    /// The number of on-disk elements this value occupies.
    ///
    /// ASCII strings count one element per byte, matching the count field of
    /// an IFD entry. The terminating NUL, if the decoder kept it, is part of
    /// the string.
    pub fn count(&self) -> u64 {
        match self {
            List(v) => v.len() as u64,
            Ascii(s) => s.len() as u64,
            _ => 1,
        }
    }

    /// View a single value as an unsigned integer, if it is one.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Byte(val) => Some(val.into()),
            Short(val) => Some(val.into()),
            Unsigned(val) => Some(val.into()),
            Ifd(val) => Some(val.into()),
            _ => None,
        }
    }

    /// The scalar dependency resolution operates on.
    ///
    /// A list qualifies only if every element is the same unsigned integer;
    /// `BitsPerSample` is commonly `[8, 8, 8]` and means 8 in a dependent
    /// count or default.
    pub fn as_scalar_u64(&self) -> Option<u64> {
        match self {
            List(vals) => {
                let mut iter = vals.iter();
                let first = iter.next()?.as_u64()?;
                for val in iter {
                    if val.as_u64()? != first {
                        return None;
                    }
                }
                Some(first)
            }
            val => val.as_u64(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Byte(e) => write!(f, "{e}"),
            Short(e) => write!(f, "{e}"),
            SignedByte(e) => write!(f, "{e}"),
            SignedShort(e) => write!(f, "{e}"),
            Signed(e) => write!(f, "{e}"),
            Unsigned(e) => write!(f, "{e}"),
            Float(e) => write!(f, "{e}"),
            Double(e) => write!(f, "{e}"),
            Rational(n, d) => write!(f, "{n}/{d}"),
            SRational(n, d) => write!(f, "{n}/{d}"),
            Ascii(e) => write!(f, "{e}"),
            Ifd(e) => write!(f, "IFD offset: {e}"),
            Undefined(e) => write!(f, "{e}"),
            List(vals) => {
                let mut sep = "";
                for val in vals {
                    write!(f, "{sep}{val}")?;
                    sep = ", ";
                }
                Ok(())
            }
        }
    }
}

/// One decoded IFD entry as handed over by the binary decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub tag: u16,
    pub type_: Type,
    pub value: Value,
}

impl RawEntry {
    pub fn new(tag: u16, type_: Type, value: Value) -> Self {
        RawEntry { tag, type_, value }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Decoded from the directory itself.
    Raw,
    /// Synthesized from the tag's default during validation.
    Synthesized,
}

/// A value in the resolved directory, tagged with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    value: Value,
    origin: Origin,
}

impl ResolvedEntry {
    pub fn new(value: Value, origin: Origin) -> Self {
        ResolvedEntry { value, origin }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_synthesized(&self) -> bool {
        self.origin == Origin::Synthesized
    }
}

/// The working state of one validation call: tag id to resolved value.
///
/// Entries iterate in ascending tag order, the order the TIFF specification
/// prescribes for directories. A directory is created empty at the start of
/// a validation, filled entry by entry, and handed out in the report; there
/// is no state shared between calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedIfd {
    entries: BTreeMap<u16, ResolvedEntry>,
}

impl ResolvedIfd {
    /// Create a directory in an initial state without entries.
    pub fn empty() -> Self {
        ResolvedIfd {
            entries: BTreeMap::new(),
        }
    }

    /// Retrieve the entry associated with a tag id.
    pub fn get(&self, tag: u16) -> Option<&ResolvedEntry> {
        self.entries.get(&tag)
    }

    /// Check if the directory contains a specified tag id.
    pub fn contains(&self, tag: u16) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Insert an entry, returning the previous one for the same tag id.
    pub fn insert(&mut self, tag: u16, entry: ResolvedEntry) -> Option<ResolvedEntry> {
        self.entries.insert(tag, entry)
    }

    /// Iterate over all entries in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &ResolvedEntry)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
