//! Schema registry for TIFF IFD tag metadata.
//!
//! For every baseline tag the registry records the accepted on-disk value
//! encodings, a count specification and a default specification, either of
//! which may be a function of another tag's resolved value. On top of the
//! registry sit the four baseline image class profiles (bilevel, grayscale,
//! palette-color, RGB) and a validator that checks an already-decoded
//! directory against one of them, filling defaults where permitted.
//!
//! The crate never touches bytes on disk: header parsing, byte-order
//! handling and strip decompression belong to a binary decoder, which hands
//! over plain `(tag, type, value)` triples and may consult
//! [`tags::Type::byte_len`] for value sizing.
//!
//! ```
//! use tiff_schema::{ImageClass, RawEntry, TagSchemaTable, Validator, Value};
//! use tiff_schema::tags::{Tag, Type};
//!
//! let table = TagSchemaTable::baseline();
//! let validator = Validator::new(&table)?;
//!
//! let entries = [RawEntry::new(
//!     Tag::ImageWidth.to_u16(),
//!     Type::SHORT,
//!     Value::Short(640),
//! )];
//! let report = validator.validate(&entries, Some(ImageClass::Bilevel));
//!
//! assert!(!report.passed()); // almost everything is missing
//! # Ok::<(), tiff_schema::SchemaError>(())
//! ```
//!
//! # Related Links
//! * <https://web.archive.org/web/20210108073850/https://www.adobe.io/open/standards/TIFF.html> - The TIFF specification

mod error;
mod ifd;
mod profile;
mod report;
mod resolver;
mod schema;
pub mod tags;
mod validator;

pub use self::error::{ResolveError, SchemaError};
pub use self::ifd::{Origin, RawEntry, ResolvedEntry, ResolvedIfd, Value};
pub use self::profile::{ImageClass, ProfileMatch, ProfileSet};
pub use self::report::{Diagnostic, Severity, ValidationReport};
pub use self::resolver::Resolver;
pub use self::schema::{CountSpec, DefaultSpec, DependentFn, TagDescriptor, TagSchemaTable};
pub use self::validator::Validator;
