//! The structured outcome of validating one directory.

use std::fmt;

use crate::error::ResolveError;
use crate::ifd::{ResolvedIfd, Value};
use crate::profile::ImageClass;
use crate::tags::{Tag, Type};

/// Whether a diagnostic fails the directory or merely annotates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fails the report: the directory does not conform.
    Violation,
    /// Informational; never causes failure by itself.
    Note,
}

/// One finding of the validator, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A private or extension tag the schema does not describe. TIFF files
    /// legitimately carry these; the entry is ignored for profile purposes.
    UnknownTag { tag: u16 },
    /// The entry's encoding is not in the tag's accepted set.
    TypeMismatch {
        tag: u16,
        expected: Vec<Type>,
        actual: Type,
    },
    /// The entry's element count differs from the resolved count.
    CountMismatch { tag: u16, expected: u64, actual: u64 },
    /// A tag the selected class requires is absent and has no default.
    MissingRequiredTag { tag: u16 },
    /// A dependent count or default named a tag that is neither present nor
    /// defaultable in this directory.
    UnresolvedDependency { tag: u16, dependency: u16 },
    /// A dependent computation produced nothing representable.
    InvalidComputedValue { tag: u16, dependency: u16 },
    /// A required tag was absent and its default was filled in.
    DefaultApplied { tag: u16, value: Value },
    /// Detection found several classes of equal specificity.
    AmbiguousProfile { candidates: Vec<ImageClass> },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::TypeMismatch { .. }
            | Diagnostic::CountMismatch { .. }
            | Diagnostic::MissingRequiredTag { .. } => Severity::Violation,
            Diagnostic::UnknownTag { .. }
            | Diagnostic::UnresolvedDependency { .. }
            | Diagnostic::InvalidComputedValue { .. }
            | Diagnostic::DefaultApplied { .. }
            | Diagnostic::AmbiguousProfile { .. } => Severity::Note,
        }
    }

    pub fn is_violation(&self) -> bool {
        self.severity() == Severity::Violation
    }

    /// The tag this diagnostic is about, where there is one.
    pub fn tag(&self) -> Option<u16> {
        match *self {
            Diagnostic::UnknownTag { tag }
            | Diagnostic::TypeMismatch { tag, .. }
            | Diagnostic::CountMismatch { tag, .. }
            | Diagnostic::MissingRequiredTag { tag }
            | Diagnostic::UnresolvedDependency { tag, .. }
            | Diagnostic::InvalidComputedValue { tag, .. }
            | Diagnostic::DefaultApplied { tag, .. } => Some(tag),
            Diagnostic::AmbiguousProfile { .. } => None,
        }
    }
}

impl From<ResolveError> for Diagnostic {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::UnresolvedDependency(tag, dependency) => {
                Diagnostic::UnresolvedDependency { tag, dependency }
            }
            ResolveError::InvalidComputedValue(tag, dependency) => {
                Diagnostic::InvalidComputedValue { tag, dependency }
            }
        }
    }
}

/// Renders a tag id with its name when the schema knows one.
struct TagName(u16);

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Tag::from_u16(self.0) {
            Some(tag) => write!(f, "{tag:?} ({})", self.0),
            None => write!(f, "tag {}", self.0),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownTag { tag } => {
                write!(f, "unknown {}", TagName(*tag))
            }
            Diagnostic::TypeMismatch {
                tag,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: type {actual:?} not in accepted set {expected:?}",
                    TagName(*tag)
                )
            }
            Diagnostic::CountMismatch {
                tag,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: expected {expected} value(s), found {actual}",
                    TagName(*tag)
                )
            }
            Diagnostic::MissingRequiredTag { tag } => {
                write!(f, "missing required {}", TagName(*tag))
            }
            Diagnostic::UnresolvedDependency { tag, dependency } => {
                write!(
                    f,
                    "{}: dependency {} is absent and has no default",
                    TagName(*tag),
                    TagName(*dependency)
                )
            }
            Diagnostic::InvalidComputedValue { tag, dependency } => {
                write!(
                    f,
                    "{}: could not be computed from {}",
                    TagName(*tag),
                    TagName(*dependency)
                )
            }
            Diagnostic::DefaultApplied { tag, value } => {
                write!(f, "{}: default {value} applied", TagName(*tag))
            }
            Diagnostic::AmbiguousProfile { candidates } => {
                write!(f, "ambiguous image class:")?;
                for class in candidates {
                    write!(f, " {class}")?;
                }
                Ok(())
            }
        }
    }
}

/// Everything `validate` found out about one directory.
///
/// Reports compare equal when every field does, so determinism is directly
/// assertable: the same input yields the same report, every time.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    passed: bool,
    profile: Option<ImageClass>,
    ifd: ResolvedIfd,
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub(crate) fn new(
        passed: bool,
        profile: Option<ImageClass>,
        ifd: ResolvedIfd,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        ValidationReport {
            passed,
            profile,
            ifd,
            diagnostics,
        }
    }

    /// False iff any type, count or missing-required-tag violation occurred.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// The class the directory was validated against: the caller's choice,
    /// or the detected one, or `None` when nothing matched unambiguously.
    pub fn profile(&self) -> Option<ImageClass> {
        self.profile
    }

    /// The final directory, raw and synthesized values distinguished.
    pub fn ifd(&self) -> &ResolvedIfd {
        &self.ifd
    }

    /// All findings in the order they were made: entries in input order,
    /// then profile findings in ascending tag order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn violations(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(|d| d.is_violation())
    }

    pub fn notes(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(|d| !d.is_violation())
    }
}
