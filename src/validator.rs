//! Validation of a decoded directory against the schema and a class profile.

use crate::error::SchemaError;
use crate::ifd::{Origin, RawEntry, ResolvedEntry, ResolvedIfd};
use crate::profile::{ImageClass, ProfileMatch, ProfileSet};
use crate::report::{Diagnostic, ValidationReport};
use crate::resolver::Resolver;
use crate::schema::TagSchemaTable;

/// Checks decoded IFD entries against a schema table and one of the
/// baseline image class profiles.
///
/// A validator borrows its table, builds the profile projection once, and
/// holds no other state: `validate` may be called from any number of
/// threads at once, each call owning its own directory.
pub struct Validator<'a> {
    table: &'a TagSchemaTable,
    profiles: ProfileSet,
}

impl<'a> Validator<'a> {
    pub fn new(table: &'a TagSchemaTable) -> Result<Self, SchemaError> {
        Ok(Validator {
            profiles: ProfileSet::new(table)?,
            table,
        })
    }

    /// The profile projection this validator detects against.
    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    /// Validate one directory snapshot.
    ///
    /// Never fails for malformed input; every problem with the entries ends
    /// up in the report. The pass is deterministic: per-entry findings in
    /// input order, then profile findings in ascending tag order.
    pub fn validate(&self, entries: &[RawEntry], profile: Option<ImageClass>) -> ValidationReport {
        let resolver = Resolver::new(self.table);
        let mut ifd = ResolvedIfd::empty();

        // Populate the directory up front. Dependent counts must see the
        // whole directory: entries are sorted by tag id on disk, which puts
        // BitsPerSample (258) before the SamplesPerPixel (277) it depends
        // on, so a running prefix would misresolve every RGB image.
        for entry in entries {
            if self.table.lookup(entry.tag).is_some() {
                ifd.insert(
                    entry.tag,
                    ResolvedEntry::new(entry.value.clone(), Origin::Raw),
                );
            }
        }

        let mut diagnostics = Vec::new();

        for entry in entries {
            let Some(desc) = self.table.lookup(entry.tag) else {
                diagnostics.push(Diagnostic::UnknownTag { tag: entry.tag });
                continue;
            };

            if !desc.accepts(entry.type_) {
                diagnostics.push(Diagnostic::TypeMismatch {
                    tag: entry.tag,
                    expected: desc.types().to_vec(),
                    actual: entry.type_,
                });
            }

            match resolver.resolve_count(desc, &ifd) {
                Ok(Some(expected)) => {
                    let actual = entry.value.count();
                    if expected != actual {
                        diagnostics.push(Diagnostic::CountMismatch {
                            tag: entry.tag,
                            expected,
                            actual,
                        });
                    }
                }
                Ok(None) => {}
                Err(err) => diagnostics.push(err.into()),
            }
        }

        let profile = match profile {
            Some(class) => Some(class),
            None => match self.profiles.detect(&ifd) {
                ProfileMatch::Match(class) => Some(class),
                ProfileMatch::Ambiguous(candidates) => {
                    diagnostics.push(Diagnostic::AmbiguousProfile { candidates });
                    None
                }
                ProfileMatch::NoMatch => None,
            },
        };

        if let Some(class) = profile {
            self.check_required(class, &resolver, &mut ifd, &mut diagnostics);
        }

        let passed = !diagnostics.iter().any(Diagnostic::is_violation);
        ValidationReport::new(passed, profile, ifd, diagnostics)
    }

    /// Fill defaults for the class's absent tags and flag the rest.
    fn check_required(
        &self,
        class: ImageClass,
        resolver: &Resolver<'_>,
        ifd: &mut ResolvedIfd,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for tag in self.profiles.required_tags(class) {
            let id = tag.to_u16();
            if ifd.contains(id) {
                continue;
            }

            // Profile construction verified membership in the table.
            let Some(desc) = self.table.lookup(id) else {
                continue;
            };

            match resolver.resolve_default(desc, ifd) {
                Ok(Some(value)) => {
                    ifd.insert(id, ResolvedEntry::new(value.clone(), Origin::Synthesized));
                    diagnostics.push(Diagnostic::DefaultApplied { tag: id, value });
                }
                Ok(None) => diagnostics.push(Diagnostic::MissingRequiredTag { tag: id }),
                Err(err) => {
                    // The default exists but was not computable for this
                    // directory; the tag is still missing.
                    diagnostics.push(err.into());
                    diagnostics.push(Diagnostic::MissingRequiredTag { tag: id });
                }
            }
        }
    }
}
