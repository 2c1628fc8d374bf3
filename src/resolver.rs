//! Resolution of dependent counts and defaults against one directory.

use crate::error::ResolveError;
use crate::ifd::{ResolvedIfd, Value};
use crate::schema::{CountSpec, DefaultSpec, TagDescriptor, TagSchemaTable};
use crate::tags::{Tag, Type};

/// Resolves a descriptor's effective count or default within the context of
/// one partially resolved directory.
///
/// Resolution only reads the table and the directory; it never mutates
/// either, and it terminates because the table's dependency graph is checked
/// to be acyclic when the table is built.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a TagSchemaTable,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a TagSchemaTable) -> Self {
        Resolver { table }
    }

    /// The number of elements a value for this tag must contain, or `None`
    /// when the schema leaves the count unconstrained.
    pub fn resolve_count(
        &self,
        desc: &TagDescriptor,
        ifd: &ResolvedIfd,
    ) -> Result<Option<u64>, ResolveError> {
        match *desc.count() {
            CountSpec::Any => Ok(None),
            CountSpec::Fixed(n) => Ok(Some(n)),
            CountSpec::DependsOn(dependency, f) => {
                let input = self.dependency_value(desc.id(), dependency, ifd)?;
                match f(input) {
                    Some(count) => Ok(Some(count)),
                    None => Err(ResolveError::InvalidComputedValue(
                        desc.id(),
                        dependency.to_u16(),
                    )),
                }
            }
        }
    }

    /// The value to substitute for this tag when it is absent, or `None`
    /// when the tag has no default and therefore stays mandatory.
    pub fn resolve_default(
        &self,
        desc: &TagDescriptor,
        ifd: &ResolvedIfd,
    ) -> Result<Option<Value>, ResolveError> {
        match desc.default() {
            None => Ok(None),
            Some(DefaultSpec::Fixed(value)) => Ok(Some(value.clone())),
            Some(&DefaultSpec::DependsOn(dependency, f)) => {
                let input = self.dependency_value(desc.id(), dependency, ifd)?;
                let computed = f(input).ok_or(ResolveError::InvalidComputedValue(
                    desc.id(),
                    dependency.to_u16(),
                ))?;
                self.materialize(desc, dependency, computed).map(Some)
            }
        }
    }

    /// Represent a computed default in the descriptor's first accepted type.
    fn materialize(
        &self,
        desc: &TagDescriptor,
        dependency: Tag,
        computed: u64,
    ) -> Result<Value, ResolveError> {
        let err = ResolveError::InvalidComputedValue(desc.id(), dependency.to_u16());
        match desc.primary_type() {
            Type::BYTE => u8::try_from(computed).map(Value::Byte).map_err(|_| err),
            Type::SHORT => u16::try_from(computed).map(Value::Short).map_err(|_| err),
            Type::LONG | Type::IFD => u32::try_from(computed).map(Value::Unsigned).map_err(|_| err),
            // No dependent computation yields a string, fraction or float.
            _ => Err(err),
        }
    }

    /// The numeric value of a dependency: the directory entry if present,
    /// otherwise the dependency's own default, resolved recursively.
    fn dependency_value(
        &self,
        tag: u16,
        dependency: Tag,
        ifd: &ResolvedIfd,
    ) -> Result<u64, ResolveError> {
        let dep_id = dependency.to_u16();

        if let Some(entry) = ifd.get(dep_id) {
            return entry
                .value()
                .as_scalar_u64()
                .ok_or(ResolveError::InvalidComputedValue(tag, dep_id));
        }

        let desc = self
            .table
            .lookup(dep_id)
            .ok_or(ResolveError::UnresolvedDependency(tag, dep_id))?;

        match self.resolve_default(desc, ifd)? {
            Some(value) => value
                .as_scalar_u64()
                .ok_or(ResolveError::InvalidComputedValue(tag, dep_id)),
            None => Err(ResolveError::UnresolvedDependency(tag, dep_id)),
        }
    }
}
