use quick_error::quick_error;

quick_error! {
    /// A defect in a tag schema table, detected while the table is built.
    ///
    /// These are configuration errors: a table that fails to build must not
    /// be used, so none of them ever surface during validation of an IFD.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SchemaError {
        /// Two descriptors share a tag id.
        DuplicateTag(tag: u16) {
            display("tag {} is registered more than once", tag)
        }
        /// A descriptor accepts no value types at all.
        EmptyTypeSet(tag: u16) {
            display("tag {} accepts no value types", tag)
        }
        /// A dependent count or default names a tag the table does not define.
        MissingDependency(tag: u16, dependency: u16) {
            display("tag {} depends on tag {}, which is not in the table", tag, dependency)
        }
        /// The static dependency graph contains a cycle.
        DependencyCycle(chain: Vec<u16>) {
            display("tag dependencies form a cycle: {:?}", chain)
        }
        /// An image class profile requires a tag the table does not define.
        UnknownProfileTag(profile: &'static str, tag: u16) {
            display("profile {} requires tag {}, which is not in the table", profile, tag)
        }
    }
}

quick_error! {
    /// Failure to compute a dependent count or default for one concrete IFD.
    ///
    /// Unlike [`SchemaError`] these describe the directory under validation,
    /// not the schema; the validator folds them into the report instead of
    /// returning them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ResolveError {
        /// The dependency tag is neither present in the IFD nor defaultable.
        UnresolvedDependency(tag: u16, dependency: u16) {
            display("tag {} depends on tag {}, which is absent and has no default", tag, dependency)
        }
        /// The dependency value is not a usable scalar, or the computed
        /// result is not a representable non-negative integer.
        InvalidComputedValue(tag: u16, dependency: u16) {
            display("tag {} could not be computed from the value of tag {}", tag, dependency)
        }
    }
}
