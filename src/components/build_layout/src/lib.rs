mod error;
mod layout_result;
mod record_layout;
mod report;
mod type_layout_cache;
mod union_check;


use aggregate::{Aggregate, Member, Records};
use diagnostics::{Diagnostics, Location};
pub use error::{LayoutError, LayoutErrorKind};
pub use layout_result::{
    BitfieldPlacement, LayoutResult, MemberLayout, PaddingKind, PaddingRegion,
};
pub use record_layout::{Allocation, BitfieldAllocator, MAX_OBJECT_SIZE, RecordLayoutBuilder};
use target::MachineProfile;
use target_layout::{TypeCatalog, TypeLayout};
pub use type_layout_cache::TypeLayoutCache;
pub use union_check::{DisjointAssertion, MemberPath};

/// Computes layouts of aggregates for the catalog's machine profile.
///
/// An engine memoizes nested record layouts and is meant to be used from a
/// single thread. To lay out aggregates in parallel, give each worker its own
/// engine over the same catalog and records.
#[derive(Debug)]
pub struct LayoutEngine<'env> {
    cache: TypeLayoutCache<'env>,
}

impl<'env> LayoutEngine<'env> {
    pub fn new(
        catalog: &'env TypeCatalog,
        records: &'env Records,
        diagnostics: &'env Diagnostics,
    ) -> Self {
        Self {
            cache: TypeLayoutCache::new(catalog, records, diagnostics),
        }
    }

    pub fn profile(&self) -> &MachineProfile {
        self.cache.catalog.profile()
    }

    pub fn catalog(&self) -> &'env TypeCatalog {
        self.cache.catalog
    }

    pub fn records(&self) -> &'env Records {
        self.cache.records
    }

    pub fn diagnostics(&self) -> &'env Diagnostics {
        self.cache.diagnostics
    }

    /// Lays out `aggregate` with its members in declared order
    pub fn compute_layout(&self, aggregate: &Aggregate) -> Result<LayoutResult, LayoutError> {
        RecordLayoutBuilder::generate(&self.cache, aggregate, &mut self.visiting_from(aggregate))
    }

    /// Layout of a single member's type as seen from inside `aggregate`
    pub fn member_type_layout(
        &self,
        aggregate: &Aggregate,
        member: &Member,
    ) -> Result<TypeLayout, LayoutError> {
        let mut visiting = self.visiting_from(aggregate);

        self.cache.resolve(
            &member.ty,
            &Location::member(&aggregate.name, &member.name),
            &mut visiting,
        )
    }

    // A top-level aggregate is only the record of the same name when it is
    // exactly what is registered under that name. An unrelated aggregate that
    // shares the name must not make references to that record look cyclic.
    fn visiting_from(&self, aggregate: &Aggregate) -> Vec<String> {
        match self.records().get(&aggregate.name) {
            Some(registered) if registered == aggregate => vec![aggregate.name.clone()],
            _ => Vec::new(),
        }
    }
}
