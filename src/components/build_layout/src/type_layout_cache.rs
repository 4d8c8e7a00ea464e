use crate::{
    LayoutError, LayoutErrorKind,
    record_layout::{MAX_OBJECT_SIZE, RecordLayoutBuilder},
};
use aggregate::{MemberType, Records};
use diagnostics::{Diagnostics, Location};
use once_map::unsync::OnceMap;
use target_layout::{TargetLayout, TypeCatalog, TypeLayout};

/// Resolves member types to layouts, laying out each referenced record once
#[derive(Debug)]
pub struct TypeLayoutCache<'env> {
    memo: OnceMap<String, Result<TypeLayout, LayoutError>>,
    pub catalog: &'env TypeCatalog,
    pub records: &'env Records,
    pub diagnostics: &'env Diagnostics,
}

impl<'env> TypeLayoutCache<'env> {
    pub fn new(
        catalog: &'env TypeCatalog,
        records: &'env Records,
        diagnostics: &'env Diagnostics,
    ) -> Self {
        Self {
            memo: OnceMap::new(),
            catalog,
            records,
            diagnostics,
        }
    }

    /// Resolves the layout of `ty` for the member at `location`.
    ///
    /// `visiting` lists the registered records currently being laid out, so
    /// that a record containing itself by value is reported instead of
    /// recursing forever.
    pub fn resolve(
        &self,
        ty: &MemberType,
        location: &Location,
        visiting: &mut Vec<String>,
    ) -> Result<TypeLayout, LayoutError> {
        let layout = match ty {
            MemberType::Scalar(name) => self.catalog.describe(name).map_err(|_| {
                LayoutErrorKind::UnknownType { name: name.clone() }.at(location.clone())
            })?,
            MemberType::Pointer(_) => self.catalog.profile().pointer_layout(),
            MemberType::Array { element, length } => self
                .resolve(element, location, visiting)?
                .array_of(*length)
                .ok_or_else(|| LayoutErrorKind::SizeOverflow.at(location.clone()))?,
            MemberType::Record(name) => self.get_record_layout(name, location, visiting)?,
        };

        if layout.width > MAX_OBJECT_SIZE {
            return Err(LayoutErrorKind::SizeOverflow.at(location.clone()));
        }

        Ok(layout)
    }

    fn get_record_layout(
        &self,
        name: &str,
        location: &Location,
        visiting: &mut Vec<String>,
    ) -> Result<TypeLayout, LayoutError> {
        if let Some(start) = visiting.iter().position(|record| record == name) {
            let mut path = visiting[start..].to_vec();
            path.push(name.to_string());
            return Err(LayoutErrorKind::CyclicDefinition { path }.at(location.clone()));
        }

        let Some(aggregate) = self.records.get(name) else {
            return Err(LayoutErrorKind::UnknownType {
                name: name.to_string(),
            }
            .at(location.clone()));
        };

        self.memo.map_insert_ref(
            name,
            |key| key.to_string(),
            |_| {
                visiting.push(name.to_string());
                let layout = RecordLayoutBuilder::generate(self, aggregate, visiting);
                visiting.pop();

                layout.map(|layout| TypeLayout::record(layout.size, layout.alignment))
            },
            |_k, v| v.clone(),
        )
    }
}
