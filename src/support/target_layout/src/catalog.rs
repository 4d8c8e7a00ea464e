use crate::{CatalogError, CatalogErrorKind, TargetLayout, TypeLayout};
use data_units::ByteUnits;
use indexmap::IndexMap;
use target::MachineProfile;

/// Registry of primitive type layouts for a single machine profile
#[derive(Clone, Debug)]
pub struct TypeCatalog {
    profile: MachineProfile,
    types: IndexMap<String, TypeLayout>,
}

impl TypeCatalog {
    /// Creates a catalog pre-populated with the C primitive types of `profile`.
    ///
    /// Fails if the profile gives any primitive an alignment that is zero or
    /// not a power of two.
    pub fn new(profile: MachineProfile) -> Result<Self, CatalogError> {
        let mut catalog = Self::empty(profile);

        let char = profile.char_layout();
        let short = profile.short_layout();
        let int = profile.int_layout();
        let long = profile.long_layout();
        let longlong = profile.longlong_layout();
        let size = profile.size_layout();

        let builtins = [
            (&["char", "signed char", "unsigned char", "int8_t", "uint8_t"][..], char),
            (&["_Bool", "bool"][..], profile.bool_layout()),
            (
                &["short", "unsigned short", "int16_t", "uint16_t"][..],
                short,
            ),
            (
                &["int", "signed", "unsigned", "unsigned int", "int32_t", "uint32_t"][..],
                int,
            ),
            (&["long", "unsigned long"][..], long),
            (
                &["long long", "unsigned long long", "int64_t", "uint64_t"][..],
                longlong,
            ),
            (&["float"][..], profile.float_layout()),
            (&["double"][..], profile.double_layout()),
            (&["long double"][..], profile.long_double_layout()),
            (&["enum"][..], profile.enum_layout()),
            (
                &["size_t", "ssize_t", "ptrdiff_t", "intptr_t", "uintptr_t"][..],
                size,
            ),
            (&["void*", "pointer"][..], profile.pointer_layout()),
        ];

        for (names, layout) in builtins {
            for name in names {
                catalog.register(name, layout)?;
            }
        }

        Ok(catalog)
    }

    /// Creates a catalog with no registered types
    pub fn empty(profile: MachineProfile) -> Self {
        Self {
            profile,
            types: IndexMap::new(),
        }
    }

    pub fn profile(&self) -> &MachineProfile {
        &self.profile
    }

    pub fn describe(&self, type_name: &str) -> Result<TypeLayout, CatalogError> {
        self.types
            .get(type_name)
            .copied()
            .ok_or_else(|| CatalogErrorKind::UnknownType.at(type_name))
    }

    /// Registers (or replaces) a named type layout
    pub fn register(
        &mut self,
        type_name: impl ToString,
        layout: TypeLayout,
    ) -> Result<(), CatalogError> {
        let type_name = type_name.to_string();

        if !is_valid_alignment(layout.alignment) {
            return Err(CatalogErrorKind::InvalidAlignment {
                alignment: layout.alignment,
            }
            .at(type_name));
        }

        self.types.insert(type_name, layout);
        Ok(())
    }

    pub fn array_of(&self, type_name: &str, length: u64) -> Result<TypeLayout, CatalogError> {
        self.describe(type_name)?
            .array_of(length)
            .ok_or_else(|| CatalogErrorKind::SizeOverflow { length }.at(type_name))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeLayout)> {
        self.types.iter().map(|(name, layout)| (name.as_str(), layout))
    }
}

fn is_valid_alignment(alignment: ByteUnits) -> bool {
    !alignment.is_zero() && alignment.is_power_of_2()
}
