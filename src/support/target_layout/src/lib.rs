mod catalog;
mod error;
mod type_layout;

#[cfg(test)]
mod tests;

pub use catalog::TypeCatalog;
use data_units::ByteUnits;
pub use error::{CatalogError, CatalogErrorKind};
use target::{DataModel, MachineProfile};
pub use type_layout::{TypeClass, TypeLayout};

pub trait TargetLayout {
    fn pointer_layout(&self) -> TypeLayout;
    fn bool_layout(&self) -> TypeLayout;
    fn char_layout(&self) -> TypeLayout;
    fn short_layout(&self) -> TypeLayout;
    fn int_layout(&self) -> TypeLayout;
    fn long_layout(&self) -> TypeLayout;
    fn longlong_layout(&self) -> TypeLayout;
    fn float_layout(&self) -> TypeLayout;
    fn double_layout(&self) -> TypeLayout;
    fn long_double_layout(&self) -> TypeLayout;
    fn enum_layout(&self) -> TypeLayout;
    fn size_layout(&self) -> TypeLayout;
}

impl TargetLayout for MachineProfile {
    fn pointer_layout(&self) -> TypeLayout {
        TypeLayout::pointer(self.pointer_size)
    }

    fn bool_layout(&self) -> TypeLayout {
        TypeLayout::integer(ByteUnits::of(1))
    }

    fn char_layout(&self) -> TypeLayout {
        TypeLayout::integer(ByteUnits::of(1))
    }

    fn short_layout(&self) -> TypeLayout {
        TypeLayout::integer(ByteUnits::of(2))
    }

    fn int_layout(&self) -> TypeLayout {
        TypeLayout::integer(ByteUnits::of(4))
    }

    fn long_layout(&self) -> TypeLayout {
        TypeLayout::integer(self.long_size())
    }

    fn longlong_layout(&self) -> TypeLayout {
        TypeLayout::integer(ByteUnits::of(8))
    }

    fn float_layout(&self) -> TypeLayout {
        TypeLayout::float(ByteUnits::of(4), ByteUnits::of(4))
    }

    fn double_layout(&self) -> TypeLayout {
        let alignment = self
            .double_alignment_override
            .unwrap_or(ByteUnits::of(8));

        TypeLayout::float(ByteUnits::of(8), alignment)
    }

    fn long_double_layout(&self) -> TypeLayout {
        TypeLayout::float(self.long_double.size, self.long_double.alignment)
    }

    fn enum_layout(&self) -> TypeLayout {
        TypeLayout::integer(self.enum_size)
    }

    fn size_layout(&self) -> TypeLayout {
        match self.data_model {
            DataModel::Ilp32 => TypeLayout::integer(ByteUnits::of(4)),
            DataModel::Lp64 | DataModel::Llp64 => TypeLayout::integer(self.word_size),
        }
    }
}
