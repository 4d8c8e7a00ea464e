use data_units::ByteUnits;
use derive_more::IsVariant;

/// What kind of thing a layout describes, which decides what it may be used for
/// (only integers can underlie a bitfield)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum TypeClass {
    Integer,
    Float,
    Pointer,
    Array,
    Record,
    Opaque,
}

/// Size and alignment of a type
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeLayout {
    pub width: ByteUnits,
    pub alignment: ByteUnits,
    pub class: TypeClass,
}

impl TypeLayout {
    pub const fn new(width: ByteUnits, alignment: ByteUnits, class: TypeClass) -> Self {
        Self {
            width,
            alignment,
            class,
        }
    }

    /// Self-aligned integer
    pub const fn integer(size: ByteUnits) -> Self {
        Self::new(size, size, TypeClass::Integer)
    }

    pub const fn float(size: ByteUnits, alignment: ByteUnits) -> Self {
        Self::new(size, alignment, TypeClass::Float)
    }

    pub const fn pointer(size: ByteUnits) -> Self {
        Self::new(size, size, TypeClass::Pointer)
    }

    pub const fn record(size: ByteUnits, alignment: ByteUnits) -> Self {
        Self::new(size, alignment, TypeClass::Record)
    }

    pub const fn opaque(size: ByteUnits, alignment: ByteUnits) -> Self {
        Self::new(size, alignment, TypeClass::Opaque)
    }

    /// Layout of `[Self; length]`, or `None` if its size overflows.
    /// Zero-length arrays keep the element alignment.
    pub fn array_of(&self, length: u64) -> Option<Self> {
        let width = self.width.checked_mul(length)?;
        Some(Self::new(width, self.alignment, TypeClass::Array))
    }
}
