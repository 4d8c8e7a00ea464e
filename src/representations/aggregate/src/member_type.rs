use std::fmt::Display;

/// Type reference of a member.
///
/// Scalars are looked up in the type catalog, records in the record registry.
/// Pointers are always pointer-sized and never look at their pointee, so
/// records may refer to themselves through them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberType {
    Scalar(String),
    Pointer(Box<MemberType>),
    Array { element: Box<MemberType>, length: u64 },
    Record(String),
}

impl MemberType {
    pub fn scalar(name: impl ToString) -> Self {
        Self::Scalar(name.to_string())
    }

    pub fn record(name: impl ToString) -> Self {
        Self::Record(name.to_string())
    }

    pub fn pointer_to(pointee: MemberType) -> Self {
        Self::Pointer(Box::new(pointee))
    }

    pub fn array_of(element: MemberType, length: u64) -> Self {
        Self::Array {
            element: Box::new(element),
            length,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl Display for MemberType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberType::Scalar(name) => write!(f, "{name}"),
            MemberType::Pointer(pointee) => write!(f, "{pointee}*"),
            MemberType::Array { element, length } => write!(f, "{element}[{length}]"),
            MemberType::Record(name) => write!(f, "{name}"),
        }
    }
}
