use crate::MemberType;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    pub name: String,
    pub ty: MemberType,
    pub bit_width: Option<u32>,

    // Opaque tag only used when repacking
    pub group: Option<String>,
}

impl Member {
    pub fn new(name: impl ToString, ty: MemberType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            bit_width: None,
            group: None,
        }
    }

    pub fn scalar(name: impl ToString, type_name: impl ToString) -> Self {
        Self::new(name, MemberType::scalar(type_name))
    }

    pub fn pointer(name: impl ToString, pointee: MemberType) -> Self {
        Self::new(name, MemberType::pointer_to(pointee))
    }

    pub fn array(name: impl ToString, element: MemberType, length: u64) -> Self {
        Self::new(name, MemberType::array_of(element, length))
    }

    pub fn record(name: impl ToString, record_name: impl ToString) -> Self {
        Self::new(name, MemberType::record(record_name))
    }

    pub fn bitfield(name: impl ToString, type_name: impl ToString, bit_width: u32) -> Self {
        Self {
            bit_width: Some(bit_width),
            ..Self::scalar(name, type_name)
        }
    }

    pub fn in_group(self, group: impl ToString) -> Self {
        Self {
            group: Some(group.to_string()),
            ..self
        }
    }

    pub fn is_bitfield(&self) -> bool {
        self.bit_width.is_some()
    }

    /// Group tag, treating an empty tag as no group
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref().filter(|group| !group.is_empty())
    }
}
