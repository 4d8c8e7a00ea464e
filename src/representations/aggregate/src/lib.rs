mod member;
mod member_type;
mod records;


use derive_more::IsVariant;
use itertools::Itertools;
pub use member::Member;
pub use member_type::MemberType;
pub use records::Records;
use std::fmt::Display;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, IsVariant)]
pub enum AggregateKind {
    #[default]
    Struct,
    Union,
}

impl Display for AggregateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AggregateKind::Struct => "struct",
            AggregateKind::Union => "union",
        })
    }
}

/// An ordered list of members laid out together as a struct or union
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aggregate {
    pub name: String,
    pub kind: AggregateKind,
    pub members: Vec<Member>,

    // Forces 1-byte alignment and removes all alignment padding
    pub is_packed: bool,
}

impl Aggregate {
    pub fn structure(name: impl ToString) -> Self {
        Self::new(name, AggregateKind::Struct)
    }

    pub fn union(name: impl ToString) -> Self {
        Self::new(name, AggregateKind::Union)
    }

    pub fn new(name: impl ToString, kind: AggregateKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            members: Vec::new(),
            is_packed: false,
        }
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = Member>) -> Self {
        self.members.extend(members);
        self
    }

    pub fn packed(self) -> Self {
        Self {
            is_packed: true,
            ..self
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Names that appear more than once, in order of first repetition
    pub fn duplicate_member_names(&self) -> Vec<&str> {
        self.members
            .iter()
            .map(|member| member.name.as_str())
            .duplicates()
            .collect()
    }

    /// Creates a copy of this aggregate with its members rearranged.
    ///
    /// `order` lists indices into the current member list and must be a
    /// permutation of them.
    pub fn reordered(&self, order: &[usize]) -> Self {
        assert_eq!(order.len(), self.members.len());

        Self {
            members: order.iter().map(|i| self.members[*i].clone()).collect(),
            ..self.clone()
        }
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|member| member.name.as_str())
    }
}
