use crate::{LayoutEngine, LayoutError, LayoutErrorKind, LayoutResult};
use aggregate::{Aggregate, MemberType};
use diagnostics::Location;
use itertools::Itertools;
use std::{borrow::Cow, fmt::Display, ops::Range};

/// Dotted path to a (possibly nested) member, such as `header.tag`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberPath {
    segments: Vec<String>,
}

impl MemberPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for MemberPath {
    fn from(value: &str) -> Self {
        Self {
            segments: value.split('.').map(str::to_string).collect(),
        }
    }
}

impl Display for MemberPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.iter().join("."))
    }
}

/// Claim that two members never share any storage
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DisjointAssertion {
    pub first: MemberPath,
    pub second: MemberPath,
}

impl DisjointAssertion {
    pub fn new(first: impl Into<MemberPath>, second: impl Into<MemberPath>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl<'env> LayoutEngine<'env> {
    /// Checks that members asserted to be disjoint really occupy disjoint bits.
    ///
    /// This is opt-in and best effort: it only knows about the asserted pairs
    /// and does not descend into arrays.
    pub fn check_disjoint(
        &self,
        aggregate: &Aggregate,
        assertions: &[DisjointAssertion],
    ) -> Result<(), LayoutError> {
        let layout = self.compute_layout(aggregate)?;

        for assertion in assertions {
            let first = self.bit_range_of(aggregate, &layout, &assertion.first)?;
            let second = self.bit_range_of(aggregate, &layout, &assertion.second)?;

            let overlaps = !first.is_empty()
                && !second.is_empty()
                && first.start < second.end
                && second.start < first.end;

            if overlaps {
                return Err(LayoutErrorKind::IncompatibleUnionLayout {
                    first: assertion.first.to_string(),
                    second: assertion.second.to_string(),
                }
                .at(Location::record(&aggregate.name)));
            }
        }

        Ok(())
    }

    fn bit_range_of(
        &self,
        aggregate: &Aggregate,
        layout: &LayoutResult,
        path: &MemberPath,
    ) -> Result<Range<u64>, LayoutError> {
        let unknown_path = || {
            LayoutErrorKind::UnknownMemberPath {
                path: path.to_string(),
            }
            .at(Location::record(&aggregate.name))
        };

        let mut base = 0;
        let mut current_aggregate = aggregate;
        let mut current_layout = Cow::Borrowed(layout);

        let Some((last, parents)) = path.segments().split_last() else {
            return Err(unknown_path());
        };

        for segment in parents {
            let member_layout = current_layout.member(segment).ok_or_else(unknown_path)?;
            base += member_layout.offset.to_bits().bits();

            let member = current_aggregate.find(segment).ok_or_else(unknown_path)?;

            let MemberType::Record(record_name) = &member.ty else {
                return Err(unknown_path());
            };

            current_aggregate = self.records().get(record_name).ok_or_else(unknown_path)?;
            current_layout = Cow::Owned(self.compute_layout(current_aggregate)?);
        }

        let range = current_layout.member(last).ok_or_else(unknown_path)?.bit_range();
        Ok(base + range.start..base + range.end)
    }
}
