mod cache_line;
mod units;


use aggregate::Aggregate;
use build_layout::{LayoutEngine, LayoutError, LayoutResult};
pub use cache_line::cache_line_straddles;
use data_units::ByteUnits;
use itertools::Itertools;
use std::{cmp::Reverse, fmt::Display};
use units::{Unit, build_units};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RepackConstraints {
    /// Members sharing a group tag stay contiguous and in their original order
    pub preserve_groups: bool,

    /// Prefer keeping each group within one cache line, without growing the aggregate
    pub cache_line_hint: bool,
}

/// Outcome of repacking an aggregate
#[derive(Clone, Debug, PartialEq)]
pub struct Repacked {
    pub aggregate: Aggregate,
    pub savings: ByteUnits,
    pub before: LayoutResult,
    pub after: LayoutResult,
    pub straddles_before: usize,
    pub straddles_after: usize,
}

impl Repacked {
    pub fn is_reordered(&self) -> bool {
        self.before
            .members
            .iter()
            .map(|member| &member.name)
            .ne(self.after.members.iter().map(|member| &member.name))
    }

    pub fn waste_before_percent(&self) -> f64 {
        self.before.waste_percent()
    }

    pub fn waste_after_percent(&self) -> f64 {
        self.after.waste_percent()
    }
}

/// Reorders members by descending alignment to minimize padding.
///
/// The input aggregate is left untouched. The returned order is never larger
/// than the original: if the constraints make the sorted order worse, the
/// original order is kept.
pub fn repack(
    engine: &LayoutEngine,
    aggregate: &Aggregate,
    constraints: RepackConstraints,
) -> Result<Repacked, LayoutError> {
    let before = engine.compute_layout(aggregate)?;
    let cache_line_size = engine.profile().cache_line_size;
    let straddles_before = cache_line_straddles(aggregate, &before, cache_line_size);

    // Member order cannot change the size of these
    if aggregate.kind.is_union() || aggregate.is_packed {
        return Ok(Repacked {
            aggregate: aggregate.clone(),
            savings: ByteUnits::ZERO,
            after: before.clone(),
            before,
            straddles_before,
            straddles_after: straddles_before,
        });
    }

    let mut units = build_units(engine, aggregate, constraints.preserve_groups)?;
    sort_units(&mut units, constraints);

    let mut candidate = aggregate.reordered(&flatten(&units));
    let mut after = engine.compute_layout(&candidate)?;

    if constraints.preserve_groups && constraints.cache_line_hint {
        (candidate, after) =
            cache_line::spread_groups(engine, aggregate, &mut units, candidate, after)?;
    }

    if after.size > before.size {
        candidate = aggregate.clone();
        after = before.clone();
    }

    let straddles_after = cache_line_straddles(&candidate, &after, cache_line_size);

    Ok(Repacked {
        aggregate: candidate,
        savings: before.size - after.size,
        before,
        after,
        straddles_before,
        straddles_after,
    })
}

fn sort_units(units: &mut [Unit], constraints: RepackConstraints) {
    let cluster = constraints.cache_line_hint && !constraints.preserve_groups;

    units.sort_by_key(|unit| {
        let position = if cluster {
            unit.group_leader.unwrap_or(unit.leader)
        } else {
            unit.leader
        };

        (Reverse(unit.alignment), position)
    });
}

pub(crate) fn flatten(units: &[Unit]) -> Vec<usize> {
    units
        .iter()
        .flat_map(|unit| unit.members.iter().copied())
        .collect()
}

impl Display for Repacked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} {}: {}",
            self.aggregate.kind,
            self.aggregate.name,
            self.aggregate.member_names().join(", ")
        )?;

        write!(
            f,
            "size {} -> {}, saved {} (waste {:.1}% -> {:.1}%)",
            self.before.size.bytes(),
            self.after.size.bytes(),
            self.savings,
            self.waste_before_percent(),
            self.waste_after_percent()
        )
    }
}
