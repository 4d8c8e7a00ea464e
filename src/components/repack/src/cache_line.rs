use crate::{flatten, units::Unit};
use aggregate::Aggregate;
use build_layout::{LayoutEngine, LayoutError, LayoutResult};
use data_units::ByteUnits;
use indexmap::IndexMap;

/// Counts groups whose members span more than one cache line
pub fn cache_line_straddles(
    aggregate: &Aggregate,
    layout: &LayoutResult,
    cache_line_size: ByteUnits,
) -> usize {
    if cache_line_size.is_zero() {
        return 0;
    }

    let mut spans = IndexMap::<&str, (ByteUnits, ByteUnits)>::new();

    for (member, member_layout) in aggregate.members.iter().zip(&layout.members) {
        let Some(group) = member.group() else {
            continue;
        };

        let start = member_layout.offset;
        let end = member_layout.offset + member_layout.width;

        spans
            .entry(group)
            .and_modify(|span| {
                span.0 = span.0.min(start);
                span.1 = span.1.max(end);
            })
            .or_insert((start, end));
    }

    spans
        .values()
        .filter(|(start, end)| {
            end > start && *start / cache_line_size != (*end - ByteUnits::ONE) / cache_line_size
        })
        .count()
}

/// Swaps grouped units with other units of the same alignment when that keeps
/// more groups inside a single cache line without growing the aggregate
pub fn spread_groups(
    engine: &LayoutEngine,
    original: &Aggregate,
    units: &mut [Unit],
    mut candidate: Aggregate,
    mut layout: LayoutResult,
) -> Result<(Aggregate, LayoutResult), LayoutError> {
    let cache_line_size = engine.profile().cache_line_size;
    let mut straddles = cache_line_straddles(&candidate, &layout, cache_line_size);

    for i in 0..units.len() {
        if straddles == 0 {
            break;
        }

        if !units[i].is_grouped {
            continue;
        }

        for j in 0..units.len() {
            if j == i || units[j].alignment != units[i].alignment {
                continue;
            }

            units.swap(i, j);

            let trial = original.reordered(&flatten(units));
            let trial_layout = engine.compute_layout(&trial)?;
            let trial_straddles = cache_line_straddles(&trial, &trial_layout, cache_line_size);

            if trial_layout.size <= layout.size && trial_straddles < straddles {
                candidate = trial;
                layout = trial_layout;
                straddles = trial_straddles;
                break;
            }

            units.swap(i, j);
        }
    }

    Ok((candidate, layout))
}
