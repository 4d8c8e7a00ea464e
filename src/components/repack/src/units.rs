use aggregate::Aggregate;
use build_layout::{LayoutEngine, LayoutError};
use data_units::ByteUnits;
use indexmap::IndexMap;

/// Members that move together when repacking, in their original relative order
#[derive(Clone, Debug)]
pub struct Unit {
    pub members: Vec<usize>,
    pub alignment: ByteUnits,

    // Index of the first member
    pub leader: usize,

    // Index of the first member sharing this unit's group tag, if tagged
    pub group_leader: Option<usize>,

    pub is_grouped: bool,
}

/// Splits the members of `aggregate` into units.
///
/// Consecutive bitfields over same-sized types always form one unit so that
/// their storage units are packed identically after reordering. With
/// `preserve_groups`, all members of a group also form one unit.
pub fn build_units(
    engine: &LayoutEngine,
    aggregate: &Aggregate,
    preserve_groups: bool,
) -> Result<Vec<Unit>, LayoutError> {
    let layouts = aggregate
        .members
        .iter()
        .map(|member| engine.member_type_layout(aggregate, member))
        .collect::<Result<Vec<_>, _>>()?;

    let mut sets = DisjointSets::new(aggregate.len());
    let mut group_leaders = IndexMap::<&str, usize>::new();

    for (i, member) in aggregate.members.iter().enumerate() {
        if let Some(group) = member.group() {
            let leader = *group_leaders.entry(group).or_insert(i);

            if preserve_groups {
                sets.join(leader, i);
            }
        }

        let continues_bitfield_run = i > 0
            && member.is_bitfield()
            && aggregate.members[i - 1].is_bitfield()
            && layouts[i - 1].width == layouts[i].width;

        if continues_bitfield_run {
            sets.join(i - 1, i);
        }
    }

    let mut units = IndexMap::<usize, Unit>::new();

    for (i, member) in aggregate.members.iter().enumerate() {
        let unit = units.entry(sets.find(i)).or_insert_with(|| Unit {
            members: Vec::new(),
            alignment: ByteUnits::ONE,
            leader: i,
            group_leader: None,
            is_grouped: false,
        });

        unit.members.push(i);
        unit.alignment = unit.alignment.max(layouts[i].alignment);

        if let Some(group) = member.group() {
            unit.group_leader = unit.group_leader.or(group_leaders.get(group).copied());
            unit.is_grouped |= preserve_groups;
        }
    }

    Ok(units.into_values().collect())
}

struct DisjointSets {
    parents: Vec<usize>,
}

impl DisjointSets {
    fn new(len: usize) -> Self {
        Self {
            parents: (0..len).collect(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parents[root] != root {
            root = self.parents[root];
        }

        let mut current = i;
        while self.parents[current] != root {
            let next = self.parents[current];
            self.parents[current] = root;
            current = next;
        }

        root
    }

    fn join(&mut self, a: usize, b: usize) {
        let a = self.find(a);
        let b = self.find(b);

        // Keep the earliest member as the root
        if a < b {
            self.parents[b] = a;
        } else {
            self.parents[a] = b;
        }
    }
}
