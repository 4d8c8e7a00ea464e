use crate::{LayoutResult, MemberLayout, PaddingKind, PaddingRegion};
use data_units::ByteUnits;
use itertools::Itertools;
use std::fmt::Display;

enum Row<'a> {
    Member(&'a MemberLayout),
    Padding(&'a PaddingRegion),
}

impl Row<'_> {
    fn position(&self) -> u64 {
        match self {
            Row::Member(member) => member.bit_range().start,
            Row::Padding(padding) => padding.offset.bits(),
        }
    }
}

impl Display for Row<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Row::Member(member) => match member.bitfield {
                Some(bitfield) => write!(
                    f,
                    "{:>6}:{:<2} {} ({} of {}-byte unit)",
                    member.offset.bytes(),
                    bitfield.bit_offset.bits(),
                    member.name,
                    bitfield.bit_width,
                    member.width.bytes(),
                ),
                None => write!(
                    f,
                    "{:>6}    {} ({})",
                    member.offset.bytes(),
                    member.name,
                    member.width
                ),
            },
            Row::Padding(padding) => match padding.kind {
                PaddingKind::Bytes => write!(
                    f,
                    "{:>6}    <padding> ({})",
                    padding.offset.bytes_ceil().bytes(),
                    padding.length.bytes_ceil()
                ),
                PaddingKind::Bits { unit } => write!(
                    f,
                    "{:>6}:{:<2} <padding> ({})",
                    unit.bytes(),
                    (padding.offset - unit.to_bits()).bits(),
                    padding.length
                ),
            },
        }
    }
}

impl Display for LayoutResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: size {}, alignment {}",
            self.kind,
            self.name,
            self.size.bytes(),
            self.alignment.bytes()
        )?;

        if self.is_packed {
            write!(f, " (packed)")?;
        }

        writeln!(f)?;

        let rows = self
            .members
            .iter()
            .map(Row::Member)
            .chain(self.padding.iter().map(Row::Padding))
            .sorted_by_key(Row::position);

        for row in rows {
            writeln!(f, "{row}")?;
        }

        write!(
            f,
            "waste: {} of {} bits ({:.1}%)",
            self.padding_bits().bits(),
            self.size.to_bits().bits(),
            self.waste_percent()
        )
    }
}

impl LayoutResult {
    /// Byte size this aggregate would have with no padding at all
    pub fn minimum_size(&self) -> ByteUnits {
        self.occupied_bits().bytes_ceil()
    }
}
