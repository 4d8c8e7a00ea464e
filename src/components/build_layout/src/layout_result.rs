use aggregate::AggregateKind;
use data_units::{BitUnits, ByteUnits};
use derive_more::IsVariant;
use std::ops::Range;

/// Where a bitfield's bits live inside its storage unit
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitfieldPlacement {
    /// Index of the lowest bit, counted from the least significant bit of the unit
    pub bit_offset: BitUnits,
    pub bit_width: BitUnits,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberLayout {
    pub name: String,

    /// Byte offset of the member, or of its storage unit for bitfields
    pub offset: ByteUnits,

    /// Size of the member, or of its storage unit for bitfields
    pub width: ByteUnits,

    pub alignment: ByteUnits,
    pub bitfield: Option<BitfieldPlacement>,
}

impl MemberLayout {
    pub fn is_bitfield(&self) -> bool {
        self.bitfield.is_some()
    }

    /// Bits the member itself occupies
    pub fn data_bits(&self) -> BitUnits {
        self.bitfield
            .map_or(self.width.to_bits(), |bitfield| bitfield.bit_width)
    }

    /// Absolute bit range, using the storage unit's bit numbering for bitfields
    pub fn bit_range(&self) -> Range<u64> {
        let start = self.offset.to_bits()
            + self
                .bitfield
                .map_or(BitUnits::ZERO, |bitfield| bitfield.bit_offset);

        start.bits()..(start + self.data_bits()).bits()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum PaddingKind {
    /// Whole bytes inserted for alignment, including trailing padding
    Bytes,

    /// Unused bits inside the bitfield storage unit starting at `unit`
    Bits { unit: ByteUnits },
}

/// Filler whose contents are unspecified
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaddingRegion {
    pub offset: BitUnits,
    pub length: BitUnits,
    pub kind: PaddingKind,
}

impl PaddingRegion {
    pub fn bytes(offset: ByteUnits, length: ByteUnits) -> Self {
        Self {
            offset: offset.to_bits(),
            length: length.to_bits(),
            kind: PaddingKind::Bytes,
        }
    }

    pub fn bits(unit: ByteUnits, bit_offset: BitUnits, length: BitUnits) -> Self {
        Self {
            offset: unit.to_bits() + bit_offset,
            length,
            kind: PaddingKind::Bits { unit },
        }
    }

    pub fn end(&self) -> BitUnits {
        self.offset + self.length
    }
}

/// The computed layout of one aggregate
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutResult {
    pub name: String,
    pub kind: AggregateKind,
    pub is_packed: bool,
    pub members: Vec<MemberLayout>,
    pub padding: Vec<PaddingRegion>,
    pub size: ByteUnits,
    pub alignment: ByteUnits,
}

impl LayoutResult {
    pub fn member(&self, name: &str) -> Option<&MemberLayout> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Bits occupied by member data: the sum of all members for structs, the
    /// largest member for unions
    pub fn occupied_bits(&self) -> BitUnits {
        match self.kind {
            AggregateKind::Struct => self.members.iter().map(MemberLayout::data_bits).sum(),
            AggregateKind::Union => self
                .members
                .iter()
                .map(|member| member.width.to_bits())
                .max()
                .unwrap_or_default(),
        }
    }

    pub fn padding_bits(&self) -> BitUnits {
        self.padding.iter().map(|padding| padding.length).sum()
    }

    /// Number of whole padding bytes, ignoring padding bits inside bitfield units
    pub fn padding_bytes(&self) -> ByteUnits {
        self.padding
            .iter()
            .filter(|padding| padding.kind.is_bytes())
            .map(|padding| padding.length.bytes_ceil())
            .sum()
    }

    /// Percentage of the total size taken up by padding
    pub fn waste_percent(&self) -> f64 {
        if self.size.is_zero() {
            return 0.0;
        }

        self.padding_bits().bits() as f64 * 100.0 / self.size.to_bits().bits() as f64
    }
}
