use crate::PaddingRegion;
use data_units::{BitUnits, ByteUnits};
use target::{BitfieldDirection, BitfieldPolicy};

/// An open storage unit that consecutive bitfields are being packed into.
///
/// Bits are handed out in allocation order, which is mapped onto the unit's
/// bit numbering according to the profile's direction. A bitfield never
/// crosses the end of its unit.
#[derive(Clone, Debug)]
pub struct BitfieldAllocator {
    start: ByteUnits,
    unit_size: ByteUnits,
    bit_cursor: BitUnits,
    policy: BitfieldPolicy,
}

/// Bits given to one bitfield, plus any bits skipped to get there
#[derive(Copy, Clone, Debug)]
pub struct Allocation {
    pub bit_offset: BitUnits,
    pub skipped: Option<PaddingRegion>,
}

impl BitfieldAllocator {
    pub fn open(start: ByteUnits, unit_size: ByteUnits, policy: BitfieldPolicy) -> Self {
        Self {
            start,
            unit_size,
            bit_cursor: BitUnits::ZERO,
            policy,
        }
    }

    pub fn start(&self) -> ByteUnits {
        self.start
    }

    pub fn unit_size(&self) -> ByteUnits {
        self.unit_size
    }

    pub fn unit_bits(&self) -> BitUnits {
        self.unit_size.to_bits()
    }

    /// Whether a bitfield of `width` bits over a `unit_size` type can go in this unit
    pub fn can_fit(&self, unit_size: ByteUnits, width: BitUnits) -> bool {
        unit_size == self.unit_size && self.placement_for(width) + width <= self.unit_bits()
    }

    /// Allocates `width` bits, which must fit (see `can_fit`)
    pub fn allocate(&mut self, width: BitUnits) -> Allocation {
        let placement = self.placement_for(width);
        assert!(placement + width <= self.unit_bits());

        let skipped = (placement > self.bit_cursor)
            .then(|| self.padding(self.bit_cursor, placement - self.bit_cursor));

        let bit_offset = self.bit_index(placement, width);
        self.bit_cursor = placement + width;

        Allocation {
            bit_offset,
            skipped,
        }
    }

    /// Closes the unit, returning the byte offset just past it and the unused
    /// tail of the unit if there is one
    pub fn close(self) -> (ByteUnits, Option<PaddingRegion>) {
        let unused = self.unit_bits() - self.bit_cursor;
        let padding = (!unused.is_zero()).then(|| self.padding(self.bit_cursor, unused));
        (self.start + self.unit_size, padding)
    }

    // Position in allocation order where the next `width` bits would start
    fn placement_for(&self, width: BitUnits) -> BitUnits {
        let byte = BitUnits::of(8);

        if self.policy.avoid_byte_straddle
            && width <= byte
            && self.bit_cursor.bit_in_byte() + width.bits() > 8
        {
            self.bit_cursor.align_to(byte)
        } else {
            self.bit_cursor
        }
    }

    // Maps a range in allocation order to the index of its lowest bit in the unit
    fn bit_index(&self, placement: BitUnits, width: BitUnits) -> BitUnits {
        match self.policy.direction {
            BitfieldDirection::LowToHigh => placement,
            BitfieldDirection::HighToLow => self.unit_bits() - placement - width,
        }
    }

    fn padding(&self, placement: BitUnits, length: BitUnits) -> PaddingRegion {
        PaddingRegion::bits(self.start, self.bit_index(placement, length), length)
    }
}
