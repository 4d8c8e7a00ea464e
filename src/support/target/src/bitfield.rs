use derive_more::IsVariant;

/// Order in which bitfields are allocated inside their storage unit.
///
/// This is compiler-defined, so it is always an explicit part of the profile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, IsVariant)]
pub enum BitfieldDirection {
    #[default]
    LowToHigh,
    HighToLow,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitfieldPolicy {
    pub direction: BitfieldDirection,

    // Restart a bitfield of at most 8 bits on the next byte instead of
    // letting it straddle a byte boundary
    pub avoid_byte_straddle: bool,
}

impl BitfieldPolicy {
    pub const LOW_TO_HIGH: Self = Self {
        direction: BitfieldDirection::LowToHigh,
        avoid_byte_straddle: false,
    };

    pub const HIGH_TO_LOW: Self = Self {
        direction: BitfieldDirection::HighToLow,
        avoid_byte_straddle: false,
    };

    pub const fn avoiding_byte_straddle(self) -> Self {
        Self {
            avoid_byte_straddle: true,
            ..self
        }
    }
}
