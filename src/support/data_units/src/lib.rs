
use derive_more::{Add, AddAssign, Sub, SubAssign, Sum};
use std::{
    fmt::Display,
    ops::{Div, Mul, Rem},
};

/// A quantity of bytes, used for sizes, offsets and alignments
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Add, AddAssign, Sub, SubAssign, Sum,
)]
pub struct ByteUnits {
    units: u64,
}

impl ByteUnits {
    pub const ZERO: Self = Self { units: 0 };
    pub const ONE: Self = Self { units: 1 };

    pub const fn of(value: u64) -> Self {
        Self { units: value }
    }

    pub const fn bytes(&self) -> u64 {
        self.units
    }

    pub const fn to_bits(self) -> BitUnits {
        BitUnits::of(self.units * 8)
    }

    /// Like `to_bits`, but `None` when the bit count does not fit in a `u64`
    pub const fn checked_to_bits(self) -> Option<BitUnits> {
        match self.units.checked_mul(8) {
            Some(bits) => Some(BitUnits::of(bits)),
            None => None,
        }
    }
}

/// A quantity of bits, used for bitfield placement and bit-level padding
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Add, AddAssign, Sub, SubAssign, Sum,
)]
pub struct BitUnits {
    units: u64,
}

impl BitUnits {
    pub const ZERO: Self = Self { units: 0 };

    pub const fn of(value: u64) -> Self {
        Self { units: value }
    }

    pub const fn bits(&self) -> u64 {
        self.units
    }

    /// Number of whole bytes needed to hold these bits
    pub const fn bytes_ceil(self) -> ByteUnits {
        ByteUnits::of(self.units.div_ceil(8))
    }

    /// Index of the bit within its byte
    pub const fn bit_in_byte(self) -> u64 {
        self.units % 8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NotWholeBytes(pub BitUnits);

impl Display for NotWholeBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a whole number of bytes", self.0)
    }
}

impl std::error::Error for NotWholeBytes {}

impl TryFrom<BitUnits> for ByteUnits {
    type Error = NotWholeBytes;

    fn try_from(value: BitUnits) -> Result<Self, NotWholeBytes> {
        if value.bit_in_byte() == 0 {
            Ok(Self::of(value.bits() / 8))
        } else {
            Err(NotWholeBytes(value))
        }
    }
}

impl From<ByteUnits> for BitUnits {
    fn from(value: ByteUnits) -> Self {
        value.to_bits()
    }
}

macro_rules! impl_units_from {
    ($units:ty, $ty:ty) => {
        impl From<$ty> for $units {
            fn from(value: $ty) -> Self {
                Self {
                    units: value.into(),
                }
            }
        }
    };
}

impl_units_from!(ByteUnits, u8);
impl_units_from!(ByteUnits, u16);
impl_units_from!(ByteUnits, u32);
impl_units_from!(ByteUnits, u64);

impl_units_from!(BitUnits, u8);
impl_units_from!(BitUnits, u16);
impl_units_from!(BitUnits, u32);
impl_units_from!(BitUnits, u64);

macro_rules! impl_alignment_math_for {
    ($units:ty, $singular:literal, $plural:literal) => {
        impl $units {
            pub const fn is_zero(&self) -> bool {
                self.units == 0
            }

            pub const fn is_power_of_2(&self) -> bool {
                self.units.is_power_of_two()
            }

            /// Rounds up to the next multiple of `align`, which must be a power of two
            pub fn align_to(&self, align: $units) -> $units {
                let width = self.units;
                let align = align.units;

                assert!(align.is_power_of_two(), "alignment must be a power of two");
                Self::of((width + align - 1) & !(align - 1))
            }

            /// Like `align_to`, but `None` on overflow
            pub fn checked_align_to(&self, align: $units) -> Option<$units> {
                let align = align.units;

                assert!(align.is_power_of_two(), "alignment must be a power of two");
                self.units
                    .checked_add(align - 1)
                    .map(|width| Self::of(width & !(align - 1)))
            }

            pub const fn checked_add(self, rhs: $units) -> Option<$units> {
                match self.units.checked_add(rhs.units) {
                    Some(units) => Some(Self::of(units)),
                    None => None,
                }
            }

            pub const fn checked_mul(self, rhs: u64) -> Option<$units> {
                match self.units.checked_mul(rhs) {
                    Some(units) => Some(Self::of(units)),
                    None => None,
                }
            }

            /// Amount needed to reach the next multiple of `align`
            pub fn padding_to(&self, align: $units) -> $units {
                self.align_to(align) - *self
            }

            pub fn is_aligned_to(&self, align: $units) -> bool {
                self.padding_to(align).is_zero()
            }
        }

        impl Mul<u64> for $units {
            type Output = $units;

            fn mul(self, rhs: u64) -> Self::Output {
                Self::of(self.units * rhs)
            }
        }

        impl Div<$units> for $units {
            type Output = u64;

            fn div(self, rhs: $units) -> Self::Output {
                self.units / rhs.units
            }
        }

        impl Rem<$units> for $units {
            type Output = $units;

            fn rem(self, rhs: $units) -> Self::Output {
                Self::of(self.units % rhs.units)
            }
        }

        impl Display for $units {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if self.units == 1 {
                    write!(f, "1 {}", $singular)
                } else {
                    write!(f, "{} {}", self.units, $plural)
                }
            }
        }
    };
}

impl_alignment_math_for!(ByteUnits, "byte", "bytes");
impl_alignment_math_for!(BitUnits, "bit", "bits");
