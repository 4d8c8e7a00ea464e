mod bitfield;
mod builder;

pub use bitfield::{Allocation, BitfieldAllocator};
pub use builder::RecordLayoutBuilder;
use data_units::ByteUnits;

/// Largest size any member or aggregate may have.
///
/// Every bit offset inside an object of this size, plus one more storage unit,
/// still fits in a `u64`.
pub const MAX_OBJECT_SIZE: ByteUnits = ByteUnits::of(u64::MAX >> 5);
