mod bitfield;
mod data_model;
mod display;
mod from_str;

#[cfg(test)]
mod tests;

pub use bitfield::{BitfieldDirection, BitfieldPolicy};
use data_units::ByteUnits;
pub use data_model::DataModel;
pub use from_str::UnknownProfile;

/// Size and alignment of `long double`, which varies wildly between ABIs
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LongDoubleLayout {
    pub size: ByteUnits,
    pub alignment: ByteUnits,
}

/// Description of the machine and compiler policies a layout is computed for.
///
/// Profiles are plain immutable values. Every layout computation receives one
/// explicitly, so the same aggregate can be laid out for several targets side
/// by side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MachineProfile {
    pub name: &'static str,
    pub word_size: ByteUnits,
    pub pointer_size: ByteUnits,
    pub cache_line_size: ByteUnits,
    pub data_model: DataModel,
    pub long_double: LongDoubleLayout,
    pub enum_size: ByteUnits,
    pub bitfield: BitfieldPolicy,
    pub double_alignment_override: Option<ByteUnits>,
}

impl MachineProfile {
    /// x86_64 System V
    pub const LP64: Self = Self {
        name: "lp64",
        word_size: ByteUnits::of(8),
        pointer_size: ByteUnits::of(8),
        cache_line_size: ByteUnits::of(64),
        data_model: DataModel::Lp64,
        long_double: LongDoubleLayout {
            size: ByteUnits::of(16),
            alignment: ByteUnits::of(16),
        },
        enum_size: ByteUnits::of(4),
        bitfield: BitfieldPolicy::LOW_TO_HIGH,
        double_alignment_override: None,
    };

    /// Windows x64
    pub const LLP64: Self = Self {
        name: "llp64",
        data_model: DataModel::Llp64,
        long_double: LongDoubleLayout {
            size: ByteUnits::of(8),
            alignment: ByteUnits::of(8),
        },
        ..Self::LP64
    };

    /// Generic 32-bit machine with self-aligned 8-byte scalars
    pub const ILP32: Self = Self {
        name: "ilp32",
        word_size: ByteUnits::of(4),
        pointer_size: ByteUnits::of(4),
        cache_line_size: ByteUnits::of(64),
        data_model: DataModel::Ilp32,
        long_double: LongDoubleLayout {
            size: ByteUnits::of(8),
            alignment: ByteUnits::of(8),
        },
        enum_size: ByteUnits::of(4),
        bitfield: BitfieldPolicy::LOW_TO_HIGH,
        double_alignment_override: None,
    };

    /// 32-bit x86 System V, where `double` only needs 4-byte alignment
    pub const I386_SYSV: Self = Self {
        name: "i386",
        long_double: LongDoubleLayout {
            size: ByteUnits::of(12),
            alignment: ByteUnits::of(4),
        },
        double_alignment_override: Some(ByteUnits::of(4)),
        ..Self::ILP32
    };

    pub const PRESETS: [Self; 4] = [Self::LP64, Self::LLP64, Self::ILP32, Self::I386_SYSV];

    /// Starts a fully custom profile from a word and pointer size
    pub const fn custom(word_size: ByteUnits, pointer_size: ByteUnits) -> Self {
        Self {
            name: "custom",
            word_size,
            pointer_size,
            cache_line_size: ByteUnits::of(64),
            data_model: if word_size.bytes() >= 8 {
                DataModel::Lp64
            } else {
                DataModel::Ilp32
            },
            long_double: LongDoubleLayout {
                size: ByteUnits::of(8),
                alignment: ByteUnits::of(8),
            },
            enum_size: ByteUnits::of(4),
            bitfield: BitfieldPolicy::LOW_TO_HIGH,
            double_alignment_override: None,
        }
    }

    pub const fn with_cache_line_size(self, cache_line_size: ByteUnits) -> Self {
        Self {
            cache_line_size,
            ..self
        }
    }

    pub const fn with_data_model(self, data_model: DataModel) -> Self {
        Self { data_model, ..self }
    }

    pub const fn with_bitfield_direction(self, direction: BitfieldDirection) -> Self {
        Self {
            bitfield: BitfieldPolicy {
                direction,
                ..self.bitfield
            },
            ..self
        }
    }

    pub const fn with_bitfield_policy(self, bitfield: BitfieldPolicy) -> Self {
        Self { bitfield, ..self }
    }

    pub const fn with_double_alignment(self, alignment: ByteUnits) -> Self {
        Self {
            double_alignment_override: Some(alignment),
            ..self
        }
    }

    pub const fn with_long_double(self, size: ByteUnits, alignment: ByteUnits) -> Self {
        Self {
            long_double: LongDoubleLayout { size, alignment },
            ..self
        }
    }

    pub const fn with_enum_size(self, enum_size: ByteUnits) -> Self {
        Self { enum_size, ..self }
    }

    pub const fn long_size(&self) -> ByteUnits {
        match self.data_model {
            DataModel::Ilp32 | DataModel::Llp64 => ByteUnits::of(4),
            DataModel::Lp64 => ByteUnits::of(8),
        }
    }
}

impl Default for MachineProfile {
    fn default() -> Self {
        Self::LP64
    }
}
