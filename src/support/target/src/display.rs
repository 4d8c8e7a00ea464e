use super::{BitfieldDirection, MachineProfile};
use std::fmt::Display;

impl Display for BitfieldDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BitfieldDirection::LowToHigh => "low-to-high",
            BitfieldDirection::HighToLow => "high-to-low",
        })
    }
}

impl Display for MachineProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, word {}, pointer {}, cache line {}, bitfields {})",
            self.name,
            self.data_model,
            self.word_size.bytes(),
            self.pointer_size.bytes(),
            self.cache_line_size.bytes(),
            self.bitfield.direction,
        )?;

        if let Some(alignment) = self.double_alignment_override {
            write!(f, ", double aligned to {}", alignment.bytes())?;
        }

        Ok(())
    }
}
