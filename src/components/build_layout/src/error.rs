use data_units::BitUnits;
use derive_more::IsVariant;
use diagnostics::{Diagnostic, Location, Show};
use itertools::Itertools;
use std::fmt::Display;

/// Failure to lay out one aggregate, attributed to the offending member when
/// there is one
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutError {
    pub kind: LayoutErrorKind,
    pub location: Location,
}

impl LayoutError {
    pub fn new(kind: LayoutErrorKind, location: Location) -> Self {
        Self { kind, location }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum LayoutErrorKind {
    UnknownType { name: String },
    InvalidBitfieldWidth { width: u32, max: BitUnits },
    BitfieldNotInteger { ty: String },
    DuplicateMember,
    CyclicDefinition { path: Vec<String> },
    IncompatibleUnionLayout { first: String, second: String },
    UnknownMemberPath { path: String },
    SizeOverflow,
}

impl LayoutErrorKind {
    pub fn at(self, location: Location) -> LayoutError {
        LayoutError {
            kind: self,
            location,
        }
    }
}

impl Display for LayoutErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutErrorKind::UnknownType { name } => write!(f, "Unknown type '{name}'"),
            LayoutErrorKind::InvalidBitfieldWidth { width, max } => {
                if *width == 0 {
                    write!(f, "Named bitfield cannot have a width of zero")
                } else {
                    write!(
                        f,
                        "Bitfield width of {width} bits exceeds its underlying type's {}",
                        max
                    )
                }
            }
            LayoutErrorKind::BitfieldNotInteger { ty } => {
                write!(f, "Bitfield must have an integer type, got '{ty}'")
            }
            LayoutErrorKind::DuplicateMember => f.write_str("Duplicate member"),
            LayoutErrorKind::CyclicDefinition { path } => {
                write!(
                    f,
                    "Record contains itself by value ({})",
                    path.iter().join(" -> ")
                )
            }
            LayoutErrorKind::IncompatibleUnionLayout { first, second } => {
                write!(
                    f,
                    "Members '{first}' and '{second}' are asserted disjoint but overlap"
                )
            }
            LayoutErrorKind::UnknownMemberPath { path } => {
                write!(f, "No member at path '{path}'")
            }
            LayoutErrorKind::SizeOverflow => {
                write!(f, "Size exceeds the largest representable object")
            }
        }
    }
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

impl std::error::Error for LayoutError {}

impl Show for LayoutError {
    fn show(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        diagnostics::ErrorDiagnostic::new(&self.kind, self.location.clone()).show(w)
    }
}

impl Diagnostic for LayoutError {}
