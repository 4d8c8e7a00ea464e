use data_units::ByteUnits;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogError {
    pub kind: CatalogErrorKind,
    pub type_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogErrorKind {
    UnknownType,
    InvalidAlignment { alignment: ByteUnits },
    SizeOverflow { length: u64 },
}

impl CatalogErrorKind {
    pub fn at(self, type_name: impl ToString) -> CatalogError {
        CatalogError {
            kind: self,
            type_name: type_name.to_string(),
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            CatalogErrorKind::UnknownType => write!(f, "Unknown type '{}'", self.type_name),
            CatalogErrorKind::InvalidAlignment { alignment } => write!(
                f,
                "Alignment of type '{}' must be a non-zero power of two, got {}",
                self.type_name,
                alignment.bytes()
            ),
            CatalogErrorKind::SizeOverflow { length } => write!(
                f,
                "Array of {} elements of type '{}' is too large",
                length, self.type_name
            ),
        }
    }
}

impl std::error::Error for CatalogError {}
