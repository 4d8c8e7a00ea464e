use std::fmt::Display;

/// C data model, which decides the width of `int`, `long` and pointers
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataModel {
    Ilp32,
    Lp64,
    Llp64,
}

impl Display for DataModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DataModel::Ilp32 => "ILP32",
            DataModel::Lp64 => "LP64",
            DataModel::Llp64 => "LLP64",
        })
    }
}
