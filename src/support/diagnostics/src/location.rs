use std::fmt::Display;

/// Where in an aggregate a diagnostic applies
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub record: String,
    pub member: Option<String>,
}

impl Location {
    pub fn record(record: impl ToString) -> Self {
        Self {
            record: record.to_string(),
            member: None,
        }
    }

    pub fn member(record: impl ToString, member: impl ToString) -> Self {
        Self {
            record: record.to_string(),
            member: Some(member.to_string()),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}.{}", self.record, member),
            None => write!(f, "{}", self.record),
        }
    }
}
