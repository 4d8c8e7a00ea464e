use crate::Aggregate;
use indexmap::IndexMap;

/// Named aggregates that `MemberType::Record` members refer to
#[derive(Clone, Debug, Default)]
pub struct Records {
    records: IndexMap<String, Aggregate>,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, replacing any previous record with the same name
    pub fn insert(&mut self, aggregate: Aggregate) -> Option<Aggregate> {
        self.records.insert(aggregate.name.clone(), aggregate)
    }

    pub fn get(&self, name: &str) -> Option<&Aggregate> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aggregate> {
        self.records.values()
    }
}

impl FromIterator<Aggregate> for Records {
    fn from_iter<T: IntoIterator<Item = Aggregate>>(iter: T) -> Self {
        let mut records = Self::new();
        for aggregate in iter {
            records.insert(aggregate);
        }
        records
    }
}
