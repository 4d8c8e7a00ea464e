use build_layout::DisjointAssertion;
use indexmap::IndexMap;
use repack::RepackConstraints;
use std::num::NonZero;

#[derive(Clone, Debug)]
pub struct BatchOptions {
    pub available_parallelism: NonZero<usize>,

    /// Repack every aggregate under these constraints
    pub repack: Option<RepackConstraints>,

    /// Opt-in overlap checks, keyed by aggregate name
    pub union_assertions: IndexMap<String, Vec<DisjointAssertion>>,
}

impl BatchOptions {
    pub fn sequential() -> Self {
        Self {
            available_parallelism: NonZero::<usize>::MIN,
            ..Default::default()
        }
    }

    pub fn with_parallelism(self, available_parallelism: NonZero<usize>) -> Self {
        Self {
            available_parallelism,
            ..self
        }
    }

    pub fn with_repack(self, constraints: RepackConstraints) -> Self {
        Self {
            repack: Some(constraints),
            ..self
        }
    }

    pub fn assert_disjoint(mut self, aggregate: impl ToString, assertion: DisjointAssertion) -> Self {
        self.union_assertions
            .entry(aggregate.to_string())
            .or_default()
            .push(assertion);
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        let available_parallelism = NonZero::new(num_cpus::get()).unwrap_or(NonZero::<usize>::MIN);

        Self {
            available_parallelism,
            repack: None,
            union_assertions: IndexMap::new(),
        }
    }
}
