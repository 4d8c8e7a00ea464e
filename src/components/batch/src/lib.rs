mod options;

#[cfg(test)]
mod tests;

use aggregate::{Aggregate, Records};
use build_layout::{LayoutEngine, LayoutError, LayoutResult};
use diagnostics::Diagnostics;
pub use options::BatchOptions;
use repack::{Repacked, repack};
use std::{
    fmt::Display,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};
use target_layout::TypeCatalog;

/// Everything computed for one successfully laid out aggregate
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateReport {
    pub layout: LayoutResult,
    pub repacked: Option<Repacked>,
}

impl Display for AggregateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.layout)?;

        if let Some(repacked) = &self.repacked {
            write!(f, "\nrepacked {}", repacked)?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BatchEntry {
    pub name: String,
    pub outcome: Result<AggregateReport, LayoutError>,
}

impl BatchEntry {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Lays out every aggregate independently and returns one entry per input,
/// in input order.
///
/// A failing aggregate only affects its own entry. Each worker thread owns a
/// separate `LayoutEngine`, so the catalog and records are the only shared state.
pub fn run_batch(
    aggregates: &[Aggregate],
    catalog: &TypeCatalog,
    records: &Records,
    diagnostics: &Diagnostics,
    options: &BatchOptions,
) -> Vec<BatchEntry> {
    let num_threads = options.available_parallelism.get().min(aggregates.len());

    if num_threads <= 1 {
        let engine = LayoutEngine::new(catalog, records, diagnostics);

        return aggregates
            .iter()
            .map(|aggregate| process(&engine, aggregate, options))
            .collect();
    }

    let next = &AtomicUsize::new(0);

    let mut finished = thread::scope(|scope| {
        let mut workers = Vec::with_capacity(num_threads);

        for _ in 0..num_threads {
            workers.push(scope.spawn(move || {
                let engine = LayoutEngine::new(catalog, records, diagnostics);
                let mut done = Vec::new();

                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);

                    let Some(aggregate) = aggregates.get(index) else {
                        break done;
                    };

                    done.push((index, process(&engine, aggregate, options)));
                }
            }));
        }

        workers
            .into_iter()
            .flat_map(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect::<Vec<_>>()
    });

    finished.sort_unstable_by_key(|(index, _)| *index);
    finished.into_iter().map(|(_, entry)| entry).collect()
}

fn process(engine: &LayoutEngine, aggregate: &Aggregate, options: &BatchOptions) -> BatchEntry {
    BatchEntry {
        name: aggregate.name.clone(),
        outcome: report(engine, aggregate, options),
    }
}

fn report(
    engine: &LayoutEngine,
    aggregate: &Aggregate,
    options: &BatchOptions,
) -> Result<AggregateReport, LayoutError> {
    let layout = engine.compute_layout(aggregate)?;

    if let Some(assertions) = options.union_assertions.get(&aggregate.name) {
        engine.check_disjoint(aggregate, assertions)?;
    }

    let repacked = options
        .repack
        .map(|constraints| repack(engine, aggregate, constraints))
        .transpose()?;

    Ok(AggregateReport { layout, repacked })
}
