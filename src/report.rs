use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use hashbrown::HashSet;
use serde::Serialize;
use tracing::info;

use crate::step_cache::{CacheStats, StepCache};
use crate::{Key, Steps};

#[derive(Debug, Serialize)]
struct SampleRecord {
    number: Key,
    steps: Steps,
    hit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub samples: u64,
    pub distinct: usize,
    pub stats: CacheStats,
    pub cached: usize,
}

// Collects per-sample output and the numbers seen so far
pub struct Report<W: Write> {
    csv: Option<csv::Writer<W>>,
    working_set: HashSet<Key>,
    samples: u64,
}

impl Report<File> {
    pub fn create(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let csv = match path {
            Some(path) => Some(csv::Writer::from_path(path)?),
            None => None,
        };
        Ok(Self::with_writer(csv))
    }
}

impl<W: Write> Report<W> {
    pub fn new(csv: Option<W>) -> Self {
        Self::with_writer(csv.map(csv::Writer::from_writer))
    }

    fn with_writer(csv: Option<csv::Writer<W>>) -> Self {
        Self {
            csv,
            working_set: HashSet::new(),
            samples: 0,
        }
    }

    pub fn record(
        &mut self,
        out: &mut impl Write,
        number: Key,
        steps: Steps,
        hit: bool,
    ) -> Result<(), Box<dyn Error>> {
        writeln!(out, "Number: {} -> Steps: {}", number, steps)?;
        if let Some(csv) = self.csv.as_mut() {
            csv.serialize(SampleRecord { number, steps, hit })?;
        }
        self.working_set.insert(number);
        self.samples += 1;
        Ok(())
    }

    pub fn finish(mut self, cache: &StepCache) -> Result<Summary, Box<dyn Error>> {
        if let Some(csv) = self.csv.as_mut() {
            csv.flush()?;
        }

        let summary = Summary {
            samples: self.samples,
            distinct: self.working_set.len(),
            stats: cache.stats(),
            cached: cache.len(),
        };
        info!(
            policy = cache.policy().as_str(),
            samples = summary.samples,
            distinct = summary.distinct,
            hits = summary.stats.hits,
            misses = summary.stats.misses,
            miss_ratio = summary.stats.miss_ratio(),
            cached = summary.cached,
            capacity = cache.capacity(),
            "run finished"
        );
        Ok(summary)
    }
}
