use tracing::debug;

use std::cell::Cell;

use crate::bounds::Bounds;
use crate::graph::*;
use crate::stats::*;

/// A numeric test on a single record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Sequence length within bounds.
    Length(Bounds),
    /// GC percentage (rounded to 3 decimal places) within bounds.
    Gc(Bounds),
    /// Mean Phred+33 quality at least the threshold.
    MeanQuality(f64),
}

impl Predicate {
    pub fn test(&self, record: &FastqRecord) -> bool {
        use Predicate::*;
        match self {
            Length(b) => b.contains(record.seq.len() as f64),
            Gc(b) => b.contains(gc_content(record.seq.as_bytes())),
            MeanQuality(threshold) => mean_quality(record.qual.as_bytes()) >= *threshold,
        }
    }

    pub fn name(&self) -> &'static str {
        use Predicate::*;
        match self {
            Length(_) => "length",
            Gc(_) => "gc",
            MeanQuality(_) => "quality",
        }
    }
}

pub struct RetainNode {
    predicate: Predicate,
    rejected: Cell<usize>,
}

impl RetainNode {
    const NAME: &'static str = "RetainNode";

    /// Retain only the records that pass the predicate and discard the rest.
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            rejected: Cell::new(0),
        }
    }

    pub fn predicate(&self) -> Predicate {
        self.predicate
    }

    /// Number of records discarded so far.
    pub fn rejected(&self) -> usize {
        self.rejected.get()
    }
}

impl GraphNode for RetainNode {
    fn run(&self, record: Option<FastqRecord>) -> Result<(Option<FastqRecord>, bool)> {
        let Some(record) = record else { panic!("Expected some record!") };

        if self.predicate.test(&record) {
            Ok((Some(record), false))
        } else {
            debug!(
                record = record.header.as_str(),
                predicate = self.predicate.name(),
                "rejected record"
            );
            self.rejected.set(self.rejected.get() + 1);
            Ok((None, false))
        }
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
