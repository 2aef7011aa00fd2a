use std::cell::RefCell;

use crate::graph::*;
use crate::lines::*;

pub struct InputFastqNode<'reader> {
    records: RefCell<FastqRecords<'reader>>,
}

impl<'reader> InputFastqNode<'reader> {
    const NAME: &'static str = "InputFastqNode";

    /// Stream records from an input fastq file.
    pub fn new(file: impl AsRef<str>) -> Result<Self> {
        Ok(Self::from_lines(Lines::from_file(file)?))
    }

    /// Stream records from a byte slice.
    pub fn from_bytes(bytes: &'reader [u8]) -> Self {
        Self::from_lines(Lines::from_bytes(bytes))
    }

    pub fn from_lines(lines: Lines<'reader>) -> Self {
        Self {
            records: RefCell::new(FastqRecords::new(lines)),
        }
    }

    /// Number of complete records read so far.
    pub fn records(&self) -> usize {
        self.records.borrow().idx()
    }
}

impl<'reader> GraphNode for InputFastqNode<'reader> {
    fn run(&self, record: Option<FastqRecord>) -> Result<(Option<FastqRecord>, bool)> {
        assert!(record.is_none(), "Expected no input records for {}", Self::NAME);

        match self.records.borrow_mut().next() {
            Some(record) => Ok((Some(record?), false)),
            None => Ok((None, true)),
        }
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
