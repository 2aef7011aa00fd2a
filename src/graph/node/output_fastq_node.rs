use std::cell::{Cell, RefCell};
use std::io::Write;

use crate::graph::*;
use crate::lines::Origin;
use crate::output::*;

pub struct OutputFastqNode<'w> {
    writer: RefCell<Option<OutputWriter<'w>>>,
    origin: Origin,
    written: Cell<usize>,
}

impl<'w> OutputFastqNode<'w> {
    const NAME: &'static str = "OutputFastqNode";

    /// Write records to a new file, which must not exist yet.
    pub fn new(file: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            writer: RefCell::new(Some(create_output(file.as_ref())?)),
            origin: Origin::File(file.as_ref().to_owned()),
            written: Cell::new(0),
        })
    }

    /// Write records to an arbitrary writer.
    pub fn from_writer(writer: impl Write + 'w) -> Self {
        Self {
            writer: RefCell::new(Some(OutputWriter::plain(writer))),
            origin: Origin::Bytes,
            written: Cell::new(0),
        }
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written.get()
    }
}

impl<'w> GraphNode for OutputFastqNode<'w> {
    fn run(&self, record: Option<FastqRecord>) -> Result<(Option<FastqRecord>, bool)> {
        let Some(record) = record else { panic!("Expected some record!") };

        let mut writer = self.writer.borrow_mut();
        let Some(writer) = writer.as_mut() else { panic!("Expected an open writer!") };
        write_fastq_record(writer, &record).map_err(|e| Error::io(&self.origin, e))?;
        self.written.set(self.written.get() + 1);

        Ok((Some(record), false))
    }

    /// Flush and close the output, including the gzip trailer.
    fn finish(&self) -> Result<()> {
        match self.writer.borrow_mut().take() {
            Some(writer) => writer.finish().map_err(|e| Error::io(&self.origin, e)),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
