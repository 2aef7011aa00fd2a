//! Normalizing multi-line fasta records into one sequence line per record.

use tracing::info;

use std::io::Write;
use std::mem;

use crate::errors::*;
use crate::lines::*;
use crate::output::*;

pub const HEADER_MARKER: char = '>';

/// One fasta record with its sequence collapsed onto a single line.
///
/// `id` is the full header line, including the leading `>`. Sequence lines that come
/// before the first header form a record without an id.
#[derive(Debug, Clone, PartialEq)]
pub struct FastaRecord {
    pub id: Option<String>,
    pub seq: String,
}

/// Where the assembler is in the input.
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblerState {
    /// No header seen yet. Any sequence so far has no id.
    Start { seq: String },
    /// Accumulating the sequence of the record started by `id`.
    Record { id: String, seq: String },
}

/// Line-at-a-time state machine that turns fasta lines into [`FastaRecord`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordAssembler {
    state: AssemblerState,
}

impl RecordAssembler {
    pub fn new() -> Self {
        Self {
            state: AssemblerState::Start { seq: String::new() },
        }
    }

    pub fn state(&self) -> &AssemblerState {
        &self.state
    }

    /// Feed one line. Returns the previous record once a new header completes it.
    pub fn push(&mut self, line: &str) -> Option<FastaRecord> {
        let line = line.trim();

        if line.starts_with(HEADER_MARKER) {
            let prev = mem::replace(
                &mut self.state,
                AssemblerState::Record {
                    id: line.to_owned(),
                    seq: String::new(),
                },
            );

            return Self::flush(prev);
        }

        match &mut self.state {
            AssemblerState::Start { seq } | AssemblerState::Record { seq, .. } => {
                seq.push_str(line)
            }
        }

        None
    }

    /// Flush the last record at the end of the input.
    pub fn finish(self) -> Option<FastaRecord> {
        Self::flush(self.state)
    }

    // a headerless start is only a record if it has sequence
    fn flush(state: AssemblerState) -> Option<FastaRecord> {
        match state {
            AssemblerState::Start { seq } if seq.is_empty() => None,
            AssemblerState::Start { seq } => Some(FastaRecord { id: None, seq }),
            AssemblerState::Record { id, seq } => Some(FastaRecord { id: Some(id), seq }),
        }
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream of normalized records pulled from a line source.
pub struct FastaRecords<'reader> {
    lines: Lines<'reader>,
    assembler: Option<RecordAssembler>,
}

impl<'reader> FastaRecords<'reader> {
    pub fn new(lines: Lines<'reader>) -> Self {
        Self {
            lines,
            assembler: Some(RecordAssembler::new()),
        }
    }

    fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        let Some(assembler) = &mut self.assembler else {
            return Ok(None);
        };

        while let Some(line) = self.lines.next_line()? {
            if let Some(record) = assembler.push(line) {
                return Ok(Some(record));
            }
        }

        Ok(self.assembler.take().and_then(|a| a.finish()))
    }
}

impl<'reader> Iterator for FastaRecords<'reader> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let res = self.next_record();
        if res.is_err() {
            self.assembler = None;
        }
        res.transpose()
    }
}

/// Write a record as a header line (if it has an id) and, if the sequence is not empty,
/// one sequence line.
pub fn write_fasta_record(writer: &mut dyn Write, record: &FastaRecord) -> std::io::Result<()> {
    if let Some(id) = &record.id {
        writer.write_all(id.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    if !record.seq.is_empty() {
        writer.write_all(record.seq.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    Ok(())
}

/// Rewrite a fasta file so that every sequence is on a single line.
///
/// The output defaults to `<input stem>_one_line.fasta` and must not exist yet.
/// Returns the number of records written.
pub fn merge_multiline_fasta(input: &str, output: Option<&str>) -> Result<usize> {
    let output = output
        .map(|o| o.to_owned())
        .unwrap_or_else(|| default_output(input, "_one_line.fasta"));
    check_destination(&output)?;

    info!(input, output = output.as_str(), "merging multi-line fasta");

    let records = FastaRecords::new(Lines::from_file(input)?);
    let mut writer = create_output(&output)?;
    let file_io = |e: std::io::Error| Error::FileIo {
        file: output.clone(),
        source: Box::new(e),
    };

    let mut count = 0;

    for record in records {
        write_fasta_record(&mut writer, &record?).map_err(file_io)?;
        count += 1;
    }

    writer.finish().map_err(file_io)?;

    info!(records = count, "wrote one-line fasta");
    Ok(count)
}
