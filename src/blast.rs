//! Extracting the top hit description of every query in a BLAST text report.

use memchr::memmem;
use tracing::{debug, info};

use std::io::Write;

use crate::errors::*;
use crate::lines::*;
use crate::output::*;

/// Label of the line preceding the first hit of a query.
pub const DESCRIPTION_MARKER: &str = "Description";

/// Everything before the first run of two spaces, with surrounding whitespace removed.
pub fn first_field(line: &str) -> &str {
    let line = line.trim();
    let end = memmem::find(line.as_bytes(), b"  ").unwrap_or(line.len());
    line[..end].trim()
}

/// Pulls the first description after each marker line.
pub struct Descriptions<'reader> {
    lines: Lines<'reader>,
}

impl<'reader> Descriptions<'reader> {
    pub fn new(lines: Lines<'reader>) -> Self {
        Self { lines }
    }

    fn next_description(&mut self) -> Result<Option<String>> {
        loop {
            let Some(line) = self.lines.next_line()? else {
                return Ok(None);
            };

            if !line.trim_start().starts_with(DESCRIPTION_MARKER) {
                continue;
            }

            let Some(hit) = self.lines.next_line()? else {
                return Err(Error::UnexpectedEof {
                    origin: self.lines.origin().clone(),
                    line: self.lines.line(),
                    context: "reading the line after a description marker",
                });
            };

            return Ok(Some(first_field(hit).to_owned()));
        }
    }
}

impl<'reader> Iterator for Descriptions<'reader> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_description().transpose()
    }
}

/// All descriptions in the input, sorted.
pub fn extract_descriptions(lines: Lines) -> Result<Vec<String>> {
    let mut descriptions = Descriptions::new(lines).collect::<Result<Vec<_>>>()?;
    descriptions.sort();
    Ok(descriptions)
}

/// Write the sorted top hit descriptions of a BLAST report, one per line.
///
/// The output defaults to `<input stem>_parse.txt` and must not exist yet.
/// Nothing is written if the report is malformed.
pub fn parse_blast_output(input: &str, output: Option<&str>) -> Result<usize> {
    let output = output
        .map(|o| o.to_owned())
        .unwrap_or_else(|| default_output(input, "_parse.txt"));
    check_destination(&output)?;

    info!(input, output = output.as_str(), "parsing BLAST report");

    let descriptions = extract_descriptions(Lines::from_file(input)?)?;
    debug!(count = descriptions.len(), "extracted descriptions");

    let mut writer = create_output(&output)?;
    let file_io = |e: std::io::Error| Error::FileIo {
        file: output.clone(),
        source: Box::new(e),
    };

    for d in &descriptions {
        writer.write_all(d.as_bytes()).map_err(file_io)?;
        writer.write_all(b"\n").map_err(file_io)?;
    }

    writer.finish().map_err(file_io)?;

    info!(descriptions = descriptions.len(), "wrote descriptions");
    Ok(descriptions.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &[u8] = b"Query #1: seq1
Sequences producing significant alignments:
Description                                   Scientific Name  Max Score
Zeta protein [Escherichia coli]  Escherichia coli  120  120
Other hit [Escherichia coli]  Escherichia coli  110  110

Query #2: seq2
  Description  Max Score
   alpha-subunit  (partial)   Bacillus  99
Query #3: seq3
Description
Beta protein
";

    #[test]
    fn first_field_splits_on_double_space() {
        assert_eq!(first_field("  a b  c  d "), "a b");
        assert_eq!(first_field("single"), "single");
        assert_eq!(first_field(""), "");
    }

    #[test]
    fn extracts_in_encounter_order() {
        let res = Descriptions::new(Lines::from_bytes(REPORT))
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            res,
            ["Zeta protein [Escherichia coli]", "alpha-subunit", "Beta protein"]
        );
    }

    #[test]
    fn sorts_lexicographically() {
        let res = extract_descriptions(Lines::from_bytes(REPORT)).unwrap();
        assert_eq!(
            res,
            ["Beta protein", "Zeta protein [Escherichia coli]", "alpha-subunit"]
        );
    }

    #[test]
    fn marker_on_last_line() {
        let res = extract_descriptions(Lines::from_bytes(b"Query\nDescription  Score\n"));
        assert!(matches!(res, Err(Error::UnexpectedEof { line: 2, .. })));
    }

    #[test]
    fn hit_line_is_not_rescanned() {
        let res = extract_descriptions(Lines::from_bytes(b"Description\nDescription x\n")).unwrap();
        assert_eq!(res, ["Description x"]);
    }

    #[test]
    fn no_markers() {
        assert!(extract_descriptions(Lines::from_bytes(b"nothing\nhere\n"))
            .unwrap()
            .is_empty());
    }
}
