use tracing::debug;

use std::io::Write;

use crate::errors::*;
use crate::lines::*;

/// One 4-line fastq record. The separator line is not kept.
///
/// `header` includes the leading `@`. `seq` and `qual` are expected to have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct FastqRecord {
    pub header: String,
    pub seq: String,
    pub qual: String,
}

/// Which line of a record comes next.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LinePosition {
    Header,
    Sequence,
    Separator,
    Quality,
}

impl LinePosition {
    pub fn next(self) -> Self {
        use LinePosition::*;
        match self {
            Header => Sequence,
            Sequence => Separator,
            Separator => Quality,
            Quality => Header,
        }
    }
}

/// Lazily groups lines into fastq records, one record in memory at a time.
///
/// A trailing group of fewer than 4 lines is dropped without an error.
pub struct FastqRecords<'reader> {
    lines: Lines<'reader>,
    idx: usize,
}

impl<'reader> FastqRecords<'reader> {
    pub fn new(lines: Lines<'reader>) -> Self {
        Self { lines, idx: 0 }
    }

    pub fn origin(&self) -> &Origin {
        self.lines.origin()
    }

    fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        let mut pos = LinePosition::Header;
        let mut header = String::new();
        let mut seq = String::new();

        loop {
            let Some(line) = self.lines.next_line()? else {
                if pos != LinePosition::Header {
                    debug!(
                        origin = %self.lines.origin(),
                        line = self.lines.line(),
                        "dropping incomplete trailing fastq record"
                    );
                }
                return Ok(None);
            };
            let line = line.trim();

            match pos {
                LinePosition::Header => header.push_str(line),
                LinePosition::Sequence => seq.push_str(line),
                LinePosition::Separator => (),
                LinePosition::Quality => {
                    self.idx += 1;
                    return Ok(Some(FastqRecord {
                        header,
                        seq,
                        qual: line.to_owned(),
                    }));
                }
            }

            pos = pos.next();
        }
    }

    /// Number of complete records produced so far.
    pub fn idx(&self) -> usize {
        self.idx
    }
}

impl<'reader> Iterator for FastqRecords<'reader> {
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Write a record, regenerating the separator as `+` and the header without its marker.
pub fn write_fastq_record(writer: &mut dyn Write, record: &FastqRecord) -> std::io::Result<()> {
    let mut name = record.header.chars();
    name.next();

    writer.write_all(record.header.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.write_all(record.seq.as_bytes())?;
    writer.write_all(b"\n+")?;
    writer.write_all(name.as_str().as_bytes())?;
    writer.write_all(b"\n")?;
    writer.write_all(record.qual.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(bytes: &[u8]) -> Vec<FastqRecord> {
        FastqRecords::new(Lines::from_bytes(bytes))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn groups_four_lines() {
        let res = records(b"@r1\nACGT\n+\nIIII\n@r2 x\nGG\n+r2 x\n!!\n");
        assert_eq!(res.len(), 2);
        assert_eq!(
            res[0],
            FastqRecord {
                header: "@r1".to_owned(),
                seq: "ACGT".to_owned(),
                qual: "IIII".to_owned(),
            }
        );
        assert_eq!(res[1].header, "@r2 x");
        assert_eq!(res[1].qual, "!!");
    }

    #[test]
    fn drops_partial_trailing_record() {
        for tail in [&b"@r2\n"[..], b"@r2\nAC\n", b"@r2\nAC\n+\n"] {
            let mut input = b"@r1\nACGT\n+\nIIII\n".to_vec();
            input.extend_from_slice(tail);

            let mut iter = FastqRecords::new(Lines::from_bytes(&input));
            assert_eq!(iter.next().unwrap().unwrap().header, "@r1");
            assert!(iter.next().is_none());
            assert_eq!(iter.idx(), 1);
        }
    }

    #[test]
    fn empty_input() {
        assert!(records(b"").is_empty());
    }

    #[test]
    fn positions_cycle() {
        let mut pos = LinePosition::Header;
        for _ in 0..4 {
            pos = pos.next();
        }
        assert_eq!(pos, LinePosition::Header);
    }

    #[test]
    fn regenerates_separator() {
        let record = FastqRecord {
            header: "@read1 len=4".to_owned(),
            seq: "ACGT".to_owned(),
            qual: "II#I".to_owned(),
        };
        let mut out = Vec::new();
        write_fastq_record(&mut out, &record).unwrap();
        assert_eq!(out, b"@read1 len=4\nACGT\n+read1 len=4\nII#I\n");
    }
}
