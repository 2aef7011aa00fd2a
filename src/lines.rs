use flate2::read::MultiGzDecoder;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::errors::*;

/// Where the lines of an input come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    File(String),
    Bytes,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Origin::*;
        match self {
            File(file) => write!(f, "\"{}\"", file),
            Bytes => write!(f, "bytes"),
        }
    }
}

/// Forward-only, single pass stream of lines with trailing whitespace removed.
///
/// Files ending in `.gz` are decompressed on the fly. Only one line is held
/// in memory at a time.
pub struct Lines<'reader> {
    reader: Box<dyn BufRead + 'reader>,
    origin: Origin,
    buf: String,
    line: usize,
}

impl<'reader> Lines<'reader> {
    /// Stream lines from an input file.
    pub fn from_file(file: impl AsRef<str>) -> Result<Self> {
        let file = file.as_ref();
        let handle = File::open(file).map_err(|e| Error::FileIo {
            file: file.to_owned(),
            source: Box::new(e),
        })?;

        let reader: Box<dyn BufRead> = if file.ends_with(".gz") {
            Box::new(BufReader::new(MultiGzDecoder::new(handle)))
        } else {
            Box::new(BufReader::new(handle))
        };

        Ok(Self::new(reader, Origin::File(file.to_owned())))
    }

    /// Stream lines from a byte slice.
    pub fn from_bytes(bytes: &'reader [u8]) -> Self {
        Self::new(Box::new(bytes), Origin::Bytes)
    }

    fn new(reader: Box<dyn BufRead + 'reader>, origin: Origin) -> Self {
        Self {
            reader,
            origin,
            buf: String::new(),
            line: 0,
        }
    }

    /// Produce the next line, or `None` at the end of the stream.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        self.buf.clear();

        let n = self
            .reader
            .read_line(&mut self.buf)
            .map_err(|e| Error::io(&self.origin, e))?;

        if n == 0 {
            return Ok(None);
        }

        self.line += 1;
        Ok(Some(self.buf.trim_end()))
    }

    /// Number of lines produced so far (the 1-based number of the last line).
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}

impl<'reader> Iterator for Lines<'reader> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().map(|l| l.map(|s| s.to_owned())).transpose()
    }
}
