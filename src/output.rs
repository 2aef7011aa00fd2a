use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::{write::GzEncoder, Compression};

use crate::errors::*;

/// Fail with [`Error::DestinationExists`] if something is already at `file`.
pub fn check_destination(file: impl AsRef<str>) -> Result<()> {
    let file = file.as_ref();

    if Path::new(file).exists() {
        return Err(Error::DestinationExists {
            file: file.to_owned(),
        });
    }

    Ok(())
}

/// Buffered output, optionally gzip compressed.
///
/// Call [`OutputWriter::finish`] when done. Dropping the writer instead flushes on a best
/// effort basis and loses any error, including a failure to write the gzip trailer.
pub enum OutputWriter<'w> {
    Plain(BufWriter<Box<dyn Write + 'w>>),
    Gzip(BufWriter<GzEncoder<Box<dyn Write + 'w>>>),
}

impl<'w> OutputWriter<'w> {
    pub fn plain(writer: impl Write + 'w) -> Self {
        Self::Plain(BufWriter::new(Box::new(writer)))
    }

    pub fn gzip(writer: impl Write + 'w) -> Self {
        Self::Gzip(BufWriter::new(GzEncoder::new(
            Box::new(writer),
            Compression::default(),
        )))
    }

    /// Flush everything, write the gzip trailer if compressing, and flush the underlying writer.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Plain(mut w) => w.flush(),
            Self::Gzip(w) => {
                let mut inner = w.into_inner().map_err(|e| e.into_error())?.finish()?;
                inner.flush()
            }
        }
    }
}

impl<'w> Write for OutputWriter<'w> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.write_all(buf),
            Self::Gzip(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
        }
    }
}

/// Create a new output file, refusing to overwrite an existing one.
///
/// Parent directories are created as needed. Files ending in `.gz` are gzip compressed.
pub fn create_output(file: impl AsRef<str>) -> Result<OutputWriter<'static>> {
    let file = file.as_ref();
    check_destination(file)?;

    let file_io = |e: io::Error| Error::FileIo {
        file: file.to_owned(),
        source: Box::new(e),
    };

    if let Some(parent) = Path::new(file).parent() {
        std::fs::create_dir_all(parent).map_err(file_io)?;
    }

    // create_new so that a file appearing after the check is still not clobbered
    let handle = File::options()
        .write(true)
        .create_new(true)
        .open(file)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                Error::DestinationExists {
                    file: file.to_owned(),
                }
            } else {
                file_io(e)
            }
        })?;

    if file.ends_with(".gz") {
        Ok(OutputWriter::gzip(handle))
    } else {
        Ok(OutputWriter::plain(handle))
    }
}

/// Default destination next to `input`: everything before the last `.` followed by `suffix`.
pub fn default_output(input: impl AsRef<str>, suffix: &str) -> String {
    let input = input.as_ref();
    let stem = input.rsplit_once('.').map_or(input, |(stem, _)| stem);
    format!("{}{}", stem, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    /// Accepts nothing, like a device with no space left.
    struct FullDevice;

    impl Write for FullDevice {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn gzip_finish_reports_trailer_failure() {
        let mut w = OutputWriter::gzip(FullDevice);
        // small enough to stay in the buffers until finish
        w.write_all(b"@r\nAC\n+r\nII\n").unwrap();
        assert!(w.finish().is_err());

        let mut w = OutputWriter::plain(FullDevice);
        w.write_all(b">x\n").unwrap();
        assert!(w.finish().is_err());
    }

    #[test]
    fn gzip_finish_writes_complete_stream() {
        let mut out = Vec::new();
        let mut w = OutputWriter::gzip(&mut out);
        w.write_all(b">x\nACGT\n").unwrap();
        w.finish().unwrap();

        let mut decoded = String::new();
        GzDecoder::new(&out[..]).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, ">x\nACGT\n");
    }

    #[test]
    fn default_output_replaces_extension() {
        assert_eq!(default_output("data/x.fasta", "_one_line.fasta"), "data/x_one_line.fasta");
        assert_eq!(default_output("a.b.gbk", "_selected.fasta"), "a.b_selected.fasta");
        assert_eq!(default_output("report", "_parse.txt"), "report_parse.txt");
    }
}
