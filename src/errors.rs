use thiserror;

use crate::lines::Origin;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error reading or writing \"{file}\": {source}")]
    FileIo {
        file: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Error reading or writing bytes: {0}")]
    BytesIo(Box<dyn std::error::Error + Send + Sync>),

    #[error("Refusing to overwrite \"{file}\": the destination already exists")]
    DestinationExists { file: String },

    #[error("Unexpected end of input after line {line} in {origin} when {context}")]
    UnexpectedEof {
        origin: Origin,
        line: usize,
        context: &'static str,
    },

    #[error("Could not parse \"{string}\" as bounds: {reason}")]
    InvalidBounds {
        string: String,
        reason: &'static str,
    },

    #[error("Error parsing config \"{file}\": {source}")]
    Config {
        file: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn io(origin: &Origin, source: std::io::Error) -> Self {
        match origin {
            Origin::File(file) => Error::FileIo {
                file: file.clone(),
                source: Box::new(source),
            },
            Origin::Bytes => Error::BytesIo(Box::new(source)),
        }
    }
}
