use thiserror::Error;

use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "json")]
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("missing column: {column}")]
    MissingColumn { column: String },

    #[error("{0}")]
    Message(String),
}

impl Error {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Error::MissingColumn {
            column: column.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
