use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the dataset pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing inputs or invalid parameters; raised before any output is written.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Image '{path}': {source}")]
    Image {
        path: PathBuf,
        source: imaginarium::Error,
    },

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Compositing failed: {0}")]
    Composite(#[source] imaginarium::Error),

    #[error("Malformed label line: '{0}'")]
    MalformedLabel(String),

    #[error("Failed to parse configuration: {0}")]
    Format(#[from] common::SerdeFormatError),

    #[error(transparent)]
    FileExtension(#[from] common::FileExtensionError),
}

impl Error {
    pub(crate) fn image(path: impl Into<PathBuf>, source: imaginarium::Error) -> Self {
        Error::Image {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
