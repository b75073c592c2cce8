use std::{fmt::Display, path::PathBuf};

use thiserror::Error;

/// Errors raised while building a mosaic or a zoom clip.
#[derive(Error, Debug)]
pub(crate) enum MosaicError {
    /// Empty image set, empty folder, zero-sized image or unusable settings.
    #[error("input error: {0}")]
    Input(String),

    /// An interactive choice that does not name a candidate.
    #[error("{0}")]
    Selection(String),

    /// Tiles or rows that cannot be concatenated.
    #[error("assembly error: {0}")]
    Assembly(String),

    #[error("storage error with {}: {message}", path.display())]
    Storage { path: PathBuf, message: String },
}

impl MosaicError {
    pub(crate) fn input(message: impl Into<String>) -> Self {
        MosaicError::Input(message.into())
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, err: impl Display) -> Self {
        MosaicError::Storage {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, MosaicError>;
