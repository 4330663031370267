use arbor_jpath::JPathError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PointerError {
    #[error("Invalid JSON pointer '{pointer}': {message}")]
    InvalidPointer { pointer: String, message: String },

    #[error("Invalid path pointer '{path}' at position {position}: {message}")]
    InvalidPath {
        path: String,
        position: usize,
        message: String,
    },

    #[error("Query '{0}' is not a normalized path")]
    NotNormalized(String),

    #[error(transparent)]
    Query(#[from] JPathError),
}

impl PointerError {
    pub fn pointer(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPointer {
            pointer: pointer.into(),
            message: message.into(),
        }
    }

    pub fn path(path: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            position,
            message: message.into(),
        }
    }
}
