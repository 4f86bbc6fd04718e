use crate::codec::{DecodeError, EncodeError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrvcError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read the vCard {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecodeError,
    },

    #[error("Editing was cancelled")]
    Cancelled,

    #[error("Input error: {0}")]
    Prompt(String),

    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("QR code error: {0}")]
    Render(String),

    #[error("Could not access {}: {source}", .path.display())]
    Transport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bill of materials error: {0}")]
    Bom(String),
}

impl QrvcError {
    pub fn transport(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Transport {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, QrvcError>;
