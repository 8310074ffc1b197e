//! Error types for eollib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while classifying, converting or resolving paths
#[derive(Error, Debug)]
pub enum EolError {
    /// Name does not map to any EOL style
    #[error("unknown EOL name: {0:?}")]
    UnknownEolName(String),

    /// Byte sequence is not one of `\r`, `\n`, `\r\n`
    #[error("unknown EOL: {0:?}")]
    UnknownEol(Vec<u8>),

    /// Style cannot be used as a conversion target (MIXED, NONE)
    #[error("illegal EOL for conversion: {0}")]
    IllegalEol(String),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a converted file back
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
