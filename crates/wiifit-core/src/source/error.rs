use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by primitive decodes on a [`ByteReader`](super::ByteReader).
///
/// # Examples
/// ```
/// use wiifit_core::ReadError;
///
/// let err = ReadError::EndOfStream { needed: 4 };
/// assert!(err.to_string().contains("end of stream"));
/// ```
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("end of stream: needed {needed} bytes")]
    EndOfStream { needed: usize },
    #[error("read failure: {0}")]
    ReadFailure(#[from] std::io::Error),
    #[error("invalid length: {consumed} bytes consumed in a {limit}-byte slot")]
    InvalidLength { consumed: usize, limit: usize },
    #[error("invalid date: raw field {raw:#010x}")]
    InvalidDate { raw: u32 },
    #[error("invalid string: {len} bytes are not non-empty UTF-8")]
    InvalidString { len: usize },
}

/// Errors raised while opening a save file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open save file {path}: {source}")]
    InvalidSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
