//! Save file access.
//!
//! `ByteReader` owns the byte source and performs every primitive decode;
//! nothing above this module touches the file directly.

pub mod error;
pub mod reader;

use std::fs::File;
use std::path::Path;

pub use error::{ReadError, SourceError};
pub use reader::ByteReader;

/// Open a save file for sequential decoding.
///
/// The file is closed when the returned reader is dropped.
///
/// # Errors
/// Returns `SourceError::InvalidSource` when the file cannot be opened.
pub fn open_save_file(path: &Path) -> Result<ByteReader<File>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::InvalidSource {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ByteReader::new(file))
}
