//! Save file layout decoding.
//!
//! The layered structure mirrors the byte format:
//! - `layout`: slot size, field widths and bit ranges (source of truth)
//! - `packed`: pure codecs for the packed date and year encodings
//! - `parser`: profile header and measurement record decoding on a reader
//! - `builder`: synthetic slot images for fixtures and tests
//!
//! Nothing here decides which slots are kept; that policy lives in `extract`.

pub mod builder;
pub mod layout;
pub mod packed;
pub mod parser;
