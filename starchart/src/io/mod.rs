//! Local data files and the mirrors they are fetched from.
//!
//! The star catalogue and the planetary ephemeris are large static files.
//! [`ensure_file`] makes sure a copy exists on disk before anything opens it:
//! an existing file is used as is, a sibling `.gz` is unpacked, and only then
//! is the file downloaded.

pub mod download;

#[cfg(test)]
mod download_tests;

pub use download::{decompress_gz, ensure_file, DataFile};
