//! Utility functions and supporting infrastructure.
//!
//! Provides bitstream I/O and error handling for header processing.

pub mod bitstream_io;
pub mod errors;

#[cfg(test)]
pub(crate) mod testing;
