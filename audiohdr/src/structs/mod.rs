//! Data structures representing header components.
//!
//! Contains structured representations of the AC-3 family bitstream
//! information and mixing metadata, the MLP major sync and substream
//! directory, and the channel role mapping shared by both formats.

pub mod ac3;
pub mod bsi;
pub mod channel;
pub mod mixing;
pub mod substream;
pub mod sync;
