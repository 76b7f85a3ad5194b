#![doc = include_str!("../README.md")]
//!
//! ## Technical Overview
//!
//! All headers are read and written MSB-first. Which fields are present, and
//! how wide they are, depends on values coded earlier in the same header or
//! supplied by the surrounding frame.
//!
//! ### AC-3 / E-AC-3
//!
//! The bitstream information block follows the channel mode (`acmod`) in the
//! frame header. The frame sync layer supplies an [`Ac3Context`] with the
//! channel mode, stream type, header variant and coded block count. A mixing
//! metadata block may follow the BSI.
//!
//! Decoding and encoding are symmetric: re-encoding a decoded header yields
//! the original bits.
//!
//! ### MLP
//!
//! Access units that begin a stream segment carry a major sync after the
//! 4-byte access unit header. It holds the sampling frequency, channel
//! assignment masks and the substream configuration.
//!
//! ## Quick Start
//!
//! ```rust
//! use audiohdr::process::{ac3::Ac3Parser, mlp::MlpParser, EXAMPLE_ACCESS_UNIT};
//! use audiohdr::structs::ac3::{Ac3Context, ChannelMode};
//!
//! // AC-3: bytes following acmod of a stereo frame
//! let ctx = Ac3Context::new(ChannelMode::Stereo);
//! let mut ac3 = Ac3Parser::default();
//!
//! let header = ac3.parse(&ctx, &[0x74, 0x00])?;
//! assert_eq!(header.bsi.dialnorm, 20);
//!
//! let (bytes, _bits) = ac3.encode(&ctx, &header)?;
//! assert_eq!(bytes, [0x74, 0x00]);
//!
//! // MLP: any io::Read positioned at an access unit
//! let mut mlp = MlpParser::default();
//! let major_sync = mlp.parse(&mut &EXAMPLE_ACCESS_UNIT[..])?;
//! assert_eq!(major_sync.sampling_frequency, 48000);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! [`Ac3Context`]: structs::ac3::Ac3Context

/// Stream-level parsers.
///
/// 1. **AC-3** ([`process::ac3`]): BSI and mixing metadata of consecutive frames.
///
/// 2. **MLP** ([`process::mlp`]): Major sync of consecutive access units.
pub mod process;

/// Data structures representing header components.
///
/// - **Frame Context** ([`structs::ac3`]): Channel mode, stream type, header variant
/// - **BSI** ([`structs::bsi`]): Bitstream information
/// - **Mixing Metadata** ([`structs::mixing`]): Mixing and mapping metadata
/// - **Major Sync** ([`structs::sync`]): MLP stream configuration
/// - **Substreams** ([`structs::substream`]): MLP substream directory
/// - **Channels** ([`structs::channel`]): Channel role mapping
pub mod structs;

/// Utility functions and supporting infrastructure.
///
/// - **Bitstream I/O** ([`utils::bitstream_io`]): Bit-level reading/writing
/// - **Error Handling** ([`utils::errors`]): Error types
pub mod utils;
