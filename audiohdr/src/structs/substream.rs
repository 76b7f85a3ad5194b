//! Substream directory.
//!
//! Follows the major sync and its CRC: one 16-bit entry per substream, with an
//! optional second word carrying dynamic range control parameters.

use std::io;

use anyhow::{Context, Result};

use crate::utils::bitstream_io::BitstreamIoReader;

/// Directory entry for one substream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstreamDirectory {
    pub extra_substream_word: bool,
    pub restart_nonexistent: bool,
    pub crc_present: bool,
    pub reserved: bool,
    /// End of the substream segment in 16-bit words.
    pub substream_end_ptr: u16,
    pub drc_gain_update: i16,
    pub drc_time_update: u8,
}

impl SubstreamDirectory {
    pub fn read<R>(reader: &mut BitstreamIoReader<R>) -> Result<Self>
    where
        R: io::Read + io::Seek,
    {
        let mut sd = Self {
            extra_substream_word: reader.get()?,
            restart_nonexistent: reader.get()?,
            crc_present: reader.get()?,
            ..Default::default()
        };

        sd.reserved = reader.get()?;
        sd.substream_end_ptr = reader.get_n(12).context("substream_end_ptr")?;

        if sd.extra_substream_word {
            // 9-bit two's complement
            let gain: u16 = reader.get_n(9).context("drc_gain_update")?;
            sd.drc_gain_update = ((gain << 7) as i16) >> 7;
            sd.drc_time_update = reader.get_n(3)?;

            reader.skip_n(4)?;
        }

        Ok(sd)
    }

    /// Coded size of this entry in bits.
    pub fn bits(&self) -> u64 {
        if self.extra_substream_word { 32 } else { 16 }
    }
}
