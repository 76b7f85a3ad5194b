//! MLP major sync.
//!
//! ## Layout
//!
//! An access unit opens with a 32-bit header (check nibble, length, input
//! timing). Access units that start a new stream segment follow it with the
//! major sync: the 0xF8726FBA sync word, format info, the 0xB752 signature,
//! flags, data rate, substream configuration and one channel meaning entry
//! per substream.
//!
//! ## Format Types
//!
//! - **FBA Format** (0xF8726FBA): Dolby TrueHD format
//! - **FBB Format** (0xF8726FBB): Meridian format (not supported)
//!
//! ## Sample Counts
//!
//! Access units contain 40-160 samples based on sampling frequency.

use std::io;

use anyhow::{Context, Result, bail};
use log::{debug, trace};

use crate::structs::channel::{ChannelRoleList, ReferenceChannelRole};
use crate::utils::bitstream_io::{BitstreamIoReader, BsIoVecReader};
use crate::utils::errors::HeaderError;

/// Major sync pattern for FBA (Dolby) format streams.
pub const MAJOR_SYNC_FBA: u32 = 0xF8_72_6F_BA;

/// Major sync pattern for FBB (Meridian) format streams.
pub const MAJOR_SYNC_FBB: u32 = 0xF8_72_6F_BB;

pub const MAJOR_SYNC_SIGNATURE: u16 = 0xB752;

/// Base sampling rate for CD-family rates (44.1kHz, 88.2kHz, 176.4kHz).
pub const BASE_SAMPLING_RATE_CD: u32 = 44100;

/// Base sampling rate for DVD-family rates (48kHz, 96kHz, 192kHz).
pub const BASE_SAMPLING_RATE_DVD: u32 = 48000;

/// Base number of samples per access unit at 48kHz.
pub const BASE_SAMPLES_PER_AU: usize = 40;

/// Bytes in the access unit header preceding the major sync.
pub const ACCESS_UNIT_HEADER_BYTES: usize = 4;

/// Channel layout carried by the extension of a 16-channel presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SixteenChannelLayout {
    pub dialogue_norm: u8,
    pub mix_level: u8,
    /// Number of channels, already offset from the coded `channel_count - 1`.
    pub channel_count: u8,
    pub objects_only: bool,
    /// Only coded for object-only presentations whose extension still has
    /// room for it.
    pub lfe_present: Option<bool>,
}

impl SixteenChannelLayout {
    /// Reads the layout fields that fit before `end_offset`. Fields past the
    /// end of the extension keep their default.
    fn read<R>(reader: &mut BitstreamIoReader<R>, end_offset: u64) -> Result<Self>
    where
        R: io::Read + io::Seek,
    {
        let remaining =
            |reader: &BitstreamIoReader<R>| end_offset.saturating_sub(reader.position());
        let mut layout = Self::default();

        if remaining(reader) < 16 {
            return Ok(layout);
        }

        layout.dialogue_norm = reader.get_n(5)?;
        layout.mix_level = reader.get_n(6)?;
        layout.channel_count = reader.get_n::<u8>(5)? + 1;

        if remaining(reader) == 0 {
            debug!("16ch layout truncated by its extension after the channel count");
            return Ok(layout);
        }

        layout.objects_only = reader.get()?;

        if layout.objects_only && remaining(reader) > 0 {
            layout.lfe_present = Some(reader.get()?);
        }

        Ok(layout)
    }
}

/// Length-prefixed extension trailing a substream's channel meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtensionInfo {
    /// 4-bit length code `L`; the extension spans `(L + 1) * 16` bits.
    pub length_code: u8,
    /// Absolute bit offset at which the extension ends.
    pub end_offset: u64,
    pub sixteen_channel: Option<SixteenChannelLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstreamDescriptor {
    pub extension: Option<ExtensionInfo>,
}

impl SubstreamDescriptor {
    fn read<R>(sixteen_channel: bool, reader: &mut BitstreamIoReader<R>) -> Result<Self>
    where
        R: io::Read + io::Seek,
    {
        reader.skip_n(63).context("channel meaning")?;

        if !reader.get().context("extension present")? {
            return Ok(Self::default());
        }

        let length_code = reader.get_n::<u8>(4).context("extension length")?;
        let end_offset = reader.position() + ((length_code as u64 + 1) << 4);

        debug!("Extension of {} bits ends at bit {end_offset}", (length_code as u64 + 1) << 4);

        let layout = if sixteen_channel {
            Some(SixteenChannelLayout::read(reader, end_offset).context("16ch channel meaning")?)
        } else {
            None
        };

        reader.set_position(end_offset).context("extension end")?;

        Ok(Self {
            extension: Some(ExtensionInfo {
                length_code,
                end_offset,
                sixteen_channel: layout,
            }),
        })
    }
}

/// Access unit header and major sync of an MLP access unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MajorSync {
    pub check_nibble: u8,
    /// Length of the access unit in 16-bit words.
    pub access_unit_length: u16,
    pub input_timing: u16,

    pub sampling_frequency_code: u8,
    pub sampling_frequency: u32,
    /// Channel modifier bits between the rate code and the channel masks.
    pub format_modifiers: u8,
    pub primary_channel_mask: u8,
    pub secondary_channel_mask: u16,
    pub channels: ChannelRoleList,

    pub flags: u16,
    pub reserved: u16,
    pub variable_rate: bool,
    pub peak_data_rate: u16,
    pub substreams: usize,
    /// Two reserved bits followed by the 2-bit extended substream info.
    pub extended_substream_info: u8,
    pub substream_info: u8,
    pub substream_descriptors: Vec<SubstreamDescriptor>,
}

impl MajorSync {
    /// Decodes the access unit header and major sync from the start of an
    /// access unit.
    pub fn read<S: io::Read>(source: &mut S) -> Result<Self> {
        let mut reader = BsIoVecReader::from_vec(Vec::new());
        Self::read_from(&mut reader, source)
    }

    /// Like [`MajorSync::read`] but leaves the whole access unit in `reader`,
    /// positioned just past the major sync.
    pub fn read_from<S: io::Read>(reader: &mut BsIoVecReader, source: &mut S) -> Result<Self> {
        let start_pos = reader.position();

        reader
            .expand(source, ACCESS_UNIT_HEADER_BYTES)
            .context("access unit header")?;

        let mut ms = Self {
            check_nibble: reader.get_n(4)?,
            access_unit_length: reader.get_n(12)?,
            input_timing: reader.get_n(16)?,
            ..Default::default()
        };

        let au_bytes = (ms.access_unit_length as usize) << 1;
        reader
            .expand(source, au_bytes.saturating_sub(ACCESS_UNIT_HEADER_BYTES))
            .context("access unit")?;

        let format_sync: u32 = reader.get_n(32).context("format_sync")?;
        match format_sync {
            MAJOR_SYNC_FBA => {}
            MAJOR_SYNC_FBB => {
                debug!("FBB major sync at bit {}", start_pos + 32);
                bail!(HeaderError::UnsupportedFeature(
                    "FBB (Meridian) major sync".to_string()
                ))
            }
            found => bail!(HeaderError::Sync {
                expected: MAJOR_SYNC_FBA,
                found
            }),
        }

        ms.sampling_frequency_code = reader.get_n(4)?;
        ms.sampling_frequency = Self::map_sampling_freq(ms.sampling_frequency_code)?;
        ms.format_modifiers = reader.get_n(8)?;

        ms.primary_channel_mask = reader.get_n(5)?;
        ms.channels = ReferenceChannelRole::from_mask(ms.primary_channel_mask as u16, 5);

        reader.skip_n(2)?;
        ms.secondary_channel_mask = reader.get_n(13)?;

        let secondary = ReferenceChannelRole::from_mask(ms.secondary_channel_mask, 13);
        if !secondary.is_empty() {
            ms.channels = secondary;
        }

        let signature: u16 = reader.get_n(16).context("signature")?;
        if signature != MAJOR_SYNC_SIGNATURE {
            bail!(HeaderError::Sync {
                expected: MAJOR_SYNC_SIGNATURE as u32,
                found: signature as u32
            });
        }

        ms.flags = reader.get_n(16)?;
        ms.reserved = reader.get_n(16)?;
        ms.variable_rate = reader.get()?;
        ms.peak_data_rate = reader.get_n(15)?;

        ms.substreams = reader.get_n::<u8>(4)? as usize;
        // reserved(2) field is part of extended_substream_info
        ms.extended_substream_info = reader.get_n(4)?;
        ms.substream_info = reader.get_n(8)?;

        if ms.sixteen_channel_presentation() {
            debug!("16-channel presentation present, substream_info={:#04X}", ms.substream_info);
        }

        for i in 0..ms.substreams {
            let descriptor = SubstreamDescriptor::read(ms.sixteen_channel_presentation(), reader)
                .with_context(|| format!("substream {i}"))?;

            if let Some(layout) = descriptor.extension.and_then(|ext| ext.sixteen_channel) {
                if let Some(lfe_present) = layout.lfe_present {
                    ms.channels = if lfe_present {
                        vec![ReferenceChannelRole::Lfe]
                    } else {
                        ChannelRoleList::new()
                    };
                }
            }

            ms.substream_descriptors.push(descriptor);
        }

        trace!(
            "Major sync: {} Hz, {} substreams, {} bits",
            ms.sampling_frequency,
            ms.substreams,
            reader.position() - start_pos
        );

        Ok(ms)
    }

    fn map_sampling_freq(value: u8) -> Result<u32> {
        match value {
            0..=2 => Ok(BASE_SAMPLING_RATE_DVD << value),
            8..=10 => Ok(BASE_SAMPLING_RATE_CD << (value - 8)),
            _ => bail!(HeaderError::UnsupportedFeature(format!(
                "audio sampling frequency code {value}"
            ))),
        }
    }

    pub fn samples_per_au(&self) -> usize {
        (self.sampling_frequency / BASE_SAMPLING_RATE_CD) as usize * BASE_SAMPLES_PER_AU
    }

    pub fn sixteen_channel_presentation(&self) -> bool {
        self.substream_info & 0x80 != 0
    }

    /// XOR of the four access unit header bytes.
    pub fn header_parity(&self) -> u8 {
        let [timing_hi, timing_lo] = self.input_timing.to_be_bytes();

        (self.check_nibble << 4 | (self.access_unit_length >> 8) as u8)
            ^ self.access_unit_length as u8
            ^ timing_hi
            ^ timing_lo
    }
}
