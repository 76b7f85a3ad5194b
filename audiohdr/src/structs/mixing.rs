//! AC-3 family mixing and mapping metadata.
//!
//! The block opens with `mixmdate`. When it is clear the whole block is that
//! single bit. Program scale, mix definition, pan and frame mix configuration
//! fields exist only in independent streams.

use std::io;

use anyhow::{Context, Result, bail};
use log::trace;

use crate::structs::ac3::{Ac3Context, StreamType};
use crate::utils::bitstream_io::{BitstreamIoReader, BitstreamIoWriter, BsIoSliceWriter, BsResult};
use crate::utils::errors::HeaderError;

/// Upper bound on the coded size of a mixing metadata block.
pub const MAX_MIXING_BYTES: usize = 48;

/// Mix definition payload selected by `mixdef`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MixDefinition {
    /// `mixdef` 0
    #[default]
    None,
    /// `mixdef` 1: 5 bits of mix data.
    Short(u8),
    /// `mixdef` 2: 12 bits of mix data.
    Long(u16),
    /// `mixdef` 3: 2 to 33 raw bytes, prefixed by a 5-bit length.
    Payload(Vec<u8>),
}

impl MixDefinition {
    fn read<R>(reader: &mut BitstreamIoReader<R>) -> BsResult<Self>
    where
        R: io::Read + io::Seek,
    {
        Ok(match reader.get_n::<u8>(2)? {
            0 => MixDefinition::None,
            1 => MixDefinition::Short(reader.get_n(5)?),
            2 => MixDefinition::Long(reader.get_n(12)?),
            _ => {
                let mixdeflen = reader.get_n::<u8>(5)?;
                MixDefinition::Payload(reader.get_bytes(mixdeflen as usize + 2)?)
            }
        })
    }

    fn write<W: io::Write>(&self, writer: &mut BitstreamIoWriter<W>) -> Result<()> {
        match self {
            MixDefinition::None => writer.put_n(2, 0u8)?,
            MixDefinition::Short(data) => {
                writer.put_n(2, 1u8)?;
                writer.put_n(5, *data)?;
            }
            MixDefinition::Long(data) => {
                writer.put_n(2, 2u8)?;
                writer.put_n(12, *data)?;
            }
            MixDefinition::Payload(data) => {
                if !(2..=33).contains(&data.len()) {
                    bail!(HeaderError::PayloadLength {
                        field: "mixdata",
                        len: data.len()
                    });
                }

                writer.put_n(2, 3u8)?;
                writer.put_n(5, data.len() as u8 - 2)?;
                writer.put_bytes(data)?;
            }
        }

        Ok(())
    }
}

/// Pan information for a mono program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanInfo {
    pub panmean: u8,
    pub paninfo: u8,
}

impl PanInfo {
    fn read<R>(reader: &mut BitstreamIoReader<R>) -> BsResult<Option<Self>>
    where
        R: io::Read + io::Seek,
    {
        if !reader.get()? {
            return Ok(None);
        }

        Ok(Some(Self {
            panmean: reader.get_n(8)?,
            paninfo: reader.get_n(6)?,
        }))
    }

    fn write<W: io::Write>(pan: Option<&Self>, writer: &mut BitstreamIoWriter<W>) -> BsResult<()> {
        match pan {
            Some(pan) => {
                writer.put(true)?;
                writer.put_n(8, pan.panmean)?;
                writer.put_n(6, pan.paninfo)
            }
            None => writer.put(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MixingMetadata {
    /// `mixmdate`
    pub enabled: bool,
    pub dmixmod: u8,
    /// `ltrtcmixlev` and `lorocmixlev`.
    pub center_downmix: u8,
    /// `ltrtsurmixlev` and `lorosurmixlev`.
    pub surround_downmix: u8,
    pub lfe_mix_level: Option<u8>,
    pub pgmscl: Option<u8>,
    pub pgmscl2: Option<u8>,
    pub extpgmscl: Option<u8>,
    pub mixdef: MixDefinition,
    pub pan: Option<PanInfo>,
    pub pan2: Option<PanInfo>,
    /// One presence-gated 5-bit entry per coded audio block.
    pub frame_mix_config: Option<Vec<Option<u8>>>,
}

/// Entries in the frame mix configuration: one for single-block frames,
/// otherwise one per block.
fn frame_mix_entries(ctx: &Ac3Context) -> usize {
    if ctx.num_blocks == 1 {
        1
    } else {
        ctx.num_blocks as usize
    }
}

impl MixingMetadata {
    pub fn read<R>(ctx: &Ac3Context, reader: &mut BitstreamIoReader<R>) -> Result<Self>
    where
        R: io::Read + io::Seek,
    {
        let start_pos = reader.position();
        let mode = ctx.channel_mode;

        let mut mm = Self {
            enabled: reader.get().context("mixmdate")?,
            ..Default::default()
        };

        if !mm.enabled {
            return Ok(mm);
        }

        if mode.code() > 2 {
            mm.dmixmod = reader.get_n(2).context("dmixmod")?;
        }

        if mode.has_front3() && mode.code() > 2 {
            mm.center_downmix = reader.get_n(6).context("cmixlev")?;
        }

        if mode.has_surround() {
            mm.surround_downmix = reader.get_n(6).context("surmixlev")?;
        }

        if ctx.lfe_on {
            mm.lfe_mix_level = reader.get_conditional(5).context("lfemixlevcod")?;
        }

        if ctx.stream_type == StreamType::Independent {
            mm.pgmscl = reader.get_conditional(6).context("pgmscl")?;

            if mode.is_dual_mono() {
                mm.pgmscl2 = reader.get_conditional(6).context("pgmscl2")?;
            }

            mm.extpgmscl = reader.get_conditional(6).context("extpgmscl")?;
            mm.mixdef = MixDefinition::read(reader).context("mixdef")?;

            if mode.code() < 2 {
                mm.pan = PanInfo::read(reader).context("paninfo")?;

                if mode.is_dual_mono() {
                    mm.pan2 = PanInfo::read(reader).context("paninfo2")?;
                }
            }

            if reader.get().context("frmmixcfginfoe")? {
                let entries = (0..frame_mix_entries(ctx))
                    .map(|_| reader.get_conditional(5))
                    .collect::<BsResult<Vec<_>>>()
                    .context("blkmixcfginfo")?;

                mm.frame_mix_config = Some(entries);
            }
        }

        trace!(
            "Mixing metadata ({mode}, {:?}): {} bits",
            ctx.stream_type,
            reader.position() - start_pos
        );

        Ok(mm)
    }

    pub fn write<W>(&self, ctx: &Ac3Context, writer: &mut BitstreamIoWriter<W>) -> Result<()>
    where
        W: io::Write,
    {
        let mode = ctx.channel_mode;

        writer.put(self.enabled)?;

        if !self.enabled {
            return Ok(());
        }

        if mode.code() > 2 {
            writer.put_n(2, self.dmixmod).context("dmixmod")?;
        }

        if mode.has_front3() && mode.code() > 2 {
            writer.put_n(6, self.center_downmix).context("cmixlev")?;
        }

        if mode.has_surround() {
            writer.put_n(6, self.surround_downmix).context("surmixlev")?;
        }

        if ctx.lfe_on {
            writer
                .put_conditional(5, self.lfe_mix_level)
                .context("lfemixlevcod")?;
        }

        if ctx.stream_type == StreamType::Independent {
            writer.put_conditional(6, self.pgmscl).context("pgmscl")?;

            if mode.is_dual_mono() {
                writer.put_conditional(6, self.pgmscl2).context("pgmscl2")?;
            }

            writer.put_conditional(6, self.extpgmscl).context("extpgmscl")?;
            self.mixdef.write(writer).context("mixdef")?;

            if mode.code() < 2 {
                PanInfo::write(self.pan.as_ref(), writer).context("paninfo")?;

                if mode.is_dual_mono() {
                    PanInfo::write(self.pan2.as_ref(), writer).context("paninfo2")?;
                }
            }

            match &self.frame_mix_config {
                Some(entries) => {
                    if entries.len() != frame_mix_entries(ctx) {
                        bail!(HeaderError::PayloadLength {
                            field: "blkmixcfginfo",
                            len: entries.len()
                        });
                    }

                    writer.put(true)?;
                    for entry in entries {
                        writer.put_conditional(5, *entry).context("blkmixcfginfo")?;
                    }
                }
                None => writer.put(false)?,
            }
        }

        Ok(())
    }

    pub fn to_bytes(&self, ctx: &Ac3Context) -> Result<(Vec<u8>, u64)> {
        let mut buf = vec![0u8; MAX_MIXING_BYTES];

        let mut writer = BsIoSliceWriter::from_slice(&mut buf);
        self.write(ctx, &mut writer)?;
        let bits = writer.finish()?;

        buf.truncate(bits.div_ceil(8) as usize);

        Ok((buf, bits))
    }
}
