use anyhow::{Result, anyhow, bail};
use log::Level::Warn;
use log::trace;

use crate::log_or_err;
use crate::structs::ac3::{Ac3Context, ChannelMode};
use crate::structs::bsi::{AdditionalInfo, AdditionalInfoMode, Bsi, MAX_BSI_BYTES};
use crate::structs::mixing::{MAX_MIXING_BYTES, MixDefinition, MixingMetadata};
use crate::utils::bitstream_io::{BsIoSliceReader, BsIoSliceWriter};
use crate::utils::errors::HeaderError;

/// Written in place of a missing mixing block when the context expects one.
static DISABLED_MIXING: MixingMetadata = MixingMetadata {
    enabled: false,
    dmixmod: 0,
    center_downmix: 0,
    surround_downmix: 0,
    lfe_mix_level: None,
    pgmscl: None,
    pgmscl2: None,
    extpgmscl: None,
    mixdef: MixDefinition::None,
    pan: None,
    pan2: None,
    frame_mix_config: None,
};

/// Decoded metadata of one AC-3 / E-AC-3 frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ac3Header {
    pub bsi: Bsi,
    /// Present when the frame carries a mixing metadata block.
    pub mixing: Option<MixingMetadata>,
    /// Bits consumed by the BSI and mixing metadata together.
    pub bits: u64,
}

/// Per-stream AC-3 family header parser.
///
/// Reused across the frames of one stream. Each call decodes into a fresh
/// [`Ac3Header`]; the parser only remembers a frame once it decoded cleanly.
#[derive(Debug, Default)]
pub struct Ac3Parser {
    state: Ac3ParserState,
}

impl Ac3Parser {
    /// Decodes the BSI, and the mixing metadata block if `ctx` says one
    /// follows, from `data` positioned right after the channel mode.
    pub fn parse(&mut self, ctx: &Ac3Context, data: &[u8]) -> Result<Ac3Header> {
        let reader = &mut BsIoSliceReader::from_slice(data);

        let bsi = Bsi::read(ctx, reader)?;

        let mixing = if ctx.mixing_metadata {
            let mixing_ctx = ctx.with_lfe(bsi.lfe_on);
            Some(MixingMetadata::read(&mixing_ctx, reader)?)
        } else {
            None
        };

        let header = Ac3Header {
            bsi,
            mixing,
            bits: reader.position(),
        };

        self.state.check_constancy(ctx)?;
        self.state.commit(ctx, &header);

        trace!(
            "AC-3 frame {}: {} ({} bits)",
            self.state.frames,
            ctx.channel_mode,
            header.bits
        );

        Ok(header)
    }

    /// Encodes `header` back into its bitstream form, zero-padded to a whole
    /// byte. Returns the bytes and the number of meaningful bits.
    pub fn encode(&self, ctx: &Ac3Context, header: &Ac3Header) -> Result<(Vec<u8>, u64)> {
        let mut buf = vec![0u8; MAX_BSI_BYTES + MAX_MIXING_BYTES];

        let mut writer = BsIoSliceWriter::from_slice(&mut buf);
        header.bsi.write(ctx, &mut writer)?;

        match (ctx.mixing_metadata, header.mixing.as_ref()) {
            (true, mixing) => {
                let mixing_ctx = ctx.with_lfe(header.bsi.lfe_on);
                mixing.unwrap_or(&DISABLED_MIXING).write(&mixing_ctx, &mut writer)?;
            }
            (false, Some(_)) => bail!(HeaderError::UnsignalledBlock("mixing metadata")),
            (false, None) => {}
        }

        let bits = writer.finish()?;
        buf.truncate(bits.div_ceil(8) as usize);

        Ok((buf, bits))
    }

    /// Interpretation of the additional info fields of the last decoded
    /// frame under the configured [`AdditionalInfoMode`].
    pub fn additional_info(&self) -> AdditionalInfo {
        match &self.state.last {
            Some((ctx, header)) => header
                .bsi
                .additional_info(self.state.additional_info_mode, ctx.variant),
            None => AdditionalInfo::None,
        }
    }

    pub fn last_header(&self) -> Option<&Ac3Header> {
        self.state.last.as_ref().map(|(_, header)| header)
    }

    /// Number of frames decoded successfully.
    pub fn frames(&self) -> usize {
        self.state.frames
    }

    pub fn set_additional_info_mode(&mut self, mode: AdditionalInfoMode) {
        self.state.additional_info_mode = mode;
    }

    /// Sets the minimum log level that causes a parse failure.
    ///
    /// Defaults to [`log::Level::Error`].
    pub fn set_fail_level(&mut self, level: log::Level) {
        self.state.fail_level = level;
    }
}

#[derive(Debug)]
pub struct Ac3ParserState {
    pub fail_level: log::Level,
    pub additional_info_mode: AdditionalInfoMode,

    pub channel_mode: Option<ChannelMode>,
    pub frames: usize,
    pub last: Option<(Ac3Context, Ac3Header)>,
}

impl Default for Ac3ParserState {
    fn default() -> Self {
        Self {
            fail_level: log::Level::Error,
            additional_info_mode: AdditionalInfoMode::Auto,
            channel_mode: None,
            frames: 0,
            last: None,
        }
    }
}

impl Ac3ParserState {
    fn check_constancy(&self, ctx: &Ac3Context) -> Result<()> {
        if let Some(previous) = self.channel_mode {
            if previous != ctx.channel_mode {
                log_or_err!(
                    self,
                    Warn,
                    anyhow!(HeaderError::ParameterChanged {
                        field: "acmod",
                        previous: previous.code() as u32,
                        current: ctx.channel_mode.code() as u32,
                    })
                );
            }
        }

        Ok(())
    }

    fn commit(&mut self, ctx: &Ac3Context, header: &Ac3Header) {
        self.channel_mode = Some(ctx.channel_mode);
        self.frames += 1;
        self.last = Some((*ctx, header.clone()));
    }
}
