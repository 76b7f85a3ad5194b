//! AC-3 family bitstream information.
//!
//! Decodes and re-encodes the BSI fields that follow the channel mode. Every
//! field gate is evaluated identically on both paths so that encoding a
//! decoded header reproduces its bits exactly.

use std::fmt::Display;
use std::io;

use anyhow::{Context, Result, bail};
use log::trace;

use crate::structs::ac3::{Ac3Context, ChannelMode, HeaderVariant};
use crate::structs::channel::ChannelRoleList;
use crate::utils::bitstream_io::{BitstreamIoReader, BitstreamIoWriter, BsIoSliceWriter, BsResult};
use crate::utils::errors::HeaderError;

/// Upper bound of an encoded BSI: every optional field present, dual mono and
/// a 64 byte `addbsi` payload.
pub const MAX_BSI_BYTES: usize = 80;

/// Audio production information (`audprodie` sub-block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductionInfo {
    pub mix_level: u8,
    pub room_type: u8,
}

impl ProductionInfo {
    fn read<R>(reader: &mut BitstreamIoReader<R>) -> BsResult<Option<Self>>
    where
        R: io::Read + io::Seek,
    {
        if !reader.get()? {
            return Ok(None);
        }

        Ok(Some(Self {
            mix_level: reader.get_n(5)?,
            room_type: reader.get_n(2)?,
        }))
    }

    fn write<W: io::Write>(info: Option<&Self>, writer: &mut BitstreamIoWriter<W>) -> BsResult<()> {
        match info {
            Some(info) => {
                writer.put(true)?;
                writer.put_n(5, info.mix_level)?;
                writer.put_n(2, info.room_type)
            }
            None => writer.put(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bsi {
    /// Preferred downmix mode, Alternate variant only.
    pub dmixmod: u8,
    pub center_downmix: u8,
    pub surround_downmix: u8,
    pub dsurmod: u8,
    pub lfe_on: bool,
    pub dialnorm: u8,
    pub compr: Option<u8>,
    pub langcod: Option<u8>,
    pub production: Option<ProductionInfo>,

    pub dialnorm2: u8,
    pub compr2: Option<u8>,
    pub langcod2: Option<u8>,
    pub production2: Option<ProductionInfo>,

    pub copyright: bool,
    pub original: bool,

    /// `timecod1` or `xbsi1`, see [`Bsi::additional_info`].
    pub additional_downmix_info: Option<u16>,
    /// `timecod2` or `xbsi2`, see [`Bsi::additional_info`].
    pub additional_mix_info: Option<u16>,

    /// Opaque `addbsi` payload, 1 to 64 bytes.
    pub addbsi: Option<Vec<u8>>,
}

fn has_dmixmod(ctx: &Ac3Context) -> bool {
    ctx.variant == HeaderVariant::Alternate && has_center_downmix(ctx.channel_mode)
}

fn has_center_downmix(mode: ChannelMode) -> bool {
    mode.has_front3() && !mode.is_mono()
}

impl Bsi {
    pub fn read<R>(ctx: &Ac3Context, reader: &mut BitstreamIoReader<R>) -> Result<Self>
    where
        R: io::Read + io::Seek,
    {
        let start_pos = reader.position();
        let mode = ctx.channel_mode;
        let downmix_bits = ctx.variant.downmix_bits();

        let mut bsi = Self::default();

        if has_dmixmod(ctx) {
            bsi.dmixmod = reader.get_n(2).context("dmixmod")?;
        }

        if has_center_downmix(mode) {
            bsi.center_downmix = reader.get_n(downmix_bits).context("cmixlev")?;
        }

        if mode.has_surround() {
            bsi.surround_downmix = reader.get_n(downmix_bits).context("surmixlev")?;
        }

        if mode.is_stereo() {
            bsi.dsurmod = reader.get_n(2).context("dsurmod")?;
        }

        bsi.lfe_on = reader.get().context("lfeon")?;
        bsi.dialnorm = reader.get_n(5).context("dialnorm")?;
        bsi.compr = reader.get_conditional(8).context("compr")?;
        bsi.langcod = reader.get_conditional(8).context("langcod")?;
        bsi.production = ProductionInfo::read(reader).context("audprodi")?;

        if mode.is_dual_mono() {
            bsi.dialnorm2 = reader.get_n(5).context("dialnorm2")?;
            bsi.compr2 = reader.get_conditional(8).context("compr2")?;
            bsi.langcod2 = reader.get_conditional(8).context("langcod2")?;
            bsi.production2 = ProductionInfo::read(reader).context("audprodi2")?;
        }

        bsi.copyright = reader.get().context("copyrightb")?;
        bsi.original = reader.get().context("origbs")?;
        bsi.additional_downmix_info = reader.get_conditional(14).context("timecod1")?;
        bsi.additional_mix_info = reader.get_conditional(14).context("timecod2")?;

        if reader.get().context("addbsie")? {
            let addbsil = reader.get_n::<u8>(6).context("addbsil")?;
            bsi.addbsi = Some(reader.get_bytes(addbsil as usize + 1).context("addbsi")?);
        }

        trace!(
            "BSI ({mode}, {:?}): {} bits",
            ctx.variant,
            reader.position() - start_pos
        );

        Ok(bsi)
    }

    pub fn write<W>(&self, ctx: &Ac3Context, writer: &mut BitstreamIoWriter<W>) -> Result<()>
    where
        W: io::Write,
    {
        let mode = ctx.channel_mode;
        let downmix_bits = ctx.variant.downmix_bits();

        if has_dmixmod(ctx) {
            writer.put_n(2, self.dmixmod).context("dmixmod")?;
        }

        if has_center_downmix(mode) {
            writer
                .put_n(downmix_bits, self.center_downmix)
                .context("cmixlev")?;
        }

        if mode.has_surround() {
            writer
                .put_n(downmix_bits, self.surround_downmix)
                .context("surmixlev")?;
        }

        if mode.is_stereo() {
            writer.put_n(2, self.dsurmod).context("dsurmod")?;
        }

        writer.put(self.lfe_on)?;
        writer.put_n(5, self.dialnorm).context("dialnorm")?;
        writer.put_conditional(8, self.compr).context("compr")?;
        writer.put_conditional(8, self.langcod).context("langcod")?;
        ProductionInfo::write(self.production.as_ref(), writer).context("audprodi")?;

        if mode.is_dual_mono() {
            writer.put_n(5, self.dialnorm2).context("dialnorm2")?;
            writer.put_conditional(8, self.compr2).context("compr2")?;
            writer.put_conditional(8, self.langcod2).context("langcod2")?;
            ProductionInfo::write(self.production2.as_ref(), writer).context("audprodi2")?;
        }

        writer.put(self.copyright)?;
        writer.put(self.original)?;
        writer
            .put_conditional(14, self.additional_downmix_info)
            .context("timecod1")?;
        writer
            .put_conditional(14, self.additional_mix_info)
            .context("timecod2")?;

        match &self.addbsi {
            Some(addbsi) => {
                if addbsi.is_empty() || addbsi.len() > 64 {
                    bail!(HeaderError::PayloadLength {
                        field: "addbsi",
                        len: addbsi.len()
                    });
                }

                writer.put(true)?;
                writer.put_n(6, addbsi.len() as u8 - 1)?;
                writer.put_bytes(addbsi)?;
            }
            None => writer.put(false)?,
        }

        Ok(())
    }

    /// Encodes into a fresh buffer, zero-padded to a whole byte.
    ///
    /// Returns the bytes together with the exact number of bits written.
    pub fn to_bytes(&self, ctx: &Ac3Context) -> Result<(Vec<u8>, u64)> {
        let mut buf = vec![0u8; MAX_BSI_BYTES];

        let mut writer = BsIoSliceWriter::from_slice(&mut buf);
        self.write(ctx, &mut writer)?;
        let bits = writer.finish()?;

        buf.truncate(bits.div_ceil(8) as usize);

        Ok((buf, bits))
    }

    /// Dialogue level in dB. A code of 0 is reserved and read as -31 dB.
    pub fn dialogue_level_db(&self) -> i8 {
        match self.dialnorm {
            0 => -31,
            value => -(value as i8),
        }
    }

    pub fn channel_roles(&self, mode: ChannelMode) -> ChannelRoleList {
        mode.roles(self.lfe_on)
    }

    /// Reads the two 14-bit additional fields as `timecod1`/`timecod2`.
    pub fn timecode(&self) -> Option<Timecode> {
        if self.additional_downmix_info.is_none() && self.additional_mix_info.is_none() {
            return None;
        }

        let first = self.additional_downmix_info.unwrap_or_default();
        let second = self.additional_mix_info.unwrap_or_default();

        Some(Timecode {
            hours: (first >> 9) as u8,
            minutes: (first >> 3 & 0x3F) as u8,
            seconds: ((first & 0x7) * 8 + (second >> 11)) as u8,
            frames: (second >> 6 & 0x1F) as u8,
            frame_fraction: (second & 0x3F) as u8,
        })
    }

    /// Reads the two 14-bit additional fields as `xbsi1`/`xbsi2`.
    pub fn extended_bsi(&self) -> Option<ExtendedBsi> {
        if self.additional_downmix_info.is_none() && self.additional_mix_info.is_none() {
            return None;
        }

        Some(ExtendedBsi {
            xbsi1: self.additional_downmix_info.map(|v| ExtendedDownmix {
                dmixmod: (v >> 12) as u8,
                ltrt_center_mix: (v >> 9 & 7) as u8,
                ltrt_surround_mix: (v >> 6 & 7) as u8,
                loro_center_mix: (v >> 3 & 7) as u8,
                loro_surround_mix: (v & 7) as u8,
            }),
            xbsi2: self.additional_mix_info.map(|v| ExtendedProduction {
                dsurexmod: (v >> 12) as u8,
                dheadphonmod: (v >> 10 & 3) as u8,
                adconvtyp: v >> 9 & 1 != 0,
                xbsi2: (v >> 1 & 0xFF) as u8,
                encinfo: v & 1 != 0,
            }),
        })
    }

    /// Interprets the additional fields according to `mode`.
    ///
    /// The raw values are untouched either way, so the interpretation has no
    /// effect on encoding.
    pub fn additional_info(
        &self,
        mode: AdditionalInfoMode,
        variant: HeaderVariant,
    ) -> AdditionalInfo {
        let info = match mode.resolve(variant) {
            AdditionalInfoMode::ExtendedBsi => self.extended_bsi().map(AdditionalInfo::ExtendedBsi),
            _ => self.timecode().map(AdditionalInfo::Timecode),
        };

        info.unwrap_or(AdditionalInfo::None)
    }
}

/// How to read `additional_downmix_info` / `additional_mix_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdditionalInfoMode {
    /// Timecode for [`HeaderVariant::Legacy`], extended BSI for
    /// [`HeaderVariant::Alternate`].
    #[default]
    Auto,
    Timecode,
    ExtendedBsi,
}

impl AdditionalInfoMode {
    pub fn resolve(self, variant: HeaderVariant) -> Self {
        match (self, variant) {
            (AdditionalInfoMode::Auto, HeaderVariant::Legacy) => AdditionalInfoMode::Timecode,
            (AdditionalInfoMode::Auto, HeaderVariant::Alternate) => AdditionalInfoMode::ExtendedBsi,
            (mode, _) => mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdditionalInfo {
    None,
    Timecode(Timecode),
    ExtendedBsi(ExtendedBsi),
}

/// SMPTE style timecode carried in `timecod1`/`timecod2`. A missing half
/// reads as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
    /// 1/64 frame units.
    pub frame_fraction: u8,
}

impl Display for Timecode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}+{}/64",
            self.hours, self.minutes, self.seconds, self.frames, self.frame_fraction
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedBsi {
    pub xbsi1: Option<ExtendedDownmix>,
    pub xbsi2: Option<ExtendedProduction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedDownmix {
    pub dmixmod: u8,
    pub ltrt_center_mix: u8,
    pub ltrt_surround_mix: u8,
    pub loro_center_mix: u8,
    pub loro_surround_mix: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedProduction {
    pub dsurexmod: u8,
    pub dheadphonmod: u8,
    pub adconvtyp: bool,
    pub xbsi2: u8,
    pub encinfo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::option;
    use proptest::prelude::*;

    use crate::utils::bitstream_io::BsIoSliceReader;
    use crate::utils::testing::{STEREO_BSI, ac3_context, assert_bits_eq};

    fn decode(ctx: &Ac3Context, data: &[u8]) -> Result<(Bsi, u64)> {
        let mut reader = BsIoSliceReader::from_slice(data);
        let bsi = Bsi::read(ctx, &mut reader)?;

        Ok((bsi, reader.position()))
    }

    fn production() -> impl Strategy<Value = Option<ProductionInfo>> {
        option::of(
            (0u8..32, 0u8..4).prop_map(|(mix_level, room_type)| ProductionInfo {
                mix_level,
                room_type,
            }),
        )
    }

    /// Every field at an arbitrary in-range value, whether coded or not.
    fn any_bsi() -> impl Strategy<Value = Bsi> {
        (
            (0u8..4, 0u8..64, 0u8..64, 0u8..4, any::<bool>(), 0u8..32),
            (option::of(any::<u8>()), option::of(any::<u8>()), production()),
            (0u8..32, option::of(any::<u8>()), option::of(any::<u8>()), production()),
            (any::<bool>(), any::<bool>()),
            (option::of(0u16..1 << 14), option::of(0u16..1 << 14)),
            option::of(vec(any::<u8>(), 1..=64)),
        )
            .prop_map(|(first, program, second, flags, additional, addbsi)| {
                let (dmixmod, center_downmix, surround_downmix, dsurmod, lfe_on, dialnorm) = first;
                let (compr, langcod, production) = program;
                let (dialnorm2, compr2, langcod2, production2) = second;
                let (copyright, original) = flags;
                let (additional_downmix_info, additional_mix_info) = additional;

                Bsi {
                    dmixmod,
                    center_downmix,
                    surround_downmix,
                    dsurmod,
                    lfe_on,
                    dialnorm,
                    compr,
                    langcod,
                    production,
                    dialnorm2,
                    compr2,
                    langcod2,
                    production2,
                    copyright,
                    original,
                    additional_downmix_info,
                    additional_mix_info,
                    addbsi,
                }
            })
    }

    /// Resets every field `ctx` does not code, so the decoded struct compares
    /// equal.
    fn coded_only(ctx: &Ac3Context, bsi: Bsi) -> Bsi {
        let mode = ctx.channel_mode;
        let downmix_mask = (1u8 << ctx.variant.downmix_bits()) - 1;
        let dual_mono = mode.is_dual_mono();

        Bsi {
            dmixmod: if has_dmixmod(ctx) { bsi.dmixmod } else { 0 },
            center_downmix: if has_center_downmix(mode) {
                bsi.center_downmix & downmix_mask
            } else {
                0
            },
            surround_downmix: if mode.has_surround() {
                bsi.surround_downmix & downmix_mask
            } else {
                0
            },
            dsurmod: if mode.is_stereo() { bsi.dsurmod } else { 0 },
            dialnorm2: if dual_mono { bsi.dialnorm2 } else { 0 },
            compr2: bsi.compr2.filter(|_| dual_mono),
            langcod2: bsi.langcod2.filter(|_| dual_mono),
            production2: bsi.production2.filter(|_| dual_mono),
            ..bsi
        }
    }

    proptest! {
        #[test]
        fn round_trip_fields(
            (ctx, bsi) in (ac3_context(), any_bsi())
                .prop_map(|(ctx, bsi)| (ctx, coded_only(&ctx, bsi)))
        ) {
            let (encoded, bits) = bsi.to_bytes(&ctx).unwrap();

            let (decoded, consumed) = decode(&ctx, &encoded).unwrap();
            prop_assert_eq!(&decoded, &bsi);
            prop_assert_eq!(consumed, bits);

            prop_assert_eq!(decoded.to_bytes(&ctx).unwrap().0, encoded);
        }

        #[test]
        fn round_trip_bits(
            ctx in ac3_context(),
            input in vec(any::<u8>(), MAX_BSI_BYTES)
        ) {
            let (bsi, consumed) = decode(&ctx, &input).unwrap();
            let (encoded, bits) = bsi.to_bytes(&ctx).unwrap();

            prop_assert_eq!(bits, consumed);
            assert_bits_eq(&encoded, &input, consumed);
        }
    }

    #[test]
    fn stereo_scenario() -> Result<()> {
        let ctx = Ac3Context::new(ChannelMode::Stereo);
        let (bsi, bits) = decode(&ctx, STEREO_BSI)?;

        assert_eq!(bits, 16);
        assert_eq!(bsi.dsurmod, 1);
        assert!(bsi.lfe_on);
        assert_eq!(bsi.dialnorm, 20);
        assert_eq!(bsi.compr, None);
        assert_eq!(bsi.langcod, None);
        assert_eq!(bsi.production, None);
        assert_eq!(bsi.additional_downmix_info, None);
        assert_eq!(bsi.additional_mix_info, None);
        assert_eq!(bsi.addbsi, None);
        assert_eq!(bsi.dialogue_level_db(), -20);

        let (encoded, encoded_bits) = bsi.to_bytes(&ctx)?;
        assert_eq!(encoded_bits, 16);
        assert_eq!(encoded, STEREO_BSI);

        Ok(())
    }

    #[test]
    fn dual_mono_duplicates_fields() -> Result<()> {
        let ctx = Ac3Context::new(ChannelMode::DualMono);

        let bsi = Bsi {
            dialnorm: 27,
            compr: Some(0x80),
            dialnorm2: 24,
            langcod2: Some(9),
            production2: Some(ProductionInfo {
                mix_level: 31,
                room_type: 2,
            }),
            ..Default::default()
        };

        let (encoded, bits) = bsi.to_bytes(&ctx)?;
        // lfeon, dialnorm, compr, langcod, audprodie, dialnorm2, compr2e,
        // langcod2, audprodi2, copyright, origbs, timecod1e, timecod2e, addbsie
        assert_eq!(bits, 1 + 5 + 9 + 1 + 1 + 5 + 1 + 9 + 8 + 1 + 1 + 1 + 1 + 1);

        let (decoded, _) = decode(&ctx, &encoded)?;
        assert_eq!(decoded, bsi);

        // The same bits read as mono stop after the first program.
        let (mono, consumed) = decode(&Ac3Context::new(ChannelMode::Mono), &encoded)?;
        assert_eq!(mono.dialnorm2, 0);
        assert_eq!(mono.production2, None);
        assert!(consumed < bits);

        Ok(())
    }

    #[test]
    fn alternate_downmix_widths() -> Result<()> {
        let legacy = Ac3Context::new(ChannelMode::ThreeTwo);
        let alternate = legacy.with_variant(HeaderVariant::Alternate);

        let bsi = Bsi {
            center_downmix: 2,
            surround_downmix: 1,
            ..Default::default()
        };

        let (_, legacy_bits) = bsi.to_bytes(&legacy)?;
        let (_, alternate_bits) = bsi.to_bytes(&alternate)?;
        assert_eq!(alternate_bits - legacy_bits, 2 + 4 + 4);

        // 6-bit codes do not fit the legacy layout
        let wide = Bsi {
            center_downmix: 0x2A,
            dmixmod: 3,
            ..Default::default()
        };
        let (encoded, _) = wide.to_bytes(&alternate)?;
        let (decoded, _) = decode(&alternate, &encoded)?;
        assert_eq!(decoded.center_downmix, 0x2A);
        assert_eq!(decoded.dmixmod, 3);

        let err = wide.to_bytes(&legacy).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HeaderError>(),
            Some(HeaderError::ValueTooWide { value: 0x2A, bits: 2 })
        ));

        // dmixmod is never coded for mono, even in the alternate layout
        let mono = Ac3Context::new(ChannelMode::Mono).with_variant(HeaderVariant::Alternate);
        let (_, mono_bits) = Bsi::default().to_bytes(&mono)?;
        assert_eq!(mono_bits, 1 + 5 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1);

        Ok(())
    }

    #[test]
    fn addbsi_payload() -> Result<()> {
        let ctx = Ac3Context::new(ChannelMode::Stereo);

        let bsi = Bsi {
            addbsi: Some(vec![0xDE, 0xAD, 0xBE]),
            ..Default::default()
        };
        let (encoded, bits) = bsi.to_bytes(&ctx)?;
        assert_eq!(bits, 16 + 6 + 24);
        assert_eq!(decode(&ctx, &encoded)?.0.addbsi, Some(vec![0xDE, 0xAD, 0xBE]));

        for len in [0, 65] {
            let bsi = Bsi {
                addbsi: Some(vec![0; len]),
                ..Default::default()
            };
            let err = bsi.to_bytes(&ctx).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<HeaderError>(),
                Some(HeaderError::PayloadLength { field: "addbsi", .. })
            ));
        }

        Ok(())
    }

    #[test]
    fn truncated_input() {
        let ctx = Ac3Context::new(ChannelMode::ThreeTwo);

        let err = decode(&ctx, &[0xFF]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HeaderError>(),
            Some(HeaderError::OutOfData { .. })
        ));
    }

    #[test]
    fn additional_info_interpretations() {
        let bsi = Bsi {
            // 01:02, 8-second unit 3
            additional_downmix_info: Some(1 << 9 | 2 << 3 | 3),
            // second 5, frame 12, fraction 7
            additional_mix_info: Some(5 << 11 | 12 << 6 | 7),
            ..Default::default()
        };

        let timecode = bsi.timecode().unwrap();
        assert_eq!(format!("{timecode}"), "01:02:29:12+7/64");

        let legacy = bsi.additional_info(AdditionalInfoMode::Auto, HeaderVariant::Legacy);
        assert_eq!(legacy, AdditionalInfo::Timecode(timecode));

        let alternate = bsi.additional_info(AdditionalInfoMode::Auto, HeaderVariant::Alternate);
        let AdditionalInfo::ExtendedBsi(xbsi) = alternate else {
            panic!("expected extended BSI, got {alternate:?}");
        };

        let xbsi1 = xbsi.xbsi1.unwrap();
        assert_eq!(xbsi1.dmixmod, 0);
        assert_eq!(xbsi1.ltrt_center_mix, 1);
        assert_eq!(xbsi1.ltrt_surround_mix, 0);
        assert_eq!(xbsi1.loro_center_mix, 2);
        assert_eq!(xbsi1.loro_surround_mix, 3);

        let xbsi2 = xbsi.xbsi2.unwrap();
        assert_eq!(xbsi2.dsurexmod, 2);
        assert_eq!(xbsi2.dheadphonmod, 2);
        assert!(xbsi2.adconvtyp);
        assert_eq!(xbsi2.xbsi2, 131);
        assert!(xbsi2.encinfo);

        // forcing either interpretation ignores the variant
        assert_eq!(
            bsi.additional_info(AdditionalInfoMode::Timecode, HeaderVariant::Alternate),
            legacy
        );
        assert_eq!(
            bsi.additional_info(AdditionalInfoMode::ExtendedBsi, HeaderVariant::Legacy),
            alternate
        );

        assert_eq!(
            Bsi::default().additional_info(AdditionalInfoMode::Auto, HeaderVariant::Legacy),
            AdditionalInfo::None
        );
    }
}
