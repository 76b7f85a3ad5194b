//! AC-3 family frame context.
//!
//! Values parsed by the frame sync layer ahead of the bitstream information
//! block. They gate which BSI and mixing metadata fields are present.

use anyhow::{Result, bail};
use std::fmt::Display;

use crate::structs::channel::{ChannelRoleList, ReferenceChannelRole};

/// Audio coding mode (`acmod`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelMode {
    /// 1+1, two independent mono programs.
    DualMono,
    /// 1/0
    Mono,
    /// 2/0
    Stereo,
    /// 3/0
    ThreeFront,
    /// 2/1
    TwoOne,
    /// 3/1
    ThreeOne,
    /// 2/2
    TwoTwo,
    /// 3/2
    ThreeTwo,
}

impl ChannelMode {
    pub const ALL: [ChannelMode; 8] = [
        ChannelMode::DualMono,
        ChannelMode::Mono,
        ChannelMode::Stereo,
        ChannelMode::ThreeFront,
        ChannelMode::TwoOne,
        ChannelMode::ThreeOne,
        ChannelMode::TwoTwo,
        ChannelMode::ThreeTwo,
    ];

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0..=7 => Ok(Self::ALL[code as usize]),
            _ => bail!("Invalid acmod: {code}"),
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Odd modes code a centre channel. Mono counts: its only channel is the centre.
    pub fn has_front3(&self) -> bool {
        self.code() & 1 != 0
    }

    pub fn has_surround(&self) -> bool {
        self.code() & 4 != 0
    }

    pub fn is_dual_mono(&self) -> bool {
        *self == ChannelMode::DualMono
    }

    pub fn is_mono(&self) -> bool {
        *self == ChannelMode::Mono
    }

    pub fn is_stereo(&self) -> bool {
        *self == ChannelMode::Stereo
    }

    /// Number of full-bandwidth channels.
    pub fn channels(&self) -> usize {
        match self {
            ChannelMode::DualMono => 2,
            ChannelMode::Mono => 1,
            ChannelMode::Stereo => 2,
            ChannelMode::ThreeFront | ChannelMode::TwoOne => 3,
            ChannelMode::ThreeOne | ChannelMode::TwoTwo => 4,
            ChannelMode::ThreeTwo => 5,
        }
    }

    /// Channel roles for this mode, in channel-mask order.
    ///
    /// Dual mono reports its two programs as the front pair and a single
    /// surround channel is the rear centre.
    pub fn roles(&self, lfe_on: bool) -> ChannelRoleList {
        let mut mask = match self {
            ChannelMode::Mono => 0b10,
            _ => 0b1,
        };

        if self.has_front3() && !self.is_mono() {
            mask |= 0b10;
        }

        match self {
            ChannelMode::TwoOne | ChannelMode::ThreeOne => mask |= 1 << 7,
            ChannelMode::TwoTwo | ChannelMode::ThreeTwo => mask |= 1 << 3,
            _ => {}
        }

        if lfe_on {
            mask |= 0b100;
        }

        ReferenceChannelRole::from_mask(mask, 13)
    }
}

impl Display for ChannelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelMode::DualMono => write!(f, "1+1"),
            ChannelMode::Mono => write!(f, "1/0"),
            ChannelMode::Stereo => write!(f, "2/0"),
            ChannelMode::ThreeFront => write!(f, "3/0"),
            ChannelMode::TwoOne => write!(f, "2/1"),
            ChannelMode::ThreeOne => write!(f, "3/1"),
            ChannelMode::TwoTwo => write!(f, "2/2"),
            ChannelMode::ThreeTwo => write!(f, "3/2"),
        }
    }
}

/// Selects the width of the downmix level codes in the BSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderVariant {
    /// 2-bit centre/surround downmix codes.
    #[default]
    Legacy,
    /// `dmixmod` plus 6-bit centre/surround downmix codes.
    Alternate,
}

impl HeaderVariant {
    pub fn downmix_bits(&self) -> u32 {
        match self {
            HeaderVariant::Legacy => 2,
            HeaderVariant::Alternate => 6,
        }
    }
}

/// E-AC-3 stream type (`strmtyp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StreamType {
    #[default]
    Independent,
    Dependent,
    Ac3Convert,
    Reserved,
}

impl StreamType {
    pub const ALL: [StreamType; 4] = [
        StreamType::Independent,
        StreamType::Dependent,
        StreamType::Ac3Convert,
        StreamType::Reserved,
    ];

    /// Maps the 2-bit `strmtyp` code. Only the low two bits are considered.
    pub fn from_code(code: u8) -> Self {
        Self::ALL[(code & 3) as usize]
    }
}

/// Number of audio blocks per frame for each `numblkscod`.
pub const NUM_BLOCKS: [u8; 4] = [1, 2, 3, 6];

/// Everything the BSI and mixing metadata codecs need from the surrounding
/// frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ac3Context {
    pub channel_mode: ChannelMode,
    pub stream_type: StreamType,
    pub variant: HeaderVariant,
    /// Coded audio blocks in the frame (1, 2, 3 or 6).
    pub num_blocks: u8,
    /// LFE state for the mixing metadata block. [`crate::process::ac3::Ac3Parser`]
    /// fills this from the decoded BSI.
    pub lfe_on: bool,
    /// Whether a mixing metadata block follows the BSI.
    pub mixing_metadata: bool,
}

impl Ac3Context {
    pub fn new(channel_mode: ChannelMode) -> Self {
        Self {
            channel_mode,
            stream_type: StreamType::Independent,
            variant: HeaderVariant::Legacy,
            num_blocks: 6,
            lfe_on: false,
            mixing_metadata: false,
        }
    }

    pub fn with_stream_type(mut self, stream_type: StreamType) -> Self {
        self.stream_type = stream_type;
        self
    }

    pub fn with_variant(mut self, variant: HeaderVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_num_blocks(mut self, num_blocks: u8) -> Self {
        self.num_blocks = num_blocks;
        self
    }

    pub fn with_lfe(mut self, lfe_on: bool) -> Self {
        self.lfe_on = lfe_on;
        self
    }

    pub fn with_mixing_metadata(mut self, mixing_metadata: bool) -> Self {
        self.mixing_metadata = mixing_metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::channel::ReferenceChannelRole::*;

    #[test]
    fn mode_predicates() -> Result<()> {
        let expected = [
            // front3, surround
            (false, false),
            (true, false),
            (false, false),
            (true, false),
            (false, true),
            (true, true),
            (false, true),
            (true, true),
        ];

        for (code, (front3, surround)) in expected.into_iter().enumerate() {
            let mode = ChannelMode::from_code(code as u8)?;
            assert_eq!(mode.code(), code as u8);
            assert_eq!(mode.has_front3(), front3, "acmod {code}");
            assert_eq!(mode.has_surround(), surround, "acmod {code}");
        }

        assert!(ChannelMode::from_code(8).is_err());
        assert!(ChannelMode::DualMono.is_dual_mono());
        assert!(ChannelMode::Mono.is_mono());
        assert!(ChannelMode::Stereo.is_stereo());

        Ok(())
    }

    #[test]
    fn roles_match_channel_count() {
        for mode in ChannelMode::ALL {
            assert_eq!(mode.roles(false).len(), mode.channels(), "{mode}");
            assert_eq!(mode.roles(true).len(), mode.channels() + 1, "{mode}");
        }

        assert_eq!(ChannelMode::Mono.roles(false), vec![FrontCenter]);
        assert_eq!(
            ChannelMode::ThreeTwo.roles(true),
            vec![FrontLeft, FrontRight, FrontCenter, Lfe, SideLeft, SideRight]
        );
        assert_eq!(
            ChannelMode::TwoOne.roles(false),
            vec![FrontLeft, FrontRight, RearCenter]
        );
    }

    #[test]
    fn stream_type_codes() {
        assert_eq!(StreamType::from_code(0), StreamType::Independent);
        assert_eq!(StreamType::from_code(2), StreamType::Ac3Convert);
        assert_eq!(StreamType::from_code(7), StreamType::Reserved);
    }
}
