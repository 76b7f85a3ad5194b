//! Channel role mapping.
//!
//! Turns channel assignment bitmasks into ordered lists of logical channel
//! roles. Bits are tested from least to most significant and each set bit
//! appends its role, or role pair, to the list.

use std::fmt::Display;

/// Logical role of a coded channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceChannelRole {
    FrontLeft,
    FrontRight,
    FrontCenter,
    Lfe,
    SideLeft,
    SideRight,
    FrontLeftCenter,
    FrontRightCenter,
    RearLeft,
    RearRight,
    RearCenter,
    WideLeft,
    WideRight,
    TopFrontLeft,
    TopFrontRight,
    TopFrontCenter,
    TopCenter,
    Lfe2,
}

/// Ordered sequence of channel roles.
pub type ChannelRoleList = Vec<ReferenceChannelRole>;

use ReferenceChannelRole::*;

/// Roles appended for each bit of an MLP channel assignment mask.
///
/// Bit 9 carries the direct (point-source) surrounds, which share the side
/// pair with bit 3.
pub const CHANNEL_MASK_ROLES: [&[ReferenceChannelRole]; 13] = [
    &[FrontLeft, FrontRight],
    &[FrontCenter],
    &[Lfe],
    &[SideLeft, SideRight],
    &[TopFrontLeft, TopFrontRight],
    &[FrontLeftCenter, FrontRightCenter],
    &[RearLeft, RearRight],
    &[RearCenter],
    &[TopCenter],
    &[SideLeft, SideRight],
    &[WideLeft, WideRight],
    &[TopFrontCenter],
    &[Lfe2],
];

impl ReferenceChannelRole {
    /// Expands the low `bits` bits of `mask` into a role list.
    ///
    /// Bits beyond the 13 known positions are ignored.
    pub fn from_mask(mask: u16, bits: u32) -> ChannelRoleList {
        let mut roles = ChannelRoleList::new();

        for (i, group) in CHANNEL_MASK_ROLES
            .iter()
            .enumerate()
            .take(bits.min(CHANNEL_MASK_ROLES.len() as u32) as usize)
        {
            if mask >> i & 1 == 1 {
                roles.extend_from_slice(group);
            }
        }

        roles
    }
}

impl Display for ReferenceChannelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FrontLeft => "L",
            FrontRight => "R",
            FrontCenter => "C",
            Lfe => "LFE",
            SideLeft => "Ls",
            SideRight => "Rs",
            FrontLeftCenter => "Lc",
            FrontRightCenter => "Rc",
            RearLeft => "Lb",
            RearRight => "Rb",
            RearCenter => "Cb",
            WideLeft => "Lw",
            WideRight => "Rw",
            TopFrontLeft => "Tfl",
            TopFrontRight => "Tfr",
            TopFrontCenter => "Tfc",
            TopCenter => "Tc",
            Lfe2 => "LFE2",
        };

        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bits() {
        assert_eq!(
            ReferenceChannelRole::from_mask(0b1, 13),
            vec![FrontLeft, FrontRight]
        );
        assert_eq!(ReferenceChannelRole::from_mask(0b10, 13), vec![FrontCenter]);
        assert_eq!(ReferenceChannelRole::from_mask(0b100, 5), vec![Lfe]);
        assert_eq!(ReferenceChannelRole::from_mask(1 << 12, 13), vec![Lfe2]);
    }

    #[test]
    fn direct_surrounds_alias_side_pair() {
        assert_eq!(
            ReferenceChannelRole::from_mask(1 << 9, 13),
            ReferenceChannelRole::from_mask(1 << 3, 13)
        );
        assert_eq!(
            ReferenceChannelRole::from_mask(1 << 9, 13),
            vec![SideLeft, SideRight]
        );
    }

    #[test]
    fn low_to_high_order() {
        // 7.1.2 style layout: L R C LFE Ls Rs Tfl Tfr Lb Rb
        let roles = ReferenceChannelRole::from_mask(0b101_1111, 13);
        assert_eq!(
            roles,
            vec![
                FrontLeft,
                FrontRight,
                FrontCenter,
                Lfe,
                SideLeft,
                SideRight,
                TopFrontLeft,
                TopFrontRight,
                RearLeft,
                RearRight
            ]
        );

        let labels: Vec<String> = roles.iter().map(ToString::to_string).collect();
        assert_eq!(labels.join(" "), "L R C LFE Ls Rs Tfl Tfr Lb Rb");
    }

    #[test]
    fn width_limits_mask() {
        assert!(ReferenceChannelRole::from_mask(0xFFE0, 5).is_empty());
        assert!(ReferenceChannelRole::from_mask(0, 13).is_empty());
        assert_eq!(ReferenceChannelRole::from_mask(0x1FFF, 13).len(), 20);
    }
}
