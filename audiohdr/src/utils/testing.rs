//! Helpers shared by the unit tests.

use proptest::prelude::*;
use proptest::sample::select;

use crate::structs::ac3::{Ac3Context, ChannelMode, HeaderVariant, NUM_BLOCKS, StreamType};

/// Stereo, LFE on, dialnorm 20, dsurmod 1, no optional fields.
pub const STEREO_BSI: &[u8] = &[0x74, 0x00];

/// Any combination of channel mode, header variant, stream type, block count
/// and LFE state, with a mixing metadata block following the BSI.
pub fn ac3_context() -> impl Strategy<Value = Ac3Context> {
    (
        select(ChannelMode::ALL.to_vec()),
        select(vec![HeaderVariant::Legacy, HeaderVariant::Alternate]),
        select(StreamType::ALL.to_vec()),
        select(NUM_BLOCKS.to_vec()),
        any::<bool>(),
    )
        .prop_map(|(mode, variant, stream_type, num_blocks, lfe_on)| {
            Ac3Context::new(mode)
                .with_variant(variant)
                .with_stream_type(stream_type)
                .with_num_blocks(num_blocks)
                .with_lfe(lfe_on)
                .with_mixing_metadata(true)
        })
}

/// Asserts that the first `bits` bits of `a` and `b` are identical.
pub fn assert_bits_eq(a: &[u8], b: &[u8], bits: u64) {
    let full = (bits >> 3) as usize;
    assert_eq!(a[..full], b[..full], "first {full} bytes differ");

    let rest = (bits & 7) as u32;
    if rest != 0 {
        let mask = 0xFFu8 << (8 - rest);
        assert_eq!(
            a[full] & mask,
            b[full] & mask,
            "trailing {rest} bits of byte {full} differ"
        );
    }
}
