/// AC-3 / E-AC-3 header parsing.
///
/// Provides the [`Ac3Parser`](ac3::Ac3Parser) for decoding and re-encoding
/// the bitstream information and mixing metadata of consecutive frames.
pub mod ac3;

/// MLP header parsing.
///
/// Provides the [`MlpParser`](mlp::MlpParser) for decoding the major sync of
/// consecutive access units.
pub mod mlp;

/// A complete 48 kHz stereo MLP access unit starting with a major sync.
pub const EXAMPLE_ACCESS_UNIT: &[u8] = &[
    0xF0, 0x2A, 0xFF, 0xAC, 0xF8, 0x72, 0x6F, 0xBA, 0x00, 0x00, 0x80, 0x01, 0xB7, 0x52, 0x00, 0x00,
    0x00, 0x00, 0x80, 0x80, 0x10, 0x14, 0x03, 0x80, 0x3F, 0x1F, 0xE3, 0x07, 0xE3, 0x00, 0x52, 0x98,
    0xB0, 0x18, 0x03, 0xF0, 0xF1, 0xEA, 0x00, 0x00, 0x01, 0x10, 0x00, 0x00, 0x02, 0x09, 0x52, 0x80,
    0x00, 0x00, 0x00, 0x02, 0xB4, 0x44, 0x01, 0xE8, 0xC4, 0x40, 0x88, 0xD1, 0xFE, 0x91, 0x00, 0x63,
    0x03, 0xE9, 0x18, 0x33, 0x86, 0x20, 0x68, 0xFF, 0xCB, 0x6E, 0xDB, 0x6D, 0xB6, 0xDB, 0x6D, 0xB7,
    0x80, 0x00, 0x64, 0xF9,
];
