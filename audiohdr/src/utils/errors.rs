use std::io;

#[macro_export]
macro_rules! log_or_err {
    ($state:expr, $level:expr, $err:expr $(,)?) => {{
        if $level <= $state.fail_level {
            return Err($err);
        } else {
            match $level {
                ::log::Level::Error => ::log::error!("{}", $err),
                ::log::Level::Warn => ::log::warn!("{}", $err),
                ::log::Level::Info => ::log::info!("{}", $err),
                ::log::Level::Debug => ::log::debug!("{}", $err),
                ::log::Level::Trace => ::log::trace!("{}", $err),
            }
        }
    }};
}

/// Errors raised while decoding or encoding a header.
///
/// `Sync`, `UnsupportedFeature` and `OutOfData` are always fatal for the header
/// being processed. Parse functions return [`anyhow::Result`]; recover the kind
/// with `err.downcast_ref::<HeaderError>()`.
#[derive(thiserror::Error, Debug)]
pub enum HeaderError {
    #[error("Sync mismatch: expected {expected:#X}, found {found:#X}")]
    Sync { expected: u32, found: u32 },

    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("Out of data: {needed} bits needed, {available} bits available")]
    OutOfData { needed: u64, available: u64 },

    #[error("Value {value:#X} does not fit in {bits} bits")]
    ValueTooWide { value: u64, bits: u32 },

    #[error("{field} payload of {len} bytes cannot be coded")]
    PayloadLength { field: &'static str, len: usize },

    #[error("{0} block is not signalled by the frame header")]
    UnsignalledBlock(&'static str),

    #[error("Access unit failed the nibble check. Calculated {0:#X}")]
    CheckNibble(u8),

    #[error("{field} must be constant throughout the stream. Read {current}, expected {previous}")]
    ParameterChanged {
        field: &'static str,
        previous: u32,
        current: u32,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl HeaderError {
    /// Short name of the error kind, suitable for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sync { .. } => "sync",
            Self::UnsupportedFeature(_) => "unsupported",
            Self::OutOfData { .. } => "out-of-data",
            Self::ValueTooWide { .. }
            | Self::PayloadLength { .. }
            | Self::UnsignalledBlock(_) => "encode",
            Self::CheckNibble(_) | Self::ParameterChanged { .. } => "consistency",
            Self::Io(_) => "io",
        }
    }
}

#[test]
fn error_kinds() {
    let err = anyhow::anyhow!(HeaderError::Sync {
        expected: 0xF8726FBA,
        found: 0
    });

    let header_err = err.downcast_ref::<HeaderError>().unwrap();
    assert_eq!(header_err.kind(), "sync");
    assert_eq!(
        format!("{err}"),
        "Sync mismatch: expected 0xF8726FBA, found 0x0"
    );

    let err = HeaderError::OutOfData {
        needed: 8,
        available: 3,
    };
    assert_eq!(err.kind(), "out-of-data");
}
