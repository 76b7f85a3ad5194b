use std::io;

use anyhow::{Context, Result, anyhow};
use log::Level::{Error, Warn};
use log::trace;

use crate::log_or_err;
use crate::structs::substream::SubstreamDirectory;
use crate::structs::sync::MajorSync;
use crate::utils::bitstream_io::BsIoVecReader;
use crate::utils::errors::HeaderError;

/// Per-stream MLP major sync parser.
///
/// Reads one access unit per call from any [`io::Read`] source positioned at
/// the check nibble, consuming exactly the access unit.
#[derive(Debug, Default)]
pub struct MlpParser {
    state: MlpParserState,
}

impl MlpParser {
    pub fn parse<S: io::Read>(&mut self, source: &mut S) -> Result<MajorSync> {
        let mut reader = BsIoVecReader::from_vec(Vec::new());
        let ms = MajorSync::read_from(&mut reader, source)?;

        if self.state.verify_check_nibble {
            self.state.check_nibble(&ms, &mut reader)?;
        }

        self.state.check_constancy(&ms)?;
        self.state.commit(&ms);

        trace!(
            "MLP access unit {}: {} words",
            self.state.access_units,
            ms.access_unit_length
        );

        Ok(ms)
    }

    pub fn last_major_sync(&self) -> Option<&MajorSync> {
        self.state.last.as_ref()
    }

    /// Number of access units decoded successfully.
    pub fn access_units(&self) -> usize {
        self.state.access_units
    }

    /// Enables the check nibble test over the access unit header and the
    /// substream directory that follows the major sync. A failure is reported
    /// at [`log::Level::Error`].
    pub fn set_verify_check_nibble(&mut self, verify: bool) {
        self.state.verify_check_nibble = verify;
    }

    /// Sets the minimum log level that causes a parse failure.
    ///
    /// Defaults to [`log::Level::Error`].
    pub fn set_fail_level(&mut self, level: log::Level) {
        self.state.fail_level = level;
    }
}

#[derive(Debug)]
pub struct MlpParserState {
    pub fail_level: log::Level,
    pub verify_check_nibble: bool,

    pub sampling_frequency: Option<u32>,
    pub substreams: Option<usize>,
    pub access_units: usize,
    pub last: Option<MajorSync>,
}

impl Default for MlpParserState {
    fn default() -> Self {
        Self {
            fail_level: log::Level::Error,
            verify_check_nibble: false,
            sampling_frequency: None,
            substreams: None,
            access_units: 0,
            last: None,
        }
    }
}

impl MlpParserState {
    fn check_nibble(&self, ms: &MajorSync, reader: &mut BsIoVecReader) -> Result<()> {
        let _major_sync_info_crc: u16 = reader.get_n(16).context("major_sync_info_crc")?;

        let directory_start = reader.position();
        for i in 0..ms.substreams {
            SubstreamDirectory::read(reader).with_context(|| format!("substream directory {i}"))?;
        }
        let directory_len = reader.position() - directory_start;

        let mut parity = ms.header_parity() ^ reader.parity_check_for_last_n_bits(directory_len)?;

        parity ^= parity >> 4;
        parity &= 0xF;

        if parity != 0xF {
            log_or_err!(self, Error, anyhow!(HeaderError::CheckNibble(parity)));
        }

        Ok(())
    }

    fn check_constancy(&self, ms: &MajorSync) -> Result<()> {
        if let Some(sampling_frequency) = self.sampling_frequency {
            if sampling_frequency != ms.sampling_frequency {
                log_or_err!(
                    self,
                    Warn,
                    anyhow!(HeaderError::ParameterChanged {
                        field: "sampling_frequency",
                        previous: sampling_frequency,
                        current: ms.sampling_frequency,
                    })
                );
            }
        }

        if let Some(substreams) = self.substreams {
            if substreams != ms.substreams {
                log_or_err!(
                    self,
                    Warn,
                    anyhow!(HeaderError::ParameterChanged {
                        field: "substreams",
                        previous: substreams as u32,
                        current: ms.substreams as u32,
                    })
                );
            }
        }

        Ok(())
    }

    fn commit(&mut self, ms: &MajorSync) {
        self.sampling_frequency = Some(ms.sampling_frequency);
        self.substreams = Some(ms.substreams);
        self.access_units += 1;
        self.last = Some(ms.clone());
    }
}
