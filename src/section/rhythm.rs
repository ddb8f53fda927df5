//! Section 6: rhythm data, stored uncompressed as 16-bit samples.

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::warn;

use crate::codes::{BIMODAL_COMPRESSION_FALSE, ENCODING_REAL, MAX_RHYTHM_SAMPLES};
use crate::error::{Result, ScpError};
use crate::recording::{ExportOptions, Recording};

/// Fixed part before the per-lead byte counts.
pub const RHYTHM_HEADER_LEN: usize = 6;

/// Number of samples per lead that Section 6 can declare.
pub fn stored_samples(n_samples: usize) -> usize {
    n_samples.min(MAX_RHYTHM_SAMPLES)
}

/// Encode the Section 6 payload.
///
/// Each lead's byte count is a u16, so at most [`MAX_RHYTHM_SAMPLES`] samples
/// per lead are written; the rest are dropped.
pub fn rhythm_data(recording: &Recording, opts: &ExportOptions) -> Result<Vec<u8>> {
    let interval_us = opts.sample_interval_us()?;
    let n_samples = stored_samples(recording.n_samples());
    if n_samples < recording.n_samples() {
        warn!(
            samples = recording.n_samples(),
            max = MAX_RHYTHM_SAMPLES,
            "rhythm data truncated to the 16-bit series length limit"
        );
    }
    let bytes_per_lead = (n_samples * 2) as u16;

    let mut out = Vec::with_capacity(
        RHYTHM_HEADER_LEN + recording.n_leads() * (2 + n_samples * 2),
    );
    out.write_u16::<LittleEndian>(opts.amplitude_nanovolt)?;
    out.write_u16::<LittleEndian>(interval_us)?;
    out.write_u8(ENCODING_REAL)?;
    out.write_u8(BIMODAL_COMPRESSION_FALSE)?;
    for _ in 0..recording.n_leads() {
        out.write_u16::<LittleEndian>(bytes_per_lead)?;
    }
    for (lead, samples) in recording.leads().enumerate() {
        for (index, &value) in samples[..n_samples].iter().enumerate() {
            let value = i16::try_from(value)
                .map_err(|_| ScpError::SampleOutOfRange { lead, index, value })?;
            out.write_i16::<LittleEndian>(value)?;
        }
    }
    Ok(out)
}
