//! Caller-owned inputs of an export: the sample matrix, the patient and
//! acquisition metadata, and the physical scaling options.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::codes::{SEX_FEMALE, SEX_MALE, SEX_UNKNOWN, SEX_UNSPECIFIED};
use crate::error::{Result, ScpError};
use crate::leads::LeadOrder;

/// Default sample resolution (bits).  The only one Section 6 supports here.
pub const DEFAULT_SAMPLE_BITS:        u8  = 16;
/// Default sample rate (Hz).
pub const DEFAULT_SAMPLE_RATE_HZ:     u32 = 500;
/// Default amplitude quantum: one sample unit is 5000 nV.
pub const DEFAULT_AMPLITUDE_NANOVOLT: u16 = 5000;

// ── Recording ────────────────────────────────────────────────────────────────

/// `leads × samples` matrix of signed samples, row-major by lead.
///
/// Every lead has the same number of samples; either dimension may be zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recording {
    n_leads:   usize,
    n_samples: usize,
    data:      Vec<i32>,
}

impl Recording {
    /// All-zero recording.
    pub fn zeros(n_leads: usize, n_samples: usize) -> Self {
        Self { n_leads, n_samples, data: vec![0; n_leads * n_samples] }
    }

    /// Wrap a flat row-major buffer.
    pub fn from_flat(n_leads: usize, n_samples: usize, data: Vec<i32>) -> Result<Self> {
        if data.len() != n_leads * n_samples {
            return Err(ScpError::ShapeMismatch { n_leads, n_samples, len: data.len() });
        }
        Ok(Self { n_leads, n_samples, data })
    }

    /// Build from one vector per lead.  All leads must be the same length.
    pub fn from_leads(leads: Vec<Vec<i32>>) -> Result<Self> {
        let n_leads = leads.len();
        let n_samples = leads.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_leads * n_samples);
        for (lead, samples) in leads.into_iter().enumerate() {
            if samples.len() != n_samples {
                return Err(ScpError::LeadLengthMismatch {
                    lead,
                    expected: n_samples,
                    actual:   samples.len(),
                });
            }
            data.extend(samples);
        }
        Ok(Self { n_leads, n_samples, data })
    }

    pub fn n_leads(&self) -> usize { self.n_leads }

    pub fn n_samples(&self) -> usize { self.n_samples }

    /// Samples of one lead.  Panics if `index >= n_leads()`.
    pub fn lead(&self, index: usize) -> &[i32] {
        let start = index * self.n_samples;
        &self.data[start..start + self.n_samples]
    }

    pub fn leads(&self) -> impl Iterator<Item = &[i32]> {
        (0..self.n_leads).map(move |i| self.lead(i))
    }
}

// ── Acquisition metadata ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Unknown,
    Male,
    Female,
    Unspecified,
}

impl Sex {
    /// Section 1 sex code.
    pub fn code(self) -> u8 {
        match self {
            Sex::Unknown     => SEX_UNKNOWN,
            Sex::Male        => SEX_MALE,
            Sex::Female      => SEX_FEMALE,
            Sex::Unspecified => SEX_UNSPECIFIED,
        }
    }
}

/// Patient and acquisition details written to Section 1.
///
/// Nothing here is validated; values are encoded as given.  Weight and age
/// use 0 for "not specified".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acquisition {
    pub timestamp:    NaiveDateTime,
    pub patient_name: String,
    pub patient_case: String,
    pub sex:          Sex,
    /// Kilograms.
    pub weight:       u16,
    /// Years.
    pub age:          u16,
    pub device_id:    String,
}

impl Default for Acquisition {
    fn default() -> Self {
        Self {
            timestamp:    default_timestamp(),
            patient_name: "anonymized".to_owned(),
            patient_case: "unknown_case".to_owned(),
            sex:          Sex::Unknown,
            weight:       0,
            age:          0,
            device_id:    "unknown_machine".to_owned(),
        }
    }
}

fn default_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 1, 1)
        .and_then(|d| d.and_hms_opt(1, 1, 1))
        .unwrap_or_default()
}

impl Acquisition {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ── ExportOptions ────────────────────────────────────────────────────────────

/// Configuration for [`crate::encode_scp`] and the writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub sample_bits:        u8,
    pub sample_rate_hz:     u32,
    /// Nanovolts represented by one sample unit.
    pub amplitude_nanovolt: u16,
    pub lead_order:         LeadOrder,
    /// Replace an existing output file instead of failing.
    pub overwrite:          bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sample_bits:        DEFAULT_SAMPLE_BITS,
            sample_rate_hz:     DEFAULT_SAMPLE_RATE_HZ,
            amplitude_nanovolt: DEFAULT_AMPLITUDE_NANOVOLT,
            lead_order:         LeadOrder::default(),
            overwrite:          false,
        }
    }
}

impl ExportOptions {
    /// Sample interval in whole microseconds (truncated).
    pub fn sample_interval_us(&self) -> Result<u16> {
        if self.sample_rate_hz == 0 {
            return Err(ScpError::InvalidSampleRate(0));
        }
        u16::try_from(1_000_000 / self.sample_rate_hz)
            .map_err(|_| ScpError::InvalidSampleRate(self.sample_rate_hz))
    }

    /// Reject configurations that cannot be encoded, before any bytes are built.
    pub fn validate(&self, recording: &Recording) -> Result<()> {
        if self.sample_bits != DEFAULT_SAMPLE_BITS {
            return Err(ScpError::UnsupportedSampleBits(self.sample_bits));
        }
        self.sample_interval_us()?;
        self.lead_order.check_covers(recording.n_leads())
    }
}
