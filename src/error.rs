use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScpError>;

#[derive(Error, Debug)]
pub enum ScpError {
    /// More leads than the lead order (or the Section 3 flag byte) can describe.
    #[error("Too many leads: {leads} (lead order covers at most {max})")]
    TooManyLeads { leads: usize, max: usize },
    #[error("Recording of {n_leads} x {n_samples} cannot hold {len} samples")]
    ShapeMismatch { n_leads: usize, n_samples: usize, len: usize },
    #[error("Lead {lead} has {actual} samples, expected {expected}")]
    LeadLengthMismatch { lead: usize, expected: usize, actual: usize },
    #[error("Sample {index} of lead {lead} does not fit in 16 bits: {value}")]
    SampleOutOfRange { lead: usize, index: usize, value: i32 },
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),
    #[error("Unsupported sample resolution: {0} bits (only 16 is supported)")]
    UnsupportedSampleBits(u8),
    #[error("Tag {tag} value is {len} bytes, more than a 16-bit length allows")]
    FieldTooLong { tag: u8, len: usize },
    #[error("Unknown lead name: {0}")]
    UnknownLead(String),
    #[error("Row {row}, column {column}: not an integer sample: {text:?}")]
    ParseSample { row: usize, column: usize, text: String },
    #[error("Contec file of {len} bytes is not a header, whole 16-byte rows and a footer")]
    ContecFileSize { len: usize },
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
