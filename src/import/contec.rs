//! Contec ECG90A recordings.
//!
//! File layout: a 43-byte header, then rows of eight little-endian 16-bit
//! values (II, III, V1..V6), then a 37-byte footer.  Raw values sit on a
//! 2048 baseline and `0x6800` marks a missing sample.  A row of raw zeros
//! ends the data.  Limb leads I, aVR, aVL and aVF are not stored; they are
//! derived from II and III.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use chrono::{DateTime, Local, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::{Result, ScpError};
use crate::leads::{LeadOrder, STANDARD_12_LEAD};
use crate::recording::{Acquisition, ExportOptions, Recording, Sex};

pub const HEADER_LEN:         usize = 43;
pub const FOOTER_LEN:         usize = 37;
/// Series stored per row: II, III, V1..V6.
pub const DATA_SERIES:        usize = 8;
pub const ROW_LEN:            usize = DATA_SERIES * 2;
/// Raw value of a missing sample.
pub const NULL_VALUE:         u16   = 0x6800;
/// Shift applied to raw values to centre them on zero.
pub const X_OFFSET:           i32   = -2048;
pub const SAMPLE_RATE_HZ:     u32   = 800;
pub const AMPLITUDE_NANOVOLT: u16   = 5000;
pub const DEVICE_ID:          &str  = "ECG90A";
pub const TIMESTAMP_FORMAT:   &str  = "%Y-%m-%d %H:%M:%S";

const CASE_LEN:      usize = 8;
const TIMESTAMP_LEN: usize = 20;
const NAME_LEN:      usize = 8;

// Device sex codes; anything else (255 on blank entries) is unknown.
const DEVICE_SEX_FEMALE: u8 = 0;
const DEVICE_SEX_MALE:   u8 = 1;

// ── Header ───────────────────────────────────────────────────────────────────

/// Patient block at the start of every file, as stored by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContecHeader {
    pub case:         String,
    /// Acquisition time text, normally [`TIMESTAMP_FORMAT`].
    pub timestamp:    String,
    pub patient_name: String,
    pub sex:          u8,
    pub age:          u8,
    pub weight:       u8,
}

impl ContecHeader {
    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        let case = read_asciiz(&mut reader, CASE_LEN)?;
        skip(&mut reader, 2)?;
        let timestamp = read_asciiz(&mut reader, TIMESTAMP_LEN)?;
        skip(&mut reader, 2)?;
        let patient_name = read_asciiz(&mut reader, NAME_LEN)?;
        let sex = reader.read_u8()?;
        let age = reader.read_u8()?;
        let weight = reader.read_u8()?;
        Ok(Self { case, timestamp, patient_name, sex, age, weight })
    }

    pub fn sex(&self) -> Sex {
        match self.sex {
            DEVICE_SEX_FEMALE => Sex::Female,
            DEVICE_SEX_MALE   => Sex::Male,
            _                 => Sex::Unknown,
        }
    }
}

/// Fixed-width text field, cut at the first NUL.
fn read_asciiz<R: Read>(reader: &mut R, len: usize) -> io::Result<String> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    let end = buf.iter().position(|&b| b == 0).unwrap_or(len);
    Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
}

fn skip<R: Read>(reader: &mut R, len: usize) -> io::Result<()> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)
}

// ── Recording ────────────────────────────────────────────────────────────────

/// A parsed device file: the standard 12 leads plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContecRecording {
    pub header:      ContecHeader,
    pub acquisition: Acquisition,
    /// Leads in [`STANDARD_12_LEAD`] order.
    pub recording:   Recording,
}

impl ContecRecording {
    /// Export options matching the device's sampling.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            sample_rate_hz:     SAMPLE_RATE_HZ,
            amplitude_nanovolt: AMPLITUDE_NANOVOLT,
            lead_order:         LeadOrder::Standard12,
            ..ExportOptions::default()
        }
    }
}

/// Read a device file.  An unparsable header timestamp is replaced by the
/// file's modification time.
pub fn read_contec_path<P: AsRef<Path>>(path: P) -> Result<ContecRecording> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let modified = fs::metadata(path)?.modified()?;
    let fallback = DateTime::<Local>::from(modified).naive_local();
    parse_contec(&bytes, fallback)
}

/// Parse the bytes of a device file.  `fallback_timestamp` stands in for a
/// header timestamp that does not parse.
pub fn parse_contec(bytes: &[u8], fallback_timestamp: NaiveDateTime) -> Result<ContecRecording> {
    let payload_len = bytes
        .len()
        .checked_sub(HEADER_LEN + FOOTER_LEN)
        .filter(|len| len % ROW_LEN == 0)
        .ok_or(ScpError::ContecFileSize { len: bytes.len() })?;

    let header = ContecHeader::read(&bytes[..HEADER_LEN])?;
    let timestamp = match NaiveDateTime::parse_from_str(&header.timestamp, TIMESTAMP_FORMAT) {
        Ok(ts) => ts,
        Err(_) => {
            warn!(
                found = %header.timestamp,
                fallback = %fallback_timestamp.format(TIMESTAMP_FORMAT),
                "bad timestamp in Contec header, using file modification time"
            );
            fallback_timestamp
        }
    };

    let expected_rows = payload_len / ROW_LEN;
    let payload = &bytes[HEADER_LEN..HEADER_LEN + payload_len];
    let mut leads = vec![Vec::with_capacity(expected_rows); STANDARD_12_LEAD.len()];
    let mut raw = [0u16; DATA_SERIES];
    for chunk in payload.chunks_exact(ROW_LEN) {
        LittleEndian::read_u16_into(chunk, &mut raw);
        if raw.iter().all(|&v| v == 0) {
            break;
        }
        for (lead, value) in leads.iter_mut().zip(derive_row(&raw)) {
            lead.push(value.unwrap_or(0));
        }
    }

    let recording = Recording::from_leads(leads)?;
    if recording.n_samples() != expected_rows {
        warn!(
            read = recording.n_samples(),
            expected = expected_rows,
            "all-zero row ended Contec data early"
        );
    }
    debug!(
        case = %header.case,
        samples = recording.n_samples(),
        "read Contec ECG90A recording"
    );

    let acquisition = Acquisition {
        timestamp,
        patient_name: header.patient_name.clone(),
        patient_case: header.case.clone(),
        sex:          header.sex(),
        weight:       u16::from(header.weight),
        age:          u16::from(header.age),
        device_id:    DEVICE_ID.to_owned(),
    };
    Ok(ContecRecording { header, acquisition, recording })
}

/// One stored row expanded to `I, II, III, aVR, aVL, aVF, V1..V6` using the
/// Einthoven relations.  Missing values stay `None`, and so does every limb
/// lead derived from a missing II or III.
fn derive_row(raw: &[u16; DATA_SERIES]) -> [Option<i32>; 12] {
    let series = raw.map(|v| (v != NULL_VALUE).then_some(i32::from(v) + X_OFFSET));
    let (ii, iii) = (series[0], series[1]);

    let mut row = [None; 12];
    if let (Some(ii), Some(iii)) = (ii, iii) {
        row[0] = Some(ii - iii);
        row[3] = Some(iii / 2 - ii);
        row[4] = Some(ii / 2 - iii);
        row[5] = Some((ii + iii) / 2);
    }
    row[1] = ii;
    row[2] = iii;
    row[6..].copy_from_slice(&series[2..]);
    row
}
