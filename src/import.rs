//! Input adapters.  This module reads CSV sample tables; [`contec`] reads
//! Contec ECG90A device files.
//!
//! CSV layout: one row per sample instant, one column per lead, integer sample
//! units.  An optional first row names the leads (`I,II,III,aVR,…`); when
//! present it becomes the recording's lead order.  Empty cells are invalid
//! samples and are stored as 0.

pub mod contec;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ScpError};
use crate::leads::LeadOrder;
use crate::recording::Recording;

#[derive(Debug, Clone)]
pub struct CsvRecording {
    pub recording:  Recording,
    /// Lead order from the header row, if there was one.
    pub lead_order: Option<LeadOrder>,
}

pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<CsvRecording> {
    read_csv(File::open(path)?)
}

pub fn read_csv<R: Read>(reader: R) -> Result<CsvRecording> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut lead_order = None;
    let mut columns: Vec<Vec<i32>> = Vec::new();

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        if row == 0 && is_header(&record) {
            lead_order = Some(LeadOrder::from_names(record.iter())?);
            continue;
        }
        if columns.is_empty() {
            columns = vec![Vec::new(); record.len()];
        }
        for (column, field) in record.iter().enumerate() {
            columns[column].push(parse_sample(field, row, column)?);
        }
    }

    let recording = Recording::from_leads(columns)?;
    debug!(
        leads = recording.n_leads(),
        samples = recording.n_samples(),
        header = lead_order.is_some(),
        "read CSV recording"
    );
    Ok(CsvRecording { recording, lead_order })
}

fn is_header(record: &csv::StringRecord) -> bool {
    record
        .iter()
        .next()
        .is_some_and(|f| !f.is_empty() && f.parse::<i32>().is_err())
}

fn parse_sample(field: &str, row: usize, column: usize) -> Result<i32> {
    if field.is_empty() {
        return Ok(0);
    }
    field.parse().map_err(|_| ScpError::ParseSample {
        row,
        column,
        text: field.to_owned(),
    })
}
