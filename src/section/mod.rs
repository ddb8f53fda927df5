//! Section payload builders.
//!
//! Only the content sections are built here (1, 3 and 6).  Section 0 is
//! derived from their final lengths by [`crate::pointer`]; every other id
//! stays empty but keeps its slot in the pointer table.

pub mod lead_definition;
pub mod patient;
pub mod rhythm;

use tracing::debug;

use crate::codes::{
    MIN_POINTER_FIELDS, SECTION_LEAD_DEFINITION, SECTION_PATIENT_DATA, SECTION_RHYTHM_DATA,
};
use crate::error::Result;
use crate::recording::{Acquisition, ExportOptions, Recording};

pub use lead_definition::lead_definition;
pub use patient::patient_data;
pub use rhythm::rhythm_data;

/// Payloads indexed by section id.  An empty payload means "absent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    payloads: Vec<Vec<u8>>,
}

impl Default for Sections {
    fn default() -> Self {
        Self { payloads: vec![Vec::new(); MIN_POINTER_FIELDS] }
    }
}

impl Sections {
    /// Build the content sections of one recording.
    pub fn build(
        recording: &Recording,
        acquisition: &Acquisition,
        opts: &ExportOptions,
    ) -> Result<Self> {
        opts.validate(recording)?;

        let mut sections = Self::default();
        sections.set(SECTION_PATIENT_DATA, patient_data(acquisition)?);
        sections.set(SECTION_LEAD_DEFINITION, lead_definition(recording, &opts.lead_order)?);
        sections.set(SECTION_RHYTHM_DATA, rhythm_data(recording, opts)?);

        debug!(
            section_1 = sections.payload(SECTION_PATIENT_DATA).len(),
            section_3 = sections.payload(SECTION_LEAD_DEFINITION).len(),
            section_6 = sections.payload(SECTION_RHYTHM_DATA).len(),
            "built section payloads"
        );
        Ok(sections)
    }

    /// Number of pointer-table slots (ids `0..count`).
    pub fn count(&self) -> usize {
        self.payloads.len()
    }

    pub fn set(&mut self, id: u16, payload: Vec<u8>) {
        let id = id as usize;
        if id >= self.payloads.len() {
            self.payloads.resize(id + 1, Vec::new());
        }
        self.payloads[id] = payload;
    }

    /// Payload of `id`; empty for absent or out-of-table ids.
    pub fn payload(&self, id: u16) -> &[u8] {
        self.payloads.get(id as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(id, payload)` in ascending id order, absent sections included.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &[u8])> {
        self.payloads.iter().enumerate().map(|(id, p)| (id as u16, p.as_slice()))
    }
}
