//! Section 0: the pointer table, and the layout it is computed from.
//!
//! [`SectionLayout`] is the single place where section lengths and offsets
//! are decided.  The pointer table and the record size field are both read
//! from it, so they always describe the same sections in the same order.
//!
//! # Index convention
//! Indexes follow EN 1064: the 1-based position of the section's first byte,
//! counting the record CRC as byte 1.  Section 0 therefore starts at
//! `SCPECG_HEADER_LEN + 1`.  Absent sections carry length 0 and index 0.

use tracing::debug;

use crate::codes::{POINTER_FIELD_LEN, SCPECG_HEADER_LEN, SECTION_HEADER_LEN, SECTION_POINTERS};
use crate::primitives::make_pointer_field;
use crate::section::Sections;

/// One pointer-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEntry {
    pub section_id: u16,
    /// Header plus payload; 0 when the section is absent.
    pub length:     u32,
    /// Running cursor at this entry.  Written as 0 when `length == 0`.
    pub index:      u32,
}

impl PointerEntry {
    pub fn is_present(&self) -> bool {
        self.length > 0
    }
}

/// Lengths and offsets of every section slot, plus the resulting record size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    entries:     Vec<PointerEntry>,
    record_size: u32,
}

impl SectionLayout {
    /// Lay out `sections` in ascending id order.
    ///
    /// Section 0's length is derived from the slot count, so its payload does
    /// not need to exist yet.
    pub fn compute(sections: &Sections) -> Self {
        let slots = sections.count();
        let mut entries = Vec::with_capacity(slots);

        let mut cursor = (SCPECG_HEADER_LEN + 1) as u32;
        for (id, payload) in sections.iter() {
            let length = if id == SECTION_POINTERS {
                section_zero_len(slots)
            } else if payload.is_empty() {
                0
            } else {
                (SECTION_HEADER_LEN + payload.len()) as u32
            };
            entries.push(PointerEntry { section_id: id, length, index: cursor });
            cursor += length;
        }

        let record_size = SCPECG_HEADER_LEN as u32
            + entries.iter().map(|e| e.length).sum::<u32>();
        debug_assert_eq!(record_size, cursor - 1);

        debug!(record_size, slots, "computed section layout");
        Self { entries, record_size }
    }

    pub fn entries(&self) -> &[PointerEntry] {
        &self.entries
    }

    /// Entries with a non-empty section, ascending by id.
    pub fn present(&self) -> impl Iterator<Item = &PointerEntry> {
        self.entries.iter().filter(|e| e.is_present())
    }

    /// Value of the record size field: every byte of the record, CRC
    /// included.
    pub fn record_size(&self) -> u32 {
        self.record_size
    }

    /// Section 0 payload: one pointer field per slot.
    pub fn pointer_table(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.entries.len() * POINTER_FIELD_LEN);
        for e in &self.entries {
            out.extend_from_slice(&make_pointer_field(e.section_id, e.length, e.index));
        }
        out
    }
}

fn section_zero_len(slots: usize) -> u32 {
    (SECTION_HEADER_LEN + slots * POINTER_FIELD_LEN) as u32
}
