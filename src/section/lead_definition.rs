//! Section 3: lead definition.

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::debug;

use crate::codes::ALL_SIMULTANEOUS_READ;
use crate::error::Result;
use crate::leads::LeadOrder;
use crate::recording::Recording;

/// Bytes per lead entry: start (u32) + end (u32) + lead code (u8).
pub const LEAD_ENTRY_LEN: usize = 9;

/// Encode the Section 3 payload.
///
/// Every lead spans samples `1..=n_samples` of the recording.  The end index
/// is the full sample count even when Section 6 stores fewer samples.
pub fn lead_definition(recording: &Recording, order: &LeadOrder) -> Result<Vec<u8>> {
    let n_leads = recording.n_leads();
    order.check_covers(n_leads)?;

    let lead_count = n_leads as u8;
    let flags = ALL_SIMULTANEOUS_READ | (lead_count << 3);
    let ending_sample = u32::try_from(recording.n_samples()).unwrap_or(u32::MAX);

    let leads = &order.leads()[..n_leads];
    debug!(
        leads = %leads.iter().map(|l| l.name()).collect::<Vec<_>>().join(","),
        ending_sample,
        "lead definition"
    );

    let mut out = Vec::with_capacity(2 + n_leads * LEAD_ENTRY_LEN);
    out.write_u8(lead_count)?;
    out.write_u8(flags)?;
    for lead in leads {
        out.write_u32::<LittleEndian>(1)?;
        out.write_u32::<LittleEndian>(ending_sample)?;
        out.write_u8(lead.code())?;
    }
    Ok(out)
}
