//! Record assembly: `CRC (2) | size (4) | section blocks…`.
//!
//! ```
//! use scpecg::{encode_scp, Acquisition, ExportOptions, Recording};
//!
//! let ecg = Recording::zeros(12, 5000);
//! let bytes = encode_scp(&ecg, &Acquisition::default(), &ExportOptions::default())?;
//! assert_eq!(&bytes[0..2], &scpecg::checksum::crc16(&bytes[2..]).to_le_bytes());
//! # Ok::<(), scpecg::ScpError>(())
//! ```

use byteorder::{LittleEndian, WriteBytesExt};

use crate::checksum::crc16;
use crate::codes::SECTION_POINTERS;
use crate::error::Result;
use crate::pointer::SectionLayout;
use crate::primitives::pack_section;
use crate::recording::{Acquisition, ExportOptions, Recording};
use crate::section::Sections;

/// Concatenate `size ++ packed sections` for every present entry of
/// `layout`, in ascending id order.  The CRC is not included.
///
/// `sections` must already carry the Section 0 payload built from `layout`.
pub fn assemble(sections: &Sections, layout: &SectionLayout) -> Result<Vec<u8>> {
    let size = layout.record_size();
    let mut out = Vec::with_capacity(size as usize);
    out.write_u32::<LittleEndian>(size)?;
    for entry in layout.present() {
        let block = pack_section(entry.section_id, sections.payload(entry.section_id));
        debug_assert_eq!(block.len(), entry.length as usize);
        out.extend_from_slice(&block);
    }
    Ok(out)
}

/// Prefix an assembled record with its CRC.
pub fn seal(record: Vec<u8>) -> Vec<u8> {
    let crc = crc16(&record);
    let mut out = Vec::with_capacity(2 + record.len());
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend(record);
    out
}

/// Encode a complete SCP-ECG file in memory.
///
/// Runs the section builders, lays out the pointer table, assembles the
/// record and seals it with the CRC.  No output is produced on error.
pub fn encode_scp(
    recording: &Recording,
    acquisition: &Acquisition,
    opts: &ExportOptions,
) -> Result<Vec<u8>> {
    let mut sections = Sections::build(recording, acquisition, opts)?;
    let layout = SectionLayout::compute(&sections);
    sections.set(SECTION_POINTERS, layout.pointer_table());
    let record = assemble(&sections, &layout)?;
    Ok(seal(record))
}
