//! Field-level encoders: pointer entries, Section 1 tags, dates, machine ids
//! and the section header wrapper.
//!
//! Every function here is pure and produces exactly the EN 1064 byte layout.
//! Multi-byte integers are little-endian throughout.

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::io::{self, Read};

use crate::checksum::crc16;
use crate::codes::{
    POINTER_FIELD_LEN, PROTOCOL_VERSION, SECTION_0_RESERVED, SECTION_HEADER_LEN,
    SECTION_POINTERS, SECTION_VERSION,
};
use crate::error::{Result, ScpError};

/// Byte length of the acquiring-device block written by [`make_machine_id`].
pub const MACHINE_ID_LEN: usize = 37;
/// Characters of the device name kept in the machine-id model field.
const MACHINE_MODEL_LEN: usize = 5;

// ── Section 0 ────────────────────────────────────────────────────────────────

/// One Section 0 entry: `id (u16) | length (u32) | index (u32)`.
///
/// An absent section (`length == 0`) always gets index 0, whatever the
/// caller passes.
pub fn make_pointer_field(section_id: u16, length: u32, index: u32) -> [u8; POINTER_FIELD_LEN] {
    let index = if length == 0 { 0 } else { index };
    let mut buf = [0u8; POINTER_FIELD_LEN];
    LittleEndian::write_u16(&mut buf[0..2], section_id);
    LittleEndian::write_u32(&mut buf[2..6], length);
    LittleEndian::write_u32(&mut buf[6..10], index);
    buf
}

// ── Section 1 fields ─────────────────────────────────────────────────────────

/// `tag (u8) | length (u16) | value`.  An empty value with `TAG_EOF`
/// terminates the tag list.
pub fn make_tag(tag: u8, value: &[u8]) -> Result<Vec<u8>> {
    let len = u16::try_from(value.len())
        .map_err(|_| ScpError::FieldTooLong { tag, len: value.len() })?;
    let mut out = Vec::with_capacity(3 + value.len());
    out.push(tag);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(value);
    Ok(out)
}

/// UTF-8 bytes followed by a single NUL.
pub fn make_asciiz(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() + 1);
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    out
}

/// `value (u16) | unit (u8)`, the layout shared by age, height and weight.
pub fn make_3bytes_intval_unit(value: u16, unit: u8) -> [u8; 3] {
    let mut buf = [0u8; 3];
    LittleEndian::write_u16(&mut buf[0..2], value);
    buf[2] = unit;
    buf
}

/// `year (u16) | month (u8) | day (u8)`.
pub fn make_date(ts: &NaiveDateTime) -> [u8; 4] {
    let mut buf = [0u8; 4];
    // Years outside u16 are not representable; clamp rather than wrap.
    LittleEndian::write_u16(&mut buf[0..2], ts.year().clamp(0, u16::MAX as i32) as u16);
    buf[2] = ts.month() as u8;
    buf[3] = ts.day() as u8;
    buf
}

/// `hour | minute | second`, one byte each.
pub fn make_time(ts: &NaiveDateTime) -> [u8; 3] {
    [ts.hour() as u8, ts.minute() as u8, ts.second() as u8]
}

/// Acquiring-device block with every numeric field zeroed and only the
/// model name filled in: 8 zero bytes, the first five bytes of the name
/// (NUL padded) plus a NUL, then 23 zero bytes.
pub fn make_machine_id(s: &str) -> Vec<u8> {
    let mut model = [0u8; MACHINE_MODEL_LEN + 1];
    for (dst, src) in model.iter_mut().zip(s.as_bytes().iter().take(MACHINE_MODEL_LEN)) {
        *dst = *src;
    }
    let mut out = Vec::with_capacity(MACHINE_ID_LEN);
    out.extend_from_slice(&[0u8; 8]);
    out.extend_from_slice(&model);
    out.extend_from_slice(&[0u8; 23]);
    out
}

// ── Section header ───────────────────────────────────────────────────────────

/// The 16-byte header that precedes every section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub crc:              u16,
    pub id:               u16,
    /// Header plus payload.
    pub length:           u32,
    pub section_version:  u8,
    pub protocol_version: u8,
    pub reserved:         [u8; 6],
}

impl SectionHeader {
    /// Header for `payload` with the CRC still unset.
    fn unsealed(id: u16, payload_len: usize) -> Self {
        let reserved = if id == SECTION_POINTERS { *SECTION_0_RESERVED } else { [0u8; 6] };
        Self {
            crc:              0,
            id,
            length:           (SECTION_HEADER_LEN + payload_len) as u32,
            section_version:  SECTION_VERSION,
            protocol_version: PROTOCOL_VERSION,
            reserved,
        }
    }

    pub fn to_bytes(&self) -> [u8; SECTION_HEADER_LEN] {
        let mut buf = [0u8; SECTION_HEADER_LEN];
        LittleEndian::write_u16(&mut buf[0..2], self.crc);
        LittleEndian::write_u16(&mut buf[2..4], self.id);
        LittleEndian::write_u32(&mut buf[4..8], self.length);
        buf[8] = self.section_version;
        buf[9] = self.protocol_version;
        buf[10..16].copy_from_slice(&self.reserved);
        buf
    }

    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        let crc = reader.read_u16::<LittleEndian>()?;
        let id = reader.read_u16::<LittleEndian>()?;
        let length = reader.read_u32::<LittleEndian>()?;
        let section_version = reader.read_u8()?;
        let protocol_version = reader.read_u8()?;
        let mut reserved = [0u8; 6];
        reader.read_exact(&mut reserved)?;
        Ok(Self { crc, id, length, section_version, protocol_version, reserved })
    }
}

/// Prefix `payload` with its section header.  The header CRC covers the
/// header body (from the id onward) and the payload.
pub fn pack_section(section_id: u16, payload: &[u8]) -> Vec<u8> {
    let mut header = SectionHeader::unsealed(section_id, payload.len());

    let mut out = Vec::with_capacity(SECTION_HEADER_LEN + payload.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(payload);

    header.crc = crc16(&out[2..]);
    LittleEndian::write_u16(&mut out[0..2], header.crc);
    out
}
