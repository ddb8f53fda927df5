//! Numeric codes fixed by EN 1064 (SCP-ECG) and ANSI-AAMI EC71:2001.
//!
//! These values are written verbatim to disk.  They are never negotiated and
//! never renumbered; a reader relies on them being exactly these bytes.

// ── Record layout ────────────────────────────────────────────────────────────

/// CRC (2 bytes) + record size (4 bytes).
pub const SCPECG_HEADER_LEN:  usize = 6;
/// Section header: CRC(2) id(2) length(4) version(1) protocol(1) reserved(6).
pub const SECTION_HEADER_LEN: usize = 16;
/// Pointer field: id(2) length(4) index(4).
pub const POINTER_FIELD_LEN:  usize = 10;
/// Section 0 must carry at least the pointers for sections 0..=11.
pub const MIN_POINTER_FIELDS: usize = 12;

/// Section and protocol version written into every section header (2.0).
pub const SECTION_VERSION:  u8 = 0x14;
pub const PROTOCOL_VERSION: u8 = 0x14;
/// Reserved header bytes of Section 0.
pub const SECTION_0_RESERVED: &[u8; 6] = b"SCPECG";

// ── Section ids ──────────────────────────────────────────────────────────────

pub const SECTION_POINTERS:        u16 = 0;
pub const SECTION_PATIENT_DATA:    u16 = 1;
pub const SECTION_LEAD_DEFINITION: u16 = 3;
pub const SECTION_RHYTHM_DATA:     u16 = 6;

// ── Section 1: patient data tags ─────────────────────────────────────────────

pub const TAG_PATIENT_LAST_NAME: u8 = 0;
pub const TAG_PATIENT_ID:        u8 = 2;
pub const TAG_PATIENT_AGE:       u8 = 4;
pub const TAG_PATIENT_WEIGHT:    u8 = 7;
pub const TAG_PATIENT_SEX:       u8 = 8;
pub const TAG_ACQ_DEV_ID:        u8 = 14;
pub const TAG_DATE_ACQ:          u8 = 25;
pub const TAG_TIME_ACQ:          u8 = 26;
pub const TAG_ECG_SEQ_NUM:       u8 = 31;
/// Terminates the tag list; carries an empty value.
pub const TAG_EOF:               u8 = 255;

// ── Section 1: sex ───────────────────────────────────────────────────────────

pub const SEX_UNKNOWN:     u8 = 0;
pub const SEX_MALE:        u8 = 1;
pub const SEX_FEMALE:      u8 = 2;
pub const SEX_UNSPECIFIED: u8 = 9;

// ── Section 1: units ─────────────────────────────────────────────────────────

pub const WEIGHT_UNSPECIFIED: u8 = 0;
pub const WEIGHT_KILOGRAM:    u8 = 1;

pub const AGE_UNSPECIFIED: u8 = 0;
pub const AGE_YEARS:       u8 = 1;

// ── Section 3: lead definition ───────────────────────────────────────────────

/// Flag bit: all leads were recorded simultaneously.
pub const ALL_SIMULTANEOUS_READ: u8 = 0b100;
/// The simultaneous-lead count occupies bits 3..=7 of the flag byte.
pub const MAX_SIMULTANEOUS_LEADS: usize = 0b1_1111;

// ── Section 6: rhythm data ───────────────────────────────────────────────────

/// Samples stored as real values (no differencing).
pub const ENCODING_REAL:             u8 = 0;
pub const BIMODAL_COMPRESSION_FALSE: u8 = 0;
/// Per-lead byte counts are u16, so a lead holds at most this many
/// 16-bit samples.
pub const MAX_RHYTHM_SAMPLES: usize = 0xFFFF / 2;
