//! CRC-CCITT as used by SCP-ECG for both section headers and the record.
//!
//! Polynomial 0x1021, register initialised to 0xFFFF, no reflection and no
//! final XOR (catalogued as CRC-16/IBM-3740).

use crc::{Crc, CRC_16_IBM_3740};

const SCP_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// CRC of a contiguous buffer.
pub fn crc16(data: &[u8]) -> u16 {
    SCP_CRC.checksum(data)
}
