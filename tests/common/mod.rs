//! Minimal SCP-ECG reader used to check encoder output.

#![allow(dead_code)]

use byteorder::{LittleEndian, ReadBytesExt};
use scpecg::checksum::crc16;
use scpecg::primitives::SectionHeader;
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub id:     u16,
    pub length: u32,
    pub index:  u32,
}

#[derive(Debug)]
pub struct ParsedFile {
    pub crc:      u16,
    pub size:     u32,
    pub pointers: Vec<Pointer>,
}

pub fn parse(bytes: &[u8]) -> ParsedFile {
    let mut cur = Cursor::new(bytes);
    let crc = cur.read_u16::<LittleEndian>().unwrap();
    let size = cur.read_u32::<LittleEndian>().unwrap();
    let header = SectionHeader::read(&mut cur).unwrap();
    assert_eq!(header.id, 0);
    let n = (header.length as usize - 16) / 10;
    let pointers = (0..n)
        .map(|_| Pointer {
            id:     cur.read_u16::<LittleEndian>().unwrap(),
            length: cur.read_u32::<LittleEndian>().unwrap(),
            index:  cur.read_u32::<LittleEndian>().unwrap(),
        })
        .collect();
    ParsedFile { crc, size, pointers }
}

/// Whole section block (header included) addressed by a pointer.
pub fn section<'a>(bytes: &'a [u8], p: &Pointer) -> &'a [u8] {
    let start = p.index as usize - 1;
    &bytes[start..start + p.length as usize]
}

/// Payload of section `id`, after its 16-byte header.
pub fn payload<'a>(bytes: &'a [u8], id: u16) -> &'a [u8] {
    let file = parse(bytes);
    let p = file.pointers.iter().find(|p| p.id == id).expect("pointer present");
    &section(bytes, p)[16..]
}

pub fn section_crc_ok(block: &[u8]) -> bool {
    let stored = u16::from_le_bytes([block[0], block[1]]);
    stored == crc16(&block[2..])
}

pub fn record_crc_ok(bytes: &[u8]) -> bool {
    u16::from_le_bytes([bytes[0], bytes[1]]) == crc16(&bytes[2..])
}

/// Present sections tile the record from byte 7 (1-based) to the end.
pub fn assert_tiles(bytes: &[u8]) {
    let file = parse(bytes);
    let mut cursor = 7u32;
    for p in file.pointers.iter().filter(|p| p.length > 0) {
        assert_eq!(p.index, cursor, "section {} is not contiguous", p.id);
        let block = section(bytes, p);
        assert_eq!(u16::from_le_bytes([block[2], block[3]]), p.id);
        assert_eq!(
            u32::from_le_bytes([block[4], block[5], block[6], block[7]]),
            p.length
        );
        assert!(section_crc_ok(block), "section {} CRC mismatch", p.id);
        cursor += p.length;
    }
    assert_eq!(cursor as usize - 1, bytes.len());
    assert_eq!(file.size as usize, bytes.len());
}
