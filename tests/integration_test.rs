mod common;

use scpecg::codes::{AGE_UNSPECIFIED, AGE_YEARS, WEIGHT_KILOGRAM, WEIGHT_UNSPECIFIED};
use scpecg::{
    encode_scp, export_scp, Acquisition, ExportOptions, Lead, LeadOrder, Recording, ScpError,
};
use std::fs;
use tempfile::{tempdir, NamedTempFile};

/// 12 leads of a deterministic sawtooth.
fn sample_recording(n_samples: usize) -> Recording {
    let leads = (0..12)
        .map(|lead| {
            (0..n_samples)
                .map(|i| ((i as i32 * 7 + lead * 131) % 2000) - 1000)
                .collect()
        })
        .collect();
    Recording::from_leads(leads).unwrap()
}

fn encode_default(rec: &Recording) -> Vec<u8> {
    encode_scp(rec, &Acquisition::default(), &ExportOptions::default()).unwrap()
}

/// Section 1 tag value by tag id.
fn tag_value(bytes: &[u8], tag: u8) -> Vec<u8> {
    let s1 = common::payload(bytes, 1);
    let mut pos = 0;
    while pos < s1.len() {
        let len = u16::from_le_bytes([s1[pos + 1], s1[pos + 2]]) as usize;
        if s1[pos] == tag {
            return s1[pos + 3..pos + 3 + len].to_vec();
        }
        pos += 3 + len;
    }
    panic!("tag {tag} not found");
}

#[test]
fn test_twelve_lead_scenario() {
    let rec = sample_recording(5000);
    let bytes = encode_default(&rec);

    assert!(common::record_crc_ok(&bytes));
    let file = common::parse(&bytes);
    assert_eq!(file.size as usize, bytes.len());
    common::assert_tiles(&bytes);

    let s3 = common::payload(&bytes, 3);
    assert_eq!(s3[0], 12);
    let leads: Vec<(u32, u32, u8)> = s3[2..]
        .chunks(9)
        .map(|e| {
            (
                u32::from_le_bytes([e[0], e[1], e[2], e[3]]),
                u32::from_le_bytes([e[4], e[5], e[6], e[7]]),
                e[8],
            )
        })
        .collect();
    let expected: Vec<u8> = [
        Lead::I, Lead::II, Lead::III, Lead::AVR, Lead::AVL, Lead::AVF,
        Lead::V1, Lead::V2, Lead::V3, Lead::V4, Lead::V5, Lead::V6,
    ]
    .iter()
    .map(|l| l.code())
    .collect();
    assert_eq!(leads.len(), 12);
    for ((start, end, code), want) in leads.into_iter().zip(expected) {
        assert_eq!((start, end, code), (1, 5000, want));
    }

    let s6 = common::payload(&bytes, 6);
    assert_eq!(&s6[0..2], &5000u16.to_le_bytes());
    assert_eq!(&s6[2..4], &2000u16.to_le_bytes());
    assert_eq!(&s6[6..8], &10000u16.to_le_bytes());
    // First sample of lead 1 follows the 12 byte counts.
    let first = 6 + 24 + 10000;
    assert_eq!(
        i16::from_le_bytes([s6[first], s6[first + 1]]) as i32,
        rec.lead(1)[0]
    );
}

#[test]
fn test_empty_sections_keep_their_slots() {
    let bytes = encode_default(&sample_recording(10));
    let file = common::parse(&bytes);
    assert_eq!(file.pointers.len(), 12);
    for (id, p) in file.pointers.iter().enumerate() {
        assert_eq!(p.id as usize, id);
        let present = matches!(id, 0 | 1 | 3 | 6);
        assert_eq!(p.length > 0, present, "section {id}");
        if !present {
            assert_eq!(p.index, 0);
        }
    }
}

#[test]
fn test_sample_cap() {
    let rec = Recording::zeros(12, 40_000);
    let bytes = encode_default(&rec);
    let s6 = common::payload(&bytes, 6);
    for lead in 0..12 {
        let at = 6 + lead * 2;
        assert_eq!(u16::from_le_bytes([s6[at], s6[at + 1]]), 65534);
    }
    assert_eq!(s6.len(), 6 + 24 + 12 * 65534);
    common::assert_tiles(&bytes);
}

#[test]
fn test_encoding_is_deterministic() {
    let rec = sample_recording(777);
    assert_eq!(encode_default(&rec), encode_default(&rec));
}

#[test]
fn test_weight_and_age_units() {
    let bytes = encode_default(&sample_recording(1));
    assert_eq!(tag_value(&bytes, 7), vec![0, 0, WEIGHT_UNSPECIFIED]);
    assert_eq!(tag_value(&bytes, 4), vec![0, 0, AGE_UNSPECIFIED]);

    let acq = Acquisition { weight: 70, age: 45, ..Acquisition::default() };
    let bytes = encode_scp(&sample_recording(1), &acq, &ExportOptions::default()).unwrap();
    assert_eq!(tag_value(&bytes, 7), vec![70, 0, WEIGHT_KILOGRAM]);
    assert_eq!(tag_value(&bytes, 4), vec![45, 0, AGE_YEARS]);
}

#[test]
fn test_too_many_leads_without_mapping() {
    let rec = Recording::zeros(13, 10);
    let err = encode_scp(&rec, &Acquisition::default(), &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, ScpError::TooManyLeads { leads: 13, max: 12 }));

    let opts = ExportOptions {
        lead_order: LeadOrder::Custom(vec![Lead::I; 13]),
        ..ExportOptions::default()
    };
    let bytes = encode_scp(&rec, &Acquisition::default(), &opts).unwrap();
    common::assert_tiles(&bytes);
}

#[test]
fn test_empty_recording() {
    let bytes = encode_default(&Recording::zeros(0, 0));
    assert!(common::record_crc_ok(&bytes));
    common::assert_tiles(&bytes);
    assert_eq!(common::payload(&bytes, 3), &[0, 0b100]);
}

#[test]
fn test_export_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ecg.scp");
    let rec = sample_recording(500);

    let written = export_scp(&path, &rec, &Acquisition::default(), &ExportOptions::default()).unwrap();
    assert_eq!(written, path);
    assert_eq!(fs::read(&path).unwrap(), encode_default(&rec));
}

#[test]
fn test_export_refuses_to_overwrite() {
    let existing = NamedTempFile::new().unwrap();
    fs::write(existing.path(), b"keep me").unwrap();
    let rec = sample_recording(10);

    let err = export_scp(existing.path(), &rec, &Acquisition::default(), &ExportOptions::default())
        .unwrap_err();
    assert!(matches!(err, ScpError::OutputExists(_)));
    assert_eq!(fs::read(existing.path()).unwrap(), b"keep me");

    let opts = ExportOptions { overwrite: true, ..ExportOptions::default() };
    export_scp(existing.path(), &rec, &Acquisition::default(), &opts).unwrap();
    assert!(common::record_crc_ok(&fs::read(existing.path()).unwrap()));
}

#[test]
fn test_failed_export_leaves_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.scp");
    let rec = Recording::from_leads(vec![vec![70_000]]).unwrap();

    let err = export_scp(&path, &rec, &Acquisition::default(), &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, ScpError::SampleOutOfRange { .. }));
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_export_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("ecg.scp");
    let err = export_scp(&path, &sample_recording(1), &Acquisition::default(), &ExportOptions::default())
        .unwrap_err();
    assert!(matches!(err, ScpError::Io(_)));
}

#[test]
fn test_csv_to_scp() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("ecg.csv");
    fs::write(&csv_path, "II,III\n10,20\n-30,40\n").unwrap();

    let csv = scpecg::import::read_csv_path(&csv_path).unwrap();
    let opts = ExportOptions {
        lead_order: csv.lead_order.clone().unwrap(),
        ..ExportOptions::default()
    };
    let bytes = encode_scp(&csv.recording, &Acquisition::default(), &opts).unwrap();
    let s3 = common::payload(&bytes, 3);
    assert_eq!(s3[0], 2);
    assert_eq!(s3[2 + 8], Lead::II.code());
    assert_eq!(s3[2 + 9 + 8], Lead::III.code());
    let s6 = common::payload(&bytes, 6);
    assert_eq!(&s6[10..14], &[10, 0, 0xE2, 0xFF]);
}

/// Contec ECG90A file: 43-byte header, raw rows of eight 2048-centred
/// series (II, III, V1..V6), all-zero row, 37-byte footer.
fn contec_file(rows: &[[i32; 8]]) -> Vec<u8> {
    let mut bytes = b"CASE0042".to_vec();
    bytes.extend([0, 0]);
    let mut ts = b"2019-11-30 17:45:12".to_vec();
    ts.resize(20, 0);
    bytes.extend(ts);
    bytes.extend([0, 0]);
    bytes.extend(b"ROSSI\0\0\0");
    bytes.extend([0, 45, 70]);
    for row in rows {
        for v in row {
            bytes.extend(((v + 2048) as u16).to_le_bytes());
        }
    }
    bytes.extend([0u8; 16]);
    bytes.extend([0u8; 21]);
    bytes
}

#[test]
fn test_contec_to_scp() {
    use scpecg::import::contec::read_contec_path;

    let dir = tempdir().unwrap();
    let input = dir.path().join("ecg90a.ecg");
    fs::write(&input, contec_file(&[[100, 40, 1, 2, 3, 4, 5, 6], [-3, 0, 1, 2, 3, 4, 5, 6]])).unwrap();

    let ecg = read_contec_path(&input).unwrap();
    assert_eq!(ecg.recording.n_samples(), 2);
    let path = dir.path().join("ecg90a.scp");
    export_scp(&path, &ecg.recording, &ecg.acquisition, &ecg.export_options()).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(common::record_crc_ok(&bytes));
    common::assert_tiles(&bytes);

    assert_eq!(tag_value(&bytes, 31), b"CASE0042\0".to_vec());
    assert_eq!(tag_value(&bytes, 2), b"ROSSI\0".to_vec());
    assert_eq!(tag_value(&bytes, 8), vec![2]);
    assert_eq!(tag_value(&bytes, 7), vec![70, 0, WEIGHT_KILOGRAM]);
    assert_eq!(tag_value(&bytes, 25), vec![0xE3, 0x07, 11, 30]);
    assert_eq!(&tag_value(&bytes, 14)[8..14], b"ECG90\0");

    let s6 = common::payload(&bytes, 6);
    assert_eq!(&s6[2..4], &1250u16.to_le_bytes());
    // Lead I of the first row: II - III.
    let first = 6 + 24;
    assert_eq!(i16::from_le_bytes([s6[first], s6[first + 1]]), 60);
}
