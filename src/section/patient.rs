//! Section 1: patient data as a tag list.

use crate::codes::{
    AGE_UNSPECIFIED, AGE_YEARS, TAG_ACQ_DEV_ID, TAG_DATE_ACQ, TAG_ECG_SEQ_NUM, TAG_EOF,
    TAG_PATIENT_AGE, TAG_PATIENT_ID, TAG_PATIENT_LAST_NAME, TAG_PATIENT_SEX,
    TAG_PATIENT_WEIGHT, TAG_TIME_ACQ, WEIGHT_KILOGRAM, WEIGHT_UNSPECIFIED,
};
use crate::error::Result;
use crate::primitives::{
    make_3bytes_intval_unit, make_asciiz, make_date, make_machine_id, make_tag, make_time,
};
use crate::recording::Acquisition;

pub fn weight_unit(weight: u16) -> u8 {
    if weight == 0 { WEIGHT_UNSPECIFIED } else { WEIGHT_KILOGRAM }
}

pub fn age_unit(age: u16) -> u8 {
    if age == 0 { AGE_UNSPECIFIED } else { AGE_YEARS }
}

/// Encode the Section 1 payload.  Tag order is fixed; the list always ends
/// with the empty `TAG_EOF` field.
pub fn patient_data(acq: &Acquisition) -> Result<Vec<u8>> {
    let fields: [(u8, Vec<u8>); 10] = [
        (TAG_PATIENT_ID,        make_asciiz(&acq.patient_name)),
        (TAG_ECG_SEQ_NUM,       make_asciiz(&acq.patient_case)),
        (TAG_PATIENT_LAST_NAME, make_asciiz(&acq.patient_name)),
        (TAG_PATIENT_SEX,       vec![acq.sex.code()]),
        (TAG_PATIENT_WEIGHT,    make_3bytes_intval_unit(acq.weight, weight_unit(acq.weight)).to_vec()),
        (TAG_PATIENT_AGE,       make_3bytes_intval_unit(acq.age, age_unit(acq.age)).to_vec()),
        (TAG_DATE_ACQ,          make_date(&acq.timestamp).to_vec()),
        (TAG_TIME_ACQ,          make_time(&acq.timestamp).to_vec()),
        (TAG_ACQ_DEV_ID,        make_machine_id(&acq.device_id)),
        (TAG_EOF,               Vec::new()),
    ];

    let mut out = Vec::new();
    for (tag, value) in &fields {
        out.extend(make_tag(*tag, value)?);
    }
    Ok(out)
}
