//! Lead identities and the index → lead-code table used by Section 3.
//!
//! Numbering follows ANSI-AAMI EC71:2001.  The default table covers the
//! standard 12-lead layout `I, II, III, aVR, aVL, aVF, V1..V6`; callers with
//! a different channel layout supply their own [`LeadOrder`].

use crate::codes::MAX_SIMULTANEOUS_LEADS;
use crate::error::{Result, ScpError};

// ── Lead ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lead {
    I,
    II,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V2R,
    V3R,
    V4R,
    V5R,
    V6R,
    V7R,
    X,
    Y,
    Z,
    CC5,
    CM5,
    LA,
    RA,
    LL,
    III,
    AVR,
    AVL,
    AVF,
}

impl Lead {
    /// The EC71 lead code written to disk.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Lead::I   => 1,
            Lead::II  => 2,
            Lead::V1  => 3,
            Lead::V2  => 4,
            Lead::V3  => 5,
            Lead::V4  => 6,
            Lead::V5  => 7,
            Lead::V6  => 8,
            Lead::V7  => 9,
            Lead::V2R => 10,
            Lead::V3R => 11,
            Lead::V4R => 12,
            Lead::V5R => 13,
            Lead::V6R => 14,
            Lead::V7R => 15,
            Lead::X   => 16,
            Lead::Y   => 17,
            Lead::Z   => 18,
            Lead::CC5 => 19,
            Lead::CM5 => 20,
            Lead::LA  => 21,
            Lead::RA  => 22,
            Lead::LL  => 23,
            Lead::III => 61,
            Lead::AVR => 62,
            Lead::AVL => 63,
            Lead::AVF => 64,
        }
    }

    /// Conventional display name, as accepted by [`Lead::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Lead::I   => "I",
            Lead::II  => "II",
            Lead::V1  => "V1",
            Lead::V2  => "V2",
            Lead::V3  => "V3",
            Lead::V4  => "V4",
            Lead::V5  => "V5",
            Lead::V6  => "V6",
            Lead::V7  => "V7",
            Lead::V2R => "V2R",
            Lead::V3R => "V3R",
            Lead::V4R => "V4R",
            Lead::V5R => "V5R",
            Lead::V6R => "V6R",
            Lead::V7R => "V7R",
            Lead::X   => "X",
            Lead::Y   => "Y",
            Lead::Z   => "Z",
            Lead::CC5 => "CC5",
            Lead::CM5 => "CM5",
            Lead::LA  => "LA",
            Lead::RA  => "RA",
            Lead::LL  => "LL",
            Lead::III => "III",
            Lead::AVR => "aVR",
            Lead::AVL => "aVL",
            Lead::AVF => "aVF",
        }
    }

    /// Parse a lead name, case-insensitively (`"avr"`, `"aVR"`, `"AVR"`).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "I"   => Some(Lead::I),
            "II"  => Some(Lead::II),
            "III" => Some(Lead::III),
            "AVR" => Some(Lead::AVR),
            "AVL" => Some(Lead::AVL),
            "AVF" => Some(Lead::AVF),
            "V1"  => Some(Lead::V1),
            "V2"  => Some(Lead::V2),
            "V3"  => Some(Lead::V3),
            "V4"  => Some(Lead::V4),
            "V5"  => Some(Lead::V5),
            "V6"  => Some(Lead::V6),
            "V7"  => Some(Lead::V7),
            "V2R" => Some(Lead::V2R),
            "V3R" => Some(Lead::V3R),
            "V4R" => Some(Lead::V4R),
            "V5R" => Some(Lead::V5R),
            "V6R" => Some(Lead::V6R),
            "V7R" => Some(Lead::V7R),
            "X"   => Some(Lead::X),
            "Y"   => Some(Lead::Y),
            "Z"   => Some(Lead::Z),
            "CC5" => Some(Lead::CC5),
            "CM5" => Some(Lead::CM5),
            "LA"  => Some(Lead::LA),
            "RA"  => Some(Lead::RA),
            "LL"  => Some(Lead::LL),
            _     => None,
        }
    }
}

/// Index → lead for the standard 12-lead layout.
pub static STANDARD_12_LEAD: [Lead; 12] = [
    Lead::I,
    Lead::II,
    Lead::III,
    Lead::AVR,
    Lead::AVL,
    Lead::AVF,
    Lead::V1,
    Lead::V2,
    Lead::V3,
    Lead::V4,
    Lead::V5,
    Lead::V6,
];

// ── LeadOrder ────────────────────────────────────────────────────────────────

/// Immutable mapping from recording row index to lead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeadOrder {
    #[default]
    Standard12,
    Custom(Vec<Lead>),
}

impl LeadOrder {
    /// Build a custom order from lead names, e.g. CSV column headers.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let leads = names
            .into_iter()
            .map(|n| {
                let n = n.as_ref();
                Lead::from_name(n).ok_or_else(|| ScpError::UnknownLead(n.to_owned()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LeadOrder::Custom(leads))
    }

    pub fn leads(&self) -> &[Lead] {
        match self {
            LeadOrder::Standard12 => &STANDARD_12_LEAD,
            LeadOrder::Custom(v)  => v,
        }
    }

    /// Largest lead count this order can encode in Section 3.
    pub fn capacity(&self) -> usize {
        self.leads().len().min(MAX_SIMULTANEOUS_LEADS)
    }

    /// Fail unless `n_leads` rows can all be given a lead code.
    pub fn check_covers(&self, n_leads: usize) -> Result<()> {
        let max = self.capacity();
        if n_leads > max {
            return Err(ScpError::TooManyLeads { leads: n_leads, max });
        }
        Ok(())
    }
}
