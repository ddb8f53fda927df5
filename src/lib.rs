pub mod codes;
pub mod error;
pub mod checksum;
pub mod primitives;
pub mod leads;
pub mod recording;
pub mod section;
pub mod pointer;
pub mod record;
pub mod writer;
pub mod import;

pub use error::{Result, ScpError};
pub use leads::{Lead, LeadOrder};
pub use recording::{Acquisition, ExportOptions, Recording, Sex};
pub use record::encode_scp;
pub use writer::{export_scp, write_scp};
