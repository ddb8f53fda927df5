//! Output sinks for encoded records.
//!
//! ```no_run
//! use scpecg::{export_scp, Acquisition, ExportOptions, Recording};
//!
//! let ecg = Recording::zeros(12, 5000);
//! let path = export_scp("out.scp", &ecg, &Acquisition::default(), &ExportOptions::default())?;
//! println!("wrote {}", path.display());
//! # Ok::<(), scpecg::ScpError>(())
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Result, ScpError};
use crate::record::encode_scp;
use crate::recording::{Acquisition, ExportOptions, Recording};

/// Encode and write the whole file to `writer`.  Returns the byte count.
///
/// The record is fully built before the first write, so an encoding error
/// never leaves partial output behind.  I/O errors mid-write do.
pub fn write_scp<W: Write>(
    mut writer: W,
    recording: &Recording,
    acquisition: &Acquisition,
    opts: &ExportOptions,
) -> Result<u64> {
    let bytes = encode_scp(recording, acquisition, opts)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(bytes.len() as u64)
}

/// Encode and write to `path`, atomically.
///
/// The file is written to a temporary sibling and renamed into place, so
/// `path` either holds the complete record or is left untouched.  Unless
/// `opts.overwrite` is set an existing `path` is an error.
pub fn export_scp<P: AsRef<Path>>(
    path: P,
    recording: &Recording,
    acquisition: &Acquisition,
    opts: &ExportOptions,
) -> Result<PathBuf> {
    let path = path.as_ref().to_owned();
    if !opts.overwrite && path.exists() {
        return Err(ScpError::OutputExists(path));
    }

    let bytes = encode_scp(recording, acquisition, opts)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;

    let persisted = if opts.overwrite { tmp.persist(&path) } else { tmp.persist_noclobber(&path) };
    persisted.map_err(|e| match e.error.kind() {
        io::ErrorKind::AlreadyExists => ScpError::OutputExists(path.clone()),
        _ => ScpError::Io(e.error),
    })?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        leads = recording.n_leads(),
        samples = recording.n_samples(),
        "exported SCP-ECG record"
    );
    Ok(path)
}
