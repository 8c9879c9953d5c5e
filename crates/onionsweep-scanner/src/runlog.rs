//! Append-only run log: the audit artifact of a scan.
//!
//! One timestamped line per event (proxy verification, per-target
//! outcomes, warnings). Never truncated or rewritten mid-run; a failed
//! write degrades to a tracing warning rather than an error.

use onionsweep_core::Timestamp;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Shared append-only log handle.
pub struct RunLog {
    file: Mutex<File>,
}

impl RunLog {
    /// Open (or create) the log at `path` in append mode.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Append one timestamped line.
    pub fn line(&self, msg: &str) {
        let stamped = format!("{} {}\n", Timestamp::now().to_rfc3339(), msg);
        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(stamped.as_bytes()) {
            tracing::warn!("run log write failed: {}", e);
        }
    }
}
