//! Shared record types for the onionsweep scanner.
//!
//! The central type is [`ScanRecord`], the immutable per-target outcome
//! that workers hand to the result sink exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Format as a compact UTC stamp suitable for file names
    /// (`yyyymmdd_hhmmss`).
    #[must_use]
    pub fn file_stamp(&self) -> String {
        self.0.format("%Y%m%d_%H%M%S").to_string()
    }

    /// Get seconds since Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Identifier for one scan run, recorded in the run log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Create a new random `RunId` using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable per-target outcome combining the fetch and optional capture
/// results.
///
/// Exactly one of `error_message` / `saved_body_path` is set, and the
/// screenshot fields are only ever set on reachable records. Records are
/// constructed through [`ScanRecord::reachable`] and
/// [`ScanRecord::unreachable`], which uphold this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Raw target string as supplied by the operator
    pub original: String,
    /// Scheme-qualified URL actually requested
    pub normalized: String,
    /// Whether the fetch stage completed with a 2xx response and a saved body
    pub reachable: bool,
    /// HTTP status, present whenever a response was obtained
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// Failure description, present iff the target is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Saved page body, present iff the target is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_body_path: Option<PathBuf>,
    /// Saved screenshot, present iff capture ran and succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_screenshot_path: Option<PathBuf>,
    /// Capture failure, present iff capture ran and failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_error: Option<String>,
    /// When the record was constructed (UTC)
    pub timestamp: Timestamp,
    /// Fetch stage duration in milliseconds
    pub duration_millis: u64,
}

impl ScanRecord {
    /// Build a record for a target whose body was fetched and persisted.
    ///
    /// Screenshot fields start absent; [`Self::with_screenshot`] or
    /// [`Self::with_screenshot_error`] fill them in when capture runs.
    #[must_use]
    pub fn reachable(
        original: impl Into<String>,
        normalized: impl Into<String>,
        status: u16,
        saved_body_path: PathBuf,
        duration_millis: u64,
    ) -> Self {
        Self {
            original: original.into(),
            normalized: normalized.into(),
            reachable: true,
            http_status: Some(status),
            error_message: None,
            saved_body_path: Some(saved_body_path),
            saved_screenshot_path: None,
            screenshot_error: None,
            timestamp: Timestamp::now(),
            duration_millis,
        }
    }

    /// Build a record for a target whose fetch stage failed.
    ///
    /// `http_status` is present when a response was obtained before the
    /// failure was classified (non-2xx status, failed persist).
    #[must_use]
    pub fn unreachable(
        original: impl Into<String>,
        normalized: impl Into<String>,
        http_status: Option<u16>,
        error_message: impl Into<String>,
        duration_millis: u64,
    ) -> Self {
        Self {
            original: original.into(),
            normalized: normalized.into(),
            reachable: false,
            http_status,
            error_message: Some(error_message.into()),
            saved_body_path: None,
            saved_screenshot_path: None,
            screenshot_error: None,
            timestamp: Timestamp::now(),
            duration_millis,
        }
    }

    /// Attach a successful screenshot capture.
    #[must_use]
    pub fn with_screenshot(mut self, path: PathBuf) -> Self {
        debug_assert!(self.reachable);
        self.saved_screenshot_path = Some(path);
        self.screenshot_error = None;
        self
    }

    /// Attach a failed screenshot capture.
    #[must_use]
    pub fn with_screenshot_error(mut self, error: impl Into<String>) -> Self {
        debug_assert!(self.reachable);
        self.screenshot_error = Some(error.into());
        self.saved_screenshot_path = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_now() {
        let ts = Timestamp::now();
        assert!(ts.timestamp() > 0);
    }

    #[test]
    fn test_timestamp_file_stamp() {
        let stamp = Timestamp::now().file_stamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
    }

    #[test]
    fn test_run_id_unique() {
        let id1 = RunId::generate();
        let id2 = RunId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_reachable_record_invariant() {
        let rec = ScanRecord::reachable(
            "good.onion",
            "http://good.onion",
            200,
            PathBuf::from("out/html/good.html"),
            42,
        );
        assert!(rec.reachable);
        assert_eq!(rec.http_status, Some(200));
        assert!(rec.error_message.is_none());
        assert!(rec.saved_body_path.is_some());
        assert!(rec.saved_screenshot_path.is_none());
        assert!(rec.screenshot_error.is_none());
    }

    #[test]
    fn test_unreachable_record_invariant() {
        let rec = ScanRecord::unreachable("bad.onion", "http://bad.onion", Some(404), "http status 404", 10);
        assert!(!rec.reachable);
        assert_eq!(rec.http_status, Some(404));
        assert!(rec.error_message.is_some());
        assert!(rec.saved_body_path.is_none());
    }

    #[test]
    fn test_screenshot_fields_exclusive() {
        let rec = ScanRecord::reachable(
            "a.onion",
            "http://a.onion",
            200,
            PathBuf::from("body.html"),
            5,
        )
        .with_screenshot(PathBuf::from("shot.png"));
        assert!(rec.saved_screenshot_path.is_some());
        assert!(rec.screenshot_error.is_none());

        let rec = rec.with_screenshot_error("navigation timed out");
        assert!(rec.saved_screenshot_path.is_none());
        assert!(rec.screenshot_error.is_some());
    }

    #[test]
    fn test_record_serde_field_names() {
        let rec = ScanRecord::unreachable("x.onion", "http://x.onion", None, "connection refused", 7);
        let json = serde_json::to_value(&rec).expect("serialize record");

        assert_eq!(json["original"], "x.onion");
        assert_eq!(json["normalized"], "http://x.onion");
        assert_eq!(json["reachable"], false);
        assert_eq!(json["error_message"], "connection refused");
        assert_eq!(json["duration_millis"], 7);
        // Absent optionals are omitted, not null
        assert!(json.get("http_status").is_none());
        assert!(json.get("saved_body_path").is_none());
        assert!(json.get("saved_screenshot_path").is_none());
        assert!(json.get("screenshot_error").is_none());
    }
}
