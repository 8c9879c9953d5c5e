//! Reporting: the machine-readable result file and human-readable summary.

use onionsweep_core::{ScanRecord, Timestamp};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Write all records as pretty JSON, atomically.
///
/// The file is written to a temp sibling and renamed into place so other
/// processes never observe a partial result set.
pub fn write_json(path: &Path, records: &[ScanRecord]) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_vec_pretty(records)?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)
}

/// Render the human-readable summary.
pub fn render_summary(records: &[ScanRecord]) -> String {
    let reachable: Vec<&ScanRecord> = records.iter().filter(|r| r.reachable).collect();
    let unreachable: Vec<&ScanRecord> = records.iter().filter(|r| !r.reachable).collect();

    let mut out = String::new();
    out.push_str("=== Scan Summary ===\n");
    let _ = writeln!(out, "Timestamp (UTC): {}", Timestamp::now().to_rfc3339());
    let _ = writeln!(
        out,
        "Total: {} | Reachable: {} | Unreachable: {}\n",
        records.len(),
        reachable.len(),
        unreachable.len()
    );

    out.push_str("== Reachable ==\n");
    if reachable.is_empty() {
        out.push_str("(none)\n");
    }
    for r in &reachable {
        let status = r.http_status.unwrap_or_default();
        let body = r
            .saved_body_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let mut line = format!("- {} ({}) -> html={}", r.normalized, status, body);
        if let Some(shot) = &r.saved_screenshot_path {
            let _ = write!(line, " screenshot={}", shot.display());
        }
        if let Some(err) = &r.screenshot_error {
            let _ = write!(line, " screenshot_error={err}");
        }
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str("\n== Unreachable ==\n");
    if unreachable.is_empty() {
        out.push_str("(none)\n");
    }
    for r in &unreachable {
        let _ = writeln!(
            out,
            "- {} -> {}",
            r.normalized,
            r.error_message.as_deref().unwrap_or("unknown error")
        );
    }

    out
}

/// Write the summary to `path`.
pub fn write_summary(path: &Path, records: &[ScanRecord]) -> io::Result<()> {
    fs::write(path, render_summary(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_records() -> Vec<ScanRecord> {
        vec![
            ScanRecord::reachable(
                "good.onion",
                "http://good.onion",
                200,
                PathBuf::from("out/html/good.html"),
                120,
            )
            .with_screenshot(PathBuf::from("out/screenshots/good.png")),
            ScanRecord::reachable(
                "shy.onion",
                "http://shy.onion",
                204,
                PathBuf::from("out/html/shy.html"),
                80,
            )
            .with_screenshot_error("render timed out after 25s"),
            ScanRecord::unreachable(
                "gone.onion",
                "http://gone.onion",
                Some(404),
                "http status 404",
                15,
            ),
        ]
    }

    #[test]
    fn test_summary_counts_and_lines() {
        let summary = render_summary(&sample_records());
        assert!(summary.contains("Total: 3 | Reachable: 2 | Unreachable: 1"));
        assert!(summary.contains("- http://good.onion (200) -> html=out/html/good.html screenshot=out/screenshots/good.png"));
        assert!(summary.contains("screenshot_error=render timed out after 25s"));
        assert!(summary.contains("- http://gone.onion -> http status 404"));
    }

    #[test]
    fn test_summary_empty_sections() {
        let summary = render_summary(&[]);
        assert!(summary.contains("Total: 0 | Reachable: 0 | Unreachable: 0"));
        // Both sections render a placeholder
        assert_eq!(summary.matches("(none)").count(), 2);
    }

    #[test]
    fn test_write_json_atomic() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        let path = tmp.path().join("scan_results.json");

        write_json(&path, &sample_records()).expect("write json");

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let parsed: Vec<ScanRecord> =
            serde_json::from_slice(&fs::read(&path).expect("read json")).expect("parse json");
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].original, "good.onion");
    }
}
