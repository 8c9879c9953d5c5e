//! URL normalization.
//!
//! Pure and total: malformed hosts are not rejected here, they surface as
//! fetch-stage errors.

/// Ensure `raw` carries an explicit scheme, assuming `http://` when absent.
///
/// Leading list markers and surrounding whitespace are stripped, so the
/// function is idempotent over its own output.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('-').trim_start();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
