//! On-disk persistence for fetched bodies and derived artifact names.
//!
//! Names are derived from the URL plus a UTC stamp; over-long or empty
//! derivations fall back to a hash suffix that is deterministic within a
//! process run.

use onionsweep_core::Timestamp;
use regex::Regex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Upper bound on a derived file stem.
const MAX_STEM_LEN: usize = 80;

/// Length the sanitized part is cut to when the bound is exceeded.
const TRUNCATED_LEN: usize = 60;

fn hash_hex(url: &str) -> String {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Derive a filesystem-safe stem from `url`.
///
/// The scheme and trailing slash are dropped, separators become
/// underscores, and anything outside word characters collapses. Stems over
/// [`MAX_STEM_LEN`] are truncated and hash-suffixed; an empty derivation
/// becomes a pure hash name.
pub fn derive_file_stem(url: &str) -> String {
    static BAD_CHARS: OnceLock<Regex> = OnceLock::new();
    let bad_chars = BAD_CHARS.get_or_init(|| Regex::new(r"[^\w\-.]+").expect("valid regex"));

    let stripped = url
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/')
        .replace(['/', ':'], "_");

    let stem = bad_chars
        .replace_all(&stripped, "_")
        .trim_matches('_')
        .to_string();

    if stem.is_empty() {
        return hash_hex(url);
    }
    if stem.chars().count() > MAX_STEM_LEN {
        let prefix: String = stem.chars().take(TRUNCATED_LEN).collect();
        return format!("{}_{}", prefix, &hash_hex(url)[..12]);
    }
    stem
}

/// File name for a saved page body.
pub fn body_file_name(url: &str) -> String {
    format!("{}_{}.html", derive_file_stem(url), Timestamp::now().file_stamp())
}

/// File name for a saved screenshot.
pub fn screenshot_file_name(url: &str) -> String {
    format!("{}_{}.png", derive_file_stem(url), Timestamp::now().file_stamp())
}

/// Write a fetched body under `dir`, returning the saved path.
pub fn write_body(dir: &Path, url: &str, body: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(body_file_name(url));
    std::fs::write(&path, body)?;
    Ok(path)
}
