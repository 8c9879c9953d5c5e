//! Target source: parses the operator-supplied target list.

use crate::error::{Result, ScanError};
use std::fs;
use std::path::Path;

/// Read the newline-delimited target list at `path`.
///
/// Blank lines are ignored; a leading `-` list marker and surrounding
/// whitespace are stripped per line. Duplicates are kept, each one is an
/// independent scan. An empty result is fatal.
pub fn read_targets(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|source| ScanError::TargetRead {
        path: path.to_path_buf(),
        source,
    })?;

    let targets: Vec<String> = contents
        .lines()
        .map(|line| line.trim().trim_start_matches('-').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if targets.is_empty() {
        return Err(ScanError::NoTargets {
            path: path.to_path_buf(),
        });
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_targets_strips_markers() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        let path = tmp.path().join("targets.yaml");
        fs::write(
            &path,
            "a.onion\n\n- b.onion\n   - c.onion   \n\n-\nhttps://d.onion\n",
        )
        .expect("write targets file");

        let targets = read_targets(&path).expect("read targets");
        assert_eq!(targets, vec!["a.onion", "b.onion", "c.onion", "https://d.onion"]);
    }

    #[test]
    fn test_read_targets_keeps_duplicates() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        let path = tmp.path().join("targets.yaml");
        fs::write(&path, "a.onion\na.onion\n").expect("write targets file");

        let targets = read_targets(&path).expect("read targets");
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_empty_list_is_fatal() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        let path = tmp.path().join("targets.yaml");
        fs::write(&path, "\n  \n-\n").expect("write targets file");

        assert!(matches!(
            read_targets(&path),
            Err(ScanError::NoTargets { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        assert!(matches!(
            read_targets(&tmp.path().join("absent.yaml")),
            Err(ScanError::TargetRead { .. })
        ));
    }
}
