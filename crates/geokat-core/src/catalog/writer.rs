//! Catalog and issues file output.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::CatalogError;
use crate::models::record::CoordinatePoint;

lazy_static! {
    static ref FORBIDDEN_CHARS: Regex = Regex::new(r#"[\\/*?:"<>|]"#).unwrap();
    static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
}

/// Make a document identifier safe to use as a file name. Slashes are
/// common in identifiers ("123/45"), so this always runs before a name
/// reaches the filesystem.
pub fn sanitize_filename(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "UNKNOWN_KGS".to_string();
    }
    let replaced = FORBIDDEN_CHARS.replace_all(trimmed, "_");
    SPACES.replace_all(&replaced, "_").into_owned()
}

/// Write the per-document coordinate catalog.
///
/// One tab-separated line per valid point, in collection order. Flagged
/// rows are written too as long as both plan coordinates are present;
/// the issues report exists to call them out, not to censor them.
pub fn write_catalog(
    dir: &Path,
    document_id: &str,
    points: &[CoordinatePoint],
) -> Result<PathBuf, CatalogError> {
    fs::create_dir_all(dir).map_err(|source| CatalogError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{}.txt", sanitize_filename(document_id)));
    let mut content = String::new();
    for point in points.iter().filter(|p| p.is_valid()) {
        content.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            point.id, point.x, point.y, point.h, point.description
        ));
    }

    fs::write(&path, content).map_err(|source| CatalogError::Write {
        path: path.clone(),
        source,
    })?;
    debug!("wrote catalog {}", path.display());
    Ok(path)
}

/// Write the issues report listing every flagged row.
///
/// Returns `None` and creates nothing when no row is flagged, so the
/// presence of the file is itself the signal that review is needed.
pub fn write_issues(
    dir: &Path,
    document_id: &str,
    points: &[CoordinatePoint],
) -> Result<Option<PathBuf>, CatalogError> {
    let flagged: Vec<&CoordinatePoint> = points.iter().filter(|p| p.issue.is_some()).collect();
    if flagged.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir).map_err(|source| CatalogError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{}_issues.txt", sanitize_filename(document_id)));
    let mut content = String::from("Rows with suspected problems (after coarse auto-repairs):\n");
    for point in &flagged {
        content.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}    <-- ISSUE: {}\n",
            point.id,
            point.x,
            point.y,
            point.h,
            point.description,
            point.issue.as_deref().unwrap_or("")
        ));
    }

    fs::write(&path, content).map_err(|source| CatalogError::Write {
        path: path.clone(),
        source,
    })?;
    debug!("wrote issues report {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(id: &str, x: &str, y: &str, issue: Option<&str>) -> CoordinatePoint {
        CoordinatePoint {
            id: id.to_string(),
            x: x.to_string(),
            y: y.to_string(),
            h: String::new(),
            description: String::new(),
            issue: issue.map(|s| s.to_string()),
        }
    }

    #[test]
    fn sanitizes_forbidden_characters() {
        assert_eq!(sanitize_filename("123/45"), "123_45");
        assert_eq!(sanitize_filename("a b\tc"), "a_b_c");
        assert_eq!(sanitize_filename("  АБ-12  "), "АБ-12");
        assert_eq!(sanitize_filename(""), "UNKNOWN_KGS");
        assert_eq!(sanitize_filename("   "), "UNKNOWN_KGS");
    }

    #[test]
    fn catalog_skips_invalid_points() {
        let dir = tempfile::tempdir().unwrap();
        let points = vec![
            point("1", "-1.0", "-2.0", None),
            point("2", "", "-2.5", Some("incomplete row (missing X or Y)")),
            point("3", "-3.0", "-4.0", None),
        ];
        let path = write_catalog(dir.path(), "123-45", &points).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1\t-1.0\t-2.0\t\t\n3\t-3.0\t-4.0\t\t\n");
    }

    #[test]
    fn issues_file_only_appears_when_rows_are_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let clean = vec![point("1", "-1.0", "-2.0", None)];
        assert_eq!(write_issues(dir.path(), "123-45", &clean).unwrap(), None);
        assert!(!dir.path().join("123-45_issues.txt").exists());

        let flagged = vec![
            point("1", "-1.0", "-2.0", None),
            point("2", "999999999", "-2.5", Some("possible coordinate outlier")),
        ];
        let path = write_issues(dir.path(), "123-45", &flagged)
            .unwrap()
            .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Rows with suspected problems (after coarse auto-repairs):\n\
             2\t999999999\t-2.5\t\t    <-- ISSUE: possible coordinate outlier\n"
        );
    }

    #[test]
    fn flagged_but_valid_rows_still_reach_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let points = vec![point(
            "1",
            "999999999",
            "-2.5",
            Some("possible coordinate outlier"),
        )];
        let path = write_catalog(dir.path(), "77-88", &points).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1\t999999999\t-2.5\t\t\n");
    }
}
