//! Coordinate table location, parsing, and persistence.
//!
//! Documents embed a "Каталог координат" table somewhere in the OCR
//! text. A small state machine finds it, collects rows through two
//! parsing tiers (strict, then fuzzy), and a skip budget decides when
//! the table has ended.

pub mod numeric;
pub mod repair;
pub mod writer;

pub use numeric::clean_number;
pub use writer::{sanitize_filename, write_catalog, write_issues};

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::record::{CatalogStatus, CatalogSummary, CoordinateCatalog};

/// Consecutive unparsable or blank lines tolerated while collecting.
/// OCR splits tables across pages with address blocks and stamps in
/// between; smaller budgets truncate real tables.
pub const MAX_SKIP: usize = 10;

lazy_static! {
    // Heading phrases that open a coordinate table
    static ref TABLE_HEADINGS: Vec<Regex> = vec![
        Regex::new(r"(?i)каталог\s+(?:исполнительных\s+|фактических\s+)?координат").unwrap(),
        Regex::new(r"(?i)ведомость\s+(?:исполнительных\s+|фактических\s+)?координат").unwrap(),
        Regex::new(r"(?i)координаты\s+точек").unwrap(),
        Regex::new(r"(?i)координаты\s+пунктов").unwrap(),
        Regex::new(r"(?i)№\s*точки.*X.*[YУ].*[HН]?").unwrap(),
        Regex::new(r"(?i)n/n\s*по\s*съемке\s*[xх]\s*,\s*[мМm]\s*[yу]\s*,\s*[мМm]\s*[hн]\s*,\s*[мМm]")
            .unwrap(),
    ];

    // Column-header lines consumed right after the heading
    static ref COLUMN_HEADERS: Vec<Regex> = vec![
        Regex::new(r"(?i)n/n\s*по\s*съемке\s*[xх]\s*,\s*[мmМ]\s*[yу]\s*,\s*[мmМ]\s*[hн]\s*,\s*[мmМ]?")
            .unwrap(),
        Regex::new(r"(?i)n/n\s*по\s*съемке\s*[xх]\s*,?\s*[мmМ]?\s*[yу]\s*,?\s*[мmМ]?\s*[hн]\s*,?\s*[мmМ]?")
            .unwrap(),
        Regex::new(r"(?i)№\s*точки.*[xхyуhн]").unwrap(),
        Regex::new(r"(?i)№\s*точки.*координаты").unwrap(),
    ];

    /// Well-formed row: id, optional stray id, X, Y, optional H,
    /// optional trailing description. Coordinates tolerate thousands
    /// grouping and every dash variant as the sign.
    static ref STRICT_ROW: Regex = Regex::new(
        r"^\s*(\d+)(?:\s+\d+)?\s+([-–—−]?\d{1,3}(?:\s*\d{3})*[.,]\d{1,3})\s+([-–—−]?\d{1,3}(?:\s*\d{3})*[.,]\d{1,3})(?:\s+([-–—−]?\d{1,3}(?:\s*\d{3})*[.,]\d{1,3}))?(?:\s+(.*))?$"
    )
    .unwrap();

    /// Signed decimal token tolerant of thousands grouping.
    static ref NUM_TOKEN: Regex = Regex::new(r"[-–—−]?\d+(?:\s?\d{3})*(?:[.,]\d+)?").unwrap();

    /// Leading point id of a fuzzy row.
    static ref ROW_ID: Regex = Regex::new(r"^\s*(\d+)").unwrap();

    /// Bare short integer, as left behind by a duplicated id column.
    static ref BARE_ID: Regex = Regex::new(r"^-?\d{1,4}$").unwrap();
}

/// One collected table row before repairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub id: String,
    pub x: String,
    pub y: String,
    pub h: String,
    pub description: String,
    /// Notes attached while parsing, e.g. the stray-id drop.
    pub notes: Vec<String>,
}

/// Result of scanning a document for its coordinate table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableScan {
    pub rows: Vec<TableRow>,
    pub max_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for a table heading.
    Searching,
    /// Heading found; the next non-blank line may be a column header.
    Header,
    /// Collecting data rows.
    Collecting,
}

enum RowParse {
    Strict(TableRow),
    Fuzzy(TableRow),
    None,
}

/// Scan document text for the embedded coordinate table.
///
/// Blank and unparsable lines consume the skip budget; a strict row
/// match restores it, a fuzzy one merely keeps it. Once the budget is
/// exhausted the scan ends for good, whether or not rows were found:
/// resuming after a ten-line gap only ever collected page footers.
pub fn scan_table(text: &str) -> TableScan {
    let mut scan = TableScan::default();
    let mut state = ScanState::Searching;
    let mut skip = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if state != ScanState::Searching {
                skip += 1;
                if skip >= MAX_SKIP {
                    break;
                }
            }
            continue;
        }

        match state {
            ScanState::Searching => {
                if TABLE_HEADINGS.iter().any(|p| p.is_match(trimmed)) {
                    debug!("table heading found: {:?}", trimmed);
                    state = ScanState::Header;
                    skip = 0;
                }
                continue;
            }
            ScanState::Header => {
                state = ScanState::Collecting;
                if COLUMN_HEADERS.iter().any(|p| p.is_match(trimmed)) {
                    skip = 0;
                    continue;
                }
                // Data can follow the heading directly; fall through and
                // treat this line as a row candidate.
            }
            ScanState::Collecting => {}
        }

        match parse_row(trimmed) {
            RowParse::Strict(row) => {
                skip = 0;
                push_row(&mut scan, row);
            }
            RowParse::Fuzzy(row) => {
                push_row(&mut scan, row);
            }
            RowParse::None => {
                skip += 1;
                if skip >= MAX_SKIP {
                    break;
                }
            }
        }
    }

    scan
}

fn push_row(scan: &mut TableScan, row: TableRow) {
    if let Ok(id) = row.id.parse::<u64>() {
        scan.max_id = scan.max_id.max(id);
    }
    scan.rows.push(row);
}

fn parse_row(line: &str) -> RowParse {
    if let Some(caps) = STRICT_ROW.captures(line) {
        let row = TableRow {
            id: caps.get(1).map_or("", |m| m.as_str()).to_string(),
            x: clean_number(caps.get(2).map_or("", |m| m.as_str())),
            y: clean_number(caps.get(3).map_or("", |m| m.as_str())),
            h: clean_number(caps.get(4).map_or("", |m| m.as_str())),
            description: caps.get(5).map_or("", |m| m.as_str()).trim().to_string(),
            notes: Vec::new(),
        };
        return RowParse::Strict(row);
    }
    match fuzzy_parse_row(line) {
        Some(row) => RowParse::Fuzzy(row),
        None => RowParse::None,
    }
}

/// Parse a damaged row: a leading integer id, then whatever numeric
/// tokens survive cleanup, then the trailing text as description.
fn fuzzy_parse_row(line: &str) -> Option<TableRow> {
    let caps = ROW_ID.captures(line)?;
    let id_end = caps.get(0).map_or(0, |m| m.end());
    let id = caps.get(1).map_or("", |m| m.as_str()).to_string();
    let rest = &line[id_end..];

    let mut tokens: Vec<String> = Vec::new();
    let mut last_token_end = None;
    for m in NUM_TOKEN.find_iter(rest) {
        last_token_end = Some(m.end());
        let cleaned = clean_number(m.as_str());
        if !cleaned.is_empty() {
            tokens.push(cleaned);
        }
    }

    let mut notes = Vec::new();
    if is_stray_id_prefix(&tokens) {
        tokens.remove(0);
        notes.push("stray duplicate id token dropped".to_string());
    }

    let mut x = String::new();
    let mut y = String::new();
    let mut h = String::new();
    if tokens.len() >= 2 {
        x = tokens[0].clone();
        y = tokens[1].clone();
        if tokens.len() >= 3 {
            h = tokens[2].clone();
        }
    }

    let description = match last_token_end {
        Some(end) => rest[end..].trim().to_string(),
        None => rest.trim().to_string(),
    };

    Some(TableRow {
        id,
        x,
        y,
        h,
        description,
        notes,
    })
}

/// A short bare integer followed by a coordinate-like value is the point
/// id duplicated into the number columns. Heuristic, so the drop is
/// recorded as a note rather than trusted silently.
fn is_stray_id_prefix(tokens: &[String]) -> bool {
    if tokens.len() < 3 {
        return false;
    }
    if !BARE_ID.is_match(&tokens[0]) {
        return false;
    }
    let second = &tokens[1];
    second.contains('.') || second.parse::<f64>().map_or(false, |v| v.abs() > 10_000.0)
}

/// Parse and repair the coordinate table of one document.
///
/// Pure text-in, catalog-out: identical input yields an identical
/// catalog. Returns `None` when no table heading was found or no rows
/// were collected.
pub fn extract_catalog(text: &str) -> Option<CoordinateCatalog> {
    let scan = scan_table(text);
    if scan.rows.is_empty() {
        return None;
    }
    let points = repair::repair_rows(scan.rows);
    let valid_count = points.iter().filter(|p| p.is_valid()).count();
    Some(CoordinateCatalog {
        points,
        valid_count,
        max_id: scan.max_id,
    })
}

/// Run the full table pipeline for one document and persist the output.
///
/// `document_id` keys the output file names; without one nothing is
/// written and the summary reports it. The issues report is only created
/// when at least one row was flagged.
pub fn extract_and_save(
    text: &str,
    document_id: Option<&str>,
    out_dir: &Path,
) -> Result<CatalogSummary> {
    let Some(id) = document_id else {
        return Ok(CatalogSummary::empty(CatalogStatus::NoId));
    };

    let Some(catalog) = extract_catalog(text) else {
        info!("no coordinate table found for {}", id);
        return Ok(CatalogSummary::empty(CatalogStatus::NoPoints));
    };

    let path = write_catalog(out_dir, id, &catalog.points)?;
    info!(
        "catalog written to {} | points: {}",
        path.display(),
        catalog.counts()
    );
    if let Some(issues_path) = write_issues(out_dir, id, &catalog.points)? {
        warn!("suspect rows recorded in {}", issues_path.display());
    }

    Ok(CatalogSummary {
        status: CatalogStatus::PointsSaved,
        counts: catalog.counts(),
        valid: catalog.valid_count,
        max_id: catalog.max_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADED_TABLE: &str = "\
Пояснительная записка

Каталог координат
№ точки X,м Y,м H,м
1 -12929.73 -1701.87 170.93 люк
2 -12930.15 -1702.44 171.02
3 -12931.60 -1703.91 171.15 колодец
";

    #[test]
    fn collects_strict_rows_after_heading() {
        let scan = scan_table(HEADED_TABLE);
        assert_eq!(scan.rows.len(), 3);
        assert_eq!(scan.max_id, 3);
        assert_eq!(scan.rows[0].id, "1");
        assert_eq!(scan.rows[0].x, "-12929.73");
        assert_eq!(scan.rows[0].y, "-1701.87");
        assert_eq!(scan.rows[0].h, "170.93");
        assert_eq!(scan.rows[0].description, "люк");
        assert_eq!(scan.rows[1].description, "");
    }

    #[test]
    fn no_heading_means_no_rows() {
        let text = "1 -12929.73 -1701.87 170.93\n2 -12930.15 -1702.44 171.02\n";
        assert_eq!(scan_table(text).rows.len(), 0);
        assert_eq!(extract_catalog(text), None);
    }

    #[test]
    fn data_may_follow_heading_without_column_header() {
        let text = "Каталог координат\n1 -10.50 -20.75 5.10\n";
        let scan = scan_table(text);
        assert_eq!(scan.rows.len(), 1);
    }

    #[test]
    fn nine_blank_lines_do_not_end_the_table() {
        let gap = "\n".repeat(9);
        let text = format!(
            "Каталог координат\n1 -1.10 -2.20\n2 -1.20 -2.30\n3 -1.30 -2.40\n{}4 -1.40 -2.50\n",
            gap
        );
        let catalog = extract_catalog(&text).unwrap();
        assert_eq!(catalog.valid_count, 4);
    }

    #[test]
    fn eleven_line_gap_ends_the_table() {
        let gap = "\n".repeat(11);
        let text = format!(
            "Каталог координат\n1 -1.10 -2.20\n2 -1.20 -2.30\n3 -1.30 -2.40\n{}4 -1.40 -2.50\n",
            gap
        );
        let catalog = extract_catalog(&text).unwrap();
        assert_eq!(catalog.valid_count, 3);
    }

    #[test]
    fn strict_row_resets_the_skip_budget() {
        // Five junk lines, a strict row, then five more junk lines: the
        // budget never fills because the strict row resets it.
        let junk = "стр. оттиск печати\n".repeat(5);
        let text = format!(
            "Каталог координат\n1 -1.10 -2.20\n{}2 -1.20 -2.30\n{}3 -1.30 -2.40\n",
            junk, junk
        );
        let catalog = extract_catalog(&text).unwrap();
        assert_eq!(catalog.valid_count, 3);
    }

    #[test]
    fn fuzzy_row_with_stray_id_is_repaired_and_noted() {
        // Integer Y defeats the strict pattern; the fuzzy tier kicks in
        // and drops the duplicated id token.
        let text = "Каталог координат\n17 18 -12929.73 -1701\n";
        let scan = scan_table(text);
        assert_eq!(scan.rows.len(), 1);
        let row = &scan.rows[0];
        assert_eq!(row.id, "17");
        assert_eq!(row.x, "-12929.73");
        assert_eq!(row.y, "-1701");
        assert_eq!(row.h, "");
        assert_eq!(row.notes, vec!["stray duplicate id token dropped".to_string()]);
    }

    #[test]
    fn fuzzy_description_starts_after_last_number() {
        let text = "Каталог координат\n5 -12929.73 -1701 угол здания\n";
        let scan = scan_table(text);
        let row = &scan.rows[0];
        assert_eq!(row.x, "-12929.73");
        assert_eq!(row.y, "-1701");
        assert_eq!(row.description, "угол здания");
        assert!(row.notes.is_empty());
    }

    #[test]
    fn fuzzy_row_without_enough_numbers_keeps_empty_coordinates() {
        let text = "Каталог координат\n3 осмотр произведен\n";
        let scan = scan_table(text);
        let row = &scan.rows[0];
        assert_eq!(row.x, "");
        assert_eq!(row.y, "");
        assert_eq!(row.description, "осмотр произведен");
    }

    #[test]
    fn thousands_grouping_and_comma_decimals_are_cleaned() {
        let text = "Каталог координат\n1 —12 929,73 -1 701,87 170,93 опора\n";
        let scan = scan_table(text);
        let row = &scan.rows[0];
        assert_eq!(row.x, "-12929.73");
        assert_eq!(row.y, "-1701.87");
        assert_eq!(row.h, "170.93");
        assert_eq!(row.description, "опора");
    }

    #[test]
    fn extract_catalog_counts_valid_rows_and_max_id() {
        let text = "Каталог координат\n1 -1.10 -2.20\n7 о прим\n";
        let catalog = extract_catalog(text).unwrap();
        assert_eq!(catalog.points.len(), 2);
        assert_eq!(catalog.valid_count, 1);
        assert_eq!(catalog.max_id, 7);
        assert_eq!(catalog.counts(), "1/7");
    }

    #[test]
    fn save_without_document_id_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let summary = extract_and_save(HEADED_TABLE, None, dir.path()).unwrap();
        assert_eq!(summary.status, CatalogStatus::NoId);
        assert_eq!(summary.counts, "0/0");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_reports_no_points_without_a_table() {
        let dir = tempfile::tempdir().unwrap();
        let summary = extract_and_save("пустой документ", Some("123-45"), dir.path()).unwrap();
        assert_eq!(summary.status, CatalogStatus::NoPoints);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_writes_catalog_and_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        let summary = extract_and_save(HEADED_TABLE, Some("123-45"), dir.path()).unwrap();
        assert_eq!(summary.status, CatalogStatus::PointsSaved);
        assert_eq!(summary.counts, "3/3");
        assert_eq!(summary.valid, 3);

        let content = std::fs::read_to_string(dir.path().join("123-45.txt")).unwrap();
        assert_eq!(
            content,
            "1\t-12929.73\t-1701.87\t170.93\tлюк\n\
             2\t-12930.15\t-1702.44\t171.02\t\n\
             3\t-12931.60\t-1703.91\t171.15\tколодец\n"
        );
        assert!(!dir.path().join("123-45_issues.txt").exists());
    }

    #[test]
    fn save_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("123-45.txt");

        extract_and_save(HEADED_TABLE, Some("123-45"), dir.path()).unwrap();
        let first = std::fs::read(&path).unwrap();
        extract_and_save(HEADED_TABLE, Some("123-45"), dir.path()).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }
}
