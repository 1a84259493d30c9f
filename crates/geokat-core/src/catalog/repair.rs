//! Repair passes over collected table rows.
//!
//! Each pass takes the current rows and returns new rows plus per-row
//! notes, so the passes compose and stay independently testable. All
//! statistics are computed within one document; values never leak
//! between documents.

use lazy_static::lazy_static;
use regex::Regex;

use super::TableRow;
use crate::models::record::CoordinatePoint;

lazy_static! {
    /// Height printed without its decimal separator: a bare 4 to 6 digit
    /// integer.
    static ref BARE_HEIGHT: Regex = Regex::new(r"^\d{4,6}$").unwrap();
}

/// A positive value must be at least this large before a lost minus sign
/// is assumed. Small positives are plausible even on a negative axis.
const SIGN_FIX_MIN_MAGNITUDE: f64 = 500.0;

/// Heights in this range are plausible; outside it the decimal-point
/// repair does not apply.
const HEIGHT_MAX: f64 = 500.0;

/// Floor for the per-axis outlier threshold.
const OUTLIER_FLOOR: f64 = 100_000.0;

fn parse_value(s: &str) -> Option<f64> {
    if s.is_empty() { None } else { s.parse().ok() }
}

/// Whether strictly more parsed values are negative than positive.
fn majority_negative(values: &[f64]) -> bool {
    let negative = values.iter().filter(|v| **v < 0.0).count();
    let positive = values.iter().filter(|v| **v > 0.0).count();
    negative > positive
}

fn fix_sign(s: &str, axis_negative: bool, axis: &str) -> Option<(String, String)> {
    let value = parse_value(s)?;
    if axis_negative && value > 0.0 && value.abs() > SIGN_FIX_MIN_MAGNITUDE {
        let fixed = format!("-{}", s);
        let note = format!("possible lost minus sign on {} -> corrected", axis);
        return Some((fixed, note));
    }
    None
}

/// Reinstate minus signs lost by OCR.
///
/// When a strict majority of an axis is negative, a large positive value
/// on that axis almost certainly lost its sign in scanning; it is
/// negated and the row is flagged.
pub fn repair_signs(rows: &[TableRow]) -> (Vec<TableRow>, Vec<Vec<String>>) {
    let xs: Vec<f64> = rows.iter().filter_map(|r| parse_value(&r.x)).collect();
    let ys: Vec<f64> = rows.iter().filter_map(|r| parse_value(&r.y)).collect();
    let x_negative = majority_negative(&xs);
    let y_negative = majority_negative(&ys);

    let mut fixed = Vec::with_capacity(rows.len());
    let mut notes = vec![Vec::new(); rows.len()];
    for (i, row) in rows.iter().enumerate() {
        let mut row = row.clone();
        if let Some((value, note)) = fix_sign(&row.x, x_negative, "X") {
            row.x = value;
            notes[i].push(note);
        }
        if let Some((value, note)) = fix_sign(&row.y, y_negative, "Y") {
            row.y = value;
            notes[i].push(note);
        }
        fixed.push(row);
    }
    (fixed, notes)
}

/// Re-insert the decimal separator in heights printed as bare integers.
///
/// "17093" is read as 170.93; the repair only sticks when the resulting
/// height is plausible, so "99999" stays untouched.
pub fn repair_heights(rows: &[TableRow]) -> (Vec<TableRow>, Vec<Vec<String>>) {
    let mut fixed = Vec::with_capacity(rows.len());
    let mut notes = vec![Vec::new(); rows.len()];
    for (i, row) in rows.iter().enumerate() {
        let mut row = row.clone();
        if let Some(value) = parse_value(&row.h) {
            if value > HEIGHT_MAX && BARE_HEIGHT.is_match(&row.h) {
                let dot = row.h.len() - 2;
                let candidate = format!("{}.{}", &row.h[..dot], &row.h[dot..]);
                if let Some(repaired) = parse_value(&candidate) {
                    if repaired > 0.0 && repaired < HEIGHT_MAX {
                        notes[i].push(format!(
                            "height without decimal point ({} -> {})",
                            row.h, candidate
                        ));
                        row.h = candidate;
                    }
                }
            }
        }
        fixed.push(row);
    }
    (fixed, notes)
}

fn axis_threshold(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut magnitudes: Vec<f64> = values.map(f64::abs).collect();
    if magnitudes.is_empty() {
        return None;
    }
    magnitudes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = magnitudes[magnitudes.len() / 2];
    Some(OUTLIER_FLOOR.max(median * 10.0))
}

fn exceeds(value: Option<f64>, threshold: Option<f64>) -> bool {
    match (value, threshold) {
        (Some(v), Some(t)) => v.abs() > t,
        _ => false,
    }
}

/// Flag values implausibly far outside the axis's typical magnitude.
///
/// The threshold is ten times the upper-median magnitude of the axis,
/// never below the floor. Flag only; an outlier is never altered or
/// dropped, because a genuinely distant point must survive digitization.
pub fn flag_outliers(rows: &[TableRow]) -> Vec<Vec<String>> {
    let x_threshold = axis_threshold(rows.iter().filter_map(|r| parse_value(&r.x)));
    let y_threshold = axis_threshold(rows.iter().filter_map(|r| parse_value(&r.y)));

    rows.iter()
        .map(|row| {
            let x_out = exceeds(parse_value(&row.x), x_threshold);
            let y_out = exceeds(parse_value(&row.y), y_threshold);
            if x_out || y_out {
                vec!["possible coordinate outlier".to_string()]
            } else {
                Vec::new()
            }
        })
        .collect()
}

/// Flag rows whose X or Y did not survive cleanup as a parsable number.
pub fn flag_incomplete(rows: &[TableRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            if parse_value(&row.x).is_none() || parse_value(&row.y).is_none() {
                vec!["incomplete row (missing X or Y)".to_string()]
            } else {
                Vec::new()
            }
        })
        .collect()
}

/// Run every repair pass and fold the notes into final points.
///
/// Per-row note order: parse-time notes, incompleteness, sign fixes,
/// height fix, outlier flag.
pub fn repair_rows(rows: Vec<TableRow>) -> Vec<CoordinatePoint> {
    let incomplete = flag_incomplete(&rows);
    let (rows, sign_notes) = repair_signs(&rows);
    let (rows, height_notes) = repair_heights(&rows);
    let outliers = flag_outliers(&rows);

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let TableRow {
                id,
                x,
                y,
                h,
                description,
                notes,
            } = row;
            let mut reasons = notes;
            reasons.extend(incomplete[i].iter().cloned());
            reasons.extend(sign_notes[i].iter().cloned());
            reasons.extend(height_notes[i].iter().cloned());
            reasons.extend(outliers[i].iter().cloned());
            CoordinatePoint {
                id,
                x,
                y,
                h,
                description,
                issue: if reasons.is_empty() {
                    None
                } else {
                    Some(reasons.join(", "))
                },
            }
        })
        .collect()
}
