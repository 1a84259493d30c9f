//! Record types produced by document processing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Extracted business fields for one survey document.
///
/// Every field is optional. A miss is represented as `None`, never as an
/// error: noisy OCR input is the normal case, not the exceptional one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Canonical communication type, resolved against the allow-list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_type: Option<String>,

    /// Contract (agreement) number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_number: Option<String>,

    /// Document identifier (КГС number) keying the coordinate catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Survey date as printed in the document (dd.mm.yyyy).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_date: Option<String>,
}

impl FieldRecord {
    /// Names of the fields that are absent, for reporting.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.communication_type.is_none() {
            missing.push("communication type");
        }
        if self.contract_number.is_none() {
            missing.push("contract number");
        }
        if self.document_id.is_none() {
            missing.push("document id");
        }
        if self.survey_date.is_none() {
            missing.push("survey date");
        }
        missing
    }
}

/// One entry of the communication-type catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommTypeEntry {
    /// Canonical type name, as used for folder names and catalog output.
    pub name: String,

    /// Disabled entries stay listed but are never returned.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl CommTypeEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }
}

/// One row of a parsed coordinate table, after cleanup and repairs.
///
/// Coordinate values stay strings end to end so that OCR damage a repair
/// could not fix is preserved verbatim instead of silently rounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePoint {
    /// Point number from the leftmost table column.
    pub id: String,

    /// Northing, cleaned but still textual.
    pub x: String,

    /// Easting, cleaned but still textual.
    pub y: String,

    /// Height; empty when the table had no H column.
    pub h: String,

    /// Trailing free-text description (e.g. "люк", "колодец").
    pub description: String,

    /// Comma-joined repair and suspicion notes, when any pass flagged
    /// this row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
}

impl CoordinatePoint {
    /// A point is written to the catalog when both plan coordinates
    /// survived cleanup as non-empty strings.
    pub fn is_valid(&self) -> bool {
        !self.x.is_empty() && !self.y.is_empty()
    }
}

/// Parsed and repaired coordinate table of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateCatalog {
    /// Collected points in table order, flagged rows included.
    pub points: Vec<CoordinatePoint>,

    /// Number of points with both plan coordinates present.
    pub valid_count: usize,

    /// Largest numeric point id seen while collecting.
    pub max_id: u64,
}

impl CoordinateCatalog {
    /// The "valid/maxId" counter string. Falls back to the valid count
    /// when no numeric id was seen.
    pub fn counts(&self) -> String {
        let denominator = if self.max_id > 0 {
            self.max_id
        } else {
            self.valid_count as u64
        };
        format!("{}/{}", self.valid_count, denominator)
    }
}

/// Outcome of the coordinate-table pipeline for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    /// A table was found and the catalog file was written.
    PointsSaved,
    /// No table was found, or it held no rows.
    NoPoints,
    /// The document has no identifier, so nothing was written.
    NoId,
}

impl fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CatalogStatus::PointsSaved => "points saved",
            CatalogStatus::NoPoints => "no points",
            CatalogStatus::NoId => "no id",
        };
        f.write_str(label)
    }
}

/// Compact per-document summary of the coordinate-table outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub status: CatalogStatus,

    /// "valid/maxId" counter string for registries and logs.
    pub counts: String,

    /// Number of valid points written.
    pub valid: usize,

    /// Largest numeric point id seen.
    pub max_id: u64,
}

impl CatalogSummary {
    /// Summary for a document where no catalog was produced.
    pub fn empty(status: CatalogStatus) -> Self {
        Self {
            status,
            counts: "0/0".to_string(),
            valid: 0,
            max_id: 0,
        }
    }
}
