//! Document parser combining field extraction, type classification and
//! the coordinate-table pipeline.

use std::path::Path;
use std::time::Instant;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog;
use crate::classify::{best_document_match, normalize_type};
use crate::error::Result;
use crate::extract::patterns::{COMM_TYPE_DIRECT, COMM_TYPE_LABELS};
use crate::extract::{extract_contract_number, extract_kgs, extract_survey_date};
use crate::models::config::TypeCatalog;
use crate::models::record::{CatalogSummary, FieldRecord};

/// Result of parsing one document's text.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted field record.
    pub record: FieldRecord,
    /// Extraction warnings, one per missing field.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Full per-document report including the coordinate-table outcome.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub record: FieldRecord,
    pub catalog: CatalogSummary,
    pub warnings: Vec<String>,
    pub processing_time_ms: u64,
}

/// Survey document parser.
///
/// Holds the communication-type allow-list for the run plus one
/// compiled pattern per allowed name, so bare mentions of configured
/// types are found even when no synonym covers them.
pub struct DocumentParser {
    allowed: Vec<String>,
    name_patterns: Vec<Regex>,
}

impl DocumentParser {
    /// Parser classifying against the default type catalog.
    pub fn new() -> Self {
        Self::with_catalog(&TypeCatalog::default())
    }

    /// Parser classifying against the given catalog's enabled types.
    pub fn with_catalog(catalog: &TypeCatalog) -> Self {
        let allowed = catalog.allowed();
        let name_patterns = allowed
            .iter()
            .filter_map(|name| Regex::new(&format!(r"(?i){}\b", regex::escape(name))).ok())
            .collect();
        Self {
            allowed,
            name_patterns,
        }
    }

    /// The allow-list this parser classifies against.
    pub fn allowed_types(&self) -> &[String] {
        &self.allowed
    }

    /// Extract the four business fields. A miss is a warning, never an
    /// error; partial records are the normal outcome on noisy scans.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        info!("parsing document of {} characters", text.len());

        let record = FieldRecord {
            communication_type: self.extract_communication_type(text),
            contract_number: extract_contract_number(text),
            document_id: extract_kgs(text),
            survey_date: extract_survey_date(text),
        };

        let warnings: Vec<String> = record
            .missing_fields()
            .iter()
            .map(|field| format!("could not extract {}", field))
            .collect();
        for warning in &warnings {
            debug!("{}", warning);
        }

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Parse the document and run the coordinate-table pipeline, writing
    /// catalog and issues files under `out_dir`.
    pub fn process(&self, text: &str, out_dir: &Path) -> Result<DocumentReport> {
        let start = Instant::now();
        let parsed = self.parse(text);
        let catalog =
            catalog::extract_and_save(text, parsed.record.document_id.as_deref(), out_dir)?;

        Ok(DocumentReport {
            record: parsed.record,
            catalog,
            warnings: parsed.warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Three candidate sources in priority order: labeled field values,
    /// known type mentions, allowed-name mentions. Every candidate goes
    /// through allow-list normalization; a candidate that resolves to a
    /// disallowed name is skipped, not returned. The whole-document
    /// sweep runs only when all candidates failed.
    fn extract_communication_type(&self, text: &str) -> Option<String> {
        let patterns = COMM_TYPE_LABELS
            .iter()
            .chain(COMM_TYPE_DIRECT.iter())
            .chain(self.name_patterns.iter());

        for pattern in patterns {
            let Some(caps) = pattern.captures(text) else {
                continue;
            };
            let whole = match caps.get(0) {
                Some(m) => m.as_str(),
                None => continue,
            };
            let candidate = caps
                .get(1)
                .map(|g| g.as_str())
                .filter(|s| !s.is_empty())
                .unwrap_or(whole)
                .trim();
            if let Some(resolved) = normalize_type(candidate, &self.allowed) {
                return Some(resolved);
            }
        }

        best_document_match(text, &self.allowed)
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}
