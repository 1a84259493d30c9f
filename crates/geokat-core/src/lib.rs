//! Core library for digitizing noisy geodetic survey documents.
//!
//! Takes OCR text of scanned Russian survey archive documents and turns
//! it into structured data:
//!
//! - Field extraction: communication type, contract number, document
//!   identifier (КГС number), survey date
//! - Communication-type classification against a configurable allow-list
//! - Coordinate-table location, parsing, heuristic repair and output
//! - Batch field-coverage statistics
//!
//! Extraction never fails on bad input: missing fields come back as
//! `None`, suspicious table rows are flagged in an issues report, and
//! only genuine I/O problems surface as errors.

pub mod catalog;
pub mod classify;
pub mod error;
pub mod extract;
pub mod models;
pub mod parser;
pub mod stats;

pub use catalog::{extract_and_save, extract_catalog, sanitize_filename, MAX_SKIP};
pub use classify::{best_document_match, normalize_type, similarity};
pub use error::{GeokatError, Result};
pub use extract::{ExtractionMatch, FieldExtractor};
pub use models::config::TypeCatalog;
pub use models::record::{
    CatalogStatus, CatalogSummary, CommTypeEntry, CoordinateCatalog, CoordinatePoint, FieldRecord,
};
pub use parser::{DocumentParser, DocumentReport, ExtractionResult};
pub use stats::{FieldCoverage, FieldStats};
