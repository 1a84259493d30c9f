//! Rule-based field extraction from OCR document text.

pub mod contract;
pub mod dates;
pub mod kgs;
pub mod patterns;

pub use contract::*;
pub use dates::*;
pub use kgs::*;

use regex::Regex;

/// Trait for field extractors.
pub trait FieldExtractor {
    type Output;

    /// Extract the best field value from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all candidate values from text, best first.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction result with a confidence score.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    pub value: T,
    pub confidence: f32,
    pub position: Option<(usize, usize)>,
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: String) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// First match of an ordered pattern cascade.
///
/// Returns the first capture group when the pattern has one and it is
/// non-empty, the whole match otherwise. The result is trimmed.
pub fn first_cascade_match(text: &str, cascade: &[Regex]) -> Option<String> {
    for pattern in cascade {
        if let Some(caps) = pattern.captures(text) {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let value = caps
                .get(1)
                .map(|g| g.as_str())
                .filter(|s| !s.is_empty())
                .unwrap_or(whole);
            return Some(value.trim().to_string());
        }
    }
    None
}
