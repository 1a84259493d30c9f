//! Survey-date extraction.
//!
//! Dates are kept as dd.mm.yyyy strings exactly as printed. OCR text is
//! not reliable enough to justify calendar parsing, and downstream
//! consumers (registry CSV, folder metadata) want the printed form as-is.

use super::patterns::SURVEY_DATE_CASCADE;
use super::{ExtractionMatch, FieldExtractor};

/// Survey-date extractor.
pub struct SurveyDateExtractor;

impl SurveyDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SurveyDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SurveyDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for (tier, pattern) in SURVEY_DATE_CASCADE.iter().enumerate() {
            for caps in pattern.captures_iter(text) {
                let whole = match caps.get(0) {
                    Some(m) => m,
                    None => continue,
                };
                let value = caps
                    .get(1)
                    .map_or(whole.as_str(), |g| g.as_str())
                    .trim()
                    .to_string();
                if results.iter().any(|r| r.value == value) {
                    continue;
                }

                let confidence = match tier {
                    0 => 0.95,
                    1 => 0.9,
                    _ => 0.7,
                };
                results.push(
                    ExtractionMatch::new(value, confidence, format!("date_pattern_{}", tier))
                        .with_position(whole.start(), whole.end()),
                );
            }
        }

        results
    }
}

/// Extract the survey date from text.
pub fn extract_survey_date(text: &str) -> Option<String> {
    SurveyDateExtractor::new().extract(text).map(|m| m.value)
}
