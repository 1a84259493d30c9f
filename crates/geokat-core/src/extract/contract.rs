//! Contract-number extraction.

use super::patterns::{CONTRACT_JUNK, CONTRACT_LABELS, CONTRACT_SHAPES};
use super::{ExtractionMatch, FieldExtractor};

/// Contract-number extractor.
///
/// A labeled candidate is first cleaned of everything but letters,
/// digits, slashes and dashes, then narrowed to a known contract-code
/// shape when one is embedded in it. When no shape matches, the cleaned
/// candidate itself is returned; a noisy value beats a lost one.
pub struct ContractExtractor;

impl ContractExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContractExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ContractExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for (tier, pattern) in CONTRACT_LABELS.iter().enumerate() {
            for caps in pattern.captures_iter(text) {
                let whole = match caps.get(0) {
                    Some(m) => m,
                    None => continue,
                };
                let raw = caps
                    .get(1)
                    .map(|g| g.as_str())
                    .filter(|s| !s.is_empty())
                    .unwrap_or(whole.as_str())
                    .trim();
                let cleaned = CONTRACT_JUNK.replace_all(raw, "").to_string();
                if cleaned.is_empty() {
                    continue;
                }
                let value = CONTRACT_SHAPES
                    .captures(&cleaned)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or(cleaned);

                if results.iter().any(|r| r.value == value) {
                    continue;
                }

                let confidence = if tier == 0 { 0.95 } else { 0.85 };
                results.push(
                    ExtractionMatch::new(value, confidence, format!("contract_pattern_{}", tier))
                        .with_position(whole.start(), whole.end()),
                );
            }
        }

        results
    }
}

/// Extract the contract number from text.
pub fn extract_contract_number(text: &str) -> Option<String> {
    ContractExtractor::new().extract(text).map(|m| m.value)
}
