//! Document identifier (КГС number) extraction.

use super::patterns::{KGS_CASCADE, KGS_JUNK};
use super::{ExtractionMatch, FieldExtractor};

/// Minimum cleaned length for an identifier candidate. Shorter strings
/// are almost always stray numbers, not КГС identifiers.
const MIN_ID_LEN: usize = 4;

/// Document-identifier extractor.
///
/// Runs the labeled "№ КГС" patterns first and bare digit-dash pairs
/// last. Each candidate is cleaned down to digits, uppercase letters,
/// dashes and slashes; the first candidate whose cleaned form is long
/// enough wins, and the cleaned form is what gets returned, since it
/// also names the output files.
pub struct KgsExtractor {
    min_len: usize,
}

impl KgsExtractor {
    pub fn new() -> Self {
        Self { min_len: MIN_ID_LEN }
    }
}

impl Default for KgsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for KgsExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for (tier, pattern) in KGS_CASCADE.iter().enumerate() {
            for caps in pattern.captures_iter(text) {
                let whole = match caps.get(0) {
                    Some(m) => m,
                    None => continue,
                };
                let raw = caps.get(1).map_or(whole.as_str(), |g| g.as_str()).trim();
                let cleaned = KGS_JUNK.replace_all(raw, "").to_string();
                if cleaned.chars().count() < self.min_len {
                    continue;
                }
                if results.iter().any(|r| r.value == cleaned) {
                    continue;
                }

                // Labeled forms are trustworthy; bare digit pairs much less so.
                let confidence = if tier < 2 {
                    0.95
                } else if tier < 5 {
                    0.85
                } else {
                    0.7
                };

                results.push(
                    ExtractionMatch::new(cleaned, confidence, format!("kgs_pattern_{}", tier))
                        .with_position(whole.start(), whole.end()),
                );
            }
        }

        results
    }
}

/// Extract the document identifier from text.
pub fn extract_kgs(text: &str) -> Option<String> {
    KgsExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_labeled_id() {
        let text = "Акт технической приемки\n№ КГС: 123-45\nпрочее";
        assert_eq!(extract_kgs(text), Some("123-45".to_string()));
    }

    #[test]
    fn extracts_bare_numbered_pair() {
        let text = "Акт № ID: 123-45";
        assert_eq!(extract_kgs(text), Some("123-45".to_string()));
    }

    #[test]
    fn cleans_candidate_before_accepting() {
        // The loose "КГС <rest of line>" pattern grabs trailing words too;
        // cleanup keeps only id-like characters.
        let text = "КГС уч. 123-45 (копия)";
        assert_eq!(extract_kgs(text), Some("123-45".to_string()));
    }

    #[test]
    fn rejects_short_candidates() {
        assert_eq!(extract_kgs("№ 12"), None);
        assert_eq!(extract_kgs("совершенно другой текст"), None);
    }

    #[test]
    fn keeps_letter_prefix() {
        let text = "№ КГС: А1234";
        assert_eq!(extract_kgs(text), Some("А1234".to_string()));
    }

    #[test]
    fn extract_all_reports_later_candidates_too() {
        let text = "№ КГС: 123-45\nв архиве также 678-90";
        let all = KgsExtractor::new().extract_all(text);
        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();
        assert!(values.contains(&"123-45"));
        assert!(values.contains(&"678-90"));
        assert_eq!(values[0], "123-45");
        assert!(all[0].confidence > all.last().unwrap().confidence);
    }
}
