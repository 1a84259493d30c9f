//! Communication-type classification against a caller-supplied
//! allow-list.
//!
//! All classification is relative to the allow-list: a synonym hit whose
//! canonical name is not allowed does not stop the scan, it just falls
//! through to later entries. This is what makes catalog order matter
//! (see [`synonyms`]).

pub mod similarity;
pub mod synonyms;

pub use similarity::similarity;
pub use synonyms::SYNONYMS;

use tracing::debug;

/// Minimum similarity for matching a phrase against an allowed name
/// directly, without a synonym hit.
const DIRECT_MATCH_THRESHOLD: f64 = 0.9;

/// Minimum similarity for the whole-document sweep.
const SWEEP_THRESHOLD: f64 = 0.6;

/// Resolve a raw phrase to a canonical allowed type name.
///
/// Scans the synonym table in order and returns the first hit whose
/// canonical name is on the allow-list. When no synonym resolves, falls
/// back to direct similarity against the allowed names in list order.
pub fn normalize_type(text: &str, allowed: &[String]) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for (pattern, canonical) in SYNONYMS.iter() {
        if pattern.is_match(text) && allowed.iter().any(|name| name == canonical) {
            return Some((*canonical).to_string());
        }
    }

    for name in allowed {
        if similarity(text, name) > DIRECT_MATCH_THRESHOLD {
            return Some(name.clone());
        }
    }

    None
}

/// Last-resort sweep over the whole document.
///
/// Scores every 2-word window longer than 5 characters and every 3-word
/// window longer than 8 characters against the allowed names, and
/// returns the best hit above the sweep threshold. Comparisons are
/// strictly greater-than, so the earliest of equally good candidates
/// wins and the result is deterministic.
pub fn best_document_match(text: &str, allowed: &[String]) -> Option<String> {
    if allowed.is_empty() {
        return None;
    }

    let mut phrases: Vec<String> = Vec::new();
    for line in text.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        for i in 0..words.len().saturating_sub(1) {
            let pair = words[i..i + 2].join(" ");
            if pair.chars().count() > 5 {
                phrases.push(pair);
            }
            if i + 2 < words.len() {
                let triple = words[i..i + 3].join(" ");
                if triple.chars().count() > 8 {
                    phrases.push(triple);
                }
            }
        }
    }

    let mut best_match: Option<&String> = None;
    let mut best_score = SWEEP_THRESHOLD;
    for phrase in &phrases {
        for name in allowed {
            let score = similarity(phrase, name);
            if score > best_score {
                best_score = score;
                best_match = Some(name);
            }
        }
    }

    if let Some(name) = best_match {
        debug!(
            "whole-document sweep matched '{}' (score {:.2})",
            name, best_score
        );
        return Some(name.clone());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn allow(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn synonym_hit_resolves_when_allowed() {
        let allowed = allow(&["Кабель связи", "Газ"]);
        assert_eq!(
            normalize_type("кабель связи", &allowed),
            Some("Кабель связи".to_string())
        );
    }

    #[test]
    fn disallowed_synonym_falls_through() {
        // "кабель связи" resolves to a name that is not allowed here and
        // nothing else matches, so classification fails entirely.
        let allowed = allow(&["Газ"]);
        assert_eq!(normalize_type("кабель связи", &allowed), None);
    }

    #[test]
    fn allow_list_order_picks_the_generic_sewer() {
        let both = allow(&["Канализация", "Нап канализация"]);
        assert_eq!(
            normalize_type("нап канализация", &both),
            Some("Канализация".to_string())
        );

        let variant_only = allow(&["Нап канализация"]);
        assert_eq!(
            normalize_type("нап канализация", &variant_only),
            Some("Нап канализация".to_string())
        );
    }

    #[test]
    fn direct_similarity_requires_more_than_point_nine() {
        // Bare containment scores exactly 0.9 and must not pass the
        // strict threshold on its own.
        let allowed = allow(&["Водомерный узел"]);
        assert_eq!(normalize_type("узел", &allowed), None);
    }

    #[test]
    fn empty_input_is_rejected() {
        let allowed = allow(&["Газ"]);
        assert_eq!(normalize_type("", &allowed), None);
        assert_eq!(normalize_type("   ", &allowed), None);
    }

    #[test]
    fn sweep_finds_type_buried_in_text() {
        let allowed = allow(&["Кабель связи"]);
        let text = "Произведена съемка трассы\nпроложен кабель связи до колодца";
        assert_eq!(
            best_document_match(text, &allowed),
            Some("Кабель связи".to_string())
        );
    }

    #[test]
    fn sweep_ignores_weak_candidates() {
        let allowed = allow(&["Кабель связи"]);
        let text = "акт приемки выполненных работ\nподписан комиссией";
        assert_eq!(best_document_match(text, &allowed), None);
    }

    #[test]
    fn sweep_skips_short_windows() {
        // All 2-word windows here are 5 characters or shorter, so none
        // is even scored.
        let allowed = allow(&["аб вг"]);
        assert_eq!(best_document_match("аб вг", &allowed), None);
    }
}
