//! String similarity scoring for type classification.

use std::collections::HashSet;

/// Similarity score in `[0, 1]` between two phrases.
///
/// Substring containment in either direction scores 0.9. Otherwise the
/// score is the Jaccard index of the whitespace-split word sets, raised
/// to at least 0.7 when both phrases are longer than three characters
/// and their per-word initials line up. Lengths are counted in
/// characters, not bytes; Cyrillic text would otherwise never pass the
/// length guards.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a.contains(&b) || b.contains(&a) {
        return 0.9;
    }

    let a_words: HashSet<&str> = a.split_whitespace().collect();
    let b_words: HashSet<&str> = b.split_whitespace().collect();
    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }

    let common = a_words.intersection(&b_words).count();
    let union = a_words.union(&b_words).count();
    let mut score = common as f64 / union as f64;

    // Abbreviation handling: "кан хоз" vs "канализация хоз-быт" style
    // pairs share initials even when no full word matches.
    if a.chars().count() > 3 && b.chars().count() > 3 {
        let a_initials: String = a.split_whitespace().filter_map(|w| w.chars().next()).collect();
        let b_initials: String = b.split_whitespace().filter_map(|w| w.chars().next()).collect();
        if !a_initials.is_empty() && a_initials == b_initials {
            score = score.max(0.7);
        }
    }

    score
}
