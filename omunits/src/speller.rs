//! Spelling correction for unit labels

use std::collections::BTreeSet;

/// Levenshtein edit distance between two strings
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, &ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Case-sensitive corrector over a fixed dictionary of unit labels
#[derive(Debug, Clone, Default)]
pub struct SpellingCorrector {
    words: BTreeSet<String>,
    max_distance: usize,
}

impl SpellingCorrector {
    pub fn new<I, S>(words: I, max_distance: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            max_distance,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.words.len()
    }

    /// Closest known word within the distance bound.
    ///
    /// A known word is its own correction. Among equally distant
    /// candidates the lexicographically smallest wins.
    pub fn correction(&self, word: &str) -> Option<String> {
        if self.words.contains(word) {
            return Some(word.to_string());
        }

        let len = word.chars().count();
        let mut best: Option<(usize, &String)> = None;

        for candidate in &self.words {
            if candidate.chars().count().abs_diff(len) > self.max_distance {
                continue;
            }
            let distance = levenshtein_distance(word, candidate);
            if distance > self.max_distance {
                continue;
            }
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, candidate));
            }
        }

        best.map(|(_, w)| w.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("klogram", "kilogram"), 1);
        assert_eq!(levenshtein_distance("gallitre", "litre"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("Réaumur", "Reaumur"), 1);
    }

    #[test]
    fn test_known_word() {
        let speller = SpellingCorrector::new(["kilogram", "gram"], 1);
        assert_eq!(speller.correction("gram").as_deref(), Some("gram"));
    }

    #[test]
    fn test_single_edit() {
        let speller = SpellingCorrector::new(["kilogram", "gram", "litre"], 1);
        assert_eq!(speller.correction("klogram").as_deref(), Some("kilogram"));
        assert_eq!(speller.correction("gallitre"), None);
    }

    #[test]
    fn test_bound_is_respected() {
        let speller = SpellingCorrector::new(["litre"], 3);
        assert_eq!(speller.correction("gallitre").as_deref(), Some("litre"));
        let speller = SpellingCorrector::new(["litre"], 2);
        assert_eq!(speller.correction("gallitre"), None);
    }

    #[test]
    fn test_case_sensitive() {
        let speller = SpellingCorrector::new(["Kelvin"], 0);
        assert_eq!(speller.correction("kelvin"), None);
    }

    #[test]
    fn test_ties_pick_lexicographic_first() {
        let speller = SpellingCorrector::new(["metre", "mitre"], 1);
        assert_eq!(speller.correction("mftre").as_deref(), Some("metre"));
    }
}
