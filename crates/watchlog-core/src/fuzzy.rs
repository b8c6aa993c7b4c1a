//! Fuzzy text matching: substring fast path plus bounded edit distance.

/// Word boundaries recognized inside titles, besides whitespace
const WORD_SEPARATORS: [char; 8] = ['-', '_', ':', '：', ',', '，', '、', '·'];

/// Minimum number of single-character insertions, deletions, or substitutions
/// to transform one string into the other. Full DP table, O(mn) time and space.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for (i, cell) in table[0].iter_mut().enumerate() {
        *cell = i;
    }
    for (j, row) in table.iter_mut().enumerate() {
        row[0] = j;
    }

    for j in 1..=n {
        for i in 1..=m {
            let substitution = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            table[j][i] = (table[j][i - 1] + 1)
                .min(table[j - 1][i] + 1)
                .min(table[j - 1][i - 1] + substitution);
        }
    }

    table[n][m]
}

/// Whether `text` matches the search `term`.
///
/// An empty term matches everything. Case-folds both sides, then tries in
/// order: contiguous substring, whole-string edit distance within the error
/// budget, and per-word edit distance within the budget. Terms shorter than
/// 2 characters only match as substrings.
pub fn fuzzy_match(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let text = text.to_lowercase();
    let term = term.to_lowercase();

    if text.contains(&term) {
        return true;
    }

    let term_len = term.chars().count();
    if term_len < 2 {
        return false;
    }

    // Error budget: looser for longer terms
    let budget = if term_len > 4 { 2 } else { 1 };

    let text_len = text.chars().count();
    if text_len.abs_diff(term_len) <= budget + 1 && edit_distance(&text, &term) <= budget {
        return true;
    }

    text.split(|c: char| c.is_whitespace() || WORD_SEPARATORS.contains(&c))
        .filter(|word| !word.is_empty())
        .any(|word| {
            let word_len = word.chars().count();
            word_len.abs_diff(term_len) <= budget && edit_distance(word, &term) <= budget
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance_identity() {
        assert_eq!(edit_distance("盗梦空间", "盗梦空间"), 0);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn test_edit_distance_empty_side() {
        assert_eq!(edit_distance("", "abcd"), 4);
        assert_eq!(edit_distance("abcd", ""), 4);
    }

    #[test]
    fn test_edit_distance_symmetric_and_bounded() {
        let pairs = [("kitten", "sitting"), ("盗梦空间", "盗孟空间"), ("flaw", "lawn")];
        for (a, b) in pairs {
            let d = edit_distance(a, b);
            assert_eq!(d, edit_distance(b, a));
            assert!(d <= a.chars().count().max(b.chars().count()));
        }
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("盗梦空间", "盗孟空间"), 1);
    }

    #[test]
    fn test_empty_term_matches_everything() {
        assert!(fuzzy_match("anything", ""));
        assert!(fuzzy_match("", ""));
    }

    #[test]
    fn test_substring_fast_path() {
        assert!(fuzzy_match("盗梦空间", "盗梦"));
        assert!(fuzzy_match("The Matrix", "matrix"));
    }

    #[test]
    fn test_single_char_term_requires_substring() {
        assert!(fuzzy_match("abc", "a"));
        assert!(!fuzzy_match("abc", "z"));
    }

    #[test]
    fn test_whole_string_within_budget() {
        // One substituted character, term length 4 -> budget 1
        assert!(fuzzy_match("盗梦空间", "盗孟空间"));
        // Transposition in a 5+ character term -> budget 2
        assert!(fuzzy_match("interstellar", "intersetllar"));
    }

    #[test]
    fn test_word_level_match() {
        assert!(fuzzy_match("Blade Runner 2049", "runer"));
        assert!(!fuzzy_match("Blade Runner 2049", "zzzzzz"));
    }
}
