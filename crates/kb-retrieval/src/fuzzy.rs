//! Normalized string similarity based on the longest common subsequence.

/// Length of the longest common subsequence of `a` and `b`, in chars.
pub fn lcs_len(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { prev[j + 1].max(curr[j]) };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `2 * LCS / (|a| + |b|)`, in `[0, 1]`. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f32 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    (2 * lcs_len(a, b)) as f32 / total as f32
}

/// Best similarity of `token` against any of `words`.
pub fn best_word_similarity(token: &str, words: &[String]) -> f32 {
    words.iter().map(|w| similarity(token, w)).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcs_of_known_pairs() {
        assert_eq!(lcs_len("gundam", "gundan"), 5);
        assert_eq!(lcs_len("abc", ""), 0);
        assert_eq!(lcs_len("robot", "robto"), 4);
    }

    #[test]
    fn similarity_edges() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("robot", ""), 0.0);
        assert_eq!(similarity("robot", "robot"), 1.0);
        assert!((similarity("gund", "gundam") - 0.8).abs() < 1e-6);
    }

    #[test]
    fn unrelated_words_score_low() {
        assert!(similarity("toaster", "quantum") < 0.5);
        assert!(similarity("recipes", "computing") < 0.5);
    }
}
