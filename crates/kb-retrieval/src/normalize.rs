//! Lowercasing and tokenization shared by every scoring signal.

use std::collections::HashSet;

use kb_core::types::excerpt;
use kb_core::Article;

/// Words that never earn per-token credit. Only entries longer than two
/// chars matter, shorter words are dropped by length anyway.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it", "its", "of", "on",
    "that", "the", "to", "was", "will", "with", "or", "but", "not", "this", "these", "they", "them", "their", "there",
    "then", "than", "so", "if", "when", "where", "why", "how", "what", "which", "who", "whom", "whose", "can", "could",
    "should", "would", "may", "might", "must", "shall", "do", "does", "did", "have", "had", "having", "about", "tell",
    "me", "more", "you",
];

/// Tokens must be longer than this many chars.
pub const MIN_TOKEN_CHARS: usize = 2;

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Glob metacharacters recognised inside query tokens.
pub fn is_glob(token: &str) -> bool {
    token.contains(['*', '?'])
}

pub fn strip_glob(token: &str) -> String {
    token.chars().filter(|c| *c != '*' && *c != '?').collect()
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Lowercased words with surrounding punctuation removed; inner punctuation
/// (`c-3po`, `wall-e`) survives. `"Data (Star Trek)"` gives `data star trek`.
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// True when `phrase` occurs as consecutive entries of `words`.
pub fn contains_phrase(words: &[String], phrase: &[String]) -> bool {
    if phrase.is_empty() || phrase.len() > words.len() {
        return false;
    }
    words.windows(phrase.len()).any(|w| w == phrase)
}

/// A normalized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Trimmed, lowercased, whitespace-collapsed query used for phrase checks.
    pub phrase: String,
    /// Every word of the query, including short ones.
    pub words: Vec<String>,
    /// Scoring tokens: longer than two chars, not stop words, deduplicated.
    /// May carry `*`/`?` glob characters.
    pub tokens: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let phrase = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        let mut tokens: Vec<String> = Vec::new();
        for w in phrase.split_whitespace() {
            // Keep `*` so glob tokens survive; a trailing `?` is punctuation.
            let t = w.trim_matches(|c: char| !c.is_alphanumeric() && c != '*');
            if char_len(t) > MIN_TOKEN_CHARS && !is_stop_word(t) && !tokens.iter().any(|x| x == t) {
                tokens.push(t.to_string());
            }
        }
        Self { words: words(&phrase), phrase, tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.phrase.is_empty()
    }

    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }
}

/// Pre-normalized form of one article, built once per snapshot.
#[derive(Debug, Clone)]
pub struct ArticleView {
    pub title: String,
    pub title_words: Vec<String>,
    pub content: String,
    pub content_words: HashSet<String>,
    /// Title words followed by the words of the content head; the surface
    /// for domain boosts.
    pub head_words: Vec<String>,
    pub quality: f32,
    pub indexable: bool,
}

impl ArticleView {
    pub fn new(article: &Article, head_chars: usize) -> Self {
        let title = article.title.trim().to_lowercase();
        let title_words = words(&title);
        let content = article.content.to_lowercase();
        let content_words = words(&content).into_iter().collect();
        let mut head_words = title_words.clone();
        head_words.extend(words(&excerpt(&content, head_chars)));
        Self {
            indexable: !title.is_empty(),
            title,
            title_words,
            content,
            content_words,
            head_words,
            quality: article.quality_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_words_drop_surrounding_punctuation() {
        assert_eq!(words("Data (Star Trek)"), vec!["data", "star", "trek"]);
        assert_eq!(words("C-3PO, WALL-E!"), vec!["c-3po", "wall-e"]);
    }

    #[test]
    fn tokens_skip_short_and_stop_words() {
        let q = Query::parse("  What is the AI   robot? ");
        assert_eq!(q.phrase, "what is the ai robot?");
        assert_eq!(q.tokens, vec!["robot"]);
        assert_eq!(q.words, vec!["what", "is", "the", "ai", "robot"]);
    }

    #[test]
    fn glob_tokens_keep_star() {
        let q = Query::parse("gund* robot robot");
        assert_eq!(q.tokens, vec!["gund*", "robot"]);
        assert!(is_glob(&q.tokens[0]));
        assert_eq!(strip_glob("ro?o*"), "roo");
    }

    #[test]
    fn phrase_match_requires_consecutive_words() {
        let w = words("the mobile suit gundam");
        assert!(contains_phrase(&w, &words("mobile suit")));
        assert!(!contains_phrase(&w, &words("suit mobile")));
        assert!(!contains_phrase(&w, &[]));
    }
}
