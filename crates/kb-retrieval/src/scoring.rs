//! Per-article scoring for each cascade phase.

use serde::Serialize;

use crate::boosts::KeywordGroups;
use crate::fuzzy::{best_word_similarity, similarity};
use crate::normalize::{char_len, contains_phrase, strip_glob, words, ArticleView, Query};
use crate::settings::RetrievalSettings;
use crate::wildcard::{classify, GlobKind};

/// Every signal of the exact phase, kept apart so a ranking can be explained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub exact_phrase: f32,
    pub exact_tokens: f32,
    pub partial_tokens: f32,
    pub domain_boost: f32,
    pub fuzzy_title: f32,
    pub content_overlap: f32,
    pub wildcard: f32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f32 {
        self.exact_phrase
            + self.exact_tokens
            + self.partial_tokens
            + self.domain_boost
            + self.fuzzy_title
            + self.content_overlap
            + self.wildcard
    }
}

pub struct Scorer<'a> {
    settings: &'a RetrievalSettings,
    groups: &'a KeywordGroups,
}

impl<'a> Scorer<'a> {
    pub fn new(settings: &'a RetrievalSettings, groups: &'a KeywordGroups) -> Self {
        Self { settings, groups }
    }

    /// Full layered score used by the exact phase.
    pub fn score(&self, q: &Query, a: &ArticleView) -> ScoreBreakdown {
        let mut b = ScoreBreakdown::default();
        if !a.indexable || q.is_empty() {
            return b;
        }
        let w = &self.settings.weights;

        if a.title.contains(&q.phrase) {
            b.exact_phrase = w.exact_phrase;
        }

        if q.has_tokens() {
            for t in &q.tokens {
                if a.title_words.iter().any(|word| word == t) {
                    b.exact_tokens += w.exact_token;
                }
                b.partial_tokens += w.partial_token * self.partial_matches(t, &a.title_words) as f32;
            }

            b.domain_boost = self.groups.boost(&q.words, &a.title_words, &a.head_words, w);

            if b.total() < self.settings.confident_threshold {
                b.fuzzy_title = similarity(&q.phrase, &a.title) * w.fuzzy_title;
            }
        }

        b.content_overlap = self.content_overlap(q, a);

        if q.has_tokens() && b.total() < self.settings.wildcard_gate {
            b.wildcard = q.tokens.iter().map(|t| self.wildcard(t, &a.title_words)).sum();
        }
        b
    }

    /// Relaxed phase: title-only token matching with looser guards.
    pub fn relaxed(&self, q: &Query, a: &ArticleView) -> f32 {
        if !a.indexable {
            return 0.0;
        }
        let w = &self.settings.weights;
        let min = self.settings.relaxed_min_chars;
        q.tokens
            .iter()
            .map(|t| strip_glob(t))
            .filter(|core| char_len(core) >= min)
            .map(|core| {
                if a.title_words.iter().any(|word| *word == core) {
                    w.relaxed_exact
                } else if a
                    .title_words
                    .iter()
                    .any(|word| char_len(word) >= min && (word.contains(&core) || core.contains(word.as_str())))
                {
                    w.relaxed_partial
                } else if a.title.contains(&core) {
                    w.relaxed_substring
                } else {
                    0.0
                }
            })
            .sum()
    }

    /// Fuzzy phase: per-token similarity against title words, partial credit
    /// only above `fuzzy_word_min`.
    pub fn fuzzy(&self, q: &Query, a: &ArticleView) -> f32 {
        if !a.indexable {
            return 0.0;
        }
        q.tokens
            .iter()
            .map(|t| best_word_similarity(&strip_glob(t), &a.title_words))
            .filter(|s| *s >= self.settings.fuzzy_word_min)
            .sum()
    }

    fn partial_matches(&self, token: &str, title_words: &[String]) -> usize {
        let min = self.settings.partial_min_chars;
        if char_len(token) < min {
            return 0;
        }
        title_words
            .iter()
            .filter(|word| {
                word.as_str() != token
                    && char_len(word) >= min
                    && (word.contains(token) || token.contains(word.as_str()))
            })
            .count()
    }

    fn content_overlap(&self, q: &Query, a: &ArticleView) -> f32 {
        let w = self.settings.weights.content_token;
        if q.has_tokens() {
            let hits = q
                .tokens
                .iter()
                .filter(|t| {
                    let core = strip_glob(t);
                    !core.is_empty() && a.content_words.contains(&core)
                })
                .count();
            return hits as f32 * w;
        }
        // Only short words: fall back to the whole phrase as a word sequence.
        let phrase = words(&q.phrase);
        if !phrase.is_empty() && a.content.contains(&q.phrase) && contains_phrase(&words(&a.content), &phrase) {
            w
        } else {
            0.0
        }
    }

    fn wildcard(&self, token: &str, title_words: &[String]) -> f32 {
        let w = &self.settings.weights;
        title_words
            .iter()
            .filter_map(|word| classify(token, word))
            .max()
            .map(|kind| match kind {
                GlobKind::Prefix => w.wildcard_prefix,
                GlobKind::Suffix => w.wildcard_suffix,
                GlobKind::Contains => w.wildcard_contains,
            })
            .unwrap_or(0.0)
    }
}
