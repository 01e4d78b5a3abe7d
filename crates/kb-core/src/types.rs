//! Domain types shared by the corpus store, the retrieval engine and the chat layer.

use serde::{Deserialize, Serialize};

/// Quality scores outside this range are clamped at load time.
pub const QUALITY_MIN: f32 = 0.1;
pub const QUALITY_MAX: f32 = 2.5;

/// Default summary length (chars) when a record carries none.
pub const SUMMARY_CHARS: usize = 500;

/// One corpus entry eligible for retrieval.
///
/// - `title`: never empty, the primary match surface
/// - `content`: body text, may be empty (title-only matching)
/// - `summary`: truncated excerpt, derived from `content` when absent
/// - `domain`: coarse category tag, e.g. "robotics" or "ethics"
/// - `word_count`: whitespace word count of `content` unless supplied
/// - `quality_score`: informational, clamped to `[0.1, 2.5]`
/// - `url`: opaque provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub domain: String,
    pub word_count: usize,
    pub quality_score: f32,
    pub url: String,
}

impl Article {
    /// Build an article from a title and body, deriving the remaining fields.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            title: title.into(),
            summary: excerpt(&content, SUMMARY_CHARS),
            domain: "general".to_string(),
            word_count: content.split_whitespace().count(),
            quality_score: 1.0,
            url: String::new(),
            content,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality_score = clamp_quality(quality);
        self
    }

    /// Whether the article can be scored at all.
    pub fn is_indexable(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

pub fn clamp_quality(q: f32) -> f32 {
    if q.is_nan() {
        return 1.0;
    }
    q.clamp(QUALITY_MIN, QUALITY_MAX)
}

/// First `max_chars` characters of `text`, never splitting a char.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Which cascade phase produced a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Exact,
    Relaxed,
    Fuzzy,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Exact => "exact",
            Strategy::Relaxed => "relaxed",
            Strategy::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single search.
///
/// `NotFound` is an expected result, not an error: every strategy ran and
/// nothing cleared its bar. Serializes as `{"found": false}` or
/// `{"found": true, "article": .., "score": .., "strategy": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "MatchResultRepr", try_from = "MatchResultRepr")]
pub enum MatchResult {
    Found {
        article: Article,
        score: f32,
        strategy: Strategy,
    },
    NotFound,
}

impl MatchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found { .. })
    }

    pub fn article(&self) -> Option<&Article> {
        match self {
            MatchResult::Found { article, .. } => Some(article),
            MatchResult::NotFound => None,
        }
    }

    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            MatchResult::Found { strategy, .. } => Some(*strategy),
            MatchResult::NotFound => None,
        }
    }

    pub fn score(&self) -> Option<f32> {
        match self {
            MatchResult::Found { score, .. } => Some(*score),
            MatchResult::NotFound => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct MatchResultRepr {
    found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    article: Option<Article>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    strategy: Option<Strategy>,
}

impl From<MatchResult> for MatchResultRepr {
    fn from(m: MatchResult) -> Self {
        match m {
            MatchResult::Found { article, score, strategy } => Self {
                found: true,
                article: Some(article),
                score: Some(score),
                strategy: Some(strategy),
            },
            MatchResult::NotFound => Self { found: false, article: None, score: None, strategy: None },
        }
    }
}

impl TryFrom<MatchResultRepr> for MatchResult {
    type Error = String;

    fn try_from(r: MatchResultRepr) -> Result<Self, Self::Error> {
        if !r.found {
            return Ok(MatchResult::NotFound);
        }
        match (r.article, r.score, r.strategy) {
            (Some(article), Some(score), Some(strategy)) => Ok(MatchResult::Found { article, score, strategy }),
            _ => Err("found result requires article, score and strategy".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("héllo", 2), "hé");
        assert_eq!(excerpt("abc", 10), "abc");
    }

    #[test]
    fn not_found_serializes_as_found_false() {
        let json = serde_json::to_value(MatchResult::NotFound).unwrap();
        assert_eq!(json, serde_json::json!({ "found": false }));
    }

    #[test]
    fn found_serializes_strategy_lowercase() {
        let m = MatchResult::Found { article: Article::new("Robot", ""), score: 1000.0, strategy: Strategy::Exact };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["found"], true);
        assert_eq!(json["strategy"], "exact");
        assert_eq!(json["article"]["title"], "Robot");
    }
}
