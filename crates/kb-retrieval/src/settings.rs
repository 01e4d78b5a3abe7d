//! Tunable weights and thresholds, read from the `retrieval` config section.
//!
//! The numbers were tuned by hand against a small crawled corpus. What must
//! hold is the order of the signal tiers:
//! exact phrase > exact token > domain boost > partial token > fuzzy >
//! content overlap > wildcard. [`RetrievalSettings::validate`] enforces it.

use serde::{Deserialize, Serialize};

use kb_core::config::Config;
use kb_core::{Error, Result};

use crate::boosts::KeywordGroup;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub exact_phrase: f32,
    pub exact_token: f32,
    pub character_boost: f32,
    pub franchise_boost: f32,
    pub domain_term_boost: f32,
    /// Per keyword group mentioned only in the content head, not the title.
    pub head_boost: f32,
    pub partial_token: f32,
    /// Multiplies the [0, 1] query/title similarity.
    pub fuzzy_title: f32,
    pub content_token: f32,
    pub wildcard_prefix: f32,
    pub wildcard_suffix: f32,
    pub wildcard_contains: f32,
    pub relaxed_exact: f32,
    pub relaxed_partial: f32,
    pub relaxed_substring: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_phrase: 1000.0,
            exact_token: 100.0,
            character_boost: 80.0,
            franchise_boost: 60.0,
            domain_term_boost: 40.0,
            head_boost: 10.0,
            partial_token: 30.0,
            fuzzy_title: 25.0,
            content_token: 2.0,
            wildcard_prefix: 1.5,
            wildcard_suffix: 1.0,
            wildcard_contains: 0.5,
            relaxed_exact: 10.0,
            relaxed_partial: 5.0,
            relaxed_substring: 3.0,
        }
    }
}

/// How to pick between articles with equal scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earliest position in the corpus wins.
    #[default]
    FirstSeen,
    /// Higher quality score wins, then earliest position.
    Quality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Minimum exact-phase score for a confident answer.
    pub confident_threshold: f32,
    /// Wildcard matching only runs while the running score is below this.
    pub wildcard_gate: f32,
    pub relaxed_min_score: f32,
    /// Per-token similarity needed to earn fuzzy credit.
    pub fuzzy_word_min: f32,
    pub fuzzy_min_score: f32,
    /// Both sides of a partial title match must have at least this many chars.
    pub partial_min_chars: usize,
    pub relaxed_min_chars: usize,
    /// Chars of content considered, with the title, for domain boosts.
    pub content_head_chars: usize,
    pub tie_break: TieBreak,
    /// Corpora at least this large are scored on the rayon pool.
    pub parallel_threshold: usize,
    pub weights: ScoringWeights,
    /// Replaces the built-in keyword groups when non-empty.
    pub keyword_groups: Vec<KeywordGroup>,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            confident_threshold: 50.0,
            wildcard_gate: 10.0,
            relaxed_min_score: 3.0,
            fuzzy_word_min: 0.7,
            fuzzy_min_score: 0.7,
            partial_min_chars: 4,
            relaxed_min_chars: 3,
            content_head_chars: 500,
            tie_break: TieBreak::FirstSeen,
            parallel_threshold: 2048,
            weights: ScoringWeights::default(),
            keyword_groups: Vec::new(),
        }
    }
}

impl RetrievalSettings {
    /// Read the `retrieval` section, falling back to defaults when absent.
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings: Self = config.get_or_default("retrieval")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let tiers = [
            ("exact_phrase", w.exact_phrase),
            ("exact_token", w.exact_token),
            ("character_boost", w.character_boost),
            ("franchise_boost", w.franchise_boost),
            ("domain_term_boost", w.domain_term_boost),
            ("partial_token", w.partial_token),
            ("fuzzy_title", w.fuzzy_title),
            ("content_token", w.content_token),
            ("wildcard_prefix", w.wildcard_prefix),
        ];
        for pair in tiers.windows(2) {
            let ((hi_name, hi), (lo_name, lo)) = (pair[0], pair[1]);
            if hi < lo {
                return Err(Error::InvalidConfig(format!(
                    "retrieval.weights.{hi_name} ({hi}) must not be below {lo_name} ({lo})"
                )));
            }
        }
        if w.head_boost > w.domain_term_boost {
            return Err(Error::InvalidConfig(format!(
                "retrieval.weights.head_boost ({}) must not exceed domain_term_boost ({})",
                w.head_boost, w.domain_term_boost
            )));
        }
        if w.wildcard_prefix < w.wildcard_suffix || w.wildcard_suffix < w.wildcard_contains {
            return Err(Error::InvalidConfig("wildcard weights must satisfy prefix >= suffix >= contains".into()));
        }
        let all = [
            w.exact_phrase,
            w.exact_token,
            w.character_boost,
            w.franchise_boost,
            w.domain_term_boost,
            w.head_boost,
            w.partial_token,
            w.fuzzy_title,
            w.content_token,
            w.wildcard_prefix,
            w.wildcard_suffix,
            w.wildcard_contains,
            w.relaxed_exact,
            w.relaxed_partial,
            w.relaxed_substring,
            self.confident_threshold,
            self.wildcard_gate,
            self.relaxed_min_score,
            self.fuzzy_min_score,
        ];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidConfig("retrieval weights and thresholds must be finite and non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.fuzzy_word_min) {
            return Err(Error::InvalidConfig("retrieval.fuzzy_word_min must be within [0, 1]".into()));
        }
        if self.relaxed_min_score <= 0.0 || self.fuzzy_min_score <= 0.0 {
            return Err(Error::InvalidConfig("fallback minimum scores must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_respect_tier_order() {
        RetrievalSettings::default().validate().unwrap();
    }

    #[test]
    fn inverted_tiers_are_rejected() {
        let mut s = RetrievalSettings::default();
        s.weights.partial_token = 500.0;
        assert!(matches!(s.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn head_boost_above_domain_terms_is_rejected() {
        let mut s = RetrievalSettings::default();
        s.weights.head_boost = 60.0;
        assert!(matches!(s.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let s = RetrievalSettings { confident_threshold: -1.0, ..Default::default() };
        assert!(s.validate().is_err());
    }
}
