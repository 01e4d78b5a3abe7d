//! Topic keyword groups for the domain-boost signal.
//!
//! A group fires when the query and the article's head (title plus the start
//! of the content) both mention one of its keywords. Each group fires at most
//! once per article. A title mention earns the tier weight; a mention only in
//! the content head earns `head_boost`, never more than the tier weight.

use serde::{Deserialize, Serialize};

use crate::normalize::{contains_phrase, words};
use crate::settings::ScoringWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostTier {
    Character,
    Franchise,
    DomainTerm,
}

impl BoostTier {
    pub fn weight(&self, w: &ScoringWeights) -> f32 {
        match self {
            BoostTier::Character => w.character_boost,
            BoostTier::Franchise => w.franchise_boost,
            BoostTier::DomainTerm => w.domain_term_boost,
        }
    }
}

/// A group as written in the table or in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub tier: BoostTier,
    pub keywords: Vec<String>,
}

const BUILTIN: &[(&str, BoostTier, &[&str])] = &[
    // Characters, with the context clues that identify them.
    ("data", BoostTier::Character, &["data", "positronic", "soong", "tng"]),
    ("bishop", BoostTier::Character, &["bishop", "weyland"]),
    ("ash", BoostTier::Character, &["ash", "nostromo"]),
    ("david", BoostTier::Character, &["david", "prometheus", "covenant"]),
    ("roy batty", BoostTier::Character, &["roy batty", "batty", "tears in rain"]),
    ("rachael", BoostTier::Character, &["rachael"]),
    ("ava", BoostTier::Character, &["ava", "turing test"]),
    ("dolores", BoostTier::Character, &["dolores", "wyatt"]),
    ("connor", BoostTier::Character, &["connor", "cyberlife", "deviant"]),
    ("wall-e", BoostTier::Character, &["wall-e", "walle"]),
    ("c-3po", BoostTier::Character, &["c-3po", "c3po", "protocol droid"]),
    ("r2-d2", BoostTier::Character, &["r2-d2", "r2d2", "astromech"]),
    ("terminator", BoostTier::Character, &["terminator", "t-800", "skynet"]),
    ("optimus prime", BoostTier::Character, &["optimus prime", "optimus"]),
    ("bender", BoostTier::Character, &["bender"]),
    ("amuro ray", BoostTier::Character, &["amuro ray", "amuro", "rx-78-2"]),
    // Franchises.
    ("gundam", BoostTier::Franchise, &["gundam", "mobile suit", "mecha", "zeon", "gunpla"]),
    ("star trek", BoostTier::Franchise, &["star trek", "enterprise", "starfleet"]),
    ("star wars", BoostTier::Franchise, &["star wars", "droid", "droids", "tatooine"]),
    ("blade runner", BoostTier::Franchise, &["blade runner", "replicant", "replicants", "nexus-6"]),
    ("alien", BoostTier::Franchise, &["alien", "aliens", "xenomorph"]),
    ("westworld", BoostTier::Franchise, &["westworld"]),
    ("ex machina", BoostTier::Franchise, &["ex machina"]),
    ("transformers", BoostTier::Franchise, &["transformers", "autobot", "autobots", "decepticon", "cybertron"]),
    ("futurama", BoostTier::Franchise, &["futurama", "planet express"]),
    ("detroit", BoostTier::Franchise, &["detroit become human"]),
    // Generic domain terms.
    ("robotics", BoostTier::DomainTerm, &["robot", "robots", "robotics", "robotic", "automaton", "cyborg"]),
    ("android", BoostTier::DomainTerm, &["android", "androids", "synthetic", "humanoid"]),
    (
        "ai",
        BoostTier::DomainTerm,
        &["artificial intelligence", "machine learning", "neural network", "neural networks", "deep learning"],
    ),
    ("ethics", BoostTier::DomainTerm, &["ethics", "ethical", "roboethics", "morality", "moral"]),
    ("hardware", BoostTier::DomainTerm, &["sensor", "sensors", "actuator", "actuators", "servo", "motor"]),
];

/// Keyword groups with their keywords split into words, ready for matching.
#[derive(Debug, Clone)]
pub struct KeywordGroups {
    groups: Vec<CompiledGroup>,
}

#[derive(Debug, Clone)]
struct CompiledGroup {
    name: String,
    tier: BoostTier,
    phrases: Vec<Vec<String>>,
}

impl CompiledGroup {
    fn matches(&self, words: &[String]) -> bool {
        self.phrases.iter().any(|p| contains_phrase(words, p))
    }
}

impl KeywordGroups {
    pub fn builtin() -> Self {
        Self::new(BUILTIN.iter().map(|(name, tier, kws)| KeywordGroup {
            name: name.to_string(),
            tier: *tier,
            keywords: kws.iter().map(|k| k.to_string()).collect(),
        }))
    }

    pub fn new(groups: impl IntoIterator<Item = KeywordGroup>) -> Self {
        let groups = groups
            .into_iter()
            .map(|g| CompiledGroup {
                phrases: g.keywords.iter().map(|k| words(k)).filter(|p| !p.is_empty()).collect(),
                name: g.name,
                tier: g.tier,
            })
            .collect();
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups mentioned by both `query_words` and `head_words`, as
    /// `(name, tier)` in table order.
    pub fn shared<'a>(
        &'a self,
        query_words: &'a [String],
        head_words: &'a [String],
    ) -> impl Iterator<Item = (&'a str, BoostTier)> + 'a {
        self.groups
            .iter()
            .filter(move |g| g.matches(query_words) && g.matches(head_words))
            .map(|g| (g.name.as_str(), g.tier))
    }

    /// Boost for one article. `head_words` starts with `title_words`.
    pub fn boost(
        &self,
        query_words: &[String],
        title_words: &[String],
        head_words: &[String],
        weights: &ScoringWeights,
    ) -> f32 {
        self.groups
            .iter()
            .filter(|g| g.matches(query_words))
            .map(|g| {
                let tier = g.tier.weight(weights);
                if g.matches(title_words) {
                    tier
                } else if g.matches(head_words) {
                    weights.head_boost.min(tier)
                } else {
                    0.0
                }
            })
            .sum()
    }
}

impl Default for KeywordGroups {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gundam_query_shares_franchise_group_with_title() {
        let groups = KeywordGroups::builtin();
        let q = words("gundam mecha");
        let head = words("mobile suit gundam");
        let shared: Vec<_> = groups.shared(&q, &head).collect();
        assert_eq!(shared, vec![("gundam", BoostTier::Franchise)]);
        assert_eq!(groups.boost(&q, &head, &head, &ScoringWeights::default()), 60.0);
    }

    #[test]
    fn content_head_mention_earns_the_reduced_boost() {
        let groups = KeywordGroups::builtin();
        let w = ScoringWeights::default();
        let q = words("data privacy");
        let title = words("machine learning");
        let mut head = title.clone();
        head.extend(words("models learn statistical patterns from data"));
        assert_eq!(groups.boost(&q, &title, &head, &w), w.head_boost);

        let title = words("data (star trek)");
        assert_eq!(groups.boost(&q, &title, &title, &w), w.character_boost);
    }

    #[test]
    fn multi_word_keywords_need_the_whole_phrase() {
        let groups = KeywordGroups::builtin();
        let head = words("blade runner 2049");
        assert_eq!(groups.shared(&words("runner"), &head).count(), 0);
        assert_eq!(groups.shared(&words("blade runner replicants"), &head).count(), 1);
    }

    #[test]
    fn custom_groups_replace_the_table() {
        let groups = KeywordGroups::new([KeywordGroup {
            name: "kitchen".into(),
            tier: BoostTier::DomainTerm,
            keywords: vec!["toaster".into()],
        }]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.shared(&words("toaster"), &words("smart toaster")).count(), 1);
    }
}
