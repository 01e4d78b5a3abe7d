//! Intent and complexity classification.
//!
//! Both are ordered pattern tables: the first row with a matching pattern
//! wins, and a message matching nothing falls through to the last variant.

use regex::RegexSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::topic::FOLLOW_UP_PHRASES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Followup,
    Comparative,
    Analytical,
    Synthetic,
    Factual,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Followup => "followup",
            Intent::Comparative => "comparative",
            Intent::Analytical => "analytical",
            Intent::Synthetic => "synthetic",
            Intent::Factual => "factual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    MultiStep,
    Complex,
    Moderate,
    Simple,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::MultiStep => "multi_step",
            Complexity::Complex => "complex",
            Complexity::Moderate => "moderate",
            Complexity::Simple => "simple",
        }
    }
}

// Follow-up rows come from FOLLOW_UP_PHRASES and are checked first, so
// "explain further" is a follow-up rather than an analytical request.
const INTENT_PATTERNS: &[(Intent, &[&str])] = &[
    (Intent::Comparative, &[r"\bvs\b", r"\bversus\b", r"\bcompare", r"\bdifferences?\b", r"\bbetter than\b"]),
    (Intent::Analytical, &[r"\bhow does\b", r"\bwhy\b", r"\banaly[sz]e", r"\bexplain", r"\bmechanism"]),
    (Intent::Synthetic, &[r"\bcreate", r"\bdesign", r"\bbuild", r"\bdevelop", r"\bimplement"]),
];

const COMPLEXITY_PATTERNS: &[(Complexity, &[&str])] = &[
    (Complexity::MultiStep, &[r"\bfirst\b.*\bthen\b", r"\bstep by step\b", r"\bprocess of\b"]),
    (Complexity::Complex, &[r"\brelationship between\b", r"\bimpact of\b", r"\bimplications?\b"]),
    (Complexity::Moderate, &[r"\bhow\b", r"\bwhy\b", r"\bwhat are\b", r"\bexplain"]),
];

/// Classifies a raw user message.
pub struct QueryAnalyzer {
    intents: Vec<(Intent, RegexSet)>,
    complexity: Vec<(Complexity, RegexSet)>,
}

impl QueryAnalyzer {
    pub fn new() -> Result<Self> {
        let followup = RegexSet::new(FOLLOW_UP_PHRASES.iter().map(|p| regex::escape(p)))?;
        let mut intents = vec![(Intent::Followup, followup)];
        for (intent, patterns) in INTENT_PATTERNS {
            intents.push((*intent, RegexSet::new(*patterns)?));
        }
        let complexity = COMPLEXITY_PATTERNS
            .iter()
            .map(|(level, patterns)| Ok((*level, RegexSet::new(*patterns)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { intents, complexity })
    }

    pub fn intent(&self, message: &str) -> Intent {
        let lower = message.to_lowercase();
        self.intents
            .iter()
            .find(|(_, set)| set.is_match(&lower))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::Factual)
    }

    pub fn complexity(&self, message: &str) -> Complexity {
        let lower = message.to_lowercase();
        self.complexity
            .iter()
            .find(|(_, set)| set.is_match(&lower))
            .map(|(level, _)| *level)
            .unwrap_or(Complexity::Simple)
    }
}
