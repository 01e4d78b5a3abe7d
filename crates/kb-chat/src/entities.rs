use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fixed confidence attached to every pattern-table match.
pub const ENTITY_CONFIDENCE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Robot,
    Ai,
    Character,
    Technology,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
    pub confidence: f32,
}

const PATTERNS: &[(EntityKind, &str)] = &[
    (EntityKind::Robot, r"\b(?:robots?|androids?|cyborgs?|automat(?:on|a|ons))\b"),
    (EntityKind::Ai, r"\b(?:ai|artificial intelligence|machine learning|neural networks?)\b"),
    (EntityKind::Character, r"\b(?:data|c-3po|r2-d2|wall-e|terminator|optimus)\b"),
    (EntityKind::Technology, r"\b(?:sensors?|actuators?|processors?|algorithms?|systems?)\b"),
];

/// Pulls known robots, AI terms, characters and hardware out of a message.
pub struct EntityExtractor {
    patterns: Vec<(EntityKind, Regex)>,
}

impl EntityExtractor {
    pub fn new() -> Result<Self> {
        let patterns = PATTERNS
            .iter()
            .map(|(kind, pattern)| Ok((*kind, Regex::new(pattern)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Matches in table order, then position. Repeats of the same text and
    /// kind are reported once.
    pub fn extract(&self, message: &str) -> Vec<Entity> {
        let lower = message.to_lowercase();
        let mut out: Vec<Entity> = Vec::new();
        for (kind, re) in &self.patterns {
            for m in re.find_iter(&lower) {
                if out.iter().any(|e| e.kind == *kind && e.text == m.as_str()) {
                    continue;
                }
                out.push(Entity { text: m.as_str().to_string(), kind: *kind, confidence: ENTITY_CONFIDENCE });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_each_kind() {
        let x = EntityExtractor::new().unwrap();
        let found = x.extract("Does Data use AI sensors like other androids?");
        let pairs: Vec<(&str, EntityKind)> = found.iter().map(|e| (e.text.as_str(), e.kind)).collect();
        assert_eq!(
            pairs,
            vec![
                ("androids", EntityKind::Robot),
                ("ai", EntityKind::Ai),
                ("data", EntityKind::Character),
                ("sensors", EntityKind::Technology),
            ]
        );
        assert!(found.iter().all(|e| e.confidence == ENTITY_CONFIDENCE));
    }

    #[test]
    fn patterns_are_word_bounded() {
        let x = EntityExtractor::new().unwrap();
        assert!(x.extract("database said").is_empty());
        assert_eq!(x.extract("robot robot").len(), 1);
    }
}
