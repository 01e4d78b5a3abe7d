//! Follow-up detection and topic extraction from a user message.

use regex::Regex;

use crate::error::Result;

/// A message containing any of these continues the previous answer.
pub const FOLLOW_UP_PHRASES: &[&str] =
    &["tell me more", "elaborate", "explain further", "more details", "can you expand"];

pub fn is_followup(message: &str) -> bool {
    let lower = message.to_lowercase();
    FOLLOW_UP_PHRASES.iter().any(|p| lower.contains(p))
}

/// Rewrite rules applied in order to the lowercased message.
const RULES: &[(&str, &str)] = &[
    (r"tell me more about\s*", ""),
    (r"elaborate on\s*", ""),
    (r"explain further about\s*", ""),
    (r"more details about\s*", ""),
    (r"can you expand on\s*", ""),
    (r"what are the applications of\s*", ""),
    (r"how does\s*(.+?)\s*compare to similar technologies\??", "$1"),
    (r"^list\b\s*", ""),
    (r"what are examples of\s*", ""),
    (r"how does\s*(.+?)\s*work\??", "$1"),
    (r"^of\s+", ""),
    (r"\?+$", ""),
];

/// Strips conversational phrasing so only the subject of a message remains.
pub struct TopicExtractor {
    rules: Vec<(Regex, &'static str)>,
}

impl TopicExtractor {
    pub fn new() -> Result<Self> {
        let rules = RULES
            .iter()
            .map(|(pattern, replacement)| Ok((Regex::new(pattern)?, *replacement)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// `"Tell me more about Data (Star Trek)?"` gives `"data"`.
    pub fn extract(&self, message: &str) -> String {
        let mut text = message.trim().to_lowercase();
        for (re, replacement) in &self.rules {
            text = re.replace_all(&text, *replacement).trim().to_string();
        }
        // A parenthesized qualifier names the franchise, not the subject.
        if let Some(idx) = text.find('(') {
            text.truncate(idx);
        }
        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_up_phrases_are_detected_case_insensitively() {
        assert!(is_followup("Tell me MORE about robots"));
        assert!(is_followup("could you elaborate?"));
        assert!(!is_followup("what is a robot"));
    }

    #[test]
    fn topic_strips_follow_up_wrappers() {
        let t = TopicExtractor::new().unwrap();
        assert_eq!(t.extract("Tell me more about industrial robots"), "industrial robots");
        assert_eq!(t.extract("elaborate on of gundam"), "gundam");
        assert_eq!(t.extract("What are examples of androids?"), "androids");
        assert_eq!(t.extract("Data (Star Trek)"), "data");
    }

    #[test]
    fn how_does_questions_keep_their_subject() {
        let t = TopicExtractor::new().unwrap();
        assert_eq!(t.extract("How does an actuator work?"), "an actuator");
        assert_eq!(t.extract("how does lidar compare to similar technologies?"), "lidar");
    }

    #[test]
    fn list_is_only_stripped_as_a_leading_word() {
        let t = TopicExtractor::new().unwrap();
        assert_eq!(t.extract("list fictional robots"), "fictional robots");
        assert_eq!(t.extract("specialist robots"), "specialist robots");
    }
}
