//! Topic categories used to pick canned answers and related topics.
//!
//! Detection works on whole words, so "database" never means Data and
//! "said" never means AI. Rows are checked in order; the first hit wins.

use serde::{Deserialize, Serialize};

use kb_retrieval::normalize::{contains_phrase, words};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FunQuestion,
    Comparative,
    SpecificAndroid,
    SpecificRobot,
    FictionalAndroids,
    FictionalRobots,
    Gundam,
    Androids,
    Robotics,
    Ai,
    Generic,
}

/// Category plus, for character categories, the canonical character name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub category: Category,
    pub character: Option<&'static str>,
}

impl Detection {
    fn of(category: Category) -> Self {
        Self { category, character: None }
    }
}

/// Character name and the context clues that identify them.
type CharacterRow = (&'static str, &'static [&'static str]);

const ANDROID_CHARACTERS: &[CharacterRow] = &[
    ("data", &["star trek", "enterprise", "positronic", "soong", "tng"]),
    ("bishop", &["aliens", "weyland", "xenomorph"]),
    ("ash", &["nostromo", "science officer"]),
    ("david", &["prometheus", "covenant"]),
    ("roy batty", &["blade runner", "replicant", "nexus", "tears in rain"]),
    ("rachael", &["replicant", "memories"]),
    ("ava", &["ex machina", "turing test", "nathan"]),
    ("dolores", &["westworld", "maze", "wyatt"]),
    ("connor", &["detroit", "become human", "deviant", "cyberlife"]),
];

const ROBOT_CHARACTERS: &[CharacterRow] = &[
    ("wall-e", &["pixar", "eve"]),
    ("c-3po", &["protocol droid", "golden droid", "tatooine"]),
    ("r2-d2", &["astromech", "beep"]),
    ("terminator", &["skynet", "t-800", "sarah connor", "judgment day"]),
    ("optimus prime", &["transformers", "autobot", "cybertron", "megatron"]),
    ("bender", &["futurama", "planet express"]),
];

const FUN_CUES: &[&str] = &[
    "favorite", "favourite", "like to eat", "dream", "dream about", "scared", "afraid", "hobby", "weekend", "birthday",
    "vacation", "pet", "color", "food", "fruit", "movie", "music", "dance", "joke", "funny", "laugh", "smile", "cry",
    "sleep", "tired", "hungry",
];

const FUN_SUBJECTS: &[&str] = &["robot", "robots", "android", "androids", "ai"];

/// Ordered keyword rows checked after fun, comparative and character rows.
const KEYWORD_ROWS: &[(Category, &[&str])] = &[
    (Category::FictionalAndroids, &["fictional android", "fictional androids"]),
    (Category::FictionalRobots, &["fictional robot", "fictional robots"]),
    (Category::Gundam, &["gundam", "mecha", "mobile suit", "mobile suits"]),
    (Category::Androids, &["android", "androids"]),
    (Category::Robotics, &["robot", "robots", "robotics"]),
    (Category::Ai, &["ai", "artificial intelligence", "machine learning"]),
];

fn mentions(haystack: &[String], cues: &[&str]) -> bool {
    cues.iter().any(|cue| contains_phrase(haystack, &words(cue)))
}

/// A character named in the topic, or hinted at by clues in the context.
/// Android characters are checked before robot characters.
pub fn match_character(topic: &str, context: &str) -> Option<Detection> {
    let topic = words(topic);
    let context = words(context);
    let tables = [(Category::SpecificAndroid, ANDROID_CHARACTERS), (Category::SpecificRobot, ROBOT_CHARACTERS)];
    for (category, table) in tables {
        for (name, clues) in table {
            if contains_phrase(&topic, &words(name)) || mentions(&context, clues) {
                return Some(Detection { category, character: Some(*name) });
            }
        }
    }
    None
}

pub fn detect(topic: &str, context: &str) -> Detection {
    let topic_words = words(topic);

    if mentions(&topic_words, FUN_CUES) && mentions(&topic_words, FUN_SUBJECTS) {
        return Detection::of(Category::FunQuestion);
    }
    if mentions(&topic_words, &["vs", "versus"]) {
        return Detection::of(Category::Comparative);
    }
    if let Some(found) = match_character(topic, context) {
        return found;
    }
    KEYWORD_ROWS
        .iter()
        .find(|(_, cues)| mentions(&topic_words, cues))
        .map(|(category, _)| Detection::of(*category))
        .unwrap_or(Detection::of(Category::Generic))
}

/// At most four topics to explore next.
pub fn related_topics(category: Category) -> &'static [&'static str] {
    match category {
        Category::FunQuestion => &["Robot Jokes", "AI Humor", "Fictional Robot Personalities", "Robot Movies"],
        Category::FictionalRobots | Category::SpecificRobot => {
            &["Gundam Mobile Suits", "Star Wars Droids", "Anime Robots", "Movie Robots"]
        }
        Category::FictionalAndroids | Category::SpecificAndroid => {
            &["Blade Runner Replicants", "Star Trek Androids", "Westworld Hosts", "Robot Ethics"]
        }
        Category::Gundam => &["Mobile Suit Technology", "Mecha Anime", "Real Robots", "Gunpla Models"],
        Category::Androids => &["Humanoid Robots", "Fictional Androids", "Artificial Intelligence", "Uncanny Valley"],
        Category::Robotics => {
            &["Artificial Intelligence", "Industrial Automation", "Humanoid Robots", "Fictional Robots"]
        }
        Category::Ai => &["Machine Learning", "Neural Networks", "Computer Vision", "Robotics"],
        Category::Comparative | Category::Generic => {
            &["Robotics", "Artificial Intelligence", "Fictional Robots", "Technology Innovation"]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fun_needs_a_cue_and_a_subject() {
        assert_eq!(detect("favorite food of a robot", "").category, Category::FunQuestion);
        assert_eq!(detect("favorite food", "").category, Category::Generic);
    }

    #[test]
    fn comparative_before_characters() {
        assert_eq!(detect("data vs bishop", "").category, Category::Comparative);
    }

    #[test]
    fn characters_by_name_or_context_clue() {
        let d = detect("data", "");
        assert_eq!(d, Detection { category: Category::SpecificAndroid, character: Some("data") });

        let d = detect("his brother", "The positronic brain built by Soong");
        assert_eq!(d.character, Some("data"));

        let d = detect("c-3po", "");
        assert_eq!(d.category, Category::SpecificRobot);
        assert_eq!(detect("database design", "").category, Category::Generic);
    }

    #[test]
    fn keyword_rows_in_order() {
        assert_eq!(detect("fictional androids", "").category, Category::FictionalAndroids);
        assert_eq!(detect("fictional robots", "").category, Category::FictionalRobots);
        assert_eq!(detect("gundam mecha", "").category, Category::Gundam);
        assert_eq!(detect("android uprising", "").category, Category::Androids);
        assert_eq!(detect("robotics", "").category, Category::Robotics);
        assert_eq!(detect("what is ai", "").category, Category::Ai);
        assert_eq!(detect("quantum computing", "").category, Category::Generic);
    }

    #[test]
    fn related_topics_are_capped() {
        for c in [Category::FunQuestion, Category::Gundam, Category::Generic, Category::SpecificAndroid] {
            assert!(related_topics(c).len() <= 4);
        }
    }
}
