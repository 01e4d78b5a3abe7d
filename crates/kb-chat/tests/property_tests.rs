use std::sync::Arc;

use proptest::prelude::*;

use kb_chat::topic::TopicExtractor;
use kb_chat::{Assistant, ChatRequest, ChatSettings, SessionStore};
use kb_core::Article;
use kb_retrieval::RetrievalEngine;

proptest! {
    #[test]
    fn topics_are_trimmed_and_lowercase(msg in "[A-Za-z ?()]{0,40}") {
        let topic = TopicExtractor::new().unwrap().extract(&msg);
        prop_assert_eq!(topic.trim(), topic.as_str());
        prop_assert_eq!(topic.to_lowercase(), topic.clone());
        prop_assert!(!topic.contains('('));
    }

    #[test]
    fn any_non_blank_message_gets_an_answer(msg in "[a-z]{1,10}( [a-z?]{1,10}){0,4}") {
        let engine = RetrievalEngine::from_articles(vec![
            Article::new("Robot", "A robot is a machine."),
            Article::new("Mobile Suit Gundam", ""),
        ]);
        let assistant = Assistant::new(engine, Arc::new(SessionStore::new(4)), ChatSettings::default()).unwrap();
        let resp = assistant.respond(&ChatRequest::new(msg)).unwrap();
        prop_assert!(!resp.response.is_empty());
        prop_assert!(resp.follow_up_suggestions.len() <= 3);
        prop_assert!(resp.related_topics.len() <= 4);
        prop_assert!((0.0..=1.0).contains(&resp.confidence));
    }
}
