//! One chat exchange: classify the message, retrieve, answer, remember.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use kb_core::types::excerpt;
use kb_core::{Article, MatchResult, Retriever, Strategy};
use kb_retrieval::normalize::Query;

use crate::category::{self, Category, Detection};
use crate::entities::{Entity, EntityExtractor};
use crate::error::{ChatError, Result};
use crate::intent::{Complexity, Intent, QueryAnalyzer};
use crate::render::render_article;
use crate::session::{Role, SessionStore};
use crate::settings::ChatSettings;
use crate::templates::{self, title_case, ResponseFormat};
use crate::topic::{is_followup, TopicExtractor};

/// Chars of the article summary quoted in a source citation.
pub const CITATION_EXCERPT_CHARS: usize = 200;
pub const MAX_FOLLOW_UPS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub format: Option<ResponseFormat>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), format: None, session_id: None }
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// The article an answer was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    pub url: String,
    pub domain: String,
    pub word_count: usize,
    pub quality_score: f32,
    pub excerpt: String,
}

impl From<&Article> for SourceCitation {
    fn from(a: &Article) -> Self {
        Self {
            title: a.title.clone(),
            url: a.url.clone(),
            domain: a.domain.clone(),
            word_count: a.word_count,
            quality_score: a.quality_score,
            excerpt: excerpt(&a.summary, CITATION_EXCERPT_CHARS),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub id: Uuid,
    pub response: String,
    pub timestamp: DateTime<Utc>,
    pub confidence: f32,
    pub intent: Intent,
    pub complexity: Complexity,
    pub entities: Vec<Entity>,
    pub category: Category,
    pub format: ResponseFormat,
    pub strategy: Option<Strategy>,
    pub source: Option<SourceCitation>,
    pub related_topics: Vec<String>,
    pub follow_up_suggestions: Vec<String>,
    pub session_turns: usize,
}

/// Confidence reported for a retrieval outcome. A verbatim phrase hit in the
/// title is the strongest evidence there is.
pub fn confidence(result: &MatchResult, query: &str) -> f32 {
    match result {
        MatchResult::Found { article, strategy: Strategy::Exact, .. } => {
            let phrase = Query::parse(query).phrase;
            if !phrase.is_empty() && article.title.to_lowercase().contains(&phrase) {
                0.95
            } else {
                0.9
            }
        }
        MatchResult::Found { strategy: Strategy::Relaxed, .. } => 0.7,
        MatchResult::Found { strategy: Strategy::Fuzzy, .. } => 0.5,
        MatchResult::NotFound => 0.25,
    }
}

/// At most three next questions about `subject`, shaped by the intent.
pub fn follow_up_suggestions(subject: &str, intent: Intent) -> Vec<String> {
    let mut out = match intent {
        Intent::Comparative => vec![
            format!("Tell me more about {subject}"),
            format!("What are the key differences in {subject}?"),
            format!("What are examples of {subject}?"),
        ],
        Intent::Followup => vec![
            format!("What are examples of {subject}?"),
            format!("How does {subject} work?"),
            format!("What are the applications of {subject}?"),
        ],
        _ => vec![
            format!("Tell me more about {subject}"),
            format!("What are examples of {subject}?"),
            format!("How does {subject} work?"),
        ],
    };
    out.truncate(MAX_FOLLOW_UPS);
    out
}

/// Answers chat messages from a [`Retriever`], keeping per-session history
/// in an injected [`SessionStore`].
pub struct Assistant<R: Retriever> {
    retriever: R,
    sessions: Arc<SessionStore>,
    settings: ChatSettings,
    analyzer: QueryAnalyzer,
    entities: EntityExtractor,
    topics: TopicExtractor,
}

impl<R: Retriever> Assistant<R> {
    pub fn new(retriever: R, sessions: Arc<SessionStore>, settings: ChatSettings) -> Result<Self> {
        Ok(Self {
            retriever,
            sessions,
            settings,
            analyzer: QueryAnalyzer::new()?,
            entities: EntityExtractor::new()?,
            topics: TopicExtractor::new()?,
        })
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn retriever(&self) -> &R {
        &self.retriever
    }

    pub fn respond(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let session = request.session_id.as_deref().unwrap_or(&self.settings.default_session);
        let format = request.format.unwrap_or(self.settings.default_format);

        let followup = is_followup(message);
        let context = if followup {
            self.sessions
                .last_assistant_turn(session)?
                .map(|t| excerpt(&t, self.settings.context_chars))
                .unwrap_or_default()
        } else {
            String::new()
        };
        self.sessions.append(session, Role::User, message)?;

        let topic = self.topics.extract(message);
        let intent = self.analyzer.intent(message);
        let complexity = self.analyzer.complexity(message);
        let entities = self.entities.extract(message);

        let query = if topic.is_empty() { context.as_str() } else { topic.as_str() };
        let result = self.retriever.search(query);

        let mut detection = category::detect(&topic, &context);
        if followup && !context.is_empty() {
            let from_context = category::detect(&context, "");
            if from_context.category != Category::Generic {
                detection = from_context;
            }
        }

        let (response, subject, source) = match &result {
            MatchResult::Found { article, .. } => {
                (render_article(article, format), article.title.clone(), Some(SourceCitation::from(article)))
            }
            MatchResult::NotFound => {
                let subject = subject_of(&detection, &topic, message);
                (templates::respond(detection.category, format, &subject), title_case(&subject), None)
            }
        };

        let session_turns = self.sessions.append(session, Role::Assistant, response.clone())?;
        let confidence = confidence(&result, query);
        tracing::info!(
            session,
            intent = intent.as_str(),
            category = ?detection.category,
            strategy = result.strategy().map(|s| s.as_str()),
            confidence,
            "answered chat message"
        );

        Ok(ChatResponse {
            id: Uuid::new_v4(),
            response,
            timestamp: Utc::now(),
            confidence,
            intent,
            complexity,
            entities,
            category: detection.category,
            format,
            strategy: result.strategy(),
            source,
            related_topics: category::related_topics(detection.category).iter().map(|t| t.to_string()).collect(),
            follow_up_suggestions: follow_up_suggestions(&subject, intent),
            session_turns,
        })
    }
}

/// What a canned answer is about: the character, else the topic, else the
/// raw message.
fn subject_of(detection: &Detection, topic: &str, message: &str) -> String {
    match detection.character {
        Some(name) => name.to_string(),
        None if !topic.is_empty() => topic.to_string(),
        None => message.to_lowercase(),
    }
}
