//! kb-chat
//!
//! Conversation layer over a [`kb_core::Retriever`]: intent and entity
//! analysis, topic extraction, per-session history, and answer formatting.
//! Retrieved articles are rendered in the requested format; when nothing is
//! found a canned answer for the detected category is used instead.

pub mod assistant;
pub mod category;
pub mod entities;
pub mod error;
pub mod intent;
pub mod render;
pub mod session;
pub mod settings;
pub mod templates;
pub mod topic;

pub use assistant::{Assistant, ChatRequest, ChatResponse, SourceCitation};
pub use category::{Category, Detection};
pub use entities::{Entity, EntityKind};
pub use error::{ChatError, Result};
pub use intent::{Complexity, Intent};
pub use session::{Role, SessionStore, Turn};
pub use settings::ChatSettings;
pub use templates::ResponseFormat;
