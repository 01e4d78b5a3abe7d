use serde::{Deserialize, Serialize};

use kb_core::config::Config;
use kb_core::{Error, Result};

use crate::session::DEFAULT_MAX_SESSIONS;
use crate::templates::ResponseFormat;

/// The `chat` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Turns kept per session, user and assistant turns counted separately.
    pub history_turns: usize,
    pub default_format: ResponseFormat,
    /// How much of the previous answer a follow-up sees.
    pub context_chars: usize,
    pub default_session: String,
    /// Sessions remembered at once; the least recently active is dropped.
    pub max_sessions: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            history_turns: 10,
            default_format: ResponseFormat::Detailed,
            context_chars: 200,
            default_session: "web-session".to_string(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ChatSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings: Self = config.get_or_default("chat")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_turns < 2 {
            return Err(Error::InvalidConfig(format!(
                "chat.history_turns must hold at least one exchange (2 turns), got {}",
                self.history_turns
            )));
        }
        if self.max_sessions == 0 {
            return Err(Error::InvalidConfig("chat.max_sessions must be at least 1".into()));
        }
        if self.default_session.trim().is_empty() {
            return Err(Error::InvalidConfig("chat.default_session must not be blank".into()));
        }
        Ok(())
    }
}
