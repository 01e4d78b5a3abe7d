use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Invalid pattern table: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Core(#[from] kb_core::Error),
}

pub type Result<T> = std::result::Result<T, ChatError>;
