use crate::types::MatchResult;

/// Maps a free-text query to the single best article.
///
/// Implementations never fail on "no good answer"; they return
/// `MatchResult::NotFound` instead.
pub trait Retriever: Send + Sync {
    fn search(&self, query: &str) -> MatchResult;
}

impl<R: Retriever + ?Sized> Retriever for std::sync::Arc<R> {
    fn search(&self, query: &str) -> MatchResult {
        (**self).search(query)
    }
}
