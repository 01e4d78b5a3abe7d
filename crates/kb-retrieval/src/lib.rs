//! kb-retrieval
//!
//! Maps a free-text query to the best article of a corpus snapshot. Scoring
//! layers exact and partial title matches, keyword-group boosts, fuzzy
//! similarity and wildcard matching; when the best score is weak the engine
//! retries with looser strategies before reporting that nothing matched.
//! See `engine` for the cascade and `scoring` for the signals.

pub mod boosts;
pub mod engine;
pub mod fuzzy;
pub mod normalize;
pub mod scoring;
pub mod settings;
pub mod wildcard;

pub use boosts::{BoostTier, KeywordGroup, KeywordGroups};
pub use engine::{ExplainedMatch, RetrievalEngine};
pub use scoring::ScoreBreakdown;
pub use settings::{RetrievalSettings, ScoringWeights, TieBreak};
