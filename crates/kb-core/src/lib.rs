#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod traits;
pub mod types;

pub use corpus::{CorpusSnapshot, CorpusSource, CorpusStats, CorpusStore, ReloadOutcome};
pub use error::{CorpusLoadError, Error, Result};
pub use traits::Retriever;
pub use types::{Article, MatchResult, Strategy};
