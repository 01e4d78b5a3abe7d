//! Shared setup for the kb binaries: logging, config and corpus loading.

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kb_core::config::{resolve_with_base, Config};
use kb_core::CorpusStore;
use kb_retrieval::{RetrievalEngine, RetrievalSettings};

/// Used when neither a flag nor `data.corpus_path` names a corpus.
pub const DEFAULT_CORPUS: &str = "test_data/corpus";

/// Logs go to stderr so stdout stays clean for answers and JSON.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn load_config() -> anyhow::Result<Config> {
    Config::load().context("loading configuration")
}

/// Flag, then `data.corpus_path`, then [`DEFAULT_CORPUS`]. Config paths are
/// relative to the directory the config was loaded from.
pub fn resolve_corpus(flag: Option<&Path>, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    let configured = config.path("data.corpus_path").context("reading data.corpus_path")?;
    Ok(configured.unwrap_or_else(|| resolve_with_base(config.base_dir(), DEFAULT_CORPUS)))
}

pub fn open_engine(corpus: &Path, config: &Config) -> anyhow::Result<RetrievalEngine> {
    let store = CorpusStore::open(corpus).with_context(|| format!("loading corpus from {}", corpus.display()))?;
    let settings = RetrievalSettings::from_config(config)?;
    let snapshot = store.snapshot();
    tracing::info!(
        source = snapshot.source(),
        articles = snapshot.len(),
        skipped = snapshot.skipped(),
        "corpus loaded"
    );
    Ok(RetrievalEngine::new(Arc::new(store), settings))
}
