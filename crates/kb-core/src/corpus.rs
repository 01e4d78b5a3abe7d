//! Corpus store: loads crawled articles into an immutable snapshot.
//!
//! Sources may be a single JSON file, a directory of JSON files, or an
//! in-memory buffer. Two shapes are accepted, a top-level array of records or
//! an object wrapping them as `{"articles": [...]}`; both are normalized to a
//! flat list in [`normalize_records`] and nowhere else.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::hash::Hasher;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::CorpusLoadError;
use crate::types::{clamp_quality, excerpt, Article, SUMMARY_CHARS};

type LoadResult<T> = std::result::Result<T, CorpusLoadError>;

/// A record as it appears on disk. Everything is optional so that one odd
/// field does not sink the whole record; numeric fields accept floats.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    title: Option<String>,
    content: Option<String>,
    summary: Option<String>,
    domain: Option<String>,
    word_count: Option<f64>,
    quality_score: Option<f64>,
    url: Option<String>,
}

impl RawRecord {
    fn into_article(self) -> Option<Article> {
        let title = self.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;
        let content = self.content.unwrap_or_default();
        let summary = match self.summary {
            Some(s) if !s.trim().is_empty() => s,
            _ => excerpt(&content, SUMMARY_CHARS),
        };
        let word_count = match self.word_count {
            Some(n) if n.is_finite() && n >= 0.0 => n as usize,
            _ => content.split_whitespace().count(),
        };
        Some(Article {
            title,
            summary,
            domain: self.domain.filter(|d| !d.trim().is_empty()).unwrap_or_else(|| "general".to_string()),
            word_count,
            quality_score: clamp_quality(self.quality_score.unwrap_or(1.0) as f32),
            url: self.url.unwrap_or_default(),
            content,
        })
    }
}

/// Aggregate numbers about a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusStats {
    pub articles: usize,
    pub total_words: usize,
    pub skipped: usize,
    pub by_domain: BTreeMap<String, usize>,
}

/// Immutable, fully loaded collection of articles.
#[derive(Debug, Clone, Default)]
pub struct CorpusSnapshot {
    articles: Vec<Article>,
    skipped: usize,
    fingerprint: u64,
    source: String,
}

impl CorpusSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap already-built articles. Entries without a usable title are dropped
    /// and counted as skipped.
    pub fn from_articles(articles: Vec<Article>) -> Self {
        let total = articles.len();
        let articles: Vec<Article> = articles.into_iter().filter(Article::is_indexable).collect();
        let mut hasher = twox_hash::XxHash64::with_seed(0);
        for a in &articles {
            hasher.write(a.title.as_bytes());
            hasher.write(&[0]);
            hasher.write(a.content.as_bytes());
            hasher.write(&[0]);
        }
        Self { skipped: total - articles.len(), fingerprint: hasher.finish(), source: "memory".to_string(), articles }
    }

    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Records dropped during load.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// XxHash64 of the source bytes; equal sources give equal fingerprints.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn stats(&self) -> CorpusStats {
        let mut by_domain = BTreeMap::new();
        for a in &self.articles {
            *by_domain.entry(a.domain.clone()).or_insert(0) += 1;
        }
        CorpusStats {
            articles: self.articles.len(),
            total_words: self.articles.iter().map(|a| a.word_count).sum(),
            skipped: self.skipped,
            by_domain,
        }
    }
}

/// Where a corpus comes from.
#[derive(Debug, Clone, Copy)]
pub enum CorpusSource<'a> {
    /// A JSON file, or a directory walked recursively for `*.json` files.
    Path(&'a Path),
    Str(&'a str),
    Bytes(&'a [u8]),
}

pub fn load(source: CorpusSource<'_>) -> LoadResult<CorpusSnapshot> {
    match source {
        CorpusSource::Path(p) => load_path(p),
        CorpusSource::Str(s) => load_slice(s.as_bytes(), "memory"),
        CorpusSource::Bytes(b) => load_slice(b, "memory"),
    }
}

pub fn load_str(json: &str) -> LoadResult<CorpusSnapshot> {
    load(CorpusSource::Str(json))
}

pub fn load_path(path: &Path) -> LoadResult<CorpusSnapshot> {
    if path.is_dir() {
        return load_directory(path);
    }
    let bytes = fs::read(path).map_err(|source| CorpusLoadError::Io { path: path.to_path_buf(), source })?;
    load_slice(&bytes, &path.display().to_string())
}

/// Parse one serialized collection. `label` only feeds logs and `source()`.
pub fn load_slice(bytes: &[u8], label: &str) -> LoadResult<CorpusSnapshot> {
    let records = parse_records(bytes)?;
    let total = records.len();
    let (articles, skipped) = build_articles(records, label);
    if total > 0 && articles.is_empty() {
        return Err(CorpusLoadError::NoValidRecords { total });
    }
    let mut hasher = twox_hash::XxHash64::with_seed(0);
    hasher.write(bytes);
    tracing::info!(source = label, articles = articles.len(), skipped, "corpus loaded");
    Ok(CorpusSnapshot { articles, skipped, fingerprint: hasher.finish(), source: label.to_string() })
}

fn load_directory(dir: &Path) -> LoadResult<CorpusSnapshot> {
    let files = list_json_files(dir);
    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "no .json files found; corpus is empty");
        return Ok(CorpusSnapshot { source: dir.display().to_string(), ..CorpusSnapshot::default() });
    }

    let mut hasher = twox_hash::XxHash64::with_seed(0);
    let mut articles = Vec::new();
    let mut skipped = 0;
    let mut total = 0;
    let mut first_error = None;
    let mut loaded_files = 0;

    for file in &files {
        let label = file.display().to_string();
        let records = fs::read(file)
            .map_err(|source| CorpusLoadError::Io { path: file.clone(), source })
            .and_then(|bytes| {
                hasher.write(&bytes);
                parse_records(&bytes)
            });
        match records {
            Ok(records) => {
                total += records.len();
                let (mut built, dropped) = build_articles(records, &label);
                skipped += dropped;
                articles.append(&mut built);
                loaded_files += 1;
            }
            Err(e) => {
                tracing::warn!(file = %label, error = %e, "skipping unreadable corpus file");
                first_error.get_or_insert(e);
            }
        }
    }

    if loaded_files == 0 {
        if let Some(e) = first_error {
            return Err(e);
        }
    }
    if total > 0 && articles.is_empty() {
        return Err(CorpusLoadError::NoValidRecords { total });
    }
    tracing::info!(dir = %dir.display(), files = loaded_files, articles = articles.len(), skipped, "corpus loaded");
    Ok(CorpusSnapshot { articles, skipped, fingerprint: hasher.finish(), source: dir.display().to_string() })
}

fn parse_records(bytes: &[u8]) -> LoadResult<Vec<Value>> {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(v) => v,
        // Crawled text occasionally carries invalid UTF-8; retry lossily.
        Err(e) if std::str::from_utf8(bytes).is_err() => {
            tracing::debug!(error = %e, "corpus is not valid UTF-8, retrying lossily");
            serde_json::from_str(&String::from_utf8_lossy(bytes))?
        }
        Err(e) => return Err(e.into()),
    };
    normalize_records(value)
}

/// The single place where the two accepted shapes are told apart.
pub fn normalize_records(value: Value) -> LoadResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("articles") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(CorpusLoadError::Shape(format!(
                "\"articles\" must be an array, found {}",
                kind_of(&other)
            ))),
            None => Err(CorpusLoadError::Shape("object without an \"articles\" array".to_string())),
        },
        other => Err(CorpusLoadError::Shape(format!("expected an array or object, found {}", kind_of(&other)))),
    }
}

fn build_articles(records: Vec<Value>, label: &str) -> (Vec<Article>, usize) {
    let mut articles = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for (i, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            tracing::warn!(source = label, index = i, "skipping non-object corpus record");
            skipped += 1;
            continue;
        }
        match serde_json::from_value::<RawRecord>(record) {
            Ok(raw) => match raw.into_article() {
                Some(article) => articles.push(article),
                None => {
                    tracing::warn!(source = label, index = i, "skipping corpus record without a title");
                    skipped += 1;
                }
            },
            Err(e) => {
                tracing::warn!(source = label, index = i, error = %e, "skipping malformed corpus record");
                skipped += 1;
            }
        }
    }
    (articles, skipped)
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

/// What a reload did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Replaced { articles: usize },
    /// Same fingerprint as before; the snapshot was still swapped.
    Unchanged { articles: usize },
}

/// Shared handle to the current snapshot.
///
/// Readers clone the inner `Arc` and keep using it for the whole query, so a
/// concurrent reload is observed either completely or not at all.
#[derive(Debug, Default)]
pub struct CorpusStore {
    current: RwLock<Arc<CorpusSnapshot>>,
    origin: Option<PathBuf>,
}

impl CorpusStore {
    pub fn new(snapshot: CorpusSnapshot) -> Self {
        Self { current: RwLock::new(Arc::new(snapshot)), origin: None }
    }

    /// Load from `path` and remember it for later reloads.
    pub fn open(path: &Path) -> LoadResult<Self> {
        let snapshot = load_path(path)?;
        Ok(Self { current: RwLock::new(Arc::new(snapshot)), origin: Some(path.to_path_buf()) })
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn snapshot(&self) -> Arc<CorpusSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swap in a new snapshot, returning the previous one.
    pub fn replace(&self, snapshot: CorpusSnapshot) -> Arc<CorpusSnapshot> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(snapshot))
    }

    /// Reload from the path given to [`CorpusStore::open`].
    pub fn reload(&self) -> LoadResult<ReloadOutcome> {
        let path = self.origin.clone().ok_or_else(|| {
            CorpusLoadError::Shape("store was built in memory and has no source path".into())
        })?;
        self.reload_from(&path)
    }

    /// Load `path` outside the lock, then swap. On error the current snapshot
    /// stays in place.
    pub fn reload_from(&self, path: &Path) -> LoadResult<ReloadOutcome> {
        let fresh = load_path(path)?;
        let articles = fresh.len();
        let fingerprint = fresh.fingerprint();
        let previous = self.replace(fresh);
        let outcome = if previous.fingerprint() == fingerprint {
            ReloadOutcome::Unchanged { articles }
        } else {
            ReloadOutcome::Replaced { articles }
        };
        tracing::info!(path = %path.display(), ?outcome, "corpus reloaded");
        Ok(outcome)
    }
}
