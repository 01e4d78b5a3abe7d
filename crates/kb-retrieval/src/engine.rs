use rayon::prelude::*;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

use kb_core::{Article, CorpusSnapshot, CorpusStore, MatchResult, Retriever, Strategy};

use crate::boosts::KeywordGroups;
use crate::normalize::{ArticleView, Query};
use crate::scoring::{ScoreBreakdown, Scorer};
use crate::settings::{RetrievalSettings, TieBreak};

/// Normalized views of one snapshot, rebuilt whenever the store swaps.
#[derive(Debug)]
struct PreparedCorpus {
    snapshot: Arc<CorpusSnapshot>,
    views: Vec<ArticleView>,
}

impl PreparedCorpus {
    fn build(snapshot: Arc<CorpusSnapshot>, head_chars: usize) -> Self {
        let views = snapshot.iter().map(|a| ArticleView::new(a, head_chars)).collect();
        Self { snapshot, views }
    }
}

/// One row of [`RetrievalEngine::explain`].
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedMatch {
    pub title: String,
    pub total: f32,
    pub breakdown: ScoreBreakdown,
}

/// Cascading article retriever over a [`CorpusStore`].
#[derive(Debug)]
pub struct RetrievalEngine {
    store: Arc<CorpusStore>,
    settings: RetrievalSettings,
    groups: KeywordGroups,
    prepared: RwLock<Option<Arc<PreparedCorpus>>>,
}

impl RetrievalEngine {
    pub fn new(store: Arc<CorpusStore>, settings: RetrievalSettings) -> Self {
        let groups = if settings.keyword_groups.is_empty() {
            KeywordGroups::builtin()
        } else {
            KeywordGroups::new(settings.keyword_groups.clone())
        };
        Self { store, settings, groups, prepared: RwLock::new(None) }
    }

    /// Engine over a fixed snapshot with default settings.
    pub fn from_snapshot(snapshot: CorpusSnapshot) -> Self {
        Self::new(Arc::new(CorpusStore::new(snapshot)), RetrievalSettings::default())
    }

    pub fn from_articles(articles: Vec<Article>) -> Self {
        Self::from_snapshot(CorpusSnapshot::from_articles(articles))
    }

    pub fn settings(&self) -> &RetrievalSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<CorpusStore> {
        &self.store
    }

    /// Run the cascade: exact, relaxed, fuzzy, then give up.
    pub fn search(&self, query: &str) -> MatchResult {
        let corpus = self.prepared();
        let q = Query::parse(query);
        if corpus.views.is_empty() || q.is_empty() {
            tracing::debug!(query, "empty corpus or query");
            return MatchResult::NotFound;
        }
        let scorer = Scorer::new(&self.settings, &self.groups);

        let exact = self.best_by(&corpus, |v| scorer.score(&q, v).total());
        if let Some((idx, score)) = exact {
            if score >= self.settings.confident_threshold {
                tracing::debug!(query, score, title = %corpus.snapshot.all()[idx].title, "exact match");
                return found(&corpus, idx, score, Strategy::Exact);
            }
        }
        tracing::debug!(query, best = exact.map(|(_, s)| s), "exact phase below threshold, relaxing");

        if let Some((idx, score)) = self.best_by(&corpus, |v| scorer.relaxed(&q, v)) {
            if score >= self.settings.relaxed_min_score {
                tracing::debug!(query, score, "relaxed match");
                return found(&corpus, idx, score, Strategy::Relaxed);
            }
        }
        tracing::debug!(query, "relaxed phase found nothing, trying fuzzy");

        if let Some((idx, score)) = self.best_by(&corpus, |v| scorer.fuzzy(&q, v)) {
            if score >= self.settings.fuzzy_min_score {
                tracing::debug!(query, score, "fuzzy match");
                return found(&corpus, idx, score, Strategy::Fuzzy);
            }
        }
        tracing::debug!(query, "no strategy produced a match");
        MatchResult::NotFound
    }

    /// Top `limit` exact-phase scores with their per-signal breakdown,
    /// ordered the same way `search` ranks them.
    pub fn explain(&self, query: &str, limit: usize) -> Vec<ExplainedMatch> {
        let corpus = self.prepared();
        let q = Query::parse(query);
        let scorer = Scorer::new(&self.settings, &self.groups);
        let mut rows: Vec<(usize, ScoreBreakdown)> =
            corpus.views.iter().enumerate().map(|(i, v)| (i, scorer.score(&q, v))).collect();
        rows.sort_by(|(ia, a), (ib, b)| {
            b.total()
                .partial_cmp(&a.total())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| match self.settings.tie_break {
                    TieBreak::Quality => corpus.views[*ib]
                        .quality
                        .partial_cmp(&corpus.views[*ia].quality)
                        .unwrap_or(std::cmp::Ordering::Equal),
                    TieBreak::FirstSeen => std::cmp::Ordering::Equal,
                })
                .then(ia.cmp(ib))
        });
        rows.into_iter()
            .take(limit)
            .map(|(i, breakdown)| ExplainedMatch {
                title: corpus.snapshot.all()[i].title.clone(),
                total: breakdown.total(),
                breakdown,
            })
            .collect()
    }

    fn prepared(&self) -> Arc<PreparedCorpus> {
        let snapshot = self.store.snapshot();
        if let Some(p) = self.prepared.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            if Arc::ptr_eq(&p.snapshot, &snapshot) {
                return Arc::clone(p);
            }
        }
        let fresh = Arc::new(PreparedCorpus::build(snapshot, self.settings.content_head_chars));
        tracing::debug!(articles = fresh.views.len(), "prepared corpus views");
        *self.prepared.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&fresh));
        fresh
    }

    /// Arg-max of `score` over positive scores, ties resolved by `tie_break`.
    /// Parallel scoring feeds the same sequential reduction, so the choice
    /// never depends on thread timing.
    fn best_by<F>(&self, corpus: &PreparedCorpus, score: F) -> Option<(usize, f32)>
    where
        F: Fn(&ArticleView) -> f32 + Sync,
    {
        let scores: Vec<f32> = if corpus.views.len() >= self.settings.parallel_threshold {
            corpus.views.par_iter().map(&score).collect()
        } else {
            corpus.views.iter().map(&score).collect()
        };

        let mut best: Option<(usize, f32)> = None;
        for (i, s) in scores.into_iter().enumerate() {
            if s <= 0.0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((bi, bs)) => {
                    s > bs
                        || (s == bs
                            && self.settings.tie_break == TieBreak::Quality
                            && corpus.views[i].quality > corpus.views[bi].quality)
                }
            };
            if better {
                best = Some((i, s));
            }
        }
        best
    }
}

fn found(corpus: &PreparedCorpus, idx: usize, score: f32, strategy: Strategy) -> MatchResult {
    MatchResult::Found { article: corpus.snapshot.all()[idx].clone(), score, strategy }
}

impl Retriever for RetrievalEngine {
    fn search(&self, query: &str) -> MatchResult {
        RetrievalEngine::search(self, query)
    }
}
