use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kb_core::{CorpusStore, MatchResult};
use kb_retrieval::{RetrievalEngine, RetrievalSettings};

// Query a corpus and print the cascade result, optionally with per-signal scores.
// Usage:
//   cargo run -p kb-retrieval --example search -- "your query" \
//     [--corpus ../test_data/corpus] [--explain 5]

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: cargo run -p kb-retrieval --example search -- <query> [--corpus PATH] [--explain N]");
        std::process::exit(1);
    }
    let mut query = String::new();
    let mut corpus: Option<PathBuf> = None;
    let mut explain: usize = 0;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--corpus" => {
                if i + 1 >= args.len() { eprintln!("--corpus requires a path"); std::process::exit(2); }
                corpus = Some(PathBuf::from(&args[i + 1]));
                i += 2; continue;
            }
            "--explain" => {
                if i + 1 >= args.len() { eprintln!("--explain requires a number"); std::process::exit(2); }
                explain = args[i + 1].parse().unwrap_or(5);
                i += 2; continue;
            }
            s if s.starts_with("--") => {
                eprintln!("Unknown flag: {}", s); std::process::exit(2);
            }
            s => {
                if !query.is_empty() { query.push(' '); }
                query.push_str(s);
                i += 1; continue;
            }
        }
    }

    // Resolve corpus path precedence: flag > KB_CORPUS > workspace fixtures
    let corpus = corpus
        .or_else(|| env::var("KB_CORPUS").ok().map(PathBuf::from))
        .unwrap_or_else(|| {
            let base = Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap_or(Path::new("."));
            base.join("test_data/corpus")
        });

    println!("Knowledge search\n================");
    println!("Corpus: {}", corpus.display());
    println!("Query : {}\n", query);

    let store = Arc::new(CorpusStore::open(&corpus)?);
    let engine = RetrievalEngine::new(store, RetrievalSettings::default());

    match engine.search(&query) {
        MatchResult::Found { article, score, strategy } => {
            println!("found  strategy={} score={:.2}\n  title : {}\n  domain: {}\n  url   : {}",
                strategy, score, article.title, article.domain, article.url);
        }
        MatchResult::NotFound => println!("no match"),
    }

    if explain > 0 {
        println!("\nTop {} exact-phase scores:", explain);
        for (i, row) in engine.explain(&query, explain).iter().enumerate() {
            let b = &row.breakdown;
            println!(
                "{:>2}. {:>8.2}  {}\n    phrase={} exact={} partial={} boost={} fuzzy={:.2} content={} wildcard={}",
                i + 1,
                row.total,
                row.title,
                b.exact_phrase,
                b.exact_tokens,
                b.partial_tokens,
                b.domain_boost,
                b.fuzzy_title,
                b.content_overlap,
                b.wildcard
            );
        }
    }
    Ok(())
}
