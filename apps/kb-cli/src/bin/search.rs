use clap::Parser;
use std::path::PathBuf;

use kb_cli::{init_tracing, load_config, open_engine, resolve_corpus};
use kb_core::MatchResult;

#[derive(Parser, Debug)]
#[command(name = "kb-search", version, about = "Find the best article for a query")]
struct Args {
    /// Query words
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Corpus file or directory
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Show the top N exact-phase scores with their signals
    #[arg(long, value_name = "N")]
    explain: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config()?;
    let corpus = resolve_corpus(args.corpus.as_deref(), &config)?;
    let engine = open_engine(&corpus, &config)?;
    let query = args.query.join(" ");

    if let Some(n) = args.explain {
        let rows = engine.explain(&query, n);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }
        for (i, row) in rows.iter().enumerate() {
            let b = &row.breakdown;
            println!("{:>2}. {:>9.2}  {}", i + 1, row.total, row.title);
            println!(
                "      phrase={} exact={} partial={} boost={} fuzzy={:.2} content={} wildcard={}",
                b.exact_phrase,
                b.exact_tokens,
                b.partial_tokens,
                b.domain_boost,
                b.fuzzy_title,
                b.content_overlap,
                b.wildcard
            );
        }
        return Ok(());
    }

    let result = engine.search(&query);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    match result {
        MatchResult::Found { article, score, strategy } => {
            println!("{}  [{} match, score {:.2}]", article.title, strategy, score);
            if !article.url.is_empty() {
                println!("{}", article.url);
            }
            println!("\n{}", article.summary);
        }
        MatchResult::NotFound => println!("No matching article for {:?}", query),
    }
    Ok(())
}
