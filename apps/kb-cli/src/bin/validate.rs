use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use kb_cli::{init_tracing, load_config, resolve_corpus};
use kb_core::corpus::load_path;

#[derive(Parser, Debug)]
#[command(name = "kb-validate", version, about = "Check a corpus against size targets")]
struct Args {
    /// Corpus file or directory
    #[arg(long)]
    corpus: Option<PathBuf>,

    #[arg(long, default_value_t = 900)]
    min_articles: usize,

    #[arg(long, default_value_t = 4_200_000)]
    min_words: usize,

    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let args = Args::parse();
    let config = load_config()?;
    let corpus = resolve_corpus(args.corpus.as_deref(), &config)?;
    let snapshot = load_path(&corpus)?;
    let stats = snapshot.stats();
    let articles_ok = stats.articles >= args.min_articles;
    let words_ok = stats.total_words >= args.min_words;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Corpus: {}", snapshot.source());
        println!("  articles: {}", stats.articles);
        println!("  words:    {}", stats.total_words);
        println!("  skipped:  {}", stats.skipped);
        println!("\nBy domain:");
        for (domain, count) in &stats.by_domain {
            println!("  {:<16} {}", domain, count);
        }
        println!();
        println!("[{}] articles {} / {}", mark(articles_ok), stats.articles, args.min_articles);
        println!("[{}] words    {} / {}", mark(words_ok), stats.total_words, args.min_words);
    }

    Ok(if articles_ok && words_ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn mark(ok: bool) -> &'static str {
    if ok { "OK" } else { "FAIL" }
}
