use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use kb_chat::{Assistant, ChatRequest, ChatSettings, ResponseFormat, SessionStore};
use kb_cli::{init_tracing, load_config, open_engine, resolve_corpus};
use kb_core::ReloadOutcome;

#[derive(Parser, Debug)]
#[command(name = "kb-chat", version, about = "Chat with the knowledge base")]
struct Args {
    /// Corpus file or directory
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Session id; history and follow-ups are tracked per session
    #[arg(long)]
    session: Option<String>,

    /// Answer format: summary, detailed, list or essay
    #[arg(long)]
    format: Option<String>,

    /// Print each response as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config()?;
    let corpus = resolve_corpus(args.corpus.as_deref(), &config)?;
    let engine = Arc::new(open_engine(&corpus, &config)?);
    let settings = ChatSettings::from_config(&config)?;
    let sessions = Arc::new(SessionStore::new(settings.history_turns).with_max_sessions(settings.max_sessions));
    let assistant = Assistant::new(Arc::clone(&engine), sessions, settings)?;
    let format = args.format.as_deref().map(ResponseFormat::parse);

    println!(
        "kb-chat: {} articles from {}. Commands: :reload, :quit",
        engine.store().snapshot().len(),
        corpus.display()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":reload" => match engine.store().reload() {
                Ok(ReloadOutcome::Replaced { articles }) => println!("reloaded: {} articles", articles),
                Ok(ReloadOutcome::Unchanged { articles }) => println!("unchanged: {} articles", articles),
                Err(e) => eprintln!("reload failed, keeping current corpus: {}", e),
            },
            message => {
                let mut request = ChatRequest::new(message);
                request.format = format;
                request.session_id = args.session.clone();
                match assistant.respond(&request) {
                    Ok(resp) if args.json => println!("{}", serde_json::to_string_pretty(&resp)?),
                    Ok(resp) => {
                        println!("\n{}\n", resp.response);
                        if let Some(source) = &resp.source {
                            println!("Source: {} ({})", source.title, source.domain);
                        }
                        println!("Related: {}", resp.related_topics.join(" · "));
                        for s in &resp.follow_up_suggestions {
                            println!("  → {}", s);
                        }
                        println!();
                    }
                    Err(e) => eprintln!("error: {}", e),
                }
            }
        }
    }
    Ok(())
}
