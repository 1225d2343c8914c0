use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mitra_core::{ui_strings, KeywordRules, Language, MessageOrigin, TriageEngine};
use mitra_observability::{init_tracing, AppMetrics};
use mitra_session::ChatSession;
use serde_json::json;

#[derive(Debug, Parser)]
#[command(name = "mitra")]
#[command(about = "Swasthya Mitra triage CLI")]
struct Cli {
    /// Optional keyword rules JSON overriding the built-in sets.
    #[arg(long)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat session against the triage engine.
    Chat {
        #[arg(long, default_value = "en")]
        language: String,
    },
    /// Classify one message and print the structured response.
    Triage { text: String },
    /// List the supported languages.
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("mitra_cli");
    let cli = Cli::parse();

    let rules = load_rules(cli.rules.as_ref())?;
    let engine = Arc::new(TriageEngine::new(rules));

    match cli.command {
        Command::Chat { language } => run_chat(engine, &language).await?,
        Command::Triage { text } => {
            let response = engine.triage(&text);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Languages => {
            let entries = Language::ALL
                .iter()
                .map(|language| {
                    json!({
                        "code": language.as_code(),
                        "name": language.display_name(),
                        "native_name": language.native_name(),
                    })
                })
                .collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

async fn run_chat(engine: Arc<TriageEngine>, language: &str) -> Result<()> {
    let session = ChatSession::start(language, engine, AppMetrics::shared());
    let strings = ui_strings(session.language());

    println!("{} (type 'exit' to quit)", strings.title);
    print_latest(&session);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }
        if message.is_empty() {
            continue;
        }

        session.send(message);
        session.wait_for_reply().await;
        print_latest(&session);
    }

    Ok(())
}

fn print_latest(session: &ChatSession) {
    let messages = session.messages();
    let Some(reply) = messages
        .iter()
        .rev()
        .find(|message| message.origin == MessageOrigin::Assistant)
    else {
        return;
    };

    println!("\n{}\n", reply.text);

    if !reply.quick_replies.is_empty() {
        println!("Quick replies: {}", reply.quick_replies.join(" | "));
    }
    if reply.show_actions {
        println!("Actions: Call 102 | Find Clinic");
    }
}

fn load_rules(path: Option<&PathBuf>) -> Result<KeywordRules> {
    let Some(path) = path else {
        return Ok(KeywordRules::default());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading keyword rules from {}", path.display()))?;
    KeywordRules::from_json(&raw)
        .with_context(|| format!("invalid keyword rules in {}", path.display()))
}
