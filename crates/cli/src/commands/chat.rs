//! `docchat chat` — interactive document-chat session.
//!
//! Reads from stdin, writes to stdout. Slash commands manage the
//! document set and settings; anything else is sent as a query. The
//! relay call is awaited inline, so a second submission cannot start
//! until the prior one resolves.

use std::path::PathBuf;

use docchat_config::AppConfig;
use docchat_core::language::Language;
use docchat_core::message::Message;
use docchat_session::{ChatSession, TextExtractor, ingest_files};
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(initial_docs: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let relay = super::build_relay(&config)?;

    let mut session = ChatSession::new();
    session.model_config = config.model_config();
    session.set_language(config.language);
    session.push_message(Message::model(
        "Hello! I'm your document assistant. Add documents with /add, \
         and I'll answer questions based on their content.",
    ));

    if !initial_docs.is_empty() {
        add_documents(&mut session, &initial_docs).await;
    }

    println!();
    println!("  DocChat — Interactive Mode");
    println!();
    println!("  Model:     {}", config.model);
    println!("  Language:  {}", session.language);
    println!(
        "  Context:   {} document(s), ~{} tokens",
        session.documents.len(),
        session.total_document_tokens()
    );
    println!();
    println!("  Commands: /add <path...>  /docs  /remove <name>  /clear");
    println!("            /lang <en|am>  /temp <0..1>  /maxtokens <100..8000>");
    println!("  Type your question and press Enter. 'exit' to quit.");
    println!();

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    prompt();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            prompt();
            continue;
        }

        if matches!(line.as_str(), "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        if let Some(rest) = line.strip_prefix('/') {
            handle_command(&mut session, rest).await;
            prompt();
            continue;
        }

        eprint!("  Analyzing documents...");
        match relay.send(&mut session, &line).await {
            Ok(reply) => {
                eprint!("\r                       \r");
                println!("{reply}");
                let sources = session
                    .messages
                    .last()
                    .map(|m| m.sources.clone())
                    .unwrap_or_default();
                if !sources.is_empty() {
                    println!("  [sources: {}]", sources.join(", "));
                }
            }
            Err(err) => {
                eprint!("\r                       \r");
                // History stays consistent; resubmitting retries.
                eprintln!("  Error: {err}");
            }
        }
        prompt();
    }

    Ok(())
}

fn prompt() {
    use std::io::Write;
    print!("  You > ");
    let _ = std::io::stdout().flush();
}

async fn add_documents(session: &mut ChatSession, paths: &[PathBuf]) {
    let docs = ingest_files(&TextExtractor, paths).await;
    for doc in docs {
        println!("  Added {} (~{} tokens)", doc.name, doc.tokens);
        session.add_document(doc);
    }
}

async fn handle_command(session: &mut ChatSession, command: &str) {
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("add") => {
            let paths: Vec<PathBuf> = parts.map(PathBuf::from).collect();
            if paths.is_empty() {
                println!("  Usage: /add <path...>");
            } else {
                add_documents(session, &paths).await;
            }
        }
        Some("docs") => {
            if session.documents.is_empty() {
                println!("  No documents loaded.");
            }
            for doc in &session.documents {
                println!("  {}  {} (~{} tokens)", doc.id, doc.name, doc.tokens);
            }
            println!(
                "  Total: ~{} tokens of document context",
                session.total_document_tokens()
            );
        }
        Some("remove") => {
            let target: Vec<&str> = parts.collect();
            let target = target.join(" ");
            let id = session
                .documents
                .iter()
                .find(|d| d.id.0 == target || d.name == target)
                .map(|d| d.id.clone());
            match id {
                Some(id) if session.remove_document(&id) => println!("  Removed."),
                _ => println!("  No document matches '{target}'."),
            }
        }
        Some("clear") => {
            session.replace_messages(vec![Message::model(
                "Chat history cleared. I'm ready for new questions about your documents.",
            )]);
            println!("  Chat history cleared.");
        }
        Some("lang") => match parts.next().and_then(Language::parse) {
            Some(lang) => {
                session.set_language(lang);
                println!("  Language set to {lang}.");
            }
            None => println!("  Usage: /lang <en|am>"),
        },
        Some("temp") => match parts.next().and_then(|v| v.parse::<f32>().ok()) {
            Some(t) => {
                session.model_config.set_temperature(t);
                println!("  Temperature set to {}.", session.model_config.temperature);
            }
            None => println!("  Usage: /temp <0..1>"),
        },
        Some("maxtokens") => match parts.next().and_then(|v| v.parse::<u32>().ok()) {
            Some(n) => {
                session.model_config.set_max_output_tokens(n);
                println!(
                    "  Max output tokens set to {}.",
                    session.model_config.max_output_tokens
                );
            }
            None => println!("  Usage: /maxtokens <100..8000>"),
        },
        _ => println!("  Unknown command: /{command}"),
    }
}
