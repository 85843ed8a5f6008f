//! `docchat ask` — single-shot question mode.

use std::path::PathBuf;

use docchat_config::AppConfig;
use docchat_session::{ChatSession, TextExtractor, ingest_files};

pub async fn run(message: String, docs: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let relay = super::build_relay(&config)?;

    let mut session = ChatSession::new();
    session.model_config = config.model_config();
    session.set_language(config.language);

    for doc in ingest_files(&TextExtractor, &docs).await {
        session.add_document(doc);
    }

    eprint!("  Thinking...");
    let result = relay.send(&mut session, &message).await;
    eprint!("\r             \r");

    match result {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(err) => Err(err.to_string().into()),
    }
}
