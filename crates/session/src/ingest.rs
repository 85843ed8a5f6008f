//! Document ingestion.
//!
//! Turning a file into a [`Document`] goes through the
//! [`DocumentExtractor`] seam: the shipped [`TextExtractor`] reads UTF-8
//! text files, while richer formats (PDF and friends) plug in behind the
//! same trait, concatenating pages with the [`page_marker`] boundary.
//!
//! A failed extraction still yields a Document — its content is a fixed
//! placeholder error string — so one bad file never blocks the rest of
//! an upload batch.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use docchat_core::document::Document;
use futures::future::join_all;
use thiserror::Error;
use tracing::warn;

/// Content substituted for a file whose text could not be extracted.
pub const EXTRACTION_FAILURE_PLACEHOLDER: &str =
    "[Error: could not extract text from this file]";

/// Page boundary marker for multi-page extractions.
pub fn page_marker(page: usize) -> String {
    format!("--- Page {page} ---")
}

/// Errors from a single file's extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Unsupported format: {0}")]
    Unsupported(String),
}

/// The seam between ingestion and whatever parses file contents.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// A human-readable name for this extractor.
    fn name(&self) -> &str;

    /// Extract the full text content of the file at `path`.
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Plain-text extractor: reads the file as UTF-8.
pub struct TextExtractor;

#[async_trait]
impl DocumentExtractor for TextExtractor {
    fn name(&self) -> &str {
        "text"
    }

    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ExtractionError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

/// Guess a content-type label from the file extension.
fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Ingest a batch of files into Documents.
///
/// Reads run concurrently — each file is independent — but the returned
/// list preserves input order regardless of completion order. Extraction
/// failures produce placeholder-content documents instead of dropping
/// the file.
pub async fn ingest_files(extractor: &dyn DocumentExtractor, paths: &[PathBuf]) -> Vec<Document> {
    let reads = paths.iter().map(|path| async move {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("untitled")
            .to_string();
        let content_type = content_type_for(path);

        match extractor.extract(path).await {
            Ok(text) => Document::new(name, content_type, text),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Extraction failed; ingesting placeholder");
                Document::new(name, content_type, EXTRACTION_FAILURE_PLACEHOLDER)
            }
        }
    });

    join_all(reads).await
}
