//! Resume text extraction from uploaded PDFs.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a readable PDF: {0}")]
    Pdf(String),
}

/// Turns a stored upload into plain text. Implementations are blocking and are
/// driven from `spawn_blocking`.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Concatenated text of every page, trimmed.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        Ok(text.trim().to_string())
    }
}
