//! Upload storage. Files land in one directory under a sanitized name; a later upload
//! with the same name replaces the earlier one.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Name used when sanitizing leaves nothing usable.
const FALLBACK_FILENAME: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to create upload directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| UploadError::CreateDir {
                path: self.dir.clone(),
                source,
            })
    }

    /// Writes `bytes` under the sanitized form of `original_name` and returns the path.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf, UploadError> {
        self.ensure_dir().await?;

        let path = self.dir.join(secure_filename(original_name));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| UploadError::Write {
                path: path.clone(),
                source,
            })?;

        debug!("Stored upload at {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

/// Reduces a client-supplied filename to a safe, flat, ASCII name.
///
/// Non-ASCII characters are dropped, path separators become spaces, whitespace runs
/// become `_`, anything outside `[A-Za-z0-9_.-]` is removed and leading or trailing
/// `.`/`_` are stripped. Falls back to `resume.pdf` when nothing survives.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}
