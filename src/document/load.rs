use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::info;
use thiserror::Error;

use super::schema::Document;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("greeting document {path} is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("greeting document {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

static DOCUMENT: OnceLock<Document> = OnceLock::new();

/// Load the greeting document at `path`, caching the first success for the
/// life of the process. Subsequent calls return the cached document and do
/// not touch the filesystem again.
pub fn load(path: &Path) -> Result<&'static Document, DocumentError> {
    if let Some(doc) = DOCUMENT.get() {
        return Ok(doc);
    }
    let doc = read(path)?;
    Ok(DOCUMENT.get_or_init(|| doc))
}

/// Read and parse a document without touching the process-wide cache.
pub fn read(path: &Path) -> Result<Document, DocumentError> {
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = serde_json::from_str(&text).map_err(|source| DocumentError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded greeting document from {}", path.display());
    Ok(doc)
}
