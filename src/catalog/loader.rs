use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::types::{Product, SkinProfile};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {message}")]
    Yaml { path: PathBuf, message: String },

    #[error("unsupported file extension for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

enum Format {
    Json,
    Yaml,
}

fn detect_format(path: &Path) -> Result<Format, CatalogError> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Ok(Format::Json),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Read a JSON or YAML document, picking the parser by file extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let format = detect_format(path)?;
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        Format::Json => serde_json::from_str(&content).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Format::Yaml => serde_saphyr::from_str(&content).map_err(|e| CatalogError::Yaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

/// Load a product catalog: a top-level list of product rows.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> = load_document(path)?;
    debug!(path = %path.display(), count = products.len(), "loaded catalog");
    Ok(products)
}

pub fn load_profile(path: &Path) -> Result<SkinProfile, CatalogError> {
    load_document(path)
}
