//! Error types shared across texatlas crates.

use std::path::PathBuf;

/// Top-level error type for host-side texatlas operations.
///
/// Descriptor problems have their own taxonomy in `texatlas-model`; this
/// type covers everything that happens around it (asset sinks, textures,
/// configuration, files).
#[derive(Debug, thiserror::Error)]
pub enum TexAtlasError {
    #[error("Asset sink error: {message}")]
    Sink { message: String },

    #[error("Texture error: {message}")]
    Texture { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using TexAtlasError.
pub type TexAtlasResult<T> = Result<T, TexAtlasError>;

impl TexAtlasError {
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink {
            message: msg.into(),
        }
    }

    pub fn texture(msg: impl Into<String>) -> Self {
        Self::Texture {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
