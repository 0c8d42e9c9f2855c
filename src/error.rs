//! Error taxonomy for the glimpse CLI.
//!
//! Every fatal condition maps to one variant here and propagates with `?`
//! up to `main`, which owns the single print-and-exit. Non-fatal conditions
//! (cache write failures, unparsable optional config values, stale-cache
//! fallback) are logged as warnings at the point they occur and never
//! surface as an error.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal error categories produced by the tool.
#[derive(Debug, Error)]
pub enum GlimpseError {
    /// Config file missing, unreadable, or missing the required credential.
    #[error("config error: {0}")]
    Config(String),

    /// Bad command-line input: missing image path, unsupported extension.
    #[error("{0}")]
    Validation(String),

    /// The image file could not be read from disk.
    #[error("failed to read image {path}: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog fetch failed and no usable cache exists.
    #[error("failed to fetch model catalog: {0}")]
    Network(String),

    /// The inference endpoint returned a non-success status or a response
    /// whose shape could not be interpreted.
    #[error("OpenRouter API error{}: {body}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Api { status: Option<u16>, body: String },
}

pub type Result<T> = std::result::Result<T, GlimpseError>;
