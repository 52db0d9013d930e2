//! Error types for folio-core
//!
//! Every error here is local to one section of the page. A failed document
//! load is rendered inline in its own container and never stops the others.

use thiserror::Error;

/// Why a data document could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Transport-level failure (network, filesystem)
    #[error("request failed: {0}")]
    Fetch(String),

    /// The source answered with a non-2xx status
    #[error("HTTP status {0}")]
    Status(u16),

    /// The body is not valid JSON
    #[error("invalid JSON: {0}")]
    Parse(String),

    /// Valid JSON, but not the shape the caller asked for
    #[error("unexpected document shape: {0}")]
    Decode(String),

    /// The logical name is not in the document catalog
    #[error("unknown document")]
    UnknownDocument,
}

/// A named data document failed to load
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load '{document}': {kind}")]
pub struct DataLoadError {
    pub document: String,
    pub kind: LoadErrorKind,
}

impl DataLoadError {
    pub fn new(document: impl Into<String>, kind: LoadErrorKind) -> Self {
        Self {
            document: document.into(),
            kind,
        }
    }
}

/// An expected mount point is not present in the document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Render target '{container}' not found")]
pub struct RenderTargetMissing {
    pub container: String,
}

/// Copying a citation failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The platform has no clipboard write capability
    #[error("clipboard API unavailable")]
    Unsupported,

    /// The platform refused the write
    #[error("clipboard write rejected: {0}")]
    Rejected(String),

    /// Both the clipboard API and the legacy fallback failed
    #[error("copy failed ({primary}); legacy fallback failed ({fallback})")]
    Exhausted { primary: String, fallback: String },

    /// Copy was requested while no citation is open
    #[error("no citation is open")]
    NotOpen,
}

/// Configuration loading or validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
