//! Error types
//!
//! Mount failures degrade to an inert background; config failures fall back
//! to defaults. Neither is ever allowed to panic into the host page.

use thiserror::Error;

/// Why the animation could not be mounted
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no browser window or document available")]
    NoWindow,
    #[error("canvas element `{0}` not found")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("2D drawing context unavailable")]
    ContextUnavailable,
    #[error("failed to register `{0}` listener")]
    ListenerFailed(&'static str),
}

/// Invalid configuration input
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid color `{0}`, expected #rrggbb or #rgb")]
    InvalidColor(String),
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
