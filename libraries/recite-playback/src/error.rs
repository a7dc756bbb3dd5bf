//! Error types for playback control

use recite_core::CoreError;
use thiserror::Error;

/// Playback errors
///
/// Only caller mistakes and backend plumbing failures are errors. A clip that
/// fails to load or play is not: the controller recovers to idle and reports
/// it as a [`PlaybackEvent::ItemFailed`](crate::PlaybackEvent::ItemFailed).
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Invalid item or configuration value from the core layer
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Autoplay requested without a positive queue length
    #[error("Autoplay requires a queue length of at least 1")]
    MissingQueueLength,

    /// Audio backend error
    #[error("Audio backend error: {0}")]
    Backend(String),
}

impl PlaybackError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
