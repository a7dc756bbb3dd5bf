/// CLI error types
use recite_audio_desktop::AudioError;
use recite_core::{CoreError, PlaybackItem};
use recite_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Verse {0} is not in the catalog")]
    UnknownItem(PlaybackItem),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
