/// Application configuration
use crate::error::{CliError, Result};
use recite_audio_desktop::DesktopSettings;
use recite_core::AudioUrlScheme;
use recite_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "recite.toml";

/// Environment variable prefix, e.g. `RECITE_PLAYBACK__AUDIO_BASE_URL`
pub const ENV_PREFIX: &str = "RECITE";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub desktop: DesktopSettings,
}

impl AppConfig {
    /// Load configuration from file and `RECITE_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, ENV_PREFIX)
    }

    /// Load configuration with an explicit environment prefix
    ///
    /// An explicit `path` must exist. Without one, `recite.toml` in the working
    /// directory is used if present. Environment variables override the file;
    /// nested keys are separated by a double underscore.
    pub fn load_from(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        AudioUrlScheme::new(&self.playback.audio_base_url).map_err(|e| {
            CliError::Config(format!(
                "playback.audio_base_url {:?}: {}",
                self.playback.audio_base_url, e
            ))
        })?;

        self.desktop
            .validate()
            .map_err(|e| CliError::Config(format!("desktop: {}", e)))?;

        Ok(())
    }
}
