//! Desktop backend settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AudioError, Result};

/// Settings for [`DesktopBackend`](crate::DesktopBackend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopSettings {
    /// Whole-request timeout for fetching one clip (default: 30)
    pub request_timeout_secs: u64,

    /// Output gain, 0.0 to 1.0 (default: 1.0)
    pub volume: f32,
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            volume: 1.0,
        }
    }
}

impl DesktopSettings {
    /// Check value ranges
    ///
    /// # Errors
    /// Returns an error if the volume is outside 0.0 to 1.0 or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(AudioError::InvalidVolume(self.volume));
        }
        if self.request_timeout_secs == 0 {
            return Err(AudioError::Network(
                "request timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
