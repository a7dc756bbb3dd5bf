//! Content URL scheme for recitation clips
//!
//! Every clip lives at `{base}/{GGG}{III}.mp3`, where `GGG` and `III` are the
//! group and item numbers zero-padded to three digits. The mapping is a pure
//! function of the item; there is no lookup table and no negotiation with the
//! audio host.

use crate::error::{CoreError, Result};
use crate::types::PlaybackItem;
use url::Url;

/// Default recitation host (Mishary Alafasy, 128 kbps)
pub const DEFAULT_AUDIO_BASE_URL: &str = "https://everyayah.com/data/Alafasy_128kbps";

/// Resolves items to clip URLs under a fixed base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUrlScheme {
    base: Url,
}

impl AudioUrlScheme {
    /// Create a scheme rooted at `base`
    ///
    /// The base must be an absolute `http`/`https` URL. A trailing slash is
    /// optional.
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base.trim())?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(CoreError::invalid_url(format!(
                "unsupported scheme '{}', expected http or https",
                base.scheme()
            )));
        }
        if base.cannot_be_a_base() {
            return Err(CoreError::invalid_url(format!("{base} cannot be a base")));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(CoreError::invalid_url(format!(
                "{base} must not carry a query or fragment"
            )));
        }

        Ok(Self { base })
    }

    /// Scheme for the default recitation host
    pub fn default_host() -> Result<Self> {
        Self::new(DEFAULT_AUDIO_BASE_URL)
    }

    /// Base URL clips are resolved under
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Clip file name for an item, e.g. `001001.mp3`
    pub fn file_name(item: &PlaybackItem) -> String {
        format!("{:03}{:03}.mp3", item.group_id, item.item_index)
    }

    /// Resolve the clip URL for an item
    pub fn resolve(&self, item: &PlaybackItem) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&Self::file_name(item));
        }
        url
    }
}
