//! Core types for playback control

use recite_core::{ItemKey, PlaybackItem, DEFAULT_AUDIO_BASE_URL};
use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, Result};

/// Observable playback state
///
/// Owned by the controller and handed out read-only. It is the single source
/// of truth for what is audible right now. `is_playing` and `is_loading` are
/// never both true, and `current_item` is `None` exactly when both are false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// A clip is audible
    pub is_playing: bool,

    /// A clip has been requested but is not audible yet
    pub is_loading: bool,

    /// Key of the clip being loaded or played
    pub current_item: Option<ItemKey>,
}

impl PlaybackState {
    /// Nothing loaded
    pub fn idle() -> Self {
        Self::default()
    }

    /// Clip requested, waiting for data
    pub fn loading(key: ItemKey) -> Self {
        Self {
            is_playing: false,
            is_loading: true,
            current_item: Some(key),
        }
    }

    /// Clip audible
    pub fn playing(key: ItemKey) -> Self {
        Self {
            is_playing: true,
            is_loading: false,
            current_item: Some(key),
        }
    }

    /// Collapse the flags into a single phase
    pub fn phase(&self) -> PlaybackPhase {
        match (self.is_loading, self.is_playing) {
            (true, _) => PlaybackPhase::Loading,
            (false, true) => PlaybackPhase::Playing,
            (false, false) => PlaybackPhase::Idle,
        }
    }

    /// Whether nothing is loading or playing
    pub fn is_idle(&self) -> bool {
        self.phase() == PlaybackPhase::Idle
    }

    /// Whether `key` is the clip currently held
    pub fn is_current(&self, key: &ItemKey) -> bool {
        self.current_item.as_ref() == Some(key)
    }

    /// What a display unit showing `item` should render
    pub fn affordance_for(&self, item: &PlaybackItem) -> ItemAffordance {
        if !self.is_current(&item.key()) {
            return ItemAffordance::Idle;
        }
        match self.phase() {
            PlaybackPhase::Loading => ItemAffordance::Loading,
            PlaybackPhase::Playing => ItemAffordance::Playing,
            PlaybackPhase::Idle => ItemAffordance::Idle,
        }
    }
}

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// Nothing loaded
    Idle,

    /// Waiting for the clip to become ready
    Loading,

    /// Clip audible
    Playing,
}

/// Per-item affordance for display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemAffordance {
    /// Show the play control
    Idle,

    /// Show a spinner
    Loading,

    /// Show the pause control
    Playing,
}

/// Options for a play request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOptions {
    /// Continue with the following items of the same group when a clip ends
    pub autoplay: bool,

    /// Number of items in the group; required when `autoplay` is set
    pub queue_length: Option<u32>,
}

impl PlayOptions {
    /// Play a single item
    pub fn single() -> Self {
        Self::default()
    }

    /// Play an item and continue through the rest of its group
    pub fn autoplay(queue_length: u32) -> Self {
        Self {
            autoplay: true,
            queue_length: Some(queue_length),
        }
    }

    /// Queue length to use, checked against the autoplay flag
    pub(crate) fn checked_queue_length(&self) -> Result<Option<u32>> {
        if !self.autoplay {
            return Ok(None);
        }
        match self.queue_length {
            Some(length) if length > 0 => Ok(Some(length)),
            _ => Err(PlaybackError::MissingQueueLength),
        }
    }
}

/// What to do when the item currently loading is requested again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleWhileLoading {
    /// Cancel the in-flight load and return to idle
    #[default]
    Cancel,

    /// Keep loading; the repeated request is a no-op
    Ignore,

    /// Drop the in-flight load and request the same clip again
    Restart,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Base URL clips are resolved under
    pub audio_base_url: String,

    /// Same-item request while loading (default: Cancel)
    pub toggle_while_loading: ToggleWhileLoading,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            audio_base_url: DEFAULT_AUDIO_BASE_URL.to_string(),
            toggle_while_loading: ToggleWhileLoading::Cancel,
        }
    }
}
