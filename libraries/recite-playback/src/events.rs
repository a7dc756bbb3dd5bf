//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued in the
//! order transitions happen and drained by the owner of the controller:
//! - State changes (idle/loading/playing)
//! - Item start and natural finish
//! - Autoplay advance and exhaustion
//! - Clip failures

use recite_core::ItemKey;
use serde::{Deserialize, Serialize};

use crate::types::PlaybackState;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Observable state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// Clip became audible
    ItemStarted {
        /// Item now playing
        key: ItemKey,
    },

    /// Clip played to its end
    ItemFinished {
        /// Item that finished
        key: ItemKey,
    },

    /// Autoplay moved on to the next item of the group
    AutoplayAdvanced {
        /// Item that just finished
        from: ItemKey,
        /// Item now loading
        to: ItemKey,
    },

    /// Clip could not be loaded or played
    ItemFailed {
        /// Item that failed
        key: ItemKey,
        /// Backend error message
        message: String,
    },

    /// Autoplay reached the last item of the group
    AutoplayExhausted {
        /// Group that was played through
        group_id: u32,
    },
}

impl PlaybackEvent {
    /// Short name, used for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::StateChanged { .. } => "state_changed",
            Self::ItemStarted { .. } => "item_started",
            Self::ItemFinished { .. } => "item_finished",
            Self::AutoplayAdvanced { .. } => "autoplay_advanced",
            Self::ItemFailed { .. } => "item_failed",
            Self::AutoplayExhausted { .. } => "autoplay_exhausted",
        }
    }
}
