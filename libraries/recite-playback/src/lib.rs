//! Recite - Playback Control
//!
//! Platform-agnostic playback control for verse-by-verse recitation.
//!
//! This crate provides:
//! - A single shared playback state (idle, loading, playing) per application
//! - Play/pause toggling per item
//! - Autoplay through the remaining items of a group
//! - Supersession: a new request always cancels the previous clip
//! - Error recovery to idle, surfaced as events instead of errors
//!
//! # Architecture
//!
//! `recite-playback` never touches the network or audio hardware. Clips are
//! opened through the [`AudioBackend`] trait and report back with
//! [`ResourceEvent`]s. `recite-audio-desktop` provides the desktop backend.
//!
//! # Example
//!
//! ```rust
//! use recite_core::PlaybackItem;
//! use recite_playback::{
//!     AudioBackend, AudioResource, PlayOptions, PlaybackConfig, PlaybackController,
//!     ResourceEvent, ResourceId, Result,
//! };
//! use url::Url;
//!
//! struct Silent(ResourceId);
//!
//! impl AudioResource for Silent {
//!     fn id(&self) -> ResourceId { self.0 }
//!     fn start(&mut self) -> Result<()> { Ok(()) }
//!     fn release(&mut self) {}
//! }
//!
//! struct SilentBackend;
//!
//! impl AudioBackend for SilentBackend {
//!     type Resource = Silent;
//!     fn open(&mut self, id: ResourceId, _url: &Url) -> Result<Silent> { Ok(Silent(id)) }
//! }
//!
//! let mut controller = PlaybackController::new(PlaybackConfig::default(), SilentBackend)?;
//!
//! // Play the opening chapter from its first verse
//! controller.play(PlaybackItem::new(1, 1), PlayOptions::autoplay(7))?;
//! assert!(controller.state().is_loading);
//!
//! // The backend reports the clip as audible
//! let id = controller.current_resource().unwrap();
//! controller.handle_event(ResourceEvent::ready(id));
//! assert!(controller.state().is_playing);
//!
//! // Pressing play again on the same verse pauses it
//! controller.play(PlaybackItem::new(1, 1), PlayOptions::single())?;
//! assert!(controller.state().is_idle());
//! # Ok::<(), recite_playback::PlaybackError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod controller;
pub mod error;
pub mod events;
pub mod queue;
pub mod resource;
pub mod types;

pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::AutoplayQueue;
pub use resource::{AudioBackend, AudioResource, ResourceEvent, ResourceEventKind, ResourceId};
pub use types::{
    ItemAffordance, PlayOptions, PlaybackConfig, PlaybackPhase, PlaybackState, ToggleWhileLoading,
};
