//! Recite - Desktop Audio Backend
//!
//! Implements the `recite-playback` resource seam for desktop platforms:
//! - HTTP download of each clip (reqwest)
//! - Decoding to stereo `f32` (Symphonia)
//! - Resampling to the device rate (Rubato)
//! - Output on the default device (CPAL)
//!
//! # Example
//!
//! ```rust,no_run
//! use recite_audio_desktop::{DesktopBackend, DesktopSettings};
//! use recite_core::PlaybackItem;
//! use recite_playback::{PlayOptions, PlaybackConfig, PlaybackController};
//!
//! let (backend, events) = DesktopBackend::new(DesktopSettings::default())?;
//! let mut controller = PlaybackController::new(PlaybackConfig::default(), backend)?;
//!
//! controller.play(PlaybackItem::new(1, 1), PlayOptions::autoplay(7))?;
//! while !controller.state().is_idle() {
//!     let Ok(event) = events.recv() else { break };
//!     controller.handle_event(event);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod decoder;
pub mod error;
pub mod fetch;
pub mod output;
pub mod resample;
pub mod settings;

pub use backend::{DesktopBackend, DesktopResource};
pub use decoder::{decode_clip, DecodedClip};
pub use error::{AudioError, Result};
pub use fetch::fetch_clip;
pub use resample::resample_interleaved;
pub use settings::DesktopSettings;
