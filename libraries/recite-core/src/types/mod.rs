//! Domain types for Recite

mod item;

pub use item::{ItemKey, PlaybackItem};
