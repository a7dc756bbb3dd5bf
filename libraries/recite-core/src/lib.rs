//! Recite Core
//!
//! Platform-agnostic building blocks shared by every Recite crate.
//!
//! This crate provides:
//! - **Domain Types**: `PlaybackItem` (a verse within a chapter) and its stable `ItemKey`
//! - **Content URL scheme**: `AudioUrlScheme`, mapping an item to its recitation clip
//! - **Catalog**: the `ContentSource` collaborator trait and the built-in `ChapterCatalog`
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use recite_core::{AudioUrlScheme, ChapterCatalog, ContentSource, PlaybackItem};
//!
//! let item = PlaybackItem::new(36, 5);
//! assert_eq!(item.key().as_str(), "36:5");
//!
//! let scheme = AudioUrlScheme::new("https://audio.example.org/reciter").unwrap();
//! assert_eq!(
//!     scheme.resolve(&item).as_str(),
//!     "https://audio.example.org/reciter/036005.mp3"
//! );
//!
//! let catalog = ChapterCatalog::new();
//! assert_eq!(catalog.item_count(36).unwrap(), 83);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;
pub mod url_scheme;

pub use catalog::ChapterCatalog;
pub use error::{CoreError, Result};
pub use traits::ContentSource;
pub use types::{ItemKey, PlaybackItem};
pub use url_scheme::{AudioUrlScheme, DEFAULT_AUDIO_BASE_URL};
