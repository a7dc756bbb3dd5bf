/// Collaborator traits for Recite
use crate::error::Result;

/// Source of chapter structure
///
/// The player only needs to know how many verses a chapter holds so it can
/// bound an autoplay run. Fetching and shaping verse text lives elsewhere.
pub trait ContentSource {
    /// Number of groups (chapters) available
    fn group_count(&self) -> u32;

    /// Number of items (verses) in a group
    ///
    /// # Errors
    /// Returns `CoreError::GroupNotFound` if the group does not exist
    fn item_count(&self, group_id: u32) -> Result<u32>;
}
