//! Autoplay queue descriptor
//!
//! Describes "when the current item finishes naturally, continue with the next
//! one in the same group". It holds no items, only a position within a group of
//! known length.

use recite_core::PlaybackItem;
use serde::{Deserialize, Serialize};

/// Autoplay run through a contiguous stretch of one group
///
/// `index` is the 0-based position of the item currently playing. The run can
/// advance while `index + 1 < length`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayQueue {
    active: bool,
    group_id: Option<u32>,
    index: u32,
    length: u32,
}

impl AutoplayQueue {
    /// Inactive queue
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Queue starting at `item` in a group of `length` items
    pub fn starting_at(item: PlaybackItem, length: u32) -> Self {
        Self {
            active: true,
            group_id: Some(item.group_id),
            index: item.position(),
            length,
        }
    }

    /// Whether autoplay is running
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether autoplay is running for `group_id`
    pub fn is_active_for(&self, group_id: u32) -> bool {
        self.active && self.group_id == Some(group_id)
    }

    /// Group the queue runs through
    pub fn group_id(&self) -> Option<u32> {
        self.group_id
    }

    /// 0-based position of the current item
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Number of items in the group
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Item that would follow the current one, without advancing
    pub fn peek_next(&self, group_id: u32) -> Option<PlaybackItem> {
        if !self.is_active_for(group_id) {
            return None;
        }
        let next = self.index.checked_add(1)?;
        (next < self.length).then(|| PlaybackItem::new(group_id, next + 1))
    }

    /// Move to the next item of `group_id`
    ///
    /// Returns the item to play, or `None` if the queue is inactive, belongs to
    /// another group, or is exhausted. The queue is left untouched on `None`.
    pub fn advance(&mut self, group_id: u32) -> Option<PlaybackItem> {
        let next = self.peek_next(group_id)?;
        self.index = next.position();
        Some(next)
    }

    /// Deactivate the queue
    pub fn clear(&mut self) {
        *self = Self::inactive();
    }
}
