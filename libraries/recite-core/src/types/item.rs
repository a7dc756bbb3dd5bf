/// Playable item identity
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single recitation clip: one verse (`item_index`) of one chapter (`group_id`).
///
/// Both coordinates are 1-based. A zero in either position never names a clip
/// and is rejected by [`PlaybackItem::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaybackItem {
    /// Chapter number
    pub group_id: u32,
    /// Verse number within the chapter
    pub item_index: u32,
}

impl PlaybackItem {
    /// Create a new item
    pub fn new(group_id: u32, item_index: u32) -> Self {
        Self {
            group_id,
            item_index,
        }
    }

    /// Check that both coordinates are positive
    pub fn validate(&self) -> Result<()> {
        if self.group_id == 0 || self.item_index == 0 {
            return Err(CoreError::InvalidItem {
                group_id: self.group_id,
                item_index: self.item_index,
            });
        }
        Ok(())
    }

    /// Stable key in `group:item` form
    pub fn key(&self) -> ItemKey {
        ItemKey(self.to_string())
    }

    /// Zero-based position of this item within its group
    pub fn position(&self) -> u32 {
        self.item_index.saturating_sub(1)
    }
}

impl fmt::Display for PlaybackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.item_index)
    }
}

impl FromStr for PlaybackItem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidKey(s.to_string());
        let (group, item) = s.split_once(':').ok_or_else(invalid)?;
        let item = Self::new(
            group.trim().parse().map_err(|_| invalid())?,
            item.trim().parse().map_err(|_| invalid())?,
        );
        item.validate()?;
        Ok(item)
    }
}

/// Key identifying the item currently held by the player
///
/// Display units compare their own key against the player's current key to
/// decide which of them shows the playing affordance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key back into the item it names
    pub fn item(&self) -> Result<PlaybackItem> {
        self.0.parse()
    }
}

impl From<PlaybackItem> for ItemKey {
    fn from(item: PlaybackItem) -> Self {
        item.key()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
