/// Core error types for Recite
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Recite
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Item coordinates outside the 1-based range
    #[error("Invalid item {group_id}:{item_index}: group and item numbers start at 1")]
    InvalidItem {
        /// Group (chapter) number
        group_id: u32,
        /// Item (verse) number within the group
        item_index: u32,
    },

    /// A key string that is not of the form `group:item`
    #[error("Invalid item key: {0}")]
    InvalidKey(String),

    /// Group not known to the content source
    #[error("Group not found: {0}")]
    GroupNotFound(u32),

    /// Audio base URL rejected
    #[error("Invalid audio base URL: {0}")]
    InvalidUrl(String),
}

impl CoreError {
    /// Create an invalid URL error
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }
}

impl From<url::ParseError> for CoreError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
