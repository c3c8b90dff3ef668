//! Emoji Data
//!
//! The Data Source of the finder: an ordered, read-only mapping from emoji
//! character to a space-joined keyword string.
//!
//! Raw emojilib data maps each emoji to either a keyword string or a list of
//! keywords; lists are joined with a single space on load.

mod dataset;
mod source;

pub use dataset::{Dataset, EmojiEntry};
pub use source::{fetch, load, DEFAULT_SOURCE_URL};

use std::path::PathBuf;

/// Data loading error
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to fetch emoji data: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch emoji data: HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Invalid emoji data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid keywords for {emoji:?}: expected a string or a list of strings")]
    Keywords { emoji: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
