//! Page selectors and class names

/// Search text field
pub const SEARCH_INPUT: &str = ".speedy-filter";
/// Parent of all Result Nodes
pub const EMOJI_CONTAINER: &str = ".emojis-container";
/// Loading indicator, removed once rendering completes
pub const LOADING: &str = ".loading";
/// Shown when no result is visible
pub const NO_RESULTS: &str = ".no-results";
/// Displays the current keyword
pub const KEYWORD: &str = ".keyword";
/// Navigation links that are currently marked active
pub const ACTIVE_LINKS: &str = ".active[href^=\"#\"]";

/// Class names
pub mod class {
    pub const RESULT: &str = "result";
    pub const EMOJI: &str = "js-emoji";
    pub const EMOJI_CHAR: &str = "js-emoji-char";
    pub const CLEAR_SEARCH: &str = "js-clear-search";
    pub const GROUP: &str = "group";
    pub const ACTIVE: &str = "active";
    pub const ALERT: &str = "alert";
}

/// Name of the dataset-ready signal
pub const READY_EVENT: &str = "emoji:ready";
