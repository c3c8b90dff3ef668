//! Emoji Finder
//!
//! Core of the emoji lookup page, run against a headless DOM:
//! - incremental, frame-by-frame rendering of the dataset
//! - keyword search over the rendered results
//! - URL hash ↔ search input synchronization
//! - click-to-copy and the `/` shortcut
//!
//! [`EmojiFinder`] is the composition root; hosts feed it frames and events.

pub mod clipboard;
pub mod config;
pub mod events;
pub mod interaction;
pub mod location;
pub mod navigation;
pub mod notify;
pub mod page;
pub mod renderer;
pub mod search;
pub mod selectors;
pub mod timers;

mod app;

pub use app::EmojiFinder;
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use config::{ConfigError, FinderConfig};
pub use events::{
    ClickEvent, Event, EventSource, EventType, Handler, InputEvent, Key, KeyModifiers, KeyboardEvent, Listeners,
    ScriptedEvents,
};
pub use location::Location;
pub use notify::{Notifier, Toasts};
pub use page::Page;
pub use renderer::{RenderStart, RenderStep, RenderTask};
pub use search::{SearchEngine, SearchOutcome, SearchState};
pub use timers::{Clock, ManualClock, SystemClock};

pub use emoji_data::{Dataset, EmojiEntry};
pub use emoji_dom::NodeId;

/// Startup error
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    #[error("Invalid page markup: {0}")]
    Html(#[from] emoji_html::ParseError),

    #[error("Invalid page URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
