//! Notification service
//!
//! Short-lived toasts shown after a copy.

use crate::page::Page;
use crate::selectors::class;
use crate::timers::TimerManager;
use emoji_dom::{DomResult, NodeId};
use std::time::{Duration, Instant};

/// Default time a toast stays up
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

/// Shows messages to the user
pub trait Notifier {
    /// Show `message`
    fn notify(&mut self, page: &mut Page, message: &str, now: Instant);

    /// Expire notifications that are due at `now`
    fn tick(&mut self, _page: &mut Page, _now: Instant) {}

    /// Whether a notification is still waiting to expire
    fn has_pending(&self) -> bool {
        false
    }
}

/// Text shown after copying `emoji`
pub fn copied_message(emoji: &str) -> String {
    format!("Copied {}", emoji)
}

/// DOM toasts: `<div class="alert">` appended to the body, removed after
/// a fixed duration
#[derive(Debug)]
pub struct Toasts {
    duration: Duration,
    timers: TimerManager<NodeId>,
}

impl Toasts {
    pub fn new(duration: Duration) -> Self {
        Self { duration, timers: TimerManager::new() }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of toasts on screen
    pub fn active(&self) -> usize {
        self.timers.len()
    }

    fn show(&mut self, page: &mut Page, message: &str) -> DomResult<Option<NodeId>> {
        let body = page.document().body();
        if !body.is_valid() {
            return Ok(None);
        }
        let tree = page.tree_mut();
        let alert = tree.create_element("div");
        tree.add_class(alert, class::ALERT)?;
        tree.set_text_content(alert, message)?;
        tree.append_child(body, alert)?;
        Ok(Some(alert))
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, page: &mut Page, message: &str, now: Instant) {
        match self.show(page, message) {
            Ok(Some(alert)) => {
                self.timers.set_timeout(alert, self.duration, now);
                tracing::debug!("Notification shown: {}", message);
            }
            Ok(None) => tracing::debug!("No body, notification dropped: {}", message),
            Err(e) => tracing::warn!("Failed to show notification: {}", e),
        }
    }

    fn tick(&mut self, page: &mut Page, now: Instant) {
        for alert in self.timers.take_ready(now) {
            if let Err(e) = page.tree_mut().remove(alert) {
                tracing::debug!("Notification already gone: {}", e);
            }
        }
    }

    fn has_pending(&self) -> bool {
        self.timers.has_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copied_message() {
        assert_eq!(copied_message("😀"), "Copied 😀");
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut page = Page::shell("https://emoji.local/").unwrap();
        let mut toasts = Toasts::default();
        let start = Instant::now();

        toasts.notify(&mut page, "Copied 😀", start);
        assert_eq!(page.alerts(), vec!["Copied 😀"]);
        assert!(toasts.has_pending());

        toasts.tick(&mut page, start + Duration::from_millis(999));
        assert_eq!(page.alerts().len(), 1);

        toasts.tick(&mut page, start + Duration::from_millis(1000));
        assert!(page.alerts().is_empty());
        assert_eq!(toasts.active(), 0);
    }

    #[test]
    fn test_overlapping_toasts() {
        let mut page = Page::shell("https://emoji.local/").unwrap();
        let mut toasts = Toasts::new(Duration::from_millis(100));
        let start = Instant::now();

        toasts.notify(&mut page, "Copied 😀", start);
        toasts.notify(&mut page, "Copied 🐱", start + Duration::from_millis(50));
        assert_eq!(page.alerts(), vec!["Copied 😀", "Copied 🐱"]);

        toasts.tick(&mut page, start + Duration::from_millis(120));
        assert_eq!(page.alerts(), vec!["Copied 🐱"]);
    }
}
