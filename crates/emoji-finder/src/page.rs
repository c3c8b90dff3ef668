//! Page state
//!
//! The document plus the bits of browser state the finder reads and writes:
//! location, focus, the search input's value and selection.

use crate::location::Location;
use crate::selectors::{self, class};
use crate::FinderError;
use emoji_dom::{Document, DomTree, NodeId, Selector};
use std::collections::HashMap;

/// A loaded page
#[derive(Debug, Clone)]
pub struct Page {
    document: Document,
    location: Location,
    focused: Option<NodeId>,
    selection: Option<(usize, usize)>,
    /// Single-element lookups by selector
    cache: HashMap<&'static str, NodeId>,
}

impl Page {
    pub fn new(document: Document, location: Location) -> Self {
        Self {
            document,
            location,
            focused: None,
            selection: None,
            cache: HashMap::new(),
        }
    }

    /// Parse markup and open it at `url`
    pub fn from_html(html: &str, url: &str) -> Result<Self, FinderError> {
        let document = emoji_html::parse(html)?;
        let location = Location::parse(url)?;
        Ok(Self::new(document, location))
    }

    /// The default page shell opened at `url`
    pub fn shell(url: &str) -> Result<Self, FinderError> {
        Self::from_html(emoji_html::PAGE_SHELL, url)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tree(&self) -> &DomTree {
        self.document.tree()
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        self.document.tree_mut()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut Location {
        &mut self.location
    }

    /// First element matching a page selector
    ///
    /// Hits are cached; a cached node that has since been detached is
    /// looked up again.
    pub fn find(&mut self, selector: &'static str) -> Option<NodeId> {
        if let Some(&id) = self.cache.get(selector) {
            if self.tree().is_connected(id) {
                return Some(id);
            }
            self.cache.remove(selector);
        }
        let id = self.document.query_selector(selector)?;
        self.cache.insert(selector, id);
        Some(id)
    }

    pub fn search_input(&mut self) -> Option<NodeId> {
        self.find(selectors::SEARCH_INPUT)
    }

    pub fn container(&mut self) -> Option<NodeId> {
        self.find(selectors::EMOJI_CONTAINER)
    }

    /// Current value of the search input (empty when there is none)
    pub fn input_value(&mut self) -> String {
        match self.search_input() {
            Some(input) => self.tree().get_attribute(input, "value").unwrap_or("").to_string(),
            None => String::new(),
        }
    }

    /// Set the search input's value; returns true if it changed
    pub fn set_input_value(&mut self, value: &str) -> bool {
        let Some(input) = self.search_input() else {
            tracing::debug!("No search input, value not set");
            return false;
        };
        let changed = self.tree_mut().set_attribute(input, "value", value).unwrap_or(false);
        if changed {
            self.selection = None;
        }
        changed
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn focus(&mut self, node: NodeId) {
        if self.focused != Some(node) {
            self.selection = None;
        }
        self.focused = Some(node);
    }

    pub fn blur(&mut self) {
        self.focused = None;
        self.selection = None;
    }

    /// Selected character range of the focused field
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Some((start, end));
    }

    /// Every Result Node in document order
    pub fn results(&self) -> Vec<NodeId> {
        let tree = self.tree();
        tree.query_selector_all(tree.root(), &Selector::class(class::RESULT))
    }

    /// Emojis of the Result Nodes that are not hidden
    pub fn visible_emojis(&self) -> Vec<String> {
        self.results()
            .into_iter()
            .filter(|&id| !self.tree().is_hidden(id))
            .filter_map(|id| crate::interaction::emoji_at(self.tree(), id))
            .collect()
    }

    /// Text of the notifications currently on the page
    pub fn alerts(&self) -> Vec<String> {
        let tree = self.tree();
        tree.query_selector_all(tree.root(), &Selector::class(class::ALERT))
            .into_iter()
            .map(|id| tree.text_content(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Page {
        Page::shell("https://emoji.local/").unwrap()
    }

    #[test]
    fn test_shell_elements() {
        let mut page = shell();
        assert!(page.search_input().is_some());
        assert!(page.container().is_some());
        assert!(page.find(selectors::LOADING).is_some());
        assert!(page.find(selectors::NO_RESULTS).is_some());
        assert!(page.results().is_empty());
    }

    #[test]
    fn test_input_value() {
        let mut page = shell();
        assert_eq!(page.input_value(), "");
        assert!(page.set_input_value("cat"));
        assert!(!page.set_input_value("cat"));
        assert_eq!(page.input_value(), "cat");
    }

    #[test]
    fn test_find_refreshes_detached() {
        let mut page = shell();
        let loading = page.find(selectors::LOADING).unwrap();
        page.tree_mut().remove(loading).unwrap();
        assert_eq!(page.find(selectors::LOADING), None);
    }

    #[test]
    fn test_focus_resets_selection() {
        let mut page = shell();
        let input = page.search_input().unwrap();
        page.focus(input);
        page.set_selection(0, 3);
        page.focus(input);
        assert_eq!(page.selection(), Some((0, 3)));
        page.blur();
        assert_eq!(page.selection(), None);
        assert_eq!(page.focused(), None);
    }

    #[test]
    fn test_missing_input_is_noop() {
        let mut page = Page::from_html("<p>nothing here</p>", "https://emoji.local/").unwrap();
        assert!(!page.set_input_value("x"));
        assert_eq!(page.input_value(), "");
    }
}
