//! Search/filter engine
//!
//! Filters Result Nodes by case-insensitive substring match of the keyword
//! against their `title`. The last applied keyword is remembered so that
//! re-applying it leaves the DOM untouched.

use crate::page::Page;
use crate::selectors::{self, class};
use emoji_dom::{DomTree, NodeId, Selector};

/// The last applied keyword
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    applied: Option<String>,
    /// Lowercased copy of `applied`
    needle: String,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmed keyword of the last filter pass; `None` before the first search
    pub fn current(&self) -> Option<&str> {
        self.applied.as_deref()
    }

    fn apply(&mut self, keyword: &str) {
        self.applied = Some(keyword.to_string());
        self.needle = keyword.to_lowercase();
    }

    /// Whether a Result Node with these keywords should be visible
    pub fn matches(&self, keywords: &str) -> bool {
        self.needle.is_empty() || keywords.to_lowercase().contains(&self.needle)
    }
}

/// Outcome of a `search` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Same keyword as last time; nothing was filtered
    Unchanged,
    Filtered { visible: usize, hidden: usize },
}

/// Keyword search over the page's Result Nodes
#[derive(Debug, Default, Clone)]
pub struct SearchEngine {
    state: SearchState,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Apply a keyword
    ///
    /// The `.keyword` display is always updated; visibility is only
    /// recomputed when the trimmed keyword differs from the last one.
    pub fn search(&mut self, page: &mut Page, keyword: &str) -> SearchOutcome {
        let keyword = keyword.trim();

        if let Some(display) = page.find(selectors::KEYWORD) {
            if let Err(e) = page.tree_mut().set_text_content(display, keyword) {
                tracing::warn!("Failed to update keyword display: {}", e);
            }
        }

        if self.state.current() == Some(keyword) {
            return SearchOutcome::Unchanged;
        }
        self.state.apply(keyword);

        let results = page.results();
        let mut visible = 0;
        let tree = page.tree_mut();
        for &result in &results {
            let title = tree.get_attribute(result, "title").unwrap_or("");
            let show = self.state.matches(title);
            if show {
                visible += 1;
            }
            // Only real changes are written
            let _ = tree.set_hidden(result, !show);
        }
        let hidden = results.len() - visible;

        self.update_no_results(page, visible > 0);
        tracing::debug!("Search {:?}: {} visible, {} hidden", keyword, visible, hidden);
        SearchOutcome::Filtered { visible, hidden }
    }

    /// Recompute the "no results" indicator from the current DOM
    ///
    /// Returns whether any Result Node is visible.
    pub fn refresh_no_results(&self, page: &mut Page) -> bool {
        let any_visible = has_visible_result(page.tree());
        self.update_no_results(page, any_visible);
        any_visible
    }

    fn update_no_results(&self, page: &mut Page, any_visible: bool) {
        let Some(indicator) = page.find(selectors::NO_RESULTS) else {
            tracing::debug!("No {} element", selectors::NO_RESULTS);
            return;
        };
        let _ = page.tree_mut().set_hidden(indicator, any_visible);
    }
}

fn has_visible_result(tree: &DomTree) -> bool {
    let selector = Selector::class(class::RESULT);
    tree.descendants(NodeId::ROOT)
        .into_iter()
        .any(|id| tree.matches(id, &selector) && !tree.is_hidden(id))
}
