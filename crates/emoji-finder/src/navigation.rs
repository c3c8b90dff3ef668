//! Navigation synchronizer
//!
//! Keeps the URL hash, the search input and the active navigation links in
//! agreement. Hash writes that change the value queue a
//! [`Event::HashChange`] for the caller to deliver after the current
//! handler returns.

use crate::events::Event;
use crate::location::{decode_hash, encode_keyword};
use crate::page::Page;
use crate::search::SearchEngine;
use crate::selectors::{self, class};
use emoji_dom::NodeId;
use std::collections::VecDeque;

/// What a click did to the navigation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Group link followed with this keyword
    Group(String),
    /// Search input cleared
    Cleared,
    Ignored,
}

/// Apply the keyword carried by the hash to the input, the filter and the
/// active links
pub fn search_from_hash(page: &mut Page, search: &mut SearchEngine) {
    let keyword = decode_hash(&page.location().hash());
    page.set_input_value(&keyword);
    search.search(page, &keyword);
    update_active_links(page);
}

/// Write the search input's value into the hash
///
/// Returns true when the hash changed.
pub fn update_hash_from_input(page: &mut Page, queue: &mut VecDeque<Event>) -> bool {
    if page.search_input().is_none() {
        return false;
    }
    let hash = encode_keyword(&page.input_value());
    assign_hash(page, &hash, queue)
}

/// Group link and clear-search clicks
pub fn handle_click(
    page: &mut Page,
    search: &mut SearchEngine,
    queue: &mut VecDeque<Event>,
    target: NodeId,
) -> ClickAction {
    if page.search_input().is_none() {
        return ClickAction::Ignored;
    }
    let Some(element) = element_of(page, target) else {
        return ClickAction::Ignored;
    };
    let Some(data) = page.tree().element(element) else {
        return ClickAction::Ignored;
    };

    if data.has_class(class::GROUP) {
        let href = data.get_attr("href").unwrap_or("");
        let fragment = match href.find('#') {
            Some(pos) => href[pos + 1..].to_string(),
            None => href.to_string(),
        };
        let keyword = decode_hash(&fragment);
        tracing::debug!("Group link {:?}", keyword);

        page.set_input_value(&keyword);
        search.search(page, &keyword);
        assign_hash(page, &fragment, queue);
        ClickAction::Group(keyword)
    } else if data.has_class(class::CLEAR_SEARCH) {
        page.set_input_value("");
        ClickAction::Cleared
    } else {
        ClickAction::Ignored
    }
}

/// Mark the link pointing at the current hash as active
///
/// Every `.active[href^="#"]` loses the class first; the first in-page link
/// whose `href` decodes to the same keyword as the hash gains it.
pub fn update_active_links(page: &mut Page) {
    let hash = page.location().hash();

    let active = page.document().query_selector_all(selectors::ACTIVE_LINKS);
    for link in active {
        let _ = page.tree_mut().remove_class(link, class::ACTIVE);
    }
    if hash.is_empty() {
        return;
    }

    let keyword = decode_hash(&hash);
    let tree = page.tree();
    let current = tree.descendants(tree.root()).into_iter().find(|&id| {
        tree.get_attribute(id, "href")
            .is_some_and(|href| href.starts_with('#') && decode_hash(href) == keyword)
    });
    if let Some(link) = current {
        let _ = page.tree_mut().add_class(link, class::ACTIVE);
    }
}

fn assign_hash(page: &mut Page, hash: &str, queue: &mut VecDeque<Event>) -> bool {
    let changed = page.location_mut().set_hash(hash);
    if changed {
        queue.push_back(Event::HashChange);
    }
    changed
}

/// Clicks on text land on the enclosing element
fn element_of(page: &Page, target: NodeId) -> Option<NodeId> {
    let tree = page.tree();
    if tree.element(target).is_some() {
        Some(target)
    } else {
        tree.parent(target).filter(|&p| tree.element(p).is_some())
    }
}
