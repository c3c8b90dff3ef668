//! Interaction handlers: click-to-copy and the `/` shortcut

use crate::clipboard::Clipboard;
use crate::events::{Key, KeyboardEvent};
use crate::notify::{copied_message, Notifier};
use crate::page::Page;
use crate::selectors::class;
use emoji_dom::{DomTree, NodeId, Selector};
use std::time::Instant;

/// The emoji a node belongs to
///
/// Walks up to the closest `.js-emoji`, takes its `.js-emoji-char` (or the
/// `.js-emoji` element itself when it has none) and reads `data-emoji`,
/// falling back to the text content. Empty payloads yield `None`.
pub fn emoji_at(tree: &DomTree, node: NodeId) -> Option<String> {
    let wrapper = tree.closest(node, &Selector::class(class::EMOJI))?;
    let payload_node = if tree.matches(wrapper, &Selector::class(class::EMOJI_CHAR)) {
        wrapper
    } else {
        tree.query_selector(wrapper, &Selector::class(class::EMOJI_CHAR))
            .unwrap_or(wrapper)
    };

    let payload = match tree.get_attribute(payload_node, "data-emoji") {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => tree.text_content(payload_node).trim().to_string(),
    };
    (!payload.is_empty()).then_some(payload)
}

/// Copy the emoji under a click and confirm with a notification
///
/// Returns the copied emoji. Clicks outside any emoji are ignored and a
/// failed copy is only logged.
pub fn copy_emoji(
    page: &mut Page,
    clipboard: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
    target: NodeId,
    now: Instant,
) -> Option<String> {
    let emoji = emoji_at(page.tree(), target)?;

    match clipboard.write_text(&emoji) {
        Ok(()) => {
            tracing::info!("Copied {}", emoji);
            notifier.notify(page, &copied_message(&emoji), now);
            Some(emoji)
        }
        Err(e) => {
            tracing::warn!("Failed to copy {}: {}", emoji, e);
            None
        }
    }
}

/// Whether typing into `node` should be left alone
pub fn is_editable(tree: &DomTree, node: NodeId) -> bool {
    let Some(elem) = tree.element(node) else {
        return false;
    };
    match elem.tag() {
        "textarea" => return true,
        "input" => {
            let kind = elem.get_attr("type").unwrap_or("text").to_ascii_lowercase();
            return !matches!(
                kind.as_str(),
                "button" | "submit" | "reset" | "checkbox" | "radio" | "image" | "file" | "hidden"
            );
        }
        _ => {}
    }

    // contenteditable is inherited until an ancestor says otherwise
    let mut current = Some(node);
    while let Some(id) = current {
        if let Some(value) = tree.get_attribute(id, "contenteditable") {
            return !value.eq_ignore_ascii_case("false");
        }
        current = tree.parent(id);
    }
    false
}

/// `/` moves focus to the search input and selects its text
///
/// Ignored with Ctrl, Alt or Meta held, and when another editable field has
/// focus. Returns true when the key was taken.
pub fn focus_search(page: &mut Page, event: &mut KeyboardEvent) -> bool {
    if event.key != Key::Character('/') || event.modifiers.has_command() {
        return false;
    }
    let Some(input) = page.search_input() else {
        return false;
    };
    if let Some(target) = event.target {
        if target != input && is_editable(page.tree(), target) {
            return false;
        }
    }

    page.focus(input);
    let value = page.input_value();
    if !value.is_empty() {
        page.set_selection(0, value.chars().count());
    }
    event.prevent_default();
    tracing::debug!("Search input focused by shortcut");
    true
}
