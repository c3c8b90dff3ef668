//! Integration tests - Full finder pipeline
//!
//! Dataset → incremental render → ready → search/navigation → interactions

use emoji_dom::{NodeId, Selector};
use emoji_finder::{
    Dataset, EmojiEntry, EmojiFinder, Event, FinderConfig, Key, KeyModifiers, ManualClock, MemoryClipboard,
    Page, Toasts,
};
use std::time::Duration;

fn sample() -> Dataset {
    [
        EmojiEntry::new("😀", "grinning face happy"),
        EmojiEntry::new("🐱", "cat face"),
    ]
    .into_iter()
    .collect()
}

fn numbered(n: usize) -> Dataset {
    (0..n)
        .map(|i| EmojiEntry::new(&format!("e{}", i), &format!("entry {}", i)))
        .collect()
}

fn config(url: &str, batch_size: usize) -> FinderConfig {
    let mut config = FinderConfig::default();
    config.navigation.page_url = url.to_string();
    config.render.batch_size = batch_size;
    config
}

fn booted(dataset: Dataset, url: &str) -> EmojiFinder {
    let mut finder = EmojiFinder::open(dataset, config(url, 100)).unwrap();
    finder.boot();
    finder.run_until_idle();
    finder
}

fn no_results_hidden(finder: &mut EmojiFinder) -> bool {
    let page = finder.page_mut();
    let id = page.find(".no-results").unwrap();
    page.tree().is_hidden(id)
}

fn result_for(finder: &EmojiFinder, emoji: &str) -> NodeId {
    let tree = finder.page().tree();
    tree.query_selector_all(tree.root(), &Selector::class("js-emoji-char"))
        .into_iter()
        .find(|&id| tree.get_attribute(id, "data-emoji") == Some(emoji))
        .unwrap()
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_renders_every_entry_then_ready_once() {
    let mut finder = EmojiFinder::open(numbered(250), config("https://emoji.local/", 100)).unwrap();
    finder.boot();

    let mut frames = 0;
    while finder.is_rendering() {
        assert!(!finder.is_ready(), "ready before the last batch");
        finder.on_frame();
        frames += 1;
    }

    assert_eq!(frames, 3);
    assert_eq!(finder.page().results().len(), 250);
    assert_eq!(finder.ready_count(), 1);

    // More frames never re-fire ready
    finder.on_frame();
    finder.on_frame();
    assert_eq!(finder.ready_count(), 1);
}

#[test]
fn test_reflows_per_batch() {
    for (n, batch) in [(1, 100), (100, 100), (101, 100), (7, 3), (10, 1)] {
        let mut finder = EmojiFinder::open(numbered(n), config("https://emoji.local/", batch)).unwrap();
        let before = finder.page().tree().reflow_count();
        finder.boot();
        finder.run_until_idle();

        // Batches plus the single removal of the loading indicator
        let expected = n.div_ceil(batch) as u64 + 1;
        assert_eq!(finder.page().tree().reflow_count() - before, expected, "n={} batch={}", n, batch);
    }
}

#[test]
fn test_empty_dataset_ready_at_boot() {
    let mut finder = EmojiFinder::open(Dataset::new(), config("https://emoji.local/", 100)).unwrap();
    finder.boot();

    assert!(!finder.is_rendering());
    assert_eq!(finder.ready_count(), 1);
    assert!(finder.page().results().is_empty());
    assert!(!no_results_hidden(&mut finder));
}

#[test]
fn test_cancelled_render_never_ready() {
    let mut finder = EmojiFinder::open(numbered(30), config("https://emoji.local/", 10)).unwrap();
    finder.boot();
    finder.on_frame();
    assert!(finder.cancel_render());

    for _ in 0..5 {
        finder.on_frame();
    }
    assert_eq!(finder.page().results().len(), 10);
    assert!(!finder.is_ready());
}

#[test]
fn test_detached_container_stops_render() {
    let mut finder = EmojiFinder::open(numbered(30), config("https://emoji.local/", 10)).unwrap();
    finder.boot();
    finder.on_frame();

    let page = finder.page_mut();
    let container = page.container().unwrap();
    page.tree_mut().remove(container).unwrap();

    finder.run_until_idle();
    assert!(!finder.is_ready());
}

#[test]
fn test_prerendered_page_is_detected() {
    let data = sample();
    let markup = emoji_html::results_markup(data.pairs());
    let html = emoji_html::inject_markup(emoji_html::PAGE_SHELL, &markup);
    let page = Page::from_html(&html, "https://emoji.local/#cat").unwrap();

    let mut finder = EmojiFinder::new(page, data, FinderConfig::default());
    finder.boot();

    assert!(!finder.is_rendering());
    assert!(finder.is_ready());
    assert_eq!(finder.page().results().len(), 2);
    assert_eq!(finder.page().visible_emojis(), vec!["🐱"]);
}

#[test]
fn test_typing_during_render_filters_new_nodes() {
    let data: Dataset = (0..20)
        .map(|i| {
            let keywords = if i % 2 == 0 { "cat" } else { "dog" };
            EmojiEntry::new(&format!("e{}", i), keywords)
        })
        .collect();
    let mut finder = EmojiFinder::open(data, config("https://emoji.local/", 5)).unwrap();
    finder.boot();
    finder.on_frame();

    finder.type_search("cat");
    finder.run_until_idle();

    assert_eq!(finder.page().visible_emojis().len(), 10);
    assert!(no_results_hidden(&mut finder));
}

// ============================================================================
// SEARCH
// ============================================================================

#[test]
fn test_search_scenario() {
    let mut finder = booted(sample(), "https://emoji.local/");

    finder.type_search("cat");
    assert_eq!(finder.page().visible_emojis(), vec!["🐱"]);
    assert!(no_results_hidden(&mut finder));

    finder.type_search("xyz");
    assert!(finder.page().visible_emojis().is_empty());
    assert!(!no_results_hidden(&mut finder));

    finder.type_search("");
    assert_eq!(finder.page().visible_emojis(), vec!["😀", "🐱"]);
    assert!(no_results_hidden(&mut finder));
}

#[test]
fn test_repeat_keyword_no_mutation() {
    let mut finder = booted(sample(), "https://emoji.local/");
    finder.type_search("cat");
    let visible = finder.page().visible_emojis();

    // Only the input event's filter pass is counted, not the typed value itself
    for text in ["cat", "cat ", " cat"] {
        finder.page_mut().set_input_value(text);
        let mutations = finder.page().tree().mutation_count();
        let input = finder.page_mut().search_input().unwrap();
        finder.dispatch(Event::input(input));
        assert_eq!(finder.page().tree().mutation_count(), mutations, "keyword {:?}", text);
    }
    assert_eq!(finder.page().visible_emojis(), visible);
    assert!(no_results_hidden(&mut finder));
}

#[test]
fn test_keyword_display_follows_search() {
    let mut finder = booted(sample(), "https://emoji.local/");
    finder.type_search("  zebra  ");

    let page = finder.page_mut();
    let keyword = page.find(".keyword").unwrap();
    assert_eq!(page.tree().text_content(keyword), "zebra");
}

// ============================================================================
// NAVIGATION
// ============================================================================

#[test]
fn test_hash_round_trip() {
    let mut finder = booted(sample(), "https://emoji.local/");
    finder.type_search("cat face");
    assert_eq!(finder.page().location().hash(), "#cat_face");

    finder.navigate("#grinning_face");
    assert_eq!(finder.page_mut().input_value(), "grinning face");
    assert_eq!(finder.page().visible_emojis(), vec!["😀"]);
}

#[test]
fn test_percent_encoded_hash() {
    let mut finder = booted(sample(), "https://emoji.local/#cat%20face");
    assert_eq!(finder.page_mut().input_value(), "cat face");
    assert_eq!(finder.page().visible_emojis(), vec!["🐱"]);
}

#[test]
fn test_typed_percent_survives_hash() {
    let dataset: Dataset = [
        EmojiEntry::new("🅰", "a button blood type"),
        EmojiEntry::new("💯", "hundred 100% points"),
    ]
    .into_iter()
    .collect();
    let mut finder = booted(dataset, "https://emoji.local/");

    finder.type_search("%41");
    assert_eq!(finder.page().location().hash(), "#%2541");
    assert_eq!(finder.page_mut().input_value(), "%41");
    assert!(finder.page().visible_emojis().is_empty());

    finder.type_search("100% points");
    assert_eq!(finder.page_mut().input_value(), "100% points");
    assert_eq!(finder.page().visible_emojis(), vec!["💯"]);

    assert!(finder.back());
    assert_eq!(finder.page_mut().input_value(), "%41");
}

#[test]
fn test_group_link_click() {
    let mut finder = booted(sample(), "https://emoji.local/");
    let face = finder.page().document().query_selector(".group[href=\"#face\"]").unwrap();

    finder.click(face);
    assert_eq!(finder.page_mut().input_value(), "face");
    assert_eq!(finder.page().location().hash(), "#face");
    assert!(finder.page().tree().element(face).unwrap().has_class("active"));
    assert_eq!(finder.page().visible_emojis().len(), 2);
}

#[test]
fn test_clear_search_button() {
    let mut finder = booted(sample(), "https://emoji.local/#cat");
    let clear = finder.page().document().query_selector(".js-clear-search").unwrap();

    finder.click(clear);
    assert_eq!(finder.page_mut().input_value(), "");
    assert_eq!(finder.page().location().hash(), "#cat");
}

#[test]
fn test_back_restores_previous_keyword() {
    let mut finder = booted(sample(), "https://emoji.local/");
    finder.type_search("cat");
    finder.type_search("happy");
    assert_eq!(finder.page().visible_emojis(), vec!["😀"]);

    assert!(finder.back());
    assert_eq!(finder.page_mut().input_value(), "cat");
    assert_eq!(finder.page().visible_emojis(), vec!["🐱"]);

    assert!(finder.forward());
    assert_eq!(finder.page_mut().input_value(), "happy");
}

// ============================================================================
// INTERACTIONS
// ============================================================================

#[test]
fn test_click_copies_and_notifies() {
    let clock = ManualClock::new();
    let clipboard = MemoryClipboard::new();
    let mut finder = EmojiFinder::open(sample(), config("https://emoji.local/", 100))
        .unwrap()
        .with_clipboard(clipboard.clone())
        .with_notifier(Toasts::new(Duration::from_millis(1000)))
        .with_clock(clock.clone());
    finder.boot();
    finder.run_until_idle();

    let target = result_for(&finder, "😀");
    finder.click(target);
    assert_eq!(clipboard.writes(), vec!["😀"]);
    assert_eq!(finder.page().alerts(), vec!["Copied 😀"]);

    clock.advance(Duration::from_millis(999));
    finder.tick();
    assert_eq!(finder.page().alerts().len(), 1);

    clock.advance(Duration::from_millis(1));
    finder.tick();
    assert!(finder.page().alerts().is_empty());
}

#[test]
fn test_copy_failure_is_swallowed() {
    let mut finder = EmojiFinder::open(sample(), config("https://emoji.local/", 100))
        .unwrap()
        .with_clipboard(MemoryClipboard::denying());
    finder.boot();
    finder.run_until_idle();

    let target = result_for(&finder, "🐱");
    finder.click(target);
    assert!(finder.page().alerts().is_empty());
}

#[test]
fn test_slash_focuses_search() {
    let mut finder = booted(sample(), "https://emoji.local/#cat");
    let input = finder.page_mut().search_input().unwrap();

    assert!(finder.press_key(Key::Character('/'), KeyModifiers::default()));
    assert_eq!(finder.page().focused(), Some(input));
    assert_eq!(finder.page().selection(), Some((0, 3)));
}

#[test]
fn test_slash_in_other_field_not_hijacked() {
    let mut finder = booted(sample(), "https://emoji.local/");
    let page = finder.page_mut();
    let textarea = page.tree_mut().create_element("textarea");
    let body = page.document().body();
    page.tree_mut().append_child(body, textarea).unwrap();
    page.focus(textarea);

    assert!(!finder.press_key(Key::Character('/'), KeyModifiers::default()));
    assert_eq!(finder.page().focused(), Some(textarea));
}

#[test]
fn test_scripted_session() {
    let mut finder = EmojiFinder::open(sample(), config("https://emoji.local/", 1)).unwrap();
    let mut events: std::collections::VecDeque<Event> = std::collections::VecDeque::new();
    events.push_back(Event::HashChange);
    finder.run(&mut events);

    assert!(finder.is_ready());
    assert_eq!(finder.page().results().len(), 2);
}
