//! Events
//!
//! The synthetic events a host delivers to the finder, the source trait
//! hosts implement, and the listener registry that routes each event type
//! to its handlers.

use emoji_dom::NodeId;
use std::collections::{HashMap, VecDeque};

/// Event types the finder listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    Input,
    HashChange,
    /// All Result Nodes exist (`emoji:ready`)
    Ready,
}

/// A delivered event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click(ClickEvent),
    KeyDown(KeyboardEvent),
    Input(InputEvent),
    HashChange,
    Ready,
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::Click(_) => EventType::Click,
            Event::KeyDown(_) => EventType::KeyDown,
            Event::Input(_) => EventType::Input,
            Event::HashChange => EventType::HashChange,
            Event::Ready => EventType::Ready,
        }
    }

    /// Node the event was dispatched at, if any
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Event::Click(e) => Some(e.target),
            Event::KeyDown(e) => e.target,
            Event::Input(e) => Some(e.target),
            Event::HashChange | Event::Ready => None,
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        match self {
            Event::KeyDown(e) => e.default_prevented(),
            _ => false,
        }
    }

    pub fn click(target: NodeId) -> Self {
        Event::Click(ClickEvent { target })
    }

    pub fn input(target: NodeId) -> Self {
        Event::Input(InputEvent { target })
    }
}

/// Mouse click on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub target: NodeId,
}

/// The value of a text field changed; the new value is already in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub target: NodeId,
}

/// Key value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Space,
    Unidentified(String),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    /// Ctrl, Alt or Meta held (Shift alone still types a character)
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: KeyModifiers,
    /// Focused node when the key was pressed
    pub target: Option<NodeId>,
    default_prevented: bool,
}

impl KeyboardEvent {
    pub fn new(key: Key, target: Option<NodeId>) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::default(),
            target,
            default_prevented: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Where a host's events come from
pub trait EventSource {
    /// Next pending event, `None` when the source is exhausted
    fn next_event(&mut self) -> Option<Event>;
}

/// Pre-recorded event sequence
#[derive(Debug, Default, Clone)]
pub struct ScriptedEvents {
    events: VecDeque<Event>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) -> &mut Self {
        self.events.push_back(event);
        self
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<Event> for ScriptedEvents {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }
}

impl EventSource for VecDeque<Event> {
    fn next_event(&mut self) -> Option<Event> {
        self.pop_front()
    }
}

/// The finder's event handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Copy the clicked emoji
    CopyEmoji,
    /// `/` focuses the search input
    FocusSearch,
    /// Group link and clear-search clicks
    NavigationClick,
    /// Search input → hash
    HashFromInput,
    /// Hash → search input and filter
    SearchFromHash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Listener {
    handler: Handler,
    /// Only fire for events at this node; `None` listens document-wide
    target: Option<NodeId>,
}

/// Listener registry keyed by event type
#[derive(Debug, Default, Clone)]
pub struct Listeners {
    listeners: HashMap<EventType, Vec<Listener>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen document-wide; returns false for a duplicate registration
    pub fn register(&mut self, event_type: EventType, handler: Handler) -> bool {
        self.add(event_type, Listener { handler, target: None })
    }

    /// Listen for events dispatched at one node
    pub fn register_on(&mut self, target: NodeId, event_type: EventType, handler: Handler) -> bool {
        self.add(event_type, Listener { handler, target: Some(target) })
    }

    fn add(&mut self, event_type: EventType, listener: Listener) -> bool {
        let list = self.listeners.entry(event_type).or_default();
        if list.contains(&listener) {
            return false;
        }
        list.push(listener);
        true
    }

    /// Handlers to run for an event, in registration order
    pub fn handlers_for(&self, event: &Event) -> Vec<Handler> {
        let target = event.target();
        self.listeners
            .get(&event.event_type())
            .map(|list| {
                list.iter()
                    .filter(|l| l.target.is_none() || l.target == target)
                    .map(|l| l.handler)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
