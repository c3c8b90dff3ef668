//! Composition root
//!
//! Owns the page, the dataset and every service, wires the handlers to
//! their events and drives rendering one frame at a time.

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::FinderConfig;
use crate::events::{Event, EventSource, EventType, Handler, Key, KeyModifiers, KeyboardEvent, Listeners};
use crate::interaction;
use crate::navigation;
use crate::notify::{Notifier, Toasts};
use crate::page::Page;
use crate::renderer::{self, RenderStart, RenderStep, RenderTask};
use crate::search::{SearchEngine, SearchState};
use crate::selectors;
use crate::timers::{Clock, SystemClock};
use crate::FinderError;
use emoji_data::Dataset;
use emoji_dom::NodeId;
use std::collections::VecDeque;

/// Emoji finder for one page and one dataset
pub struct EmojiFinder {
    page: Page,
    dataset: Dataset,
    config: FinderConfig,
    search: SearchEngine,
    render: Option<RenderTask>,
    listeners: Listeners,
    /// Events raised by handlers, delivered once the current one returns
    queue: VecDeque<Event>,
    clipboard: Box<dyn Clipboard>,
    notifier: Box<dyn Notifier>,
    clock: Box<dyn Clock>,
    booted: bool,
    ready_count: usize,
}

impl EmojiFinder {
    /// Create a finder over an already loaded page
    pub fn new(page: Page, dataset: Dataset, config: FinderConfig) -> Self {
        let notifier = Toasts::new(config.notifications.duration());
        Self {
            page,
            dataset,
            config,
            search: SearchEngine::new(),
            render: None,
            listeners: Listeners::new(),
            queue: VecDeque::new(),
            clipboard: Box::new(MemoryClipboard::new()),
            notifier: Box::new(notifier),
            clock: Box::new(SystemClock),
            booted: false,
            ready_count: 0,
        }
    }

    /// Open the default page shell at the configured URL
    pub fn open(dataset: Dataset, config: FinderConfig) -> Result<Self, FinderError> {
        config.validate()?;
        let page = Page::shell(&config.navigation.page_url)?;
        Ok(Self::new(page, dataset, config))
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn is_rendering(&self) -> bool {
        self.render.is_some()
    }

    /// Whether the ready signal has fired
    pub fn is_ready(&self) -> bool {
        self.ready_count > 0
    }

    /// How many times the ready signal fired (never more than once)
    pub fn ready_count(&self) -> usize {
        self.ready_count
    }

    /// Register handlers and start rendering
    ///
    /// An empty dataset or a pre-rendered container signals ready right
    /// away; otherwise batches run on [`on_frame`](Self::on_frame).
    pub fn boot(&mut self) {
        if self.booted {
            return;
        }
        self.booted = true;
        self.register_listeners();

        match renderer::start(&mut self.page, &self.dataset, self.config.render.batch_size) {
            RenderStart::NoContainer => {}
            RenderStart::PreRendered | RenderStart::Empty => self.finish_render(),
            RenderStart::Scheduled(task) => self.render = Some(task),
        }
        self.drain();
    }

    fn register_listeners(&mut self) {
        self.listeners.register(EventType::Click, Handler::CopyEmoji);
        self.listeners.register(EventType::KeyDown, Handler::FocusSearch);
        if let Some(input) = self.page.search_input() {
            self.listeners.register_on(input, EventType::Input, Handler::HashFromInput);
        }
        self.listeners.register(EventType::HashChange, Handler::SearchFromHash);
        self.listeners.register(EventType::Click, Handler::NavigationClick);
        self.listeners.register(EventType::Ready, Handler::SearchFromHash);
        tracing::debug!("Registered {} listeners", self.listeners.len());
    }

    /// Run one frame: attach the next render batch and expire notifications
    pub fn on_frame(&mut self) -> Option<RenderStep> {
        let step = match self.render.as_mut() {
            Some(task) => Some(task.step(self.page.tree_mut(), &self.dataset, self.search.state())),
            None => None,
        };

        match step {
            Some(RenderStep::Done { .. }) => {
                self.render = None;
                self.finish_render();
                self.drain();
            }
            Some(RenderStep::Cancelled) => self.render = None,
            _ => {}
        }
        self.tick();
        step
    }

    /// Run frames until rendering is over
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.render.is_some() {
            self.on_frame();
            frames += 1;
        }
        frames
    }

    /// Stop an in-flight render; ready will not fire
    pub fn cancel_render(&mut self) -> bool {
        match self.render.take() {
            Some(mut task) => {
                task.cancel();
                true
            }
            None => false,
        }
    }

    fn finish_render(&mut self) {
        if let Some(loading) = self.page.find(selectors::LOADING) {
            let _ = self.page.tree_mut().remove(loading);
        }
        self.search.refresh_no_results(&mut self.page);
        self.ready_count += 1;
        tracing::info!("{} ({} emojis)", selectors::READY_EVENT, self.dataset.len());
        self.queue.push_back(Event::Ready);
    }

    /// Deliver an event and everything it triggers
    ///
    /// Returns the event as the handlers left it (see
    /// [`Event::is_default_prevented`]).
    pub fn dispatch(&mut self, event: Event) -> Event {
        let mut event = event;
        self.handle(&mut event);
        self.drain();
        event
    }

    /// Pull events from `source`, one per frame, until it runs dry and
    /// rendering is over
    pub fn run(&mut self, source: &mut dyn EventSource) {
        self.boot();
        loop {
            let event = source.next_event();
            let idle = event.is_none() && self.render.is_none();
            if let Some(event) = event {
                self.dispatch(event);
            }
            if idle {
                break;
            }
            self.on_frame();
        }
    }

    /// Expire due notifications
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.notifier.tick(&mut self.page, now);
    }

    fn drain(&mut self) {
        while let Some(mut event) = self.queue.pop_front() {
            self.handle(&mut event);
        }
    }

    fn handle(&mut self, event: &mut Event) {
        for handler in self.listeners.handlers_for(event) {
            self.run_handler(handler, event);
        }
    }

    fn run_handler(&mut self, handler: Handler, event: &mut Event) {
        match (handler, event) {
            (Handler::CopyEmoji, Event::Click(click)) => {
                let now = self.clock.now();
                interaction::copy_emoji(
                    &mut self.page,
                    self.clipboard.as_mut(),
                    self.notifier.as_mut(),
                    click.target,
                    now,
                );
            }
            (Handler::NavigationClick, Event::Click(click)) => {
                navigation::handle_click(&mut self.page, &mut self.search, &mut self.queue, click.target);
            }
            (Handler::FocusSearch, Event::KeyDown(key)) => {
                interaction::focus_search(&mut self.page, key);
            }
            (Handler::HashFromInput, Event::Input(_)) => {
                navigation::update_hash_from_input(&mut self.page, &mut self.queue);
            }
            (Handler::SearchFromHash, Event::HashChange | Event::Ready) => {
                navigation::search_from_hash(&mut self.page, &mut self.search);
            }
            (handler, event) => {
                tracing::debug!("{:?} ignores {:?}", handler, event.event_type());
            }
        }
    }

    // Host conveniences

    /// Replace the search input's text as if typed, then fire `input`
    pub fn type_search(&mut self, text: &str) {
        let Some(input) = self.page.search_input() else {
            tracing::debug!("No search input to type into");
            return;
        };
        self.page.set_input_value(text);
        self.dispatch(Event::input(input));
    }

    pub fn click(&mut self, target: NodeId) {
        self.dispatch(Event::click(target));
    }

    /// Press a key at the focused node; returns true if it was taken
    pub fn press_key(&mut self, key: Key, modifiers: KeyModifiers) -> bool {
        let event = KeyboardEvent::new(key, self.page.focused()).with_modifiers(modifiers);
        self.dispatch(Event::KeyDown(event)).is_default_prevented()
    }

    /// Navigate to a new hash as if edited in the address bar
    pub fn navigate(&mut self, hash: &str) {
        if self.page.location_mut().set_hash(hash) {
            self.dispatch(Event::HashChange);
        }
    }

    pub fn back(&mut self) -> bool {
        let changed = self.page.location_mut().back();
        if changed {
            self.dispatch(Event::HashChange);
        }
        changed
    }

    pub fn forward(&mut self) -> bool {
        let changed = self.page.location_mut().forward();
        if changed {
            self.dispatch(Event::HashChange);
        }
        changed
    }
}
