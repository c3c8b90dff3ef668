//! Incremental renderer
//!
//! Builds one Result Node per dataset entry, a batch per frame. Each batch
//! is assembled off-tree in a [`DocumentFragment`] and attached to the
//! container in a single operation.

use crate::page::Page;
use crate::search::SearchState;
use crate::selectors::{self, class};
use emoji_data::{Dataset, EmojiEntry};
use emoji_dom::{DocumentFragment, DomResult, DomTree, NodeId};

/// How rendering starts for a page
#[derive(Debug)]
pub enum RenderStart {
    /// No container on the page
    NoContainer,
    /// The container already holds results
    PreRendered,
    /// Nothing to render
    Empty,
    /// Batches to run, one per frame
    Scheduled(RenderTask),
}

/// Result of one frame of rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    Progress { rendered: usize, total: usize },
    Done { total: usize },
    Cancelled,
}

/// Decide how to render `dataset` into the page's container
pub fn start(page: &mut Page, dataset: &Dataset, batch_size: usize) -> RenderStart {
    let Some(container) = page.container() else {
        tracing::warn!("No {} element, nothing rendered", selectors::EMOJI_CONTAINER);
        return RenderStart::NoContainer;
    };

    let existing = page.tree().child_element_count(container);
    if existing > 0 {
        tracing::info!("Container already holds {} results, skipping render", existing);
        return RenderStart::PreRendered;
    }
    if dataset.is_empty() {
        return RenderStart::Empty;
    }

    let task = RenderTask::new(container, dataset.len(), batch_size);
    tracing::info!(
        "Rendering {} emojis in {} batches",
        dataset.len(),
        task.remaining_batches()
    );
    RenderStart::Scheduled(task)
}

/// Resumable, cancellable batch render
#[derive(Debug, Clone)]
pub struct RenderTask {
    container: NodeId,
    cursor: usize,
    total: usize,
    batch_size: usize,
    cancelled: bool,
}

impl RenderTask {
    /// A zero batch size is treated as one
    pub fn new(container: NodeId, total: usize, batch_size: usize) -> Self {
        Self {
            container,
            cursor: 0,
            total,
            batch_size: batch_size.max(1),
            cancelled: false,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Entries attached so far
    pub fn rendered(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.total
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn remaining_batches(&self) -> usize {
        (self.total - self.cursor.min(self.total)).div_ceil(self.batch_size)
    }

    /// Stop before the next batch
    pub fn cancel(&mut self) {
        if !self.cancelled && !self.is_finished() {
            tracing::debug!("Render cancelled at {}/{}", self.cursor, self.total);
        }
        self.cancelled = true;
    }

    /// Attach the next batch
    ///
    /// New nodes start hidden when `search` already rules them out. A
    /// container that left the document cancels the task.
    pub fn step(&mut self, tree: &mut DomTree, dataset: &Dataset, search: &SearchState) -> RenderStep {
        if self.cancelled {
            return RenderStep::Cancelled;
        }
        if self.is_finished() {
            return RenderStep::Done { total: self.total };
        }
        if !tree.is_connected(self.container) {
            tracing::warn!("Container detached, cancelling render");
            self.cancel();
            return RenderStep::Cancelled;
        }

        let end = (self.cursor + self.batch_size).min(self.total);
        let batch = dataset.slice(self.cursor, end);
        let mut fragment = DocumentFragment::with_capacity(batch.len());
        for entry in batch {
            let hidden = !search.matches(&entry.keywords);
            fragment.append(build_result(tree, entry, hidden));
        }

        if let Err(e) = tree.append_fragment(self.container, &mut fragment) {
            tracing::warn!("Failed to attach batch: {}", e);
            self.cancel();
            return RenderStep::Cancelled;
        }
        self.cursor = end;

        if self.is_finished() {
            tracing::debug!("Rendered {} emojis", self.total);
            RenderStep::Done { total: self.total }
        } else {
            RenderStep::Progress { rendered: self.cursor, total: self.total }
        }
    }
}

/// Build a detached Result Node
///
/// `<li class="result emoji-wrapper js-emoji" title=keywords>` around
/// `<div class="js-emoji-char native-emoji" data-emoji=emoji>emoji</div>`.
pub fn build_result(tree: &mut DomTree, entry: &EmojiEntry, hidden: bool) -> NodeId {
    let item = tree.create_element("li");
    let glyph = tree.create_element("div");
    let text = tree.create_text(&entry.character);

    // Fresh detached nodes: attribute writes and appends cannot fail
    let _ = fill_result(tree, item, glyph, text, entry, hidden);
    item
}

fn fill_result(
    tree: &mut DomTree,
    item: NodeId,
    glyph: NodeId,
    text: NodeId,
    entry: &EmojiEntry,
    hidden: bool,
) -> DomResult<()> {
    tree.set_attribute(item, "class", &format!("{} emoji-wrapper {}", class::RESULT, class::EMOJI))?;
    tree.set_attribute(item, "title", &entry.keywords)?;
    if hidden {
        tree.set_hidden(item, true)?;
    }
    tree.set_attribute(glyph, "class", &format!("{} native-emoji", class::EMOJI_CHAR))?;
    tree.set_attribute(glyph, "data-emoji", &entry.character)?;
    tree.append_child(glyph, text)?;
    tree.append_child(item, glyph)?;
    Ok(())
}
