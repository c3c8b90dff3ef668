//! DOM Node Operations
//!
//! Error type for tree mutations and the off-tree fragment used for bulk
//! insertion.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type for the operation
    #[error("Invalid node type")]
    InvalidNodeType,
}

/// Document fragment - lightweight container
///
/// Nodes collected here are built off-tree and attached to a parent in a
/// single operation by [`DomTree::append_fragment`](crate::DomTree::append_fragment).
#[derive(Debug, Clone, Default)]
pub struct DocumentFragment {
    pub children: Vec<NodeId>,
}

impl DocumentFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { children: Vec::with_capacity(capacity) }
    }

    pub fn append(&mut self, node: NodeId) {
        self.children.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Take all children (clears fragment)
    pub fn take_children(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.children)
    }
}
