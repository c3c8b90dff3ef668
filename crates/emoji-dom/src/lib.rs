//! Emoji DOM - Document Object Model
//!
//! Arena-backed DOM tree for a single headless page. Nodes are addressed by
//! [`NodeId`] and never freed; detached nodes simply lose their parent link.

mod classlist;
mod document;
mod node;
mod operations;
mod selector;
mod tree;

pub use classlist::ClassList;
pub use document::Document;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use operations::{DocumentFragment, DomError, DomResult};
pub use selector::{AttrMatch, Selector, SelectorError};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
