//! DOM Tree (arena-based allocation)
//!
//! Besides storage, the tree keeps two counters that stand in for the cost
//! model of a real page: `mutations` counts attribute/text writes that changed
//! something, `reflows` counts insertions/removals on connected nodes.

use crate::{DocumentFragment, DomError, DomResult, ElementData, Node, NodeData, NodeId, Selector};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    mutations: u64,
    reflows: u64,
}

impl DomTree {
    /// Create a tree containing only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            mutations: 0,
            reflows: 0,
        }
    }

    /// Root (document) node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data for a node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree holds nothing but the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Attribute/text writes that changed the tree
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    /// Structural changes to the connected tree
    pub fn reflow_count(&self) -> u64 {
        self.reflows
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text))
    }

    /// Whether `id` is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(node) = self.get(current) {
            if current == NodeId::ROOT {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Number of element children
    pub fn child_element_count(&self, id: NodeId) -> usize {
        self.children(id).filter(|(_, n)| n.is_element()).count()
    }

    /// All descendants in document order (excluding `id` itself)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();

        while let Some(current) = stack.pop() {
            out.push(current);
            let start = stack.len();
            stack.extend(self.children(current).map(|(c, _)| c));
            stack[start..].reverse();
        }
        out
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound)?;
        if self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if parent_node.as_text().is_some() || matches!(parent_node.data, NodeData::Comment(_)) {
            return Err(DomError::InvalidNodeType);
        }
        // Inserting an ancestor (or the node itself) would create a cycle
        let mut current = parent;
        while current.is_valid() {
            if current == child {
                return Err(DomError::HierarchyRequest);
            }
            current = self.get(current).map(|n| n.parent).unwrap_or(NodeId::NONE);
        }
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };
        if !parent.is_valid() {
            return;
        }

        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let last = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if let Some(prev) = self.get_mut(last) {
            prev.next_sibling = child;
        }
        if let Some(p) = self.get_mut(parent) {
            if !p.first_child.is_valid() {
                p.first_child = child;
            }
            p.last_child = child;
        }
    }

    /// Append a child node, moving it if already attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        self.unlink(child);
        self.link_last(parent, child);
        if self.is_connected(parent) {
            self.reflows += 1;
        }
        Ok(child)
    }

    /// Append every node of a fragment in order as one structural change
    pub fn append_fragment(&mut self, parent: NodeId, fragment: &mut DocumentFragment) -> DomResult<usize> {
        for &child in &fragment.children {
            self.check_insert(parent, child)?;
        }
        let children = fragment.take_children();
        for &child in &children {
            self.unlink(child);
            self.link_last(parent, child);
        }
        if !children.is_empty() && self.is_connected(parent) {
            self.reflows += 1;
        }
        Ok(children.len())
    }

    /// Detach a node from its parent; the node stays in the arena
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        let parent = self.get(id).ok_or(DomError::NotFound)?.parent;
        if !parent.is_valid() {
            return Ok(());
        }
        let connected = self.is_connected(parent);
        self.unlink(id);
        if connected {
            self.reflows += 1;
        }
        Ok(())
    }

    /// Remove every child of a node
    pub fn clear_children(&mut self, id: NodeId) -> DomResult<()> {
        let children: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        if children.is_empty() {
            return Ok(());
        }
        let connected = self.is_connected(id);
        for child in children {
            self.unlink(child);
        }
        if connected {
            self.reflows += 1;
        }
        Ok(())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if self.text_content(id) == text {
            return Ok(());
        }
        // A lone text child is rewritten in place instead of reallocated
        let first = self.get(id).ok_or(DomError::NotFound)?.first_child;
        if !text.is_empty() {
            if let Some(node) = self.get_mut(first) {
                if node.next_sibling == NodeId::NONE {
                    if let NodeData::Text(content) = &mut node.data {
                        content.clear();
                        content.push_str(text);
                        self.mutations += 1;
                        return Ok(());
                    }
                }
            }
        }
        self.clear_children(id)?;
        if !text.is_empty() {
            let node = self.create_text(text);
            self.link_last(id, node);
        }
        self.mutations += 1;
        Ok(())
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.get_mut(id)
            .ok_or(DomError::NotFound)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)
    }

    /// Get an attribute of an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Set an attribute, returns true if the value changed
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<bool> {
        let changed = self.element_mut(id)?.set_attr(name, value);
        if changed {
            self.mutations += 1;
        }
        Ok(changed)
    }

    /// Add a class token, returns true if it was newly added
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        let changed = self.element_mut(id)?.add_class(class);
        if changed {
            self.mutations += 1;
        }
        Ok(changed)
    }

    /// Remove a class token, returns true if it was present
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        let changed = self.element_mut(id)?.remove_class(class);
        if changed {
            self.mutations += 1;
        }
        Ok(changed)
    }

    /// Element `hidden` flag; non-elements are never hidden
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(ElementData::is_hidden)
    }

    /// Set the `hidden` flag, returns true if it changed
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> DomResult<bool> {
        let changed = self.element_mut(id)?.set_hidden(hidden);
        if changed {
            self.mutations += 1;
        }
        Ok(changed)
    }

    /// Check an element against a selector
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id).is_some_and(|e| selector.matches(e))
    }

    /// First descendant element matching the selector
    pub fn query_selector(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(root).into_iter().find(|&id| self.matches(id, selector))
    }

    /// All descendant elements matching the selector, in document order
    pub fn query_selector_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.matches(id, selector))
            .collect()
    }

    /// Closest inclusive ancestor matching the selector
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = id;
        while current.is_valid() {
            if self.matches(current, selector) {
                return Some(current);
            }
            current = self.get(current)?.parent;
        }
        None
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
