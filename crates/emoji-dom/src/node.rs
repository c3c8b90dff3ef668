//! DOM Node - Compact representation
//!
//! Tree links are stored as [`NodeId`]s into the arena instead of pointers.

use crate::{ClassList, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element-specific data
///
/// The `class` attribute and the [`ClassList`] are kept in sync: writes
/// through either one update the other.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    tag: String,
    attrs: Vec<Attribute>,
    classes: ClassList,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: ClassList::new(),
        }
    }

    /// Tag name (lowercase)
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// All attributes in insertion order
    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check whether an attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute, returns true if the stored value changed
    pub fn set_attr(&mut self, name: &str, value: &str) -> bool {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            self.classes.set_value(value);
        }

        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                if attr.value == value {
                    return false;
                }
                attr.value = value.to_string();
                return true;
            }
        }
        self.attrs.push(Attribute { name, value: value.to_string() });
        true
    }

    /// Element id attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Class tokens
    pub fn class_list(&self) -> &ClassList {
        &self.classes
    }

    /// Check for a class token
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add a class token, returns true if it was newly added
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.classes.contains(class) || class.is_empty() {
            return false;
        }
        self.classes.add(&[class]);
        self.sync_class_attr();
        true
    }

    /// Remove a class token, returns true if it was present
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.classes.contains(class) {
            return false;
        }
        self.classes.remove(&[class]);
        self.sync_class_attr();
        true
    }

    /// `hidden` flag (reflected as the boolean `hidden` attribute)
    pub fn is_hidden(&self) -> bool {
        self.has_attr("hidden")
    }

    /// Set the `hidden` flag, returns true if it changed
    pub fn set_hidden(&mut self, hidden: bool) -> bool {
        if hidden == self.is_hidden() {
            return false;
        }
        if hidden {
            self.attrs.push(Attribute { name: "hidden".to_string(), value: String::new() });
        } else {
            self.attrs.retain(|a| a.name != "hidden");
        }
        true
    }

    fn sync_class_attr(&mut self) {
        let value = self.classes.value();
        match self.attrs.iter_mut().find(|a| a.name == "class") {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute { name: "class".to_string(), value }),
        }
    }
}
