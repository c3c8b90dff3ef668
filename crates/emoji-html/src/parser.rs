//! HTML5 Parser implementation
//!
//! Uses html5ever's built-in RcDom and converts it to our DOM format.

use crate::ParseError;
use emoji_dom::{Document, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document ({} bytes)", html.len());

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty();
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root)?;
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Convert an RcDom node (and its subtree) into our tree under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent)?;
                }
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                // Inter-element whitespace carries nothing for us
                if !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                tree.append_child(parent, id)?;

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id)?;
                }
            }
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
        }
        Ok(())
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PAGE_SHELL;

    #[test]
    fn test_parse_simple() {
        let doc = HtmlParser::new()
            .parse("<html><head><title>Test</title></head><body><p>Hello</p></body></html>")
            .unwrap();

        assert_eq!(doc.title(), "Test");
        let p = doc.query_selector("p").unwrap();
        assert_eq!(doc.tree().text_content(p), "Hello");
    }

    #[test]
    fn test_parse_fragment() {
        // Even fragments get wrapped in html/head/body by html5ever
        let doc = HtmlParser::new().parse("<div><span>Text</span></div>").unwrap();
        assert!(doc.body().is_valid());
        assert!(doc.query_selector("span").is_some());
    }

    #[test]
    fn test_parse_page_shell() {
        let doc = HtmlParser::new().parse(PAGE_SHELL).unwrap();

        for selector in [".speedy-filter", ".emojis-container", ".loading", ".no-results", ".keyword", ".js-clear-search"] {
            assert!(doc.query_selector(selector).is_some(), "missing {}", selector);
        }
        assert_eq!(doc.query_selector_all(".group").len(), 5);
        assert!(doc.query_selector(r##"[href="#face"]"##).is_some());
        assert!(doc.query_selector(r##"[href="#flag"]"##).is_some());
        assert!(PAGE_SHELL.trim_end().ends_with("</html>"));

        let no_results = doc.query_selector(".no-results").unwrap();
        assert!(doc.tree().is_hidden(no_results));
        let container = doc.query_selector(".emojis-container").unwrap();
        assert_eq!(doc.tree().child_element_count(container), 0);
    }
}
