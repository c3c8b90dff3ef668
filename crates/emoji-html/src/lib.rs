//! Emoji HTML
//!
//! HTML side of the emoji finder, built on html5ever:
//! - parsing the page shell into an [`emoji_dom::Document`]
//! - generating Result Node markup for a dataset
//! - injecting that markup into the shell at build time

mod inject;
mod markup;
mod parser;

pub use emoji_dom::Document;
pub use inject::{inject_markup, CONTAINER_MARKER};
pub use markup::{escape_html, result_markup, results_markup};
pub use parser::HtmlParser;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Default page shell: search input, navigation links, container and indicators
pub const PAGE_SHELL: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Emoji Finder</title>
</head>
<body>
  <header>
    <input type="search" class="speedy-filter" placeholder="Search emoji (press /)" autocomplete="off">
    <button type="button" class="js-clear-search">Clear</button>
    <nav>
      <a class="group" href="#face">Faces</a>
      <a class="group" href="#animal">Animals</a>
      <a class="group" href="#food">Food</a>
      <a class="group" href="#travel">Travel</a>
      <a class="group" href="#flag">Flags</a>
    </nav>
  </header>
  <main>
    <p class="loading">Loading emoji...</p>
    <ul class="emojis-container"></ul>
    <p class="no-results" hidden>No emoji found for "<span class="keyword"></span>"</p>
  </main>
</body>
</html>
"##;

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("DOM construction failed: {0}")]
    Dom(#[from] emoji_dom::DomError),
}
