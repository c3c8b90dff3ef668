//! Simple selectors
//!
//! Compound selectors without combinators: an optional tag (or `*`) followed
//! by any number of `.class`, `#id`, `[attr]`, `[attr=value]` and
//! `[attr^=value]` parts. Enough for `querySelector`, `closest` and
//! `matches` on the finder page.

use crate::ElementData;
use std::str::FromStr;

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {ch:?} at {pos}")]
    Unexpected { ch: char, pos: usize },

    #[error("unterminated attribute selector")]
    UnterminatedAttribute,

    #[error("unterminated string")]
    UnterminatedString,
}

/// Attribute condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    /// `[name]`
    Exists(String),
    /// `[name=value]`
    Equals(String, String),
    /// `[name^=value]`
    Prefix(String, String),
}

impl AttrMatch {
    fn matches(&self, elem: &ElementData) -> bool {
        match self {
            Self::Exists(name) => elem.has_attr(name),
            Self::Equals(name, value) => elem.get_attr(name) == Some(value.as_str()),
            // An empty prefix never matches, as in CSS
            Self::Prefix(name, value) => !value.is_empty()
                && elem.get_attr(name).is_some_and(|v| v.starts_with(value.as_str())),
        }
    }
}

/// Compound selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Selector {
    /// Selector matching a single class
    pub fn class(name: &str) -> Self {
        Self { classes: vec![name.to_string()], ..Default::default() }
    }

    /// Selector matching a tag name
    pub fn tag(name: &str) -> Self {
        Self { tag: Some(name.to_ascii_lowercase()), ..Default::default() }
    }

    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        let chars: Vec<char> = input.chars().collect();
        let mut selector = Selector::default();
        let mut pos = 0;

        if chars[0] == '*' {
            pos = 1;
        } else if is_ident_char(chars[0]) {
            let tag = read_ident(&chars, &mut pos);
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        while pos < chars.len() {
            match chars[pos] {
                '.' => {
                    pos += 1;
                    let class = read_ident(&chars, &mut pos);
                    if class.is_empty() {
                        return Err(unexpected(&chars, pos));
                    }
                    selector.classes.push(class);
                }
                '#' => {
                    pos += 1;
                    let id = read_ident(&chars, &mut pos);
                    if id.is_empty() {
                        return Err(unexpected(&chars, pos));
                    }
                    selector.id = Some(id);
                }
                '[' => {
                    pos += 1;
                    selector.attrs.push(read_attr(&chars, &mut pos)?);
                }
                ch => return Err(SelectorError::Unexpected { ch, pos }),
            }
        }

        Ok(selector)
    }

    /// Check an element against this selector
    pub fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if elem.tag() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| elem.has_class(c))
            && self.attrs.iter().all(|a| a.matches(elem))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn unexpected(chars: &[char], pos: usize) -> SelectorError {
    match chars.get(pos) {
        Some(&ch) => SelectorError::Unexpected { ch, pos },
        None => SelectorError::Empty,
    }
}

fn read_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn skip_ws(chars: &[char], pos: &mut usize) {
    while *pos < chars.len() && chars[*pos].is_whitespace() {
        *pos += 1;
    }
}

fn read_attr(chars: &[char], pos: &mut usize) -> Result<AttrMatch, SelectorError> {
    skip_ws(chars, pos);
    let name = read_ident(chars, pos).to_ascii_lowercase();
    if name.is_empty() {
        return Err(unexpected(chars, *pos));
    }
    skip_ws(chars, pos);

    let prefix = match chars.get(*pos) {
        Some(']') => {
            *pos += 1;
            return Ok(AttrMatch::Exists(name));
        }
        Some('=') => {
            *pos += 1;
            false
        }
        Some('^') if chars.get(*pos + 1) == Some(&'=') => {
            *pos += 2;
            true
        }
        Some(_) => return Err(unexpected(chars, *pos)),
        None => return Err(SelectorError::UnterminatedAttribute),
    };

    skip_ws(chars, pos);
    let value = match chars.get(*pos) {
        Some(&quote) if quote == '\'' || quote == '"' => {
            *pos += 1;
            let start = *pos;
            while *pos < chars.len() && chars[*pos] != quote {
                *pos += 1;
            }
            if *pos >= chars.len() {
                return Err(SelectorError::UnterminatedString);
            }
            let value: String = chars[start..*pos].iter().collect();
            *pos += 1;
            value
        }
        _ => read_ident(chars, pos),
    };

    skip_ws(chars, pos);
    if chars.get(*pos) != Some(&']') {
        return Err(SelectorError::UnterminatedAttribute);
    }
    *pos += 1;

    Ok(if prefix {
        AttrMatch::Prefix(name, value)
    } else {
        AttrMatch::Equals(name, value)
    })
}
