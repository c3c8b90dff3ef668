//! Dataset and Emoji Entry

use crate::DataError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One emoji and its keyword string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiEntry {
    pub character: String,
    pub keywords: String,
}

impl EmojiEntry {
    pub fn new(character: &str, keywords: &str) -> Self {
        Self {
            character: character.to_string(),
            keywords: keywords.to_string(),
        }
    }
}

/// Keyword value as found in raw emojilib data
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKeywords {
    Joined(String),
    List(Vec<String>),
}

impl RawKeywords {
    fn into_joined(self) -> String {
        match self {
            Self::Joined(s) => s,
            Self::List(words) => words.join(" "),
        }
    }
}

/// Ordered collection of entries; insertion order is display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    entries: Vec<EmojiEntry>,
}

impl Dataset {
    /// Empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(emoji, keywords)` pairs.
    ///
    /// A repeated emoji keeps the position of its first occurrence and takes
    /// the keywords of its last one.
    pub fn from_pairs<I, E, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (E, K)>,
        E: Into<String>,
        K: Into<String>,
    {
        let mut entries: Vec<EmojiEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (emoji, keywords) in pairs {
            let character = emoji.into();
            let keywords = keywords.into();
            match positions.get(&character) {
                Some(&pos) => entries[pos].keywords = keywords,
                None => {
                    positions.insert(character.clone(), entries.len());
                    entries.push(EmojiEntry { character, keywords });
                }
            }
        }

        Self { entries }
    }

    /// Parse processed or raw emojilib JSON
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let object: Map<String, Value> = serde_json::from_str(json)?;
        let mut pairs = Vec::with_capacity(object.len());

        for (emoji, value) in object {
            let keywords = serde_json::from_value::<RawKeywords>(value)
                .map_err(|_| DataError::Keywords { emoji: emoji.clone() })?
                .into_joined();
            pairs.push((emoji, keywords));
        }

        Ok(Self::from_pairs(pairs))
    }

    /// Serialize as a pretty JSON object (2-space indent), in order
    pub fn to_json_pretty(&self) -> Result<String, DataError> {
        let object: Map<String, Value> = self.entries.iter()
            .map(|e| (e.character.clone(), Value::String(e.keywords.clone())))
            .collect();
        Ok(serde_json::to_string_pretty(&object)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a display position
    pub fn get(&self, index: usize) -> Option<&EmojiEntry> {
        self.entries.get(index)
    }

    /// Keywords for an emoji
    pub fn keywords(&self, emoji: &str) -> Option<&str> {
        self.entries.iter()
            .find(|e| e.character == emoji)
            .map(|e| e.keywords.as_str())
    }

    /// Entries in a display range (clamped to the dataset)
    pub fn slice(&self, start: usize, end: usize) -> &[EmojiEntry] {
        let end = end.min(self.entries.len());
        let start = start.min(end);
        &self.entries[start..end]
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmojiEntry> {
        self.entries.iter()
    }

    /// `(emoji, keywords)` pairs in order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|e| (e.character.as_str(), e.keywords.as_str()))
    }
}

impl FromIterator<EmojiEntry> for Dataset {
    fn from_iter<T: IntoIterator<Item = EmojiEntry>>(iter: T) -> Self {
        Self::from_pairs(iter.into_iter().map(|e| (e.character, e.keywords)))
    }
}
