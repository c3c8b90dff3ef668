//! Page location and session history
//!
//! The URL hash carries the current keyword. Spaces are written as `_`
//! and decoding undoes both that and percent-encoding.

use url::Url;

/// The page URL plus a linear history of hash changes
#[derive(Debug, Clone)]
pub struct Location {
    url: Url,
    entries: Vec<String>,
    current: usize,
}

impl Location {
    pub fn new(url: Url) -> Self {
        let entries = vec![url.fragment().unwrap_or("").to_string()];
        Self { url, entries, current: 0 }
    }

    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// `#fragment`, or empty when there is no fragment
    pub fn hash(&self) -> String {
        match self.url.fragment() {
            Some(f) if !f.is_empty() => format!("#{}", f),
            _ => String::new(),
        }
    }

    /// Assign the hash
    ///
    /// Always writes. Returns true when the value changed, in which case a
    /// history entry is pushed and the caller owes a hashchange.
    pub fn set_hash(&mut self, hash: &str) -> bool {
        let before = self.hash();
        self.write_fragment(hash);
        let changed = self.hash() != before;
        if changed {
            self.entries.truncate(self.current + 1);
            self.entries.push(self.url.fragment().unwrap_or("").to_string());
            self.current = self.entries.len() - 1;
            tracing::debug!("Location hash -> {:?}", self.hash());
        }
        changed
    }

    /// Step back in history; true if the hash changed
    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.restore()
    }

    /// Step forward in history; true if the hash changed
    pub fn forward(&mut self) -> bool {
        if self.current + 1 >= self.entries.len() {
            return false;
        }
        self.current += 1;
        self.restore()
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    fn restore(&mut self) -> bool {
        let before = self.hash();
        let fragment = self.entries[self.current].clone();
        self.write_fragment(&fragment);
        self.hash() != before
    }

    fn write_fragment(&mut self, hash: &str) {
        let fragment = hash.strip_prefix('#').unwrap_or(hash);
        if fragment.is_empty() {
            self.url.set_fragment(None);
        } else {
            self.url.set_fragment(Some(fragment));
        }
    }
}

/// Hash form of a keyword
///
/// `%` is escaped so that [`decode_hash`] gives back the typed text, and
/// spaces become `_`.
pub fn encode_keyword(keyword: &str) -> String {
    keyword.replace('%', "%25").replace(' ', "_")
}

/// Keyword carried by a hash
///
/// Strips a leading `#`, percent-decodes, then turns `_` into spaces.
pub fn decode_hash(hash: &str) -> String {
    let fragment = hash.strip_prefix('#').unwrap_or(hash);
    percent_decode(fragment).replace('_', " ")
}

/// Percent-decode into UTF-8; malformed escapes are kept as-is
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(url: &str) -> Location {
        Location::parse(url).unwrap()
    }

    #[test]
    fn test_hash_empty() {
        assert_eq!(location("https://emoji.local/").hash(), "");
        assert_eq!(location("https://emoji.local/#").hash(), "");
        assert_eq!(location("https://emoji.local/#cat").hash(), "#cat");
    }

    #[test]
    fn test_set_hash_reports_change() {
        let mut loc = location("https://emoji.local/");
        assert!(loc.set_hash("#cat"));
        assert!(!loc.set_hash("#cat"));
        assert!(!loc.set_hash("cat"));
        assert!(loc.set_hash(""));
        assert_eq!(loc.hash(), "");
        assert_eq!(loc.history_len(), 3);
    }

    #[test]
    fn test_set_hash_percent_encodes() {
        let mut loc = location("https://emoji.local/");
        loc.set_hash("#😀");
        assert!(loc.hash().starts_with("#%F0"));
        assert_eq!(decode_hash(&loc.hash()), "😀");
    }

    #[test]
    fn test_back_forward() {
        let mut loc = location("https://emoji.local/#face");
        loc.set_hash("#cat");
        loc.set_hash("#dog");

        assert!(loc.back());
        assert_eq!(loc.hash(), "#cat");
        assert!(loc.back());
        assert_eq!(loc.hash(), "#face");
        assert!(!loc.back());

        assert!(loc.forward());
        assert_eq!(loc.hash(), "#cat");

        // Pushing drops forward entries
        loc.set_hash("#bird");
        assert!(!loc.forward());
        assert_eq!(loc.history_len(), 3);
    }

    #[test]
    fn test_encode_keyword() {
        assert_eq!(encode_keyword("red heart"), "red_heart");
        assert_eq!(encode_keyword(""), "");
        assert_eq!(encode_keyword("%41"), "%2541");
        assert_eq!(encode_keyword("100% cat"), "100%25_cat");
    }

    #[test]
    fn test_decode_hash() {
        assert_eq!(decode_hash("#red_heart"), "red heart");
        assert_eq!(decode_hash("red%20heart"), "red heart");
        assert_eq!(decode_hash("#a+b"), "a+b");
        assert_eq!(decode_hash("#100%"), "100%");
        assert_eq!(decode_hash("#%zz"), "%zz");
        assert_eq!(decode_hash(""), "");
    }

    #[test]
    fn test_keyword_round_trip_through_location() {
        let mut loc = location("https://emoji.local/");
        for keyword in ["face", "red heart", "smile cat 😺", "a%b", "#tag", "%41", "100%25", "%"] {
            loc.set_hash(&format!("#{}", encode_keyword(keyword)));
            assert_eq!(decode_hash(&loc.hash()), keyword, "keyword {:?}", keyword);
        }
    }
}
