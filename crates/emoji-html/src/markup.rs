//! Result Node markup
//!
//! The markup produced here is what the renderer would build node by node,
//! so a page carrying it is treated as pre-rendered.

/// Escape text for use in HTML content and quoted attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Markup for a single emoji entry
pub fn result_markup(emoji: &str, keywords: &str) -> String {
    let emoji = escape_html(emoji);
    format!(
        "<li class=\"result emoji-wrapper js-emoji\" title=\"{}\">\n    <div class=\"js-emoji-char native-emoji\" data-emoji=\"{}\">{}</div>\n  </li>",
        escape_html(keywords),
        emoji,
        emoji,
    )
}

/// Markup for a whole dataset, in order
pub fn results_markup<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries.into_iter()
        .map(|(emoji, keywords)| result_markup(emoji, keywords))
        .collect::<Vec<_>>()
        .join("\n  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape_html("a \"b\" <c> & 'd'"), "a &quot;b&quot; &lt;c&gt; &amp; &#39;d&#39;");
        assert_eq!(escape_html("😀 grinning"), "😀 grinning");
    }

    #[test]
    fn test_result_markup() {
        let html = result_markup("🐱", "cat face");
        assert!(html.starts_with("<li class=\"result emoji-wrapper js-emoji\" title=\"cat face\">"));
        assert!(html.contains("data-emoji=\"🐱\">🐱</div>"));
    }

    #[test]
    fn test_results_markup_joins_in_order() {
        let html = results_markup([("😀", "grinning face"), ("🐱", "cat face")]);
        let grin = html.find("😀").unwrap();
        let cat = html.find("🐱").unwrap();
        assert!(grin < cat);
        assert_eq!(html.matches("<li ").count(), 2);
        assert!(html.contains("</li>\n  <li "));

        assert_eq!(results_markup(std::iter::empty()), "");
    }
}
