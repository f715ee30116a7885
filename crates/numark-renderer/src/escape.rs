//! Escaping helpers shared by all rules.
//!
//! Every raw string that reaches an attribute value or a text position goes
//! through [`escape_html`] before it is concatenated into output. Labels and
//! titles are first normalized with [`unescape_md`] and [`replace_entities`].

use std::borrow::{Borrow, Cow};
use std::collections::HashMap;
use std::hash::Hash;

/// Membership test over a registry map.
pub fn has<K, Q, V>(map: &HashMap<K, V>, key: &Q) -> bool
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
{
    map.contains_key(key)
}

/// Remove markdown backslash escapes (`\*` becomes `*`).
///
/// Only ASCII punctuation can be escaped; other backslashes are kept.
pub fn unescape_md(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && next.is_ascii_punctuation()
        {
            result.push(next);
            chars.next();
        } else {
            result.push(c);
        }
    }
    Cow::Owned(result)
}

/// Resolve named and numeric HTML entities to literal characters.
///
/// Unknown entities are left as written.
pub fn replace_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    html_escape::decode_html_entities(s)
}

/// Escape HTML special characters for attribute values and text nodes.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Normalize and escape a user-supplied label for attribute embedding.
pub(crate) fn escape_label(s: &str) -> String {
    escape_html(&replace_entities(&unescape_md(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_unescape_md() {
        assert_eq!(unescape_md(r"\*not emphasis\*"), "*not emphasis*");
        assert_eq!(unescape_md(r"c\+\+"), "c++");
        assert_eq!(unescape_md(r"path\to"), r"path\to");
        assert_eq!(unescape_md(r"trailing\"), r"trailing\");
        assert!(matches!(unescape_md("none"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_replace_entities() {
        assert_eq!(replace_entities("a &amp; b"), "a & b");
        assert_eq!(replace_entities("&copy; 2024"), "© 2024");
        assert_eq!(replace_entities("&#65;&#x42;"), "AB");
        assert!(matches!(replace_entities("no entities"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_label_roundtrips_entities_safely() {
        assert_eq!(escape_label(r"c\+\+ &lt;x&gt;"), "c++ &lt;x&gt;");
        assert_eq!(escape_label("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_has() {
        let mut map = HashMap::new();
        map.insert("mermaid".to_owned(), 1);
        assert!(has(&map, "mermaid"));
        assert!(!has(&map, "plantuml"));
    }
}
