//! Shared utility functions for markdown rendering.

/// Escape the HTML text metacharacters `&`, `<` and `>`.
///
/// Quotes are left alone: lesson text is only ever placed in element content.
/// Use [`escape_attr`] for attribute values.
///
/// # Examples
///
/// ```
/// use tome_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b && c"), "a &lt; b &amp;&amp; c");
/// assert_eq!(escape_html(r#""quoted""#), r#""quoted""#);
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for use inside a double-quoted attribute value.
#[must_use]
pub fn escape_attr(s: &str) -> String {
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

/// Reverse [`escape_html`].
pub(crate) fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("it's \"fine\""), "it's \"fine\"");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a"b"#), "a&quot;b");
        assert_eq!(escape_attr("it's"), "it&#x27;s");
        assert_eq!(escape_attr("<x>"), "&lt;x&gt;");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let text = "if a < b && b > c";
        assert_eq!(unescape_html(&escape_html(text)), text);
    }

    #[test]
    fn test_unescape_does_not_double_decode() {
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
    }
}
