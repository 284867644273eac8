//! Fenced code block rendering and the processor seam for special languages.

use std::fmt::Write;

use crate::util::{escape_attr, escape_html};

/// Fence languages that get a `language-*` class by default.
///
/// Anything else renders as a plain code block so the highlighter does not
/// guess at a grammar it does not have.
pub const DEFAULT_CODE_LANGUAGES: &[&str] = &[
    "bash", "c", "cpp", "csharp", "css", "diff", "dockerfile", "gradle", "groovy", "html",
    "ini", "java", "javascript", "js", "json", "kotlin", "kt", "makefile", "markdown", "md",
    "plaintext", "properties", "py", "python", "ruby", "rust", "sh", "shell", "sql", "swift",
    "text", "toml", "ts", "typescript", "xml", "yaml", "yml",
];

/// Result of processing a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the block with this HTML.
    Html(String),
    /// Not handled; render as a regular code block.
    PassThrough,
}

/// Custom handling for fenced code blocks.
///
/// Processors are consulted in registration order when a fence closes; the
/// first one that does not return [`ProcessResult::PassThrough`] wins.
pub trait CodeBlockProcessor {
    /// Process a closed fence.
    ///
    /// * `language` - fence info string, as written (may be empty)
    /// * `source` - the fence body, lines joined with `\n`
    /// * `origin` - path of the document the block belongs to
    fn process(&mut self, language: &str, source: &str, origin: &str) -> ProcessResult;

    /// Warnings collected while processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Render a literal code block.
///
/// `known` decides whether the language gets a `language-*` class.
pub(crate) fn render_code_block(language: &str, source: &str, known: bool, out: &mut String) {
    if known && !language.is_empty() {
        writeln!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_attr(language),
            escape_html(source)
        )
        .unwrap();
    } else {
        writeln!(out, "<pre><code>{}</code></pre>", escape_html(source)).unwrap();
    }
}

/// Escaped mermaid block for when no diagram processor is installed.
pub(crate) fn render_raw_mermaid(source: &str, out: &mut String) {
    writeln!(out, r#"<pre class="mermaid">{}</pre>"#, escape_html(source)).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_block_with_known_language() {
        let mut out = String::new();
        render_code_block("kotlin", "val x = a < b", true, &mut out);
        assert_eq!(
            out,
            "<pre><code class=\"language-kotlin\">val x = a &lt; b</code></pre>\n"
        );
    }

    #[test]
    fn test_code_block_unknown_language_has_no_class() {
        let mut out = String::new();
        render_code_block("klingon", "qapla'", false, &mut out);
        assert_eq!(out, "<pre><code>qapla'</code></pre>\n");
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        render_code_block("", "plain", true, &mut out);
        assert_eq!(out, "<pre><code>plain</code></pre>\n");
    }

    #[test]
    fn test_raw_mermaid_is_escaped() {
        let mut out = String::new();
        render_raw_mermaid("A-->B<br>", &mut out);
        assert_eq!(out, "<pre class=\"mermaid\">A--&gt;B&lt;br&gt;</pre>\n");
    }

    #[test]
    fn test_default_languages_sorted_and_lowercase() {
        assert!(DEFAULT_CODE_LANGUAGES.windows(2).all(|w| w[0] < w[1]));
        assert!(
            DEFAULT_CODE_LANGUAGES
                .iter()
                .all(|lang| lang.chars().all(|c| !c.is_ascii_uppercase()))
        );
    }
}
