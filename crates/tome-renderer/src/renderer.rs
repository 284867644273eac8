//! Document assembler: drives the block state machine and writes HTML.

use std::collections::HashSet;
use std::fmt::Write;

use crate::anchor::{heading_anchor, strip_tags};
use crate::block::{Block, OpenBlock, finish, step};
use crate::code_block::{
    CodeBlockProcessor, DEFAULT_CODE_LANGUAGES, ProcessResult, render_code_block,
    render_raw_mermaid,
};
use crate::document::Document;
use crate::inline::{InlineFormatter, format_inline};
use crate::table::render_table;
use crate::util::unescape_html;

/// A rendered heading.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Value of the `id` attribute.
    pub anchor: String,
    /// Plain heading text with inline markup removed.
    pub text: String,
}

/// Result of rendering one document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// HTML fragment.
    pub html: String,
    /// Plain text of the first level-1 heading.
    pub title: Option<String>,
    /// Every heading in document order.
    pub headings: Vec<Heading>,
    /// Warnings reported by code block processors.
    pub warnings: Vec<String>,
}

impl RenderResult {
    /// Anchor of the heading that supplied the title.
    #[must_use]
    pub fn title_anchor(&self) -> Option<&str> {
        self.headings
            .iter()
            .find(|h| h.level == 1)
            .map(|h| h.anchor.as_str())
    }
}

/// Renders course documents to HTML fragments.
///
/// Processors are checked in order when a fence closes; the first returning a
/// non-`PassThrough` result wins. Without any processor, `mermaid` fences fall
/// back to an escaped `<pre class="mermaid">` block.
pub struct DocumentRenderer {
    formatter: InlineFormatter,
    languages: HashSet<String>,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer {
    /// Renderer with the default language list, no images and no processors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatter: InlineFormatter::new(),
            languages: DEFAULT_CODE_LANGUAGES
                .iter()
                .map(|&lang| lang.to_owned())
                .collect(),
            processors: Vec::new(),
        }
    }

    /// Enable `![alt](src)` images in paragraphs, list items and tables.
    #[must_use]
    pub fn with_images(mut self, enabled: bool) -> Self {
        self.formatter = self.formatter.with_images(enabled);
        self
    }

    /// Replace the set of fence languages that get a `language-*` class.
    #[must_use]
    pub fn with_code_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.languages = languages
            .into_iter()
            .map(|lang| lang.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Add a code block processor.
    #[must_use]
    pub fn with_processor<P>(mut self, processor: P) -> Self
    where
        P: CodeBlockProcessor + 'static,
    {
        self.processors.push(Box::new(processor));
        self
    }

    /// Render a document.
    ///
    /// Warnings are whatever the installed processors have collected so far,
    /// so a renderer reused across documents reports them cumulatively.
    pub fn render(&mut self, document: &Document) -> RenderResult {
        let mut html = String::with_capacity(document.text.len() * 2);
        let mut headings = Vec::new();
        let mut title = None;

        let mut state = OpenBlock::None;
        for line in document.text.lines() {
            let (next, blocks) = step(state, line);
            state = next;
            for block in blocks {
                self.emit(block, document, &mut html, &mut headings, &mut title);
            }
        }
        for block in finish(state) {
            self.emit(block, document, &mut html, &mut headings, &mut title);
        }

        let warnings = self
            .processors
            .iter()
            .flat_map(|p| p.warnings().iter().cloned())
            .collect();

        RenderResult {
            html,
            title,
            headings,
            warnings,
        }
    }

    fn emit(
        &mut self,
        block: Block,
        document: &Document,
        html: &mut String,
        headings: &mut Vec<Heading>,
        title: &mut Option<String>,
    ) {
        match block {
            Block::Heading { level, text } => {
                let anchor = heading_anchor(&document.id, &text);
                writeln!(
                    html,
                    r#"<h{level} id="{anchor}">{}</h{level}>"#,
                    self.formatter.format(&text)
                )
                .unwrap();
                let plain = plain_text(&text);
                if level == 1 && title.is_none() {
                    *title = Some(plain.clone());
                }
                headings.push(Heading {
                    level,
                    anchor,
                    text: plain,
                });
            }
            Block::Rule => html.push_str("<hr>\n"),
            Block::Paragraph(text) => {
                writeln!(html, "<p>{}</p>", self.formatter.format(&text)).unwrap();
            }
            Block::ListStart(kind) => writeln!(html, "<{}>", kind.tag()).unwrap(),
            Block::ListItem(text) => {
                writeln!(html, "  <li>{}</li>", self.formatter.format(&text)).unwrap();
            }
            Block::ListEnd(kind) => writeln!(html, "</{}>", kind.tag()).unwrap(),
            Block::Table(rows) => html.push_str(&render_table(&rows, self.formatter)),
            Block::Code { language, source } => {
                self.emit_code(&language, &source, &document.path, html);
            }
        }
    }

    fn emit_code(&mut self, language: &str, source: &str, origin: &str, html: &mut String) {
        for processor in &mut self.processors {
            if let ProcessResult::Html(fragment) = processor.process(language, source, origin) {
                html.push_str(&fragment);
                if !fragment.ends_with('\n') {
                    html.push('\n');
                }
                return;
            }
        }

        if language.eq_ignore_ascii_case("mermaid") {
            render_raw_mermaid(source, html);
        } else {
            let known = self.languages.contains(&language.to_ascii_lowercase());
            render_code_block(language, source, known, html);
        }
    }
}

/// Heading text with inline markup removed and entities decoded.
fn plain_text(text: &str) -> String {
    unescape_html(&strip_tags(&format_inline(text.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentId;
    use pretty_assertions::assert_eq;

    fn render(text: &str) -> RenderResult {
        let doc = Document::new(DocumentId::from_index(5), "01-junior/05-login.md", text);
        DocumentRenderer::new().render(&doc)
    }

    struct Upper {
        warnings: Vec<String>,
    }

    impl CodeBlockProcessor for Upper {
        fn process(&mut self, language: &str, source: &str, origin: &str) -> ProcessResult {
            if language != "shout" {
                return ProcessResult::PassThrough;
            }
            self.warnings.push(format!("{origin}: shouted"));
            ProcessResult::Html(format!("<div>{}</div>", source.to_uppercase()))
        }

        fn warnings(&self) -> &[String] {
            &self.warnings
        }
    }

    #[test]
    fn test_heading_with_anchor() {
        let result = render("## User Login Flow");
        assert_eq!(
            result.html,
            "<h2 id=\"s005-user-login-flow\">User Login Flow</h2>\n"
        );
        assert_eq!(
            result.headings,
            vec![Heading {
                level: 2,
                anchor: "s005-user-login-flow".to_owned(),
                text: "User Login Flow".to_owned(),
            }]
        );
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_checkbox_list() {
        let result = render("- [ ] Task one\n- [x] Task two");
        assert_eq!(
            result.html,
            "<ul>\n  <li>\u{2610} Task one</li>\n  <li>\u{2611} Task two</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_table_then_paragraph() {
        let result = render("| a | b |\n|---|---|\n| 1 | 2 |\nAfter");
        assert_eq!(
            result.html,
            "<table>\n<thead>\n<tr>\n  <th>a</th>\n  <th>b</th>\n</tr>\n</thead>\n\
             <tbody>\n<tr>\n  <td>1</td>\n  <td>2</td>\n</tr>\n</tbody>\n</table>\n\
             <p>After</p>\n"
        );
    }

    #[test]
    fn test_title_is_first_h1() {
        let result = render("Intro\n# First `One`\n# Second");
        assert_eq!(result.title.as_deref(), Some("First One"));
        assert_eq!(result.title_anchor(), Some("s005-first-one"));
    }

    #[test]
    fn test_known_and_unknown_languages() {
        let result = render("```kotlin\nval a = 1 < 2\n```\n```weird\nx\n```\n```\ny\n```");
        assert_eq!(
            result.html,
            "<pre><code class=\"language-kotlin\">val a = 1 &lt; 2</code></pre>\n\
             <pre><code>x</code></pre>\n\
             <pre><code>y</code></pre>\n"
        );
    }

    #[test]
    fn test_custom_language_list() {
        let doc = Document::new(DocumentId::from_index(0), "a.md", "```Zig\nconst\n```");
        let result = DocumentRenderer::new()
            .with_code_languages(["zig"])
            .render(&doc);
        assert_eq!(
            result.html,
            "<pre><code class=\"language-Zig\">const</code></pre>\n"
        );
    }

    #[test]
    fn test_mermaid_without_processor_is_escaped() {
        let result = render("```mermaid\nA --> B\n```");
        assert_eq!(result.html, "<pre class=\"mermaid\">A --&gt; B</pre>\n");
    }

    #[test]
    fn test_processor_handles_block_and_reports_warnings() {
        let doc = Document::new(DocumentId::from_index(1), "x/y.md", "```shout\nhey\n```");
        let mut renderer = DocumentRenderer::new().with_processor(Upper {
            warnings: Vec::new(),
        });
        let result = renderer.render(&doc);
        assert_eq!(result.html, "<div>HEY</div>\n");
        assert_eq!(result.warnings, vec!["x/y.md: shouted".to_owned()]);
    }

    #[test]
    fn test_images_only_when_enabled() {
        let text = "See ![diagram](img/a.png)";
        assert_eq!(render(text).html, "<p>See !<a href=\"img/a.png\">diagram</a></p>\n");

        let doc = Document::new(DocumentId::from_index(0), "a.md", text);
        let result = DocumentRenderer::new().with_images(true).render(&doc);
        assert_eq!(
            result.html,
            "<p>See <img src=\"img/a.png\" alt=\"diagram\"></p>\n"
        );
    }

    #[test]
    fn test_rule_and_ordered_list() {
        let result = render("1. one\n2) two\n---");
        assert_eq!(
            result.html,
            "<ol>\n  <li>one</li>\n  <li>two</li>\n</ol>\n<hr>\n"
        );
    }
}
