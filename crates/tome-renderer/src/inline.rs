//! Inline markup for a single line of text.
//!
//! Rules are applied in a fixed order, each one working on the output of the
//! previous step:
//!
//! 1. code spans are cut out and escaped on their own,
//! 2. the rest of the line is HTML-escaped,
//! 3. `***bold italic***`, then `**bold**`, then `*italic*`,
//! 4. `![alt](src)` images (only when enabled),
//! 5. `[text](target)` links.
//!
//! Code spans are swapped for placeholders during steps 2-5 so their content
//! is never re-escaped or re-matched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::util::escape_html;

const PLACEHOLDER_START: char = '\u{E000}';
const PLACEHOLDER_END: char = '\u{E001}';

static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+?)\*").unwrap());
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap());

/// Formats inline markup within one line.
///
/// The default formatter leaves image syntax alone; enable it with
/// [`with_images`](Self::with_images).
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineFormatter {
    images: bool,
}

impl InlineFormatter {
    /// Create a formatter without image support.
    #[must_use]
    pub const fn new() -> Self {
        Self { images: false }
    }

    /// Enable or disable `![alt](src)` image rendering.
    #[must_use]
    pub const fn with_images(mut self, enabled: bool) -> Self {
        self.images = enabled;
        self
    }

    /// Format a single line of text.
    pub fn format(&self, text: &str) -> String {
        let text: Cow<'_, str> = if text.contains([PLACEHOLDER_START, PLACEHOLDER_END]) {
            Cow::Owned(text.replace([PLACEHOLDER_START, PLACEHOLDER_END], ""))
        } else {
            Cow::Borrowed(text)
        };

        let mut spans: Vec<String> = Vec::new();
        let protected = CODE_SPAN.replace_all(&text, |caps: &Captures<'_>| {
            let index = spans.len();
            spans.push(format!("<code>{}</code>", escape_html(&caps[1])));
            format!("{PLACEHOLDER_START}{index}{PLACEHOLDER_END}")
        });

        let mut out = escape_html(&protected);
        out = BOLD_ITALIC
            .replace_all(&out, "<strong><em>${1}</em></strong>")
            .into_owned();
        out = BOLD.replace_all(&out, "<strong>${1}</strong>").into_owned();
        out = ITALIC.replace_all(&out, "<em>${1}</em>").into_owned();
        if self.images {
            out = IMAGE
                .replace_all(&out, r#"<img src="${2}" alt="${1}">"#)
                .into_owned();
        }
        out = LINK.replace_all(&out, r#"<a href="${2}">${1}</a>"#).into_owned();

        if spans.is_empty() {
            return out;
        }
        PLACEHOLDER
            .replace_all(&out, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| spans.get(index))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Format one line with the default (image-less) formatter.
///
/// # Examples
///
/// ```
/// use tome_renderer::format_inline;
///
/// assert_eq!(
///     format_inline("Use `Vec<T>` **now**"),
///     "Use <code>Vec&lt;T&gt;</code> <strong>now</strong>"
/// );
/// ```
pub fn format_inline(text: &str) -> String {
    InlineFormatter::new().format(text)
}
