//! Heading anchors.
//!
//! Anchors have the form `<document-id>-<slug>`. The document prefix keeps
//! them unique across the whole rendered course without a global registry, and
//! the format must stay stable between builds because other pages link to it.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::DocumentId;
use crate::inline::format_inline;
use crate::util::unescape_html;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Remove HTML tags from a fragment, keeping the text between them.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Convert text to an anchor-safe slug.
///
/// Lowercases, collapses every run of non-ASCII-alphanumeric characters into a
/// single `-`, and trims leading and trailing dashes.
///
/// # Examples
///
/// ```
/// use tome_renderer::slugify;
///
/// assert_eq!(slugify("User Login Flow"), "user-login-flow");
/// assert_eq!(slugify("  ¿Qué es software?  "), "qu-es-software");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_dash && !result.is_empty() {
                result.push('-');
            }
            pending_dash = false;
            result.push(c);
        } else {
            pending_dash = true;
        }
    }

    result
}

/// Slug of an already inline-formatted heading.
pub(crate) fn slug_from_html(html: &str) -> String {
    slugify(&unescape_html(&strip_tags(html)))
}

/// Compute the anchor for a heading with the given raw markdown text.
///
/// The text goes through the same inline formatting as the rendered heading,
/// so the result always matches the `id` attribute the renderer emits.
///
/// # Examples
///
/// ```
/// use tome_renderer::{DocumentId, heading_anchor};
///
/// let id = DocumentId::from_index(5);
/// assert_eq!(heading_anchor(&id, "User **Login** Flow"), "s005-user-login-flow");
/// ```
#[must_use]
pub fn heading_anchor(id: &DocumentId, text: &str) -> String {
    anchor_from_slug(id, &slug_from_html(&format_inline(text.trim())))
}

pub(crate) fn anchor_from_slug(id: &DocumentId, slug: &str) -> String {
    format!("{id}-{slug}")
}
