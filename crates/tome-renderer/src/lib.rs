//! Line-oriented markdown renderer for course lessons.
//!
//! Lessons are rendered one line at a time by a small block state machine
//! ([`step`] / [`finish`]). Each closed block is written as HTML: inline
//! markup through [`InlineFormatter`], pipe tables through [`render_table`],
//! and fenced code either literally or through a [`CodeBlockProcessor`].
//!
//! Every heading gets an anchor of the form `<document-id>-<slug>`, which is
//! unique across the whole course because the document id is unique.
//!
//! # Example
//!
//! ```
//! use tome_renderer::{Document, DocumentId, DocumentRenderer};
//!
//! let doc = Document::new(DocumentId::from_index(5), "01-junior/05-login.md", "## User Login Flow");
//! let result = DocumentRenderer::new().render(&doc);
//! assert_eq!(result.html, "<h2 id=\"s005-user-login-flow\">User Login Flow</h2>\n");
//! ```

mod anchor;
mod block;
mod code_block;
mod document;
mod inline;
mod renderer;
mod table;
mod util;

pub use anchor::{heading_anchor, slugify, strip_tags};
pub use block::{Block, ListKind, OpenBlock, finish, parse_blocks, step};
pub use code_block::{CodeBlockProcessor, DEFAULT_CODE_LANGUAGES, ProcessResult};
pub use document::{Document, DocumentId, file_stem};
pub use inline::{InlineFormatter, format_inline};
pub use renderer::{DocumentRenderer, Heading, RenderResult};
pub use table::render_table;
pub use util::{escape_attr, escape_html};
