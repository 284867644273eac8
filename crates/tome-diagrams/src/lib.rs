//! Mermaid diagram handling for course pages.
//!
//! [`MermaidProcessor`] plugs into the `tome-renderer` code block seam. Each
//! diagram goes through three steps:
//!
//! - [`normalize`]: rewrite PlantUML-style arrows into Mermaid syntax
//! - [`classify`]: detect the canonical layered architecture diagram
//! - render: a fixed SVG with a legend for the layered diagram, otherwise a
//!   `<pre class="mermaid">` block with an optional legend ([`needs_legend`])
//!
//! # Example
//!
//! ```
//! use tome_diagrams::MermaidProcessor;
//! use tome_renderer::{Document, DocumentId, DocumentRenderer};
//!
//! let doc = Document::new(DocumentId::from_index(0), "a.md", "```mermaid\ngraph TD\nA --> B\n```");
//! let mut renderer = DocumentRenderer::new().with_processor(MermaidProcessor::new());
//! let result = renderer.render(&doc);
//! assert_eq!(result.html, "<pre class=\"mermaid\">graph TD\nA --&gt; B</pre>\n");
//! ```

mod classify;
mod layered;
mod legend;
mod normalize;
mod processor;

pub use classify::{DiagramShape, classify, missing_markers};
pub use layered::render_layered;
pub use legend::{ArrowKind, marker_id, needs_legend, render_legend};
pub use normalize::{Dialect, normalize};
pub use processor::{MermaidProcessor, render_diagram};
