//! Single-page course assembly.
//!
//! [`CourseBuilder`] reads the lessons listed in the manifest, renders each
//! one with `tome-renderer` and the Mermaid processor from `tome-diagrams`,
//! groups them into a [`Navigation`] and wraps everything in one HTML page.
//!
//! Lessons are rendered independently (optionally in parallel with rayon) and
//! then folded into a [`BuildContext`] in manifest order, which collects the
//! index and the cache-busting version marker.

mod builder;
mod context;
mod error;
mod manifest;
mod navigation;
mod template;

pub use builder::{BuildOutput, CourseBuilder, RenderedLesson};
pub use context::BuildContext;
pub use error::BuildError;
pub use manifest::{LoadedDocuments, Manifest, ManifestEntry};
pub use navigation::{NavSection, Navigation, TocEntry, render_toc};
pub use template::{PageData, render_lesson, render_page};
