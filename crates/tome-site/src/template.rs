//! HTML page shell for the single-page course.

use std::fmt::Write;

use tome_renderer::{escape_attr, escape_html};

use crate::builder::RenderedLesson;

const HIGHLIGHT_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/github-dark.min.css";
const HIGHLIGHT_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/highlight.min.js";
const MERMAID_JS: &str = "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.min.js";

/// Base styles; `assets/course.css` is loaded after and may override them.
const BASE_STYLE: &str = r":root {
  --mermaid-bg: #111827; --mermaid-text: #e5e7eb; --mermaid-node-bg: #1f2937;
  --mermaid-node-border: #475569; --mermaid-line: #94a3b8;
  --mermaid-legend-direct: #f472b6; --mermaid-legend-dashed-closed: #cbd5e1;
  --mermaid-legend-dashed-open: #93c5fd; --mermaid-legend-solid-open: #6ee7b7;
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; background: #0b1220; color: #e5e7eb; }
.layout { display: grid; grid-template-columns: 320px 1fr; min-height: 100vh; }
.sidebar { position: sticky; top: 0; height: 100vh; overflow: auto; background: #111827; border-right: 1px solid #1f2937; padding: 16px; }
main { padding: 28px; max-width: 1100px; }
a { color: #60a5fa; text-decoration: none; }
.toc { list-style: none; padding: 0; margin: 0; }
.toc li { margin: 0 0 8px 0; line-height: 1.25; }
section.lesson { background: #111827; border: 1px solid #1f2937; border-radius: 12px; padding: 20px; margin-bottom: 18px; }
.file-meta { font-size: 12px; color: #9ca3af; margin-bottom: 10px; }
pre { overflow: auto; border-radius: 8px; padding: 12px; background: #0f172a; }
table { width: 100%; border-collapse: collapse; margin: 12px 0; }
th, td { border: 1px solid #334155; padding: 8px; text-align: left; }
.mermaid-legend-items { list-style: none; display: flex; flex-wrap: wrap; gap: 8px 18px; padding: 0; font-size: 13px; }
.layered-architecture svg { max-width: 100%; height: auto; }
@media (max-width: 980px) { .layout { grid-template-columns: 1fr; } .sidebar { position: relative; height: auto; } }
";

/// Everything needed to render the page.
pub struct PageData<'a> {
    /// Course title, used for `<title>` and the page heading.
    pub title: &'a str,
    /// Value of the `lang` attribute on `<html>`.
    pub lang: &'a str,
    /// Content of the `course-id` meta tag.
    pub course_id: &'a str,
    /// Cache-busting marker appended to the stylesheet URL.
    pub version: &'a str,
    /// Rendered sidebar navigation.
    pub navigation_html: &'a str,
    /// Lessons in manifest order.
    pub lessons: &'a [RenderedLesson],
}

/// Wrap one lesson fragment in its `<section>`.
pub fn render_lesson(html: &mut String, lesson: &RenderedLesson) {
    let id = escape_attr(lesson.id.as_str());
    let path = escape_attr(&lesson.path);
    writeln!(
        html,
        r#"<section class="lesson" id="{id}" data-topic-id="{id}" data-lesson-path="{path}">"#
    )
    .unwrap();
    writeln!(
        html,
        r#"<div class="file-meta">{}</div>"#,
        escape_html(&lesson.path)
    )
    .unwrap();
    html.push_str(&lesson.html);
    html.push_str("</section>\n");
}

/// Render the complete page.
#[must_use]
pub fn render_page(page: &PageData<'_>) -> String {
    let body_size: usize = page.lessons.iter().map(|l| l.html.len() + 200).sum();
    let mut html = String::with_capacity(8192 + page.navigation_html.len() + body_size);
    let title = escape_html(page.title);

    html.push_str("<!DOCTYPE html>\n");
    writeln!(html, r#"<html lang="{}">"#, escape_attr(page.lang)).unwrap();
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    writeln!(
        html,
        r#"<meta name="course-id" content="{}">"#,
        escape_attr(page.course_id)
    )
    .unwrap();
    writeln!(html, "<title>{title}</title>").unwrap();
    writeln!(html, r#"<link rel="stylesheet" href="{HIGHLIGHT_CSS}">"#).unwrap();
    writeln!(html, r#"<script src="{HIGHLIGHT_JS}"></script>"#).unwrap();
    writeln!(html, r#"<script src="{MERMAID_JS}"></script>"#).unwrap();
    writeln!(html, "<style>\n{BASE_STYLE}</style>").unwrap();
    writeln!(
        html,
        r#"<link rel="stylesheet" href="assets/course.css?v={}">"#,
        escape_attr(page.version)
    )
    .unwrap();
    html.push_str("</head>\n<body>\n<div class=\"layout\">\n");

    html.push_str("<aside class=\"sidebar\">\n");
    writeln!(html, "<h2>{title}</h2>").unwrap();
    html.push_str(page.navigation_html);
    html.push_str("</aside>\n");

    html.push_str("<main>\n");
    writeln!(html, "<h1>{title}</h1>").unwrap();
    for lesson in page.lessons {
        render_lesson(&mut html, lesson);
    }
    html.push_str("</main>\n</div>\n");

    html.push_str(
        "<script>\n  hljs.highlightAll();\n  mermaid.initialize({ startOnLoad: true, theme: 'dark' });\n</script>\n",
    );
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tome_renderer::DocumentId;

    fn lesson() -> RenderedLesson {
        RenderedLesson {
            id: DocumentId::from_index(3),
            path: "01-junior/02-state.md".to_owned(),
            html: "<p>Hello</p>\n".to_owned(),
            title: None,
            title_anchor: None,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_lesson_section() {
        let mut html = String::new();
        render_lesson(&mut html, &lesson());
        assert_eq!(
            html,
            "<section class=\"lesson\" id=\"s003\" data-topic-id=\"s003\" data-lesson-path=\"01-junior/02-state.md\">\n\
             <div class=\"file-meta\">01-junior/02-state.md</div>\n\
             <p>Hello</p>\n</section>\n"
        );
    }

    #[test]
    fn test_page_shell() {
        let lessons = [lesson()];
        let page = PageData {
            title: "Android <Architecture>",
            lang: "es",
            course_id: "android-arch",
            version: "0123456789ab",
            navigation_html: "<nav class=\"course-nav\"></nav>\n",
            lessons: &lessons,
        };
        let html = render_page(&page);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"es\">\n"));
        assert!(html.contains("<meta name=\"course-id\" content=\"android-arch\">"));
        assert!(html.contains("<title>Android &lt;Architecture&gt;</title>"));
        assert!(html.contains("assets/course.css?v=0123456789ab"));
        assert!(html.contains("highlight.min.js"));
        assert!(html.contains("mermaid.min.js"));
        assert!(html.contains("<nav class=\"course-nav\"></nav>"));
        assert!(html.contains("<section class=\"lesson\" id=\"s003\""));
        assert!(html.ends_with("</body>\n</html>\n"));
    }
}
