//! Pipe table rendering.

use std::fmt::Write;

use crate::inline::InlineFormatter;

/// Split one pipe-delimited line into trimmed cells.
///
/// One leading and one trailing pipe are dropped before splitting, so empty
/// edge cells such as `| a | |` survive as `["a", ""]`.
pub(crate) fn split_cells(line: &str) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(str::trim).collect()
}

/// Render the raw lines of a pipe table.
///
/// Line 0 is the header, line 1 the separator (skipped without validation),
/// and every following line a body row. Fewer than two lines is not a table
/// and renders as an empty string.
pub fn render_table(lines: &[String], formatter: InlineFormatter) -> String {
    if lines.len() < 2 {
        return String::new();
    }

    let mut html = String::with_capacity(64 * lines.len());
    html.push_str("<table>\n<thead>\n<tr>\n");
    for cell in split_cells(&lines[0]) {
        writeln!(html, "  <th>{}</th>", formatter.format(cell)).unwrap();
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &lines[2..] {
        html.push_str("<tr>\n");
        for cell in split_cells(row) {
            writeln!(html, "  <td>{}</td>", formatter.format(cell)).unwrap();
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_cells("  |a|b|  "), vec!["a", "b"]);
        assert_eq!(split_cells("| a | |"), vec!["a", ""]);
        assert_eq!(split_cells("| only"), vec!["only"]);
    }

    #[test]
    fn test_too_short_is_empty() {
        assert_eq!(render_table(&[], InlineFormatter::new()), "");
        assert_eq!(
            render_table(&lines(&["| a | b |"]), InlineFormatter::new()),
            ""
        );
    }

    #[test]
    fn test_header_only_has_empty_body() {
        let html = render_table(&lines(&["| A | B |", "|---|---|"]), InlineFormatter::new());
        assert_eq!(
            html,
            "<table>\n<thead>\n<tr>\n  <th>A</th>\n  <th>B</th>\n</tr>\n</thead>\n<tbody>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_body_rows_formatted() {
        let html = render_table(
            &lines(&["| Name | Role |", "| --- | --- |", "| **Ana** | `dev` |"]),
            InlineFormatter::new(),
        );
        assert!(html.contains("  <td><strong>Ana</strong></td>\n"));
        assert!(html.contains("  <td><code>dev</code></td>\n"));
    }

    #[test]
    fn test_separator_not_validated() {
        let html = render_table(
            &lines(&["| A |", "| anything goes |", "| 1 |"]),
            InlineFormatter::new(),
        );
        assert!(!html.contains("anything goes"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_rows_and_columns_preserved() {
        for rows in 0..4 {
            for cols in 1..4 {
                let header: Vec<String> = (0..cols).map(|c| format!("h{c}")).collect();
                let mut raw = vec![
                    format!("| {} |", header.join(" | ")),
                    format!("|{}", "---|".repeat(cols)),
                ];
                for r in 0..rows {
                    let cells: Vec<String> = (0..cols).map(|c| format!("r{r}c{c}")).collect();
                    raw.push(format!("| {} |", cells.join(" | ")));
                }

                let html = render_table(&raw, InlineFormatter::new());
                let body = html.split("<tbody>").nth(1).unwrap();
                assert_eq!(body.matches("<tr>").count(), rows);
                assert_eq!(body.matches("<td>").count(), rows * cols);

                let expected: Vec<String> = (0..rows)
                    .flat_map(|r| (0..cols).map(move |c| format!("<td>r{r}c{c}</td>")))
                    .collect();
                let positions: Vec<usize> =
                    expected.iter().map(|cell| body.find(cell.as_str()).unwrap()).collect();
                assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
