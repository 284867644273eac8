//! Line-oriented block state machine.
//!
//! [`step`] is a pure transition `(open block, line) -> (open block, closed
//! blocks)`. At most one block is open at a time; a line that starts an
//! incompatible block closes the open one first. The renderer turns the
//! closed [`Block`]s into HTML.

use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^---+\s*$").unwrap());
static UNORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+").unwrap());
static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+").unwrap());

const FENCE: &str = "```";
const UNCHECKED_BOX: &str = "\u{2610}";
const CHECKED_BOX: &str = "\u{2611}";

/// Kind of list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `-` or `*` items, rendered as `<ul>`.
    Unordered,
    /// `1.` or `1)` items, rendered as `<ol>`.
    Ordered,
}

impl ListKind {
    /// HTML element name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// The block currently accumulating lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpenBlock {
    /// Nothing open.
    #[default]
    None,
    /// Inside a fence; lines are buffered verbatim.
    Code {
        /// Fence info string (may be empty).
        language: String,
        /// Body lines so far.
        lines: Vec<String>,
    },
    /// A list is open; items have already been emitted.
    List(ListKind),
    /// Raw pipe lines waiting for the table to end.
    Table(Vec<String>),
}

/// A closed unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX heading with its raw text.
    Heading { level: u8, text: String },
    /// Horizontal rule.
    Rule,
    /// One paragraph per non-blank line.
    Paragraph(String),
    /// A list opens.
    ListStart(ListKind),
    /// List item text, with checkboxes replaced in unordered items.
    ListItem(String),
    /// A list closes.
    ListEnd(ListKind),
    /// Raw table lines, header and separator included.
    Table(Vec<String>),
    /// Finished fence.
    Code { language: String, source: String },
}

/// Advance the state machine by one line.
///
/// Rules in priority order: fence delimiter, code body, pipe line, table
/// exit (which then falls through), heading, rule, unordered item, ordered
/// item, blank line, paragraph.
pub fn step(state: OpenBlock, line: &str) -> (OpenBlock, Vec<Block>) {
    let mut out = Vec::new();
    let trimmed = line.trim();

    let state = match state {
        OpenBlock::Code { language, mut lines } => {
            if trimmed.starts_with(FENCE) {
                out.push(Block::Code {
                    language,
                    source: lines.join("\n"),
                });
                return (OpenBlock::None, out);
            }
            lines.push(line.to_owned());
            return (OpenBlock::Code { language, lines }, out);
        }
        other => other,
    };

    if let Some(info) = trimmed.strip_prefix(FENCE) {
        close(state, &mut out);
        let next = OpenBlock::Code {
            language: info.trim().to_owned(),
            lines: Vec::new(),
        };
        return (next, out);
    }

    if trimmed.starts_with('|') {
        return match state {
            OpenBlock::Table(mut rows) => {
                rows.push(line.to_owned());
                (OpenBlock::Table(rows), out)
            }
            other => {
                close(other, &mut out);
                (OpenBlock::Table(vec![line.to_owned()]), out)
            }
        };
    }

    let state = match state {
        OpenBlock::Table(rows) => {
            out.push(Block::Table(rows));
            OpenBlock::None
        }
        other => other,
    };

    if let Some(caps) = HEADING.captures(line) {
        close(state, &mut out);
        #[allow(clippy::cast_possible_truncation)]
        let level = caps[1].len() as u8;
        out.push(Block::Heading {
            level,
            text: caps[2].trim().to_owned(),
        });
        return (OpenBlock::None, out);
    }

    if RULE.is_match(line) {
        close(state, &mut out);
        out.push(Block::Rule);
        return (OpenBlock::None, out);
    }

    for (pattern, kind) in [
        (&*UNORDERED_ITEM, ListKind::Unordered),
        (&*ORDERED_ITEM, ListKind::Ordered),
    ] {
        if let Some(marker) = pattern.find(line) {
            match state {
                OpenBlock::List(open) if open == kind => {}
                other => {
                    close(other, &mut out);
                    out.push(Block::ListStart(kind));
                }
            }
            let text = &line[marker.end()..];
            let text = match kind {
                ListKind::Unordered => replace_checkboxes(text),
                ListKind::Ordered => text.to_owned(),
            };
            out.push(Block::ListItem(text));
            return (OpenBlock::List(kind), out);
        }
    }

    if trimmed.is_empty() {
        return (state, out);
    }

    close(state, &mut out);
    out.push(Block::Paragraph(line.to_owned()));
    (OpenBlock::None, out)
}

/// Close whatever is still open at the end of a document.
///
/// An unterminated fence is flushed as a code block rather than dropped.
pub fn finish(state: OpenBlock) -> Vec<Block> {
    let mut out = Vec::new();
    match state {
        OpenBlock::Code { language, lines } => out.push(Block::Code {
            language,
            source: lines.join("\n"),
        }),
        other => close(other, &mut out),
    }
    out
}

/// Emit the closing block for an open list or table.
///
/// Never called with an open fence: fences are handled before any other rule.
fn close(state: OpenBlock, out: &mut Vec<Block>) {
    match state {
        OpenBlock::List(kind) => out.push(Block::ListEnd(kind)),
        OpenBlock::Table(rows) => out.push(Block::Table(rows)),
        OpenBlock::None | OpenBlock::Code { .. } => {}
    }
}

fn replace_checkboxes(text: &str) -> String {
    text.replace("[ ]", UNCHECKED_BOX).replace("[x]", CHECKED_BOX)
}

/// Walk `lines` through the state machine and collect every closed block.
pub fn parse_blocks<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Block> {
    let mut state = OpenBlock::None;
    let mut blocks = Vec::new();
    for line in lines {
        let (next, closed) = step(state, line);
        state = next;
        blocks.extend(closed);
    }
    blocks.extend(finish(state));
    blocks
}
