//! Fixed SVG rendering of the canonical layered architecture diagram.
//!
//! Geometry is static data: four layer zones, nine node boxes and nine
//! connectors. The diagram source only contributes labels; its edges have
//! already been checked by [`classify`](crate::classify).

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use tome_renderer::{escape_attr, escape_html};

use crate::legend::{ArrowKind, marker_ref};

const CANVAS_WIDTH: i32 = 1280;
const CANVAS_HEIGHT: i32 = 780;
const NODE_WIDTH: i32 = 200;
const NODE_HEIGHT: i32 = 76;
const NODE_WRAP: usize = 20;
const LAYER_WRAP: usize = 28;
const NODE_LINE_HEIGHT: i32 = 17;
const LAYER_LINE_HEIGHT: i32 = 19;

/// A node id followed by one shape: `["label"]`, `[(label)]`, `([label])`,
/// `((label))`, `[[label]]`, `[label]`, `(label)`, `{{label}}` or `{label}`.
/// Double delimiters come first so the inner pair is not captured.
static NODE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?m)(?:^|[\s;&>|-])([A-Za-z_]\w*)\s*(?:"#,
        r#"\["([^"\n]*)"\]"#,
        r"|\[\(([^)\n]*)\)\]",
        r"|\(\[([^\]\n]*)\]\)",
        r"|\(\(([^)\n]*)\)\)",
        r"|\[\[([^\]\n]*)\]\]",
        r"|\[([^\]\n]*)\]",
        r"|\(([^)\n]*)\)",
        r"|\{\{([^}\n]*)\}\}",
        r"|\{([^}\n]*)\})",
    ))
    .unwrap()
});

/// Highest capture group holding a node label.
const NODE_LABEL_GROUPS: usize = 10;

/// `subgraph id[label]` or `subgraph id["label"]`.
static SUBGRAPH_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?mi)^\s*subgraph\s+(\w+)\s*\[\s*"?([^"\]\n]*)"?\s*\]"#).unwrap()
});

struct Zone {
    key: &'static str,
    title: &'static str,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

const ZONES: [Zone; 4] = [
    Zone { key: "ui", title: "UI", x: 40, y: 70, width: 1200, height: 160 },
    Zone { key: "app", title: "Application", x: 40, y: 270, width: 760, height: 200 },
    Zone { key: "core", title: "Core (Domain)", x: 40, y: 510, width: 760, height: 230 },
    Zone { key: "infra", title: "Infrastructure", x: 840, y: 270, width: 400, height: 470 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    View,
    ViewModel,
    CompositionRoot,
    UseCase,
    FeaturePort,
    Entity,
    Policy,
    ApiClient,
    PersistenceAdapter,
}

struct NodeBox {
    node: Node,
    /// Lowercase identifier in the diagram source.
    key: &'static str,
    label: &'static str,
    x: i32,
    y: i32,
}

const NODES: [NodeBox; 9] = [
    NodeBox { node: Node::View, key: "view", label: "View", x: 100, y: 120 },
    NodeBox { node: Node::ViewModel, key: "viewmodel", label: "ViewModel", x: 460, y: 120 },
    NodeBox { node: Node::CompositionRoot, key: "compositionroot", label: "Composition Root", x: 90, y: 330 },
    NodeBox { node: Node::UseCase, key: "usecase", label: "Use Case", x: 330, y: 330 },
    NodeBox { node: Node::FeaturePort, key: "featureport", label: "Feature Port", x: 570, y: 330 },
    NodeBox { node: Node::Entity, key: "entity", label: "Entity", x: 170, y: 585 },
    NodeBox { node: Node::Policy, key: "policy", label: "Policy", x: 470, y: 585 },
    NodeBox { node: Node::ApiClient, key: "apiclient", label: "API Client", x: 940, y: 350 },
    NodeBox { node: Node::PersistenceAdapter, key: "persistenceadapter", label: "Persistence Adapter", x: 940, y: 560 },
];

#[derive(Debug, Clone, Copy)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    fn normal(self) -> (i32, i32) {
        match self {
            Self::Top => (0, -1),
            Self::Bottom => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// One end of a connector: node, side, and offset along that side.
type Port = (Node, Side, i32);

struct Connector {
    from: Port,
    to: Port,
    kind: ArrowKind,
}

const CONNECTORS: [Connector; 9] = [
    Connector { from: (Node::View, Side::Right, 0), to: (Node::ViewModel, Side::Left, 0), kind: ArrowKind::Direct },
    Connector { from: (Node::ViewModel, Side::Bottom, -30), to: (Node::UseCase, Side::Top, 30), kind: ArrowKind::Direct },
    Connector { from: (Node::UseCase, Side::Bottom, -40), to: (Node::Entity, Side::Top, 0), kind: ArrowKind::Direct },
    Connector { from: (Node::UseCase, Side::Bottom, 40), to: (Node::Policy, Side::Top, 0), kind: ArrowKind::Direct },
    Connector { from: (Node::UseCase, Side::Right, 0), to: (Node::FeaturePort, Side::Left, 0), kind: ArrowKind::Contract },
    Connector { from: (Node::ApiClient, Side::Left, 0), to: (Node::FeaturePort, Side::Right, -10), kind: ArrowKind::Contract },
    Connector { from: (Node::PersistenceAdapter, Side::Left, 0), to: (Node::FeaturePort, Side::Bottom, 50), kind: ArrowKind::Contract },
    Connector { from: (Node::CompositionRoot, Side::Top, 60), to: (Node::ViewModel, Side::Left, 20), kind: ArrowKind::Wiring },
    Connector { from: (Node::UseCase, Side::Top, 70), to: (Node::ViewModel, Side::Bottom, 30), kind: ArrowKind::Output },
];

fn node_box(node: Node) -> &'static NodeBox {
    NODES
        .iter()
        .find(|b| b.node == node)
        .unwrap_or(&NODES[0])
}

fn port_point((node, side, offset): Port) -> (i32, i32) {
    let b = node_box(node);
    match side {
        Side::Top => (b.x + NODE_WIDTH / 2 + offset, b.y),
        Side::Bottom => (b.x + NODE_WIDTH / 2 + offset, b.y + NODE_HEIGHT),
        Side::Left => (b.x, b.y + NODE_HEIGHT / 2 + offset),
        Side::Right => (b.x + NODE_WIDTH, b.y + NODE_HEIGHT / 2 + offset),
    }
}

/// Cubic curve leaving and entering each box perpendicular to its side.
fn connector_path(connector: &Connector) -> String {
    let (x1, y1) = port_point(connector.from);
    let (x2, y2) = port_point(connector.to);
    let reach = (((x2 - x1).abs() + (y2 - y1).abs()) / 4).max(40);
    let (n1x, n1y) = connector.from.1.normal();
    let (n2x, n2y) = connector.to.1.normal();
    format!(
        "M {x1} {y1} C {} {}, {} {}, {x2} {y2}",
        x1 + n1x * reach,
        y1 + n1y * reach,
        x2 + n2x * reach,
        y2 + n2y * reach,
    )
}

/// Split a label on explicit breaks, then greedily wrap words at `width`
/// characters. Words longer than `width` get a line of their own.
pub(crate) fn wrap_label(label: &str, width: usize) -> Vec<String> {
    let normalized = label
        .replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
        .replace("\\n", "\n");

    let mut lines = Vec::new();
    for part in normalized.split('\n') {
        let mut current = String::new();
        for word in part.split_whitespace() {
            if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Node labels declared in the source, keyed by lowercase identifier.
///
/// The first declaration of an identifier wins.
fn node_labels(source: &str) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    for caps in NODE_LABEL.captures_iter(source) {
        let label = (2..=NODE_LABEL_GROUPS)
            .find_map(|i| caps.get(i))
            .map(|m| unquote(m.as_str().trim()).trim());
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            labels
                .entry(caps[1].to_lowercase())
                .or_insert_with(|| label.to_owned());
        }
    }
    labels
}

/// Drop one pair of surrounding double quotes.
fn unquote(label: &str) -> &str {
    label
        .strip_prefix('"')
        .and_then(|l| l.strip_suffix('"'))
        .unwrap_or(label)
}

/// Subgraph titles declared in the source, keyed by lowercase identifier.
fn layer_labels(source: &str) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    for caps in SUBGRAPH_LABEL.captures_iter(source) {
        let label = caps[2].trim();
        if !label.is_empty() {
            labels
                .entry(caps[1].to_lowercase())
                .or_insert_with(|| label.to_owned());
        }
    }
    labels
}

fn layer_title<'a>(labels: &'a HashMap<String, String>, zone: &'a Zone) -> &'a str {
    labels
        .get(zone.key)
        .or_else(|| {
            labels
                .iter()
                .filter(|(id, _)| id.starts_with(zone.key))
                .min_by_key(|(id, _)| id.len())
                .map(|(_, label)| label)
        })
        .map_or(zone.title, String::as_str)
}

fn write_lines(out: &mut String, lines: &[String], x: i32, first_y: i32, line_height: i32) {
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0 } else { line_height };
        let y_attr = if i == 0 {
            format!(r#" y="{first_y}""#)
        } else {
            String::new()
        };
        write!(
            out,
            r#"<tspan x="{x}"{y_attr} dy="{dy}">{}</tspan>"#,
            escape_html(line)
        )
        .unwrap();
    }
}

/// Render the layered architecture SVG.
///
/// Arrow heads reference the markers of the legend rendered with the same
/// `marker_id`, so the legend must precede the SVG in the page.
#[must_use]
pub fn render_layered(source: &str, origin: &str, marker_id: &str) -> String {
    let nodes = node_labels(source);
    let layers = layer_labels(source);
    let mut out = String::with_capacity(8192);

    writeln!(
        out,
        r#"<figure class="layered-architecture" data-origin="{}">"#,
        escape_attr(origin)
    )
    .unwrap();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" role="img" aria-label="Layered architecture diagram">"#
    )
    .unwrap();
    writeln!(
        out,
        r#"<rect class="layer-canvas" x="0" y="0" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" rx="18" style="fill: var(--mermaid-bg);"/>"#
    )
    .unwrap();

    for zone in &ZONES {
        write!(
            out,
            r#"<g class="layer layer-{key}"><rect x="{x}" y="{y}" width="{w}" height="{h}" rx="14" style="fill: none; stroke: var(--mermaid-node-border); stroke-dasharray: 4 4;"/><text class="layer-title" x="{tx}" style="fill: var(--mermaid-text); font-weight: 600;">"#,
            key = zone.key,
            x = zone.x,
            y = zone.y,
            w = zone.width,
            h = zone.height,
            tx = zone.x + 20,
        )
        .unwrap();
        let lines = wrap_label(layer_title(&layers, zone), LAYER_WRAP);
        write_lines(&mut out, &lines, zone.x + 20, zone.y + 28, LAYER_LINE_HEIGHT);
        out.push_str("</text></g>\n");
    }

    for connector in &CONNECTORS {
        writeln!(
            out,
            r#"<path class="connector connector-{class}" d="{d}" style="{style} stroke-width: 2;" marker-end="url(#{marker})"/>"#,
            class = connector.kind.class(),
            d = connector_path(connector),
            style = connector.kind.stroke_style(),
            marker = marker_ref(marker_id, connector.kind),
        )
        .unwrap();
    }

    for node in &NODES {
        let label = nodes.get(node.key).map_or(node.label, String::as_str);
        let lines = wrap_label(label, NODE_WRAP);
        let cx = node.x + NODE_WIDTH / 2;
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let extra = (lines.len().saturating_sub(1) as i32) * NODE_LINE_HEIGHT / 2;
        let first_y = node.y + NODE_HEIGHT / 2 + 5 - extra;
        write!(
            out,
            r#"<g class="layer-node" data-node="{key}"><rect x="{x}" y="{y}" width="{NODE_WIDTH}" height="{NODE_HEIGHT}" rx="10" style="fill: var(--mermaid-node-bg); stroke: var(--mermaid-node-border); stroke-width: 1.5;"/><text x="{cx}" text-anchor="middle" style="fill: var(--mermaid-text);">"#,
            key = node.key,
            x = node.x,
            y = node.y,
        )
        .unwrap();
        write_lines(&mut out, &lines, cx, first_y, NODE_LINE_HEIGHT);
        out.push_str("</text></g>\n");
    }

    out.push_str("</svg>\n</figure>\n");
    out
}
