//! Shape classification of normalized diagram sources.

/// Markers a layered architecture diagram must contain, in compact form
/// (lowercase, whitespace removed).
const LAYERED_MARKERS: &[&str] = &[
    "flowchart",
    "subgraphcore",
    "subgraphapp",
    "subgraphui",
    "subgraphinfra",
    "viewmodel",
    "view",
    "entity",
    "policy",
    "compositionroot",
    "usecase",
    "featureport",
    "apiclient",
    "persistenceadapter",
    "viewmodel-->usecase",
    "usecase-->entity",
    "usecase-->featureport",
    "compositionroot-.->",
    "featureport--o",
];

/// How a diagram is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramShape {
    /// The canonical UI / Application / Core / Infrastructure diagram, drawn
    /// as a fixed SVG.
    LayeredArchitecture,
    /// Left to Mermaid in the browser.
    Generic,
}

/// Lowercase the source and drop all whitespace.
pub(crate) fn compact(source: &str) -> String {
    source
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Layered markers absent from a normalized source.
#[must_use]
pub fn missing_markers(normalized: &str) -> Vec<&'static str> {
    let compact = compact(normalized);
    LAYERED_MARKERS
        .iter()
        .copied()
        .filter(|marker| !compact.contains(marker))
        .collect()
}

/// Classify an already normalized diagram source.
#[must_use]
pub fn classify(normalized: &str) -> DiagramShape {
    if missing_markers(normalized).is_empty() {
        DiagramShape::LayeredArchitecture
    } else {
        DiagramShape::Generic
    }
}

#[cfg(test)]
pub(crate) const LAYERED_SAMPLE: &str = "flowchart TB
  subgraph UI[Presentation]
    View[Compose Screen]
    ViewModel
  end
  subgraph App
    CompositionRoot
    UseCase[Login<br>Use Case]
    FeaturePort
  end
  subgraph Core
    Entity
    Policy
  end
  subgraph Infra
    APIClient(Retrofit API)
    PersistenceAdapter{Room DAO}
  end
  View --> ViewModel
  ViewModel --> UseCase
  UseCase --> Entity
  UseCase --> Policy
  UseCase --> FeaturePort
  CompositionRoot -.-> ViewModel
  FeaturePort --o APIClient
  FeaturePort --o PersistenceAdapter
";
