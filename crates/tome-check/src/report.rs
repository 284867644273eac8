//! Check results.

use std::fmt;

/// The available checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Every manifest entry exists.
    Order,
    /// Required directories, files and headings exist.
    Structure,
    /// Relative links and images resolve.
    Links,
    /// Mermaid blocks cover every arrow semantic.
    Diagrams,
}

impl CheckKind {
    /// All checks in run order.
    pub const ALL: [Self; 4] = [Self::Order, Self::Structure, Self::Links, Self::Diagrams];

    /// Short name used on the command line and in reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Structure => "structure",
            Self::Links => "links",
            Self::Diagrams => "diagrams",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One problem found in the course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Check that reported it.
    pub check: CheckKind,
    /// Where: a path, or `path:line`.
    pub location: String,
    /// What is wrong.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(
        check: CheckKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check,
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.check, self.location, self.message)
    }
}

/// Every violation found by the checks that ran.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Checks that ran, in order.
    pub checks: Vec<CheckKind>,
    /// Violations in the order they were found.
    pub violations: Vec<Violation>,
}

impl CheckReport {
    /// Whether no violation was found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations reported by one check.
    pub fn by_check(&self, check: CheckKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.check == check)
    }

    pub(crate) fn extend(&mut self, check: CheckKind, violations: Vec<Violation>) {
        self.checks.push(check);
        self.violations.extend(violations);
    }
}
