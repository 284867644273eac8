//! Status lines on stderr.

use console::{Style, Term};
use tome_check::{CheckKind, Violation};

/// Colored status printer for build and check results.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    fail: Style,
    check_title: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
            check_title: Style::new().cyan().bold(),
        }
    }

    fn line(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    /// Plain progress line.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.ok, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warn, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.fail, msg);
    }

    /// Result line of one check, followed by its violations.
    pub(crate) fn check_result(&self, check: CheckKind, violations: &[&Violation]) {
        if violations.is_empty() {
            self.success(&format!("{check}: ok"));
            return;
        }
        self.line(
            &self.check_title,
            &format!("{check}: {} violation(s)", violations.len()),
        );
        for violation in violations {
            self.error(&format!("  {}: {}", violation.location, violation.message));
        }
    }
}
