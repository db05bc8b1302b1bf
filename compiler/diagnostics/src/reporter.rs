//! The diagnostic reporter.

use crate::Diagnostic;

/// A sink for diagnostics.
pub struct Reporter {
    kind: Kind,
}

impl Reporter {
    /// Print reported diagnostics to standard error.
    pub fn stderr() -> Self {
        Self { kind: Kind::Stderr }
    }

    /// Discard reported diagnostics. Useful in tests.
    pub fn silent() -> Self {
        Self { kind: Kind::Silent }
    }

    pub(crate) fn report(&self, diagnostic: Diagnostic) {
        match self.kind {
            Kind::Stderr => eprintln!("{diagnostic}"),
            Kind::Silent => {}
        }
    }
}

enum Kind {
    Stderr,
    Silent,
}
