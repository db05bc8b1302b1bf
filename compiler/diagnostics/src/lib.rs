//! The diagnostics system.

use derivation::Str;
use span::{Span, Spanning};
use std::fmt;
use utility::Str;

pub use reporter::Reporter;

mod reporter;

/// A complex diagnostic message, optionally with source locations.
#[must_use]
pub struct Diagnostic {
    severity: Severity,
    message: Option<Str>,
    highlights: Vec<Highlight>,
    subdiagnostics: Vec<Subdiagnostic>,
}

impl Diagnostic {
    fn new(severity: Severity) -> Self {
        Self {
            severity,
            message: None,
            highlights: Vec::new(),
            subdiagnostics: Vec::new(),
        }
    }

    /// Create a diagnostic for a user error.
    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    /// Create a diagnostic for a warning.
    pub fn warning() -> Self {
        Self::new(Severity::Warning)
    }

    /// Add a text message describing the issue.
    ///
    /// The message should not start with an upper case letter and not end in a
    /// punctuation mark. Surround source code snippets with directional single
    /// quotation marks, i.e. `‘` to the left and `’` to the right.
    pub fn message(mut self, message: impl Into<Str>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Reference a code snippet as one of the focal points of the diagnostic.
    pub fn span(mut self, spanning: impl Spanning, label: impl Into<Str>) -> Self {
        self.highlights.push(Highlight {
            span: spanning.span(),
            label: Some(label.into()),
        });
        self
    }

    /// Reference a code snippet without further labeling it.
    pub fn unlabeled_span(mut self, spanning: impl Spanning) -> Self {
        self.highlights.push(Highlight {
            span: spanning.span(),
            label: None,
        });
        self
    }

    /// Add further clarifying information.
    pub fn note(mut self, message: impl Into<Str>) -> Self {
        self.subdiagnostics.push(Subdiagnostic {
            severity: Subseverity::Note,
            message: message.into(),
        });
        self
    }

    /// Add steps or tips to solve the diagnosed issue.
    pub fn help(mut self, message: impl Into<Str>) -> Self {
        self.subdiagnostics.push(Subdiagnostic {
            severity: Subseverity::Help,
            message: message.into(),
        });
        self
    }

    /// Report the diagnostic.
    pub fn report(self, reporter: &Reporter) {
        reporter.report(self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use colored::Colorize;

        write!(f, "{}", self.severity.name().red().bold())?;
        if let Some(message) = &self.message {
            write!(f, "{}", ": ".bold())?;
            write!(f, "{}", message.bold())?;
        }

        for highlight in &self.highlights {
            write!(f, "\n {} {}", "at".bright_black(), highlight.span)?;
            if let Some(label) = &highlight.label {
                write!(f, ": {label}")?;
            }
        }

        for subdiagnostic in &self.subdiagnostics {
            write!(
                f,
                "\n {}: {}",
                subdiagnostic.severity.name().bold(),
                subdiagnostic.message
            )?;
        }

        Ok(())
    }
}

/// Level of severity of a diagnostic.
#[derive(Clone, Copy, PartialEq, Eq, Str)]
#[format(dash_case)]
pub enum Severity {
    /// A user error.
    Error,
    Warning,
}

#[derive(Clone, Copy, PartialEq, Eq, Str)]
#[format(dash_case)]
enum Subseverity {
    /// An auxiliary note.
    Note,
    /// A message containing steps to solve an issue.
    Help,
}

/// A highlighted code snippet.
struct Highlight {
    span: Span,
    label: Option<Str>,
}

struct Subdiagnostic {
    severity: Subseverity,
    message: Str,
}
