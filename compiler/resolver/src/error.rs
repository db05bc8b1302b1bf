//! Name resolution and table construction errors.

use derivation::Str;
use diagnostics::Diagnostic;
use span::Spanned;
use utility::{Atom, QuoteExt};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any error raised while building the table or resolving names.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    Resolve(ResolveError),
    Semantic(SemanticError),
}

impl From<ResolveError> for Error {
    fn from(error: ResolveError) -> Self {
        Self::Resolve(error)
    }
}

impl From<SemanticError> for Error {
    fn from(error: SemanticError) -> Self {
        Self::Semantic(error)
    }
}

impl Error {
    pub fn into_diagnostic(self) -> Diagnostic {
        match self {
            Self::Resolve(error) => error.into_diagnostic(),
            Self::Semantic(error) => error.into_diagnostic(),
        }
    }
}

pub type ResolveError = Spanned<BareResolveError>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BareResolveError {
    SymbolNotFound { namespace: Namespace, ident: Atom },
    AmbiguousSymbol { namespace: Namespace, ident: Atom },
    InvalidType(ast::Name),
    InvalidSelector,
    InvalidPatternName(ast::Name),
}

/// The namespace a lookup went through.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Str)]
#[format(dash_case)]
pub enum Namespace {
    Type,
    Expression,
    Node,
}

impl BareResolveError {
    pub fn at(self, span: span::Span) -> Error {
        Error::Resolve(Spanned::new(span, self))
    }
}

pub type SemanticError = Spanned<BareSemanticError>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BareSemanticError {
    DuplicateDeclaration { ident: Atom },
    MutOnCtorPattern,
    HintOnCtorPattern,
}

impl BareSemanticError {
    pub fn at(self, span: span::Span) -> Error {
        Error::Semantic(Spanned::new(span, self))
    }
}

pub trait IntoDiagnostic {
    fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for ResolveError {
    fn into_diagnostic(self) -> Diagnostic {
        use BareResolveError::*;

        match self.bare {
            SymbolNotFound { namespace, ident } => Diagnostic::error()
                .message(format!(
                    "the {} name {} is not defined in this scope",
                    namespace.name(),
                    ident.quote(),
                ))
                .span(self.span, "not found"),
            AmbiguousSymbol { namespace, ident } => Diagnostic::error()
                .message(format!(
                    "the {} name {} resolves to several symbols",
                    namespace.name(),
                    ident.quote(),
                ))
                .span(self.span, "ambiguous")
                .help("disambiguate with an alias import"),
            InvalidType(name) => Diagnostic::error()
                .message(format!("{} does not name a type", name.quote()))
                .span(self.span, "not a type"),
            InvalidSelector => Diagnostic::error()
                .message("invalid member selector")
                .span(self.span, "cannot be selected")
                .note("a selector is a run of tuple projections followed by field names"),
            InvalidPatternName(name) => Diagnostic::error()
                .message(format!("{} cannot be bound by a pattern", name.quote()))
                .span(self.span, "invalid pattern name"),
        }
    }
}

impl IntoDiagnostic for SemanticError {
    fn into_diagnostic(self) -> Diagnostic {
        use BareSemanticError::*;

        match self.bare {
            DuplicateDeclaration { ident } => Diagnostic::error()
                .message(format!("{} is declared more than once", ident.quote()))
                .span(self.span, "redeclared here"),
            MutOnCtorPattern => Diagnostic::error()
                .message("a constructor pattern cannot be marked mutable")
                .span(self.span, "remove the ‘mut’"),
            HintOnCtorPattern => Diagnostic::error()
                .message("a constructor pattern cannot carry a type annotation")
                .span(self.span, "remove the annotation"),
        }
    }
}
