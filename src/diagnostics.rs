/*!
# Diagnostics

Recoverable problems found while parsing or while building a graph are not printed,
but collected as [`Diagnostic`] records next to the primary result.
Every recorded diagnostic is also emitted as a `tracing` warning, so hosts with a
subscriber installed see them without inspecting the collection.
*/

use std::fmt::Display;

use serde::Serialize;
use tracing::warn;

/// Category of a recoverable problem
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Line starts with neither `u` nor `h`
    UnknownDirective,
    /// A weight token could not be parsed as a number
    InvalidWeight,
    /// A node or edge line lacks a required identifier
    MalformedLine,
    /// A declaration is not terminated by `;`
    MissingTerminator,
    /// A node identifier was declared more than once
    DuplicateNode,
    /// An edge references a node that was never declared
    DanglingEdge,
}

/// A single warning with an optional 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: Option<usize>,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and emits it as a warning
    pub fn push<S: Into<String>>(&mut self, kind: DiagnosticKind, line: Option<usize>, message: S) {
        let diagnostic = Diagnostic {
            kind,
            line,
            message: message.into(),
        };
        warn!(kind = ?diagnostic.kind, "{diagnostic}");
        self.0.push(diagnostic);
    }

    /// Appends all diagnostics of `other` without emitting them again
    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.0.iter()
    }

    /// Returns all diagnostics of the given kind
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.0.iter().filter(move |d| d.kind == kind)
    }

    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.of_kind(kind).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
