//! Diagnostics for stepopt.
//!
//! Provides [`Diagnostic`], [`Severity`], [`Span`], and [`ArgLine`] types
//! used to report problems found while tokenizing an argument vector.
//! Diagnostic codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

// ── ArgLine ──────────────────────────────────────────────────────────────

/// A single display line reconstructed from an argument vector.
///
/// Arguments are joined with one space. Arguments that are empty or contain
/// whitespace are wrapped in single quotes so every argument stays visible.
/// [`ArgLine::span`] maps an argument index to the byte range its display
/// form occupies, which lets renderers underline the argument a diagnostic
/// is about.
#[derive(Debug, Clone)]
pub struct ArgLine {
    text: String,
    /// Byte span of each argument's display form within `text`.
    spans: Vec<Span>,
}

impl ArgLine {
    /// Build an `ArgLine` from an argument vector.
    pub fn new<S: AsRef<str>>(args: &[S]) -> Self {
        let mut text = String::new();
        let mut spans = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            let arg = arg.as_ref();
            let start = text.len();
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                text.push('\'');
                text.push_str(arg);
                text.push('\'');
            } else {
                text.push_str(arg);
            }
            spans.push(Span::new(start, text.len()));
        }
        Self { text, spans }
    }

    /// The reconstructed line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte span of the argument at `index`, or `None` if out of bounds.
    pub fn span(&self, index: usize) -> Option<Span> {
        self.spans.get(index).copied()
    }

    /// Number of arguments on the line.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the line was built from an empty argument vector.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: the argument vector was not understood.
    Error,
    /// Warning: the argument was understood but something was ignored.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in a rendered [`ArgLine`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// A diagnostic message produced from a tokenizer outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"OPT1001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the rendered argument line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Keys are short descriptors like `"option"`, `"param"`, `"marker"`.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    codes::explain(id)
}
