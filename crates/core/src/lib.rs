//! stepopt core library.
//!
//! A reentrant command-line option tokenizer. Given an option table and an
//! argument vector, each call to [`step`] yields one option occurrence or
//! one positional argument until the vector is exhausted. The grammar
//! (markers, separator, inline and separate parameters, abbreviations,
//! bundled short options sharing a trailing parameter) is described by a
//! [`GrammarConfig`] that may be changed between calls.

#![warn(missing_docs)]

/// Grammar configuration: markers and parsing toggles.
pub mod config;
/// Parsing position over an argument vector.
pub mod cursor;
/// Diagnostic reconstruction of outcomes.
pub mod describe;
/// The single-step transition function.
pub mod engine;
/// Literal prefix comparisons.
pub mod matcher;
/// Option table rows.
pub mod options;
/// Step results and their classification.
pub mod outcome;
/// Grammar, table and cursor bundled into one session.
pub mod session;
/// Table files.
pub mod table;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Engine
pub use engine::step;
pub use session::Session;

// Configuration
pub use config::{GrammarConfig, GrammarError, Marker, MarkerFamily};
pub use options::{OptionSpec, Param};
pub use table::{TableError, TableFile, load_table_from_path, load_table_from_str};

// State and results
pub use cursor::{Cursor, Position};
pub use outcome::{Band, Outcome, ParamCheck, Status};

// Diagnostics
pub use describe::{describe, option_text, to_diagnostic};
pub use stepopt_diagnostics::{ArgLine, Diagnostic, Severity, Span, codes};
