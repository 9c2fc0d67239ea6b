//! Loading option tables and grammars from JSON files.
//!
//! ```json
//! {
//!   "grammar": { "long_abbreviations": true, "markers": ["L--", "S-", "S+"] },
//!   "options": [
//!     { "short": "v", "long": "verbose" },
//!     { "short": "f", "long": "file", "param": "required", "payload": { "help": "input" } }
//!   ]
//! }
//! ```
//!
//! Every grammar field is optional and falls back to
//! [`GrammarConfig::default`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{GrammarConfig, GrammarError};
use crate::options::OptionSpec;

/// Errors that can occur when loading a table file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TableError {
    /// The file could not be read.
    #[error("failed to read table file {path}: {source}")]
    Io {
        /// The path that was attempted.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// JSON deserialization failed (including malformed markers).
    #[error("invalid table JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The grammar section is not usable.
    #[error("invalid grammar: {0}")]
    InvalidGrammar(#[from] GrammarError),

    /// An option row is not usable.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Location of the offending field, e.g. `options[2].long`.
        field: String,
        /// A human-readable explanation of why the value is invalid.
        reason: String,
    },
}

/// Contents of a table file: the grammar plus the option table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableFile {
    /// Grammar toggles and markers.
    #[serde(default)]
    pub grammar: GrammarConfig,
    /// Option rows in resolution order. Payloads are free-form JSON.
    #[serde(default)]
    pub options: Vec<OptionSpec<serde_json::Value>>,
}

/// Parse and validate a table file from a JSON string.
pub fn load_table_from_str(json: &str) -> Result<TableFile, TableError> {
    let table: TableFile = serde_json::from_str(json)?;
    if let Err(e) = table.grammar.validate() {
        debug!(error = %e, "rejected table grammar");
        return Err(e.into());
    }
    validate_options(&table.options)?;
    debug!(
        options = table.options.len(),
        markers = table.grammar.markers.len(),
        "loaded option table"
    );
    Ok(table)
}

/// Read, parse and validate a table file.
pub fn load_table_from_path(path: impl AsRef<Path>) -> Result<TableFile, TableError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_table_from_str(&json)
}

fn validate_options<T>(options: &[OptionSpec<T>]) -> Result<(), TableError> {
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();
    for (i, option) in options.iter().enumerate() {
        if let Some(ch) = option.short {
            if ch == '\0' || ch.is_whitespace() {
                return Err(TableError::InvalidField {
                    field: format!("options[{i}].short"),
                    reason: format!("{ch:?} cannot be typed as a short option"),
                });
            }
            if !shorts.insert(ch) {
                warn!(index = i, short = %ch, "short option shadowed by an earlier row");
            }
        }
        if let Some(long) = option.long.as_deref() {
            if long.is_empty() {
                return Err(TableError::InvalidField {
                    field: format!("options[{i}].long"),
                    reason: "long option name must not be empty".into(),
                });
            }
            if !longs.insert(long) {
                warn!(index = i, long, "long option shadowed by an earlier row");
            }
        }
    }
    Ok(())
}
