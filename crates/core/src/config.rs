//! Grammar configuration: option markers and the parsing toggles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matcher::prefix_match;

/// Errors detected when a grammar is set up.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A tagged marker string had no family tag at all.
    #[error("empty marker definition")]
    EmptyMarker,

    /// A tagged marker string started with something other than `S` or `L`.
    #[error("unknown marker family '{tag}' in \"{marker}\" (expected 'S' or 'L')")]
    UnknownFamily {
        /// The offending tag character.
        tag: char,
        /// The full tagged marker text.
        marker: String,
    },

    /// The parameter delimiter was configured as an empty string.
    #[error("parameter delimiter must not be empty")]
    EmptyDelimiter,

    /// The separator was configured as an empty string.
    #[error("separator must not be empty")]
    EmptySeparator,
}

/// Which kind of option a marker introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerFamily {
    /// Single-character options, possibly bundled (`-vsf`).
    Short,
    /// Word options, possibly abbreviated or with an inline value.
    Long,
}

impl MarkerFamily {
    /// The tag character used in the textual form (`S` or `L`).
    pub fn tag(self) -> char {
        match self {
            MarkerFamily::Short => 'S',
            MarkerFamily::Long => 'L',
        }
    }

    fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'S' => Some(MarkerFamily::Short),
            'L' => Some(MarkerFamily::Long),
            _ => None,
        }
    }
}

/// A literal prefix that introduces an option, tagged with its family.
///
/// The textual form is the family tag followed by the prefix, so `"L--"` is
/// a long marker `--` and `"S-"` is a short marker `-`. This is the form
/// used by [`Display`](fmt::Display), [`FromStr`] and serde.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Marker {
    family: MarkerFamily,
    prefix: String,
}

impl Marker {
    /// A short-family marker with the given prefix.
    pub fn short(prefix: &str) -> Self {
        Self {
            family: MarkerFamily::Short,
            prefix: prefix.to_string(),
        }
    }

    /// A long-family marker with the given prefix.
    pub fn long(prefix: &str) -> Self {
        Self {
            family: MarkerFamily::Long,
            prefix: prefix.to_string(),
        }
    }

    /// Parse the tagged textual form, validating the family tag.
    pub fn parse(tagged: &str) -> Result<Self, GrammarError> {
        let mut chars = tagged.chars();
        let tag = chars.next().ok_or(GrammarError::EmptyMarker)?;
        let family = MarkerFamily::from_tag(tag).ok_or_else(|| GrammarError::UnknownFamily {
            tag,
            marker: tagged.to_string(),
        })?;
        Ok(Self {
            family,
            prefix: chars.as_str().to_string(),
        })
    }

    /// The marker's family.
    pub fn family(&self) -> MarkerFamily {
        self.family
    }

    /// The literal prefix that must start a token.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether this marker introduces short options.
    pub fn is_short(&self) -> bool {
        self.family == MarkerFamily::Short
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family.tag(), self.prefix)
    }
}

impl FromStr for Marker {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Marker::parse(s)
    }
}

impl TryFrom<String> for Marker {
    type Error = GrammarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Marker::parse(&value)
    }
}

impl From<Marker> for String {
    fn from(marker: Marker) -> Self {
        marker.to_string()
    }
}

/// Grammar toggles and token texts.
///
/// All fields are public and may be changed between steps; the change
/// applies from the next step on.
///
/// Defaults:
/// - `mixed_short_params`: off
/// - `long_eq_params`: on
/// - `long_separate_params`: on
/// - `long_abbreviations`: off
/// - `separator`: `"--"`
/// - `delimiter`: `"="`
/// - `markers`: `["L--", "S-"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Let a bundled short option that is not last take its parameter from
    /// the following argument (`-fvs <param>` binds `<param>` to `f`).
    pub mixed_short_params: bool,
    /// Accept `--name=value` parameters for long options.
    pub long_eq_params: bool,
    /// Accept `--name value` parameters for long options.
    pub long_separate_params: bool,
    /// Accept unambiguous (and, reported as such, ambiguous) prefixes of
    /// long option names.
    pub long_abbreviations: bool,
    /// Token after which every argument is positional. `None` disables it.
    pub separator: Option<String>,
    /// Text between a long option name and its inline value. `None`
    /// disables inline values regardless of `long_eq_params`.
    pub delimiter: Option<String>,
    /// Markers in priority order. The first marker whose prefix starts a
    /// token wins, so no marker should be a prefix of a later one.
    pub markers: Vec<Marker>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            mixed_short_params: false,
            long_eq_params: true,
            long_separate_params: true,
            long_abbreviations: false,
            separator: Some("--".to_string()),
            delimiter: Some("=".to_string()),
            markers: vec![Marker::long("--"), Marker::short("-")],
        }
    }
}

impl GrammarConfig {
    /// Check the token texts for values the tokenizer cannot work with.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.delimiter.as_deref() == Some("") {
            return Err(GrammarError::EmptyDelimiter);
        }
        if self.separator.as_deref() == Some("") {
            return Err(GrammarError::EmptySeparator);
        }
        Ok(())
    }

    /// The delimiter to split inline long parameters on, if they are enabled.
    pub(crate) fn inline_delimiter(&self) -> Option<&str> {
        if self.long_eq_params {
            self.delimiter.as_deref()
        } else {
            None
        }
    }

    /// Find the first marker that starts `arg`, with the text after it.
    pub(crate) fn match_marker<'a>(&self, arg: &'a str) -> Option<(&Marker, &'a str)> {
        self.markers
            .iter()
            .find_map(|m| prefix_match(arg, m.prefix()).map(|rest| (m, rest)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tagged_markers() {
        assert_eq!(Marker::parse("L--").unwrap(), Marker::long("--"));
        assert_eq!(Marker::parse("S-").unwrap(), Marker::short("-"));
        assert_eq!(Marker::parse("S/").unwrap().prefix(), "/");
    }

    #[test]
    fn parse_tag_only_gives_empty_prefix() {
        let m = Marker::parse("L").unwrap();
        assert_eq!(m.family(), MarkerFamily::Long);
        assert_eq!(m.prefix(), "");
    }

    #[test]
    fn parse_rejects_unknown_tag() {
        assert_eq!(
            Marker::parse("X-"),
            Err(GrammarError::UnknownFamily {
                tag: 'X',
                marker: "X-".into()
            })
        );
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(Marker::parse(""), Err(GrammarError::EmptyMarker));
    }

    #[test]
    fn display_is_tagged_form() {
        assert_eq!(Marker::long("--").to_string(), "L--");
        assert_eq!("S+".parse::<Marker>().unwrap().to_string(), "S+");
    }

    #[test]
    fn marker_serde_uses_tagged_string() {
        let json = serde_json::to_string(&Marker::short("-")).unwrap();
        assert_eq!(json, "\"S-\"");
        let m: Marker = serde_json::from_str("\"L--\"").unwrap();
        assert_eq!(m, Marker::long("--"));
        assert!(serde_json::from_str::<Marker>("\"Q-\"").is_err());
    }

    #[test]
    fn defaults() {
        let g = GrammarConfig::default();
        assert!(!g.mixed_short_params);
        assert!(g.long_eq_params);
        assert!(g.long_separate_params);
        assert!(!g.long_abbreviations);
        assert_eq!(g.separator.as_deref(), Some("--"));
        assert_eq!(g.delimiter.as_deref(), Some("="));
        assert_eq!(g.markers, vec![Marker::long("--"), Marker::short("-")]);
        assert_eq!(g.validate(), Ok(()));
    }

    #[test]
    fn partial_grammar_json_fills_defaults() {
        let g: GrammarConfig =
            serde_json::from_str(r#"{ "long_abbreviations": true, "separator": null }"#).unwrap();
        assert!(g.long_abbreviations);
        assert_eq!(g.separator, None);
        assert_eq!(g.delimiter.as_deref(), Some("="));
    }

    #[test]
    fn validate_rejects_empty_texts() {
        let g = GrammarConfig {
            delimiter: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(g.validate(), Err(GrammarError::EmptyDelimiter));
        let g = GrammarConfig {
            separator: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(g.validate(), Err(GrammarError::EmptySeparator));
    }

    #[test]
    fn first_marker_wins() {
        let g = GrammarConfig::default();
        let (m, rest) = g.match_marker("--x").unwrap();
        assert_eq!(m, &Marker::long("--"));
        assert_eq!(rest, "x");

        let g = GrammarConfig {
            markers: vec![Marker::short("-"), Marker::long("--")],
            ..Default::default()
        };
        let (m, rest) = g.match_marker("--x").unwrap();
        assert_eq!(m, &Marker::short("-"));
        assert_eq!(rest, "-x");
    }

    #[test]
    fn inline_delimiter_requires_toggle() {
        let mut g = GrammarConfig::default();
        assert_eq!(g.inline_delimiter(), Some("="));
        g.long_eq_params = false;
        assert_eq!(g.inline_delimiter(), None);
        g.long_eq_params = true;
        g.delimiter = None;
        assert_eq!(g.inline_delimiter(), None);
    }
}
