//! Human-readable reconstruction of step outcomes.
//!
//! Everything here only reads an [`Outcome`] and the grammar it was produced
//! under; nothing touches the session.

use std::collections::BTreeMap;
use std::fmt;

use stepopt_diagnostics::{Diagnostic, Span, codes};

use crate::config::{GrammarConfig, MarkerFamily};
use crate::outcome::{Outcome, ParamCheck, Status};

/// Reconstruct the option text an outcome is about.
///
/// Returns `None` when the outcome carries no marker (positional arguments
/// and termination). For an unresolved short option this is the offending
/// character. Unresolved, ambiguous and fatal long options give the name as
/// typed, cut at the delimiter when inline parameters are enabled, so
/// `--ve` stays `--ve` even though it resolved to `--verbose`. Otherwise it
/// is the resolved option's short or long form, depending on the marker
/// family. With `show_marker` the marker prefix is prepended (`-v`,
/// `--file`).
pub fn option_text<T>(
    outcome: &Outcome<'_, '_, T>,
    grammar: &GrammarConfig,
    show_marker: bool,
) -> Option<String> {
    let marker = outcome.marker.as_ref()?;
    if outcome.status == Status::End {
        return None;
    }

    let mut text = String::new();
    if show_marker {
        text.push_str(marker.prefix());
    }

    let typed = outcome.option.is_none() || matches!(outcome.status, Status::Ambiguous { .. });
    match (outcome.option, marker.family()) {
        (None, MarkerFamily::Short) => {
            if let Some(ch) = outcome.param.and_then(|p| p.chars().next()) {
                text.push(ch);
            }
        }
        (_, MarkerFamily::Long) if typed => {
            let name = match (outcome.name, outcome.option) {
                (Some(name), _) => name,
                (None, None) => unresolved_name(outcome.param, grammar),
                (None, Some(option)) => option.long.as_deref().unwrap_or_default(),
            };
            text.push_str(name);
        }
        (Some(option), MarkerFamily::Short) => {
            if let Some(ch) = option.short {
                text.push(ch);
            }
        }
        (option, MarkerFamily::Long) => {
            text.push_str(option.and_then(|o| o.long.as_deref()).unwrap_or_default());
        }
    }
    Some(text)
}

// Outcomes assembled by callers may lack `name`.
fn unresolved_name<'a>(param: Option<&'a str>, grammar: &GrammarConfig) -> &'a str {
    let raw = param.unwrap_or_default();
    match grammar.inline_delimiter().filter(|d| !d.is_empty()) {
        Some(d) => raw.find(d).map_or(raw, |at| &raw[..at]),
        None => raw,
    }
}

/// A one-line description of an outcome, produced by [`describe`].
pub struct Describe<'o, T> {
    outcome: &'o Outcome<'o, 'o, T>,
    grammar: &'o GrammarConfig,
}

/// Describe an outcome in one line, e.g. `Unknown option -z`.
pub fn describe<'o, T>(
    outcome: &'o Outcome<'o, 'o, T>,
    grammar: &'o GrammarConfig,
) -> Describe<'o, T> {
    Describe { outcome, grammar }
}

impl<T> fmt::Display for Describe<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = option_text(self.outcome, self.grammar, true).unwrap_or_default();
        match self.outcome.status {
            Status::Fatal if opt.is_empty() => write!(f, "Internal error"),
            Status::Fatal => write!(f, "Internal error while processing {opt}"),
            Status::HadParam => write!(f, "Parameter given to {opt}"),
            Status::MultipleMixed => write!(
                f,
                "More than one parameter required in a block of short options"
            ),
            Status::Ambiguous { .. } => write!(f, "Ambiguous abbreviation {opt}"),
            Status::BadOption => write!(f, "Unknown option {opt}"),
            Status::NoParam | Status::MissingParam => {
                write!(f, "Required parameter omitted for {opt}")
            }
            Status::Ok if self.outcome.option.is_none() => {
                write!(f, "Argument {}", self.outcome.param.unwrap_or_default())
            }
            Status::Ok => write!(f, "Option {opt}"),
            Status::End => write!(f, "End of options"),
        }
    }
}

/// Turn a non-ok outcome into a [`Diagnostic`].
///
/// Returns `None` for ok outcomes and termination. `span` is passed through
/// untouched; see [`stepopt_diagnostics::ArgLine`] for one way to compute it.
pub fn to_diagnostic<T>(
    outcome: &Outcome<'_, '_, T>,
    grammar: &GrammarConfig,
    span: Option<Span>,
) -> Option<Diagnostic> {
    let id = match outcome.status {
        Status::Ok | Status::End => return None,
        Status::Fatal => codes::INTERNAL,
        Status::BadOption => codes::BAD_OPTION,
        Status::Ambiguous { .. } => codes::AMBIGUOUS_OPTION,
        Status::MissingParam => codes::MISSING_PARAM,
        Status::NoParam => codes::NO_PARAM,
        Status::HadParam => codes::HAD_PARAM,
        Status::MultipleMixed => codes::MULTIPLE_MIXED,
    };
    let message = describe(outcome, grammar).to_string();
    let diag = if outcome.status == Status::HadParam {
        Diagnostic::warn(id, message, span)
    } else {
        Diagnostic::error(id, message, span)
    };

    let mut ctx = BTreeMap::new();
    if let Some(opt) = option_text(outcome, grammar, true) {
        ctx.insert("option".to_string(), opt);
    }
    if let Some(param) = outcome.param {
        ctx.insert("param".to_string(), param.to_string());
    }
    if let Some(marker) = &outcome.marker {
        ctx.insert("marker".to_string(), marker.to_string());
    }
    if let Status::Ambiguous { check, others } = outcome.status {
        if let Some(long) = outcome.option.and_then(|o| o.long.as_deref()) {
            ctx.insert("chosen".to_string(), long.to_string());
        }
        ctx.insert("secondary".to_string(), check_name(check).to_string());
        ctx.insert("others".to_string(), others.to_string());
    }

    Some(if ctx.is_empty() {
        diag
    } else {
        diag.with_context(ctx)
    })
}

fn check_name(check: ParamCheck) -> &'static str {
    match check {
        ParamCheck::Ok => "ok",
        ParamCheck::MissingParam => "missing_param",
        ParamCheck::NoParam => "no_param",
        ParamCheck::HadParam => "had_param",
    }
}
