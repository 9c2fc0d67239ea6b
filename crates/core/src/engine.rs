//! The single-step transition function.
//!
//! [`step`] classifies at most one option occurrence or positional argument
//! per call. Skipping a claimed parameter, swallowing the separator and
//! finishing a short-option run are handled inside the same call, so they
//! never surface as steps of their own.

use tracing::trace;

use crate::config::{GrammarConfig, Marker, MarkerFamily};
use crate::cursor::{Cursor, Position};
use crate::matcher::bounded_prefix_match;
use crate::options::OptionSpec;
use crate::outcome::{Outcome, ParamCheck, Status};

/// Advance `cursor` by one option occurrence or positional argument.
///
/// Once the argument vector is exhausted every call returns [`Status::End`]
/// and leaves the cursor unchanged. A [`Status::Fatal`] outcome also leaves
/// the cursor unchanged; the caller should stop stepping.
///
/// The grammar and the option table are only read, and may be changed
/// between calls.
pub fn step<'a, 't, S, T>(
    cursor: &mut Cursor<'a, S>,
    grammar: &GrammarConfig,
    options: &'t [OptionSpec<T>],
) -> Outcome<'a, 't, T>
where
    S: AsRef<str>,
{
    let outcome = resolve(cursor, grammar, options);
    trace!(status = ?outcome.status, index = ?outcome.index, "step");
    outcome
}

fn resolve<'a, 't, S, T>(
    cursor: &mut Cursor<'a, S>,
    grammar: &GrammarConfig,
    options: &'t [OptionSpec<T>],
) -> Outcome<'a, 't, T>
where
    S: AsRef<str>,
{
    loop {
        let Some(arg) = cursor.current() else {
            return Outcome::end();
        };
        let index = cursor.index();

        match *cursor.position() {
            Position::PastSeparator => {
                cursor.advance();
                return Outcome::positional(arg, index);
            }
            Position::AtArgumentStart { skip_next: true } => {
                cursor.advance();
                cursor.set_position(Position::default());
                continue;
            }
            Position::AtArgumentStart { skip_next: false } => {
                if grammar.separator.as_deref() == Some(arg) {
                    cursor.advance();
                    cursor.set_position(Position::PastSeparator);
                    continue;
                }

                // No marker, or a marker with no option name after it: positional.
                let Some((marker, rest)) = grammar
                    .match_marker(arg)
                    .filter(|(_, rest)| !rest.is_empty())
                else {
                    cursor.advance();
                    return Outcome::positional(arg, index);
                };

                match marker.family() {
                    MarkerFamily::Short => cursor.set_position(Position::InShortRun {
                        offset: arg.len() - rest.len(),
                        marker: marker.clone(),
                        value_claimed: false,
                    }),
                    MarkerFamily::Long => {
                        return long_option(cursor, grammar, options, marker, rest);
                    }
                }
            }
            Position::InShortRun { .. } => {}
        }

        if let Some(outcome) = short_option(cursor, grammar, options) {
            return outcome;
        }
    }
}

/// One character of a short-option run. `None` means the run is finished
/// and the caller should continue with the next argument.
fn short_option<'a, 't, S, T>(
    cursor: &mut Cursor<'a, S>,
    grammar: &GrammarConfig,
    options: &'t [OptionSpec<T>],
) -> Option<Outcome<'a, 't, T>>
where
    S: AsRef<str>,
{
    let (offset, marker, value_claimed) = match cursor.position() {
        Position::InShortRun {
            offset,
            marker,
            value_claimed,
        } => (*offset, marker.clone(), *value_claimed),
        _ => return Some(Outcome::new(Status::Fatal)),
    };
    let Some(arg) = cursor.current() else {
        return Some(Outcome::end());
    };

    let Some(ch) = arg.get(offset..).and_then(|s| s.chars().next()) else {
        cursor.finish_argument();
        return None;
    };
    let after = offset + ch.len_utf8();

    let mut outcome = Outcome {
        marker: Some(marker.clone()),
        index: Some(cursor.index()),
        ..Outcome::new(Status::Ok)
    };

    let Some(option) = options.iter().find(|o| o.short == Some(ch)) else {
        // Report the rest of the argument; resume after the bad character.
        outcome.status = Status::BadOption;
        outcome.param = Some(&arg[offset..]);
        cursor.set_position(Position::InShortRun {
            offset: after,
            marker,
            value_claimed,
        });
        return Some(outcome);
    };
    outcome.option = Some(option);

    if !option.requires_param() {
        cursor.set_position(Position::InShortRun {
            offset: after,
            marker,
            value_claimed,
        });
        return Some(outcome);
    }

    if after == arg.len() || grammar.mixed_short_params {
        // The parameter is the following argument.
        let mut claimed = value_claimed;
        match cursor.peek_following() {
            None => outcome.status = Status::MissingParam,
            Some(_) if value_claimed => outcome.status = Status::MultipleMixed,
            Some(next) => {
                outcome.param = Some(next);
                claimed = true;
            }
        }
        cursor.set_position(Position::InShortRun {
            offset: after,
            marker,
            value_claimed: claimed,
        });
        return Some(outcome);
    }

    // The parameter is the rest of this argument.
    outcome.param = Some(&arg[after..]);
    cursor.finish_argument();
    Some(outcome)
}

fn long_option<'a, 't, S, T>(
    cursor: &mut Cursor<'a, S>,
    grammar: &GrammarConfig,
    options: &'t [OptionSpec<T>],
    marker: &Marker,
    text: &'a str,
) -> Outcome<'a, 't, T>
where
    S: AsRef<str>,
{
    let mut outcome = Outcome {
        marker: Some(marker.clone()),
        index: Some(cursor.index()),
        ..Outcome::new(Status::Ok)
    };

    let delimiter = grammar.inline_delimiter();
    if delimiter == Some("") {
        outcome.status = Status::Fatal;
        outcome.name = Some(text);
        return outcome;
    }

    let (name, inline) = match delimiter.and_then(|d| text.find(d).map(|at| (at, d.len()))) {
        Some((at, len)) => (&text[..at], Some(&text[at + len..])),
        None => (text, None),
    };
    outcome.name = Some(name);

    let mut chosen = None;
    let mut others = 0usize;
    for option in options {
        let Some(long) = option.long.as_deref() else {
            continue;
        };
        if grammar.long_abbreviations {
            if bounded_prefix_match(long, text, name.len()) {
                if chosen.is_none() {
                    chosen = Some(option);
                } else {
                    others += 1;
                }
            }
        } else if long == name {
            chosen = Some(option);
            break;
        }
    }

    // The option token is consumed whatever the result.
    cursor.advance();

    let Some(option) = chosen else {
        outcome.status = Status::BadOption;
        outcome.param = Some(text);
        return outcome;
    };
    outcome.option = Some(option);

    let check = match (inline, option.requires_param()) {
        (Some(value), true) => {
            outcome.param = Some(value);
            ParamCheck::Ok
        }
        (Some(value), false) => {
            outcome.param = Some(value);
            ParamCheck::HadParam
        }
        (None, true) if grammar.long_separate_params => match cursor.current() {
            Some(next) => {
                cursor.advance();
                outcome.param = Some(next);
                ParamCheck::Ok
            }
            None => ParamCheck::MissingParam,
        },
        (None, true) => ParamCheck::NoParam,
        (None, false) => ParamCheck::Ok,
    };

    outcome.status = if others == 0 {
        check.into()
    } else {
        Status::Ambiguous { check, others }
    };
    outcome
}
