//! Shared test helpers for `stepopt_core` integration tests.

#![allow(unreachable_pub)]

use stepopt_core::{Cursor, GrammarConfig, OptionSpec, Status, option_text, step};

/// Steps allowed before a run is considered stuck.
#[allow(dead_code)]
const STEP_LIMIT: usize = 100;

/// The table used throughout: `-v/--verbose`, `-f/--file <param>`,
/// `-s/--silent`, `-g` (short only), `--visual` (long only).
#[allow(dead_code)]
pub fn demo_table() -> Vec<OptionSpec> {
    vec![
        OptionSpec::short('v').with_long("verbose"),
        OptionSpec::short('f').with_long("file").with_param(),
        OptionSpec::short('s').with_long("silent"),
        OptionSpec::short('g'),
        OptionSpec::long("visual"),
    ]
}

/// Owned summary of one outcome: status, option text with marker, param.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub status: Status,
    pub option: Option<String>,
    pub param: Option<String>,
}

/// An ok option occurrence.
#[allow(dead_code)]
pub fn opt(option: &str, param: Option<&str>) -> Seen {
    seen(Status::Ok, Some(option), param)
}

/// A positional argument.
#[allow(dead_code)]
pub fn arg(text: &str) -> Seen {
    seen(Status::Ok, None, Some(text))
}

/// Termination.
#[allow(dead_code)]
pub fn end() -> Seen {
    seen(Status::End, None, None)
}

#[allow(dead_code)]
pub fn seen(status: Status, option: Option<&str>, param: Option<&str>) -> Seen {
    Seen {
        status,
        option: option.map(str::to_string),
        param: param.map(str::to_string),
    }
}

/// Step until termination or a fatal outcome, summarizing every outcome.
#[allow(dead_code)]
pub fn run_all<T>(grammar: &GrammarConfig, options: &[OptionSpec<T>], args: &[&str]) -> Vec<Seen> {
    let mut cursor = Cursor::new(args);
    let mut out = Vec::new();
    for _ in 0..STEP_LIMIT {
        let o = step(&mut cursor, grammar, options);
        out.push(Seen {
            status: o.status,
            option: option_text(&o, grammar, true),
            param: o.param.map(str::to_string),
        });
        if o.status.is_termination() || o.status.is_fatal() {
            return out;
        }
    }
    panic!("no termination after {STEP_LIMIT} steps: {out:?}");
}

/// Split a space-separated argument list.
#[allow(dead_code)]
pub fn words(line: &str) -> Vec<&str> {
    line.split(' ').filter(|w| !w.is_empty()).collect()
}
