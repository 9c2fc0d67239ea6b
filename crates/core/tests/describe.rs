//! Tests for option text reconstruction, messages and diagnostics.

mod common;

use common::demo_table;
use stepopt_core::{
    ArgLine, Cursor, GrammarConfig, Marker, OptionSpec, Outcome, Severity, Span, codes, describe,
    option_text, step, to_diagnostic,
};

/// Step through `args` and return the first non-positional outcome.
fn first_option<'a, 't>(
    args: &'a [&'a str],
    grammar: &GrammarConfig,
    options: &'t [OptionSpec],
) -> Outcome<'a, 't, ()> {
    let mut cursor = Cursor::new(args);
    loop {
        let o = step(&mut cursor, grammar, options);
        if !o.is_positional() {
            return o;
        }
    }
}

fn message(args: &[&str], grammar: &GrammarConfig) -> String {
    let options = demo_table();
    let o = first_option(args, grammar, &options);
    describe(&o, grammar).to_string()
}

// ─── option_text ─────────────────────────────────────────────────────────────

#[test]
fn option_text_with_and_without_marker() {
    let g = GrammarConfig::default();
    let options = demo_table();

    let o = first_option(&["-v"], &g, &options);
    assert_eq!(option_text(&o, &g, true).as_deref(), Some("-v"));
    assert_eq!(option_text(&o, &g, false).as_deref(), Some("v"));

    let o = first_option(&["--file=x"], &g, &options);
    assert_eq!(option_text(&o, &g, true).as_deref(), Some("--file"));
    assert_eq!(option_text(&o, &g, false).as_deref(), Some("file"));
}

#[test]
fn option_text_uses_full_name_for_abbreviations() {
    let g = GrammarConfig {
        long_abbreviations: true,
        ..GrammarConfig::default()
    };
    let options = demo_table();
    let o = first_option(&["--sil"], &g, &options);
    assert_eq!(option_text(&o, &g, true).as_deref(), Some("--silent"));
}

#[test]
fn option_text_for_unresolved_tokens() {
    let g = GrammarConfig::default();
    let options = demo_table();

    let o = first_option(&["-qv"], &g, &options);
    assert_eq!(option_text(&o, &g, true).as_deref(), Some("-q"));

    let o = first_option(&["--nope=1"], &g, &options);
    assert_eq!(o.param, Some("nope=1"));
    assert_eq!(option_text(&o, &g, true).as_deref(), Some("--nope"));
}

#[test]
fn option_text_absent_for_positionals_and_end() {
    let g = GrammarConfig::default();
    let options = demo_table();
    let args = ["plain"];
    let mut cursor = Cursor::new(&args);

    let positional = step(&mut cursor, &g, &options);
    assert_eq!(option_text(&positional, &g, true), None);
    let end = step(&mut cursor, &g, &options);
    assert_eq!(option_text(&end, &g, true), None);
}

#[test]
fn option_text_follows_the_reporting_marker() {
    let g = GrammarConfig {
        markers: vec![Marker::long("--"), Marker::short("-"), Marker::short("+")],
        ..GrammarConfig::default()
    };
    let options = demo_table();
    let o = first_option(&["+f", "x"], &g, &options);
    assert_eq!(option_text(&o, &g, true).as_deref(), Some("+f"));
}

// ─── describe ────────────────────────────────────────────────────────────────

#[test]
fn messages_per_status() {
    let g = GrammarConfig::default();
    assert_eq!(message(&["-z"], &g), "Unknown option -z");
    assert_eq!(message(&["--zzz"], &g), "Unknown option --zzz");
    assert_eq!(message(&["-f"], &g), "Required parameter omitted for -f");
    assert_eq!(message(&["--silent=yes"], &g), "Parameter given to --silent");
    assert_eq!(message(&["-v"], &g), "Option -v");

    let no_separate = GrammarConfig {
        long_separate_params: false,
        ..GrammarConfig::default()
    };
    assert_eq!(
        message(&["--file", "x"], &no_separate),
        "Required parameter omitted for --file"
    );

    let mixed = GrammarConfig {
        mixed_short_params: true,
        ..GrammarConfig::default()
    };
    let options = demo_table();
    let args = ["-ff", "a", "b"];
    let mut cursor = Cursor::new(&args);
    step(&mut cursor, &mixed, &options);
    let o = step(&mut cursor, &mixed, &options);
    assert_eq!(
        describe(&o, &mixed).to_string(),
        "More than one parameter required in a block of short options"
    );

    let abbrev = GrammarConfig {
        long_abbreviations: true,
        ..GrammarConfig::default()
    };
    assert_eq!(message(&["--v"], &abbrev), "Ambiguous abbreviation --v");
}

#[test]
fn fatal_message_names_the_typed_option() {
    let g = GrammarConfig {
        delimiter: Some(String::new()),
        ..GrammarConfig::default()
    };
    assert_eq!(message(&["--file"], &g), "Internal error while processing --file");
    assert_eq!(
        message(&["--file=x"], &g),
        "Internal error while processing --file=x"
    );
}

#[test]
fn ambiguous_text_is_what_was_typed() {
    let g = GrammarConfig {
        long_abbreviations: true,
        ..GrammarConfig::default()
    };
    let options = vec![OptionSpec::long("verbose"), OptionSpec::long("verb")];

    let o = first_option(&["--ve"], &g, &options);
    assert_eq!(option_text(&o, &g, true).as_deref(), Some("--ve"));
    assert_eq!(option_text(&o, &g, false).as_deref(), Some("ve"));
    assert_eq!(o.option.and_then(|opt| opt.long.as_deref()), Some("verbose"));
    assert_eq!(describe(&o, &g).to_string(), "Ambiguous abbreviation --ve");

    let o = first_option(&["--ve=1"], &g, &options);
    assert_eq!(o.name, Some("ve"));
    assert_eq!(option_text(&o, &g, true).as_deref(), Some("--ve"));
}

#[test]
fn positional_and_end_messages() {
    let g = GrammarConfig::default();
    let options = demo_table();
    let args = ["input"];
    let mut cursor = Cursor::new(&args);
    let o = step(&mut cursor, &g, &options);
    assert_eq!(describe(&o, &g).to_string(), "Argument input");
    let o = step(&mut cursor, &g, &options);
    assert_eq!(describe(&o, &g).to_string(), "End of options");
}

// ─── to_diagnostic ───────────────────────────────────────────────────────────

#[test]
fn ok_outcomes_have_no_diagnostic() {
    let g = GrammarConfig::default();
    let options = demo_table();
    let o = first_option(&["-v"], &g, &options);
    assert!(to_diagnostic(&o, &g, None).is_none());
}

#[test]
fn bad_option_diagnostic() {
    let g = GrammarConfig::default();
    let options = demo_table();
    let args = ["in", "-zq"];
    let line = ArgLine::new(&args);
    let o = first_option(&args, &g, &options);

    let span = o.index.and_then(|i| line.span(i));
    let diag = to_diagnostic(&o, &g, span).expect("bad option is reported");
    assert_eq!(diag.id, codes::BAD_OPTION);
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.message, "Unknown option -z");
    assert_eq!(diag.span, Some(Span::new(3, 6)));

    let ctx = diag.context.as_ref().expect("context");
    assert_eq!(ctx.get("option").map(String::as_str), Some("-z"));
    assert_eq!(ctx.get("param").map(String::as_str), Some("zq"));
    assert_eq!(ctx.get("marker").map(String::as_str), Some("S-"));
    assert!(diag.explain().is_some());
}

#[test]
fn had_param_is_a_warning() {
    let g = GrammarConfig::default();
    let options = demo_table();
    let o = first_option(&["--verbose=1"], &g, &options);
    let diag = to_diagnostic(&o, &g, None).expect("had param is reported");
    assert_eq!(diag.id, codes::HAD_PARAM);
    assert_eq!(diag.severity, Severity::Warn);
    assert_eq!(diag.span, None);
}

#[test]
fn ambiguous_diagnostic_carries_secondary_check() {
    let g = GrammarConfig {
        long_abbreviations: true,
        ..GrammarConfig::default()
    };
    let options = demo_table();
    let o = first_option(&["--v=1"], &g, &options);
    let diag = to_diagnostic(&o, &g, None).expect("ambiguity is reported");
    assert_eq!(diag.id, codes::AMBIGUOUS_OPTION);

    let ctx = diag.context.as_ref().expect("context");
    assert_eq!(ctx.get("secondary").map(String::as_str), Some("had_param"));
    assert_eq!(ctx.get("others").map(String::as_str), Some("1"));
    assert_eq!(ctx.get("option").map(String::as_str), Some("--v"));
    assert_eq!(ctx.get("chosen").map(String::as_str), Some("verbose"));
    assert_eq!(diag.message, "Ambiguous abbreviation --v");
}

#[test]
fn missing_and_no_param_use_distinct_codes() {
    let options = demo_table();

    let g = GrammarConfig::default();
    let o = first_option(&["--file"], &g, &options);
    assert_eq!(
        to_diagnostic(&o, &g, None).map(|d| d.id),
        Some(codes::MISSING_PARAM.into())
    );

    let g = GrammarConfig {
        long_separate_params: false,
        ..GrammarConfig::default()
    };
    let o = first_option(&["--file", "x"], &g, &options);
    assert_eq!(
        to_diagnostic(&o, &g, None).map(|d| d.id),
        Some(codes::NO_PARAM.into())
    );
}

#[test]
fn fatal_diagnostic() {
    let g = GrammarConfig {
        delimiter: Some(String::new()),
        ..GrammarConfig::default()
    };
    let options = demo_table();
    let o = first_option(&["--file"], &g, &options);
    let diag = to_diagnostic(&o, &g, None).expect("fatal is reported");
    assert_eq!(diag.id, codes::INTERNAL);
    assert_eq!(diag.severity, Severity::Error);
    let ctx = diag.context.as_ref().expect("context");
    assert_eq!(ctx.get("option").map(String::as_str), Some("--file"));
}
