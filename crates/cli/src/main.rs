mod render;

use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use stepopt_core::{
    Band, Cursor, GrammarConfig, Marker, OptionSpec, Outcome, Status, TableFile, describe,
    load_table_from_path, option_text, step, to_diagnostic,
};
use stepopt_diagnostics::{self as diag, ArgLine, Diagnostic, codes};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::render::{Format, print_json, print_summary, render_diagnostics};

/// Environment variable holding the log filter (`EnvFilter` syntax).
const LOG_ENV: &str = "STEPOPT_LOG";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "stepopt",
    version,
    about = "Tokenize command-line arguments one option at a time with a configurable grammar"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Tokenize the arguments after `--` and report every outcome.
    Scan {
        /// Option table JSON (`{"grammar": ..., "options": [...]}`). When
        /// omitted, a built-in demo table is used: -v/--verbose,
        /// -f/--file <param>, -s/--silent, -g, --visual.
        #[arg(long)]
        table: Option<String>,

        #[command(flatten)]
        grammar: GrammarArgs,

        /// Arguments to tokenize.
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Explain a diagnostic ID (e.g. OPT1001). Lists every ID when omitted.
    Explain { id: Option<String> },
}

/// Grammar overrides, applied on top of the table's grammar.
///
/// Overrides are applied as given, without validation, so grammars the
/// tokenizer rejects at run time (an empty delimiter) can be observed.
#[derive(Args, Debug)]
struct GrammarArgs {
    /// Let a bundled short option that is not last take the following
    /// argument as its parameter.
    #[arg(long)]
    mixed_short: bool,

    /// Accept prefixes of long option names.
    #[arg(long)]
    abbrev: bool,

    /// Reject `--name=value` parameters.
    #[arg(long)]
    no_eq_params: bool,

    /// Reject `--name value` parameters.
    #[arg(long)]
    no_separate_params: bool,

    /// Token after which everything is positional.
    #[arg(long, allow_hyphen_values = true, conflicts_with = "no_separator")]
    separator: Option<String>,

    /// Disable the separator.
    #[arg(long)]
    no_separator: bool,

    /// Text between a long option name and its inline parameter.
    #[arg(long, allow_hyphen_values = true)]
    delimiter: Option<String>,

    /// Option marker in tagged form (`S-`, `L--`, `S+`). Repeat to build the
    /// list in priority order; replaces the table's markers.
    #[arg(long = "marker", value_name = "MARKER", value_parser = Marker::parse)]
    markers: Vec<Marker>,
}

impl GrammarArgs {
    fn apply(self, grammar: &mut GrammarConfig) {
        grammar.mixed_short_params |= self.mixed_short;
        grammar.long_abbreviations |= self.abbrev;
        if self.no_eq_params {
            grammar.long_eq_params = false;
        }
        if self.no_separate_params {
            grammar.long_separate_params = false;
        }
        if self.no_separator {
            grammar.separator = None;
        } else if let Some(separator) = self.separator {
            grammar.separator = Some(separator);
        }
        if let Some(delimiter) = self.delimiter {
            grammar.delimiter = Some(delimiter);
        }
        if !self.markers.is_empty() {
            grammar.markers = self.markers;
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli.cmd, format) {
        report_failure(&err, format);
        process::exit(1);
    }
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::Scan {
            table,
            grammar,
            args,
        } => cmd_scan(table.as_deref(), grammar, &args, format),
        Cmd::Explain { id } => cmd_explain(id.as_deref(), format),
    }
}

/// Report a failed command in the requested format.
fn report_failure(err: &anyhow::Error, format: Format) {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            if print_json(&out).is_err() {
                eprintln!("error: {err:#}");
            }
        }
        Format::Pretty => eprintln!("error: {err:#}"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

/// One outcome as reported by `scan`.
#[derive(Debug, Serialize)]
struct ScanRow {
    status: Status,
    band: Band,
    option: Option<String>,
    param: Option<String>,
    marker: Option<Marker>,
    index: Option<usize>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
    diagnostic: Option<Diagnostic>,
}

impl ScanRow {
    fn new(outcome: &Outcome<'_, '_, Value>, grammar: &GrammarConfig, line: &ArgLine) -> Self {
        let span = outcome.index.and_then(|i| line.span(i));
        Self {
            status: outcome.status,
            band: outcome.status.band(),
            option: option_text(outcome, grammar, true),
            param: outcome.param.map(str::to_string),
            marker: outcome.marker.clone(),
            index: outcome.index,
            message: describe(outcome, grammar).to_string(),
            payload: outcome
                .option
                .map(|o| o.payload.clone())
                .filter(|p| !p.is_null()),
            diagnostic: to_diagnostic(outcome, grammar, span),
        }
    }
}

fn cmd_scan(
    table_path: Option<&str>,
    overrides: GrammarArgs,
    args: &[String],
    format: Format,
) -> Result<()> {
    let mut table = match table_path {
        Some(path) => {
            load_table_from_path(path).with_context(|| format!("cannot use table {path}"))?
        }
        None => builtin_table(),
    };
    overrides.apply(&mut table.grammar);
    debug!(grammar = ?table.grammar, args = args.len(), "scanning");

    let line = ArgLine::new(args);
    let mut cursor = Cursor::new(args);
    let mut rows = Vec::new();
    loop {
        let outcome = step(&mut cursor, &table.grammar, &table.options);
        if outcome.status.is_termination() {
            break;
        }
        rows.push(ScanRow::new(&outcome, &table.grammar, &line));
        if outcome.status.is_fatal() {
            break;
        }
    }

    let ok = !rows.iter().any(|r| r.status.is_error());
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "outcomes": rows,
            });
            print_json(&out)?;
        }
        Format::Pretty => {
            // Accepted tokens to stdout, reports to stderr.
            for row in rows.iter().filter(|r| r.status.is_ok()) {
                match (&row.option, &row.param) {
                    (None, param) => println!("argument = {}", param.as_deref().unwrap_or_default()),
                    (Some(option), None) => println!("option = {option}"),
                    (Some(option), Some(param)) => println!("option = {option}; param = {param}"),
                }
            }
            let diagnostics: Vec<Diagnostic> =
                rows.iter().filter_map(|r| r.diagnostic.clone()).collect();
            render_diagnostics(&line, &diagnostics);
            print_summary(&diagnostics);
        }
    }

    exit_on_errors(&rows);
    Ok(())
}

fn cmd_explain(id: Option<&str>, format: Format) -> Result<()> {
    let ids: Vec<&str> = match id {
        Some(id) => vec![id],
        None => codes::ALL.to_vec(),
    };

    match format {
        Format::Json => {
            let out: Vec<_> = ids
                .iter()
                .map(|id| {
                    serde_json::json!({
                        "id": id,
                        "explanation": diag::explain(id),
                    })
                })
                .collect();
            // A single requested ID prints a bare object.
            match out.as_slice() {
                [one] if id.is_some() => print_json(one)?,
                _ => print_json(&out)?,
            }
        }
        Format::Pretty => {
            use ariadne::Fmt;
            // Explanations are the command output, so they go to stdout.
            for id in ids {
                match diag::explain(id) {
                    Some(text) => println!("{}: {}", id.fg(ariadne::Color::Cyan), text),
                    None => println!("{id}: (no explanation available)"),
                }
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Exit with code 1 if any outcome is in the error or fatal band.
fn exit_on_errors(rows: &[ScanRow]) {
    if rows.iter().any(|r| r.status.is_error()) {
        process::exit(1);
    }
}

/// Table used when `--table` is not given.
fn builtin_table() -> TableFile {
    let options = vec![
        OptionSpec::short('v').with_long("verbose"),
        OptionSpec::short('f').with_long("file").with_param(),
        OptionSpec::short('s').with_long("silent"),
        OptionSpec::short('g'),
        OptionSpec::long("visual"),
    ];
    TableFile {
        grammar: GrammarConfig::default(),
        options: options
            .into_iter()
            .map(|o| o.with_payload(Value::Null))
            .collect(),
    }
}
