//! Pretty diagnostic rendering using ariadne.
//!
//! Converts [`Diagnostic`]s produced while scanning into ariadne [`Report`]s
//! drawn over the reconstructed command line. Machine-readable output is
//! emitted as JSON instead when piped or requested.

use std::io::{self, IsTerminal};

use anyhow::Result;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use serde::Serialize;
use stepopt_diagnostics::{ArgLine, Diagnostic, Severity};

/// Name shown in report headers for the reconstructed command line.
const SOURCE_NAME: &str = "argv";

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, argument-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or pick based on whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

fn context_note(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|ctx| !ctx.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics to stderr, underlining the argument each one is about.
///
/// Diagnostics without a span (or an empty command line) are printed as
/// standalone messages.
pub(crate) fn render_diagnostics(line: &ArgLine, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let source = line.text();
    let config = Config::default().with_compact(false);
    let mut cache = (SOURCE_NAME, Source::from(source));

    for diag in diagnostics {
        let Some(span) = diag.span.filter(|_| !source.is_empty()) else {
            render_standalone(diag);
            continue;
        };

        // Clamp to the line so a stale span cannot panic the renderer.
        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);

        let mut builder = Report::build(report_kind(&diag.severity), (SOURCE_NAME, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config);

        builder = builder.with_label(
            Label::new((SOURCE_NAME, start..end))
                .with_message(label_message(diag))
                .with_color(severity_color(&diag.severity)),
        );

        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }

        builder.finish().eprint(&mut cache).ok();
    }
}

fn render_standalone(diag: &Diagnostic) {
    let kind_str = match diag.severity {
        Severity::Error => "error",
        Severity::Warn => "warning",
        Severity::Info => "info",
        _ => "diagnostic",
    };
    eprintln!("{kind_str}[{}]: {}", diag.id, diag.message);

    if let Some(note) = context_note(diag) {
        eprintln!("  = note: {note}");
    }
    if let Some(explanation) = diag.explain() {
        eprintln!("  = help: {explanation}");
    }
}

/// Label text under the underlined argument: the structured context when
/// there is one (`marker=S-, option=-z, param=zq`), else the message.
fn label_message(diag: &Diagnostic) -> String {
    context_note(diag).unwrap_or_else(|| diag.message.clone())
}

// ── JSON rendering ──────────────────────────────────────────────────────

/// Print a value as pretty JSON to stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line showing error/warning/info counts.
///
/// Example: `2 errors, 1 warning`
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    use ariadne::Fmt;

    let (mut errors, mut warnings, mut infos) = (0usize, 0usize, 0usize);
    for d in diagnostics {
        match d.severity {
            Severity::Error => errors += 1,
            Severity::Warn => warnings += 1,
            Severity::Info => infos += 1,
            _ => warnings += 1,
        }
    }

    if errors + warnings + infos == 0 {
        return;
    }

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(format!(
            "{}",
            format!("{warnings} warning{s}").fg(Color::Yellow)
        ));
    }
    if infos > 0 {
        parts.push(format!("{}", format!("{infos} info").fg(Color::Blue)));
    }
    eprintln!("{}", parts.join(", "));
}
