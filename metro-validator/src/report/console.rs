//! Colorized console rendering of a validation run.

use std::fmt::Write;

use colored::Colorize;

use crate::dataset::Stats;
use crate::validate::{Severity, Status, ValidationReport, ValidationResult};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Options for console output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOptions {
    /// Also list warnings, and list errors for every category
    pub verbose: bool,
}

/// Banner printed before anything is loaded.
pub fn render_header(version: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {} {}",
        "Metro Data Validator".bold(),
        format!("v{version}").dimmed()
    );
    let _ = writeln!(out, "{}", format!("  {RULE}").dimmed());
    let _ = writeln!(out);
    out
}

/// Dataset location and entity counts.
pub fn render_stats(database: &str, stats: &Stats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {} {}", "Database:".cyan(), database);
    let _ = writeln!(
        out,
        "  {} Cities: {} | Lines: {} | Stations: {} | Connections: {}",
        "Stats:".cyan(),
        stats.cities,
        stats.lines,
        stats.stations,
        stats.connections
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", format!("  {RULE}").dimmed());
    let _ = writeln!(out);
    out
}

/// One line per category, with issues underneath where relevant.
pub fn render_results(report: &ValidationReport, options: ConsoleOptions) -> String {
    let mut out = String::new();
    for result in report.results() {
        render_category(&mut out, result, options);
    }
    let _ = writeln!(out);
    out
}

fn render_category(out: &mut String, r: &ValidationResult, options: ConsoleOptions) {
    let icon = if r.has_errors() {
        "✗".red()
    } else if r.has_warnings() {
        "⚠".yellow()
    } else {
        "✓".green()
    };

    let name = format!("{:<12} Validations", capitalize(r.category.as_str()));
    let counts = if r.has_warnings() {
        format!(
            "[{}/{} passed, {} warnings]",
            r.passed,
            r.total(),
            r.warnings
        )
    } else {
        format!("[{}/{} passed]", r.passed, r.total())
    };
    let _ = writeln!(out, "  {icon} {name} {}", counts.dimmed());

    if !(options.verbose || r.has_errors()) {
        return;
    }
    for issue in &r.issues {
        match issue.severity {
            Severity::Error => {
                let _ = writeln!(
                    out,
                    "      {} {}: {}",
                    "└─ ERROR:".red(),
                    issue.id,
                    issue.message
                );
            }
            Severity::Warning if options.verbose => {
                let _ = writeln!(
                    out,
                    "      {} {}: {}",
                    "└─ WARNING:".yellow(),
                    issue.id,
                    issue.message
                );
            }
            Severity::Warning => {}
        }
    }
}

/// Totals and the final status line.
pub fn render_summary(report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("  {RULE}").dimmed());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {} {} failed, {} with warnings",
        "Summary:".bold(),
        report.total_failed(),
        report.total_warnings()
    );

    let status = match report.status() {
        Status::Pass => "PASS".green(),
        Status::PassWithWarnings => "PASS (with warnings)".yellow(),
        Status::Fail => "FAIL".red(),
    };
    let _ = writeln!(out, "  {} {}", "Status:".bold(), status);
    let _ = writeln!(out);
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
