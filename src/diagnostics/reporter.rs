//! Terminal rendering of lint reports

use std::fmt::Write;

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::linter::LintReport;
use super::rule::RuleStatus;

/// Renders the report as a table followed by a summary
pub fn format_report(report: &LintReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Rule", "Status", "Findings", "Time", "Message"]);
    for outcome in &report.outcomes {
        let result = &outcome.result;
        builder.push_record([
            outcome.rule.to_string(),
            result.status.colored().to_string(),
            result.findings.len().to_string(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut out = table.to_string();
    out.push('\n');
    write_summary(&mut out, report);
    out
}

fn write_summary(out: &mut String, report: &LintReport) {
    let _ = writeln!(out, "\n{}", "Summary".bold().underline());
    let _ = writeln!(out, "  Rules run: {}", report.total());
    for (status, mark) in [
        (RuleStatus::Pass, "✓".green()),
        (RuleStatus::Warn, "⚠".yellow()),
        (RuleStatus::Fail, "✗".red()),
    ] {
        let count = report.count(status);
        if count > 0 || status == RuleStatus::Pass {
            let _ = writeln!(out, "  {mark} {}: {count}", status.label());
        }
    }

    let verdict = match report.worst() {
        RuleStatus::Pass => "Bindings: OK".green(),
        RuleStatus::Warn => "Bindings: OK (with warnings)".yellow(),
        RuleStatus::Fail => "Bindings: INVALID".red(),
    };
    let _ = writeln!(out, "\n  {}", verdict.bold());
}

/// Prints the report, then the findings of every rule that has any
pub fn print_report(report: &LintReport) {
    println!("{}", format_report(report));

    for outcome in report.outcomes.iter().filter(|o| !o.result.findings.is_empty()) {
        println!("{} {}", outcome.result.status.colored(), outcome.rule.bold());
        if let Some(description) = outcome.description {
            println!("  {}", description.dimmed());
        }
        for finding in &outcome.result.findings {
            println!("  - {finding}");
        }
        println!();
    }
}
