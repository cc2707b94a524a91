//! User-facing terminal output.
//! Consistent prefixes, colored only when stdout is a TTY. Logs go through
//! `tracing`; this module is for what the user asked to see.

use owo_colors::OwoColorize;

use crate::report::OperationReport;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Render the text lines of a report (no colors, no trailing newline).
pub fn render_report(report: &OperationReport) -> Vec<String> {
    let mut lines = vec![report.summary()];
    if !report.unresolved.is_empty() {
        lines.push("Not found in source:".to_string());
        lines.extend(report.unresolved.iter().map(|n| format!("  {n}")));
    }
    if !report.failures.is_empty() {
        lines.push("Failed to copy:".to_string());
        lines.extend(
            report
                .failures
                .iter()
                .map(|f| format!("  {} -> {}: {}", f.source.display(), f.destination.display(), f.message)),
        );
    }
    lines
}

/// Print a report on stdout: the summary tagged `ok:` or `incomplete:`
/// (green/yellow on a TTY), then the detail lines plain.
pub fn print_report(report: &OperationReport) {
    let mut lines = render_report(report).into_iter();
    if let Some(summary) = lines.next() {
        match (report.is_complete(), is_tty()) {
            (true, _) => print_success(&summary),
            (false, true) => println!("{} {}", "incomplete:".yellow().bold(), summary),
            (false, false) => println!("incomplete: {summary}"),
        }
    }
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CopyFailure, Mode};
    use std::path::PathBuf;

    #[test]
    fn render_lists_unresolved_and_failures() {
        let report = OperationReport {
            mode: Mode::Direct,
            dry_run: false,
            total: 3,
            copied: 1,
            unresolved: vec!["missing.png".into()],
            failures: vec![CopyFailure {
                name: "b.png".into(),
                source: PathBuf::from("/s/b.png"),
                destination: PathBuf::from("/d/x/b.png"),
                message: "denied".into(),
            }],
        };
        let lines = render_report(&report);
        assert_eq!(lines[0], "[direct] total=3 resolved=2 copied=1 unresolved=1 failed=1");
        assert!(lines.contains(&"  missing.png".to_string()));
        assert!(lines.iter().any(|l| l.contains("/d/x/b.png") && l.contains("denied")));
    }
}
