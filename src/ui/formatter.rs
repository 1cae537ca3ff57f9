//! Pure formatting functions for UI output.
//!
//! Progress goes to stdout, errors and warnings to stderr. Styling comes from
//! `console`, which drops colors when the stream is not a terminal.

use console::style;

use crate::boundary::ReleaseWarning;
use crate::domain::{CoverageReport, FileChange, Version};

/// Lines of failed tool output shown before truncating.
const TOOL_OUTPUT_TAIL: usize = 20;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a release warning, listing files for a dirty tree.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
    if let ReleaseWarning::DirtyWorkingTree { changes } = warning {
        display_changed_files(changes);
    }
}

/// Display changed files in `git status --short` form.
pub fn display_changed_files(changes: &[FileChange]) {
    for change in changes {
        eprintln!("    {}", style(change).dim());
    }
}

/// Display the coverage total, or note that none was found.
pub fn display_coverage(report: Option<&CoverageReport>, threshold: u32) {
    match report {
        Some(report) if report.is_below(threshold) => {
            println!(
                "  Coverage: {} (threshold {}%)",
                style(format!("{}%", report.percent)).red(),
                threshold
            );
        }
        Some(report) => {
            println!(
                "  Coverage: {} (threshold {}%)",
                style(format!("{}%", report.percent)).green(),
                threshold
            );
        }
        None => println!("  Coverage: {}", style("unknown").dim()),
    }
}

/// Display the proposed version change.
pub fn display_version_change(old: &Version, new: &Version) {
    println!("\n{}", style("Version Bump:").bold());
    println!("  From: {}", style(old).red());
    println!("  To:   {}", style(new).green());
}

/// Show the tail of a failed command's output.
pub fn display_tool_output(output: &str) {
    let lines: Vec<&str> = output.lines().collect();
    if lines.is_empty() {
        return;
    }

    let skipped = lines.len().saturating_sub(TOOL_OUTPUT_TAIL);
    if skipped > 0 {
        eprintln!("    {}", style(format!("... {} earlier lines", skipped)).dim());
    }
    for line in &lines[skipped..] {
        eprintln!("    {}", line);
    }
}

/// Final line of a successful release.
pub fn display_release_complete(version: &Version, branch: &str, remote: &str) {
    println!(
        "\n{} Released version {} ({} pushed to {})\n",
        style("✓").green(),
        style(version).bold(),
        branch,
        remote
    );
}
