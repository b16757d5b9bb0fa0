//! Pure formatting functions for UI output.
//!
//! Functions that build strings are pure and testable; the `display_*`
//! functions only print what they build.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::config::Hooks;
use crate::error::ReleaseError;
use crate::release::ReleaseReport;

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

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Indent captured command output under a heading, skipping empty streams.
pub fn format_captured_output(label: &str, output: &str) -> Option<String> {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        return None;
    }

    let mut formatted = format!("{}:", label);
    for line in trimmed.lines() {
        formatted.push_str("\n  ");
        formatted.push_str(line);
    }
    Some(formatted)
}

/// Display the terminating error of a release run.
///
/// A failed hook also shows the command's captured stdout and stderr.
pub fn display_release_error(err: &ReleaseError) {
    display_error(&err.to_string());

    if let ReleaseError::HookFailed { stdout, stderr, .. } = err {
        for block in [
            format_captured_output("stdout", stdout),
            format_captured_output("stderr", stderr),
        ]
        .into_iter()
        .flatten()
        {
            eprintln!("{}", style(block).dim());
        }
    }
}

/// Summary lines for a finished release, in step order.
pub fn summary_lines(report: &ReleaseReport) -> Vec<String> {
    let plan = &report.plan;
    let mut lines = Vec::new();

    if report.dry_run {
        lines.push(format!(
            "Dry run for {}: would tag {} and push to {}",
            plan.version, plan.tag_name, plan.remote
        ));
        return lines;
    }

    if let Some(hash) = &report.commit {
        let short = if hash.len() > 7 { &hash[..7] } else { hash.as_str() };
        lines.push(format!("Committed '{}' ({})", plan.commit_message, short));
    }
    if report.tagged {
        lines.push(format!("Tagged {}", plan.tag_name));
    }
    if report.pushed {
        lines.push(format!("Pushed to {}", plan.remote));
    }
    if report.published {
        lines.push(format!("Published {}", plan.version));
    }
    if report.hooks_run > 0 {
        lines.push(format!("Ran {} hook command(s)", report.hooks_run));
    }

    lines
}

/// Display warnings and a summary of a finished release.
pub fn display_release_summary(report: &ReleaseReport) {
    for warning in &report.warnings {
        display_boundary_warning(warning);
    }

    for line in summary_lines(report) {
        display_success(&line);
    }

    if let Some(headline) = release_headline(report) {
        println!("\n{} {}\n", style("✓").green(), style(headline).bold());
    }
}

/// Closing line of a release; only a created tag counts as released.
pub fn release_headline(report: &ReleaseReport) -> Option<String> {
    if report.dry_run || !report.tagged {
        return None;
    }
    Some(format!("Released {}", report.plan.tag_name))
}

/// Display configured lifecycle points and their commands.
pub fn display_configured_hooks(hooks: &Hooks) {
    if hooks.is_empty() {
        display_status("No hooks configured");
        return;
    }

    println!("{}", style("Configured hooks:").bold());
    for (point, commands) in hooks.iter() {
        println!("  {}", style(point).cyan());
        for command in commands {
            println!("    $ {}", command);
        }
    }
}
