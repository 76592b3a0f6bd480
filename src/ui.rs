//! Terminal output for the end of a run.
//!
//! Progress is reported through `tracing`; this module prints the final
//! summary on stdout and the fatal error line on stderr.

use console::style;

use crate::cli::ReleaseOutcome;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Lines describing a finished (or previewed) release
pub fn summary_lines(outcome: &ReleaseOutcome) -> Vec<String> {
    let mut lines = vec![format!(
        "Version {} -> {}",
        outcome.previous.short(),
        outcome.version.short()
    )];

    for path in &outcome.updated_files {
        lines.push(format!("Updated {}", path.display()));
    }

    match &outcome.commit {
        Some(commit) => lines.push(format!(
            "Committed {} \"{}\"",
            commit.get(..7).unwrap_or(commit),
            outcome.commit_message
        )),
        None => lines.push(format!("Commit \"{}\"", outcome.commit_message)),
    }
    lines.push(format!("Tag {}", outcome.tag));

    lines
}

/// Print the release summary, or the plan when it was a dry run
pub fn display_release_summary(outcome: &ReleaseOutcome) {
    if outcome.dry_run {
        println!("\n{}", style("Dry run, nothing was changed:").bold());
        for line in summary_lines(outcome) {
            display_status(&format!("Would: {}", line));
        }
        return;
    }

    println!();
    for line in summary_lines(outcome) {
        display_success(&line);
    }
    println!(
        "\n{} Released {}\n",
        style("✓").green(),
        style(&outcome.tag).green().bold()
    );
}
