pub mod check;
pub mod graph;
pub mod play;
pub mod stats;

use std::path::Path;

use colored::Colorize;

use fw_story::{StoryDocument, ValidationReport};

/// Load, validate, and analyze a story file, printing every finding.
/// Returns the accepted document if there are no errors.
fn load_document(file: &Path) -> Result<StoryDocument, String> {
    let report = fw_story::load_story_file(file).map_err(|e| e.to_string())?;
    print_report(&report);

    report
        .into_document()
        .ok_or_else(|| "story validation failed with errors".to_string())
}

/// Print validation findings to stderr with a summary count line.
fn print_report(report: &ValidationReport) {
    for error in &report.errors {
        eprintln!("{} {error}", "error:".red().bold());
    }
    for warning in &report.warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }

    let errors = report.errors.len();
    let warnings = report.warnings.len();
    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}
