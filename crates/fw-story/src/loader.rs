//! Load-time pipeline: JSON text → schema validation → graph analysis.

use std::path::Path;

use crate::analyzer::analyze;
use crate::document::StoryDocument;
use crate::error::StoryResult;
use crate::report::ValidationReport;
use crate::schema::validate_document;

/// Validate and analyze a story from JSON text.
///
/// JSON syntax errors are reported through the same report type as schema
/// errors, since broken input is expected, not exceptional.
pub fn load_story_str(json: &str) -> ValidationReport {
    let raw = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => return ValidationReport::rejected(vec![format!("invalid JSON format: {e}")]),
    };

    let mut report = validate_document(&raw);
    if let Some(document) = report.document.clone() {
        let analysis = analyze(&document);
        report.absorb(analysis.errors, analysis.warnings);
    }
    report
}

/// Validate and analyze a story read from a file.
///
/// Only the file read itself can fail as an `Err`; content problems come
/// back inside the report.
pub fn load_story_file(path: &Path) -> StoryResult<ValidationReport> {
    let json = std::fs::read_to_string(path)?;
    Ok(load_story_str(&json))
}

/// Load a story, falling back to a known-good document when validation
/// fails. Errors and warnings are logged rather than returned, so callers
/// that just need *a* playable story never have to handle rejection.
pub fn load_story_or_fallback(json: &str, fallback: StoryDocument) -> StoryDocument {
    let report = load_story_str(json);
    for warning in &report.warnings {
        log::warn!("story validation: {warning}");
    }
    match report.into_document() {
        Some(document) => document,
        None => {
            log::error!("story validation failed, using fallback story");
            fallback
        }
    }
}
