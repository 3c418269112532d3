//! Validation reporting: findings as data, never as panics.

use crate::document::StoryDocument;

/// The outcome of validating and analyzing a story document.
///
/// `errors` block acceptance; `warnings` are surfaced for the content author
/// but the document remains usable. `document` is present only when
/// validation succeeded wholesale; a document with errors is never
/// partially accepted.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Whether the document was accepted.
    pub success: bool,
    /// The typed document, present iff `success`.
    pub document: Option<StoryDocument>,
    /// Fatal findings, in node then choice declaration order.
    pub errors: Vec<String>,
    /// Informational findings.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// An accepted report carrying the validated document.
    pub fn accepted(document: StoryDocument) -> Self {
        Self {
            success: true,
            document: Some(document),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A rejected report carrying the collected errors.
    pub fn rejected(errors: Vec<String>) -> Self {
        Self {
            success: false,
            document: None,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Fold analyzer findings into the report. Analyzer errors revoke
    /// acceptance and drop the document.
    pub fn absorb(&mut self, errors: Vec<String>, warnings: Vec<String>) {
        self.warnings.extend(warnings);
        if !errors.is_empty() {
            self.errors.extend(errors);
            self.success = false;
            self.document = None;
        }
    }

    /// Take the document out of the report, if accepted.
    pub fn into_document(self) -> Option<StoryDocument> {
        self.document
    }
}
