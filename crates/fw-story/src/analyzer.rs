//! Cross-node integrity analysis over a schema-valid story document.
//!
//! Four independent passes, each reading the same immutable document and
//! appending to its own finding list: referential integrity (fatal),
//! reachability, structural anomalies, and item-dependency consistency
//! (all warnings). The analyzer never mutates or repairs the document.

use std::collections::{BTreeSet, VecDeque};

use crate::document::{ChoiceEffect, START_NODE, StoryDocument};
use crate::stats::{StoryStats, story_stats};

/// Findings from graph analysis, plus story statistics as a by-product.
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    /// Fatal findings: the document is unusable at runtime.
    pub errors: Vec<String>,
    /// Informational findings for the content author.
    pub warnings: Vec<String>,
    /// Aggregate statistics over the node/choice set.
    pub stats: StoryStats,
}

impl AnalysisReport {
    /// False only for true errors; warnings leave the document usable.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run all analysis passes over a schema-valid document.
pub fn analyze(story: &StoryDocument) -> AnalysisReport {
    let mut report = AnalysisReport {
        stats: story_stats(story),
        ..AnalysisReport::default()
    };

    check_references(story, &mut report.errors);
    check_reachability(story, &mut report.warnings);
    check_structure(story, &mut report.warnings);
    check_items(story, &mut report.warnings);

    report
}

/// Pass 1: every choice target must exist in the document.
fn check_references(story: &StoryDocument, errors: &mut Vec<String>) {
    for (id, node) in story.iter() {
        for choice in node.choice_list() {
            if !story.contains(&choice.to) {
                errors.push(format!(
                    "node '{id}' references non-existent node '{}'",
                    choice.to
                ));
            }
        }
    }
}

/// Pass 2: breadth-first set-reachability from the entry node.
///
/// The visited-set guard before expansion makes this terminate with cycles
/// present, in O(nodes + edges).
fn check_reachability(story: &StoryDocument, warnings: &mut Vec<String>) {
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(START_NODE);

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        if let Some(node) = story.get(id) {
            for choice in node.choice_list() {
                if !visited.contains(choice.to.as_str()) {
                    queue.push_back(&choice.to);
                }
            }
        }
    }

    for id in story.node_ids() {
        if !visited.contains(id.as_str()) {
            warnings.push(format!("node '{id}' is unreachable from start"));
        }
    }
}

/// Pass 3: trivial self-loops and dead-end nodes.
fn check_structure(story: &StoryDocument, warnings: &mut Vec<String>) {
    for (id, node) in story.iter() {
        let choices = node.choice_list();
        if choices.is_empty() {
            continue;
        }

        if choices.iter().all(|c| c.to == *id) {
            warnings.push(format!(
                "node '{id}' may create an infinite loop (all choices point to itself)"
            ));
        }

        let all_endings = choices
            .iter()
            .all(|c| story.get(&c.to).is_some_and(|target| target.is_ending));
        if !node.is_ending && all_endings {
            warnings.push(format!("node '{id}' only leads to ending nodes"));
        }
    }
}

/// Pass 4: items gated on but never granted, and items granted but inert.
fn check_items(story: &StoryDocument, warnings: &mut Vec<String>) {
    let mut granted: BTreeSet<&str> = BTreeSet::new();
    let mut required: BTreeSet<&str> = BTreeSet::new();
    let mut hiding: BTreeSet<&str> = BTreeSet::new();

    for (_, node) in story.iter() {
        if let Some(action) = &node.on_arrive
            && let Some(item) = &action.add_item
        {
            granted.insert(item);
        }
        for choice in node.choice_list() {
            if let Some(item) = &choice.requires {
                required.insert(item);
            }
            if let Some(item) = &choice.hide_if {
                hiding.insert(item);
            }
            for effect in choice.effect_list() {
                if let ChoiceEffect::Item(item) = effect {
                    granted.insert(item);
                }
            }
        }
    }

    for item in &required {
        if !granted.contains(item) {
            warnings.push(format!(
                "item '{item}' is required by choices but never added to inventory"
            ));
        }
    }
    for item in &hiding {
        if !granted.contains(item) {
            warnings.push(format!(
                "item '{item}' is used for hiding choices but never added to inventory"
            ));
        }
    }
    for item in &granted {
        if !required.contains(item) && !hiding.contains(item) {
            warnings.push(format!(
                "item '{item}' is added to inventory but never used in choices"
            ));
        }
    }
}
