//! Aggregate statistics over a story document.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::document::{ChoiceEffect, StoryDocument};

/// Summary numbers for a story, computed in one walk over the node set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoryStats {
    /// Total node count.
    pub total_nodes: usize,
    /// Nodes marked as endings.
    pub ending_nodes: usize,
    /// Nodes with at least one choice.
    pub choice_nodes: usize,
    /// Total choice edges.
    pub total_choices: usize,
    /// Largest choice count on any single node.
    pub max_choices_in_node: usize,
    /// Mean choices per choice-bearing node, rounded to two decimals.
    pub average_choices_per_node: f64,
    /// Every item name mentioned anywhere, sorted.
    pub unique_items: Vec<String>,
    /// Nodes with an arrival action.
    pub nodes_with_actions: usize,
    /// Nodes that damage the player on arrival.
    pub damage_nodes: usize,
    /// Nodes that heal the player on arrival.
    pub healing_nodes: usize,
}

/// Compute statistics for a document.
pub fn story_stats(story: &StoryDocument) -> StoryStats {
    let mut stats = StoryStats::default();
    let mut items: BTreeSet<&str> = BTreeSet::new();

    for (_, node) in story.iter() {
        stats.total_nodes += 1;
        if node.is_ending {
            stats.ending_nodes += 1;
        }

        let choices = node.choice_list();
        if !choices.is_empty() {
            stats.choice_nodes += 1;
            stats.total_choices += choices.len();
            stats.max_choices_in_node = stats.max_choices_in_node.max(choices.len());
        }
        for choice in choices {
            if let Some(item) = &choice.requires {
                items.insert(item);
            }
            if let Some(item) = &choice.hide_if {
                items.insert(item);
            }
            for effect in choice.effect_list() {
                if let ChoiceEffect::Item(item) = effect {
                    items.insert(item);
                }
            }
        }

        if let Some(action) = &node.on_arrive {
            stats.nodes_with_actions += 1;
            if let Some(item) = &action.add_item {
                items.insert(item);
            }
            if action.take_damage.is_some_and(|n| n > 0) {
                stats.damage_nodes += 1;
            }
            if action.heal.is_some_and(|n| n > 0) {
                stats.healing_nodes += 1;
            }
        }
    }

    if stats.choice_nodes > 0 {
        let mean = stats.total_choices as f64 / stats.choice_nodes as f64;
        stats.average_choices_per_node = (mean * 100.0).round() / 100.0;
    }
    stats.unique_items = items.into_iter().map(str::to_string).collect();
    stats
}
