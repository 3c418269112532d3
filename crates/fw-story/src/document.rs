//! The story graph data model: nodes, choices, effects, and arrival actions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The conventional entry node id. Every valid story contains this key.
pub const START_NODE: &str = "start";

/// A validated story graph: a mapping from node id to [`StoryNode`].
///
/// Immutable after validation; the runtime only ever reads it. Nodes
/// iterate in key order, so anything derived from a walk is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryDocument {
    nodes: BTreeMap<String, StoryNode>,
}

impl StoryDocument {
    /// Build a document from already-validated nodes.
    pub fn from_nodes(nodes: BTreeMap<String, StoryNode>) -> Self {
        Self { nodes }
    }

    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Option<&StoryNode> {
        self.nodes.get(id)
    }

    /// Whether a node id exists in the document.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the story.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the story has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(id, node)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StoryNode)> {
        self.nodes.iter()
    }

    /// Iterate over node ids in key order.
    pub fn node_ids(&self) -> impl Iterator<Item = &String> {
        self.nodes.keys()
    }
}

/// A single narrative beat in the story graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StoryNode {
    /// Narrative text shown when the player is at this node.
    pub text: String,
    /// Outgoing choice edges. Absent on pure ending nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// Effects applied automatically when the player first enters this node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_arrive: Option<NodeAction>,
    /// Marks a terminal node.
    #[serde(default)]
    pub is_ending: bool,
    /// Marks a terminal node as a victory (as opposed to a defeat).
    #[serde(default)]
    pub is_victory: bool,
    /// Presentation hints, opaque to the core and passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NodeMetadata>,
}

impl StoryNode {
    /// Create a node with only narrative text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create an ending node.
    pub fn ending(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_ending: true,
            ..Self::default()
        }
    }

    /// Create a victory ending node.
    pub fn victory(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_ending: true,
            is_victory: true,
            ..Self::default()
        }
    }

    /// Attach choices to the node.
    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Attach an arrival action to the node.
    pub fn with_on_arrive(mut self, action: NodeAction) -> Self {
        self.on_arrive = Some(action);
        self
    }

    /// The node's choices, or an empty slice for ending nodes without any.
    pub fn choice_list(&self) -> &[Choice] {
        self.choices.as_deref().unwrap_or_default()
    }
}

/// A labeled edge from one node to another, optionally gated by inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Choice {
    /// Display label for the choice.
    pub text: String,
    /// Target node id.
    pub to: String,
    /// Item the player must hold for the choice to be selectable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
    /// Item that hides this choice entirely when held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_if: Option<String>,
    /// Effects applied when the choice is taken, in declaration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<ChoiceEffect>>,
}

impl Choice {
    /// Create a choice edge.
    pub fn new(text: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            to: to.into(),
            ..Self::default()
        }
    }

    /// Gate the choice behind an item.
    pub fn with_requires(mut self, item: impl Into<String>) -> Self {
        self.requires = Some(item.into());
        self
    }

    /// Hide the choice when the player holds an item.
    pub fn with_hide_if(mut self, item: impl Into<String>) -> Self {
        self.hide_if = Some(item.into());
        self
    }

    /// Attach effects to the choice.
    pub fn with_effects(mut self, effects: Vec<ChoiceEffect>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// The choice's effects, or an empty slice.
    pub fn effect_list(&self) -> &[ChoiceEffect] {
        self.effects.as_deref().unwrap_or_default()
    }
}

/// A typed state mutation triggered by taking a choice.
///
/// Serialized as `{"type": "hp", "value": -10}` and friends, matching the
/// authored JSON format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ChoiceEffect {
    /// Hit-point delta: negative damages, positive heals.
    Hp(i64),
    /// Grant an item. Idempotent: duplicates are never added.
    Item(String),
    /// Set a boolean game flag.
    Flag(String),
}

/// Effects applied when the player first arrives at a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeAction {
    /// Item granted on arrival.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_item: Option<String>,
    /// Damage taken on arrival.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_damage: Option<u32>,
    /// Healing received on arrival.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heal: Option<u32>,
    /// Flag set on arrival.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_flag: Option<String>,
}

/// Presentation hints for a node. The core never interprets these; they are
/// resolved by whatever front end renders the story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeMetadata {
    /// Scene title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Location name for context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Character portrait asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_image: Option<String>,
    /// Background image asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Jumpscare asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumpscare_image: Option<String>,
    /// Scene mood (tense, peaceful, mysterious, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Background music asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_music: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lookup() {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            START_NODE.to_string(),
            StoryNode::new("You wake in a dark forest.")
                .with_choices(vec![Choice::new("Go north", "clearing")]),
        );
        nodes.insert("clearing".to_string(), StoryNode::ending("Safety."));
        let doc = StoryDocument::from_nodes(nodes);

        assert_eq!(doc.len(), 2);
        assert!(doc.contains(START_NODE));
        assert!(doc.get("clearing").is_some_and(|n| n.is_ending));
        assert!(doc.get("nowhere").is_none());
    }

    #[test]
    fn choice_list_empty_for_endings() {
        let node = StoryNode::ending("The end.");
        assert!(node.choice_list().is_empty());
    }

    #[test]
    fn effect_json_format() {
        let effect: ChoiceEffect = serde_json::from_str(r#"{"type":"hp","value":-10}"#).unwrap();
        assert_eq!(effect, ChoiceEffect::Hp(-10));

        let effect: ChoiceEffect =
            serde_json::from_str(r#"{"type":"item","value":"Silver Dagger"}"#).unwrap();
        assert_eq!(effect, ChoiceEffect::Item("Silver Dagger".to_string()));
    }

    #[test]
    fn node_json_round_trip() {
        let json = r#"{
            "text": "A locked door.",
            "choices": [
                { "text": "Unlock it", "to": "hall", "requires": "Key" },
                { "text": "Turn back", "to": "start", "hideIf": "Key" }
            ],
            "onArrive": { "takeDamage": 5 }
        }"#;
        let node: StoryNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.choice_list().len(), 2);
        assert_eq!(node.choice_list()[0].requires.as_deref(), Some("Key"));
        assert_eq!(node.choice_list()[1].hide_if.as_deref(), Some("Key"));
        assert_eq!(node.on_arrive.as_ref().unwrap().take_damage, Some(5));

        let back = serde_json::to_string(&node).unwrap();
        let again: StoryNode = serde_json::from_str(&back).unwrap();
        assert_eq!(node, again);
    }
}
