//! Structural validation of raw story JSON against the closed node schema.
//!
//! The validator accepts an arbitrary [`serde_json::Value`] and either
//! produces a typed [`StoryDocument`] or a list of human-readable errors,
//! each naming the offending node/choice path. Malformed input is an
//! expected, reportable condition and this module never panics on it.
//! Validation is deterministic: errors are collected in node declaration
//! order, then choice declaration order within a node.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::document::{
    Choice, ChoiceEffect, NodeAction, NodeMetadata, START_NODE, StoryDocument, StoryNode,
};
use crate::report::ValidationReport;

const NODE_FIELDS: &[&str] = &[
    "text",
    "choices",
    "onArrive",
    "isEnding",
    "isVictory",
    "metadata",
];
const CHOICE_FIELDS: &[&str] = &["text", "to", "requires", "hideIf", "effects"];
const ACTION_FIELDS: &[&str] = &["addItem", "takeDamage", "heal", "setFlag"];
const EFFECT_FIELDS: &[&str] = &["type", "value"];
const METADATA_FIELDS: &[&str] = &[
    "title",
    "location",
    "characterImage",
    "backgroundImage",
    "jumpscareImage",
    "mood",
    "backgroundMusic",
];

/// Validate a raw JSON value against the story schema.
///
/// On success the report carries the typed document; on failure it carries
/// every schema error found, and the document is rejected wholesale.
pub fn validate_document(raw: &Value) -> ValidationReport {
    let Some(map) = raw.as_object() else {
        return ValidationReport::rejected(vec!["story document must be a JSON object".into()]);
    };

    let mut errors = Vec::new();
    let mut nodes = BTreeMap::new();

    for (id, value) in map {
        if id.is_empty() {
            errors.push("node id cannot be empty".to_string());
            continue;
        }
        if let Some(node) = validate_node(id, value, &mut errors) {
            nodes.insert(id.clone(), node);
        }
    }

    if !map.contains_key(START_NODE) {
        errors.push(format!("story must contain a '{START_NODE}' node"));
    }

    if errors.is_empty() {
        ValidationReport::accepted(StoryDocument::from_nodes(nodes))
    } else {
        ValidationReport::rejected(errors)
    }
}

fn check_fields(map: &Map<String, Value>, allowed: &[&str], path: &str, errors: &mut Vec<String>) {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            errors.push(format!("{path} has unknown field '{key}'"));
        }
    }
}

fn non_empty_string(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

fn validate_node(id: &str, value: &Value, errors: &mut Vec<String>) -> Option<StoryNode> {
    let path = format!("node '{id}'");
    let Some(map) = value.as_object() else {
        errors.push(format!("{path} must be a JSON object"));
        return None;
    };

    let before = errors.len();
    check_fields(map, NODE_FIELDS, &path, errors);

    let text = match map.get("text") {
        Some(v) => match non_empty_string(v) {
            Some(s) => s.to_string(),
            None => {
                errors.push(format!("{path} is missing text content"));
                String::new()
            }
        },
        None => {
            errors.push(format!("{path} is missing text content"));
            String::new()
        }
    };

    let choices = match map.get("choices") {
        Some(v) => validate_choices(id, v, errors),
        None => None,
    };

    let on_arrive = map
        .get("onArrive")
        .and_then(|v| validate_action(&path, v, errors));

    let is_ending = validate_bool(&path, "isEnding", map, errors);
    let is_victory = validate_bool(&path, "isVictory", map, errors);

    let metadata = map
        .get("metadata")
        .and_then(|v| validate_metadata(&path, v, errors));

    if map.get("choices").is_none() && !is_ending {
        errors.push(format!(
            "{path} must have either choices or be marked as ending"
        ));
    }

    (errors.len() == before).then_some(StoryNode {
        text,
        choices,
        on_arrive,
        is_ending,
        is_victory,
        metadata,
    })
}

fn validate_bool(path: &str, field: &str, map: &Map<String, Value>, errors: &mut Vec<String>) -> bool {
    match map.get(field) {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            errors.push(format!("{path} field '{field}' must be a boolean"));
            false
        }
    }
}

fn validate_choices(id: &str, value: &Value, errors: &mut Vec<String>) -> Option<Vec<Choice>> {
    let Some(array) = value.as_array() else {
        errors.push(format!("node '{id}' choices must be a non-empty array"));
        return None;
    };
    if array.is_empty() {
        errors.push(format!("node '{id}' choices must be a non-empty array"));
        return None;
    }

    let choices: Vec<Choice> = array
        .iter()
        .enumerate()
        .filter_map(|(index, v)| validate_choice(id, index, v, errors))
        .collect();

    (choices.len() == array.len()).then_some(choices)
}

fn validate_choice(
    id: &str,
    index: usize,
    value: &Value,
    errors: &mut Vec<String>,
) -> Option<Choice> {
    let path = format!("node '{id}' choice {index}");
    let Some(map) = value.as_object() else {
        errors.push(format!("{path} must be a JSON object"));
        return None;
    };

    let before = errors.len();
    check_fields(map, CHOICE_FIELDS, &path, errors);

    let text = match map.get("text").and_then(non_empty_string) {
        Some(s) => s.to_string(),
        None => {
            errors.push(format!("{path} is missing text"));
            String::new()
        }
    };

    let to = match map.get("to").and_then(non_empty_string) {
        Some(s) => s.to_string(),
        None => {
            errors.push(format!("{path} is missing 'to' target"));
            String::new()
        }
    };

    let requires = validate_optional_string(&path, "requires", map, errors);
    let hide_if = validate_optional_string(&path, "hideIf", map, errors);

    let effects = match map.get("effects") {
        Some(v) => validate_effects(&path, v, errors),
        None => None,
    };

    (errors.len() == before).then_some(Choice {
        text,
        to,
        requires,
        hide_if,
        effects,
    })
}

fn validate_optional_string(
    path: &str,
    field: &str,
    map: &Map<String, Value>,
    errors: &mut Vec<String>,
) -> Option<String> {
    match map.get(field) {
        None => None,
        Some(v) => match non_empty_string(v) {
            Some(s) => Some(s.to_string()),
            None => {
                errors.push(format!("{path} field '{field}' must be a non-empty string"));
                None
            }
        },
    }
}

fn validate_effects(path: &str, value: &Value, errors: &mut Vec<String>) -> Option<Vec<ChoiceEffect>> {
    let Some(array) = value.as_array() else {
        errors.push(format!("{path} effects must be an array"));
        return None;
    };

    let effects: Vec<ChoiceEffect> = array
        .iter()
        .enumerate()
        .filter_map(|(index, v)| validate_effect(path, index, v, errors))
        .collect();

    (effects.len() == array.len()).then_some(effects)
}

fn validate_effect(
    parent: &str,
    index: usize,
    value: &Value,
    errors: &mut Vec<String>,
) -> Option<ChoiceEffect> {
    let path = format!("{parent} effect {index}");
    let Some(map) = value.as_object() else {
        errors.push(format!("{path} must be a JSON object"));
        return None;
    };

    let before = errors.len();
    check_fields(map, EFFECT_FIELDS, &path, errors);

    let kind = map.get("type").and_then(Value::as_str);
    let result = match kind {
        Some("hp") => match map.get("value").and_then(Value::as_i64) {
            Some(delta) => Some(ChoiceEffect::Hp(delta)),
            None => {
                errors.push(format!("{path} 'hp' effect value must be an integer"));
                None
            }
        },
        Some("item") => match map.get("value").and_then(non_empty_string) {
            Some(item) => Some(ChoiceEffect::Item(item.to_string())),
            None => {
                errors.push(format!("{path} 'item' effect value must be a non-empty string"));
                None
            }
        },
        Some("flag") => match map.get("value").and_then(non_empty_string) {
            Some(flag) => Some(ChoiceEffect::Flag(flag.to_string())),
            None => {
                errors.push(format!("{path} 'flag' effect value must be a non-empty string"));
                None
            }
        },
        Some(other) => {
            errors.push(format!("{path} has unknown effect type '{other}'"));
            None
        }
        None => {
            errors.push(format!("{path} is missing effect type"));
            None
        }
    };

    (errors.len() == before).then_some(result).flatten()
}

fn validate_action(path: &str, value: &Value, errors: &mut Vec<String>) -> Option<NodeAction> {
    let Some(map) = value.as_object() else {
        errors.push(format!("{path} onArrive must be a JSON object"));
        return None;
    };

    let before = errors.len();
    check_fields(map, ACTION_FIELDS, &format!("{path} onArrive"), errors);

    let add_item = validate_optional_string(&format!("{path} onArrive"), "addItem", map, errors);
    let set_flag = validate_optional_string(&format!("{path} onArrive"), "setFlag", map, errors);
    let take_damage = validate_amount(path, "takeDamage", map, errors);
    let heal = validate_amount(path, "heal", map, errors);

    (errors.len() == before).then_some(NodeAction {
        add_item,
        take_damage,
        heal,
        set_flag,
    })
}

fn validate_amount(
    path: &str,
    field: &str,
    map: &Map<String, Value>,
    errors: &mut Vec<String>,
) -> Option<u32> {
    match map.get(field) {
        None => None,
        Some(v) => match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                errors.push(format!(
                    "{path} onArrive '{field}' must be a non-negative integer"
                ));
                None
            }
        },
    }
}

fn validate_metadata(path: &str, value: &Value, errors: &mut Vec<String>) -> Option<NodeMetadata> {
    let Some(map) = value.as_object() else {
        errors.push(format!("{path} metadata must be a JSON object"));
        return None;
    };

    let before = errors.len();
    check_fields(map, METADATA_FIELDS, &format!("{path} metadata"), errors);

    let mut field = |name: &str| -> Option<String> {
        match map.get(name) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(format!("{path} metadata field '{name}' must be a string"));
                None
            }
        }
    };

    let metadata = NodeMetadata {
        title: field("title"),
        location: field("location"),
        character_image: field("characterImage"),
        background_image: field("backgroundImage"),
        jumpscare_image: field("jumpscareImage"),
        mood: field("mood"),
        background_music: field("backgroundMusic"),
    };

    (errors.len() == before).then_some(metadata)
}
