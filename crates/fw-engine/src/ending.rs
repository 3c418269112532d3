//! Classification of ending nodes into victory and defeat.

use fw_story::StoryNode;

/// How a terminal node resolves the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The player won.
    Victory,
    /// The player lost.
    Defeat,
}

// Legacy fallback for documents authored before the explicit isVictory
// field existed. Substring matching over prose is fragile and content-
// coupled; it is consulted only when the field is absent/false.
const VICTORY_KEYWORDS: &[&str] = &[
    "saved",
    "victory",
    "sun begins to rise",
    "you have won",
    "success",
    "triumph",
    "hero",
    "you win",
];

/// Classify an ending node. Returns `None` for non-ending nodes.
///
/// The explicit `isVictory` field is authoritative. When it is not set,
/// the legacy keyword scan over the node's prose decides, defaulting to
/// defeat. Horror stories end badly unless stated otherwise.
pub fn classify_ending(node: &StoryNode) -> Option<Ending> {
    if !node.is_ending {
        return None;
    }
    if node.is_victory {
        return Some(Ending::Victory);
    }

    let text = node.text.to_lowercase();
    if VICTORY_KEYWORDS.iter().any(|k| text.contains(k)) {
        Some(Ending::Victory)
    } else {
        Some(Ending::Defeat)
    }
}
