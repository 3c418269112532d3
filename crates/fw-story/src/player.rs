//! Player and session state: the mutable half of the data model.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::document::START_NODE;

/// Default hit points for a fresh player.
pub const DEFAULT_MAX_HP: u32 = 100;

/// The player character: name, hit points, and inventory.
///
/// `hp` is always within `[0, max_hp]`; the inventory preserves insertion
/// order and never contains duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Player name, chosen at game start.
    pub name: String,
    /// Current hit points.
    pub hp: u32,
    /// Hit point ceiling.
    pub max_hp: u32,
    /// Items held, in pickup order.
    pub inventory: Vec<String>,
}

impl Player {
    /// Create a player at full health with an empty inventory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hp: DEFAULT_MAX_HP,
            max_hp: DEFAULT_MAX_HP,
            inventory: Vec::new(),
        }
    }

    /// Whether the player holds an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Add an item to the inventory. Duplicates are silently ignored.
    pub fn add_item(&mut self, item: impl Into<String>) {
        let item = item.into();
        if !self.has_item(&item) {
            self.inventory.push(item);
        }
    }

    /// Reduce hit points, clamping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Restore hit points, clamping at `max_hp`.
    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Whether hit points have reached zero.
    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Current health as a rounded percentage of `max_hp`.
    ///
    /// Widened to 64-bit arithmetic so oversized deserialized values
    /// cannot overflow the intermediate product.
    pub fn health_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        let hp = u64::from(self.hp);
        let max = u64::from(self.max_hp);
        u32::try_from((hp * 100 + max / 2) / max).unwrap_or(u32::MAX)
    }

    /// Whether health is in the critical range (below 25%).
    pub fn is_critical(&self) -> bool {
        self.health_percent() < 25
    }
}

/// Complete runtime state of one game session.
///
/// Created once per session and mutated only through the reducer; every
/// observer sees a fully-formed snapshot. `visited_nodes` only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The player character.
    pub player: Player,
    /// Id of the node the player is currently at.
    pub current_node_id: String,
    /// Every node the player has entered, serialized as an array.
    pub visited_nodes: BTreeSet<String>,
    /// Boolean game flags set by `flag` effects and arrival actions.
    pub flags: BTreeMap<String, bool>,
    /// Terminal flag: the player lost.
    pub is_game_over: bool,
    /// Terminal flag: the player won.
    pub is_victory: bool,
    /// Whether the session has started.
    pub game_started: bool,
}

impl GameState {
    /// Create a fresh state positioned at the entry node.
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player: Player::new(player_name),
            current_node_id: START_NODE.to_string(),
            visited_nodes: BTreeSet::new(),
            flags: BTreeMap::new(),
            is_game_over: false,
            is_victory: false,
            game_started: false,
        }
    }

    /// Whether the player has entered a node before.
    pub fn has_visited(&self, node_id: &str) -> bool {
        self.visited_nodes.contains(node_id)
    }

    /// Read a game flag; unset flags read as false.
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Whether the session has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.is_game_over || self.is_victory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_player() {
        let player = Player::new("Ana");
        assert_eq!(player.hp, 100);
        assert_eq!(player.max_hp, 100);
        assert!(player.inventory.is_empty());
        assert!(!player.is_dead());
    }

    #[test]
    fn inventory_rejects_duplicates() {
        let mut player = Player::new("Ana");
        player.add_item("Key");
        player.add_item("Key");
        assert_eq!(player.inventory, vec!["Key".to_string()]);
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut player = Player::new("Ana");
        player.take_damage(150);
        assert_eq!(player.hp, 0);
        assert!(player.is_dead());
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut player = Player::new("Ana");
        player.take_damage(10);
        player.heal(50);
        assert_eq!(player.hp, 100);
    }

    #[test]
    fn huge_heal_saturates_instead_of_overflowing() {
        let mut player = Player::new("Ana");
        player.take_damage(10);
        player.heal(u32::MAX);
        assert_eq!(player.hp, 100);
    }

    #[test]
    fn health_percent_handles_oversized_values() {
        let mut player = Player::new("Ana");
        player.hp = u32::MAX;
        player.max_hp = u32::MAX;
        assert_eq!(player.health_percent(), 100);
    }

    #[test]
    fn critical_health_threshold() {
        let mut player = Player::new("Ana");
        player.take_damage(76);
        assert!(player.is_critical());
        player.heal(1);
        assert!(!player.is_critical());
    }

    #[test]
    fn fresh_state_at_entry_node() {
        let state = GameState::new("Ana");
        assert_eq!(state.current_node_id, START_NODE);
        assert!(!state.game_started);
        assert!(!state.is_terminal());
        assert!(!state.flag("lantern_lit"));
    }

    #[test]
    fn visited_nodes_serialize_as_array() {
        let mut state = GameState::new("Ana");
        state.visited_nodes.insert("cellar".to_string());
        state.visited_nodes.insert("attic".to_string());

        let json = serde_json::to_value(&state).unwrap();
        let visited = json.get("visited_nodes").unwrap();
        assert!(visited.is_array());

        let back: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(back.visited_nodes, state.visited_nodes);
    }
}
