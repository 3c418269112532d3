//! The runtime query layer: choice availability and effect application
//! over an already-validated story document.

use fw_story::{Choice, ChoiceEffect, GameState, NodeAction, Player, StoryDocument, StoryNode};

use crate::error::{EngineError, EngineResult};

/// Look up the node the player is currently at.
///
/// A miss here means validation was bypassed; it surfaces as
/// [`EngineError::NodeNotFound`] rather than a panic so the caller can
/// fail loudly without crashing.
pub fn current_node<'a>(story: &'a StoryDocument, state: &GameState) -> EngineResult<&'a StoryNode> {
    story
        .get(&state.current_node_id)
        .ok_or_else(|| EngineError::NodeNotFound(state.current_node_id.clone()))
}

/// Whether a choice's requirement is met: no `requires`, or the item held.
pub fn can_select_choice(player: &Player, choice: &Choice) -> bool {
    match &choice.requires {
        None => true,
        Some(item) => player.has_item(item),
    }
}

/// Whether a choice is omitted from presentation: `hideIf` set and held.
pub fn should_hide_choice(player: &Player, choice: &Choice) -> bool {
    match &choice.hide_if {
        None => false,
        Some(item) => player.has_item(item),
    }
}

/// The choices presented to the player: everything not hidden, including
/// gated choices the player cannot yet select.
pub fn available_choices<'a>(node: &'a StoryNode, player: &Player) -> Vec<&'a Choice> {
    node.choice_list()
        .iter()
        .filter(|c| !should_hide_choice(player, c))
        .collect()
}

/// Visible choices whose requirement is not met.
pub fn locked_choices<'a>(node: &'a StoryNode, player: &Player) -> Vec<&'a Choice> {
    node.choice_list()
        .iter()
        .filter(|c| !should_hide_choice(player, c) && !can_select_choice(player, c))
        .collect()
}

/// Apply a single typed effect to the state.
pub fn apply_effect(state: &mut GameState, effect: &ChoiceEffect) {
    match effect {
        ChoiceEffect::Hp(delta) => {
            if *delta < 0 {
                let amount = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
                state.player.take_damage(amount);
            } else {
                let amount = u32::try_from(*delta).unwrap_or(u32::MAX);
                state.player.heal(amount);
            }
            sync_terminal_on_death(state);
        }
        ChoiceEffect::Item(item) => state.player.add_item(item.clone()),
        ChoiceEffect::Flag(flag) => {
            state.flags.insert(flag.clone(), true);
        }
    }
}

/// Fold an ordered effect list over the state.
pub fn apply_effects(state: &mut GameState, effects: &[ChoiceEffect]) {
    for effect in effects {
        apply_effect(state, effect);
    }
}

/// Apply a node's arrival action. Each field is optional and applied
/// independently.
pub fn apply_node_action(state: &mut GameState, action: &NodeAction) {
    if let Some(item) = &action.add_item {
        state.player.add_item(item.clone());
    }
    if let Some(amount) = action.take_damage
        && amount > 0
    {
        state.player.take_damage(amount);
        sync_terminal_on_death(state);
    }
    if let Some(amount) = action.heal
        && amount > 0
    {
        state.player.heal(amount);
    }
    if let Some(flag) = &action.set_flag {
        state.flags.insert(flag.clone(), true);
    }
}

pub(crate) fn sync_terminal_on_death(state: &mut GameState) {
    if state.player.is_dead() {
        state.is_game_over = true;
        state.is_victory = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn choice_gating() {
        let mut player = Player::new("Ana");
        let gated = Choice::new("Fight", "lair").with_requires("Sword");

        assert!(!can_select_choice(&player, &gated));
        player.add_item("Sword");
        assert!(can_select_choice(&player, &gated));
    }

    #[test]
    fn choice_hiding() {
        let mut player = Player::new("Ana");
        let hidden = Choice::new("Search for the map", "library").with_hide_if("Map");

        assert!(!should_hide_choice(&player, &hidden));
        player.add_item("Map");
        assert!(should_hide_choice(&player, &hidden));
    }

    #[test]
    fn available_includes_locked_but_not_hidden() {
        let mut player = Player::new("Ana");
        player.add_item("Map");
        let node = StoryNode::new("The study.").with_choices(vec![
            Choice::new("Leave", "hall"),
            Choice::new("Open the safe", "safe").with_requires("Combination"),
            Choice::new("Search for the map", "library").with_hide_if("Map"),
        ]);

        let visible = available_choices(&node, &player);
        assert_eq!(visible.len(), 2);

        let locked = locked_choices(&node, &player);
        assert_eq!(locked.len(), 1);
        assert_eq!(locked[0].text, "Open the safe");
    }

    #[test]
    fn hp_effect_clamps_and_sets_game_over() {
        let mut state = GameState::new("Ana");
        apply_effect(&mut state, &ChoiceEffect::Hp(-150));
        assert_eq!(state.player.hp, 0);
        assert!(state.is_game_over);
        assert!(!state.is_victory);
    }

    #[test]
    fn heal_effect_clamps_at_max() {
        let mut state = GameState::new("Ana");
        state.player.take_damage(10);
        apply_effect(&mut state, &ChoiceEffect::Hp(50));
        assert_eq!(state.player.hp, 100);
    }

    #[test]
    fn extreme_hp_deltas_clamp_without_overflow() {
        let mut state = GameState::new("Ana");
        apply_effect(&mut state, &ChoiceEffect::Hp(i64::from(u32::MAX)));
        assert_eq!(state.player.hp, state.player.max_hp);

        apply_effect(&mut state, &ChoiceEffect::Hp(i64::MIN));
        assert_eq!(state.player.hp, 0);
        assert!(state.is_game_over);
    }

    #[test]
    fn item_effect_is_idempotent() {
        let mut state = GameState::new("Ana");
        apply_effect(&mut state, &ChoiceEffect::Item("Key".into()));
        apply_effect(&mut state, &ChoiceEffect::Item("Key".into()));
        assert_eq!(state.player.inventory, vec!["Key".to_string()]);
    }

    #[test]
    fn flag_effect_sets_store() {
        let mut state = GameState::new("Ana");
        assert!(!state.flag("heard_whispers"));
        apply_effect(&mut state, &ChoiceEffect::Flag("heard_whispers".into()));
        assert!(state.flag("heard_whispers"));
    }

    #[test]
    fn effects_apply_in_declaration_order() {
        let mut state = GameState::new("Ana");
        apply_effects(
            &mut state,
            &[ChoiceEffect::Hp(-100), ChoiceEffect::Hp(30)],
        );
        // Damage lands first and triggers game over before the heal.
        assert_eq!(state.player.hp, 30);
        assert!(state.is_game_over);
    }

    #[test]
    fn node_action_applies_all_parts() {
        let mut state = GameState::new("Ana");
        apply_node_action(
            &mut state,
            &NodeAction {
                add_item: Some("Talisman".into()),
                take_damage: Some(20),
                heal: Some(5),
                set_flag: Some("entered_crypt".into()),
            },
        );
        assert!(state.player.has_item("Talisman"));
        assert_eq!(state.player.hp, 85);
        assert!(state.flag("entered_crypt"));
    }

    proptest! {
        #[test]
        fn hp_always_within_bounds(deltas in proptest::collection::vec(-200i64..200, 0..32)) {
            let mut state = GameState::new("Ana");
            for delta in deltas {
                apply_effect(&mut state, &ChoiceEffect::Hp(delta));
                prop_assert!(state.player.hp <= state.player.max_hp);
            }
        }

        #[test]
        fn inventory_never_holds_duplicates(items in proptest::collection::vec("[a-c]{1,2}", 0..32)) {
            let mut state = GameState::new("Ana");
            for item in items {
                apply_effect(&mut state, &ChoiceEffect::Item(item));
            }
            let mut deduped = state.player.inventory.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), state.player.inventory.len());
        }
    }
}
