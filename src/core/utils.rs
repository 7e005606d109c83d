use crate::core::state::{BattleState, Combatant, Side};

pub fn has_usable_combatant(roster: &[Combatant]) -> bool {
    roster.iter().any(|c| !c.is_fainted())
}

pub fn available_combatants(roster: &[Combatant]) -> Vec<&Combatant> {
    roster.iter().filter(|c| !c.is_fainted()).collect()
}

pub fn available_indices(roster: &[Combatant]) -> Vec<usize> {
    roster
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_fainted())
        .map(|(i, _)| i)
        .collect()
}

pub fn roster_for(state: &BattleState, side: Side) -> &[Combatant] {
    match side {
        Side::Player => &state.player_roster,
        Side::Opponent => &state.opponent_roster,
    }
}

/// Roster slot holding a combatant with this id, preferring a standing entry.
/// Only used to recover a slot for states that carry the combatant alone.
pub fn active_slot(roster: &[Combatant], id: u32) -> Option<usize> {
    roster
        .iter()
        .position(|c| c.id == id && !c.is_fainted())
        .or_else(|| roster.iter().position(|c| c.id == id))
}

/// Copy of `roster` with the entry at `slot` replaced.
pub fn write_back(roster: &[Combatant], slot: usize, updated: &Combatant) -> Vec<Combatant> {
    let mut next = roster.to_vec();
    if let Some(entry) = next.get_mut(slot) {
        *entry = updated.clone();
    }
    next
}
