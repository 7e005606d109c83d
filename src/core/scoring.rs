use crate::core::state::{BattleResult, BattleState};
use serde::{Deserialize, Serialize};

pub const WIN_BONUS: i64 = 200;
pub const DEFEATED_OPPONENT_BONUS: i64 = 50;
pub const SURVIVOR_BONUS: i64 = 30;
pub const HP_RATIO_BONUS: i64 = 100;
pub const LOST_COMBATANT_PENALTY: i64 = 20;

pub const UNKNOWN_COMBATANT: &str = "Unknown";

/// Score for a won battle. Never negative.
pub fn calculate_score(state: &BattleState) -> u32 {
    let survivors = state.player_roster.iter().filter(|c| !c.is_fainted()).count() as i64;
    let total_hp: u64 = state.player_roster.iter().map(|c| c.current_hp as u64).sum();
    let total_max_hp: u64 = state.player_roster.iter().map(|c| c.max_hp as u64).sum();
    let hp_bonus = if total_max_hp == 0 {
        0
    } else {
        (HP_RATIO_BONUS as u64 * total_hp / total_max_hp) as i64
    };

    let score = WIN_BONUS
        + DEFEATED_OPPONENT_BONUS * state.defeated_opponent.len() as i64
        + SURVIVOR_BONUS * survivors
        + hp_bonus
        - LOST_COMBATANT_PENALTY * state.defeated_player.len() as i64;
    score.max(0) as u32
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub result: BattleResult,
    pub score: u32,
    pub leader_name: String,
    pub opponent_name: String,
}

/// What a leaderboard submission needs from a finished battle. Each side's
/// name is its active combatant, else its most recently defeated one.
pub fn battle_summary(state: &BattleState) -> BattleSummary {
    let leader_name = state
        .current_player()
        .map(|c| c.name.clone())
        .or_else(|| state.defeated_player.last().cloned())
        .unwrap_or_else(|| UNKNOWN_COMBATANT.to_string());
    let opponent_name = state
        .current_opponent()
        .map(|c| c.name.clone())
        .or_else(|| state.defeated_opponent.last().cloned())
        .unwrap_or_else(|| UNKNOWN_COMBATANT.to_string());

    BattleSummary {
        result: state.result(),
        score: state.score,
        leader_name,
        opponent_name,
    }
}
