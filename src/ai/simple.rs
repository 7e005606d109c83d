use crate::core::battle::BattleEngine;
use crate::core::state::{BattleState, Combatant, PhaseKind, Side};
use crate::core::utils::available_indices;
use crate::data::type_chart::TypeChart;

/// Uniform pick among the combatant's own types.
pub fn choose_opponent_move(opponent: &Combatant, rng: &mut dyn FnMut() -> f64) -> String {
    if opponent.types.is_empty() {
        return opponent.primary_type().to_string();
    }
    let roll = rng().clamp(0.0, 1.0);
    let idx = ((roll * opponent.types.len() as f64) as usize).min(opponent.types.len() - 1);
    opponent.types[idx].clone()
}

/// First standing entry in roster order that is not `exclude_id`, falling back
/// to the first standing entry.
pub fn choose_opponent_combatant(roster: &[Combatant], exclude_id: Option<u32>) -> Option<usize> {
    let available = available_indices(roster);
    available
        .iter()
        .copied()
        .find(|&i| Some(roster[i].id) != exclude_id)
        .or_else(|| available.first().copied())
}

/// Own type with the highest multiplier against the defender; earlier types win ties.
pub fn choose_best_move_type(attacker: &Combatant, defender: &Combatant, type_chart: &TypeChart) -> String {
    let mut best_type = attacker.primary_type().to_string();
    let mut best_multiplier = type_chart.effectiveness(&best_type, &defender.types);

    for move_type in attacker.types.iter().skip(1) {
        let multiplier = type_chart.effectiveness(move_type, &defender.types);
        if multiplier > best_multiplier {
            best_multiplier = multiplier;
            best_type = move_type.clone();
        }
    }
    best_type
}

/// Plays both sides until the battle ends, a transition stops making
/// progress, or `max_steps` transitions have run.
pub fn run_auto_battle(
    engine: &BattleEngine,
    state: &BattleState,
    rng: &mut dyn FnMut() -> f64,
    max_steps: usize,
) -> BattleState {
    let mut next = state.clone();
    let mut steps = 0;
    while !next.is_over() && steps < max_steps {
        steps += 1;
        let advanced = match next.phase_kind() {
            PhaseKind::PlayerSelection | PhaseKind::PlayerFainted => {
                let Some(&index) = available_indices(&next.player_roster).first() else {
                    break;
                };
                engine.select_combatant(&next, index)
            }
            PhaseKind::OpponentSelection | PhaseKind::OpponentFainted => engine.select_opponent(&next),
            PhaseKind::PlayerSwitch => engine.keep_current_combatant(&next),
            PhaseKind::Battle => match next.turn() {
                Side::Player => {
                    let move_type = match (next.current_player(), next.current_opponent()) {
                        (Some(player), Some(opponent)) => {
                            choose_best_move_type(player, opponent, engine.type_chart())
                        }
                        _ => break,
                    };
                    engine.resolve_round(&next, Some(&move_type), rng)
                }
                Side::Opponent => engine.resolve_round(&next, None, rng),
            },
            PhaseKind::Result => break,
        };
        if advanced == next {
            tracing::debug!(steps, "auto battle stalled");
            break;
        }
        next = advanced;
    }
    next
}
