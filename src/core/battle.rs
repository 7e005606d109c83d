use crate::ai::simple::{choose_opponent_combatant, choose_opponent_move};
use crate::core::effects::execute_attack;
use crate::core::scoring::calculate_score;
use crate::core::state::{BattleState, Combatant, Outcome, Phase, Side};
use crate::core::utils::{has_usable_combatant, write_back};
use crate::data::type_chart::TypeChart;
use once_cell::sync::Lazy;
use tracing::debug;

static DEFAULT_ENGINE: Lazy<BattleEngine> = Lazy::new(BattleEngine::default);

/// Speed ties go to the player.
pub fn first_to_act(player: &Combatant, opponent: &Combatant) -> Side {
    if player.speed >= opponent.speed {
        Side::Player
    } else {
        Side::Opponent
    }
}

#[derive(Clone, Debug, Default)]
pub struct BattleEngine {
    type_chart: TypeChart,
}

impl BattleEngine {
    pub fn new(type_chart: TypeChart) -> Self {
        Self { type_chart }
    }

    pub fn type_chart(&self) -> &TypeChart {
        &self.type_chart
    }

    /// A missing or fainted entry is ignored.
    pub fn select_combatant(&self, state: &BattleState, index: usize) -> BattleState {
        let Some(selected) = state.player_roster.get(index).filter(|c| !c.is_fainted()) else {
            debug!(index, "ignoring selection of a missing or fainted combatant");
            return state.clone();
        };

        let phase = match &state.phase {
            Phase::PlayerSelection => Phase::OpponentSelection {
                player: selected.clone(),
                player_slot: index,
            },
            Phase::PlayerSwitch { player_slot, .. } if *player_slot == index => {
                return self.keep_current_combatant(state);
            }
            Phase::PlayerSwitch { .. } => Phase::OpponentSelection {
                player: selected.clone(),
                player_slot: index,
            },
            Phase::PlayerFainted {
                opponent,
                opponent_slot,
            } => {
                let turn = first_to_act(selected, opponent);
                debug!(player = %selected.name, opponent = %opponent.name, ?turn, "replacement selected");
                Phase::Battle {
                    player: selected.clone(),
                    player_slot: index,
                    opponent: opponent.clone(),
                    opponent_slot: *opponent_slot,
                    turn,
                }
            }
            other => {
                debug!(phase = ?other.kind(), "selection is not valid in this phase");
                return state.clone();
            }
        };

        let mut next = state.clone();
        next.log.push(format!("Go, {}!", selected.name));
        next.phase = phase;
        next
    }

    /// Sends out the opponent's next combatant, or ends the battle as a win
    /// when none is left standing.
    pub fn select_opponent(&self, state: &BattleState) -> BattleState {
        let (player, player_slot) = match &state.phase {
            Phase::OpponentSelection { player, player_slot }
            | Phase::OpponentFainted { player, player_slot } => (player.clone(), *player_slot),
            other => {
                debug!(phase = ?other.kind(), "opponent selection is not valid in this phase");
                return state.clone();
            }
        };

        let mut next = state.clone();
        let Some(opponent_slot) = choose_opponent_combatant(&state.opponent_roster, None) else {
            debug!("opponent has no usable combatants");
            next.phase = Phase::Result {
                outcome: Outcome::Win,
                player: Some(player),
                opponent: None,
            };
            next.log.push("All opponent combatants fainted! You win!".to_string());
            next.score = calculate_score(&next);
            return next;
        };

        let opponent = state.opponent_roster[opponent_slot].clone();
        let turn = first_to_act(&player, &opponent);
        debug!(opponent = %opponent.name, hp = opponent.current_hp, ?turn, "opponent selected");
        next.log.push(format!("Opponent sends out {}!", opponent.name));
        next.phase = Phase::Battle {
            player,
            player_slot,
            opponent,
            opponent_slot,
            turn,
        };
        next
    }

    pub fn open_switch_window(&self, state: &BattleState) -> BattleState {
        let Phase::OpponentFainted { player, player_slot } = &state.phase else {
            debug!(phase = ?state.phase_kind(), "switch window is only offered after an opponent faint");
            return state.clone();
        };
        let mut next = state.clone();
        next.log.push(format!("Switch combatants or keep {} in battle.", player.name));
        next.phase = Phase::PlayerSwitch {
            player: player.clone(),
            player_slot: *player_slot,
        };
        next
    }

    /// The opponent pick follows.
    pub fn keep_current_combatant(&self, state: &BattleState) -> BattleState {
        let Phase::PlayerSwitch { player, player_slot } = &state.phase else {
            debug!(phase = ?state.phase_kind(), "no switch window to close");
            return state.clone();
        };
        let mut next = state.clone();
        next.log.push(format!("{} stays in battle!", player.name));
        next.phase = Phase::OpponentSelection {
            player: player.clone(),
            player_slot: *player_slot,
        };
        next
    }

    /// The player's strike needs `move_type`; the opponent's ignores it and
    /// rolls one of its own types. Anything outside `Battle`, or a player turn
    /// with no move type, returns the state unchanged.
    pub fn resolve_round(
        &self,
        state: &BattleState,
        move_type: Option<&str>,
        rng: &mut dyn FnMut() -> f64,
    ) -> BattleState {
        let Phase::Battle {
            player,
            player_slot,
            opponent,
            opponent_slot,
            turn,
        } = &state.phase
        else {
            debug!(phase = ?state.phase_kind(), "round resolution requires both combatants in battle");
            return state.clone();
        };
        let active = Active {
            player,
            player_slot: *player_slot,
            opponent,
            opponent_slot: *opponent_slot,
        };

        match (turn, move_type) {
            (Side::Player, Some(move_type)) => self.player_strikes(state, active, move_type, rng),
            (Side::Player, None) => {
                debug!("player turn needs a move type");
                state.clone()
            }
            (Side::Opponent, _) => self.opponent_strikes(state, active, rng),
        }
    }

    fn player_strikes(
        &self,
        state: &BattleState,
        active: Active<'_>,
        move_type: &str,
        rng: &mut dyn FnMut() -> f64,
    ) -> BattleState {
        let Active {
            player,
            player_slot,
            opponent,
            opponent_slot,
        } = active;
        let attack = execute_attack(player, opponent, Some(move_type), &self.type_chart, rng);
        let opponent_after = attack.defender;

        let mut next = state.clone();
        next.opponent_roster = write_back(&state.opponent_roster, opponent_slot, &opponent_after);
        next.log.push(attack.message);

        if !opponent_after.is_fainted() {
            next.phase = Phase::Battle {
                player: player.clone(),
                player_slot,
                opponent: opponent_after,
                opponent_slot,
                turn: Side::Opponent,
            };
            return next;
        }

        debug!(opponent = %opponent_after.name, "opponent combatant fainted");
        next.defeated_opponent.push(opponent_after.name.clone());
        next.log.push(format!("{} fainted!", opponent_after.name));

        if has_usable_combatant(&next.opponent_roster) {
            next.log.push("The opponent's combatant fainted! They will send out a new one...".to_string());
            next.log.push("You can also switch combatants if you want!".to_string());
            next.phase = Phase::OpponentFainted {
                player: player.clone(),
                player_slot,
            };
        } else {
            next.log.push("All opponent combatants fainted! You win the battle!".to_string());
            next.phase = Phase::Result {
                outcome: Outcome::Win,
                player: Some(player.clone()),
                opponent: Some(opponent_after),
            };
            next.score = calculate_score(&next);
            debug!(score = next.score, "battle won");
        }
        next
    }

    fn opponent_strikes(&self, state: &BattleState, active: Active<'_>, rng: &mut dyn FnMut() -> f64) -> BattleState {
        let Active {
            player,
            player_slot,
            opponent,
            opponent_slot,
        } = active;
        let move_type = choose_opponent_move(opponent, rng);
        let attack = execute_attack(opponent, player, Some(&move_type), &self.type_chart, rng);
        let player_after = attack.defender;

        let mut next = state.clone();
        next.player_roster = write_back(&state.player_roster, player_slot, &player_after);
        next.log.push(attack.message);

        if !player_after.is_fainted() {
            next.phase = Phase::Battle {
                player: player_after,
                player_slot,
                opponent: opponent.clone(),
                opponent_slot,
                turn: Side::Player,
            };
            return next;
        }

        debug!(player = %player_after.name, "player combatant fainted");
        next.defeated_player.push(player_after.name.clone());
        next.log.push(format!("{} fainted!", player_after.name));

        if has_usable_combatant(&next.player_roster) {
            next.log.push("Choose your next combatant!".to_string());
            next.phase = Phase::PlayerFainted {
                opponent: opponent.clone(),
                opponent_slot,
            };
        } else {
            next.log.push("All your combatants fainted! You lose the battle!".to_string());
            next.phase = Phase::Result {
                outcome: Outcome::Lose,
                player: Some(player_after),
                opponent: Some(opponent.clone()),
            };
            debug!("battle lost");
        }
        next
    }
}

#[derive(Clone, Copy)]
struct Active<'a> {
    player: &'a Combatant,
    player_slot: usize,
    opponent: &'a Combatant,
    opponent_slot: usize,
}

pub fn select_combatant(state: &BattleState, index: usize) -> BattleState {
    DEFAULT_ENGINE.select_combatant(state, index)
}

pub fn select_opponent(state: &BattleState) -> BattleState {
    DEFAULT_ENGINE.select_opponent(state)
}

pub fn open_switch_window(state: &BattleState) -> BattleState {
    DEFAULT_ENGINE.open_switch_window(state)
}

pub fn keep_current_combatant(state: &BattleState) -> BattleState {
    DEFAULT_ENGINE.keep_current_combatant(state)
}

pub fn resolve_round(state: &BattleState, move_type: Option<&str>, rng: &mut dyn FnMut() -> f64) -> BattleState {
    DEFAULT_ENGINE.resolve_round(state, move_type, rng)
}

pub fn is_battle_over(state: &BattleState) -> bool {
    state.is_over()
}
