//! camelCase JSON view of the battle state for the browser bindings.
//!
//! The wire form is flat (nullable current combatants next to a phase tag);
//! converting back rebuilds the tagged `Phase` and rejects combinations that
//! cannot occur.

use crate::core::scoring::BattleSummary;
use crate::core::state::{BattleResult, BattleState, Combatant, Outcome, Phase, PhaseKind, Side};
use crate::core::utils::active_slot;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantWire {
    pub id: u32,
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub types: Vec<String>,
    #[serde(default)]
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleStateWire {
    pub player_roster: Vec<CombatantWire>,
    pub opponent_roster: Vec<CombatantWire>,
    pub current_player_combatant: Option<CombatantWire>,
    pub current_opponent_combatant: Option<CombatantWire>,
    #[serde(default)]
    pub current_player_slot: Option<usize>,
    #[serde(default)]
    pub current_opponent_slot: Option<usize>,
    pub turn: Side,
    pub phase: PhaseKind,
    #[serde(default)]
    pub battle_log: Vec<String>,
    pub result: BattleResult,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub defeated_player_combatants: Vec<String>,
    #[serde(default)]
    pub defeated_opponent_combatants: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSummaryWire {
    pub result: BattleResult,
    pub score: u32,
    pub leader_combatant_name: String,
    pub opponent_combatant_name: String,
}

impl From<Combatant> for CombatantWire {
    fn from(combatant: Combatant) -> Self {
        Self {
            id: combatant.id,
            name: combatant.name,
            max_hp: combatant.max_hp,
            current_hp: combatant.current_hp,
            attack: combatant.attack,
            defense: combatant.defense,
            speed: combatant.speed,
            types: combatant.types,
            image: combatant.image,
        }
    }
}

impl From<CombatantWire> for Combatant {
    fn from(combatant: CombatantWire) -> Self {
        Self {
            id: combatant.id,
            name: combatant.name,
            max_hp: combatant.max_hp,
            current_hp: combatant.current_hp.min(combatant.max_hp),
            attack: combatant.attack,
            defense: combatant.defense,
            speed: combatant.speed,
            types: combatant.types,
            image: combatant.image,
        }
    }
}

impl From<BattleSummary> for BattleSummaryWire {
    fn from(summary: BattleSummary) -> Self {
        Self {
            result: summary.result,
            score: summary.score,
            leader_combatant_name: summary.leader_name,
            opponent_combatant_name: summary.opponent_name,
        }
    }
}

impl From<BattleState> for BattleStateWire {
    fn from(state: BattleState) -> Self {
        let turn = state.turn();
        let phase = state.phase_kind();
        let result = state.result();
        let current_player_slot = state.current_player_slot();
        let current_opponent_slot = state.current_opponent_slot();
        let current_player_combatant = state.current_player().cloned().map(CombatantWire::from);
        let current_opponent_combatant = state.current_opponent().cloned().map(CombatantWire::from);
        Self {
            player_roster: state.player_roster.into_iter().map(CombatantWire::from).collect(),
            opponent_roster: state.opponent_roster.into_iter().map(CombatantWire::from).collect(),
            current_player_combatant,
            current_opponent_combatant,
            current_player_slot,
            current_opponent_slot,
            turn,
            phase,
            battle_log: state.log,
            result,
            score: state.score,
            defeated_player_combatants: state.defeated_player,
            defeated_opponent_combatants: state.defeated_opponent,
        }
    }
}

/// An explicit slot must point into the roster; a missing one is recovered
/// from the combatant's id.
fn resolve_slot(roster: &[Combatant], combatant: &Combatant, slot: Option<usize>, side: &str) -> Result<usize, String> {
    match slot {
        Some(slot) if slot < roster.len() => Ok(slot),
        Some(slot) => Err(format!("{} slot {} is outside a roster of {}", side, slot, roster.len())),
        None => active_slot(roster, combatant.id)
            .ok_or_else(|| format!("current {} combatant {} is not in its roster", side, combatant.id)),
    }
}

impl TryFrom<BattleStateWire> for BattleState {
    type Error = String;

    fn try_from(state: BattleStateWire) -> Result<Self, Self::Error> {
        let player_roster: Vec<Combatant> = state.player_roster.into_iter().map(Combatant::from).collect();
        let opponent_roster: Vec<Combatant> = state.opponent_roster.into_iter().map(Combatant::from).collect();
        let player = state.current_player_combatant.map(Combatant::from);
        let opponent = state.current_opponent_combatant.map(Combatant::from);
        let kind = state.phase;

        let active_player = |player: Option<Combatant>| -> Result<(Combatant, usize), String> {
            let player = player.ok_or_else(|| format!("phase {:?} requires a current player combatant", kind))?;
            let slot = resolve_slot(&player_roster, &player, state.current_player_slot, "player")?;
            Ok((player, slot))
        };
        let active_opponent = |opponent: Option<Combatant>| -> Result<(Combatant, usize), String> {
            let opponent =
                opponent.ok_or_else(|| format!("phase {:?} requires a current opponent combatant", kind))?;
            let slot = resolve_slot(&opponent_roster, &opponent, state.current_opponent_slot, "opponent")?;
            Ok((opponent, slot))
        };

        let phase = match kind {
            PhaseKind::PlayerSelection => Phase::PlayerSelection,
            PhaseKind::OpponentSelection => {
                let (player, player_slot) = active_player(player)?;
                Phase::OpponentSelection { player, player_slot }
            }
            PhaseKind::Battle => {
                let (player, player_slot) = active_player(player)?;
                let (opponent, opponent_slot) = active_opponent(opponent)?;
                Phase::Battle {
                    player,
                    player_slot,
                    opponent,
                    opponent_slot,
                    turn: state.turn,
                }
            }
            PhaseKind::PlayerFainted => {
                let (opponent, opponent_slot) = active_opponent(opponent)?;
                Phase::PlayerFainted {
                    opponent,
                    opponent_slot,
                }
            }
            PhaseKind::OpponentFainted => {
                let (player, player_slot) = active_player(player)?;
                Phase::OpponentFainted { player, player_slot }
            }
            PhaseKind::PlayerSwitch => {
                let (player, player_slot) = active_player(player)?;
                Phase::PlayerSwitch { player, player_slot }
            }
            PhaseKind::Result => {
                let outcome = match state.result {
                    BattleResult::Win => Outcome::Win,
                    BattleResult::Lose => Outcome::Lose,
                    BattleResult::Ongoing => return Err("result phase requires a win or lose result".to_string()),
                };
                Phase::Result {
                    outcome,
                    player,
                    opponent,
                }
            }
        };

        Ok(Self {
            player_roster,
            opponent_roster,
            phase,
            log: state.battle_log,
            score: state.score,
            defeated_player: state.defeated_player_combatants,
            defeated_opponent: state.defeated_opponent_combatants,
        })
    }
}
