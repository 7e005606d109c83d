use serde::{Deserialize, Serialize};

pub const MAX_ROSTER_SIZE: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub types: Vec<String>,
    pub image: String,
}

impl Combatant {
    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// A copy with `current_hp` replaced, clamped to `[0, max_hp]`.
    pub fn with_hp(&self, hp: u32) -> Self {
        Self {
            current_hp: hp.min(self.max_hp),
            ..self.clone()
        }
    }

    pub fn primary_type(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or("normal")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleResult {
    Ongoing,
    Win,
    Lose,
}

impl From<Outcome> for BattleResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => BattleResult::Win,
            Outcome::Lose => BattleResult::Lose,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseKind {
    PlayerSelection,
    OpponentSelection,
    Battle,
    PlayerFainted,
    OpponentFainted,
    PlayerSwitch,
    Result,
}

/// Each variant carries exactly the active combatants that exist in it,
/// together with the roster index each one was sent out from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum Phase {
    PlayerSelection,
    OpponentSelection {
        player: Combatant,
        player_slot: usize,
    },
    Battle {
        player: Combatant,
        player_slot: usize,
        opponent: Combatant,
        opponent_slot: usize,
        turn: Side,
    },
    PlayerFainted {
        opponent: Combatant,
        opponent_slot: usize,
    },
    OpponentFainted {
        player: Combatant,
        player_slot: usize,
    },
    // switch window opened after an opponent faint
    PlayerSwitch {
        player: Combatant,
        player_slot: usize,
    },
    Result {
        outcome: Outcome,
        player: Option<Combatant>,
        opponent: Option<Combatant>,
    },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::PlayerSelection => PhaseKind::PlayerSelection,
            Phase::OpponentSelection { .. } => PhaseKind::OpponentSelection,
            Phase::Battle { .. } => PhaseKind::Battle,
            Phase::PlayerFainted { .. } => PhaseKind::PlayerFainted,
            Phase::OpponentFainted { .. } => PhaseKind::OpponentFainted,
            Phase::PlayerSwitch { .. } => PhaseKind::PlayerSwitch,
            Phase::Result { .. } => PhaseKind::Result,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub player_roster: Vec<Combatant>,
    pub opponent_roster: Vec<Combatant>,
    pub phase: Phase,
    #[serde(default)]
    pub log: Vec<String>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub defeated_player: Vec<String>,
    #[serde(default)]
    pub defeated_opponent: Vec<String>,
}

impl BattleState {
    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// Outside `Battle` the player is up, except after a loss, which always
    /// ends on the opponent's strike.
    pub fn turn(&self) -> Side {
        match &self.phase {
            Phase::Battle { turn, .. } => *turn,
            Phase::Result {
                outcome: Outcome::Lose,
                ..
            } => Side::Opponent,
            _ => Side::Player,
        }
    }

    pub fn result(&self) -> BattleResult {
        match &self.phase {
            Phase::Result { outcome, .. } => (*outcome).into(),
            _ => BattleResult::Ongoing,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Result { .. })
    }

    pub fn current_player(&self) -> Option<&Combatant> {
        match &self.phase {
            Phase::OpponentSelection { player, .. }
            | Phase::Battle { player, .. }
            | Phase::OpponentFainted { player, .. }
            | Phase::PlayerSwitch { player, .. } => Some(player),
            Phase::Result { player, .. } => player.as_ref(),
            Phase::PlayerSelection | Phase::PlayerFainted { .. } => None,
        }
    }

    pub fn current_opponent(&self) -> Option<&Combatant> {
        match &self.phase {
            Phase::Battle { opponent, .. } | Phase::PlayerFainted { opponent, .. } => Some(opponent),
            Phase::Result { opponent, .. } => opponent.as_ref(),
            Phase::PlayerSelection
            | Phase::OpponentSelection { .. }
            | Phase::OpponentFainted { .. }
            | Phase::PlayerSwitch { .. } => None,
        }
    }

    pub fn current_player_slot(&self) -> Option<usize> {
        match &self.phase {
            Phase::OpponentSelection { player_slot, .. }
            | Phase::Battle { player_slot, .. }
            | Phase::OpponentFainted { player_slot, .. }
            | Phase::PlayerSwitch { player_slot, .. } => Some(*player_slot),
            _ => None,
        }
    }

    pub fn current_opponent_slot(&self) -> Option<usize> {
        match &self.phase {
            Phase::Battle { opponent_slot, .. } | Phase::PlayerFainted { opponent_slot, .. } => {
                Some(*opponent_slot)
            }
            _ => None,
        }
    }
}

pub fn create_battle_state(player_roster: Vec<Combatant>, opponent_roster: Vec<Combatant>) -> BattleState {
    if player_roster.len() > MAX_ROSTER_SIZE || opponent_roster.len() > MAX_ROSTER_SIZE {
        tracing::warn!(
            player = player_roster.len(),
            opponent = opponent_roster.len(),
            "roster larger than {} combatants, extra entries are dropped",
            MAX_ROSTER_SIZE
        );
    }
    BattleState {
        player_roster: player_roster.into_iter().take(MAX_ROSTER_SIZE).collect(),
        opponent_roster: opponent_roster.into_iter().take(MAX_ROSTER_SIZE).collect(),
        phase: Phase::PlayerSelection,
        log: vec![
            "A Trainer appeared!".to_string(),
            "Choose your first combatant!".to_string(),
        ],
        score: 0,
        defeated_player: Vec::new(),
        defeated_opponent: Vec::new(),
    }
}
