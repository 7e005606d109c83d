use crate::core::state::Combatant;
use crate::data::type_chart::TypeChart;
use serde::{Deserialize, Serialize};

pub const BASE_DAMAGE_SCALE: f64 = 30.0;
pub const MIN_RANDOM_FACTOR: f64 = 0.85;
pub const RANDOM_FACTOR_SPREAD: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effectiveness {
    Neutral,
    SuperEffective,
    NotVeryEffective,
    NoEffect,
}

impl Effectiveness {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 0.0 {
            Effectiveness::NoEffect
        } else if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else {
            Effectiveness::Neutral
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Effectiveness::Neutral => None,
            Effectiveness::SuperEffective => Some("It's super effective!"),
            Effectiveness::NotVeryEffective => Some("It's not very effective..."),
            Effectiveness::NoEffect => Some("It has no effect!"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttackOutcome {
    pub move_type: String,
    pub damage: u32,
    pub multiplier: f64,
    pub effectiveness: Effectiveness,
    /// The defender after the hit.
    pub defender: Combatant,
    pub message: String,
}

fn random_factor(rng: &mut dyn FnMut() -> f64) -> f64 {
    MIN_RANDOM_FACTOR + rng().clamp(0.0, 1.0) * RANDOM_FACTOR_SPREAD
}

/// `max(1, floor(floor(atk / def * 30) * jitter * type_multiplier))`.
///
/// The floor of 1 applies even when the matchup multiplier is 0.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_type: Option<&str>,
    type_chart: &TypeChart,
    rng: &mut dyn FnMut() -> f64,
) -> u32 {
    let attack_type = move_type.unwrap_or_else(|| attacker.primary_type());
    let multiplier = type_chart.effectiveness(attack_type, &defender.types);
    damage_with_multiplier(attacker, defender, multiplier, rng)
}

fn damage_with_multiplier(
    attacker: &Combatant,
    defender: &Combatant,
    multiplier: f64,
    rng: &mut dyn FnMut() -> f64,
) -> u32 {
    let defense = defender.defense.max(1) as f64;
    let base = (attacker.attack as f64 / defense * BASE_DAMAGE_SCALE).floor();
    let damage = (base * random_factor(rng) * multiplier).floor();
    (damage as u32).max(1)
}

pub fn execute_attack(
    attacker: &Combatant,
    defender: &Combatant,
    move_type: Option<&str>,
    type_chart: &TypeChart,
    rng: &mut dyn FnMut() -> f64,
) -> AttackOutcome {
    let attack_type = move_type.unwrap_or_else(|| attacker.primary_type()).to_string();
    let multiplier = type_chart.effectiveness(&attack_type, &defender.types);
    let damage = damage_with_multiplier(attacker, defender, multiplier, rng);
    let effectiveness = Effectiveness::from_multiplier(multiplier);
    let updated = defender.with_hp(defender.current_hp.saturating_sub(damage));

    let message = match effectiveness.message() {
        Some(note) => format!(
            "{} attacks {} for {} damage! {}",
            attacker.name, defender.name, damage, note
        ),
        None => format!("{} attacks {} for {} damage!", attacker.name, defender.name, damage),
    };

    tracing::trace!(
        attacker = %attacker.name,
        defender = %defender.name,
        move_type = %attack_type,
        multiplier,
        damage,
        remaining = updated.current_hp,
        "attack resolved"
    );

    AttackOutcome {
        move_type: attack_type,
        damage,
        multiplier,
        effectiveness,
        defender: updated,
        message,
    }
}
