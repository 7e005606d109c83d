use crate::core::state::Combatant;
use crate::data::catalog::{CatalogDatabase, CatalogEntry};
use std::collections::HashMap;

pub const DEFAULT_HP: u32 = 100;
pub const DEFAULT_ATTACK: u32 = 50;
pub const DEFAULT_DEFENSE: u32 = 50;
pub const DEFAULT_SPEED: u32 = 50;
pub const DEFAULT_TEAM_SIZE: usize = 6;
pub const DEFAULT_MAX_CATALOG_ID: u32 = 150;

/// `"special-attack"` -> `"special_attack"`.
pub fn normalize_stat_name(name: &str) -> String {
    name.trim().to_lowercase().replace('-', "_")
}

fn stat_or_default(stats: &HashMap<String, u32>, key: &str, default: u32) -> u32 {
    match stats.get(key) {
        Some(&value) if value > 0 => value,
        _ => default,
    }
}

/// Battle-ready combatant at full health from a catalog entry.
///
/// Missing or zero stats take the defaults; an entry without types fights as
/// `normal`.
pub fn create_combatant(entry: &CatalogEntry) -> Combatant {
    let stats: HashMap<String, u32> = entry
        .stats
        .iter()
        .map(|s| (normalize_stat_name(&s.stat.name), s.base_stat))
        .collect();

    let hp = stat_or_default(&stats, "hp", DEFAULT_HP);
    let mut types = entry.type_names();
    if types.is_empty() {
        types.push("normal".to_string());
    }

    Combatant {
        id: entry.id,
        name: entry.name.clone(),
        max_hp: hp,
        current_hp: hp,
        attack: stat_or_default(&stats, "attack", DEFAULT_ATTACK),
        defense: stat_or_default(&stats, "defense", DEFAULT_DEFENSE),
        speed: stat_or_default(&stats, "speed", DEFAULT_SPEED),
        types,
        image: entry.sprites.front_default.clone().unwrap_or_default(),
    }
}

/// Independent uniform draws in `1..=max_id`; duplicates allowed.
pub fn draw_team_ids(rng: &mut dyn FnMut() -> f64, team_size: usize, max_id: u32) -> Vec<u32> {
    let max_id = max_id.max(1);
    (0..team_size)
        .map(|_| {
            let roll = rng().clamp(0.0, 1.0);
            ((roll * max_id as f64) as u32 + 1).min(max_id)
        })
        .collect()
}

pub fn generate_opponent_team(
    catalog: &CatalogDatabase,
    rng: &mut dyn FnMut() -> f64,
    team_size: usize,
    max_id: u32,
) -> Vec<Combatant> {
    draw_team_ids(rng, team_size, max_id)
        .into_iter()
        .filter_map(|id| match catalog.get(id) {
            Some(entry) => Some(create_combatant(entry)),
            None => {
                tracing::warn!(id, "catalog has no entry for drawn id, slot skipped");
                None
            }
        })
        .collect()
}
