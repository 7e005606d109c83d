use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const ALL_TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

static GLOBAL_CHART: Lazy<TypeChart> = Lazy::new(TypeChart::new);

/// Attacking type -> defending type -> damage multiplier.
///
/// Pairs missing from the chart are neutral (1x).
#[derive(Clone, Debug)]
pub struct TypeChart {
    chart: HashMap<String, HashMap<String, f64>>,
}

impl TypeChart {
    pub fn new() -> Self {
        let mut chart: HashMap<String, HashMap<String, f64>> = HashMap::new();
        let mut add_entry = |attack: &str, super_effective: &[&str], not_very_effective: &[&str], no_effect: &[&str]| {
            let row = chart.entry(attack.to_string()).or_default();
            for defend in super_effective {
                row.insert(defend.to_string(), 2.0);
            }
            for defend in not_very_effective {
                row.insert(defend.to_string(), 0.5);
            }
            for defend in no_effect {
                row.insert(defend.to_string(), 0.0);
            }
        };

        add_entry("normal", &[], &["rock", "steel"], &["ghost"]);
        add_entry("fire", &["grass", "ice", "bug", "steel"], &["fire", "water", "rock", "dragon"], &[]);
        add_entry("water", &["fire", "ground", "rock"], &["water", "grass", "dragon"], &[]);
        add_entry("electric", &["water", "flying"], &["electric", "grass", "dragon"], &["ground"]);
        add_entry("grass", &["water", "ground", "rock"], &["fire", "grass", "poison", "flying", "bug", "dragon", "steel"], &[]);
        add_entry("ice", &["grass", "ground", "flying", "dragon"], &["fire", "water", "ice", "steel"], &[]);
        add_entry("fighting", &["normal", "ice", "rock", "dark", "steel"], &["poison", "flying", "psychic", "bug", "fairy"], &["ghost"]);
        add_entry("poison", &["grass", "fairy"], &["poison", "ground", "rock", "ghost"], &["steel"]);
        add_entry("ground", &["fire", "electric", "poison", "rock", "steel"], &["grass", "bug"], &["flying"]);
        add_entry("flying", &["grass", "fighting", "bug"], &["electric", "rock", "steel"], &[]);
        add_entry("psychic", &["fighting", "poison"], &["psychic", "steel"], &["dark"]);
        add_entry("bug", &["grass", "psychic", "dark"], &["fire", "fighting", "poison", "flying", "ghost", "steel", "fairy"], &[]);
        add_entry("rock", &["fire", "ice", "flying", "bug"], &["fighting", "ground", "steel"], &[]);
        add_entry("ghost", &["psychic", "ghost"], &["dark"], &["normal"]);
        add_entry("dragon", &["dragon"], &["steel"], &["fairy"]);
        add_entry("dark", &["psychic", "ghost"], &["fighting", "dark", "fairy"], &[]);
        add_entry("steel", &["ice", "rock", "fairy"], &["fire", "water", "electric", "steel"], &[]);
        add_entry("fairy", &["fighting", "dragon", "dark"], &["fire", "poison", "steel"], &[]);

        Self { chart }
    }

    /// The process-wide chart, built on first use.
    pub fn global() -> &'static TypeChart {
        &GLOBAL_CHART
    }

    pub fn multiplier(&self, attack_type: &str, defend_type: &str) -> f64 {
        let attack_key = attack_type.to_lowercase();
        let defend_key = defend_type.to_lowercase();
        self.chart
            .get(&attack_key)
            .and_then(|row| row.get(&defend_key))
            .copied()
            .unwrap_or(1.0)
    }

    /// Product of the pairwise multipliers over every defending type, so dual
    /// types compound (4x, 0.25x, or 0 when any pair is an immunity).
    pub fn effectiveness(&self, attack_type: &str, defender_types: &[String]) -> f64 {
        defender_types
            .iter()
            .map(|defend| self.multiplier(attack_type, defend))
            .product()
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::new()
    }
}

pub fn effectiveness(attack_type: &str, defender_types: &[String]) -> f64 {
    TypeChart::global().effectiveness(attack_type, defender_types)
}
