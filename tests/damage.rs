use battle_engine::core::effects::{calculate_damage, execute_attack, Effectiveness};
use battle_engine::core::state::Combatant;
use battle_engine::data::type_chart::TypeChart;
use pretty_assertions::assert_eq;

fn combatant(name: &str, hp: u32, attack: u32, defense: u32, types: &[&str]) -> Combatant {
    Combatant {
        id: 1,
        name: name.to_string(),
        max_hp: hp,
        current_hp: hp,
        attack,
        defense,
        speed: 50,
        types: types.iter().map(|t| t.to_string()).collect(),
        image: String::new(),
    }
}

#[test]
fn neutral_hit_at_mid_roll() {
    let chart = TypeChart::new();
    let attacker = combatant("A", 50, 80, 40, &["normal"]);
    let defender = combatant("B", 50, 40, 40, &["water"]);
    let mut rng = || 0.5;

    // floor(80 / 40 * 30) = 60, jitter 1.0
    assert_eq!(calculate_damage(&attacker, &defender, Some("normal"), &chart, &mut rng), 60);
}

#[test]
fn jitter_spans_085_to_115() {
    let chart = TypeChart::new();
    let attacker = combatant("A", 50, 100, 50, &["normal"]);
    let defender = combatant("B", 50, 50, 100, &["normal"]);

    let mut low = || 0.0;
    let mut high = || 1.0;
    assert_eq!(calculate_damage(&attacker, &defender, None, &chart, &mut low), 25);
    assert_eq!(calculate_damage(&attacker, &defender, None, &chart, &mut high), 34);
}

#[test]
fn immune_matchup_still_deals_one() {
    let chart = TypeChart::new();
    let attacker = combatant("Zap", 50, 200, 40, &["electric"]);
    let defender = combatant("Dig", 50, 40, 40, &["ground"]);
    let mut rng = || 1.0;

    let outcome = execute_attack(&attacker, &defender, Some("electric"), &chart, &mut rng);
    assert_eq!(outcome.damage, 1);
    assert_eq!(outcome.multiplier, 0.0);
    assert_eq!(outcome.effectiveness, Effectiveness::NoEffect);
    assert_eq!(outcome.defender.current_hp, 49);
    assert_eq!(outcome.message, "Zap attacks Dig for 1 damage! It has no effect!");
}

#[test]
fn weak_attacker_is_floored_at_one() {
    let chart = TypeChart::new();
    let attacker = combatant("A", 50, 1, 40, &["normal"]);
    let defender = combatant("B", 50, 40, 250, &["normal"]);
    let mut rng = || 0.0;

    assert_eq!(calculate_damage(&attacker, &defender, None, &chart, &mut rng), 1);
}

#[test]
fn hp_never_goes_below_zero() {
    let chart = TypeChart::new();
    let attacker = combatant("Blaze", 50, 200, 40, &["fire"]);
    let defender = combatant("Leaf", 10, 40, 20, &["grass"]);
    let mut rng = || 0.5;

    let outcome = execute_attack(&attacker, &defender, Some("fire"), &chart, &mut rng);
    assert!(outcome.damage > 10);
    assert_eq!(outcome.defender.current_hp, 0);
    assert!(outcome.defender.is_fainted());
    assert_eq!(
        outcome.message,
        format!("Blaze attacks Leaf for {} damage! It's super effective!", outcome.damage)
    );
}

#[test]
fn resisted_hit_message() {
    let chart = TypeChart::new();
    let attacker = combatant("Splash", 50, 40, 40, &["water"]);
    let defender = combatant("Vine", 50, 40, 40, &["grass"]);
    let mut rng = || 0.5;

    let outcome = execute_attack(&attacker, &defender, Some("water"), &chart, &mut rng);
    assert_eq!(outcome.damage, 15);
    assert_eq!(outcome.message, "Splash attacks Vine for 15 damage! It's not very effective...");
}

#[test]
fn zero_defense_does_not_divide_by_zero() {
    let chart = TypeChart::new();
    let attacker = combatant("A", 50, 10, 40, &["normal"]);
    let defender = combatant("B", 50, 40, 0, &["normal"]);
    let mut rng = || 0.5;

    assert_eq!(calculate_damage(&attacker, &defender, None, &chart, &mut rng), 300);
}
