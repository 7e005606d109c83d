use battle_engine::core::scoring::{battle_summary, calculate_score, UNKNOWN_COMBATANT};
use battle_engine::core::state::{create_battle_state, BattleResult, Combatant, Outcome, Phase};
use pretty_assertions::assert_eq;

fn combatant(id: u32, name: &str, max_hp: u32, current_hp: u32) -> Combatant {
    Combatant {
        id,
        name: name.to_string(),
        max_hp,
        current_hp,
        attack: 50,
        defense: 50,
        speed: 50,
        types: vec!["normal".to_string()],
        image: String::new(),
    }
}

fn six(prefix: &str, hp: u32) -> Vec<Combatant> {
    (1..=6).map(|i| combatant(i, &format!("{}{}", prefix, i), 100, hp)).collect()
}

#[test]
fn flawless_sweep_scores_780() {
    let mut state = create_battle_state(six("P", 100), six("O", 0));
    state.defeated_opponent = (1..=6).map(|i| format!("O{}", i)).collect();
    assert_eq!(calculate_score(&state), 200 + 300 + 180 + 100);
}

#[test]
fn losses_and_damage_reduce_the_score() {
    let mut roster = six("P", 100);
    roster[0].current_hp = 0;
    roster[1].current_hp = 0;
    roster[2].current_hp = 50;
    let mut state = create_battle_state(roster, six("O", 0));
    state.defeated_opponent = vec!["O1".to_string(), "O2".to_string()];
    state.defeated_player = vec!["P1".to_string(), "P2".to_string()];

    // hp ratio 350 / 600 -> 58
    assert_eq!(calculate_score(&state), 200 + 100 + 4 * 30 + 58 - 40);
}

#[test]
fn score_is_never_negative() {
    let mut state = create_battle_state(vec![combatant(1, "P", 100, 0)], vec![]);
    state.defeated_player = (0..20).map(|i| format!("P{}", i)).collect();
    assert_eq!(calculate_score(&state), 0);
}

#[test]
fn summary_falls_back_to_last_defeated() {
    let mut state = create_battle_state(six("P", 100), six("O", 0));
    state.defeated_opponent = vec!["O1".to_string(), "O2".to_string()];
    state.score = 321;
    state.phase = Phase::Result {
        outcome: Outcome::Win,
        player: Some(state.player_roster[3].clone()),
        opponent: None,
    };

    let summary = battle_summary(&state);
    assert_eq!(summary.result, BattleResult::Win);
    assert_eq!(summary.score, 321);
    assert_eq!(summary.leader_name, "P4");
    assert_eq!(summary.opponent_name, "O2");
}

#[test]
fn summary_without_any_names_is_unknown() {
    let state = create_battle_state(vec![], vec![]);
    let summary = battle_summary(&state);
    assert_eq!(summary.result, BattleResult::Ongoing);
    assert_eq!(summary.leader_name, UNKNOWN_COMBATANT);
    assert_eq!(summary.opponent_name, UNKNOWN_COMBATANT);
}
