use battle_engine::data::type_chart::{effectiveness, TypeChart, ALL_TYPES};
use pretty_assertions::assert_eq;

fn types(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn single_type_matchups() {
    assert_eq!(effectiveness("fire", &types(&["grass"])), 2.0);
    assert_eq!(effectiveness("water", &types(&["grass"])), 0.5);
    assert_eq!(effectiveness("normal", &types(&["normal"])), 1.0);
    assert_eq!(effectiveness("fairy", &types(&["dragon"])), 2.0);
    assert_eq!(effectiveness("steel", &types(&["fairy"])), 2.0);
}

#[test]
fn immunities_are_zero() {
    assert_eq!(effectiveness("electric", &types(&["ground"])), 0.0);
    assert_eq!(effectiveness("normal", &types(&["ghost"])), 0.0);
    assert_eq!(effectiveness("ghost", &types(&["normal"])), 0.0);
    assert_eq!(effectiveness("ground", &types(&["flying"])), 0.0);
    assert_eq!(effectiveness("psychic", &types(&["dark"])), 0.0);
    assert_eq!(effectiveness("dragon", &types(&["fairy"])), 0.0);
    assert_eq!(effectiveness("poison", &types(&["steel"])), 0.0);
    assert_eq!(effectiveness("fighting", &types(&["ghost"])), 0.0);
}

#[test]
fn dual_types_compound() {
    assert_eq!(effectiveness("water", &types(&["fire", "rock"])), 4.0);
    assert_eq!(effectiveness("fire", &types(&["water", "dragon"])), 0.25);
    assert_eq!(effectiveness("ice", &types(&["grass", "steel"])), 1.0);
    assert_eq!(effectiveness("electric", &types(&["water", "ground"])), 0.0);
}

#[test]
fn flying_attacks_use_the_offensive_row() {
    assert_eq!(effectiveness("flying", &types(&["grass"])), 2.0);
    assert_eq!(effectiveness("flying", &types(&["fighting"])), 2.0);
    assert_eq!(effectiveness("flying", &types(&["bug"])), 2.0);
    assert_eq!(effectiveness("flying", &types(&["electric"])), 0.5);
    assert_eq!(effectiveness("flying", &types(&["ground"])), 1.0);
}

#[test]
fn unknown_pairs_and_case_are_neutral_lookups() {
    let chart = TypeChart::new();
    assert_eq!(chart.multiplier("shadow", "fire"), 1.0);
    assert_eq!(chart.multiplier("Fire", "GRASS"), 2.0);
    assert_eq!(chart.effectiveness("fire", &[]), 1.0);
}

#[test]
fn every_cell_is_a_known_multiplier() {
    let chart = TypeChart::global();
    for attack in ALL_TYPES {
        for defend in ALL_TYPES {
            let m = chart.multiplier(attack, defend);
            assert!(
                [0.0, 0.5, 1.0, 2.0].contains(&m),
                "{} vs {} has multiplier {}",
                attack,
                defend,
                m
            );
        }
    }
}
