pub mod ai;
pub mod core;
pub mod data;
pub mod error;
pub mod wire;

#[cfg(not(target_arch = "wasm32"))]
pub mod tools;

pub use ai::{choose_best_move_type, choose_opponent_combatant, choose_opponent_move, run_auto_battle};
pub use core::{
    battle::{
        first_to_act, is_battle_over, keep_current_combatant, open_switch_window, resolve_round,
        select_combatant, select_opponent, BattleEngine,
    },
    effects::{calculate_damage, execute_attack, AttackOutcome, Effectiveness},
    factory::{create_combatant, draw_team_ids, generate_opponent_team},
    scoring::{battle_summary, calculate_score, BattleSummary},
    state::{
        create_battle_state, BattleResult, BattleState, Combatant, Outcome, Phase, PhaseKind, Side,
        MAX_ROSTER_SIZE,
    },
    utils::{available_combatants, has_usable_combatant},
};
pub use data::{
    catalog::{CatalogDatabase, CatalogEntry},
    type_chart::{effectiveness, TypeChart},
};
pub use error::{Error, Result};

#[cfg(target_arch = "wasm32")]
pub mod wasm;
