pub mod simple;

pub use simple::{choose_best_move_type, choose_opponent_combatant, choose_opponent_move, run_auto_battle};
