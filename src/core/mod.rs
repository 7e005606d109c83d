pub mod battle;
pub mod effects;
pub mod factory;
pub mod scoring;
pub mod state;
pub mod utils;
