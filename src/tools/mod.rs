pub mod config;
pub mod leaderboard;
pub mod pokeapi;
pub mod roster_store;
