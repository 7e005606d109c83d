use crate::core::factory::{DEFAULT_MAX_CATALOG_ID, DEFAULT_TEAM_SIZE};
use crate::error::Result;
use crate::tools::pokeapi::DEFAULT_CATALOG_URL;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub catalog_url: String,
    pub max_catalog_id: u32,
    pub team_size: usize,
    pub roster_path: PathBuf,
    pub leaderboard_path: PathBuf,
    pub trainer_name: String,
    /// Delay between transitions in the CLI. Presentation only.
    pub pacing_ms: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            max_catalog_id: DEFAULT_MAX_CATALOG_ID,
            team_size: DEFAULT_TEAM_SIZE,
            roster_path: PathBuf::from("roster.json"),
            leaderboard_path: PathBuf::from("leaderboard.csv"),
            trainer_name: "Trainer".to_string(),
            pacing_ms: 0,
        }
    }
}

impl BattleConfig {
    /// YAML file (if present), then `.env`, then the process environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        dotenv::dotenv().ok();
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Unparsable numeric values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("BATTLE_CATALOG_URL") {
            self.catalog_url = url;
        }
        if let Some(max_id) = lookup("BATTLE_MAX_CATALOG_ID").and_then(|v| v.trim().parse().ok()) {
            self.max_catalog_id = max_id;
        }
        if let Some(path) = lookup("BATTLE_ROSTER_PATH") {
            self.roster_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("BATTLE_LEADERBOARD_PATH") {
            self.leaderboard_path = PathBuf::from(path);
        }
        if let Some(name) = lookup("BATTLE_TRAINER_NAME") {
            self.trainer_name = name;
        }
        if let Some(pacing) = lookup("BATTLE_PACING_MS").and_then(|v| v.trim().parse().ok()) {
            self.pacing_ms = pacing;
        }
    }
}
