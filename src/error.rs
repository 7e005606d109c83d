use thiserror::Error;

/// Failures of the collaborators around the engine. The engine itself never
/// fails; invalid transitions are no-ops.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Catalog has no entry with id {0}")]
    EntryNotFound(u32),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Roster is full ({0} combatants)")]
    RosterFull(usize),

    #[error("Id {0} is already in the roster")]
    DuplicateRosterEntry(u32),

    #[error("Id {0} is not in the roster")]
    NotInRoster(u32),

    #[error("Roster is empty")]
    EmptyRoster,
}

pub type Result<T> = std::result::Result<T, Error>;
