use crate::core::state::MAX_ROSTER_SIZE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterInfo {
    pub ids: Vec<u32>,
    pub size: usize,
    pub is_full: bool,
    pub empty_slots: usize,
}

/// Ordered list of owned catalog ids, saved as a JSON array after every edit.
#[derive(Clone, Debug)]
pub struct RosterStore {
    path: PathBuf,
    ids: Vec<u32>,
}

impl RosterStore {
    /// Loads the roster at `path`; a missing file is an empty roster.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let ids = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };
        Ok(Self { path, ids })
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_ROSTER_SIZE
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn add(&mut self, id: u32) -> Result<()> {
        if self.is_full() {
            tracing::warn!(id, "roster is full");
            return Err(Error::RosterFull(MAX_ROSTER_SIZE));
        }
        if self.contains(id) {
            tracing::warn!(id, "id already in roster");
            return Err(Error::DuplicateRosterEntry(id));
        }
        self.ids.push(id);
        self.save()?;
        tracing::info!(id, size = self.ids.len(), "added to roster");
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<()> {
        if !self.contains(id) {
            tracing::warn!(id, "id not in roster");
            return Err(Error::NotInRoster(id));
        }
        self.ids.retain(|&existing| existing != id);
        self.save()?;
        tracing::info!(id, size = self.ids.len(), "removed from roster");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.ids.clear();
        self.save()?;
        tracing::info!("roster cleared");
        Ok(())
    }

    pub fn info(&self) -> RosterInfo {
        RosterInfo {
            ids: self.ids.clone(),
            size: self.ids.len(),
            is_full: self.is_full(),
            empty_slots: MAX_ROSTER_SIZE.saturating_sub(self.ids.len()),
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string(&self.ids)?)?;
        Ok(())
    }
}
