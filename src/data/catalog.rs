use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: Option<u32>,
    #[serde(rename = "type")]
    pub type_info: NamedResource,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

/// One record as served by the creature catalog, keyed by numeric id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl CatalogEntry {
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.type_info.name.clone()).collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct CatalogDatabase {
    entries: HashMap<u32, CatalogEntry>,
}

impl CatalogDatabase {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.id, entry);
    }

    pub fn get(&self, id: u32) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Accepts either a JSON array of entries or an object keyed by id.
    pub fn load_from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let entries: Vec<CatalogEntry> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            let map: HashMap<String, CatalogEntry> = serde_json::from_value(value)?;
            map.into_values().collect()
        };
        let mut db = Self::new();
        for entry in entries {
            db.insert(entry);
        }
        Ok(db)
    }
}
