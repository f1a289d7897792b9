use crate::rng::RandomSource;
use crate::types::ElementType;
use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json(EMBEDDED_CATALOG).expect("embedded catalog.json must be valid")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: ElementType,
    #[serde(default)]
    pub power: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
}

fn default_accuracy() -> u8 {
    100
}

impl Move {
    pub fn is_damaging(&self) -> bool {
        self.power > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(rename = "hp")]
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn total(&self) -> u32 {
        self.health + self.attack + self.defense + self.speed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub types: Vec<ElementType>,
    pub base_stats: BaseStats,
    pub moves: Vec<Move>,
    #[serde(default)]
    pub sprite: String,
    /// Only obtainable as a tournament reward, never minted directly.
    #[serde(default)]
    pub reward_only: bool,
}

/// Read-only creature table keyed by catalog id.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    /// The table shipped with the crate, parsed on first use.
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> anyhow::Result<Self> {
        if entries.is_empty() {
            anyhow::bail!("Catalog must contain at least one entry");
        }
        let mut by_id = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            validate_entry(entry)?;
            if by_id.insert(entry.id, idx).is_some() {
                anyhow::bail!("Duplicate catalog id {}", entry.id);
            }
        }
        Ok(Self { entries, by_id })
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(raw).context("Failed to parse catalog JSON")?;
        Self::from_entries(entries)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid catalog in {}", path.display()))
    }

    pub fn get(&self, id: u32) -> Option<&CatalogEntry> {
        self.by_id.get(&id).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reward_pool(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| e.reward_only)
    }

    pub fn starter_pool(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| !e.reward_only)
    }

    /// Uniform pick over the whole table, reward-only entries included.
    pub fn random_entry(&self, rng: &mut impl RandomSource) -> &CatalogEntry {
        &self.entries[rng.index(self.entries.len())]
    }
}

fn validate_entry(entry: &CatalogEntry) -> anyhow::Result<()> {
    if entry.types.is_empty() || entry.types.len() > 2 {
        anyhow::bail!(
            "{} (#{}) must have one or two types, found {}",
            entry.name,
            entry.id,
            entry.types.len()
        );
    }
    if entry.moves.is_empty() {
        anyhow::bail!("{} (#{}) has no moves", entry.name, entry.id);
    }
    if let Some(mv) = entry.moves.iter().find(|m| m.accuracy > 100) {
        anyhow::bail!(
            "{} (#{}) move {} has accuracy {} > 100",
            entry.name,
            entry.id,
            mv.name,
            mv.accuracy
        );
    }
    Ok(())
}
