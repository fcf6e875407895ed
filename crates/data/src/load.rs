use anyhow::{bail, Context};
use elemduel_core::{CardDefinition, Catalog};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Loads the card catalog from a JSON array of definitions. Duplicate ids
/// are a content error, not something to repair at runtime.
pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cards: Vec<CardDefinition> =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    let mut seen: HashSet<&str> = HashSet::new();
    for card in &cards {
        if !seen.insert(&card.id) {
            bail!("duplicate card id {} in {}", card.id, path.display());
        }
    }
    Ok(Catalog::new(cards))
}
