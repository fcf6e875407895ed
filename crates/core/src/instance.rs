use crate::{Catalog, PowerModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain-observed level bounds for card instances.
pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 20;

fn default_level() -> u32 {
    MIN_LEVEL
}

/// A uniquely identified, levelable occurrence of a catalog card.
///
/// `power` is derived from the definition and `level`; it is cached here so
/// persisted records stay self-describing, and recomputed whenever the level
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardInstance {
    pub uid: String,
    #[serde(rename = "cardId")]
    pub card_id: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub xp: i64,
    #[serde(default)]
    pub power: i64,
}

/// Fresh globally-unique instance identifier.
pub fn new_uid() -> String {
    format!("card_{}", Uuid::new_v4())
}

/// Optional field overrides applied on top of factory defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceOverrides {
    pub level: Option<u32>,
    pub xp: Option<i64>,
    pub power: Option<i64>,
}

/// Creates identity-bearing card instances from catalog ids.
pub struct CardFactory<'a> {
    catalog: &'a Catalog,
    model: &'a dyn PowerModel,
}

impl<'a> CardFactory<'a> {
    pub fn new(catalog: &'a Catalog, model: &'a dyn PowerModel) -> Self {
        Self { catalog, model }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Materializes `card_id` with defaults `{level: 1, xp: 0, power:
    /// power(def, level)}`. An unresolvable id yields a zero-power instance
    /// rather than an error; an explicit `power` override wins over the
    /// computed value.
    pub fn create(&self, card_id: &str, overrides: InstanceOverrides) -> CardInstance {
        let level = overrides.level.unwrap_or(MIN_LEVEL).clamp(MIN_LEVEL, MAX_LEVEL);
        let computed = self
            .catalog
            .get(card_id)
            .map(|def| self.model.power(def, level))
            .unwrap_or(0);
        CardInstance {
            uid: new_uid(),
            card_id: card_id.to_string(),
            level,
            xp: overrides.xp.unwrap_or(0),
            power: overrides.power.unwrap_or(computed),
        }
    }

    /// Raises the instance one level (capped) and refreshes the cached power.
    /// Levels never decrease.
    pub fn level_up(&self, instance: &mut CardInstance) {
        if instance.level >= MAX_LEVEL {
            return;
        }
        instance.level += 1;
        if let Some(def) = self.catalog.get(&instance.card_id) {
            instance.power = self.model.power(def, instance.level);
        }
    }
}
