use crate::{CardInstance, Catalog, PowerModel, RngState};
use serde::{Deserialize, Serialize};

mod budget;
mod counter;

pub use budget::{BALANCE_TOLERANCE, TARGET_FLOOR};

/// One opponent slot. Ephemeral: generated fresh per duel and never owned by
/// a collection or player deck, so it carries no uid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnemyCard {
    #[serde(rename = "cardId")]
    pub card_id: String,
    pub level: u32,
    pub power: i64,
}

/// Opponent-deck generation policy. Both policies satisfy the same
/// contract: exactly [`crate::DECK_SIZE`] records for any 9-card player
/// deck, in bounded time, degrading to fillers when the catalog runs short.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStrategy {
    /// Match the player's total power within a random tolerance band, then
    /// level the picks toward the target.
    PowerBudget,
    /// Counter the player's dominant element, type and rarity.
    CounterArchetype,
}

impl BalanceStrategy {
    pub fn generate(
        self,
        player_deck: &[CardInstance],
        catalog: &Catalog,
        model: &dyn PowerModel,
        rng: &mut RngState,
    ) -> Vec<EnemyCard> {
        match self {
            BalanceStrategy::PowerBudget => budget::generate(player_deck, catalog, model, rng),
            BalanceStrategy::CounterArchetype => {
                counter::generate(player_deck, catalog, model, rng)
            }
        }
    }
}

/// Sum of the player's card powers at their current levels. Unresolvable
/// card ids count as zero rather than failing generation.
pub fn player_power_total(
    player_deck: &[CardInstance],
    catalog: &Catalog,
    model: &dyn PowerModel,
) -> i64 {
    player_deck
        .iter()
        .map(|card| {
            catalog
                .get(&card.card_id)
                .map(|def| model.power(def, card.level))
                .unwrap_or(0)
        })
        .sum()
}
