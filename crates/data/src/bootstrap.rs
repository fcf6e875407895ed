use crate::{Store, COLLECTION_KEY, DECK_KEY};
use elemduel_core::{
    migrate_cards, migrate_profile, BalanceStrategy, CardFactory, CardInstance, Catalog, Deck,
    EnemyCard, PlayerProfile, PowerModel, RawCardRecord, RngState, DECK_SIZE,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// In-memory application state after a load cycle. Passed explicitly to
/// callers; the core keeps no hidden globals.
#[derive(Debug, Clone)]
pub struct AppState {
    pub profile: PlayerProfile,
    pub collection: Vec<CardInstance>,
    pub deck: Deck,
}

/// Result of a load cycle. Corrupt or legacy-shaped records degrade to
/// defaults and surface here as warnings, never as errors.
#[derive(Debug)]
pub struct LoadReport {
    pub state: AppState,
    pub warnings: Vec<String>,
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

fn read_or_warn<T: serde::de::DeserializeOwned>(
    store: &Store,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    match store.read(key) {
        Ok(value) => value,
        Err(err) => {
            warnings.push(format!("unreadable {key} record, using defaults: {err:#}"));
            None
        }
    }
}

/// Startup load cycle: first-run initialization when no profile exists,
/// then migration of every container to the uid-instance model, writing the
/// conformant records back. Runs once per load; linear in container sizes.
pub fn load(
    store: &Store,
    catalog: &Catalog,
    model: &dyn PowerModel,
    rng: &mut RngState,
) -> anyhow::Result<LoadReport> {
    let mut warnings = Vec::new();

    let mut profile: PlayerProfile =
        read_or_warn(store, crate::PROFILE_KEY, &mut warnings).unwrap_or_default();
    if !profile.is_initialized() {
        profile = PlayerProfile::new("Player", now_millis());
        store.save_profile(&profile)?;
        let starter_ids = catalog.random_starter_ids(DECK_SIZE, rng);
        store.save_card_ids(COLLECTION_KEY, &starter_ids)?;
        store.save_card_ids(DECK_KEY, &starter_ids)?;
    }

    let factory = CardFactory::new(catalog, model);

    let reassigned_inline = migrate_profile(&mut profile, &factory);
    if reassigned_inline > 0 {
        warnings.push(format!(
            "reassigned {reassigned_inline} duplicate or missing uids in profile containers"
        ));
    }
    store.save_profile(&profile)?;

    let deck_raw: Vec<RawCardRecord> =
        read_or_warn(store, DECK_KEY, &mut warnings).unwrap_or_default();
    let collection_raw: Vec<RawCardRecord> =
        read_or_warn(store, COLLECTION_KEY, &mut warnings).unwrap_or_default();
    let migrated = migrate_cards(&deck_raw, &collection_raw, &factory);
    if migrated.reassigned_uids > 0 {
        warnings.push(format!(
            "reassigned {} duplicate or missing uids",
            migrated.reassigned_uids
        ));
    }
    store.save_deck(&migrated.deck)?;
    store.save_collection(&migrated.collection)?;

    Ok(LoadReport {
        state: AppState {
            profile,
            collection: migrated.collection,
            deck: Deck::new(migrated.deck),
        },
        warnings,
    })
}

/// Finalizes the player deck, generates the opponent, and persists both the
/// deck and the opponent id cache. Synchronous; any pre-combat delay is the
/// caller's concern and should be cancellable with its screen.
pub fn prepare_duel(
    store: &Store,
    deck: &Deck,
    strategy: BalanceStrategy,
    catalog: &Catalog,
    model: &dyn PowerModel,
    rng: &mut RngState,
) -> anyhow::Result<Vec<EnemyCard>> {
    let cards = deck.finalize()?;
    let enemy = strategy.generate(cards, catalog, model, rng);
    store.save_deck(cards)?;
    store.save_last_enemy_deck(&enemy)?;
    Ok(enemy)
}
