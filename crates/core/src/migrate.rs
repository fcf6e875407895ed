use crate::{new_uid, CardFactory, CardInstance, InstanceOverrides};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One persisted card entry, in any of the shapes saves have used over time:
/// a conformant instance, a bare catalog id, or a partial object carrying
/// some subset of the instance fields. The partial variant also absorbs
/// unrecognizable objects, so loading a container never fails on one bad
/// entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawCardRecord {
    Instance(CardInstance),
    BareId(String),
    Partial(PartialCard),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PartialCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, rename = "cardId", skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<i64>,
}

impl From<CardInstance> for RawCardRecord {
    fn from(instance: CardInstance) -> Self {
        RawCardRecord::Instance(instance)
    }
}

/// Maps every raw entry to a conformant instance. Entries already carrying
/// both a uid and a card id pass through unchanged; everything else goes
/// through the factory, inheriting whatever level/xp/power fields are
/// present. Never fails: an entry with no resolvable id becomes a zero-power
/// placeholder.
pub fn normalize(records: &[RawCardRecord], factory: &CardFactory) -> Vec<CardInstance> {
    records
        .iter()
        .map(|record| match record {
            RawCardRecord::Instance(instance)
                if !instance.uid.is_empty() && !instance.card_id.is_empty() =>
            {
                instance.clone()
            }
            RawCardRecord::Instance(instance) => factory.create(
                &instance.card_id,
                InstanceOverrides {
                    level: Some(instance.level),
                    xp: Some(instance.xp),
                    power: Some(instance.power),
                },
            ),
            RawCardRecord::BareId(id) => factory.create(id, InstanceOverrides::default()),
            RawCardRecord::Partial(partial) => {
                let card_id = partial
                    .card_id
                    .as_deref()
                    .or(partial.id.as_deref())
                    .unwrap_or("");
                factory.create(
                    card_id,
                    InstanceOverrides {
                        level: partial.level,
                        xp: partial.xp,
                        power: partial.power,
                    },
                )
            }
        })
        .collect()
}

/// Walks the containers in order and reassigns any empty or already-seen
/// uid. Idempotent: a second pass over its own output reassigns nothing.
/// Returns the number of uids reassigned.
pub fn enforce_unique_uids(containers: &mut [&mut Vec<CardInstance>]) -> usize {
    let mut seen: HashSet<String> = HashSet::new();
    let mut reassigned = 0;
    for container in containers.iter_mut() {
        for card in container.iter_mut() {
            if card.uid.is_empty() || seen.contains(&card.uid) {
                card.uid = new_uid();
                reassigned += 1;
            }
            seen.insert(card.uid.clone());
        }
    }
    reassigned
}

/// Uids appearing more than once across the given cards. Empty after a
/// migration pass; anything else is a logic bug.
pub fn duplicate_uids(cards: &[&CardInstance]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut dupes = Vec::new();
    for card in cards {
        if !card.uid.is_empty() && !seen.insert(&card.uid) {
            dupes.push(card.uid.clone());
        }
    }
    dupes
}

#[derive(Debug, Clone, Default)]
pub struct MigratedCards {
    pub deck: Vec<CardInstance>,
    pub collection: Vec<CardInstance>,
    pub reassigned_uids: usize,
}

/// Normalizes a deck and a collection together and enforces uid uniqueness
/// across both, deck first.
pub fn migrate_cards(
    deck: &[RawCardRecord],
    collection: &[RawCardRecord],
    factory: &CardFactory,
) -> MigratedCards {
    let mut deck = normalize(deck, factory);
    let mut collection = normalize(collection, factory);
    let reassigned = enforce_unique_uids(&mut [&mut deck, &mut collection]);
    MigratedCards {
        deck,
        collection,
        reassigned_uids: reassigned,
    }
}

/// Upgrades a profile's legacy inline containers to the instance model.
/// Returns the number of uids reassigned; zero on an already-conformant
/// profile.
pub fn migrate_profile(profile: &mut crate::PlayerProfile, factory: &CardFactory) -> usize {
    let deck_raw = profile.deck_cards.take().unwrap_or_default();
    let collection_raw = profile.collection_cards.take().unwrap_or_default();
    if deck_raw.is_empty() && collection_raw.is_empty() {
        return 0;
    }
    let migrated = migrate_cards(&deck_raw, &collection_raw, factory);
    if !migrated.deck.is_empty() {
        profile.deck_cards = Some(migrated.deck.into_iter().map(RawCardRecord::from).collect());
    }
    if !migrated.collection.is_empty() {
        profile.collection_cards = Some(
            migrated
                .collection
                .into_iter()
                .map(RawCardRecord::from)
                .collect(),
        );
    }
    migrated.reassigned_uids
}
