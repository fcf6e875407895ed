use super::EnemyCard;
use crate::{
    CardDefinition, CardInstance, CardType, Catalog, Element, PowerModel, Rarity, RngState,
    DECK_SIZE,
};

const COUNTER_ELEMENT_SLOTS: usize = 3;
const COUNTER_TYPE_SLOTS: usize = 2;
const HIGHER_RARITY_SLOTS: usize = 2;

fn counter_element(element: Element) -> Element {
    match element {
        Element::Fire => Element::Water,
        Element::Water => Element::Earth,
        Element::Earth => Element::Air,
        Element::Air => Element::Fire,
    }
}

fn counter_type(card_type: CardType) -> CardType {
    match card_type {
        CardType::Attack => CardType::Defense,
        CardType::Defense => CardType::Special,
        CardType::Special => CardType::Attack,
    }
}

/// Most frequent value, ties broken by enumeration order (first wins).
fn dominant<T: Copy + PartialEq>(values: &[T], counts: impl Fn(T) -> usize) -> T {
    let mut best = values[0];
    let mut best_count = counts(best);
    for &value in &values[1..] {
        let count = counts(value);
        if count > best_count {
            best = value;
            best_count = count;
        }
    }
    best
}

fn take_matching<'a>(
    catalog: &'a Catalog,
    chosen: &mut Vec<&'a CardDefinition>,
    count: usize,
    rng: &mut RngState,
    matches: impl Fn(&CardDefinition) -> bool,
) {
    let mut pool: Vec<&CardDefinition> = catalog
        .cards()
        .iter()
        .filter(|card| matches(card) && !chosen.iter().any(|c| c.id == card.id))
        .collect();
    rng.shuffle(&mut pool);
    chosen.extend(pool.into_iter().take(count));
}

/// Counter-archetype strategy: read the player deck's dominant element,
/// type and rarity, then stack the opponent with their counters — 3 cards
/// of the counter element, 2 of the counter type, 2 one rarity tier up,
/// and random fill to 9. No leveling; everything emits at level 1.
pub(super) fn generate(
    player_deck: &[CardInstance],
    catalog: &Catalog,
    model: &dyn PowerModel,
    rng: &mut RngState,
) -> Vec<EnemyCard> {
    if catalog.is_empty() {
        return Vec::new();
    }

    let defs: Vec<&CardDefinition> = player_deck
        .iter()
        .filter_map(|card| catalog.get(&card.card_id))
        .collect();

    let dominant_element = dominant(&Element::ALL, |element| {
        defs.iter().filter(|def| def.element == element).count()
    });
    let dominant_rarity = dominant(&Rarity::ALL, |rarity| {
        defs.iter().filter(|def| def.rarity == rarity).count()
    });
    let dominant_type = dominant(&CardType::ALL, |card_type| {
        defs.iter().filter(|def| def.card_type == card_type).count()
    });

    let wanted_element = counter_element(dominant_element);
    let wanted_type = counter_type(dominant_type);
    let wanted_rarity = dominant_rarity.next_tier();

    let mut chosen: Vec<&CardDefinition> = Vec::with_capacity(DECK_SIZE);
    take_matching(catalog, &mut chosen, COUNTER_ELEMENT_SLOTS, rng, |card| {
        card.element == wanted_element
    });
    take_matching(catalog, &mut chosen, COUNTER_TYPE_SLOTS, rng, |card| {
        card.card_type == wanted_type
    });
    take_matching(catalog, &mut chosen, HIGHER_RARITY_SLOTS, rng, |card| {
        card.rarity == wanted_rarity
    });
    let remaining = DECK_SIZE.saturating_sub(chosen.len());
    take_matching(catalog, &mut chosen, remaining, rng, |_| true);

    // Small catalogs can leave the deck short even after random fill; as a
    // last resort, re-draw from the cards already selected.
    while chosen.len() < DECK_SIZE {
        let idx = match rng.pick_index(chosen.len()) {
            Some(idx) => idx,
            None => break,
        };
        chosen.push(chosen[idx]);
    }

    chosen
        .into_iter()
        .take(DECK_SIZE)
        .map(|def| EnemyCard {
            card_id: def.id.clone(),
            level: 1,
            power: model.power(def, 1),
        })
        .collect()
}
