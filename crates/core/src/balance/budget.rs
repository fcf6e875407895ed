use super::{player_power_total, EnemyCard};
use crate::{CardDefinition, CardInstance, Catalog, PowerModel, RngState, DECK_SIZE, MAX_LEVEL};

/// How far (in power units) the opponent's target may stray from the
/// player's total.
pub const BALANCE_TOLERANCE: i64 = 20;

/// Lower bound on the target, preventing degenerate near-zero opponents.
pub const TARGET_FLOOR: i64 = 20;

/// Hard cap on level-up refinement steps; guarantees termination whatever
/// the catalog looks like.
const MAX_REFINE_STEPS: u32 = 500;

struct Slot<'a> {
    def: &'a CardDefinition,
    level: u32,
    power: i64,
}

/// Power-budget strategy: draw a target total within the tolerance band
/// around the player's power, greedily fill 9 slots from the non-starter
/// pool by closest running sum, then level the picks toward the target.
pub(super) fn generate(
    player_deck: &[CardInstance],
    catalog: &Catalog,
    model: &dyn PowerModel,
    rng: &mut RngState,
) -> Vec<EnemyCard> {
    if catalog.is_empty() {
        return Vec::new();
    }

    let player_total = player_power_total(player_deck, catalog, model);
    let min_target = (player_total - BALANCE_TOLERANCE).max(TARGET_FLOOR);
    let max_target = min_target.max(player_total + BALANCE_TOLERANCE);
    let target_total = rng.range_inclusive(min_target, max_target);

    // Candidate pool: starter cards are reserved for new accounts, unless
    // excluding them leaves too few candidates.
    let mut pool: Vec<&CardDefinition> = catalog
        .cards()
        .iter()
        .filter(|card| !Catalog::is_starter_id(&card.id))
        .collect();
    if pool.len() < DECK_SIZE {
        pool = catalog.cards().iter().collect();
    }

    // Greedy fill: each slot takes the candidate whose addition lands the
    // running sum closest to the target, without replacement.
    let mut selected: Vec<&CardDefinition> = Vec::with_capacity(DECK_SIZE);
    let mut running = 0i64;
    for _ in 0..DECK_SIZE {
        let mut best: Option<(usize, i64)> = None;
        for (idx, def) in pool.iter().enumerate() {
            let delta = (running + model.power(def, 1) - target_total).abs();
            if best.map_or(true, |(_, best_delta)| delta < best_delta) {
                best = Some((idx, delta));
            }
        }
        let Some((idx, _)) = best else { break };
        let pick = pool.remove(idx);
        running += model.power(pick, 1);
        selected.push(pick);
    }

    // Pad to a full deck, recycling already-chosen cards as a last resort.
    if selected.len() < DECK_SIZE {
        let missing = DECK_SIZE - selected.len();
        let mut fillers: Vec<&CardDefinition> = catalog
            .cards()
            .iter()
            .filter(|card| !selected.iter().any(|chosen| chosen.id == card.id))
            .collect();
        fillers.extend(selected.iter().copied());
        let extras: Vec<&CardDefinition> =
            fillers.iter().copied().cycle().take(missing).collect();
        selected.extend(extras);
    }

    // Refinement: repeatedly apply the single level-up with the largest
    // positive power gain until the sum reaches the target, no positive gain
    // remains, or the step ceiling is hit.
    let mut slots: Vec<Slot> = selected
        .into_iter()
        .map(|def| Slot {
            def,
            level: 1,
            power: model.power(def, 1),
        })
        .collect();
    let mut total: i64 = slots.iter().map(|slot| slot.power).sum();
    let mut steps = 0;
    while total < target_total && steps < MAX_REFINE_STEPS {
        let mut best: Option<(usize, i64)> = None;
        for (idx, slot) in slots.iter().enumerate() {
            if slot.level >= MAX_LEVEL {
                continue;
            }
            let gain = model.power(slot.def, slot.level + 1) - slot.power;
            if gain > 0 && best.map_or(true, |(_, best_gain)| gain > best_gain) {
                best = Some((idx, gain));
            }
        }
        let Some((idx, gain)) = best else { break };
        slots[idx].level += 1;
        slots[idx].power += gain;
        total += gain;
        steps += 1;
    }

    slots
        .into_iter()
        .map(|slot| EnemyCard {
            card_id: slot.def.id.clone(),
            level: slot.level,
            power: slot.power,
        })
        .collect()
}
