use elemduel_core::{
    BalanceStrategy, BasePower, CardDefinition, CardFactory, CardInstance, CardType, Catalog,
    Element, InstanceOverrides, PowerModel, Rarity, RarityScaled, RngState, BALANCE_TOLERANCE,
    DECK_SIZE, MAX_LEVEL, TARGET_FLOOR,
};
use std::collections::HashSet;

fn def(
    id: &str,
    element: Element,
    rarity: Rarity,
    card_type: CardType,
    base_power: i64,
) -> CardDefinition {
    CardDefinition {
        id: id.to_string(),
        name: format!("Card {id}"),
        element,
        rarity,
        card_type,
        base_power,
    }
}

fn fire_common(id: &str, base_power: i64) -> CardDefinition {
    def(id, Element::Fire, Rarity::Common, CardType::Attack, base_power)
}

/// Catalog with a starter band, plenty of non-starter candidates, and the
/// counter sets the archetype scenario needs.
fn catalog() -> Catalog {
    let mut cards = vec![
        fire_common("F001", 20),
        fire_common("F002", 20),
        fire_common("F003", 20),
        fire_common("F004", 20),
        fire_common("F005", 10),
        fire_common("F006", 15),
        fire_common("F007", 15),
        fire_common("F008", 15),
        fire_common("F009", 15),
        // Exactly three water cards for the counter-element step.
        def("W001", Element::Water, Rarity::Rare, CardType::Special, 25),
        def("W002", Element::Water, Rarity::Rare, CardType::Special, 18),
        def("W003", Element::Water, Rarity::Rare, CardType::Special, 12),
        // Exactly two non-water defense cards for the counter-type step.
        def("D001", Element::Earth, Rarity::Rare, CardType::Defense, 22),
        def("D002", Element::Earth, Rarity::Rare, CardType::Defense, 16),
        // Exactly two uncommon cards for the higher-rarity step.
        def("U001", Element::Air, Rarity::Uncommon, CardType::Attack, 14),
        def("U002", Element::Air, Rarity::Uncommon, CardType::Attack, 19),
    ];
    // Starter band, reserved for new accounts.
    cards.push(def(
        "S001",
        Element::Earth,
        Rarity::Common,
        CardType::Attack,
        50,
    ));
    cards.push(def(
        "S002",
        Element::Air,
        Rarity::Common,
        CardType::Attack,
        50,
    ));
    Catalog::new(cards)
}

/// Nine fire/common/attack cards whose base powers sum to 150.
fn player_deck(catalog: &Catalog) -> Vec<CardInstance> {
    let factory = CardFactory::new(catalog, &BasePower);
    (1..=DECK_SIZE)
        .map(|n| factory.create(&format!("F{n:03}"), InstanceOverrides::default()))
        .collect()
}

#[test]
fn both_strategies_return_exactly_nine() {
    let catalog = catalog();
    let deck = player_deck(&catalog);
    for strategy in [BalanceStrategy::PowerBudget, BalanceStrategy::CounterArchetype] {
        let mut rng = RngState::from_seed(11);
        let enemy = strategy.generate(&deck, &catalog, &RarityScaled, &mut rng);
        assert_eq!(enemy.len(), DECK_SIZE, "{strategy:?}");
        for card in &enemy {
            assert!(catalog.get(&card.card_id).is_some(), "{strategy:?}");
        }
    }
}

#[test]
fn partially_invalid_player_deck_still_yields_nine() {
    let catalog = catalog();
    let mut deck = player_deck(&catalog);
    deck[0].card_id = "GONE_1".to_string();
    deck[4].card_id = "GONE_2".to_string();
    for strategy in [BalanceStrategy::PowerBudget, BalanceStrategy::CounterArchetype] {
        let mut rng = RngState::from_seed(23);
        let enemy = strategy.generate(&deck, &catalog, &RarityScaled, &mut rng);
        assert_eq!(enemy.len(), DECK_SIZE, "{strategy:?}");
    }
}

#[test]
fn generation_is_deterministic_for_a_seed() {
    let catalog = catalog();
    let deck = player_deck(&catalog);
    for strategy in [BalanceStrategy::PowerBudget, BalanceStrategy::CounterArchetype] {
        let first = strategy.generate(
            &deck,
            &catalog,
            &RarityScaled,
            &mut RngState::from_seed(99),
        );
        let second = strategy.generate(
            &deck,
            &catalog,
            &RarityScaled,
            &mut RngState::from_seed(99),
        );
        assert_eq!(first, second, "{strategy:?}");
    }
}

#[test]
fn budget_target_drawn_within_tolerance_band() {
    let catalog = catalog();
    let deck = player_deck(&catalog);
    let player_total = elemduel_core::player_power_total(&deck, &catalog, &BasePower);
    assert_eq!(player_total, 150);

    for seed in 0..50 {
        // The target draw is the strategy's first use of the rng, so a
        // fresh rng with the same seed reproduces it.
        let mut probe = RngState::from_seed(seed);
        let min_target = (player_total - BALANCE_TOLERANCE).max(TARGET_FLOOR);
        let max_target = min_target.max(player_total + BALANCE_TOLERANCE);
        let target = probe.range_inclusive(min_target, max_target);
        assert!((130..=170).contains(&target));

        let mut rng = RngState::from_seed(seed);
        let enemy = BalanceStrategy::PowerBudget.generate(&deck, &catalog, &RarityScaled, &mut rng);
        assert_eq!(enemy.len(), DECK_SIZE);

        // Refinement only ever raises power: every slot sits at or above
        // its level-1 power, and the sum stops short of the target only
        // when every slot is saturated.
        let mut level1_total = 0;
        let mut total = 0;
        for card in &enemy {
            let card_def = catalog.get(&card.card_id).expect("resolvable");
            assert!((1..=MAX_LEVEL).contains(&card.level));
            assert_eq!(card.power, RarityScaled.power(card_def, card.level));
            level1_total += RarityScaled.power(card_def, 1);
            total += card.power;
        }
        assert!(total >= level1_total);
        if total < target {
            assert!(enemy.iter().all(|card| card.level == MAX_LEVEL));
        }
    }
}

#[test]
fn budget_excludes_starter_band_when_pool_is_large_enough() {
    let catalog = catalog();
    let deck = player_deck(&catalog);
    let mut rng = RngState::from_seed(5);
    let enemy = BalanceStrategy::PowerBudget.generate(&deck, &catalog, &RarityScaled, &mut rng);
    assert!(enemy
        .iter()
        .all(|card| !Catalog::is_starter_id(&card.card_id)));
}

#[test]
fn budget_applies_target_floor_for_powerless_decks() {
    let catalog = catalog();
    let mut deck = player_deck(&catalog);
    for card in &mut deck {
        card.card_id = "UNKNOWN".to_string();
    }
    // Player total is 0, so the band collapses onto the floor.
    let mut probe = RngState::from_seed(3);
    assert_eq!(probe.range_inclusive(TARGET_FLOOR, TARGET_FLOOR), 20);

    let mut rng = RngState::from_seed(3);
    let enemy = BalanceStrategy::PowerBudget.generate(&deck, &catalog, &RarityScaled, &mut rng);
    assert_eq!(enemy.len(), DECK_SIZE);
}

#[test]
fn budget_refinement_terminates_on_flat_power_curves() {
    let catalog = catalog();
    let deck = player_deck(&catalog);
    // BasePower never gains from a level-up, so refinement must bail out
    // immediately instead of spinning toward an unreachable target.
    let mut rng = RngState::from_seed(41);
    let enemy = BalanceStrategy::PowerBudget.generate(&deck, &catalog, &BasePower, &mut rng);
    assert_eq!(enemy.len(), DECK_SIZE);
    for card in &enemy {
        assert_eq!(card.level, 1);
        let card_def = catalog.get(&card.card_id).unwrap();
        assert_eq!(card.power, card_def.base_power);
    }
}

#[test]
fn budget_refinement_terminates_against_a_saturated_deck() {
    let catalog = catalog();
    let factory = CardFactory::new(&catalog, &RarityScaled);
    // All player cards maxed: the target far exceeds what nine level-1
    // picks provide, driving refinement into its caps.
    let deck: Vec<CardInstance> = (1..=DECK_SIZE)
        .map(|n| {
            factory.create(
                &format!("F{n:03}"),
                InstanceOverrides {
                    level: Some(MAX_LEVEL),
                    ..InstanceOverrides::default()
                },
            )
        })
        .collect();
    let mut rng = RngState::from_seed(17);
    let enemy = BalanceStrategy::PowerBudget.generate(&deck, &catalog, &RarityScaled, &mut rng);
    assert_eq!(enemy.len(), DECK_SIZE);
    assert!(enemy.iter().all(|card| card.level <= MAX_LEVEL));
}

#[test]
fn counter_archetype_stacks_the_expected_counters() {
    let catalog = catalog();
    // Dominated by fire/common/attack: counters are water, defense, and
    // uncommon (one tier above common).
    let deck = player_deck(&catalog);
    for seed in 0..20 {
        let mut rng = RngState::from_seed(seed);
        let enemy =
            BalanceStrategy::CounterArchetype.generate(&deck, &catalog, &RarityScaled, &mut rng);
        assert_eq!(enemy.len(), DECK_SIZE);

        let water: HashSet<&str> = ["W001", "W002", "W003"].into_iter().collect();
        let defense: HashSet<&str> = ["D001", "D002"].into_iter().collect();
        let uncommon: HashSet<&str> = ["U001", "U002"].into_iter().collect();
        for card in &enemy[0..3] {
            assert!(water.contains(card.card_id.as_str()));
        }
        for card in &enemy[3..5] {
            assert!(defense.contains(card.card_id.as_str()));
        }
        for card in &enemy[5..7] {
            assert!(uncommon.contains(card.card_id.as_str()));
        }

        // No duplicates: the catalog is large enough that the last-resort
        // refill never triggers here.
        let ids: HashSet<&str> = enemy.iter().map(|card| card.card_id.as_str()).collect();
        assert_eq!(ids.len(), DECK_SIZE);

        // This strategy never levels its picks.
        for card in &enemy {
            assert_eq!(card.level, 1);
            let card_def = catalog.get(&card.card_id).unwrap();
            assert_eq!(card.power, RarityScaled.power(card_def, 1));
        }
    }
}

#[test]
fn tiny_catalog_still_fills_nine_slots() {
    let catalog = Catalog::new(vec![
        fire_common("F001", 10),
        def("W001", Element::Water, Rarity::Rare, CardType::Special, 25),
        def("D001", Element::Earth, Rarity::Rare, CardType::Defense, 22),
    ]);
    let factory = CardFactory::new(&catalog, &RarityScaled);
    let deck: Vec<CardInstance> = (0..DECK_SIZE)
        .map(|_| factory.create("F001", InstanceOverrides::default()))
        .collect();
    for strategy in [BalanceStrategy::PowerBudget, BalanceStrategy::CounterArchetype] {
        let mut rng = RngState::from_seed(8);
        let enemy = strategy.generate(&deck, &catalog, &RarityScaled, &mut rng);
        assert_eq!(enemy.len(), DECK_SIZE, "{strategy:?}");
    }
}

#[test]
fn empty_catalog_degrades_to_an_empty_deck() {
    let catalog = Catalog::default();
    let deck: Vec<CardInstance> = Vec::new();
    for strategy in [BalanceStrategy::PowerBudget, BalanceStrategy::CounterArchetype] {
        let mut rng = RngState::from_seed(1);
        let enemy = strategy.generate(&deck, &catalog, &RarityScaled, &mut rng);
        assert!(enemy.is_empty(), "{strategy:?}");
    }
}
