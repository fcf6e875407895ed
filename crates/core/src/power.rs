use crate::{CardDefinition, Rarity};

/// Resolves a card's combat power at a given level.
///
/// Power must be monotonically non-decreasing in level for a fixed
/// definition; both implementations below satisfy that.
pub trait PowerModel {
    fn power(&self, def: &CardDefinition, level: u32) -> i64;
}

/// Fallback model: ignores level and returns the definition's base power.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasePower;

impl PowerModel for BasePower {
    fn power(&self, def: &CardDefinition, _level: u32) -> i64 {
        def.base_power
    }
}

/// Default model: linear growth per level, steeper for higher rarities.
#[derive(Debug, Clone, Copy, Default)]
pub struct RarityScaled;

impl RarityScaled {
    fn growth(rarity: Rarity) -> i64 {
        match rarity {
            Rarity::Common => 2,
            Rarity::Uncommon => 3,
            Rarity::Rare => 4,
            Rarity::Epic => 6,
            Rarity::Legendary => 8,
            Rarity::Mythic => 10,
        }
    }
}

impl PowerModel for RarityScaled {
    fn power(&self, def: &CardDefinition, level: u32) -> i64 {
        let steps = i64::from(level.saturating_sub(1));
        def.base_power + steps * Self::growth(def.rarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardType, Element};

    fn def(rarity: Rarity, base_power: i64) -> CardDefinition {
        CardDefinition {
            id: "C001".to_string(),
            name: "Test".to_string(),
            element: Element::Fire,
            rarity,
            card_type: CardType::Attack,
            base_power,
        }
    }

    #[test]
    fn base_power_ignores_level() {
        let card = def(Rarity::Rare, 30);
        assert_eq!(BasePower.power(&card, 1), 30);
        assert_eq!(BasePower.power(&card, 20), 30);
    }

    #[test]
    fn rarity_scaled_is_monotone_in_level() {
        let card = def(Rarity::Epic, 25);
        let mut last = 0;
        for level in 1..=20 {
            let power = RarityScaled.power(&card, level);
            assert!(power >= last);
            last = power;
        }
    }

    #[test]
    fn higher_rarity_grows_faster() {
        let common = def(Rarity::Common, 10);
        let mythic = def(Rarity::Mythic, 10);
        assert!(RarityScaled.power(&mythic, 10) > RarityScaled.power(&common, 10));
    }
}
