use crate::{Catalog, PlayerProfile, RngState};
use serde::{Deserialize, Serialize};

pub const XP_PER_LEVEL: i64 = 100;

const VICTORY_XP: i64 = 100;
const VICTORY_COINS: i64 = 50;
const DEFEAT_XP: i64 = 20;
const DEFEAT_COINS: i64 = 10;
const DRAW_XP: i64 = 50;
const DRAW_COINS: i64 = 25;
const XP_PER_ROUND: i64 = 5;
const CARD_DROP_CHANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuelOutcome {
    Victory,
    Defeat,
    Draw,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DuelStats {
    pub rounds: u32,
    pub damage_dealt: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rewards {
    pub xp: i64,
    pub coins: i64,
    pub new_card_ids: Vec<String>,
}

/// Rewards for a finished duel: base values by outcome, bonuses for rounds
/// survived and damage dealt, and on victory a chance at a random card drop.
pub fn calculate_rewards(
    outcome: DuelOutcome,
    stats: DuelStats,
    catalog: &Catalog,
    rng: &mut RngState,
) -> Rewards {
    let mut rewards = Rewards::default();
    match outcome {
        DuelOutcome::Victory => {
            rewards.xp = VICTORY_XP;
            rewards.coins = VICTORY_COINS;
            if rng.chance(CARD_DROP_CHANCE) {
                if let Some(idx) = rng.pick_index(catalog.len()) {
                    rewards.new_card_ids.push(catalog.cards()[idx].id.clone());
                }
            }
        }
        DuelOutcome::Defeat => {
            rewards.xp = DEFEAT_XP;
            rewards.coins = DEFEAT_COINS;
        }
        DuelOutcome::Draw => {
            rewards.xp = DRAW_XP;
            rewards.coins = DRAW_COINS;
        }
    }
    rewards.xp += i64::from(stats.rounds) * XP_PER_ROUND;
    rewards.xp += stats.damage_dealt / 10;
    rewards
}

/// Applies rewards to the profile. Level is recomputed from total xp and
/// never decreases.
pub fn apply_rewards(profile: &mut PlayerProfile, rewards: &Rewards) {
    profile.xp += rewards.xp;
    profile.coins += rewards.coins;
    let new_level = level_from_xp(profile.xp);
    if new_level > profile.level {
        profile.level = new_level;
    }
}

pub fn level_from_xp(xp: i64) -> u32 {
    (xp / XP_PER_LEVEL + 1).max(1) as u32
}

pub fn xp_for_next_level(xp: i64) -> i64 {
    i64::from(level_from_xp(xp)) * XP_PER_LEVEL - xp
}
