use crate::Rarity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PackTier {
    Bronze,
    Silver,
    Gold,
}

impl PackTier {
    pub fn label(self) -> &'static str {
        match self {
            PackTier::Bronze => "bronze",
            PackTier::Silver => "silver",
            PackTier::Gold => "gold",
        }
    }
}

/// Per-tier draw percentages. Authored to sum to 100 but not required to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RarityOdds {
    pub common: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
}

impl RarityOdds {
    pub fn get(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }

    pub fn total(&self) -> f64 {
        self.common + self.rare + self.epic + self.legendary
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackDef {
    pub id: String,
    pub name: String,
    pub tier: PackTier,
    pub price: u64,
    pub card_count: u32,
    pub rarity_odds: RarityOdds,
}

/// Pacing of a pack opening, in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RevealTimings {
    pub shake_ms: u64,
    pub open_ms: u64,
    pub first_reveal_ms: u64,
    pub reveal_interval_ms: u64,
    pub rare_hold_ms: u64,
    pub common_hold_ms: u64,
}

impl RevealTimings {
    pub fn hold_for(&self, rarity: Rarity) -> u64 {
        if rarity.is_common() {
            self.common_hold_ms
        } else {
            self.rare_hold_ms
        }
    }

    /// Gap between revealing a card of `rarity` and revealing the next one.
    pub fn gap_after(&self, rarity: Rarity) -> u64 {
        self.reveal_interval_ms.max(self.hold_for(rarity))
    }

    /// No pacing at all; every phase is due immediately.
    pub fn instant() -> Self {
        Self {
            shake_ms: 0,
            open_ms: 0,
            first_reveal_ms: 0,
            reveal_interval_ms: 0,
            rare_hold_ms: 0,
            common_hold_ms: 0,
        }
    }
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            shake_ms: 2000,
            open_ms: 1000,
            first_reveal_ms: 500,
            reveal_interval_ms: 1200,
            rare_hold_ms: 1500,
            common_hold_ms: 800,
        }
    }
}

pub const DEFAULT_STARTING_COINS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameRules {
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u64,
    #[serde(default)]
    pub timings: RevealTimings,
}

fn default_starting_coins() -> u64 {
    DEFAULT_STARTING_COINS
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_coins: DEFAULT_STARTING_COINS,
            timings: RevealTimings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rare_pulls_hold_longer_than_commons() {
        let timings = RevealTimings::default();
        assert_eq!(timings.hold_for(Rarity::Common), 800);
        assert_eq!(timings.hold_for(Rarity::Rare), 1500);
        assert_eq!(timings.hold_for(Rarity::Legendary), 1500);
        assert_eq!(timings.gap_after(Rarity::Common), 1200);
        assert_eq!(timings.gap_after(Rarity::Epic), 1500);
        assert_ne!(timings.first_reveal_ms, timings.gap_after(Rarity::Common));
    }

    #[test]
    fn pack_json_uses_camel_case_keys() {
        let body = r#"{
            "id": "bronze",
            "name": "Bronze Pack",
            "tier": "bronze",
            "price": 1000,
            "cardCount": 5,
            "rarityOdds": {"common": 70, "rare": 25, "epic": 4.5, "legendary": 0.5}
        }"#;
        let pack: PackDef = serde_json::from_str(body).expect("parse pack");
        assert_eq!(pack.card_count, 5);
        assert_eq!(pack.tier, PackTier::Bronze);
        assert_eq!(pack.rarity_odds.get(Rarity::Epic), 4.5);
        assert_eq!(pack.rarity_odds.total(), 100.0);
    }

    #[test]
    fn rules_fill_missing_fields_with_defaults() {
        let rules: GameRules = serde_json::from_str(r#"{"startingCoins": 500}"#).expect("parse");
        assert_eq!(rules.starting_coins, 500);
        assert_eq!(rules.timings, RevealTimings::default());
        let rules: GameRules = serde_json::from_str("{}").expect("parse");
        assert_eq!(rules, GameRules::default());
    }
}
