use crate::Player;
use serde::{Deserialize, Serialize};

/// Player-owned progress. All mutation goes through the named methods below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub coins: u64,
    #[serde(default)]
    pub collection: Vec<Player>,
    #[serde(default)]
    pub packs_opened: u64,
}

impl GameState {
    pub fn new(starting_coins: u64) -> Self {
        Self {
            coins: starting_coins,
            collection: Vec::new(),
            packs_opened: 0,
        }
    }

    pub fn can_afford(&self, price: u64) -> bool {
        self.coins >= price
    }

    /// Deduct `amount`, flooring the balance at zero.
    pub fn spend(&mut self, amount: u64) {
        self.coins = self.coins.saturating_sub(amount);
    }

    pub fn add_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub fn append_to_collection(&mut self, card: Player) {
        self.collection.push(card);
    }

    pub fn increment_packs_opened(&mut self) {
        self.packs_opened = self.packs_opened.saturating_add(1);
    }

    pub fn reset(&mut self, starting_coins: u64) {
        *self = Self::new(starting_coins);
    }
}
