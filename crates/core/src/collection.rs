use crate::{Player, Rarity, Role};
use std::collections::BTreeMap;

/// Search and filter over a collection. Empty query and `None` filters match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionFilter {
    pub query: String,
    pub rarity: Option<Rarity>,
    pub role: Option<Role>,
}

impl CollectionFilter {
    pub fn matches(&self, card: &Player) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_query = query.is_empty()
            || card.name.to_lowercase().contains(&query)
            || card.team.to_lowercase().contains(&query);
        let matches_rarity = self.rarity.map_or(true, |rarity| card.rarity == rarity);
        let matches_role = self.role.map_or(true, |role| card.role == role);
        matches_query && matches_rarity && matches_role
    }

    pub fn apply<'a>(&self, cards: &'a [Player]) -> Vec<&'a Player> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub total: usize,
    pub by_rarity: BTreeMap<Rarity, usize>,
    pub unique: usize,
}

impl CollectionStats {
    pub fn from_cards(cards: &[Player]) -> Self {
        let mut by_rarity = BTreeMap::new();
        let mut ids = std::collections::HashSet::new();
        for card in cards {
            *by_rarity.entry(card.rarity).or_insert(0) += 1;
            ids.insert(card.id.as_str());
        }
        Self {
            total: cards.len(),
            by_rarity,
            unique: ids.len(),
        }
    }

    pub fn count(&self, rarity: Rarity) -> usize {
        self.by_rarity.get(&rarity).copied().unwrap_or(0)
    }
}
