use crate::{Player, Rarity, RngState};
use std::collections::BTreeMap;

/// Static player catalog. Order is the authored catalog order.
#[derive(Debug, Clone, Default)]
pub struct CardPool {
    players: Vec<Player>,
}

impl CardPool {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player_by_id(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn players_by_rarity(&self, rarity: Rarity) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|player| player.rarity == rarity)
            .collect()
    }

    /// Uniform pick among players of `rarity`, or among the whole catalog
    /// when `rarity` is `None`.
    pub fn random_player<'a>(
        &'a self,
        rarity: Option<Rarity>,
        rng: &mut RngState,
    ) -> Option<&'a Player> {
        match rarity {
            Some(rarity) => {
                let candidates = self.players_by_rarity(rarity);
                rng.pick_index(candidates.len()).map(|idx| candidates[idx])
            }
            None => rng
                .pick_index(self.players.len())
                .and_then(|idx| self.players.get(idx)),
        }
    }

    pub fn rarity_counts(&self) -> BTreeMap<Rarity, usize> {
        let mut counts = BTreeMap::new();
        for player in &self.players {
            *counts.entry(player.rarity).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::{CardPool, PackDef, PackTier, Player, PlayerStats, Rarity, RarityOdds, Role};

    pub fn player(id: &str, rarity: Rarity) -> Player {
        Player {
            id: id.to_string(),
            name: format!("Player {id}"),
            role: Role::Batter,
            team: "XI".to_string(),
            rating: 80,
            rarity,
            stats: PlayerStats {
                batting: Some(80),
                bowling: None,
                fielding: Some(70),
            },
            image: String::new(),
        }
    }

    /// Two players per tier, catalog order common -> legendary.
    pub fn pool() -> CardPool {
        let mut players = Vec::new();
        for (idx, rarity) in Rarity::ALL.into_iter().enumerate() {
            players.push(player(&format!("{}a", idx), rarity));
            players.push(player(&format!("{}b", idx), rarity));
        }
        CardPool::new(players)
    }

    pub fn pack(id: &str, price: u64, odds: RarityOdds) -> PackDef {
        PackDef {
            id: id.to_string(),
            name: format!("{id} pack"),
            tier: PackTier::Bronze,
            price,
            card_count: 5,
            rarity_odds: odds,
        }
    }

    pub fn bronze() -> PackDef {
        pack(
            "bronze",
            1000,
            RarityOdds {
                common: 70.0,
                rare: 25.0,
                epic: 4.5,
                legendary: 0.5,
            },
        )
    }
}
