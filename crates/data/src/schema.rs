pub use wicket_core::{
    CardPool, GameRules, PackDef, PackTier, Player, PlayerStats, Rarity, RarityOdds,
    RevealTimings, Role,
};

/// Everything a session needs: players, purchasable packs and tuning.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub pool: CardPool,
    pub packs: Vec<PackDef>,
    pub rules: GameRules,
}

impl Catalog {
    pub fn pack_by_id(&self, id: &str) -> Option<&PackDef> {
        let id = id.trim();
        self.packs
            .iter()
            .find(|pack| pack.id.eq_ignore_ascii_case(id))
    }
}
