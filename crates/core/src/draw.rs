use crate::{CardPool, PackDef, Player, Rarity, RarityOdds, RngState};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("no players of rarity {0} in the card pool")]
    EmptyPool(Rarity),
}

/// Tiers checked against the running cumulative odds, highest first.
/// Anything past the last threshold falls through to common.
const THRESHOLD_ORDER: [Rarity; 3] = [Rarity::Legendary, Rarity::Epic, Rarity::Rare];

/// Map a roll in `[0, 100)` to a rarity. A roll equal to a threshold belongs
/// to the tier that threshold closes.
pub fn rarity_for_roll(odds: &RarityOdds, roll: f64) -> Rarity {
    let mut cumulative = 0.0;
    for rarity in THRESHOLD_ORDER {
        cumulative += odds.get(rarity);
        if roll <= cumulative {
            return rarity;
        }
    }
    Rarity::Common
}

pub fn draw_rarity(odds: &RarityOdds, rng: &mut RngState) -> Rarity {
    rarity_for_roll(odds, rng.roll_percent())
}

/// One independent draw per slot, returned in slot order.
pub fn draw_pack(
    pack: &PackDef,
    pool: &CardPool,
    rng: &mut RngState,
) -> Result<Vec<Player>, DrawError> {
    let mut cards = Vec::with_capacity(pack.card_count as usize);
    for _ in 0..pack.card_count {
        let rarity = draw_rarity(&pack.rarity_odds, rng);
        let player = pool
            .random_player(Some(rarity), rng)
            .ok_or(DrawError::EmptyPool(rarity))?;
        cards.push(player.clone());
    }
    Ok(cards)
}
