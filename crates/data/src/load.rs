use crate::schema::{Catalog, GameRules, PackDef, Player, Rarity};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use wicket_core::CardPool;

const PLAYERS_FILE: &str = "players.json";
const PACKS_FILE: &str = "packs.json";
const RULES_FILE: &str = "rules.json";

const BUILTIN_PLAYERS: &str = include_str!("../../../assets/players.json");
const BUILTIN_PACKS: &str = include_str!("../../../assets/packs.json");
const BUILTIN_RULES: &str = include_str!("../../../assets/rules.json");

/// Tolerance when checking that authored odds add up to 100.
const ODDS_EPSILON: f64 = 1e-6;

pub fn load_players(path: &Path) -> anyhow::Result<Vec<Player>> {
    load_json(path)
}

pub fn load_packs(path: &Path) -> anyhow::Result<Vec<PackDef>> {
    load_json(path)
}

pub fn load_rules(path: &Path) -> anyhow::Result<GameRules> {
    load_json(path)
}

/// Load `players.json`, `packs.json` and the optional `rules.json` from `dir`.
pub fn load_catalog(dir: &Path) -> anyhow::Result<Catalog> {
    let players = load_players(&dir.join(PLAYERS_FILE))?;
    let packs = load_packs(&dir.join(PACKS_FILE))?;
    let rules_path = dir.join(RULES_FILE);
    let rules = if rules_path.exists() {
        load_rules(&rules_path)?
    } else {
        GameRules::default()
    };
    let catalog = Catalog {
        pool: CardPool::new(players),
        packs,
        rules,
    };
    validate_catalog(&catalog).with_context(|| format!("validate {}", dir.display()))?;
    debug!(
        dir = %dir.display(),
        players = catalog.pool.len(),
        packs = catalog.packs.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// The catalog shipped with the game, embedded at build time.
pub fn builtin_catalog() -> anyhow::Result<Catalog> {
    let players: Vec<Player> =
        serde_json::from_str(BUILTIN_PLAYERS).context("parse builtin players")?;
    let packs: Vec<PackDef> = serde_json::from_str(BUILTIN_PACKS).context("parse builtin packs")?;
    let rules: GameRules = serde_json::from_str(BUILTIN_RULES).context("parse builtin rules")?;
    let catalog = Catalog {
        pool: CardPool::new(players),
        packs,
        rules,
    };
    validate_catalog(&catalog).context("validate builtin catalog")?;
    Ok(catalog)
}

/// Load from `dir` when given, otherwise fall back to the embedded catalog.
pub fn load_catalog_or_builtin(dir: Option<&Path>) -> anyhow::Result<Catalog> {
    match dir {
        Some(dir) => load_catalog(dir),
        None => builtin_catalog(),
    }
}

/// Reject catalogs a draw could fail on. Odds that do not add up to 100 are
/// reported but accepted: the draw keeps its fallthrough-to-common behavior.
pub fn validate_catalog(catalog: &Catalog) -> anyhow::Result<()> {
    let mut player_ids = HashSet::new();
    for player in catalog.pool.players() {
        if player.id.trim().is_empty() {
            bail!("player {:?} has an empty id", player.name);
        }
        if !player_ids.insert(player.id.as_str()) {
            bail!("duplicate player id {}", player.id);
        }
        if player.stats.is_empty() {
            warn!(player = %player.id, "player has no stats");
        }
    }

    let mut pack_ids = HashSet::new();
    for pack in &catalog.packs {
        if !pack_ids.insert(pack.id.as_str()) {
            bail!("duplicate pack id {}", pack.id);
        }
        if pack.price == 0 {
            bail!("pack {} has no price", pack.id);
        }
        if pack.card_count == 0 {
            bail!("pack {} has no cards", pack.id);
        }
        for rarity in Rarity::ALL {
            let odds = pack.rarity_odds.get(rarity);
            if !odds.is_finite() || odds < 0.0 {
                bail!("pack {} has invalid {} odds {}", pack.id, rarity, odds);
            }
            // Common is the fallthrough tier, so it must be drawable even at 0%.
            let rollable = odds > 0.0 || rarity == Rarity::Common;
            if rollable && catalog.pool.players_by_rarity(rarity).is_empty() {
                bail!("pack {} can roll {} but no {} players exist", pack.id, rarity, rarity);
            }
        }
        let total = pack.rarity_odds.total();
        if (total - 100.0).abs() > ODDS_EPSILON {
            warn!(pack = %pack.id, total, "rarity odds do not sum to 100");
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PackTier, PlayerStats, RarityOdds, Role};

    fn player(id: &str, rarity: Rarity) -> Player {
        Player {
            id: id.to_string(),
            name: format!("Player {id}"),
            role: Role::Batter,
            team: "XI".to_string(),
            rating: 75,
            rarity,
            stats: PlayerStats {
                batting: Some(70),
                bowling: None,
                fielding: None,
            },
            image: String::new(),
        }
    }

    fn pack(id: &str, odds: RarityOdds) -> PackDef {
        PackDef {
            id: id.to_string(),
            name: id.to_string(),
            tier: PackTier::Silver,
            price: 100,
            card_count: 5,
            rarity_odds: odds,
        }
    }

    fn full_pool() -> CardPool {
        CardPool::new(
            Rarity::ALL
                .into_iter()
                .enumerate()
                .map(|(idx, rarity)| player(&idx.to_string(), rarity))
                .collect(),
        )
    }

    fn odds(common: f64, rare: f64, epic: f64, legendary: f64) -> RarityOdds {
        RarityOdds {
            common,
            rare,
            epic,
            legendary,
        }
    }

    #[test]
    fn accepts_well_formed_catalog() {
        let catalog = Catalog {
            pool: full_pool(),
            packs: vec![pack("a", odds(70.0, 25.0, 4.5, 0.5))],
            rules: GameRules::default(),
        };
        validate_catalog(&catalog).expect("valid");
    }

    #[test]
    fn accepts_odds_that_do_not_sum_to_one_hundred() {
        let catalog = Catalog {
            pool: full_pool(),
            packs: vec![pack("a", odds(10.0, 10.0, 10.0, 10.0))],
            rules: GameRules::default(),
        };
        validate_catalog(&catalog).expect("valid with warning");
    }

    #[test]
    fn rejects_rollable_tier_without_players() {
        let pool = CardPool::new(vec![player("1", Rarity::Common), player("2", Rarity::Rare)]);
        let catalog = Catalog {
            pool,
            packs: vec![pack("a", odds(70.0, 25.0, 5.0, 0.0))],
            rules: GameRules::default(),
        };
        let err = validate_catalog(&catalog).expect_err("epic pool is empty");
        assert!(err.to_string().contains("epic"));
    }

    #[test]
    fn unrollable_tier_may_be_empty() {
        let pool = CardPool::new(vec![player("1", Rarity::Common), player("2", Rarity::Rare)]);
        let catalog = Catalog {
            pool,
            packs: vec![pack("a", odds(70.0, 30.0, 0.0, 0.0))],
            rules: GameRules::default(),
        };
        validate_catalog(&catalog).expect("valid");
    }

    #[test]
    fn rejects_duplicates_and_bad_numbers() {
        let mut pool_players = full_pool().players().to_vec();
        pool_players.push(player("0", Rarity::Rare));
        let catalog = Catalog {
            pool: CardPool::new(pool_players),
            packs: Vec::new(),
            rules: GameRules::default(),
        };
        assert!(validate_catalog(&catalog).is_err());

        let mut zero_cards = pack("a", odds(100.0, 0.0, 0.0, 0.0));
        zero_cards.card_count = 0;
        let negative = pack("b", odds(101.0, -1.0, 0.0, 0.0));
        for bad in [zero_cards, negative] {
            let catalog = Catalog {
                pool: full_pool(),
                packs: vec![bad],
                rules: GameRules::default(),
            };
            assert!(validate_catalog(&catalog).is_err());
        }
        let catalog = Catalog {
            pool: full_pool(),
            packs: vec![pack("a", odds(100.0, 0.0, 0.0, 0.0)), pack("a", odds(100.0, 0.0, 0.0, 0.0))],
            rules: GameRules::default(),
        };
        assert!(validate_catalog(&catalog).is_err());
    }

    #[test]
    fn pack_lookup_ignores_case() {
        let catalog = Catalog {
            pool: full_pool(),
            packs: vec![pack("gold", odds(20.0, 50.0, 25.0, 5.0))],
            rules: GameRules::default(),
        };
        assert!(catalog.pack_by_id("Gold").is_some());
        assert!(catalog.pack_by_id("platinum").is_none());
    }
}
