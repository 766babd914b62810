use std::collections::HashMap;
use std::path::PathBuf;
use wicket_core::{
    draw_pack, draw_rarity, EventBus, GameState, ManualClock, Clock, Rarity, RevealPhase,
    RevealSequencer, RngState,
};
use wicket_data::{builtin_catalog, load_catalog, load_catalog_or_builtin, Catalog};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn catalog() -> Catalog {
    load_catalog(&assets_root()).expect("load catalog")
}

#[test]
fn shipped_catalog_loads_from_disk_and_matches_builtin() {
    let disk = catalog();
    let builtin = builtin_catalog().expect("builtin catalog");
    assert_eq!(disk.pool.players(), builtin.pool.players());
    assert_eq!(disk.packs, builtin.packs);
    assert_eq!(disk.rules, builtin.rules);
    assert_eq!(disk.pool.len(), 20);
    assert_eq!(disk.packs.len(), 3);
    assert_eq!(disk.rules.starting_coins, 10_000);
    let fallback = load_catalog_or_builtin(None).expect("builtin");
    assert_eq!(fallback.packs, disk.packs);
}

#[test]
fn shipped_packs_have_five_cards_and_full_odds() {
    let catalog = catalog();
    for pack in &catalog.packs {
        assert_eq!(pack.card_count, 5, "{}", pack.id);
        assert!((pack.rarity_odds.total() - 100.0).abs() < 1e-9, "{}", pack.id);
    }
    let prices: Vec<u64> = catalog.packs.iter().map(|pack| pack.price).collect();
    assert_eq!(prices, vec![1000, 2500, 5000]);
}

#[test]
fn every_tier_has_players_and_random_picks_respect_tier() {
    let catalog = catalog();
    let mut rng = RngState::from_seed(17);
    for rarity in Rarity::ALL {
        assert!(!catalog.pool.players_by_rarity(rarity).is_empty());
        for _ in 0..500 {
            let player = catalog
                .pool
                .random_player(Some(rarity), &mut rng)
                .expect("non-empty tier");
            assert_eq!(player.rarity, rarity);
        }
    }
    let legends: Vec<&str> = catalog
        .pool
        .players_by_rarity(Rarity::Legendary)
        .into_iter()
        .map(|player| player.name.as_str())
        .collect();
    assert_eq!(
        legends,
        vec!["Virat Kohli", "MS Dhoni", "Babar Azam", "AB de Villiers"]
    );
}

#[test]
fn draws_return_exactly_card_count_catalog_players() {
    let catalog = catalog();
    let mut rng = RngState::from_seed(23);
    for pack in &catalog.packs {
        for _ in 0..200 {
            let cards = draw_pack(pack, &catalog.pool, &mut rng).expect("draw");
            assert_eq!(cards.len(), 5);
            for card in &cards {
                assert_eq!(catalog.pool.player_by_id(&card.id), Some(card));
            }
        }
    }
}

#[test]
fn single_slot_distribution_converges_to_pack_odds() {
    let catalog = catalog();
    let samples = 100_000usize;
    for (idx, pack) in catalog.packs.iter().enumerate() {
        let mut rng = RngState::from_seed(0xC0FFEE + idx as u64);
        let mut counts: HashMap<Rarity, usize> = HashMap::new();
        for _ in 0..samples {
            *counts
                .entry(draw_rarity(&pack.rarity_odds, &mut rng))
                .or_insert(0) += 1;
        }
        for rarity in Rarity::ALL {
            let observed = counts.get(&rarity).copied().unwrap_or(0) as f64 * 100.0 / samples as f64;
            let expected = pack.rarity_odds.get(rarity);
            assert!(
                (observed - expected).abs() < 1.0,
                "{} {}: observed {:.3}% expected {}%",
                pack.id,
                rarity,
                observed,
                expected
            );
        }
    }
}

#[test]
fn bronze_pack_from_starting_coins() {
    let catalog = catalog();
    let bronze = catalog.pack_by_id("bronze").expect("bronze pack").clone();
    let mut state = GameState::new(catalog.rules.starting_coins);
    let mut events = EventBus::default();
    let mut rng = RngState::from_seed(2024);
    let clock = ManualClock::new(0);

    let mut seq = RevealSequencer::begin(
        &bronze,
        &catalog.pool,
        &mut rng,
        catalog.rules.timings,
        &mut state,
        &mut events,
        clock.now_ms(),
    )
    .expect("begin");
    assert_eq!(state.coins, 9000);
    assert_eq!(state.packs_opened, 1);

    while seq.phase() != RevealPhase::Complete {
        clock.advance(100);
        seq.tick(clock.now_ms(), &mut state, &mut events);
    }
    assert_eq!(state.coins, 9000);
    assert_eq!(state.packs_opened, 1);
    assert_eq!(state.collection.len(), 5);
    assert_eq!(state.collection, seq.cards());
    assert_eq!(seq.summary().expect("summary").total(), 5);
}
