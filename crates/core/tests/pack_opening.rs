use wicket_core::{
    CardPool, Clock, CollectionFilter, CollectionStats, Event, EventBus, GameState, ManualClock,
    PackDef, PackTier, Player, PlayerStats, Rarity, RarityOdds, RevealPhase, RevealSequencer,
    RevealTimings, RngState, Role,
};

fn player(id: &str, name: &str, rarity: Rarity, role: Role) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        role,
        team: "India".to_string(),
        rating: 90,
        rarity,
        stats: PlayerStats {
            batting: Some(90),
            bowling: None,
            fielding: Some(80),
        },
        image: String::new(),
    }
}

fn pool() -> CardPool {
    CardPool::new(vec![
        player("1", "Virat Kohli", Rarity::Legendary, Role::Batter),
        player("5", "Rohit Sharma", Rarity::Epic, Role::Batter),
        player("9", "Hardik Pandya", Rarity::Rare, Role::AllRounder),
        player("14", "Mohammed Shami", Rarity::Common, Role::Bowler),
    ])
}

fn gold() -> PackDef {
    PackDef {
        id: "gold".to_string(),
        name: "Gold Pack".to_string(),
        tier: PackTier::Gold,
        price: 5000,
        card_count: 5,
        rarity_odds: RarityOdds {
            common: 20.0,
            rare: 50.0,
            epic: 25.0,
            legendary: 5.0,
        },
    }
}

#[test]
fn two_gold_packs_back_to_back() {
    let pool = pool();
    let pack = gold();
    let mut rng = RngState::from_seed(77);
    let mut state = GameState::new(10_000);
    let mut events = EventBus::default();
    let clock = ManualClock::new(0);

    for round in 1..=2u64 {
        assert!(state.can_afford(pack.price));
        let mut seq = RevealSequencer::begin(
            &pack,
            &pool,
            &mut rng,
            RevealTimings::default(),
            &mut state,
            &mut events,
            clock.now_ms(),
        )
        .expect("begin");
        while !seq.is_complete() {
            clock.advance(250);
            seq.tick(clock.now_ms(), &mut state, &mut events);
        }
        assert_eq!(state.packs_opened, round);
        assert_eq!(state.collection.len() as u64, 5 * round);
    }
    assert_eq!(state.coins, 0);
    assert!(!state.can_afford(pack.price));

    let log: Vec<Event> = events.drain().collect();
    let reveals = log
        .iter()
        .filter(|event| matches!(event, Event::CardRevealed { .. }))
        .count();
    let completions = log
        .iter()
        .filter(|event| matches!(event, Event::PackCompleted { .. }))
        .count();
    let phases: Vec<RevealPhase> = log
        .iter()
        .filter_map(|event| match event {
            Event::PhaseChanged { phase } => Some(*phase),
            _ => None,
        })
        .take(4)
        .collect();
    assert_eq!(reveals, 10);
    assert_eq!(completions, 2);
    assert_eq!(
        phases,
        vec![
            RevealPhase::Shaking,
            RevealPhase::Opening,
            RevealPhase::Revealing,
            RevealPhase::Complete
        ]
    );

    let stats = CollectionStats::from_cards(&state.collection);
    assert_eq!(stats.total, 10);
    let bowlers = CollectionFilter {
        role: Some(Role::Bowler),
        ..CollectionFilter::default()
    };
    assert_eq!(
        bowlers.apply(&state.collection).len(),
        stats.count(Rarity::Common)
    );
}
