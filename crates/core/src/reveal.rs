//! Pack opening as a polled state machine.
//!
//! `RevealSequencer::begin` draws the whole pack and charges for it up front.
//! After that the caller feeds it the current time through [`RevealSequencer::tick`]
//! and the sequencer walks `Shaking -> Opening -> Revealing -> Complete`,
//! appending one card to the collection per reveal step. Deadlines are chained
//! off the previous deadline, so a late tick catches up to exactly the same
//! sequence an on-time tick would have produced.

use crate::{
    draw_pack, CardPool, DrawError, Event, EventBus, GameState, PackDef, Player, Rarity,
    RevealTimings, RngState,
};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RevealPhase {
    Shaking,
    Opening,
    Revealing,
    Complete,
}

impl RevealPhase {
    pub fn label(self) -> &'static str {
        match self {
            RevealPhase::Shaking => "shaking",
            RevealPhase::Opening => "opening",
            RevealPhase::Revealing => "revealing",
            RevealPhase::Complete => "complete",
        }
    }
}

/// Millisecond time source driving the sequencer.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Simulated time for tests and instant runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Per-rarity tally of a finished pack.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackSummary {
    counts: BTreeMap<Rarity, usize>,
}

impl PackSummary {
    pub fn from_cards(cards: &[Player]) -> Self {
        let mut counts = BTreeMap::new();
        for card in cards {
            *counts.entry(card.rarity).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, rarity: Rarity) -> usize {
        self.counts.get(&rarity).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Non-zero tiers, legendary first.
    pub fn entries(&self) -> Vec<(Rarity, usize)> {
        self.counts
            .iter()
            .rev()
            .filter(|(_, count)| **count > 0)
            .map(|(rarity, count)| (*rarity, *count))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct RevealSequencer {
    pack: PackDef,
    cards: Vec<Player>,
    timings: RevealTimings,
    phase: RevealPhase,
    cursor: usize,
    next_due: u64,
    cancelled: bool,
}

impl RevealSequencer {
    /// Draw the pack, charge its price and count it as opened. The charge
    /// happens exactly once here and is never refunded.
    pub fn begin(
        pack: &PackDef,
        pool: &CardPool,
        rng: &mut RngState,
        timings: RevealTimings,
        state: &mut GameState,
        events: &mut EventBus,
        now_ms: u64,
    ) -> Result<Self, DrawError> {
        let cards = draw_pack(pack, pool, rng)?;
        Ok(Self::with_cards(pack, cards, timings, state, events, now_ms))
    }

    /// Start a sequence over an already drawn card list.
    pub fn with_cards(
        pack: &PackDef,
        cards: Vec<Player>,
        timings: RevealTimings,
        state: &mut GameState,
        events: &mut EventBus,
        now_ms: u64,
    ) -> Self {
        state.spend(pack.price);
        state.increment_packs_opened();
        events.push(Event::PackOpened {
            pack_id: pack.id.clone(),
            price: pack.price,
            coins: state.coins,
            cards: cards.len(),
        });
        events.push(Event::PhaseChanged {
            phase: RevealPhase::Shaking,
        });
        Self {
            pack: pack.clone(),
            cards,
            timings,
            phase: RevealPhase::Shaking,
            cursor: 0,
            next_due: now_ms.saturating_add(timings.shake_ms),
            cancelled: false,
        }
    }

    pub fn pack(&self) -> &PackDef {
        &self.pack
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn cards(&self) -> &[Player] {
        &self.cards
    }

    pub fn revealed(&self) -> &[Player] {
        &self.cards[..self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RevealPhase::Complete
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Deadline of the next pending step, if any.
    pub fn next_due(&self) -> Option<u64> {
        if self.cancelled || self.is_complete() {
            None
        } else {
            Some(self.next_due)
        }
    }

    pub fn summary(&self) -> Option<PackSummary> {
        if self.is_complete() {
            Some(PackSummary::from_cards(&self.cards))
        } else {
            None
        }
    }

    /// Apply every step due at or before `now_ms`. Returns the number of
    /// steps applied.
    pub fn tick(&mut self, now_ms: u64, state: &mut GameState, events: &mut EventBus) -> usize {
        let mut steps = 0;
        while !self.cancelled && !self.is_complete() && now_ms >= self.next_due {
            self.step(state, events);
            steps += 1;
        }
        steps
    }

    /// Apply every remaining step regardless of pacing.
    pub fn run_to_completion(&mut self, state: &mut GameState, events: &mut EventBus) -> usize {
        self.tick(u64::MAX, state, events)
    }

    /// Drop all pending steps. A cancelled sequencer never touches state again.
    pub fn cancel(&mut self, events: &mut EventBus) {
        if self.cancelled || self.is_complete() {
            return;
        }
        self.cancelled = true;
        events.push(Event::OpeningCancelled {
            pack_id: self.pack.id.clone(),
            revealed: self.cursor,
        });
    }

    fn step(&mut self, state: &mut GameState, events: &mut EventBus) {
        match self.phase {
            RevealPhase::Shaking => {
                self.enter(RevealPhase::Opening, self.timings.open_ms, events);
            }
            RevealPhase::Opening => {
                self.enter(RevealPhase::Revealing, self.timings.first_reveal_ms, events);
            }
            RevealPhase::Revealing => {
                if self.cursor < self.cards.len() {
                    self.reveal_next(state, events);
                } else {
                    self.phase = RevealPhase::Complete;
                    events.push(Event::PhaseChanged {
                        phase: RevealPhase::Complete,
                    });
                    events.push(Event::PackCompleted {
                        pack_id: self.pack.id.clone(),
                        summary: PackSummary::from_cards(&self.cards),
                    });
                }
            }
            RevealPhase::Complete => {}
        }
    }

    fn enter(&mut self, phase: RevealPhase, dwell_ms: u64, events: &mut EventBus) {
        self.phase = phase;
        self.next_due = self.next_due.saturating_add(dwell_ms);
        events.push(Event::PhaseChanged { phase });
    }

    fn reveal_next(&mut self, state: &mut GameState, events: &mut EventBus) {
        let slot = self.cursor;
        let card = self.cards[slot].clone();
        let rarity = card.rarity;
        state.append_to_collection(card.clone());
        self.cursor += 1;
        events.push(Event::CardRevealed { slot, player: card });
        let delay = if self.cursor == self.cards.len() {
            self.timings.hold_for(rarity)
        } else {
            self.timings.gap_after(rarity)
        };
        self.next_due = self.next_due.saturating_add(delay);
    }
}
