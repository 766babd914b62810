use crate::{PackSummary, Player, RevealPhase};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    PackOpened {
        pack_id: String,
        price: u64,
        coins: u64,
        cards: usize,
    },
    PhaseChanged {
        phase: RevealPhase,
    },
    CardRevealed {
        slot: usize,
        player: Player,
    },
    PackCompleted {
        pack_id: String,
        summary: PackSummary,
    },
    OpeningCancelled {
        pack_id: String,
        revealed: usize,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
