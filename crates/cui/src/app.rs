use crate::persistence::SaveStore;
use crate::LaunchOptions;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use tracing::{info, warn};
use wicket_core::{
    Clock, CollectionFilter, CollectionStats, Event, EventBus, GameState, PackDef, Player, Rarity,
    RevealSequencer, RngState, Role, SystemClock,
};
use wicket_data::{load_catalog_or_builtin, Catalog};

const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Packs,
    Opening,
    Collection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    OpenPacks,
    Collection,
    Reset,
    Quit,
}

pub const MENU_ENTRIES: [MenuEntry; 4] = [
    MenuEntry::OpenPacks,
    MenuEntry::Collection,
    MenuEntry::Reset,
    MenuEntry::Quit,
];

impl MenuEntry {
    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::OpenPacks => "Open Card Packs",
            MenuEntry::Collection => "My Collection",
            MenuEntry::Reset => "Reset Progress",
            MenuEntry::Quit => "Quit",
        }
    }
}

pub struct App {
    pub catalog: Catalog,
    pub state: GameState,
    pub store: SaveStore,
    pub rng: RngState,
    pub clock: SystemClock,
    pub events: EventBus,
    pub screen: Screen,
    pub menu_cursor: usize,
    pub pack_cursor: usize,
    pub collection_cursor: usize,
    pub opening: Option<RevealSequencer>,
    pub filter: CollectionFilter,
    pub search_active: bool,
    pub confirm_reset: bool,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(options: &LaunchOptions) -> Result<Self> {
        let catalog =
            load_catalog_or_builtin(options.assets_dir.as_deref()).context("load catalog")?;
        let store = match options.save_path.as_ref() {
            Some(path) => SaveStore::new(Some(path.clone())),
            None => SaveStore::from_env(),
        };
        let rng = match options.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        Ok(Self::with_parts(catalog, store, rng))
    }

    pub fn with_parts(catalog: Catalog, store: SaveStore, rng: RngState) -> Self {
        let state = store.load_or_default(catalog.rules.starting_coins);
        info!(
            coins = state.coins,
            cards = state.collection.len(),
            seed = rng.seed(),
            "session started"
        );
        Self {
            catalog,
            state,
            store,
            rng,
            clock: SystemClock::new(),
            events: EventBus::default(),
            screen: Screen::Menu,
            menu_cursor: 0,
            pack_cursor: 0,
            collection_cursor: 0,
            opening: None,
            filter: CollectionFilter::default(),
            search_active: false,
            confirm_reset: false,
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn on_tick(&mut self) {
        let now = self.clock.now_ms();
        self.tick_at(now);
    }

    /// Advance the running pack opening to `now_ms`, saving if anything changed.
    pub fn tick_at(&mut self, now_ms: u64) {
        let Some(opening) = self.opening.as_mut() else {
            return;
        };
        let steps = opening.tick(now_ms, &mut self.state, &mut self.events);
        if steps > 0 {
            self.persist();
            self.flush_events();
        }
    }

    pub fn screen_label(&self) -> &'static str {
        match self.screen {
            Screen::Menu => "Menu",
            Screen::Packs => "Packs",
            Screen::Opening => "Opening",
            Screen::Collection => "Collection",
        }
    }

    pub fn next_hint(&self) -> String {
        match self.screen {
            Screen::Menu => "enter=select  p=packs  c=collection".to_string(),
            Screen::Packs => "enter=open  esc=back".to_string(),
            Screen::Opening => match self.opening.as_ref() {
                Some(opening) if opening.is_complete() => "enter=continue".to_string(),
                _ => "esc=abandon reveal".to_string(),
            },
            Screen::Collection => "/=search  r=rarity  o=role  esc=back".to_string(),
        }
    }

    pub fn move_cursor(&mut self, down: bool) {
        match self.screen {
            Screen::Menu => move_index(&mut self.menu_cursor, MENU_ENTRIES.len(), down),
            Screen::Packs => {
                let len = self.catalog.packs.len();
                move_index(&mut self.pack_cursor, len, down);
            }
            Screen::Collection => {
                let len = self.filtered_collection().len();
                move_index(&mut self.collection_cursor, len, down);
            }
            Screen::Opening => {}
        }
    }

    pub fn activate_primary(&mut self) {
        match self.screen {
            Screen::Menu => match MENU_ENTRIES[self.menu_cursor.min(MENU_ENTRIES.len() - 1)] {
                MenuEntry::OpenPacks => self.show_packs(),
                MenuEntry::Collection => self.show_collection(),
                MenuEntry::Reset => self.request_reset(),
                MenuEntry::Quit => self.should_quit = true,
            },
            Screen::Packs => self.open_selected_pack(),
            Screen::Opening => self.finish_opening(),
            Screen::Collection => {}
        }
    }

    pub fn back(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.screen {
            Screen::Menu => {}
            Screen::Packs | Screen::Collection => self.screen = Screen::Menu,
            Screen::Opening => self.leave_opening(),
        }
    }

    pub fn show_packs(&mut self) {
        if self.screen == Screen::Opening {
            return;
        }
        self.screen = Screen::Packs;
    }

    pub fn show_collection(&mut self) {
        if self.screen == Screen::Opening {
            return;
        }
        self.screen = Screen::Collection;
        self.normalize_cursors();
    }

    pub fn selected_pack(&self) -> Option<&PackDef> {
        if self.catalog.packs.is_empty() {
            return None;
        }
        self.catalog
            .packs
            .get(self.pack_cursor.min(self.catalog.packs.len() - 1))
    }

    pub fn open_selected_pack(&mut self) {
        let Some(pack) = self.selected_pack().cloned() else {
            self.push_status("no packs available");
            return;
        };
        self.open_pack(&pack);
    }

    pub fn open_pack(&mut self, pack: &PackDef) {
        if self.opening.is_some() {
            self.push_status("a pack is already opening");
            return;
        }
        if !self.state.can_afford(pack.price) {
            self.push_status(format!(
                "not enough coins for {} ({} needed, {} held)",
                pack.name, pack.price, self.state.coins
            ));
            return;
        }
        let now = self.clock.now_ms();
        match RevealSequencer::begin(
            pack,
            &self.catalog.pool,
            &mut self.rng,
            self.catalog.rules.timings,
            &mut self.state,
            &mut self.events,
            now,
        ) {
            Ok(opening) => {
                info!(pack = %pack.id, coins = self.state.coins, "pack opened");
                self.opening = Some(opening);
                self.screen = Screen::Opening;
                self.persist();
                self.push_status(format!("opening {}...", pack.name));
                self.flush_events();
            }
            Err(err) => {
                warn!(pack = %pack.id, error = %err, "pack could not be drawn");
                self.push_status(format!("open failed: {err}"));
            }
        }
    }

    /// Continue from a finished opening back to pack selection.
    pub fn finish_opening(&mut self) {
        let complete = self
            .opening
            .as_ref()
            .map(|opening| opening.is_complete())
            .unwrap_or(true);
        if !complete {
            return;
        }
        self.opening = None;
        self.screen = Screen::Packs;
    }

    /// Leave the opening screen, dropping any reveals still pending.
    pub fn leave_opening(&mut self) {
        if let Some(mut opening) = self.opening.take() {
            opening.cancel(&mut self.events);
            self.flush_events();
        }
        self.screen = Screen::Packs;
    }

    pub fn filtered_collection(&self) -> Vec<&Player> {
        self.filter.apply(&self.state.collection)
    }

    pub fn collection_stats(&self) -> CollectionStats {
        CollectionStats::from_cards(&self.state.collection)
    }

    pub fn cycle_rarity_filter(&mut self) {
        self.filter.rarity = cycle_option(self.filter.rarity, &Rarity::ALL);
        self.normalize_cursors();
    }

    pub fn cycle_role_filter(&mut self) {
        self.filter.role = cycle_option(self.filter.role, &Role::ALL);
        self.normalize_cursors();
    }

    pub fn start_search(&mut self) {
        if self.screen != Screen::Collection {
            return;
        }
        self.search_active = true;
    }

    /// Route a key to the search prompt. Returns `true` if consumed.
    pub fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        if !self.search_active {
            return false;
        }
        match key.code {
            KeyCode::Esc => {
                self.search_active = false;
                self.filter.query.clear();
            }
            KeyCode::Enter => self.search_active = false,
            KeyCode::Backspace => {
                self.filter.query.pop();
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    self.filter.query.push(ch);
                }
            }
            _ => {}
        }
        self.normalize_cursors();
        true
    }

    pub fn request_reset(&mut self) {
        if self.screen == Screen::Opening {
            return;
        }
        self.confirm_reset = true;
    }

    /// Route a key to the reset confirmation. Returns `true` if consumed.
    pub fn handle_confirm_key(&mut self, key: KeyEvent) -> bool {
        if !self.confirm_reset {
            return false;
        }
        self.confirm_reset = false;
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.reset_progress();
        } else {
            self.push_status("reset cancelled");
        }
        true
    }

    pub fn reset_progress(&mut self) {
        self.state.reset(self.catalog.rules.starting_coins);
        self.store.clear();
        self.filter = CollectionFilter::default();
        self.normalize_cursors();
        info!("progress reset");
        self.push_status("progress reset");
    }

    pub fn push_status(&mut self, message: impl Into<String>) {
        self.status_line = message.into();
        let line = self.status_line.clone();
        self.push_event_line(line);
    }

    fn persist(&self) {
        self.store.save(&self.state);
    }

    fn normalize_cursors(&mut self) {
        let len = self.filtered_collection().len();
        if len == 0 {
            self.collection_cursor = 0;
        } else if self.collection_cursor >= len {
            self.collection_cursor = len - 1;
        }
        if self.pack_cursor >= self.catalog.packs.len() {
            self.pack_cursor = self.catalog.packs.len().saturating_sub(1);
        }
    }

    fn flush_events(&mut self) {
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            self.push_event_line(format_event(&event));
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

fn move_index(value: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *value = 0;
        return;
    }
    if down {
        *value = (*value + 1) % len;
    } else if *value == 0 {
        *value = len - 1;
    } else {
        *value -= 1;
    }
}

/// `None -> first -> ... -> last -> None`.
fn cycle_option<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let idx = all.iter().position(|item| *item == value)?;
            all.get(idx + 1).copied()
        }
    }
}

pub fn format_event(event: &Event) -> String {
    match event {
        Event::PackOpened {
            pack_id,
            price,
            coins,
            cards,
        } => format!("opened {pack_id} for {price} ({cards} cards, {coins} coins left)"),
        Event::PhaseChanged { phase } => format!("phase -> {}", phase.label()),
        Event::CardRevealed { slot, player } => format!(
            "#{} {} [{}] {} {}",
            slot + 1,
            player.name,
            player.rarity,
            player.role.code(),
            player.rating
        ),
        Event::PackCompleted { pack_id, summary } => {
            let parts: Vec<String> = summary
                .entries()
                .into_iter()
                .map(|(rarity, count)| format!("{rarity} x{count}"))
                .collect();
            format!("{pack_id} complete: {}", parts.join(", "))
        }
        Event::OpeningCancelled { pack_id, revealed } => {
            format!("{pack_id} abandoned after {revealed} reveals")
        }
    }
}
