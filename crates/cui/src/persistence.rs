use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use wicket_core::GameState;

pub const SAVE_PATH_ENV: &str = "WICKET_SAVE";
const SAVE_FILE_NAME: &str = ".wicket_wonders_state.json";

pub fn default_state_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(SAVE_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(SAVE_FILE_NAME))
}

pub fn save_state_file(state: &GameState, path: &Path) -> Result<(), String> {
    let body = serde_json::to_string_pretty(state).map_err(|err| err.to_string())?;
    fs::write(path, body).map_err(|err| err.to_string())
}

pub fn load_state_file(path: &Path) -> Result<GameState, String> {
    let body = fs::read_to_string(path).map_err(|err| err.to_string())?;
    serde_json::from_str(&body).map_err(|err| err.to_string())
}

/// The game's single save slot. Loading never fails and saving never reports
/// errors to the caller; both only log.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: Option<PathBuf>,
}

impl SaveStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn from_env() -> Self {
        Self::new(default_state_path())
    }

    /// A store that never touches disk.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Saved state if present and parseable, a fresh state otherwise.
    pub fn load_or_default(&self, starting_coins: u64) -> GameState {
        let Some(path) = self.path.as_deref() else {
            return GameState::new(starting_coins);
        };
        if !path.exists() {
            debug!(path = %path.display(), "no saved state");
            return GameState::new(starting_coins);
        }
        match load_state_file(path) {
            Ok(state) => {
                debug!(
                    path = %path.display(),
                    coins = state.coins,
                    cards = state.collection.len(),
                    "loaded saved state"
                );
                state
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "discarding unreadable saved state");
                GameState::new(starting_coins)
            }
        }
    }

    pub fn save(&self, state: &GameState) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        if let Err(err) = save_state_file(state, path) {
            warn!(path = %path.display(), error = %err, "failed to save state");
        }
    }

    pub fn clear(&self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "saved state cleared"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!(path = %path.display(), error = %err, "failed to clear saved state"),
        }
    }
}
