//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod collection;
pub mod config;
pub mod content;
pub mod draw;
pub mod events;
pub mod reveal;
pub mod rng;
pub mod state;

pub use cards::*;
pub use collection::*;
pub use config::*;
pub use content::*;
pub use draw::*;
pub use events::*;
pub use reveal::*;
pub use rng::*;
pub use state::*;
