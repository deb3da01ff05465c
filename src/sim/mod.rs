//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (60 Hz, timers counted in ticks)
//! - Seeded RNG only
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use snapshot::{EntityView, PlayerView, Snapshot, build_snapshot};
pub use state::{
    ActiveBoosts, Bullet, Enemy, Field, GameEvent, GamePhase, GameState, Player, PowerUp,
    PowerUpKind, RoundOutcome, Side,
};
pub use tick::{PlayerInput, TickInput, tick};
