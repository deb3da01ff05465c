//! Render snapshot: queries the game state and builds a read-only view.
//!
//! The renderer owns no game state; it draws whatever [`build_snapshot`]
//! hands it. Views carry a position, a size, and a color class so the
//! front-end needs no knowledge of entity internals.

use serde::Serialize;

use super::collision::Rect;
use super::state::{ActiveBoosts, GamePhase, GameState, PowerUpKind, Side};

/// A drawable box with its color class
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub rect: Rect,
    pub color_class: &'static str,
}

/// Player HUD + drawing info
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub side: Side,
    pub rect: Rect,
    pub color_class: &'static str,
    pub health: i32,
    pub score: u32,
    pub boosts: ActiveBoosts,
}

/// Complete read-only frame for the renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub players: [PlayerView; 2],
    pub enemies: Vec<EntityView>,
    pub bullets: Vec<EntityView>,
    pub powerups: Vec<EntityView>,
}

fn player_color(side: Side) -> &'static str {
    match side {
        Side::Left => "#00FF00",
        Side::Right => "#FF0000",
    }
}

fn powerup_color(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::FireRate => "#00FFFF",
        PowerUpKind::BulletSize => "#00FF88",
        PowerUpKind::MultiShot => "#FF8800",
    }
}

/// Build a complete snapshot from the current game state.
///
/// This never modifies the state.
pub fn build_snapshot(state: &GameState) -> Snapshot {
    let players = [Side::Left, Side::Right].map(|side| {
        let player = state.player(side);
        PlayerView {
            side,
            rect: player.rect(),
            color_class: player_color(side),
            health: player.health,
            score: player.score,
            boosts: player.boosts,
        }
    });

    Snapshot {
        phase: state.phase,
        time_ticks: state.time_ticks,
        players,
        enemies: state
            .enemies
            .iter()
            .map(|e| EntityView {
                rect: e.rect(),
                color_class: "#FFD700",
            })
            .collect(),
        bullets: state
            .bullets
            .iter()
            .map(|b| EntityView {
                rect: b.rect(),
                color_class: "#FFFF00",
            })
            .collect(),
        powerups: state
            .powerups
            .iter()
            .map(|p| EntityView {
                rect: p.rect(),
                color_class: powerup_color(p.kind),
            })
            .collect(),
    }
}
