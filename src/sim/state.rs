//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// State built, waiting for the front-end to start the round
    Ready,
    /// Active gameplay
    Playing,
    /// Round is paused
    Paused,
    /// Round ended (a player reached zero health)
    GameOver,
}

/// Which half of the field an entity belongs to.
///
/// Sides are determined by x position relative to the midline. Cross-side
/// interactions are never evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Index into per-player arrays (Left = 0, Right = 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Shorter shoot cooldown
    FireRate,
    /// Larger bullets
    BulletSize,
    /// Three bullets per shot
    MultiShot,
}

/// Outcome of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    LeftWins,
    RightWins,
    Tie,
}

/// Events emitted by the simulation for front-end audio and UI feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A player fired (one event per shot, not per bullet)
    ShotFired { side: Side },
    /// An enemy reached a player and dealt contact damage
    EnemyHitPlayer { side: Side, health: i32 },
    /// A bullet destroyed an enemy
    EnemyDestroyed { side: Side, score: u32 },
    /// A bullet hit a power-up box; the boost is now active
    PowerUpCollected { side: Side, kind: PowerUpKind },
    /// A player reached zero health. Emitted exactly once per round.
    RoundOver { outcome: RoundOutcome },
}

/// Play field dimensions and side geometry.
///
/// The field is split at `width / 2`; x below the midline is [`Side::Left`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Side an x coordinate falls on (midline itself counts as Right)
    #[inline]
    pub fn side_of(&self, x: f32) -> Side {
        if x < self.half_width() {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Inclusive x-range a player of the given width may occupy on its side
    pub fn player_x_range(&self, side: Side, player_width: f32) -> (f32, f32) {
        match side {
            Side::Left => (SIDE_MARGIN, self.half_width() - player_width - SIDE_MARGIN),
            Side::Right => (
                self.half_width() + SIDE_MARGIN,
                self.width - player_width - SIDE_MARGIN,
            ),
        }
    }

    /// Enemy patrol bounds for a side, as [min_x, max_x] outer coordinates
    pub fn enemy_bounds(&self, side: Side) -> (f32, f32) {
        match side {
            Side::Left => (SIDE_MARGIN, self.half_width() - SIDE_MARGIN),
            Side::Right => (self.half_width() + SIDE_MARGIN, self.width - SIDE_MARGIN),
        }
    }
}

/// Per-player timed boosts, counted in remaining ticks (active while > 0)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActiveBoosts {
    pub fire_rate_ticks: u32,
    pub bullet_size_ticks: u32,
    pub multi_shot_ticks: u32,
}

impl ActiveBoosts {
    #[inline]
    pub fn fire_rate(&self) -> bool {
        self.fire_rate_ticks > 0
    }

    #[inline]
    pub fn bullet_size(&self) -> bool {
        self.bullet_size_ticks > 0
    }

    #[inline]
    pub fn multi_shot(&self) -> bool {
        self.multi_shot_ticks > 0
    }

    /// Count one tick off every active boost
    pub fn expire_tick(&mut self) {
        self.fire_rate_ticks = self.fire_rate_ticks.saturating_sub(1);
        self.bullet_size_ticks = self.bullet_size_ticks.saturating_sub(1);
        self.multi_shot_ticks = self.multi_shot_ticks.saturating_sub(1);
    }

    pub fn grant(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::FireRate => self.fire_rate_ticks = POWERUP_DURATION_TICKS,
            PowerUpKind::BulletSize => self.bullet_size_ticks = POWERUP_DURATION_TICKS,
            PowerUpKind::MultiShot => self.multi_shot_ticks = POWERUP_DURATION_TICKS,
        }
    }
}

/// A player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    pub pos: Vec2,
    /// Horizontal velocity (players only move sideways)
    pub vel_x: f32,
    /// 0-100
    pub health: i32,
    pub score: u32,
    /// Ticks until the next shot is allowed
    pub cooldown_ticks: u32,
    pub boosts: ActiveBoosts,
    /// Consecutive ticks the left/right keys have been held (accel ramp)
    pub left_hold_ticks: u32,
    pub right_hold_ticks: u32,
}

impl Player {
    /// New player centered in its half, just above the bottom edge
    pub fn new(side: Side, field: &Field) -> Self {
        let half = field.half_width();
        let center_x = match side {
            Side::Left => half / 2.0,
            Side::Right => half + half / 2.0,
        };
        Self {
            side,
            pos: Vec2::new(
                center_x - PLAYER_WIDTH / 2.0,
                field.height - PLAYER_BOTTOM_OFFSET,
            ),
            vel_x: 0.0,
            health: PLAYER_START_HEALTH,
            score: 0,
            cooldown_ticks: 0,
            boosts: ActiveBoosts::default(),
            left_hold_ticks: 0,
            right_hold_ticks: 0,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Self::size())
    }

    pub fn alive(&self) -> bool {
        self.health > 0
    }

    /// Shoot cooldown with the fire-rate boost applied
    pub fn effective_cooldown(&self) -> u32 {
        if self.boosts.fire_rate() {
            (SHOOT_COOLDOWN_TICKS as f32 / FIRE_RATE_DIVISOR).ceil() as u32
        } else {
            SHOOT_COOLDOWN_TICKS
        }
    }

    /// Bullet dimensions with the bullet-size boost applied
    pub fn bullet_size(&self) -> Vec2 {
        let base = Vec2::new(BULLET_WIDTH, BULLET_HEIGHT);
        if self.boosts.bullet_size() {
            base * BULLET_SIZE_MULT
        } else {
            base
        }
    }

    /// Apply friction, integrate position, clamp to own half
    pub(crate) fn apply_movement(&mut self, field: &Field) {
        self.vel_x *= PLAYER_FRICTION;
        self.pos.x += self.vel_x;
        let (min_x, max_x) = field.player_x_range(self.side, PLAYER_WIDTH);
        self.pos.x = self.pos.x.clamp(min_x, max_x);
    }
}

/// A descending enemy, confined to one side of the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Horizontal speed is per-instance random; vertical speed is fixed
    pub vel: Vec2,
    /// Patrol bounds (outer coordinates; the enemy bounces between them)
    pub min_x: f32,
    pub max_x: f32,
}

impl Enemy {
    pub fn size() -> Vec2 {
        Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Self::size())
    }

    /// Advance one tick, bouncing off the patrol bounds
    pub(crate) fn advance(&mut self) {
        self.pos += self.vel;
        if self.pos.x < self.min_x || self.pos.x + ENEMY_WIDTH > self.max_x {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(self.min_x, self.max_x - ENEMY_WIDTH);
        }
    }
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Side of the player that fired it
    pub owner: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Steers toward the nearest same-side enemy instead of flying straight
    pub auto_aim: bool,
    /// Auto-aim target enemy id, re-resolved each tick when stale
    pub target: Option<u32>,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Advance one tick. Auto-aim bullets re-resolve a stale target to the
    /// nearest enemy on the owner's side, then steer toward its center.
    pub(crate) fn advance(&mut self, enemies: &[Enemy], field: &Field) {
        if !self.auto_aim {
            self.pos += self.vel;
            return;
        }

        let stale = match self.target {
            Some(id) => !enemies.iter().any(|e| e.id == id),
            None => true,
        };
        if stale {
            let center = self.rect().center();
            self.target = enemies
                .iter()
                .filter(|e| field.side_of(e.pos.x) == self.owner)
                .min_by(|a, b| {
                    let da = a.rect().center().distance_squared(center);
                    let db = b.rect().center().distance_squared(center);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|e| e.id);
        }

        match self.target.and_then(|id| enemies.iter().find(|e| e.id == id)) {
            Some(target) => {
                let to_target = target.rect().center() - self.rect().center();
                let dist = to_target.length();
                if dist > 0.0 {
                    self.pos += to_target / dist * AUTO_AIM_SPEED;
                }
            }
            None => self.pos += self.vel,
        }
    }
}

/// A static power-up box waiting to be shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

impl PowerUp {
    pub fn size() -> Vec2 {
        Vec2::new(POWERUP_SIZE, POWERUP_SIZE)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Self::size())
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; all spawn randomness flows through here
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Ticks since the round started
    pub time_ticks: u64,
    pub field: Field,
    /// Indexed by [`Side::index`]
    pub players: [Player; 2],
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<PowerUp>,
    /// Ticks accumulated toward the next enemy wave
    pub enemy_spawn_counter: u32,
    /// Ticks accumulated toward the next power-up drop
    pub powerup_spawn_counter: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh round in the [`GamePhase::Ready`] phase
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let field = Field::new(width, height);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            time_ticks: 0,
            field,
            players: [
                Player::new(Side::Left, &field),
                Player::new(Side::Right, &field),
            ],
            enemies: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            enemy_spawn_counter: 0,
            powerup_spawn_counter: 0,
            next_id: 1,
        }
    }

    /// Begin (or resume after game over + [`reset`](Self::reset)) the round
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.enemy_spawn_counter = 0;
        self.powerup_spawn_counter = 0;
        log::info!("round started (seed {})", self.seed);
    }

    /// Rebuild the initial state, keeping the field and seed
    pub fn reset(&mut self) {
        *self = Self::new(self.field.width, self.field.height, self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    /// Enemy spawn interval for the current elapsed time: starts at the
    /// base interval and shrinks by one tick per difficulty step, down to
    /// the minimum floor.
    pub fn enemy_spawn_interval(&self) -> u32 {
        let warmed = self.time_ticks.saturating_sub(SPAWN_WARMUP_TICKS);
        let difficulty = (warmed / DIFFICULTY_STEP_TICKS).min(u32::MAX as u64) as u32;
        BASE_ENEMY_SPAWN_INTERVAL
            .saturating_sub(difficulty)
            .max(MIN_ENEMY_SPAWN_INTERVAL)
    }
}
