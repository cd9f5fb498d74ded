/// Game entity types: plain data, no simulation logic.

use crate::collision::Rect;

/// Ships (player and enemies) are square sprites of this side length.
pub const SHIP_SIZE: f32 = 50.0;
pub const MAX_HEALTH: i32 = 100;

// ── Kinds & lookup tables ─────────────────────────────────────────────────────

/// Enemy flavour. Picks the sprite and the laser colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Red.
    Burger,
    /// Green.
    Fries,
    /// Blue.
    Soda,
}

/// Sprite handle for renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Burger,
    Fries,
    Soda,
}

/// Laser visual. Only its size matters to the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    Yellow,
    Red,
    Green,
    Blue,
}

/// Sprite and laser per enemy kind, indexed by `EnemyKind as usize`.
const ENEMY_TABLE: [(Sprite, ProjectileKind); 3] = [
    (Sprite::Burger, ProjectileKind::Red),
    (Sprite::Fries, ProjectileKind::Green),
    (Sprite::Soda, ProjectileKind::Blue),
];

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Burger, EnemyKind::Fries, EnemyKind::Soda];

    pub fn sprite(self) -> Sprite {
        ENEMY_TABLE[self as usize].0
    }

    pub fn laser(self) -> ProjectileKind {
        ENEMY_TABLE[self as usize].1
    }
}

impl ProjectileKind {
    /// Width and height of the laser image.
    pub fn size(self) -> (f32, f32) {
        match self {
            ProjectileKind::Yellow => (10.0, 30.0),
            ProjectileKind::Red | ProjectileKind::Green | ProjectileKind::Blue => (10.0, 25.0),
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

pub type EnemyId = u32;

/// Who fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy(EnemyId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub side: Side,
    pub kind: ProjectileKind,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        let (w, h) = self.kind.size();
        Rect::new(self.x, self.y, w, h)
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Starts at `MAX_HEALTH`. Not clamped: hits may drive it below zero.
    pub health: i32,
    pub speed: f32,
    pub cooldown: u32,
    pub lasers: Vec<Projectile>,
}

impl Player {
    /// Fresh player near the bottom of a `width` x `height` playfield.
    pub fn spawn(width: f32, height: f32, speed: f32) -> Self {
        Self {
            x: (width * 0.4).min(width - SHIP_SIZE),
            y: (height - 120.0).clamp(0.0, height - SHIP_SIZE),
            health: MAX_HEALTH,
            speed,
            cooldown: 0,
            lasers: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, SHIP_SIZE, SHIP_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    pub cooldown: u32,
    pub lasers: Vec<Projectile>,
}

impl Enemy {
    pub fn new(id: EnemyId, x: f32, y: f32, kind: EnemyKind) -> Self {
        Self {
            id,
            x,
            y,
            kind,
            cooldown: 0,
            lasers: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, SHIP_SIZE, SHIP_SIZE)
    }
}

// ── Run & master state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    Lost,
}

/// Per-run counters, reset by every run start.
#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    /// Number of waves spawned so far.
    pub level: u32,
    /// Size of the most recent wave.
    pub wave_length: u32,
    pub enemy_speed: f32,
    pub lives: u32,
    pub score: u32,
    /// Ticks spent in `Lost`.
    pub freeze: u32,
}

impl RunState {
    pub fn new(lives: u32, wave_length: u32, enemy_speed: f32) -> Self {
        Self {
            level: 0,
            wave_length,
            enemy_speed,
            lives,
            score: 0,
            freeze: 0,
        }
    }
}

/// The entire simulation state, owned by the game loop.
#[derive(Clone, Debug)]
pub struct GameState {
    pub status: GameStatus,
    pub run: RunState,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Best score known to the game; supplied from outside and raised live.
    pub high_score: u32,
    pub next_enemy_id: EnemyId,
    pub width: f32,
    pub height: f32,
}
