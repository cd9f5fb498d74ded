/// Game loop and Menu → Playing → Lost → Menu state machine.
///
/// `Game` owns the whole simulation state. Callers own the clock: they call
/// `tick` at whatever cadence they like (60 Hz nominally) and hand the
/// returned events to the score store. All randomness comes through the
/// injected RNG so tests can run seeded.

use rand::Rng;

use crate::collision::overlaps;
use crate::config::GameConfig;
use crate::entities::{
    Enemy, GameState, GameStatus, Player, Projectile, RunState, SHIP_SIZE,
};
use crate::error::{ConfigError, StartError};
use crate::input::{apply_intent, InputController, InputEvent, Intent};
use crate::projectiles::{advance_enemy_lasers, advance_player_lasers, enemy_fire, tick_cooldown};
use crate::spawner::spawn_wave;

/// Something a tick did that collaborators may care about.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    RunStarted,
    WaveSpawned { level: u32, size: u32 },
    /// An enemy got past the bottom edge.
    LifeLost { lives: u32 },
    /// Enemy lasers (or rams) hit the player this tick.
    PlayerHit { health: i32 },
    /// The score passed the best known score. At most one per tick.
    ScoreIncreased { score: u32 },
    RunLost { final_score: u32, new_record: bool },
    ReturnedToMenu,
}

/// Read-only view handed to renderers.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub status: GameStatus,
    pub lives: u32,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    /// Whole seconds until a Lost game returns to the menu. Zero otherwise.
    pub menu_in: u32,
    pub width: f32,
    pub height: f32,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
}

impl<'a> Snapshot<'a> {
    /// Every laser in flight, player's first.
    pub fn projectiles(&self) -> impl Iterator<Item = &'a Projectile> + 'a {
        let player = self.player;
        let enemies = self.enemies;
        player
            .lasers
            .iter()
            .chain(enemies.iter().flat_map(|e| e.lasers.iter()))
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Idle state sitting at the menu.
pub fn init_state(config: &GameConfig, high_score: u32) -> GameState {
    GameState {
        status: GameStatus::Menu,
        run: fresh_run(config),
        player: Player::spawn(config.width, config.height, config.player_speed),
        enemies: Vec::new(),
        high_score,
        next_enemy_id: 0,
        width: config.width,
        height: config.height,
    }
}

fn fresh_run(config: &GameConfig) -> RunState {
    RunState::new(
        config.initial_lives,
        config.initial_wave_length,
        config.enemy_speed,
    )
}

#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    input: InputController,
    /// Best score known when the current run started.
    record_at_start: u32,
}

impl Game {
    /// Validate `config` and build a game sitting at the menu.
    pub fn new(config: GameConfig, high_score: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = init_state(&config, high_score);
        Ok(Self {
            config,
            state,
            input: InputController::new(),
            record_at_start: high_score,
        })
    }

    /// Resume from a prepared state. The state's playfield is replaced by the
    /// config's.
    pub fn from_state(config: GameConfig, mut state: GameState) -> Result<Self, ConfigError> {
        config.validate()?;
        state.width = config.width;
        state.height = config.height;
        let record_at_start = state.high_score;
        Ok(Self {
            config,
            state,
            input: InputController::new(),
            record_at_start,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Raw state access for test fixtures. Bypasses the invariants `tick` keeps.
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Update the best score known to the game, e.g. after a login.
    pub fn set_known_high_score(&mut self, score: u32) {
        self.state.high_score = score;
    }

    /// Replace the held controls.
    pub fn set_input(&mut self, intent: Intent) {
        self.input.set_intent(intent);
    }

    /// Queue a key event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let s = &self.state;
        Snapshot {
            status: s.status,
            lives: s.run.lives,
            score: s.run.score,
            level: s.run.level,
            high_score: s.high_score,
            menu_in: self.menu_countdown(),
            width: s.width,
            height: s.height,
            player: &s.player,
            enemies: &s.enemies,
        }
    }

    fn menu_countdown(&self) -> u32 {
        if self.state.status != GameStatus::Lost {
            return 0;
        }
        let left = self
            .config
            .lost_freeze_ticks
            .saturating_sub(self.state.run.freeze);
        left.div_ceil(self.config.tick_rate)
    }

    /// Reset the run and spawn the first wave. Only accepted from the menu by
    /// an authenticated player.
    pub fn start_run(
        &mut self,
        authenticated: bool,
        rng: &mut impl Rng,
    ) -> Result<Vec<GameEvent>, StartError> {
        if self.state.status != GameStatus::Menu {
            return Err(StartError::AlreadyRunning);
        }
        if !authenticated {
            return Err(StartError::NotAuthenticated);
        }

        let cfg = &self.config;
        self.state.run = fresh_run(cfg);
        self.state.player = Player::spawn(cfg.width, cfg.height, cfg.player_speed);
        self.state.enemies.clear();
        self.state.status = GameStatus::Playing;
        self.input.clear();
        self.record_at_start = self.state.high_score;

        let size = spawn_wave(&mut self.state, cfg.wave_growth, rng);
        log::info!("Run started (best so far: {})", self.state.high_score);
        Ok(vec![
            GameEvent::RunStarted,
            GameEvent::WaveSpawned {
                level: self.state.run.level,
                size,
            },
        ])
    }

    /// Advance one step. Does nothing at the menu.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Vec<GameEvent> {
        match self.state.status {
            GameStatus::Menu => Vec::new(),
            GameStatus::Playing => self.tick_playing(rng),
            GameStatus::Lost => self.tick_lost(),
        }
    }

    fn tick_playing(&mut self, rng: &mut impl Rng) -> Vec<GameEvent> {
        let cfg = &self.config;
        let state = &mut self.state;
        let mut events = Vec::new();

        // ── 1. Player input ──────────────────────────────────────────────────
        let intent = self.input.sample();
        apply_intent(
            &mut state.player,
            intent,
            state.width,
            state.height,
            cfg.fire_cooldown,
        );

        // ── 2. Enemies move, cool down and maybe fire ───────────────────────
        for enemy in state.enemies.iter_mut() {
            enemy.y += state.run.enemy_speed;
            tick_cooldown(&mut enemy.cooldown);
            if rng.gen_bool(cfg.enemy_fire_chance) {
                enemy_fire(enemy, state.height, cfg.fire_cooldown);
            }
        }

        // ── 3. Rams ─────────────────────────────────────────────────────────
        let mut player_hit = false;
        if let Some(damage) = cfg.ram_damage {
            let body = state.player.rect();
            let before = state.enemies.len();
            state.enemies.retain(|e| !overlaps(&e.rect(), &body));
            let rammed = before - state.enemies.len();
            if rammed > 0 {
                state.player.health -= damage * rammed as i32;
                player_hit = true;
            }
        }

        // ── 4. Enemies past the bottom cost a life each ─────────────────────
        let height = state.height;
        let before = state.enemies.len();
        state.enemies.retain(|e| e.y <= height);
        let escaped = (before - state.enemies.len()) as u32;
        if escaped > 0 {
            state.run.lives = state.run.lives.saturating_sub(escaped);
            events.push(GameEvent::LifeLost {
                lives: state.run.lives,
            });
        }

        // ── 5. Lasers ───────────────────────────────────────────────────────
        let kills = advance_player_lasers(
            &mut state.player,
            &mut state.enemies,
            cfg.projectile_speed,
            cfg.projectile_margin,
        );
        state.run.score += kills;
        if state.run.score > state.high_score {
            state.high_score = state.run.score;
            events.push(GameEvent::ScoreIncreased {
                score: state.run.score,
            });
        }

        let hits = advance_enemy_lasers(
            &mut state.enemies,
            &mut state.player,
            cfg.projectile_speed,
            height,
            cfg.projectile_margin,
            cfg.hit_damage,
        );
        if hits > 0 || player_hit {
            events.push(GameEvent::PlayerHit {
                health: state.player.health,
            });
        }

        // ── 6. Loss ─────────────────────────────────────────────────────────
        if state.run.lives == 0 || state.player.health <= 0 {
            state.status = GameStatus::Lost;
            state.run.freeze = 0;
            self.input.clear();
            let final_score = state.run.score;
            let new_record = final_score > self.record_at_start;
            log::info!(
                "Run lost at level {} with score {}",
                state.run.level,
                final_score
            );
            events.push(GameEvent::RunLost {
                final_score,
                new_record,
            });
            return events;
        }

        // ── 7. Next wave ────────────────────────────────────────────────────
        if state.enemies.is_empty() {
            let size = spawn_wave(state, cfg.wave_growth, rng);
            events.push(GameEvent::WaveSpawned {
                level: state.run.level,
                size,
            });
        }

        events
    }

    fn tick_lost(&mut self) -> Vec<GameEvent> {
        let run = &mut self.state.run;
        run.freeze += 1;
        if run.freeze >= self.config.lost_freeze_ticks {
            self.state.status = GameStatus::Menu;
            log::info!("Back to menu");
            return vec![GameEvent::ReturnedToMenu];
        }
        Vec::new()
    }
}

/// True when the player is fully inside the playfield.
pub fn player_in_bounds(state: &GameState) -> bool {
    let p = &state.player;
    p.x >= 0.0
        && p.y >= 0.0
        && p.x <= state.width - SHIP_SIZE
        && p.y <= state.height - SHIP_SIZE
}
