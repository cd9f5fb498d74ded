#![allow(dead_code)]

use junk_food_attack::compute::init_state;
use junk_food_attack::entities::{Enemy, EnemyKind, GameState, GameStatus};
use junk_food_attack::{Game, GameConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Default tuning with enemy fire switched off so ticks are deterministic.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        enemy_fire_chance: 0.0,
        ..GameConfig::default()
    }
}

/// An enemy so far above the playfield it never matters.
pub fn parked(id: u32) -> Enemy {
    Enemy::new(id, 0.0, -50_000.0, EnemyKind::Burger)
}

/// Mid-run state on level 1 with one parked enemy and the player at (300, 630).
pub fn playing_state(config: &GameConfig) -> GameState {
    let mut s = init_state(config, 0);
    s.status = GameStatus::Playing;
    s.run.level = 1;
    s.run.wave_length = 10;
    s.enemies.push(parked(999));
    s
}

pub fn playing_game(config: GameConfig) -> Game {
    let state = playing_state(&config);
    Game::from_state(config, state).unwrap()
}
