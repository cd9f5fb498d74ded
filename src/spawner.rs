/// Wave generation.

use rand::Rng;

use crate::entities::{Enemy, EnemyKind, GameState, SHIP_SIZE};

/// Highest spawn row (exclusive): every new enemy starts above the playfield.
pub const SPAWN_Y_MAX: f32 = -100.0;
/// Lowest spawn row.
pub const SPAWN_Y_MIN: f32 = -1600.0;

/// Start the next wave: bump the level, grow the wave by `growth`, and place
/// that many enemies at random positions above the visible area.
///
/// Only called once the previous wave is gone. Returns the new wave size.
pub fn spawn_wave(state: &mut GameState, growth: u32, rng: &mut impl Rng) -> u32 {
    debug_assert!(state.enemies.is_empty(), "wave spawned over live enemies");

    state.run.level += 1;
    state.run.wave_length += growth;

    let max_x = state.width - SHIP_SIZE;
    let count = state.run.wave_length;
    state.enemies.reserve(count as usize);

    for _ in 0..count {
        let x = rng.gen_range(0.0..max_x);
        let y = rng.gen_range(SPAWN_Y_MIN..SPAWN_Y_MAX);
        let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];
        let id = state.next_enemy_id;
        state.next_enemy_id = state.next_enemy_id.wrapping_add(1);
        state.enemies.push(Enemy::new(id, x, y, kind));
    }

    log::debug!("Wave {} spawned with {} enemies", state.run.level, count);
    count
}
