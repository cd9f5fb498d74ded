mod common;

use std::collections::HashSet;

use common::{quiet_config, seeded_rng};
use junk_food_attack::compute::init_state;
use junk_food_attack::spawner::{spawn_wave, SPAWN_Y_MAX, SPAWN_Y_MIN};
use junk_food_attack::GameConfig;

#[test]
fn first_wave_has_ten_enemies() {
    let mut s = init_state(&quiet_config(), 0);
    let size = spawn_wave(&mut s, 5, &mut seeded_rng());
    assert_eq!(size, 10);
    assert_eq!(s.enemies.len(), 10);
    assert_eq!(s.run.level, 1);
    assert_eq!(s.run.wave_length, 10);
}

#[test]
fn enemies_spawn_above_playfield_within_width() {
    let mut s = init_state(&quiet_config(), 0);
    spawn_wave(&mut s, 5, &mut seeded_rng());
    for e in &s.enemies {
        assert!(e.y < -100.0 && e.y >= -1600.0, "y = {}", e.y);
        assert!(e.x >= 0.0 && e.x <= 700.0, "x = {}", e.x);
        assert_eq!(e.cooldown, 0);
        assert!(e.lasers.is_empty());
    }
    assert_eq!(SPAWN_Y_MAX, -100.0);
    assert_eq!(SPAWN_Y_MIN, -1600.0);
}

#[test]
fn each_wave_grows_by_five() {
    let mut s = init_state(&quiet_config(), 0);
    let mut rng = seeded_rng();
    let mut sizes = Vec::new();
    for _ in 0..4 {
        s.enemies.clear();
        sizes.push(spawn_wave(&mut s, 5, &mut rng));
    }
    assert_eq!(sizes, vec![10, 15, 20, 25]);
    assert_eq!(s.run.level, 4);
}

#[test]
fn enemy_ids_are_unique_across_waves() {
    let mut s = init_state(&quiet_config(), 0);
    let mut rng = seeded_rng();
    let mut ids = HashSet::new();
    for _ in 0..3 {
        s.enemies.clear();
        spawn_wave(&mut s, 5, &mut rng);
        for e in &s.enemies {
            assert!(ids.insert(e.id), "duplicate id {}", e.id);
        }
    }
}

#[test]
fn all_kinds_appear() {
    let mut s = init_state(&quiet_config(), 0);
    let mut rng = seeded_rng();
    let mut kinds = HashSet::new();
    for _ in 0..3 {
        s.enemies.clear();
        spawn_wave(&mut s, 5, &mut rng);
        kinds.extend(s.enemies.iter().map(|e| e.kind));
    }
    assert_eq!(kinds.len(), 3);
}

#[test]
fn spawn_respects_playfield_width() {
    let config = GameConfig::with_playfield(120.0, 400.0);
    let mut s = init_state(&config, 0);
    spawn_wave(&mut s, 5, &mut seeded_rng());
    assert!(s.enemies.iter().all(|e| e.x >= 0.0 && e.x < 70.0));
}
