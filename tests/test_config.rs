use std::io::Write;

use junk_food_attack::{ConfigError, Game, GameConfig};
use tempfile::NamedTempFile;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_describe_classic_game() {
    let c = GameConfig::default();
    assert_eq!((c.width, c.height), (750.0, 750.0));
    assert_eq!(c.enemy_speed, 1.0);
    assert_eq!(c.projectile_speed, 5.0);
    assert_eq!(c.player_speed, 5.0);
    assert_eq!(c.fire_cooldown, 30);
    assert_eq!(c.enemy_fire_chance, 0.008);
    assert_eq!(c.lost_freeze_ticks, 300);
    assert_eq!(c.initial_lives, 5);
    assert_eq!(c.initial_wave_length, 5);
    assert_eq!(c.wave_growth, 5);
    assert_eq!(c.hit_damage, 10);
    assert_eq!(c.ram_damage, None);
    assert!(c.validate().is_ok());
}

// ── Validation ────────────────────────────────────────────────────────────────

#[test]
fn rejects_playfield_smaller_than_a_ship() {
    for (w, h) in [(-10.0, 750.0), (750.0, 0.0), (50.0, 750.0), (f32::NAN, 750.0)] {
        let err = GameConfig::with_playfield(w, h).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Playfield { .. }), "{w}x{h}: {err}");
    }
}

#[test]
fn rejects_out_of_range_fire_chance() {
    let c = GameConfig {
        enemy_fire_chance: 1.5,
        ..GameConfig::default()
    };
    assert!(matches!(c.validate(), Err(ConfigError::FireChance(_))));
}

#[test]
fn rejects_zero_cooldown() {
    let c = GameConfig {
        fire_cooldown: 0,
        ..GameConfig::default()
    };
    match c.validate() {
        Err(ConfigError::Zero { field }) => assert_eq!(field, "fire_cooldown"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn rejects_non_positive_speed() {
    let c = GameConfig {
        enemy_speed: 0.0,
        ..GameConfig::default()
    };
    assert!(matches!(
        c.validate(),
        Err(ConfigError::NonPositive {
            field: "enemy_speed",
            ..
        })
    ));
}

#[test]
fn game_new_rejects_invalid_config() {
    let result = Game::new(GameConfig::with_playfield(-1.0, -1.0), 0);
    assert!(matches!(result, Err(ConfigError::Playfield { .. })));
}

// ── JSON files ────────────────────────────────────────────────────────────────

#[test]
fn partial_file_overrides_defaults() {
    let file = write_config(r#"{ "width": 400, "height": 900, "ram_damage": 25 }"#);
    let c = GameConfig::from_json_file(file.path()).unwrap();
    assert_eq!((c.width, c.height), (400.0, 900.0));
    assert_eq!(c.ram_damage, Some(25));
    assert_eq!(c.fire_cooldown, 30);
}

#[test]
fn invalid_values_in_file_are_rejected() {
    let file = write_config(r#"{ "initial_lives": 0 }"#);
    let err = GameConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Zero { field: "initial_lives" }));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let file = write_config("{ width: ");
    let err = GameConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("nope.json"));
}
