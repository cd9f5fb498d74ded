/// Game tuning and playfield configuration.
///
/// Every field has a default tuned for the classic 750x750 game, so a JSON file only
/// needs to name the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::SHIP_SIZE;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in world units.
    pub width: f32,
    /// Playfield height in world units.
    pub height: f32,
    /// Downward enemy movement per tick. Constant for the whole run.
    pub enemy_speed: f32,
    /// Vertical laser movement per tick (applied upward for the player).
    pub projectile_speed: f32,
    /// Player movement per tick along each held axis.
    pub player_speed: f32,
    /// Ticks between two shots of the same ship.
    pub fire_cooldown: u32,
    /// Per-tick probability that an enemy tries to fire.
    pub enemy_fire_chance: f64,
    /// Ticks the Lost overlay stays up before returning to the menu.
    pub lost_freeze_ticks: u32,
    /// Distance past the playfield edge a laser travels before it expires.
    pub projectile_margin: f32,
    pub initial_lives: u32,
    /// Wave size before the first wave; the first wave adds `wave_growth`.
    pub initial_wave_length: u32,
    pub wave_growth: u32,
    /// Health lost per enemy laser hit.
    pub hit_damage: i32,
    /// Health lost when an enemy rams the player. `None` disables ramming.
    pub ram_damage: Option<i32>,
    /// Nominal ticks per second.
    pub tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 750.0,
            height: 750.0,
            enemy_speed: 1.0,
            projectile_speed: 5.0,
            player_speed: 5.0,
            fire_cooldown: 30,
            enemy_fire_chance: 0.008,
            lost_freeze_ticks: 5 * 60,
            projectile_margin: 40.0,
            initial_lives: 5,
            initial_wave_length: 5,
            wave_growth: 5,
            hit_damage: 10,
            ram_damage: None,
            tick_rate: 60,
        }
    }
}

impl GameConfig {
    /// Default tuning on a custom playfield.
    pub fn with_playfield(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Load a config file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let playfield_ok = |v: f32| v.is_finite() && v > SHIP_SIZE;
        if !playfield_ok(self.width) || !playfield_ok(self.height) {
            return Err(ConfigError::Playfield {
                width: self.width,
                height: self.height,
                min: SHIP_SIZE,
            });
        }

        for (field, value) in [
            ("enemy_speed", self.enemy_speed),
            ("projectile_speed", self.projectile_speed),
            ("player_speed", self.player_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(self.projectile_margin.is_finite() && self.projectile_margin >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "projectile_margin",
                value: self.projectile_margin,
            });
        }

        for (field, value) in [
            ("fire_cooldown", self.fire_cooldown),
            ("lost_freeze_ticks", self.lost_freeze_ticks),
            ("initial_lives", self.initial_lives),
            ("wave_growth", self.wave_growth),
            ("tick_rate", self.tick_rate),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }

        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return Err(ConfigError::FireChance(self.enemy_fire_chance));
        }
        Ok(())
    }
}
