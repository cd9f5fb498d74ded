//! Junk Food Attack - a vertical arcade shooter.
//!
//! The library holds the simulation core and the seams to its collaborators:
//! - `entities`: plain data for the player, enemies, projectiles and run state
//! - `collision`: axis-aligned rectangle overlap
//! - `projectiles`: firing, advancing and resolving lasers
//! - `spawner`: wave generation
//! - `input`: intent sampling and player movement
//! - `compute`: the game loop and Menu/Playing/Lost state machine
//! - `collaborators`: renderer, identity provider and score store interfaces
//! - `display`: terminal renderer

pub mod collaborators;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod projectiles;
pub mod spawner;

pub use compute::{Game, GameEvent, Snapshot};
pub use config::GameConfig;
pub use error::{AuthError, ConfigError, StartError, StoreError};
