//! Astro Duel - a two-player arcade space duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (game loop, entities, enemy spawner)
//! - `physics`: Rigid-body world (integration, sensor contacts)
//! - `scene`: Stage of visual nodes consumed by an external renderer
//! - `input`: Level-triggered keyboard state
//! - `score`: Per-player score counters
//! - `audio`: Named sound cues with sprite clip offsets
//! - `config`: Tunable game configuration

pub mod audio;
pub mod config;
pub mod input;
pub mod physics;
pub mod scene;
pub mod score;
pub mod sim;

pub use config::{GameConfig, KeyBindings, Viewport};
pub use sim::{Game, GameEvent, GamePhase};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 1920.0;
    pub const VIEWPORT_HEIGHT: f32 = 1080.0;

    /// Thrust force magnitude; also scales enemy spawn velocities
    pub const SPEED: f32 = 1000.0;
    /// Ship turn rate (radians/sec)
    pub const TURN_SPEED: f32 = 2.0;

    /// Ticks between enemy spawns (1000 ms at the fixed timestep)
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;

    /// Ship collision box
    pub const SHIP_WIDTH: f32 = 52.0;
    pub const SHIP_HEIGHT: f32 = 69.0;
    /// Enemy sensor circle radius
    pub const ENEMY_RADIUS: f32 = 20.0;

    /// Backdrop
    pub const STAR_COUNT: u32 = 1500;
    pub const WALL_THICKNESS: f32 = 10.0;

    /// Default key codes (A / D / W)
    pub const KEY_TURN_LEFT: u32 = 65;
    pub const KEY_TURN_RIGHT: u32 = 68;
    pub const KEY_THRUST: u32 = 87;

    /// Host-side mixing levels
    pub const SFX_VOLUME: f32 = 1.0;
    pub const MUSIC_VOLUME: f32 = 0.7;
}

/// Unit vector along a ship's thrust direction (`angle + 90°`)
#[inline]
pub fn thrust_direction(angle: f32) -> Vec2 {
    let theta = angle + std::f32::consts::FRAC_PI_2;
    Vec2::new(theta.cos(), theta.sin())
}
