//! Game configuration
//!
//! Everything tunable lives here: viewport bounds, key bindings, speeds,
//! spawn cadence, and which player slot this process scores into. Hosts can
//! load overrides from JSON; the defaults are the stock arcade tuning.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Fixed logical viewport. Immutable for the process lifetime; doubles as
/// the wrap boundary for the ship and the cull boundary for enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::VIEWPORT_WIDTH,
            height: consts::VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a point lies inside `[0, width] x [0, height]`, edges
    /// included. Enemies are culled the tick this turns false.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Viewport centre rounded to whole units (ship spawn point)
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).round(), (self.height / 2.0).round())
    }
}

/// Key-code-to-action bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Turn counter-clockwise
    pub turn_left: u32,
    /// Turn clockwise
    pub turn_right: u32,
    /// Apply forward thrust
    pub thrust: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            turn_left: consts::KEY_TURN_LEFT,
            turn_right: consts::KEY_TURN_RIGHT,
            thrust: consts::KEY_THRUST,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Simulation coordinate space
    pub viewport: Viewport,
    /// Which score slot this process's collisions credit (0 or 1)
    pub player: usize,
    /// Keyboard bindings for the three actions
    pub bindings: KeyBindings,

    // === Movement ===
    /// Thrust force magnitude; also scales enemy spawn velocities
    pub speed: f32,
    /// Ship turn rate (radians/sec)
    pub turn_speed: f32,

    // === Enemies ===
    /// Ticks between spawns (60 = one per second at the fixed timestep)
    pub spawn_interval_ticks: u32,
    /// Enemy sensor circle radius
    pub enemy_radius: f32,

    // === Ship ===
    /// Ship collision box (width, height)
    pub ship_size: Vec2,

    // === Backdrop ===
    /// Stars drawn at start
    pub star_count: u32,
    /// Boundary frame thickness
    pub wall_thickness: f32,

    // === Audio ===
    /// Sound effect volume (0.0 - 1.0), carried for the host mixer
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0), carried for the host mixer
    pub music_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            player: 0,
            bindings: KeyBindings::default(),

            speed: consts::SPEED,
            turn_speed: consts::TURN_SPEED,

            spawn_interval_ticks: consts::SPAWN_INTERVAL_TICKS,
            enemy_radius: consts::ENEMY_RADIUS,

            ship_size: Vec2::new(consts::SHIP_WIDTH, consts::SHIP_HEIGHT),

            star_count: consts::STAR_COUNT,
            wall_thickness: consts::WALL_THICKNESS,

            sfx_volume: consts::SFX_VOLUME,
            music_volume: consts::MUSIC_VOLUME,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
