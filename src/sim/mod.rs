//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod entity;
pub mod game;
pub mod spawner;

pub use entity::{Enemy, RemovalQueue, RemovalReason, Ship};
pub use game::{Game, GameEvent, GamePhase};
pub use spawner::EnemySpawner;
