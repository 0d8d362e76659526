//! Enemy spawner
//!
//! One enemy per fixed interval, forever; there is no cap on live enemies.
//! Each spawn draws position, velocity, and spin from the simulation RNG
//! and registers a sensor body plus a stage node, returning the paired
//! record.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::physics::{BodyDef, Shape, World};
use crate::scene::{Node, NodeKind, Stage};
use crate::sim::entity::Enemy;

/// Tick-driven spawn timer plus enemy factory
#[derive(Debug, Clone)]
pub struct EnemySpawner {
    interval: u32,
    countdown: u32,
}

impl EnemySpawner {
    /// An interval of zero spawns every tick
    pub fn new(interval_ticks: u32) -> Self {
        Self {
            interval: interval_ticks,
            countdown: interval_ticks,
        }
    }

    /// Restart the countdown from a full interval
    pub fn arm(&mut self) {
        self.countdown = self.interval;
    }

    /// Advance the timer one tick, spawning when it lapses
    pub fn tick(
        &mut self,
        world: &mut World,
        stage: &mut Stage,
        rng: &mut Pcg32,
        config: &GameConfig,
    ) -> Option<Enemy> {
        if self.countdown > 0 {
            self.countdown -= 1;
        }
        if self.countdown > 0 {
            return None;
        }
        self.countdown = self.interval;
        Some(spawn_enemy(world, stage, rng, config))
    }
}

fn spawn_enemy(
    world: &mut World,
    stage: &mut Stage,
    rng: &mut Pcg32,
    config: &GameConfig,
) -> Enemy {
    // Whole-unit spawn coordinates, anywhere in the viewport
    let position = Vec2::new(
        (rng.random::<f32>() * config.viewport.width).round(),
        (rng.random::<f32>() * config.viewport.height).round(),
    );
    let velocity = Vec2::new(
        (rng.random::<f32>() - 0.5) * config.speed,
        (rng.random::<f32>() - 0.5) * config.speed,
    );
    let angular_velocity = (rng.random::<f32>() - 0.5) * config.speed;

    let body = world.add_body(BodyDef {
        position,
        velocity,
        angular_velocity,
        mass: 1.0,
        shape: Shape::Circle {
            radius: config.enemy_radius,
        },
        sensor: true,
        ..Default::default()
    });
    let node = stage.add(Node::at(NodeKind::Enemy, position.x, position.y));

    Enemy { body, node }
}
