//! Entity records and the per-tick removal queue
//!
//! An entity pairs one physics body with one visual node; the two are
//! created together and must die together. The removal queue collects
//! doomed bodies during a tick and is drained exactly once at its end.

use crate::physics::BodyId;
use crate::scene::NodeId;

/// The player ship. Lives for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    pub body: BodyId,
    pub node: NodeId,
}

/// A drifting enemy orb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub body: BodyId,
    pub node: NodeId,
}

/// Why a body was queued for removal. Decides whether the drain owes a
/// sound cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Touched the ship: scores and booms
    Collision,
    /// Drifted out of the viewport: silent cull
    OffScreen,
}

/// Bodies doomed this tick. Transient: filled during collision processing
/// and culling, drained once, never carried across ticks.
#[derive(Debug, Default, Clone)]
pub struct RemovalQueue {
    pending: Vec<(BodyId, RemovalReason)>,
}

impl RemovalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a body. Duplicates are ignored; the first reason wins.
    pub fn enqueue(&mut self, body: BodyId, reason: RemovalReason) {
        if self.contains(body) {
            return;
        }
        self.pending.push((body, reason));
    }

    pub fn contains(&self, body: BodyId) -> bool {
        self.pending.iter().any(|(queued, _)| *queued == body)
    }

    /// Take everything queued, leaving the queue empty
    pub fn drain(&mut self) -> Vec<(BodyId, RemovalReason)> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
