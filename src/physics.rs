//! Rigid-body world
//!
//! Integration plus contact detection, nothing more. Bodies carry a force
//! accumulator, mass, damping, and one collision shape; `step` integrates
//! every body and then records begin-contact events for pairs that started
//! overlapping during that step. Only pairs with a sensor participant are
//! reported, and there is no contact response: the host decides what a
//! contact means.

use glam::Vec2;

/// Handle to a body in the world. Never reused, so a stale handle can never
/// alias a live body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

/// Collision shape, centered on its body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl Shape {
    /// Radius of the smallest circle covering the shape
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Box { width, height } => Vec2::new(width, height).length() * 0.5,
            Shape::Circle { radius } => radius,
        }
    }
}

/// Initial parameters for [`World::add_body`]
#[derive(Debug, Clone, Copy)]
pub struct BodyDef {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub angular_velocity: f32,
    pub mass: f32,
    pub damping: f32,
    pub angular_damping: f32,
    pub shape: Shape,
    /// Sensor shapes report contacts; pairs without one go undetected
    pub sensor: bool,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            mass: 1.0,
            damping: 0.0,
            angular_damping: 0.0,
            shape: Shape::Circle { radius: 1.0 },
            sensor: false,
        }
    }
}

/// A rigid body
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub angular_velocity: f32,
    /// Force accumulator, zeroed after each integration step
    pub force: Vec2,
    pub mass: f32,
    pub damping: f32,
    pub angular_damping: f32,
    pub shape: Shape,
    pub sensor: bool,
}

impl Body {
    pub fn id(&self) -> BodyId {
        self.id
    }
}

/// Begin-contact event between two bodies. Slot order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub body_a: BodyId,
    pub body_b: BodyId,
}

impl ContactEvent {
    pub fn involves(&self, id: BodyId) -> bool {
        self.body_a == id || self.body_b == id
    }

    /// The opposite slot when `id` fills one of them
    pub fn other(&self, id: BodyId) -> Option<BodyId> {
        if self.body_a == id {
            Some(self.body_b)
        } else if self.body_b == id {
            Some(self.body_a)
        } else {
            None
        }
    }
}

/// The physics world: bodies in insertion order plus contact bookkeeping
#[derive(Debug, Default)]
pub struct World {
    bodies: Vec<Body>,
    next_id: u64,
    touching: Vec<(BodyId, BodyId)>,
    contacts: Vec<ContactEvent>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_body(&mut self, def: BodyDef) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            position: def.position,
            velocity: def.velocity,
            angle: def.angle,
            angular_velocity: def.angular_velocity,
            force: Vec2::ZERO,
            mass: def.mass,
            damping: def.damping,
            angular_damping: def.angular_damping,
            shape: def.shape,
            sensor: def.sensor,
        });
        id
    }

    /// Remove a body. Stale or duplicate handles are a silent no-op; the
    /// return value reports whether anything was removed.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        let Some(index) = self.bodies.iter().position(|body| body.id == id) else {
            return false;
        };
        self.bodies.remove(index);
        self.touching.retain(|&(a, b)| a != id && b != id);
        true
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|body| body.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Advance the simulation by `dt` seconds: accumulated forces become
    /// velocity, damping applies as `(1 - d)^dt`, positions and angles
    /// integrate, and force accumulators reset. Contact events recorded
    /// here are complete before this returns.
    pub fn step(&mut self, dt: f32) {
        for body in &mut self.bodies {
            if body.mass > 0.0 {
                body.velocity += body.force * (dt / body.mass);
            }
            if body.damping > 0.0 {
                body.velocity *= (1.0 - body.damping).powf(dt);
            }
            if body.angular_damping > 0.0 {
                body.angular_velocity *= (1.0 - body.angular_damping).powf(dt);
            }
            body.position += body.velocity * dt;
            body.angle += body.angular_velocity * dt;
            body.force = Vec2::ZERO;
        }
        self.detect_contacts();
    }

    /// Take every contact event recorded since the last drain
    pub fn drain_contacts(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.contacts)
    }

    fn detect_contacts(&mut self) {
        let mut now_touching = Vec::new();

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let a = &self.bodies[i];
                let b = &self.bodies[j];
                if !a.sensor && !b.sensor {
                    continue;
                }
                if !overlaps(a, b) {
                    continue;
                }
                // Bodies stay id-sorted, so (a, b) pairs are already
                // normalized across steps.
                let pair = (a.id, b.id);
                if !self.touching.contains(&pair) {
                    self.contacts.push(ContactEvent {
                        body_a: a.id,
                        body_b: b.id,
                    });
                }
                now_touching.push(pair);
            }
        }

        self.touching = now_touching;
    }
}

fn overlaps(a: &Body, b: &Body) -> bool {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circles_overlap(a.position, ra, b.position, rb)
        }
        (Shape::Box { width, height }, Shape::Circle { radius }) => {
            box_circle_overlap(a.position, a.angle, width, height, b.position, radius)
        }
        (Shape::Circle { radius }, Shape::Box { width, height }) => {
            box_circle_overlap(b.position, b.angle, width, height, a.position, radius)
        }
        // Box pairs fall back to bounding circles; the game never fields
        // two boxes.
        (Shape::Box { .. }, Shape::Box { .. }) => circles_overlap(
            a.position,
            a.shape.bounding_radius(),
            b.position,
            b.shape.bounding_radius(),
        ),
    }
}

fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// Rotated-box vs circle: bring the circle centre into the box's local
/// frame, clamp to the half-extents, and compare the residual distance
/// against the radius.
fn box_circle_overlap(
    center: Vec2,
    angle: f32,
    width: f32,
    height: f32,
    circle: Vec2,
    radius: f32,
) -> bool {
    let (sin, cos) = angle.sin_cos();
    let d = circle - center;
    let local = Vec2::new(cos * d.x + sin * d.y, cos * d.y - sin * d.x);
    let half = Vec2::new(width, height) * 0.5;
    let clamped = local.clamp(-half, half);
    local.distance_squared(clamped) <= radius * radius
}
