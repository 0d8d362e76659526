//! Game loop controller
//!
//! Owns the ship, the live enemies, and the fixed-tick update: input turns
//! into forces, the world steps by exactly one timestep, contacts turn into
//! score and removals, transforms sync to the stage, and the ship wraps
//! toroidally. Everything the host must act on (score updates, sound
//! requests, redraw) leaves through drained [`GameEvent`]s.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::SoundCue;
use crate::config::GameConfig;
use crate::consts::SIM_DT;
use crate::input::InputState;
use crate::physics::{BodyDef, Shape, World};
use crate::scene::{Node, NodeKind, Stage};
use crate::score::{PLAYER_COUNT, ScoreBoard};
use crate::sim::entity::{Enemy, RemovalQueue, RemovalReason, Ship};
use crate::sim::spawner::EnemySpawner;
use crate::thrust_direction;

/// Controller state: Idle until `start`, then Running until teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
}

/// Something the host must act on, drained after each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A player's counter changed; forward to the score display
    ScoreChanged { player: usize, value: u32 },
    /// Fire-and-forget cue for the audio engine
    Sound(SoundCue),
    /// Present the stage
    RedrawRequested,
}

/// The simulation: one ship, drifting enemies, two score counters
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    phase: GamePhase,
    world: World,
    stage: Stage,
    backdrop: Stage,
    input: InputState,
    score: ScoreBoard,
    rng: Pcg32,
    ship: Option<Ship>,
    enemies: Vec<Enemy>,
    removals: RemovalQueue,
    spawner: EnemySpawner,
    events: Vec<GameEvent>,
    tick_count: u64,
}

impl Game {
    /// # Panics
    ///
    /// Panics if `config.player` is not a valid player slot.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        assert!(
            config.player < PLAYER_COUNT,
            "player slot {} out of range (0..{PLAYER_COUNT})",
            config.player
        );

        let spawner = EnemySpawner::new(config.spawn_interval_ticks);
        let input = InputState::new(config.bindings);

        Self {
            config,
            phase: GamePhase::Idle,
            world: World::new(),
            stage: Stage::new(),
            backdrop: Stage::new(),
            input,
            score: ScoreBoard::new(),
            rng: Pcg32::seed_from_u64(seed),
            ship: None,
            enemies: Vec::new(),
            removals: RemovalQueue::new(),
            spawner,
            events: Vec::new(),
            tick_count: 0,
        }
    }

    /// One-time setup: backdrop, ship, armed spawner, zeroed score
    /// displays. Starting while already Running is a logged no-op.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Running {
            log::warn!("start() called while already running");
            return;
        }

        self.draw_backdrop();
        self.create_ship();
        self.spawner.arm();

        for player in 0..PLAYER_COUNT {
            self.events.push(GameEvent::ScoreChanged { player, value: 0 });
        }

        self.phase = GamePhase::Running;
        log::info!(
            "game started: viewport {}x{}, scoring for player {}",
            self.config.viewport.width,
            self.config.viewport.height,
            self.config.player
        );
    }

    /// Route a key event into the input state. Unmapped codes are ignored.
    pub fn set_key(&mut self, code: u32, pressed: bool) {
        self.input.set_key(code, pressed);
    }

    /// Advance the simulation by exactly one fixed timestep. Ticks before
    /// `start` are ignored.
    pub fn tick(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }

        if let Some(enemy) =
            self.spawner
                .tick(&mut self.world, &mut self.stage, &mut self.rng, &self.config)
        {
            self.enemies.push(enemy);
            log::debug!("enemy spawned ({} live)", self.enemies.len());
        }

        self.apply_input();
        self.world.step(SIM_DT);
        self.react_to_contacts();
        self.sync_ship();
        self.sync_and_cull_enemies();
        self.drain_removals();
        self.events.push(GameEvent::RedrawRequested);
        self.tick_count += 1;
    }

    /// Take everything the host must act on since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Both score totals in player order
    pub fn scores(&self) -> [u32; PLAYER_COUNT] {
        self.score.totals()
    }

    /// Moving part of the scene (ship and enemies)
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Static part of the scene (stars and boundary frame)
    pub fn backdrop(&self) -> &Stage {
        &self.backdrop
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Current ship position, once the ship exists
    pub fn ship_position(&self) -> Option<Vec2> {
        let ship = self.ship?;
        Some(self.world.body(ship.body)?.position)
    }

    fn draw_backdrop(&mut self) {
        let viewport = self.config.viewport;

        for _ in 0..self.config.star_count {
            let x = (self.rng.random::<f32>() * viewport.width).round();
            let y = (self.rng.random::<f32>() * viewport.height).round();
            let radius = (self.rng.random::<f32>() * 2.0).ceil();
            let alpha = (self.rng.random::<f32>() + 0.25).min(1.0);
            self.backdrop
                .add(Node::at(NodeKind::Star { radius, alpha }, x, y));
        }

        // Frame hugging the viewport edges, corners owned by top and bottom
        let t = self.config.wall_thickness;
        let walls = [
            (0.0, 0.0, viewport.width, t),
            (viewport.width - t, t, t, viewport.height - 2.0 * t),
            (0.0, viewport.height - t, viewport.width, t),
            (0.0, t, t, viewport.height - 2.0 * t),
        ];
        for (x, y, width, height) in walls {
            self.backdrop
                .add(Node::at(NodeKind::Wall { width, height }, x, y));
        }
    }

    fn create_ship(&mut self) {
        if self.ship.is_some() {
            return;
        }

        let size = self.config.ship_size;
        let position = self.config.viewport.center();
        let body = self.world.add_body(BodyDef {
            position,
            mass: 1.0,
            shape: Shape::Box {
                width: size.x,
                height: size.y,
            },
            ..Default::default()
        });
        let node = self
            .stage
            .add(Node::at(NodeKind::Ship, position.x, position.y));

        self.ship = Some(Ship { body, node });
    }

    /// Held input becomes angular velocity and accumulated thrust force
    fn apply_input(&mut self) {
        let Some(ship) = self.ship else { return };
        let turn_speed = self.config.turn_speed;
        let speed = self.config.speed;
        let turn = self.input.turn_direction();
        let thrusting = self.input.thrust();

        let Some(body) = self.world.body_mut(ship.body) else {
            return;
        };
        body.angular_velocity = turn * turn_speed;
        if thrusting {
            body.force += thrust_direction(body.angle) * speed;
        }
    }

    /// Collision reactor: every ship contact scores one point for the
    /// local player and dooms the other body. Non-ship contacts are
    /// ignored.
    fn react_to_contacts(&mut self) {
        let Some(ship) = self.ship else { return };

        for event in self.world.drain_contacts() {
            // The ship may sit in either event slot
            let Some(other) = event.other(ship.body) else {
                continue;
            };
            self.removals.enqueue(other, RemovalReason::Collision);

            let player = self.config.player;
            let value = self
                .score
                .increment(player)
                .expect("player slot is validated at construction");
            self.events.push(GameEvent::ScoreChanged { player, value });
            log::debug!("hit: player {player} score {value}");
        }
    }

    /// Mirror the ship body to its node, then wrap the body toroidally.
    /// The node keeps the pre-wrap position until the next tick. Exactly
    /// `width` wraps to 0; exactly 0 stays put.
    fn sync_ship(&mut self) {
        let Some(ship) = self.ship else { return };
        let viewport = self.config.viewport;

        let Some(body) = self.world.body_mut(ship.body) else {
            return;
        };
        let position = body.position;
        let angle = body.angle;

        if body.position.x >= viewport.width {
            body.position.x = 0.0;
        } else if body.position.x < 0.0 {
            body.position.x = viewport.width;
        }
        if body.position.y >= viewport.height {
            body.position.y = 0.0;
        } else if body.position.y < 0.0 {
            body.position.y = viewport.height;
        }

        if let Some(node) = self.stage.get_mut(ship.node) {
            node.x = position.x;
            node.y = position.y;
            node.rotation = angle;
        }
    }

    /// Mirror enemy bodies to their nodes (position only) and queue any
    /// enemy strictly outside the viewport. No wrap for enemies.
    fn sync_and_cull_enemies(&mut self) {
        let viewport = self.config.viewport;

        for enemy in &self.enemies {
            let Some(body) = self.world.body(enemy.body) else {
                continue;
            };
            let position = body.position;

            if let Some(node) = self.stage.get_mut(enemy.node) {
                node.x = position.x;
                node.y = position.y;
            }
            if !viewport.contains(position) {
                self.removals.enqueue(enemy.body, RemovalReason::OffScreen);
            }
        }
    }

    /// Drain the removal queue once: body out of the world, record out of
    /// the list, node off the stage. Stale handles skip silently. Each
    /// collision-tagged removal requests one boom cue.
    fn drain_removals(&mut self) {
        for (body, reason) in self.removals.drain() {
            self.world.remove_body(body);

            let Some(index) = self.enemies.iter().position(|enemy| enemy.body == body) else {
                continue;
            };
            let enemy = self.enemies.remove(index);
            self.stage.remove(enemy.node);

            if reason == RemovalReason::Collision {
                let cue = SoundCue::random_boom(&mut self.rng);
                self.events.push(GameEvent::Sound(cue));
            }
            log::debug!("enemy removed ({reason:?}), {} live", self.enemies.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use proptest::prelude::*;

    fn running_game() -> Game {
        let mut game = Game::new(GameConfig::default(), 1);
        game.start();
        game.drain_events();
        game
    }

    /// Zero speed keeps spawned enemies pinned where they appear
    fn still_config() -> GameConfig {
        GameConfig {
            speed: 0.0,
            ..Default::default()
        }
    }

    fn ship_body_position(game: &Game) -> Vec2 {
        let ship = game.ship.unwrap();
        game.world.body(ship.body).unwrap().position
    }

    fn place_ship(game: &mut Game, position: Vec2) {
        let ship = game.ship.unwrap();
        game.world.body_mut(ship.body).unwrap().position = position;
    }

    /// Manufacture an enemy without going through the spawner RNG
    fn add_enemy_at(game: &mut Game, position: Vec2) -> Enemy {
        let radius = game.config.enemy_radius;
        let body = game.world.add_body(BodyDef {
            position,
            mass: 1.0,
            shape: Shape::Circle { radius },
            sensor: true,
            ..Default::default()
        });
        let node = game
            .stage
            .add(Node::at(NodeKind::Enemy, position.x, position.y));
        let enemy = Enemy { body, node };
        game.enemies.push(enemy);
        enemy
    }

    fn sound_count(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, GameEvent::Sound(_)))
            .count()
    }

    #[test]
    fn start_builds_ship_backdrop_and_zeroed_displays() {
        let mut game = Game::new(GameConfig::default(), 1);
        assert_eq!(game.phase(), GamePhase::Idle);

        game.start();

        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.ship.is_some());
        assert_eq!(game.stage().len(), 1);
        assert_eq!(
            game.backdrop().len() as u32,
            game.config().star_count + 4
        );
        assert_eq!(game.ship_position(), Some(Vec2::new(960.0, 540.0)));

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged { player: 0, value: 0 }));
        assert!(events.contains(&GameEvent::ScoreChanged { player: 1, value: 0 }));
    }

    #[test]
    fn start_twice_is_a_no_op() {
        let mut game = running_game();
        let backdrop_len = game.backdrop().len();

        game.start();

        assert_eq!(game.stage().len(), 1);
        assert_eq!(game.backdrop().len(), backdrop_len);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn idle_games_ignore_ticks() {
        let mut game = Game::new(GameConfig::default(), 1);
        game.tick();
        game.tick();

        assert_eq!(game.tick_count(), 0);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    #[should_panic(expected = "player slot")]
    fn invalid_player_slot_is_rejected_at_construction() {
        let config = GameConfig {
            player: 2,
            ..Default::default()
        };
        Game::new(config, 1);
    }

    #[test]
    fn turning_left_sets_negative_angular_velocity() {
        let mut game = running_game();
        game.set_key(consts::KEY_TURN_LEFT, true);
        game.tick();

        let ship = game.ship.unwrap();
        let body = game.world.body(ship.body).unwrap();
        assert_eq!(body.angular_velocity, -game.config.turn_speed);
        assert!((body.angle + game.config.turn_speed * consts::SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn both_turn_keys_resolve_to_left() {
        let mut both = running_game();
        both.set_key(consts::KEY_TURN_LEFT, true);
        both.set_key(consts::KEY_TURN_RIGHT, true);
        both.tick();

        let mut left_only = running_game();
        left_only.set_key(consts::KEY_TURN_LEFT, true);
        left_only.tick();

        let ship = both.ship.unwrap();
        let reference = left_only.ship.unwrap();
        assert_eq!(
            both.world.body(ship.body).unwrap().angular_velocity,
            left_only.world.body(reference.body).unwrap().angular_velocity,
        );
    }

    #[test]
    fn thrust_accelerates_along_heading() {
        let mut game = running_game();
        game.set_key(consts::KEY_THRUST, true);
        game.tick();

        let ship = game.ship.unwrap();
        let velocity = game.world.body(ship.body).unwrap().velocity;
        let expected = game.config.speed * consts::SIM_DT;
        assert!((velocity.y - expected).abs() < 1e-3);
        assert!(velocity.x.abs() < 1e-3);
    }

    #[test]
    fn no_input_means_pure_coasting() {
        let mut game = running_game();
        let ship = game.ship.unwrap();
        game.world.body_mut(ship.body).unwrap().velocity = Vec2::new(30.0, -60.0);
        let before = ship_body_position(&game);

        game.tick();

        let after = ship_body_position(&game);
        let drift = after - before;
        assert!((drift.x - 30.0 * consts::SIM_DT).abs() < 1e-4);
        assert!((drift.y + 60.0 * consts::SIM_DT).abs() < 1e-4);
        assert_eq!(game.world.body(ship.body).unwrap().angular_velocity, 0.0);
    }

    #[test]
    fn ship_at_exact_width_wraps_to_zero() {
        let mut game = running_game();
        let width = game.config.viewport.width;
        place_ship(&mut game, Vec2::new(width, 300.0));

        game.tick();

        let position = ship_body_position(&game);
        assert_eq!(position.x, 0.0);
        assert_eq!(position.y, 300.0);

        // The node still shows the pre-wrap position this tick
        let node = game.stage.get(game.ship.unwrap().node).unwrap();
        assert_eq!(node.x, width);
    }

    #[test]
    fn ship_at_exact_zero_stays_put() {
        let mut game = running_game();
        place_ship(&mut game, Vec2::new(0.0, 0.0));

        game.tick();

        assert_eq!(ship_body_position(&game), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn ship_below_zero_wraps_to_far_edge() {
        let mut game = running_game();
        place_ship(&mut game, Vec2::new(-0.5, -0.5));

        game.tick();

        let viewport = game.config.viewport;
        assert_eq!(
            ship_body_position(&game),
            Vec2::new(viewport.width, viewport.height)
        );
    }

    #[test]
    fn spawner_yields_one_enemy_per_second() {
        let mut game = Game::new(still_config(), 9);
        game.start();
        // Take the ship's body out of play so no spawn can be
        // removed by landing on it, whatever the seed draws
        game.world.remove_body(game.ship.unwrap().body);

        for second in 1..=3 {
            for _ in 0..60 {
                game.tick();
            }
            assert_eq!(game.enemy_count(), second);
        }

        // Three enemy bodies, each record paired with a stage node
        assert_eq!(game.world.len(), 3);
        assert_eq!(game.stage.len(), 4);
    }

    #[test]
    fn collision_scores_and_removes_only_that_enemy() {
        let mut game = running_game();
        let center = game.config.viewport.center();
        let hit = add_enemy_at(&mut game, center);
        let bystander = add_enemy_at(&mut game, Vec2::new(200.0, 200.0));

        game.tick();

        assert_eq!(game.scores(), [1, 0]);
        assert_eq!(game.enemy_count(), 1);
        assert_eq!(game.enemies[0], bystander);
        assert!(game.world.body(hit.body).is_none());
        assert!(game.stage.get(hit.node).is_none());
        assert!(game.world.body(bystander.body).is_some());
        assert!(game.stage.get(bystander.node).is_some());
        assert!(game.ship.is_some());

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged { player: 0, value: 1 }));
        assert_eq!(sound_count(&events), 1);
    }

    #[test]
    fn simultaneous_collisions_score_and_boom_twice() {
        let mut game = running_game();
        let center = game.config.viewport.center();
        add_enemy_at(&mut game, center);
        add_enemy_at(&mut game, center + Vec2::new(5.0, 0.0));

        game.tick();

        assert_eq!(game.scores(), [2, 0]);
        assert_eq!(game.enemy_count(), 0);
        // Only the ship remains anywhere
        assert_eq!(game.world.len(), 1);
        assert_eq!(game.stage.len(), 1);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged { player: 0, value: 1 }));
        assert!(events.contains(&GameEvent::ScoreChanged { player: 0, value: 2 }));
        assert_eq!(sound_count(&events), 2);
    }

    #[test]
    fn collisions_credit_the_configured_player() {
        let config = GameConfig {
            player: 1,
            ..Default::default()
        };
        let mut game = Game::new(config, 1);
        game.start();
        game.drain_events();

        let center = game.config.viewport.center();
        add_enemy_at(&mut game, center);
        game.tick();

        assert_eq!(game.scores(), [0, 1]);
        assert!(
            game.drain_events()
                .contains(&GameEvent::ScoreChanged { player: 1, value: 1 })
        );
    }

    #[test]
    fn offscreen_enemies_cull_silently() {
        let mut game = running_game();
        let outside = add_enemy_at(&mut game, Vec2::new(-30.0, 500.0));
        let inside = add_enemy_at(&mut game, Vec2::new(500.0, 500.0));

        game.tick();

        assert_eq!(game.enemy_count(), 1);
        assert_eq!(game.enemies[0], inside);
        assert!(game.world.body(outside.body).is_none());
        assert!(game.stage.get(outside.node).is_none());
        assert_eq!(game.scores(), [0, 0]);

        let events = game.drain_events();
        assert_eq!(sound_count(&events), 0);
        assert!(
            !events
                .iter()
                .any(|event| matches!(event, GameEvent::ScoreChanged { .. }))
        );
    }

    #[test]
    fn enemy_nodes_track_their_bodies() {
        let mut game = running_game();
        let enemy = add_enemy_at(&mut game, Vec2::new(500.0, 500.0));
        game.world.body_mut(enemy.body).unwrap().velocity = Vec2::new(60.0, 0.0);

        game.tick();

        let body = game.world.body(enemy.body).unwrap();
        let node = game.stage.get(enemy.node).unwrap();
        assert!((body.position.x - 501.0).abs() < 1e-4);
        assert_eq!(node.x, body.position.x);
        assert_eq!(node.y, body.position.y);
    }

    #[test]
    fn stale_queue_entries_drain_silently() {
        let mut game = running_game();
        let center = game.config.viewport.center();
        let enemy = add_enemy_at(&mut game, center);

        game.tick();
        assert_eq!(game.enemy_count(), 0);
        game.drain_events();

        // A handle that no longer exists anywhere must be a no-op
        game.removals.enqueue(enemy.body, RemovalReason::Collision);
        game.drain_removals();

        assert_eq!(game.world.len(), 1);
        assert_eq!(game.stage.len(), 1);
        assert_eq!(sound_count(&game.drain_events()), 0);
    }

    #[test]
    fn identical_seeds_and_inputs_replay_identically() {
        let mut a = Game::new(GameConfig::default(), 77);
        let mut b = Game::new(GameConfig::default(), 77);
        a.start();
        b.start();

        for tick_index in 0..600u32 {
            let thrust = (tick_index / 60) % 2 == 0;
            let left = tick_index % 120 < 45;
            for game in [&mut a, &mut b] {
                game.set_key(consts::KEY_THRUST, thrust);
                game.set_key(consts::KEY_TURN_LEFT, left);
                game.tick();
            }
        }

        assert_eq!(a.scores(), b.scores());
        assert_eq!(a.enemy_count(), b.enemy_count());
        assert_eq!(a.ship_position(), b.ship_position());

        let positions = |game: &Game| -> Vec<Vec2> {
            game.enemies
                .iter()
                .map(|enemy| game.world.body(enemy.body).unwrap().position)
                .collect()
        };
        assert_eq!(positions(&a), positions(&b));
    }

    proptest! {
        #[test]
        fn scores_never_decrease(
            seed in any::<u64>(),
            keys in prop::collection::vec(
                (prop::sample::select(vec![65u32, 68, 87, 32]), any::<bool>()),
                0..64,
            ),
            ticks in 1usize..200,
        ) {
            let mut game = Game::new(GameConfig::default(), seed);
            game.start();

            let mut key_stream = keys.into_iter().cycle();
            let mut previous = game.scores();

            for _ in 0..ticks {
                if let Some((code, pressed)) = key_stream.next() {
                    game.set_key(code, pressed);
                }
                game.tick();

                let now = game.scores();
                prop_assert!(now[0] >= previous[0]);
                prop_assert!(now[1] >= previous[1]);
                previous = now;
            }
        }
    }
}
