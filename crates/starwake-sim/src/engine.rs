//! The engine: the core of the sandbox.
//!
//! `Engine` owns the hecs ECS world, the physics stepper and the render
//! scene graph, processes player commands, drains the dispatcher, runs
//! all systems and produces `FrameSnapshot`s. Completely headless, so
//! whole sessions can be replayed deterministically in tests.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, EntityBuilder, World};
use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starwake_core::commands::PlayerCommand;
use starwake_core::components::{Kind, Lifetime, Player, RigidBody};
use starwake_core::config::GameConfig;
use starwake_core::enums::SimPhase;
use starwake_core::error::{ConfigError, EngineError};
use starwake_core::events::SimEvent;
use starwake_core::materials::MaterialLibrary;
use starwake_core::state::{CameraView, DebugView, FrameSnapshot};
use starwake_core::types::SimTime;
use starwake_scene::{NodeId, Renderer, SceneGraph};

use crate::blueprint::EntityBlueprint;
use crate::dispatcher::{Dispatcher, EngineEvent};
use crate::physics::{PhysicsWorld, StepReport};
use crate::starfield::Starfield;
use crate::systems;
use crate::systems::render_sync::Renderable;
use crate::systems::weapons::FireSolution;

/// The engine. Owns the ECS world, physics, scene and all session state.
pub struct Engine {
    world: World,
    physics: PhysicsWorld,
    scene: SceneGraph,
    stage: NodeId,
    world_container: NodeId,
    starfield: Starfield,
    dispatcher: Dispatcher<EngineEvent>,
    materials: MaterialLibrary,
    config: GameConfig,
    rng: ChaCha8Rng,
    phase: SimPhase,
    time: SimTime,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    camera: CameraView,
    last_report: StepReport,
}

impl Engine {
    /// Create an empty engine. Use `world_setup` to populate it.
    ///
    /// Fails if `config` does not pass `GameConfig::validate`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut scene = SceneGraph::new();

        let stage = scene.create_container();
        let starfield = Starfield::new(
            &mut scene,
            &mut rng,
            config.starfield.count as usize,
            config.starfield.parallax,
            config.width,
            config.height,
        );
        scene.add_child(stage, starfield.container());

        let world_container = scene.create_container();
        scene.add_child(stage, world_container);
        let centre = DVec2::new(config.width / 2.0, config.height / 2.0);
        scene.set_position(world_container, centre);

        let mut materials = MaterialLibrary::new();
        materials.set_default_contact(config.physics.friction, config.physics.restitution);

        let [gx, gy] = config.physics.gravity;
        info!(
            "engine created: seed={} viewport={}x{} step={:.4}s",
            config.seed, config.width, config.height, config.physics.fixed_step
        );

        Ok(Self {
            world: World::new(),
            physics: PhysicsWorld::new(DVec2::new(gx, gy)),
            scene,
            stage,
            world_container,
            starfield,
            dispatcher: Dispatcher::new(),
            materials,
            config,
            rng,
            phase: SimPhase::default(),
            time: SimTime::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            camera: CameraView {
                offset: centre,
                focus: DVec2::ZERO,
            },
            last_report: StepReport::default(),
        })
    }

    /// Queue a player command for processing at the next update.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by `elapsed_secs` of real time and return the resulting snapshot.
    pub fn update(&mut self, elapsed_secs: f64) -> FrameSnapshot {
        self.process_commands();

        self.last_report = StepReport::default();
        if self.phase == SimPhase::Running {
            self.run_systems(elapsed_secs);
            self.time.advance(self.physics.time());
        }

        // Camera and backdrop follow the player even while paused.
        self.camera = systems::camera::run(
            &self.world,
            &mut self.scene,
            self.world_container,
            self.config.width,
            self.config.height,
            self.camera,
        );
        self.starfield.set_position(self.camera.focus);
        self.starfield.update(&mut self.scene);

        let debug = DebugView {
            entities: self.world.len(),
            bodies: self.physics.body_count(&self.world) as u32,
            scene_nodes: self.scene.len() as u32,
            substeps: self.last_report.substeps,
            accumulator: self.physics.accumulator(),
            contacts: self.last_report.contacts,
        };
        trace!(
            "update t={:.4}s substeps={} entities={}",
            self.physics.time(),
            debug.substeps,
            debug.entities
        );

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            self.time,
            self.phase,
            self.physics.time(),
            self.camera,
            debug,
            events,
        )
    }

    /// Spawn an entity from a blueprint: body, components and render container.
    pub fn add_entity(&mut self, blueprint: EntityBlueprint) -> Entity {
        let body = blueprint.build_body();

        let node = self.scene.create_container();
        self.scene.add_child(self.world_container, node);
        if let Some(resource) = &blueprint.sprite {
            let sprite = self.scene.create_sprite(resource);
            self.scene.add_child(node, sprite);
        }
        systems::render_sync::draw_debug(&mut self.scene, node, &body);
        systems::render_sync::place(&mut self.scene, node, body.position, body.angle);

        let mut builder = EntityBuilder::new();
        builder
            .add(Kind(blueprint.kind))
            .add(body)
            .add(Renderable { node });
        if let Some(secs) = blueprint.lifetime_secs {
            builder.add(Lifetime { remaining_secs: secs });
        }
        if let Some(helm) = blueprint.helm {
            builder.add(helm);
        }
        if let Some(hardpoints) = blueprint.hardpoints {
            builder.add(hardpoints);
        }
        if let Some(gun) = blueprint.nose_gun {
            builder.add(gun);
        }
        if blueprint.player {
            builder.add(Player);
        }

        let entity = self.world.spawn(builder.build());
        debug!("spawned {:?} {:?} at {:?}", blueprint.kind, entity, blueprint.position);
        self.events.push(SimEvent::EntityAdded {
            entity: entity.to_bits().get(),
            kind: blueprint.kind,
        });
        entity
    }

    /// Remove an entity together with its contact state and render subtree.
    pub fn remove_entity(&mut self, entity: Entity) -> Result<(), EngineError> {
        let id = entity.to_bits().get();
        if !self.world.contains(entity) {
            return Err(EngineError::UnknownEntity(id));
        }

        let node = self.world.get::<&Renderable>(entity).ok().map(|r| r.node);
        let kind = self
            .world
            .get::<&Kind>(entity)
            .map(|k| k.0)
            .unwrap_or_default();

        self.world
            .despawn(entity)
            .map_err(|_| EngineError::UnknownEntity(id))?;
        self.physics.forget(entity);
        if let Some(node) = node {
            self.scene.destroy(node);
        }

        debug!("removed {kind:?} {entity:?}");
        self.events.push(SimEvent::EntityRemoved { entity: id, kind });
        Ok(())
    }

    /// Fire turret `index` of `ship`. The projectile spawns at the next drain.
    pub fn fire_turret(&mut self, ship: Entity, index: usize) -> Result<FireSolution, EngineError> {
        systems::weapons::fire_turret(
            &self.world,
            ship,
            index,
            &self.config.weapons,
            self.materials.default_material(),
            &mut self.dispatcher,
            &mut self.events,
        )
    }

    /// Fire the player's nose gun if it has reloaded.
    pub fn fire_nose_gun(&mut self) -> Option<FireSolution> {
        let ship = self.player()?;
        systems::weapons::fire_nose_gun(
            &mut self.world,
            ship,
            self.physics.time(),
            &self.config.weapons,
            self.materials.default_material(),
            &mut self.dispatcher,
            &mut self.events,
        )
    }

    pub fn pause(&mut self) {
        if self.phase == SimPhase::Running {
            info!("paused at t={:.3}s", self.physics.time());
            self.phase = SimPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == SimPhase::Paused {
            info!("resumed at t={:.3}s", self.physics.time());
            self.phase = SimPhase::Running;
        }
    }

    /// Draw the whole stage with `renderer`.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.render(&self.scene, self.stage);
    }

    /// Physics time in seconds.
    pub fn time(&self) -> f64 {
        self.physics.time()
    }

    pub fn sim_time(&self) -> SimTime {
        self.time
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Root node of everything drawn.
    pub fn stage(&self) -> NodeId {
        self.stage
    }

    /// Container that holds every entity node; the camera moves it.
    pub fn world_container(&self) -> NodeId {
        self.world_container
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.materials
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<EngineEvent> {
        &mut self.dispatcher
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// The player-controlled ship, if one exists.
    pub fn player(&self) -> Option<Entity> {
        self.world
            .query::<&Player>()
            .iter()
            .map(|(entity, _)| entity)
            .next()
    }

    /// Body of `entity`, if it has one.
    pub fn body(&self, entity: Entity) -> Option<RigidBody> {
        self.world.get::<&RigidBody>(entity).ok().map(|b| (*b).clone())
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
            _ if self.phase == SimPhase::Paused => {
                trace!("ignoring {command:?} while paused");
            }
            PlayerCommand::Fire => {
                self.fire_nose_gun();
            }
            PlayerCommand::FireTurret { index } => {
                let Some(ship) = self.player() else {
                    warn!("turret fire without a player ship");
                    return;
                };
                if let Err(err) = self.fire_turret(ship, index) {
                    warn!("turret fire failed: {err}");
                }
            }
            other => {
                systems::controls::apply(&mut self.world, other);
            }
        }
    }

    /// Drain the dispatcher, spawning and removing entities.
    fn drain_dispatcher(&mut self) {
        for event in self.dispatcher.drain() {
            match event {
                EngineEvent::EntityAdd { entities } => {
                    for blueprint in entities {
                        self.add_entity(blueprint);
                    }
                }
                EngineEvent::EntityRemove { entity } => {
                    if let Err(err) = self.remove_entity(entity) {
                        warn!("dispatched removal failed: {err}");
                    }
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, elapsed_secs: f64) {
        // 1. Spawns and removals requested since the last update
        self.drain_dispatcher();

        // 2. Physics
        let physics = &self.config.physics;
        let report = self.physics.step(
            &mut self.world,
            &self.materials,
            physics.fixed_step,
            elapsed_secs,
            physics.max_substeps,
        );
        for &(a, b) in &report.impacts {
            self.events.push(SimEvent::Impact {
                a: a.to_bits().get(),
                b: b.to_bits().get(),
            });
        }

        // 3. Containers follow bodies
        systems::render_sync::run(&self.world, &mut self.scene);

        // 4. Cleanup (lifetimes, out of bounds, munitions that hit)
        let mut doomed = std::mem::take(&mut self.despawn_buffer);
        systems::cleanup::run(
            &mut self.world,
            report.advanced_secs,
            self.config.world_bound,
            &report.impacts,
            self.config.remove_projectiles_on_impact,
            &mut doomed,
        );
        for entity in doomed.drain(..) {
            if let Err(err) = self.remove_entity(entity) {
                warn!("cleanup removal failed: {err}");
            }
        }
        self.despawn_buffer = doomed;

        self.last_report = report;
    }
}
