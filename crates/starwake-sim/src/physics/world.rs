//! Fixed-timestep stepping with an accumulator.
//!
//! Each update adds the real elapsed time to the accumulator and runs
//! as many fixed internal steps as fit, up to `max_substeps`. Rendered
//! transforms are then interpolated by the leftover fraction of a step.

use std::collections::HashSet;

use glam::DVec2;
use hecs::{Entity, World};
use log::debug;

use starwake_core::components::RigidBody;
use starwake_core::materials::MaterialLibrary;

use super::contact;
use super::integrate;

/// What one call to `step` did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub substeps: u32,
    /// Physics time advanced by this call.
    pub advanced_secs: f64,
    /// Time left in the accumulator afterwards.
    pub accumulator: f64,
    /// Touching shape pairs after the last internal step.
    pub contacts: u32,
    /// Body pairs that started touching during this call.
    pub impacts: Vec<(Entity, Entity)>,
}

pub struct PhysicsWorld {
    pub gravity: DVec2,
    accumulator: f64,
    time: f64,
    touching: HashSet<(Entity, Entity)>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(DVec2::ZERO)
    }
}

impl PhysicsWorld {
    pub fn new(gravity: DVec2) -> Self {
        Self {
            gravity,
            accumulator: 0.0,
            time: 0.0,
            touching: HashSet::new(),
        }
    }

    /// Physics time in seconds (sum of all internal steps).
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn body_count(&self, world: &World) -> usize {
        world.query::<&RigidBody>().iter().count()
    }

    /// Drop contact bookkeeping for a body leaving the world.
    pub fn forget(&mut self, entity: Entity) {
        self.touching.retain(|(a, b)| *a != entity && *b != entity);
    }

    /// Advance by `elapsed` seconds of real time in `fixed_step` increments.
    ///
    /// Runs at most `max_substeps` internal steps. Time that still does
    /// not fit after the cap is discarded, keeping at most one partial
    /// step, so a long stall cannot snowball into ever larger catch-ups.
    pub fn step(
        &mut self,
        world: &mut World,
        materials: &MaterialLibrary,
        fixed_step: f64,
        elapsed: f64,
        max_substeps: u32,
    ) -> StepReport {
        let mut report = StepReport::default();
        if elapsed > 0.0 {
            self.accumulator += elapsed;
        }

        let mut bodies: Vec<(Entity, &mut RigidBody)> =
            world.query_mut::<&mut RigidBody>().into_iter().collect();

        while self.accumulator >= fixed_step && report.substeps < max_substeps {
            self.internal_step(&mut bodies, materials, fixed_step, &mut report);
            self.accumulator -= fixed_step;
            report.substeps += 1;
        }

        if self.accumulator >= fixed_step {
            debug!(
                "physics fell behind: dropping {:.4}s after {} substeps",
                self.accumulator - self.accumulator % fixed_step,
                report.substeps
            );
            self.accumulator %= fixed_step;
        }

        let alpha = self.accumulator / fixed_step;
        for (_, body) in bodies.iter_mut() {
            integrate::interpolate(body, alpha);
        }

        report.accumulator = self.accumulator;
        report
    }

    /// Run exactly one internal step of `dt`, bypassing the accumulator.
    pub fn step_once(&mut self, world: &mut World, materials: &MaterialLibrary, dt: f64) -> StepReport {
        let mut report = StepReport::default();
        let mut bodies: Vec<(Entity, &mut RigidBody)> =
            world.query_mut::<&mut RigidBody>().into_iter().collect();

        self.internal_step(&mut bodies, materials, dt, &mut report);
        report.substeps = 1;
        for (_, body) in bodies.iter_mut() {
            integrate::interpolate(body, 1.0);
        }

        report.accumulator = self.accumulator;
        report
    }

    fn internal_step(
        &mut self,
        bodies: &mut [(Entity, &mut RigidBody)],
        materials: &MaterialLibrary,
        dt: f64,
        report: &mut StepReport,
    ) {
        for (_, body) in bodies.iter_mut() {
            integrate::store_previous(body);
            integrate::integrate(body, self.gravity, dt);
        }

        let contacts = contact::detect(bodies);
        contact::resolve(bodies, &contacts, materials);

        let mut now_touching = HashSet::with_capacity(contacts.len());
        for c in &contacts {
            let pair = ordered_pair(bodies[c.a].0, bodies[c.b].0);
            if now_touching.insert(pair) && !self.touching.contains(&pair) {
                report.impacts.push(pair);
            }
        }
        self.touching = now_touching;

        report.contacts = contacts.len() as u32;
        report.advanced_secs += dt;
        self.time += dt;
    }
}

fn ordered_pair(a: Entity, b: Entity) -> (Entity, Entity) {
    if a.to_bits() <= b.to_bits() {
        (a, b)
    } else {
        (b, a)
    }
}
