use tracing::{debug, trace, warn};

use crate::collision::{
    collide, find_contact_points, resolve_collision, resolve_collision_with_rotation,
    separate_bodies, BroadPhase, CollisionManifold,
};
use crate::config::{WorldConfig, MAX_ITERATIONS, MIN_ITERATIONS};
use crate::error::PhysicsError;
use crate::integration::integrator;
use crate::math::Vec2;
use crate::objects::RigidBody;

/// Owns the bodies of one simulation and advances them in fixed sub-steps.
#[derive(Debug)]
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    config: WorldConfig,
    broad_phase: BroadPhase,
    // Contact points from the final sub-step of the last `step` call.
    contact_points: Vec<Vec2>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl PhysicsWorld {
    /// Creates a new, empty physics world.
    pub fn new(config: WorldConfig) -> Self {
        debug!(
            gravity = ?config.gravity,
            iterations = config.iterations,
            air_resistance = config.air_resistance,
            "creating physics world"
        );
        Self {
            bodies: Vec::new(),
            config,
            broad_phase: BroadPhase::new(),
            contact_points: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Adds a rigid body to the world and returns its index.
    ///
    /// The body is checked against this world's limits, which may be stricter
    /// than the ones it was built with.
    pub fn add_body(&mut self, body: RigidBody) -> Result<usize, PhysicsError> {
        if let Err(err) = body.validate(&self.config.limits) {
            warn!(%err, "rejected body");
            return Err(err);
        }
        let index = self.bodies.len();
        debug!(index, is_static = body.is_static(), "added body");
        self.bodies.push(body);
        Ok(index)
    }

    pub fn create_circle_body(
        &mut self,
        position: Vec2,
        density: f64,
        radius: f64,
        restitution: f64,
        is_static: bool,
    ) -> Result<usize, PhysicsError> {
        let body = RigidBody::circle(
            position,
            density,
            radius,
            restitution,
            is_static,
            &self.config.limits,
        );
        self.register(body)
    }

    pub fn create_box_body(
        &mut self,
        position: Vec2,
        density: f64,
        width: f64,
        height: f64,
        restitution: f64,
        is_static: bool,
    ) -> Result<usize, PhysicsError> {
        let body = RigidBody::boxed(
            position,
            density,
            width,
            height,
            restitution,
            is_static,
            &self.config.limits,
        );
        self.register(body)
    }

    /// `vertices` are given in local space, in either winding order.
    pub fn create_polygon_body(
        &mut self,
        position: Vec2,
        density: f64,
        vertices: Vec<Vec2>,
        restitution: f64,
        is_static: bool,
    ) -> Result<usize, PhysicsError> {
        let body = RigidBody::polygon(
            position,
            density,
            vertices,
            restitution,
            is_static,
            &self.config.limits,
        );
        self.register(body)
    }

    fn register(&mut self, body: Result<RigidBody, PhysicsError>) -> Result<usize, PhysicsError> {
        match body {
            Ok(body) => {
                let index = self.bodies.len();
                debug!(index, is_static = body.is_static(), "created body");
                self.bodies.push(body);
                Ok(index)
            }
            Err(err) => {
                warn!(%err, "rejected body");
                Err(err)
            }
        }
    }

    /// Removes and returns the body at `index`. Bodies after it shift down by one.
    pub fn remove_body(&mut self, index: usize) -> Result<RigidBody, PhysicsError> {
        self.check_index(index)?;
        let mut body = self.bodies.remove(index);
        body.release();
        debug!(index, remaining = self.bodies.len(), "removed body");
        Ok(body)
    }

    pub fn get_body(&self, index: usize) -> Result<&RigidBody, PhysicsError> {
        self.check_index(index)?;
        Ok(&self.bodies[index])
    }

    pub fn get_body_mut(&mut self, index: usize) -> Result<&mut RigidBody, PhysicsError> {
        self.check_index(index)?;
        Ok(&mut self.bodies[index])
    }

    fn check_index(&self, index: usize) -> Result<(), PhysicsError> {
        if index < self.bodies.len() {
            Ok(())
        } else {
            Err(PhysicsError::BodyOutOfBounds {
                index,
                count: self.bodies.len(),
            })
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Mutable access for bulk reads of cached geometry (AABBs, vertices).
    pub fn bodies_mut(&mut self) -> &mut [RigidBody] {
        &mut self.bodies
    }

    /// Removes every body.
    pub fn clear(&mut self) {
        debug!(count = self.bodies.len(), "clearing world");
        self.bodies.clear();
        self.contact_points.clear();
    }

    /// Contact points found during the final sub-step of the last `step`.
    pub fn contact_points(&self) -> &[Vec2] {
        &self.contact_points
    }

    pub fn to_pixels(&self, meters: f64) -> f64 {
        meters * self.config.pixels_per_meter()
    }

    pub fn to_meters(&self, pixels: f64) -> f64 {
        pixels / self.config.pixels_per_meter()
    }

    /// Advances the simulation by `dt` seconds, split into `config.iterations`
    /// equal sub-steps. A zero `dt` does nothing.
    pub fn step(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }
        if dt == 0.0 {
            return Ok(());
        }

        let iterations = self.config.iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS);
        let sub_dt = dt / iterations as f64;
        let damping = integrator::damping_factor(self.config.air_resistance, iterations);
        let gravity = self.config.gravity;

        for _ in 0..iterations {
            for body in self.bodies.iter_mut() {
                integrator::integrate(body, gravity, sub_dt, damping);
            }
            self.resolve_collisions();
        }

        Ok(())
    }

    fn resolve_collisions(&mut self) {
        self.contact_points.clear();
        let pairs = self.broad_phase.find_pairs(&mut self.bodies);

        for &(i, j) in pairs {
            let (body_a, body_b) = pair_mut(&mut self.bodies, i, j);
            let Some(collision) = collide(body_a, body_b) else {
                continue;
            };
            trace!(
                body_a = i,
                body_b = j,
                depth = collision.depth,
                normal = ?collision.normal,
                "collision"
            );

            separate_bodies(body_a, body_b, collision.normal, collision.depth);
            let contacts = find_contact_points(body_a, body_b, &collision);
            let manifold = CollisionManifold::new(i, j, collision, contacts);

            if self.config.angular_impulses {
                resolve_collision_with_rotation(body_a, body_b, &manifold);
            } else {
                resolve_collision(body_a, body_b, &manifold);
            }
            self.contact_points.extend_from_slice(manifold.contact_points());
        }
    }
}

/// Mutable references to two distinct bodies, `i < j`.
fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> (&mut RigidBody, &mut RigidBody) {
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
