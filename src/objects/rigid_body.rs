use crate::collision::Aabb;
use crate::config::BodyLimits;
use crate::error::PhysicsError;
use crate::math::{Transform, Vec2};
use crate::shapes::{Circle, Polygon, Shape};

/// A rigid body: shape, world transform, motion state and mass properties.
///
/// Position and rotation are only reachable through setters, which mark the
/// world-space vertex list and the AABB as stale. Both are rebuilt the next
/// time [`RigidBody::transformed_vertices`] or [`RigidBody::aabb`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    shape: Shape,

    // Primary state
    position: Vec2, // World position of the centre of mass
    rotation: f64,  // Radians
    pub linear_velocity: Vec2,
    pub angular_velocity: f64,

    // Cleared after every integration sub-step
    force: Vec2,

    // Mass properties
    density: f64,
    area: f64,
    mass: f64,
    inv_mass: f64, // 0.0 for static
    inertia: f64,
    inv_inertia: f64, // 0.0 for static
    restitution: f64,
    is_static: bool,

    // Derived caches
    transformed_vertices: Vec<Vec2>,
    transform_update_required: bool,
    aabb: Aabb,
    aabb_update_required: bool,
}

impl RigidBody {
    /// Builds a circular body after validating its area and density against `limits`.
    pub fn circle(
        position: Vec2,
        density: f64,
        radius: f64,
        restitution: f64,
        is_static: bool,
        limits: &BodyLimits,
    ) -> Result<Self, PhysicsError> {
        let shape = Shape::Circle(Circle::new(radius)?);
        Self::from_shape(shape, position, density, restitution, is_static, limits)
    }

    /// Builds an axis-aligned box body of `width` x `height`, centred on `position`.
    pub fn boxed(
        position: Vec2,
        density: f64,
        width: f64,
        height: f64,
        restitution: f64,
        is_static: bool,
        limits: &BodyLimits,
    ) -> Result<Self, PhysicsError> {
        let shape = Shape::Polygon(Polygon::rectangle(width, height)?);
        Self::from_shape(shape, position, density, restitution, is_static, limits)
    }

    /// Builds a convex polygon body. The vertices are re-centred on their
    /// centroid, which is placed at `position`.
    pub fn polygon(
        position: Vec2,
        density: f64,
        vertices: Vec<Vec2>,
        restitution: f64,
        is_static: bool,
        limits: &BodyLimits,
    ) -> Result<Self, PhysicsError> {
        let shape = Shape::Polygon(Polygon::new(vertices)?);
        Self::from_shape(shape, position, density, restitution, is_static, limits)
    }

    /// Builds a body from an already-validated shape.
    pub fn from_shape(
        shape: Shape,
        position: Vec2,
        density: f64,
        restitution: f64,
        is_static: bool,
        limits: &BodyLimits,
    ) -> Result<Self, PhysicsError> {
        if !position.is_finite() || !restitution.is_finite() {
            return Err(PhysicsError::NonFiniteValue);
        }
        let area = shape.area();
        limits.validate(area, density)?;

        let mass = density * area;
        let inertia = shape.inertia(mass);
        let (inv_mass, inv_inertia) = if is_static {
            (0.0, 0.0)
        } else {
            (1.0 / mass, 1.0 / inertia)
        };

        let vertex_count = match &shape {
            Shape::Circle(_) => 0,
            Shape::Polygon(polygon) => polygon.vertices().len(),
        };

        Ok(Self {
            shape,
            position,
            rotation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            density,
            area,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            restitution: restitution.clamp(0.0, 1.0),
            is_static,
            transformed_vertices: Vec::with_capacity(vertex_count),
            transform_update_required: true,
            aabb: Aabb::new(position, position),
            aabb_update_required: true,
        })
    }

    /// Re-checks this body's area and density, e.g. against another world's limits.
    pub fn validate(&self, limits: &BodyLimits) -> Result<(), PhysicsError> {
        limits.validate(self.area, self.density)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Translates the body by `translation`.
    pub fn move_by(&mut self, translation: Vec2) {
        self.position += translation;
        self.invalidate();
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.invalidate();
    }

    /// Rotates the body by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.rotation += angle;
        self.invalidate();
    }

    pub fn rotate_to(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.invalidate();
    }

    /// Accumulates a force applied at the centre of mass until the next sub-step.
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies an instantaneous impulse at the centre of mass. Static bodies ignore it.
    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.linear_velocity += impulse * self.inv_mass;
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = Vec2::ZERO;
    }

    /// Drops the cached world-space geometry; used when the body leaves a world.
    pub(crate) fn release(&mut self) {
        self.transformed_vertices = Vec::new();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.transform_update_required = true;
        self.aabb_update_required = true;
    }

    /// World-space polygon vertices, rebuilt if the transform changed since the
    /// last call. Circles have no vertices and return an empty slice.
    pub fn transformed_vertices(&mut self) -> &[Vec2] {
        if self.transform_update_required {
            self.transformed_vertices.clear();
            if let Shape::Polygon(polygon) = &self.shape {
                let transform = Transform::new(self.position, self.rotation);
                self.transformed_vertices
                    .extend(polygon.vertices().iter().map(|v| transform.apply(*v)));
            }
            self.transform_update_required = false;
        }
        &self.transformed_vertices
    }

    /// World-space bounding box, rebuilt if the transform changed since the last call.
    pub fn aabb(&mut self) -> Aabb {
        if self.aabb_update_required {
            let radius = match &self.shape {
                Shape::Circle(circle) => Some(circle.radius),
                Shape::Polygon(_) => None,
            };
            let position = self.position;
            let aabb = match radius {
                Some(radius) => Aabb::from_circle(position, radius),
                None => Aabb::from_points(self.transformed_vertices())
                    .unwrap_or_else(|| Aabb::new(position, position)),
            };
            self.aabb = aabb;
            self.aabb_update_required = false;
        }
        self.aabb
    }
}
