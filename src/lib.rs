//! A small 2D rigid-body physics engine.
//!
//! Bodies are circles or convex polygons. Each [`PhysicsWorld::step`] runs a
//! fixed number of sub-steps: semi-implicit Euler integration, AABB broad
//! phase, separating-axis narrow phase, positional correction, contact point
//! generation and impulse resolution.
//!
//! ```
//! use impulse2d::{PhysicsWorld, Vec2, WorldConfig};
//!
//! let mut world = PhysicsWorld::new(WorldConfig::default());
//! world.create_box_body(Vec2::ZERO, 1.0, 20.0, 1.0, 0.0, true).unwrap();
//! let ball = world.create_circle_body(Vec2::new(0.0, 3.0), 1.0, 0.5, 0.5, false).unwrap();
//!
//! for _ in 0..60 {
//!     world.step(1.0 / 60.0).unwrap();
//! }
//! assert!(world.get_body(ball).unwrap().position().y < 3.0);
//! ```

pub mod collision;
pub mod config;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::Aabb;
pub use config::{BodyLimits, WorldConfig};
pub use error::PhysicsError;
pub use math::Vec2;
pub use objects::RigidBody;
pub use shapes::{Circle, Polygon, Shape};
pub use world::PhysicsWorld;
