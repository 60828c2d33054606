pub mod aabb;
pub mod broadphase;
pub mod contacts;
pub mod detection;
pub mod manifold;
pub mod resolution;

// Re-export key types
pub use aabb::Aabb;
pub use broadphase::BroadPhase;
pub use contacts::{find_contact_points, point_segment_distance};
pub use detection::{collide, intersect_circle_polygon, intersect_circles, intersect_polygons};
pub use manifold::{Collision, CollisionManifold, ContactPoints};
pub use resolution::{resolve_collision, resolve_collision_with_rotation, separate_bodies};
