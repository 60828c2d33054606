//! Contact point generation for pairs the narrow phase reported as colliding.

use crate::math::{nearly_equal, Vec2};
use crate::objects::RigidBody;

use super::detection::circle_radius;
use super::manifold::{Collision, ContactPoints};

/// Closest point to `point` on the segment `a`-`b`, with the squared distance to it.
pub fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> (Vec2, f64) {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq <= f64::EPSILON {
        return (a, point.distance_squared(a));
    }

    let t = (point - a).dot(ab) / length_sq;
    let closest = if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a + ab * t
    };
    (closest, point.distance_squared(closest))
}

/// Contact points for two bodies already known to overlap. `collision` must
/// be the narrow-phase result for `(body_a, body_b)`, normal pointing A to B.
pub fn find_contact_points(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    collision: &Collision,
) -> ContactPoints {
    let radius_a = circle_radius(body_a.shape());
    let radius_b = circle_radius(body_b.shape());

    match (radius_a, radius_b) {
        (Some(ra), _) => ContactPoints::one(body_a.position() + collision.normal * ra),
        (None, Some(rb)) => ContactPoints::one(body_b.position() - collision.normal * rb),
        (None, None) => {
            polygon_contact_points(body_a.transformed_vertices(), body_b.transformed_vertices())
        }
    }
}

/// Searches every vertex of each polygon against every edge of the other for
/// the closest approach. A second, distinct point at the same distance (within
/// tolerance) turns the result into a two-point face contact.
pub fn polygon_contact_points(vertices_a: &[Vec2], vertices_b: &[Vec2]) -> ContactPoints {
    let mut search = ClosestApproach::default();
    search.scan(vertices_a, vertices_b);
    search.scan(vertices_b, vertices_a);
    search.finish()
}

#[derive(Debug)]
struct ClosestApproach {
    min_distance: f64,
    first: Vec2,
    second: Option<Vec2>,
}

impl Default for ClosestApproach {
    fn default() -> Self {
        Self {
            min_distance: f64::INFINITY,
            first: Vec2::ZERO,
            second: None,
        }
    }
}

impl ClosestApproach {
    fn scan(&mut self, points: &[Vec2], polygon: &[Vec2]) {
        let n = polygon.len();
        for &point in points {
            for i in 0..n {
                let (closest, distance_sq) =
                    point_segment_distance(point, polygon[i], polygon[(i + 1) % n]);
                // Ties are judged on distance, not its square, so the tolerance is a length.
                let distance = distance_sq.sqrt();

                if nearly_equal(distance, self.min_distance) {
                    self.offer_second(closest);
                } else if distance < self.min_distance {
                    self.min_distance = distance;
                    self.first = closest;
                    self.second = None;
                }
            }
        }
    }

    /// Keeps the tied candidate farthest from `first`, so two contacts span the whole face.
    fn offer_second(&mut self, candidate: Vec2) {
        if candidate.nearly_equal(self.first) {
            return;
        }
        let spread = candidate.distance_squared(self.first);
        if self.second.map_or(true, |second| spread > second.distance_squared(self.first)) {
            self.second = Some(candidate);
        }
    }

    fn finish(self) -> ContactPoints {
        match self.second {
            Some(second) => ContactPoints::two(self.first, second),
            None => ContactPoints::one(self.first),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::detection::collide;
    use crate::config::BodyLimits;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_point_segment_distance_interior() {
        let (cp, d2) = point_segment_distance(Vec2::new(1.0, 1.0), Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert_eq!(cp, Vec2::new(1.0, 0.0));
        assert!((d2 - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_point_segment_distance_clamps_to_endpoints() {
        let a = Vec2::ZERO;
        let b = Vec2::new(2.0, 0.0);
        let (cp, d2) = point_segment_distance(Vec2::new(-1.0, 1.0), a, b);
        assert_eq!(cp, a);
        assert!((d2 - 2.0).abs() < EPSILON);
        let (cp, _) = point_segment_distance(Vec2::new(5.0, 0.0), a, b);
        assert_eq!(cp, b);
    }

    #[test]
    fn test_point_segment_distance_degenerate_segment() {
        let a = Vec2::new(1.0, 1.0);
        let (cp, d2) = point_segment_distance(Vec2::new(4.0, 5.0), a, a);
        assert_eq!(cp, a);
        assert!((d2 - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_contact_lies_along_normal() {
        let limits = BodyLimits::default();
        let mut a = RigidBody::circle(Vec2::ZERO, 1.0, 1.0, 0.0, false, &limits).unwrap();
        let mut b = RigidBody::circle(Vec2::new(1.5, 0.0), 1.0, 1.0, 0.0, false, &limits).unwrap();
        let collision = collide(&mut a, &mut b).unwrap();
        let contacts = find_contact_points(&mut a, &mut b, &collision);
        assert_eq!(contacts.as_slice(), &[Vec2::new(1.0, 0.0)]);
    }

    #[test]
    fn test_polygon_circle_contact_uses_circle_surface() {
        let limits = BodyLimits::default();
        let mut ground = RigidBody::boxed(Vec2::ZERO, 1.0, 4.0, 2.0, 0.0, true, &limits).unwrap();
        let mut ball = RigidBody::circle(Vec2::new(0.5, 1.4), 1.0, 0.5, 0.0, false, &limits).unwrap();
        let collision = collide(&mut ground, &mut ball).unwrap();
        let contacts = find_contact_points(&mut ground, &mut ball, &collision);
        assert_eq!(contacts.len(), 1);
        let p = contacts.as_slice()[0];
        assert!((p.x - 0.5).abs() < EPSILON);
        assert!((p.y - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_face_to_face_boxes_give_two_contacts() {
        let limits = BodyLimits::default();
        let mut ground = RigidBody::boxed(Vec2::ZERO, 1.0, 10.0, 2.0, 0.0, true, &limits).unwrap();
        let mut crate_box = RigidBody::boxed(Vec2::new(0.0, 1.9), 1.0, 2.0, 2.0, 0.0, false, &limits).unwrap();
        let collision = collide(&mut ground, &mut crate_box).unwrap();
        let contacts = find_contact_points(&mut ground, &mut crate_box, &collision);

        assert_eq!(contacts.len(), 2);
        let mut xs: Vec<f64> = contacts.as_slice().iter().map(|p| p.x).collect();
        xs.sort_by(f64::total_cmp);
        assert!((xs[0] + 1.0).abs() < EPSILON);
        assert!((xs[1] - 1.0).abs() < EPSILON);
        for p in contacts.as_slice() {
            assert!((p.y - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_lifted_corner_is_not_a_contact() {
        let ground = [
            Vec2::new(-5.0, -1.0),
            Vec2::new(5.0, -1.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(-5.0, 0.0),
        ];
        // Unit square resting on its lower-left corner, lower-right corner 2 cm up.
        let angle = 0.02f64.asin();
        let tilted: Vec<Vec2> = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
        .iter()
        .map(|v| v.rotate(angle))
        .collect();
        assert!((tilted[1].y - 0.02).abs() < EPSILON);

        let contacts = polygon_contact_points(&ground, &tilted);

        assert_eq!(contacts.len(), 1);
        assert!(contacts.as_slice()[0].length() < EPSILON);
    }

    #[test]
    fn test_tied_contacts_span_the_face() {
        // Three vertices touch the ground edge; the outer two are kept.
        let ground = [
            Vec2::new(-5.0, -1.0),
            Vec2::new(5.0, -1.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(-5.0, 0.0),
        ];
        let pentagon = [
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ];

        let contacts = polygon_contact_points(&ground, &pentagon);

        assert_eq!(contacts.len(), 2);
        let mut xs: Vec<f64> = contacts.as_slice().iter().map(|p| p.x).collect();
        xs.sort_by(f64::total_cmp);
        assert!((xs[0] + 1.0).abs() < EPSILON);
        assert!((xs[1] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_corner_into_face_gives_one_contact() {
        let limits = BodyLimits::default();
        let mut ground = RigidBody::boxed(Vec2::ZERO, 1.0, 10.0, 2.0, 0.0, true, &limits).unwrap();
        let half_diagonal = 2.0f64.sqrt();
        let mut tilted = RigidBody::boxed(
            Vec2::new(0.0, 1.0 + half_diagonal - 0.1),
            1.0,
            2.0,
            2.0,
            0.0,
            false,
            &limits,
        )
        .unwrap();
        tilted.rotate(PI / 4.0);
        let collision = collide(&mut ground, &mut tilted).unwrap();
        let contacts = find_contact_points(&mut ground, &mut tilted, &collision);

        assert_eq!(contacts.len(), 1);
        let p = contacts.as_slice()[0];
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }
}
