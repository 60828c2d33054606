//! Narrow phase: separating-axis tests for every pair of shape kinds.

use crate::math::Vec2;
use crate::objects::RigidBody;
use crate::shapes::polygon::edge_normals;
use crate::shapes::Shape;

use super::manifold::Collision;

/// Circle-circle test. Reports a collision iff the centres are closer than
/// the sum of the radii.
pub fn intersect_circles(
    center_a: Vec2,
    radius_a: f64,
    center_b: Vec2,
    radius_b: f64,
) -> Option<Collision> {
    let delta = center_b - center_a;
    let distance = delta.length();
    let radii = radius_a + radius_b;

    if distance >= radii {
        return None;
    }

    let normal = delta.try_normalize().unwrap_or_else(|| {
        tracing::trace!("concentric circles, falling back to an upward normal");
        Vec2::UP
    });

    Some(Collision {
        normal,
        depth: radii - distance,
    })
}

/// Polygon-polygon SAT over the edge normals of both polygons. The vertex
/// slices are world-space; `center_*` only decides the normal's direction.
pub fn intersect_polygons(
    center_a: Vec2,
    vertices_a: &[Vec2],
    center_b: Vec2,
    vertices_b: &[Vec2],
) -> Option<Collision> {
    let mut best: Option<Collision> = None;

    for axis in edge_normals(vertices_a).chain(edge_normals(vertices_b)) {
        let Some(axis) = axis else {
            tracing::trace!("skipping degenerate polygon edge");
            continue;
        };

        let (min_a, max_a) = project_vertices(vertices_a, axis);
        let (min_b, max_b) = project_vertices(vertices_b, axis);
        let overlap = interval_overlap(min_a, max_a, min_b, max_b)?;

        if best.map_or(true, |b| overlap < b.depth) {
            best = Some(Collision {
                normal: axis,
                depth: overlap,
            });
        }
    }

    best.map(|collision| orient(collision, center_b - center_a))
}

/// Circle-polygon SAT. Besides the polygon's edge normals it tests the axis
/// from the circle centre to the closest polygon vertex, which is the only
/// axis that can separate the two near a corner. The normal points from the
/// circle towards the polygon.
pub fn intersect_circle_polygon(
    circle_center: Vec2,
    radius: f64,
    polygon_center: Vec2,
    vertices: &[Vec2],
) -> Option<Collision> {
    let closest_vertex_axis = closest_vertex(circle_center, vertices)
        .and_then(|vertex| (vertex - circle_center).try_normalize());
    if closest_vertex_axis.is_none() {
        tracing::trace!("circle centre sits on a vertex, skipping the vertex axis");
    }

    let mut best: Option<Collision> = None;

    for axis in edge_normals(vertices).chain(std::iter::once(closest_vertex_axis)) {
        let Some(axis) = axis else {
            continue;
        };

        let (min_p, max_p) = project_vertices(vertices, axis);
        let (min_c, max_c) = project_circle(circle_center, radius, axis);
        let overlap = interval_overlap(min_c, max_c, min_p, max_p)?;

        if best.map_or(true, |b| overlap < b.depth) {
            best = Some(Collision {
                normal: axis,
                depth: overlap,
            });
        }
    }

    best.map(|collision| orient(collision, polygon_center - circle_center))
}

/// Dispatches on the shape kinds of the pair. The returned normal always
/// points from `body_a` towards `body_b`.
pub fn collide(body_a: &mut RigidBody, body_b: &mut RigidBody) -> Option<Collision> {
    let radius_a = circle_radius(body_a.shape());
    let radius_b = circle_radius(body_b.shape());

    match (radius_a, radius_b) {
        (Some(ra), Some(rb)) => intersect_circles(body_a.position(), ra, body_b.position(), rb),
        (Some(ra), None) => {
            let center_b = body_b.position();
            intersect_circle_polygon(body_a.position(), ra, center_b, body_b.transformed_vertices())
        }
        (None, Some(rb)) => {
            let center_a = body_a.position();
            intersect_circle_polygon(body_b.position(), rb, center_a, body_a.transformed_vertices())
                .map(Collision::flipped)
        }
        (None, None) => {
            let center_a = body_a.position();
            let center_b = body_b.position();
            intersect_polygons(
                center_a,
                body_a.transformed_vertices(),
                center_b,
                body_b.transformed_vertices(),
            )
        }
    }
}

pub(crate) fn circle_radius(shape: &Shape) -> Option<f64> {
    match shape {
        Shape::Circle(circle) => Some(circle.radius),
        Shape::Polygon(_) => None,
    }
}

/// Projects a vertex set onto `axis` and returns the covered interval.
pub fn project_vertices(vertices: &[Vec2], axis: Vec2) -> (f64, f64) {
    vertices.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        let p = v.dot(axis);
        (min.min(p), max.max(p))
    })
}

pub fn project_circle(center: Vec2, radius: f64, axis: Vec2) -> (f64, f64) {
    let c = center.dot(axis);
    (c - radius, c + radius)
}

/// Positive overlap of two intervals, or `None` when they are separated or only touch.
fn interval_overlap(min_a: f64, max_a: f64, min_b: f64, max_b: f64) -> Option<f64> {
    let overlap = (max_a - min_b).min(max_b - min_a);
    (overlap > 0.0).then_some(overlap)
}

/// Flips the normal so it agrees with the A-to-B centre direction.
fn orient(collision: Collision, a_to_b: Vec2) -> Collision {
    if a_to_b.dot(collision.normal) < 0.0 {
        collision.flipped()
    } else {
        collision
    }
}

fn closest_vertex(point: Vec2, vertices: &[Vec2]) -> Option<Vec2> {
    vertices.iter().copied().min_by(|a, b| {
        a.distance_squared(point)
            .total_cmp(&b.distance_squared(point))
    })
}
