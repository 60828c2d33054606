use std::f64::consts::TAU;

use crate::error::PhysicsError;
use crate::math::Vec2;

/// Squared edge length below which two consecutive vertices count as repeated.
const MIN_EDGE_LENGTH_SQUARED: f64 = 1e-12;

/// A convex polygon in local space.
///
/// Construction validates the hull, normalises the winding to
/// counter-clockwise and re-expresses every vertex relative to the centroid,
/// so the owning body's position is also its centre of mass. Vertices are
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    area: f64,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, PhysicsError> {
        let count = vertices.len();
        if count < 3 {
            return Err(PhysicsError::InsufficientVertices { count });
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::NonFiniteValue);
        }

        let mut vertices = vertices;
        let signed = signed_area(&vertices);
        if signed.abs() < f64::EPSILON {
            return Err(PhysicsError::DegeneratePolygon);
        }
        if signed < 0.0 {
            vertices.reverse();
        }

        for i in 0..count {
            let next = vertices[(i + 1) % count];
            if vertices[i].distance_squared(next) < MIN_EDGE_LENGTH_SQUARED {
                return Err(PhysicsError::DegeneratePolygon);
            }
        }
        if !is_convex_ccw(&vertices) {
            return Err(PhysicsError::NonConvexPolygon);
        }

        let centroid = centroid(&vertices, signed.abs());
        for v in vertices.iter_mut() {
            *v -= centroid;
        }

        Ok(Self {
            vertices,
            area: signed.abs(),
        })
    }

    /// Axis-aligned rectangle centred on the origin.
    pub fn rectangle(width: f64, height: f64) -> Result<Self, PhysicsError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(PhysicsError::InvalidDimensions { width, height });
        }
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    /// Counter-clockwise vertices relative to the centroid.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// Width and height of the local-space bounding rectangle.
    pub fn extents(&self) -> (f64, f64) {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }
        (max.x - min.x, max.y - min.y)
    }

    /// Moment of inertia about the centroid, using the rectangular
    /// approximation `m(w² + h²)/12` over the polygon's extents.
    pub fn inertia(&self, mass: f64) -> f64 {
        let (width, height) = self.extents();
        (1.0 / 12.0) * mass * (width * width + height * height)
    }
}

/// Signed area, positive for counter-clockwise winding.
pub fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[(i + 1) % n];
        sum += (vj.x + vi.x) * (vj.y - vi.y);
    }
    sum / 2.0
}

/// Outward unit normal of every edge of a counter-clockwise vertex loop.
/// Edge `i` runs from vertex `i` to vertex `i + 1`; degenerate edges yield `None`.
pub fn edge_normals(vertices: &[Vec2]) -> impl Iterator<Item = Option<Vec2>> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| {
        let edge = vertices[(i + 1) % n] - vertices[i];
        (-edge.perpendicular()).try_normalize()
    })
}

fn is_convex_ccw(vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    let mut turning = 0.0;
    for i in 0..n {
        let e0 = vertices[(i + 1) % n] - vertices[i];
        let e1 = vertices[(i + 2) % n] - vertices[(i + 1) % n];
        let cross = e0.cross(e1);
        if cross < -1e-9 * e0.length() * e1.length() {
            return false;
        }
        turning += cross.atan2(e0.dot(e1));
    }
    // A star polygon turns left everywhere but winds more than once.
    (turning - TAU).abs() < 1e-6
}

fn centroid(vertices: &[Vec2], area: f64) -> Vec2 {
    let origin = vertices[0];
    let mut weighted = Vec2::ZERO;
    for i in 1..vertices.len() - 1 {
        let a = vertices[i] - origin;
        let b = vertices[i + 1] - origin;
        let tri_area = a.cross(b) / 2.0;
        weighted += (a + b) / 3.0 * tri_area;
    }
    origin + weighted / area
}
