use super::vec2::Vec2;

/// A rigid 2D transform: rotation about the origin followed by translation.
///
/// The sine and cosine of the angle are evaluated once at construction, so
/// transforming a whole vertex list costs two multiplications per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    sin: f64,
    cos: f64,
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self { position, sin, cos }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            sin: 0.0,
            cos: 1.0,
        }
    }

    /// Maps a local-space point into world space.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x * self.cos - point.y * self.sin,
            point.x * self.sin + point.y * self.cos,
        ) + self.position
    }

    /// Maps a world-space point back into local space.
    pub fn apply_inverse(&self, point: Vec2) -> Vec2 {
        let p = point - self.position;
        Vec2::new(
            p.x * self.cos + p.y * self.sin,
            -p.x * self.sin + p.y * self.cos,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_transform_identity() {
        let t = Transform::identity();
        let p = Vec2::new(5.0, -3.0);
        assert_eq!(t.apply(p), p);
        assert_eq!(t.apply_inverse(p), p);
    }

    #[test]
    fn test_transform_rotation_then_translation() {
        // (1,0) rotates to (0,1), then shifts by (10,5).
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 2.0);
        let tp = t.apply(Vec2::new(1.0, 0.0));
        assert!((tp.x - 10.0).abs() < EPSILON);
        assert!((tp.y - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_inverse_round_trip() {
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 4.0);
        let local = Vec2::new(1.0, 1.0);
        let back = t.apply_inverse(t.apply(local));
        assert!((back.x - local.x).abs() < EPSILON);
        assert!((back.y - local.y).abs() < EPSILON);
    }
}
