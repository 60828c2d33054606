//! Error types for body construction, lookup and stepping.

use thiserror::Error;

/// Errors reported by the physics engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Body area falls outside the world's configured bounds.
    #[error("body area {area} is outside the allowed range [{min}, {max}]")]
    AreaOutOfRange { area: f64, min: f64, max: f64 },
    /// Body density falls outside the world's configured bounds.
    #[error("body density {density} is outside the allowed range [{min}, {max}]")]
    DensityOutOfRange { density: f64, min: f64, max: f64 },
    #[error("circle radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("box dimensions must be positive and finite, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("polygon needs at least 3 vertices, got {count}")]
    InsufficientVertices { count: usize },
    #[error("polygon vertices do not form a convex hull")]
    NonConvexPolygon,
    /// Zero signed area or repeated consecutive vertices.
    #[error("polygon is degenerate")]
    DegeneratePolygon,
    #[error("position, rotation or restitution is not finite")]
    NonFiniteValue,
    #[error("body index {index} out of bounds (count: {count})")]
    BodyOutOfBounds { index: usize, count: usize },
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),
}

impl PhysicsError {
    /// Whether this error came from validating a body's geometry or mass bounds.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            PhysicsError::BodyOutOfBounds { .. } | PhysicsError::InvalidTimeStep(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PhysicsError::DensityOutOfRange {
            density: 0.1,
            min: 0.5,
            max: 21.4,
        };
        assert_eq!(
            err.to_string(),
            "body density 0.1 is outside the allowed range [0.5, 21.4]"
        );
        assert_eq!(
            PhysicsError::BodyOutOfBounds { index: 3, count: 2 }.to_string(),
            "body index 3 out of bounds (count: 2)"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(PhysicsError::NonConvexPolygon.is_validation());
        assert!(PhysicsError::InvalidRadius(-1.0).is_validation());
        assert!(!PhysicsError::InvalidTimeStep(f64::NAN).is_validation());
        assert!(!PhysicsError::BodyOutOfBounds { index: 0, count: 0 }.is_validation());
    }
}
