use std::f64::consts::PI;

use crate::error::PhysicsError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Result<Self, PhysicsError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Moment of inertia about the centre for the given mass.
    pub fn inertia(&self, mass: f64) -> f64 {
        0.5 * mass * self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_circle_new() {
        let c = Circle::new(5.0).unwrap();
        assert_eq!(c.radius, 5.0);
        assert!((c.area() - 25.0 * PI).abs() < EPSILON);
        assert!((c.inertia(2.0) - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_rejects_bad_radius() {
        assert_eq!(Circle::new(-1.0), Err(PhysicsError::InvalidRadius(-1.0)));
        assert_eq!(Circle::new(0.0), Err(PhysicsError::InvalidRadius(0.0)));
        assert!(Circle::new(f64::INFINITY).is_err());
    }
}
