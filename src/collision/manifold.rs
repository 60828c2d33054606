use crate::math::Vec2;

/// Minimum translation vector produced by the narrow phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Unit normal pointing from body A towards body B.
    pub normal: Vec2,
    /// Penetration depth along `normal`, never negative.
    pub depth: f64,
}

impl Collision {
    /// The same collision seen from the other body.
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

/// One or two world-space contact points between two overlapping bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoints {
    points: [Vec2; 2],
    count: usize,
}

impl ContactPoints {
    pub fn one(point: Vec2) -> Self {
        Self {
            points: [point, Vec2::ZERO],
            count: 1,
        }
    }

    pub fn two(first: Vec2, second: Vec2) -> Self {
        Self {
            points: [first, second],
            count: 2,
        }
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.points[..self.count]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Everything the solver needs to resolve one pairwise collision.
///
/// Built fresh for each colliding pair during a sub-step and dropped once
/// the impulses are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManifold {
    pub body_a_idx: usize,
    pub body_b_idx: usize,
    /// The collision normal, pointing from body A towards body B.
    pub normal: Vec2,
    pub depth: f64,
    pub contacts: ContactPoints,
}

impl CollisionManifold {
    pub fn new(
        body_a_idx: usize,
        body_b_idx: usize,
        collision: Collision,
        contacts: ContactPoints,
    ) -> Self {
        Self {
            body_a_idx,
            body_b_idx,
            normal: collision.normal,
            depth: collision.depth,
            contacts,
        }
    }

    pub fn contact_points(&self) -> &[Vec2] {
        self.contacts.as_slice()
    }
}
