// Defines an Axis-Aligned Bounding Box

use crate::math::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Creates a new AABB, swapping coordinates as needed so `min <= max`.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Aabb {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box of half-size `radius` around `center`.
    pub fn from_circle(center: Vec2, radius: f64) -> Self {
        let r = Vec2::new(radius, radius);
        Aabb {
            min: center - r,
            max: center + r,
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Aabb { min, max })
    }

    /// Inclusive overlap test; boxes that share an edge overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}
