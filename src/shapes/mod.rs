pub mod circle;
pub mod polygon;

pub use circle::Circle;
pub use polygon::Polygon;

/// Geometric description of a rigid body, expressed in the body's local space.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    /// Convex polygon; boxes are polygons built by [`Polygon::rectangle`].
    Polygon(Polygon),
}

impl Shape {
    pub fn area(&self) -> f64 {
        match self {
            Shape::Circle(circle) => circle.area(),
            Shape::Polygon(polygon) => polygon.area(),
        }
    }

    pub fn inertia(&self, mass: f64) -> f64 {
        match self {
            Shape::Circle(circle) => circle.inertia(mass),
            Shape::Polygon(polygon) => polygon.inertia(mass),
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}
