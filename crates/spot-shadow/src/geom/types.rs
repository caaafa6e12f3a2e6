use nalgebra::{Vector2, Vector3};

/// Point (or vector) in the receiving plane.
pub type Point2 = Vector2<f64>;

/// Point in space; `z` is height above an arbitrary ground level.
pub type Point3 = Vector3<f64>;
