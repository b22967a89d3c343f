//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use gradient::{gradient, gradient_unit, gradient_vec};
pub use util::*;

mod gradient;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
