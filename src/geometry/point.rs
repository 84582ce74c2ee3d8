// Serialization traits - lets a final generation be dumped to JSON
use serde::{Deserialize, Serialize};

/// A position in canvas space
///
/// `x` grows to the right and `y` grows downward, matching image rows.
///
/// **Rust Concept: Copy types**
/// Two `f64`s fit in 16 bytes, so `Point` derives `Copy`: passing it around
/// duplicates the bits instead of moving ownership. No `.clone()` noise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when neither coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Nearest pixel coordinate, as the rasterizer wants it
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// Midpoint of the segment between `p1` and `p2`
pub fn midpoint(p1: Point, p2: Point) -> Point {
    Point {
        x: (p1.x + p2.x) / 2.0,
        y: (p1.y + p2.y) / 2.0,
    }
}
