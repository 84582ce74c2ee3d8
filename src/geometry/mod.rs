// This file declares the geometry module and its submodules
//
// Everything in here is pure: no I/O, no drawing, no shared state.
// - `point` holds the coordinate value type and `midpoint`
// - `triangle` holds the Triangle value type, the seed constructor and `subdivide`

use thiserror::Error;

mod point;
mod triangle;

// Re-export so users can write `use sierpinski::geometry::Triangle;`
// instead of `use sierpinski::geometry::triangle::Triangle;`
pub use point::{midpoint, Point};
pub use triangle::{equilateral_triangle, is_collinear, subdivide, Triangle};

/// Errors raised when building a triangle from caller-supplied points
///
/// Triangles produced by `equilateral_triangle` and `subdivide` never hit these;
/// they only guard the checked constructor `Triangle::new`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate was NaN or infinite
    #[error("triangle vertex {0:?} has a non-finite coordinate")]
    NonFinite(Point),

    /// The three points are duplicated or lie on one line
    #[error("triangle vertices {0:?}, {1:?}, {2:?} are collinear")]
    Degenerate(Point, Point, Point),
}
