// Library root for the Sierpinski triangle renderer
//
// This file is the entry point for the library crate (sierpinski)
// It declares all the modules that make up our library
//
// - geometry: points, triangles, the seed and midpoint subdivision (pure)
// - generation: repeated subdivision of a whole set of triangles
// - canvas: rasterizing triangles and saving the image
// - render: the driver tying config, geometry and canvas together

pub mod geometry;
pub mod generation;

pub mod canvas;
pub mod config;
pub mod error;
pub mod render;

// Re-export commonly used types at the library root for convenience
// This allows users to write:
//   use sierpinski::Triangle;
// instead of:
//   use sierpinski::geometry::Triangle;
pub use config::RenderConfig;
pub use error::{ConfigError, RenderError};
pub use generation::Generation;
pub use geometry::{equilateral_triangle, midpoint, subdivide, GeometryError, Point, Triangle};
pub use render::{render_image, render_to_file, RenderSummary};
