use std::path::PathBuf;
use thiserror::Error;

/// Rejected render settings
///
/// All of these are raised by `RenderConfig::validate` (or while loading a
/// config) before any canvas is allocated.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Seed side length must be strictly positive
    #[error("side length must be positive, got {0}")]
    NonPositiveSide(f64),

    /// A real-valued setting was NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NonFiniteValue { field: &'static str, value: f64 },

    /// Seed vertices would land too far out to be snapped to pixels safely
    #[error("{field} = {value} with side {side} puts the seed beyond ±{max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        side: f64,
        max: f64,
    },

    /// Canvas width or height of zero
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    ZeroCanvas { width: u32, height: u32 },

    /// Iteration count beyond what fits comfortably in memory
    #[error("{requested} iterations requested, at most {max} are supported")]
    TooManyIterations { requested: u32, max: u32 },

    /// Colour string that is not `RRGGBB` / `#RRGGBB`
    #[error("invalid colour {0:?}, expected hex RRGGBB")]
    Color(String),

    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `RenderConfig`
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can stop a render
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to serialize triangles: {0}")]
    Serialize(#[from] serde_json::Error),
}
