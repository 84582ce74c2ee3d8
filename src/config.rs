// Render settings: defaults, JSON loading and validation

use crate::error::ConfigError;

// Serialization support for config files
use serde::{Deserialize, Serialize};

use std::fs;
use std::path::{Path, PathBuf};

/// Largest accepted iteration count
///
/// 3^14 ≈ 4.8 million triangles is already a few hundred MB of vertices.
pub const MAX_ITERATIONS: u32 = 14;

/// Largest distance from the origin any seed vertex may reach
///
/// Vertices are snapped to `i32` pixels for the rasterizer, whose line
/// stepping adds coordinates together; keeping them within ±1e6 leaves it
/// far from overflow.
pub const MAX_COORDINATE: f64 = 1e6;

/// Everything needed to render one image
///
/// `#[serde(default)]` lets a config file set only the fields it cares about;
/// the rest fall back to `RenderConfig::default()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Canvas colour before any triangle is drawn
    pub background: [u8; 3],
    /// Colour of every final-generation triangle
    pub fill: [u8; 3],
    /// Number of subdivision rounds; the image holds 3^iterations triangles
    pub iterations: u32,
    /// Side length of the seed triangle
    pub side: f64,
    /// Apex x coordinate of the seed triangle
    pub offset_x: f64,
    /// Apex y coordinate of the seed triangle
    pub offset_y: f64,
    /// Destination file; the format follows the extension
    pub output: PathBuf,
    /// Subdivide each generation on the rayon pool
    pub parallel: bool,
    /// Also write the final generation as JSON here
    pub dump_triangles: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            background: [255, 255, 255],
            fill: [0, 0, 0],
            iterations: 8,
            side: 900.0,
            offset_x: 500.0,
            offset_y: 50.0,
            output: PathBuf::from("sierpinski.png"),
            parallel: false,
            dump_triangles: None,
        }
    }
}

impl RenderConfig {
    /// Load a config from a JSON file
    ///
    /// Missing fields take their default values. The result is not validated
    /// here; the render driver does that right before drawing.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fail fast on settings that cannot produce an image
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("side", self.side),
            ("offset_x", self.offset_x),
            ("offset_y", self.offset_y),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue { field, value });
            }
        }

        if self.side <= 0.0 {
            return Err(ConfigError::NonPositiveSide(self.side));
        }

        // Every vertex of every generation lies inside the seed, whose extent
        // from the apex is at most `side` along each axis.
        for (field, offset) in [("offset_x", self.offset_x), ("offset_y", self.offset_y)] {
            if offset.abs() + self.side > MAX_COORDINATE {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: offset,
                    side: self.side,
                    max: MAX_COORDINATE,
                });
            }
        }

        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroCanvas {
                width: self.width,
                height: self.height,
            });
        }

        if self.iterations > MAX_ITERATIONS {
            return Err(ConfigError::TooManyIterations {
                requested: self.iterations,
                max: MAX_ITERATIONS,
            });
        }

        Ok(())
    }
}

/// Parse a hex colour such as `ff8800` or `#FF8800`
pub fn parse_hex_color(s: &str) -> Result<[u8; 3], ConfigError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::Color(s.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ConfigError::Color(s.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}
