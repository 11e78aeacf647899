//! # Unified Configuration System
//!
//! Configuration structures for the two core subsystems, the raster grid and
//! the Wavefront loader, gathered under one serializable [`ViewerConfig`].
//!
//! ## Configuration Categories
//!
//! - **Raster Config**: grid dimensions, pixel size, background color and
//!   the circle reflection policy
//! - **Loader Config**: line buffer size, `mtllib` nesting limit and polygon
//!   handling for the OBJ/MTL parser

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::Color;
use crate::render::pixel_grid::CircleReflection;

/// # Raster Configuration
///
/// Defaults reproduce the whiteboard raster map of the scene viewer:
/// a 40x30 grid of 0.1-unit pixels over a dark grey background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Edge length of one cell in world units
    pub pixel_size: f32,
    /// Initial color of every cell
    pub background: Color,
    /// Which reflection set the circle rasterizer plots
    pub circle_reflection: CircleReflection,
}

impl RasterConfig {
    /// Create a raster configuration with the given grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the cell edge length
    pub fn with_pixel_size(mut self, pixel_size: f32) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    /// Set the background color
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the circle reflection policy
    pub fn with_circle_reflection(mut self, circle_reflection: CircleReflection) -> Self {
        self.circle_reflection = circle_reflection;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "raster grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.pixel_size.is_nan() || self.pixel_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pixel size must be positive, got {}",
                self.pixel_size
            )));
        }
        Ok(())
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            pixel_size: 0.1,
            background: Color::new(73.0, 74.0, 74.0, 255.0),
            circle_reflection: CircleReflection::default(),
        }
    }
}

/// # Loader Configuration
///
/// Limits applied while reading OBJ and MTL files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Characters of payload kept per line; the rest of a longer line is dropped
    pub max_line_length: usize,
    /// Deepest allowed chain of `mtllib` references
    pub max_include_depth: usize,
    /// Fan-triangulate faces with more than three vertices instead of dropping the extras
    pub triangulate_polygons: bool,
}

impl LoaderConfig {
    /// Enable or disable polygon triangulation
    pub fn with_triangulation(mut self, enabled: bool) -> Self {
        self.triangulate_polygons = enabled;
        self
    }

    /// Set the `mtllib` nesting limit
    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Set the per-line payload limit
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_length == 0 {
            return Err(ConfigError::Invalid("max line length must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_line_length: 99,
            max_include_depth: 8,
            triangulate_polygons: false,
        }
    }
}

/// # Complete Viewer Configuration
///
/// Top-level configuration that applications load from TOML or RON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Raster grid configuration
    pub raster: RasterConfig,
    /// OBJ/MTL loader configuration
    pub loader: LoaderConfig,
}

impl ViewerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.raster.validate()?;
        self.loader.validate()
    }
}

impl Config for ViewerConfig {}
