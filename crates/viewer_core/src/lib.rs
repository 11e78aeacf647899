//! # Viewer Core
//!
//! The algorithmic core of a small scene viewer: a software rasterizer over
//! a simulated pixel grid and a Wavefront OBJ/MTL loader.
//!
//! ## Features
//!
//! - **Pixel Grid**: bounds-checked cell writes, DDA lines with
//!   supersampled edges, and midpoint circles
//! - **Wavefront Loading**: positions, normals, texture coordinates and
//!   triangle faces, with `mtllib` material libraries
//! - **Diagnostics**: malformed lines are skipped and reported, never fatal
//! - **Configuration**: TOML or RON files through serde
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use viewer_core::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registry = MaterialRegistry::new();
//!     let mut loader = ObjLoader::new(&mut registry);
//!     loader.load("models/teapot.obj", FileKind::Geometry)?;
//!     let model = loader.into_model();
//!     println!("{} triangles", model.triangle_count());
//!
//!     let mut grid = PixelGrid::from_config(&RasterConfig::default(), NullSink);
//!     draw_showcase(&mut grid);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

// Configuration
pub mod config;
pub mod core;

pub mod foundation;
pub mod assets;
pub mod render;

/// Common imports for viewer users
pub mod prelude {
    pub use crate::{
        assets::{
            FileKind, Material, MaterialAttribute, MaterialRegistry, ModelBuffer, ObjError, ObjLoader,
            ParseDiagnostic, ParseIssue,
        },
        core::config::{Config, ConfigError, LoaderConfig, RasterConfig, ViewerConfig},
        foundation::{math::Vec3, Color},
        render::{draw_showcase, CircleReflection, LogSink, NullSink, PixelGrid, PixelQuad, PixelSink},
    };
}
