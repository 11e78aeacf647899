//! # Core Module
//!
//! Shared abstractions used by both subsystems. At present this is the
//! unified configuration system.

pub mod config;

// Re-export commonly used config types
pub use config::{
    Config,
    ConfigError,
    LoaderConfig,
    RasterConfig,
    ViewerConfig,
};
