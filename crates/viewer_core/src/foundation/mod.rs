//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Colors
//! - Logging utilities

pub mod math;
pub mod color;
pub mod logging;

pub use color::Color;
