//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and TRS decomposition
//! - Arena handle types
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
