//! droid-deps core - shared types
//!
//! This crate provides the error taxonomy and per-invocation project
//! configuration shared by the dependency calculation pipeline.

pub mod config;
pub mod error;

pub use config::{api_level_for_framework, ProjectConfig, SdkRootResolver};
pub use error::{DepsError, Result};

/// droid-deps version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
