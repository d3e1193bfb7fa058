//! droid-deps - Android SDK dependency calculation and installation
//!
//! Computes which Android SDK components (platforms, build-tools,
//! platform-tools, NDK) a project requires, detects what an SDK root
//! already contains, and drives the external package installer for the
//! gaps.
//!
//! ## Architecture
//!
//! - `droid-deps-core`: error taxonomy and per-invocation project
//!   configuration
//! - `droid-deps-sdk`: inventory scanning, requirement calculation,
//!   resolution, installer driving, report emission

pub mod commands;
pub mod project;

// Re-export member crates for library usage
pub use droid_deps_core as core;
pub use droid_deps_sdk as sdk;

/// Prelude module for convenient imports
pub mod prelude {
    pub use droid_deps_core::{DepsError, ProjectConfig, Result, SdkRootResolver};
    pub use droid_deps_sdk::{
        BuildDefaults, ComponentId, DependencyDecision, DependencyResolver, InstallReport,
        InstallerDriver, PackageInstaller, ReportEmitter, RequirementCalculator, SdkInventory,
    };
}
