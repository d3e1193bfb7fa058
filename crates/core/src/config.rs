//! Project Configuration
//!
//! Builds the immutable per-invocation configuration from string-typed
//! build properties and resolves the Android SDK root.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DepsError, Result};

/// Build property keys recognized by [`ProjectConfig::from_properties`].
pub mod properties {
    pub const TARGET_FRAMEWORK_VERSION: &str = "TargetFrameworkVersion";
    pub const CONFIGURATION: &str = "Configuration";
    pub const AOT_ASSEMBLIES: &str = "AotAssemblies";
    pub const ENABLE_LLVM: &str = "EnableLLVM";
    pub const BUNDLE_ASSEMBLIES: &str = "BundleAssemblies";
    pub const ENABLE_PROFILED_AOT: &str = "AndroidEnableProfiledAot";
    pub const USE_LATEST_PLATFORM: &str = "AndroidUseLatestPlatformSdk";
    pub const BUILD_TOOLS_VERSION: &str = "AndroidSdkBuildToolsVersion";
    pub const SDK_DIRECTORY: &str = "AndroidSdkDirectory";
    pub const REFERENCES_ROOT: &str = "TargetFrameworkRootPath";
}

/// Project configuration driving dependency calculation.
///
/// Created once per build invocation and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Target framework version string, e.g. "v8.0"
    pub target_framework_version: Option<String>,
    /// Release (true) or debug (false) build
    pub release: bool,
    /// Ahead-of-time compilation of assemblies
    pub aot_assemblies: bool,
    /// LLVM code generation
    pub enable_llvm: bool,
    /// Profiled (runtime-assisted) AOT
    pub profiled_aot: bool,
    /// Bundle assemblies into a native library
    pub bundle_assemblies: bool,
    /// Target the latest known platform instead of an explicit version
    pub use_latest_platform: bool,
    /// Build-tools version pinned by the project, if any
    pub build_tools_version: Option<String>,
    /// Explicit SDK root from project properties
    pub sdk_root: Option<PathBuf>,
    /// Framework references root from project properties
    pub references_root: Option<PathBuf>,
}

impl ProjectConfig {
    /// Build a configuration from string-typed build properties.
    ///
    /// Unknown keys are ignored; flag values are parsed case-insensitively
    /// ("true"/"True"). Missing flags default to false.
    pub fn from_properties(props: &HashMap<String, String>) -> Self {
        let get = |key: &str| props.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let config = Self {
            target_framework_version: get(properties::TARGET_FRAMEWORK_VERSION)
                .map(str::to_string),
            release: get(properties::CONFIGURATION)
                .map(|v| v.eq_ignore_ascii_case("release"))
                .unwrap_or(false),
            aot_assemblies: parse_flag(get(properties::AOT_ASSEMBLIES)),
            enable_llvm: parse_flag(get(properties::ENABLE_LLVM)),
            profiled_aot: parse_flag(get(properties::ENABLE_PROFILED_AOT)),
            bundle_assemblies: parse_flag(get(properties::BUNDLE_ASSEMBLIES)),
            use_latest_platform: parse_flag(get(properties::USE_LATEST_PLATFORM)),
            build_tools_version: get(properties::BUILD_TOOLS_VERSION).map(str::to_string),
            sdk_root: get(properties::SDK_DIRECTORY).map(PathBuf::from),
            references_root: get(properties::REFERENCES_ROOT).map(PathBuf::from),
        };

        debug!("Project configuration: {:?}", config);
        config
    }

    /// Resolve the target platform API level.
    ///
    /// Uses `latest_known_platform` when the project opts into the latest
    /// platform, otherwise maps the explicit framework version.
    pub fn resolve_target_api(&self, latest_known_platform: u32) -> Result<u32> {
        if self.use_latest_platform {
            return Ok(latest_known_platform);
        }

        let version = self.target_framework_version.as_deref().ok_or_else(|| {
            DepsError::Configuration(
                "TargetFrameworkVersion is not set and the latest platform is not requested"
                    .to_string(),
            )
        })?;

        api_level_for_framework(version).ok_or_else(|| {
            DepsError::Configuration(format!("Unknown TargetFrameworkVersion '{}'", version))
        })
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    value.map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

/// Map a target framework version string to an Android API level.
pub fn api_level_for_framework(version: &str) -> Option<u32> {
    match version.trim() {
        "v4.4" => Some(19),
        "v5.0" => Some(21),
        "v5.1" => Some(22),
        "v6.0" => Some(23),
        "v7.0" => Some(24),
        "v7.1" => Some(25),
        "v8.0" => Some(26),
        "v8.1" => Some(27),
        "v9.0" => Some(28),
        "v10.0" => Some(29),
        "v11.0" => Some(30),
        "v12.0" => Some(31),
        "v12.1" => Some(32),
        "v13.0" => Some(33),
        "v14.0" => Some(34),
        "v15.0" => Some(35),
        _ => None,
    }
}

/// Resolves the SDK root once per build invocation.
///
/// Environment variables are snapshotted at construction and treated as
/// immutable for the invocation's duration; nothing here mutates process
/// environment.
#[derive(Debug, Clone)]
pub struct SdkRootResolver {
    env_root: Option<PathBuf>,
}

impl SdkRootResolver {
    /// Snapshot the environment-provided SDK root, if any.
    pub fn from_env() -> Self {
        let env_root = ["ANDROID_SDK_PATH", "ANDROID_SDK_ROOT", "ANDROID_HOME"]
            .iter()
            .find_map(|var| std::env::var_os(var).map(PathBuf::from));

        Self { env_root }
    }

    /// Create a resolver with a fixed environment override (used by tests
    /// and embedders that manage their own environment).
    pub fn with_override(root: Option<PathBuf>) -> Self {
        Self { env_root: root }
    }

    /// Resolve the SDK root: explicit project configuration beats the
    /// environment snapshot, which beats well-known per-OS locations.
    ///
    /// The returned path may not exist; a missing root is a legitimate
    /// starting state for installation flows.
    pub fn resolve(&self, config: &ProjectConfig) -> Option<PathBuf> {
        if let Some(root) = &config.sdk_root {
            debug!("SDK root from project configuration: {:?}", root);
            return Some(root.clone());
        }

        if let Some(root) = &self.env_root {
            debug!("SDK root from environment: {:?}", root);
            return Some(root.clone());
        }

        let found = Self::well_known_candidates().into_iter().find(|p| p.exists());
        if found.is_none() {
            warn!("No Android SDK root configured and none found in well-known locations");
        }
        found
    }

    /// Well-known SDK locations, in probe order.
    fn well_known_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if cfg!(windows) {
            if let Some(home) = dirs::home_dir() {
                candidates.push(home.join("AppData").join("Local").join("Android").join("Sdk"));
            }
            if let Some(local) = dirs::data_local_dir() {
                candidates.push(local.join("Android").join("Sdk"));
            }
            candidates.push(PathBuf::from(r"C:\Android\sdk"));
        }

        if cfg!(unix) {
            if let Some(home) = dirs::home_dir() {
                candidates.push(home.join("Android").join("Sdk"));
                candidates.push(home.join("android-sdk"));
            }
            candidates.push(PathBuf::from("/opt/android-sdk"));
            candidates.push(PathBuf::from("/usr/local/android-sdk"));
        }

        candidates
    }
}
