//! Requirement Calculation
//!
//! Derives the ordered set of required SDK components from project
//! configuration. Pure: no filesystem or network access.

use std::cmp::Ordering;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use droid_deps_core::{ProjectConfig, Result};

use crate::component::compare_versions;
use crate::DEFAULT_BUILD_TOOLS_VERSION;

/// A required SDK component kind plus its version constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Exact platform API level
    Platform { api: u32 },
    /// Build-tools at or above the minimum. `None` means the minimum could
    /// not be determined from configuration; the resolver treats that as a
    /// configuration error rather than silently skipping the component.
    BuildTools { minimum: Option<String> },
    /// Any platform-tools install
    PlatformTools,
    /// Any NDK install
    Ndk,
}

/// Build configuration defaults, the analog of the toolchain's shared
/// property defaults file.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildDefaults {
    /// Minimum build-tools version required by the build configuration
    pub build_tools_version: Option<String>,
}

impl Default for BuildDefaults {
    fn default() -> Self {
        Self {
            build_tools_version: Some(DEFAULT_BUILD_TOOLS_VERSION.to_string()),
        }
    }
}

impl BuildDefaults {
    /// Load defaults from a TOML override file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let defaults = toml::from_str(&content)?;
        Ok(defaults)
    }
}

/// Calculates which SDK components a project requires.
pub struct RequirementCalculator;

impl RequirementCalculator {
    /// Derive the ordered requirements for a project.
    ///
    /// Always requires the resolved target platform, a build-tools minimum,
    /// and platform-tools. The NDK is required only for plain (unprofiled)
    /// AOT, LLVM code generation, or assembly bundling; profiled AOT alone
    /// happens at runtime and needs no native toolchain at build time.
    pub fn calculate(
        config: &ProjectConfig,
        latest_known_platform: u32,
        defaults: &BuildDefaults,
    ) -> Result<Vec<Requirement>> {
        let api = config.resolve_target_api(latest_known_platform)?;

        let mut required = vec![
            Requirement::Platform { api },
            Requirement::BuildTools {
                minimum: Self::build_tools_minimum(config, defaults),
            },
            Requirement::PlatformTools,
        ];

        if Self::ndk_required(config) {
            required.push(Requirement::Ndk);
        }

        debug!(
            "Calculated {} requirement(s) for API {} (ndk={})",
            required.len(),
            api,
            Self::ndk_required(config)
        );

        Ok(required)
    }

    /// The build-tools minimum: the configured default, or the project's
    /// pin when it is higher.
    fn build_tools_minimum(config: &ProjectConfig, defaults: &BuildDefaults) -> Option<String> {
        match (&defaults.build_tools_version, &config.build_tools_version) {
            (Some(default), Some(pinned)) => {
                if compare_versions(pinned, default) == Ordering::Greater {
                    Some(pinned.clone())
                } else {
                    Some(default.clone())
                }
            }
            (Some(default), None) => Some(default.clone()),
            (None, Some(pinned)) => Some(pinned.clone()),
            (None, None) => None,
        }
    }

    fn ndk_required(config: &ProjectConfig) -> bool {
        let plain_aot = config.aot_assemblies && !config.profiled_aot;
        plain_aot || config.enable_llvm || config.bundle_assemblies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droid_deps_core::DepsError;
    use std::io::Write;

    fn calculate(config: &ProjectConfig) -> Vec<Requirement> {
        RequirementCalculator::calculate(config, 35, &BuildDefaults::default()).unwrap()
    }

    fn has_ndk(required: &[Requirement]) -> bool {
        required.contains(&Requirement::Ndk)
    }

    fn base_config() -> ProjectConfig {
        ProjectConfig {
            target_framework_version: Some("v13.0".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_llvm_alone_requires_ndk() {
        let config = ProjectConfig {
            enable_llvm: true,
            ..base_config()
        };
        assert!(has_ndk(&calculate(&config)));
    }

    #[test]
    fn test_profiled_aot_alone_does_not_require_ndk() {
        let config = ProjectConfig {
            aot_assemblies: true,
            profiled_aot: true,
            ..base_config()
        };
        assert!(!has_ndk(&calculate(&config)));
    }

    #[test]
    fn test_bundle_assemblies_requires_ndk() {
        let config = ProjectConfig {
            bundle_assemblies: true,
            profiled_aot: true,
            ..base_config()
        };
        assert!(has_ndk(&calculate(&config)));
    }

    #[test]
    fn test_plain_aot_requires_ndk() {
        let config = ProjectConfig {
            aot_assemblies: true,
            ..base_config()
        };
        assert!(has_ndk(&calculate(&config)));
    }

    #[test]
    fn test_no_native_flags_no_ndk() {
        let required = calculate(&base_config());
        assert_eq!(
            required,
            vec![
                Requirement::Platform { api: 33 },
                Requirement::BuildTools {
                    minimum: Some(DEFAULT_BUILD_TOOLS_VERSION.to_string())
                },
                Requirement::PlatformTools,
            ]
        );
    }

    #[test]
    fn test_use_latest_platform() {
        let config = ProjectConfig {
            use_latest_platform: true,
            ..base_config()
        };
        assert!(calculate(&config).contains(&Requirement::Platform { api: 35 }));
    }

    #[test]
    fn test_project_pin_raises_minimum() {
        let config = ProjectConfig {
            build_tools_version: Some("99.0.0".to_string()),
            ..base_config()
        };
        assert!(calculate(&config).contains(&Requirement::BuildTools {
            minimum: Some("99.0.0".to_string())
        }));
    }

    #[test]
    fn test_project_pin_below_default_keeps_default() {
        let config = ProjectConfig {
            build_tools_version: Some("1.0.0".to_string()),
            ..base_config()
        };
        assert!(calculate(&config).contains(&Requirement::BuildTools {
            minimum: Some(DEFAULT_BUILD_TOOLS_VERSION.to_string())
        }));
    }

    #[test]
    fn test_unknown_framework_version_is_configuration_error() {
        let config = ProjectConfig {
            target_framework_version: Some("v99.9".to_string()),
            ..Default::default()
        };
        let result = RequirementCalculator::calculate(&config, 35, &BuildDefaults::default());
        assert!(matches!(result, Err(DepsError::Configuration(_))));
    }

    #[test]
    fn test_defaults_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "build_tools_version = \"34.0.0\"").unwrap();

        let defaults = BuildDefaults::load(file.path()).unwrap();
        assert_eq!(defaults.build_tools_version.as_deref(), Some("34.0.0"));
    }
}
