//! Android SDK Dependency Management
//!
//! Computes which SDK components (platforms, build-tools, platform-tools,
//! NDK) a project requires, diffs them against what an SDK root already
//! contains, and drives an external installer for the gaps:
//!
//! inventory scan -> requirement calculation -> resolution -> installation
//! -> report emission.

pub mod component;
pub mod installer;
pub mod inventory;
pub mod report;
pub mod requirements;
pub mod resolver;

pub use component::{compare_versions, ComponentId};
pub use installer::{
    InstallOutcome, InstallReport, InstallerDriver, PackageInstaller, SdkManagerInstaller,
};
pub use inventory::SdkInventory;
pub use report::ReportEmitter;
pub use requirements::{BuildDefaults, Requirement, RequirementCalculator};
pub use resolver::{ComponentStatus, DependencyDecision, DependencyResolver, ResolvedComponent};

/// Latest platform API level known to this release; used when a project
/// opts into the latest platform instead of pinning a version.
pub const LATEST_KNOWN_PLATFORM: u32 = 35;

/// Minimum build-tools version required by the default build configuration.
pub const DEFAULT_BUILD_TOOLS_VERSION: &str = "35.0.0";

#[cfg(test)]
mod pipeline_tests {
    use super::*;
    use droid_deps_core::ProjectConfig;

    fn release_v8_project() -> ProjectConfig {
        ProjectConfig {
            target_framework_version: Some("v8.0".to_string()),
            release: true,
            use_latest_platform: false,
            ..Default::default()
        }
    }

    async fn decision_lines(config: &ProjectConfig, root: &std::path::Path) -> Vec<String> {
        let inventory = SdkInventory::scan(root).await;
        let required =
            RequirementCalculator::calculate(config, LATEST_KNOWN_PLATFORM, &BuildDefaults::default())
                .unwrap();
        let decision = DependencyResolver::resolve(&required, &inventory).unwrap();
        ReportEmitter::emit(&decision)
    }

    #[tokio::test]
    async fn test_release_project_against_empty_sdk_root() {
        let dir = tempfile::tempdir().unwrap();
        let lines = decision_lines(&release_v8_project(), dir.path()).await;

        // No AOT/LLVM/bundling flags, so no NDK line.
        assert_eq!(
            lines,
            vec![
                "platforms/android-26".to_string(),
                format!("build-tools/{}", DEFAULT_BUILD_TOOLS_VERSION),
                "platform-tools".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_sdk_root_behaves_like_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("android-sdk");

        let lines = decision_lines(&release_v8_project(), &missing).await;
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_pipeline_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("platforms/android-26")).unwrap();
        std::fs::create_dir_all(dir.path().join("platform-tools")).unwrap();

        let config = release_v8_project();
        let first = decision_lines(&config, dir.path()).await;
        let second = decision_lines(&config, dir.path()).await;
        assert_eq!(first, second);
    }
}
