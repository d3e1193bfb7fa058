//! CLI commands for droid-deps
//!
//! Provides command-line interface functionality for automation and
//! scripting around the dependency pipeline.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use droid_deps_core::{DepsError, ProjectConfig, SdkRootResolver};
use droid_deps_sdk::{
    BuildDefaults, DependencyDecision, DependencyResolver, InstallerDriver, ReportEmitter,
    RequirementCalculator, SdkInventory, SdkManagerInstaller, LATEST_KNOWN_PLATFORM,
};

use crate::project;

/// Inputs shared by the check and install commands.
pub struct PipelineOptions {
    /// Build-property file (`Key=Value` lines)
    pub project_file: Option<PathBuf>,
    /// `KEY=VALUE` property overrides
    pub properties: Vec<String>,
    /// SDK root, overriding project properties and environment
    pub sdk_root: Option<PathBuf>,
    /// Build-defaults TOML override file
    pub defaults_file: Option<PathBuf>,
}

impl PipelineOptions {
    /// Run calculation and resolution against the current SDK root state.
    async fn resolve(&self) -> Result<(DependencyDecision, Option<PathBuf>)> {
        let mut props = match &self.project_file {
            Some(path) => project::load_properties(path)
                .with_context(|| format!("loading build properties from {}", path.display()))?,
            None => Default::default(),
        };
        project::apply_overrides(&mut props, &self.properties);

        let config = ProjectConfig::from_properties(&props);

        let defaults = match &self.defaults_file {
            Some(path) => BuildDefaults::load(path)
                .with_context(|| format!("loading build defaults from {}", path.display()))?,
            None => BuildDefaults::default(),
        };

        let sdk_root = match &self.sdk_root {
            Some(root) => Some(root.clone()),
            None => SdkRootResolver::from_env().resolve(&config),
        };

        let inventory = match &sdk_root {
            Some(root) => SdkInventory::scan(root).await,
            None => {
                warn!("No SDK root found; treating inventory as empty");
                SdkInventory::default()
            }
        };

        let required = RequirementCalculator::calculate(&config, LATEST_KNOWN_PLATFORM, &defaults)?;
        let decision = DependencyResolver::resolve(&required, &inventory)?;

        Ok((decision, sdk_root))
    }
}

/// Compute and print the dependency decision without installing anything.
pub struct CheckCommand {
    pub options: PipelineOptions,
    pub json: bool,
}

impl CheckCommand {
    pub async fn execute(&self) -> Result<()> {
        let (decision, _) = self.options.resolve().await?;

        if self.json {
            println!("{}", ReportEmitter::emit_json(&decision)?);
        } else {
            for line in ReportEmitter::emit(&decision) {
                println!("{}", line);
            }
        }

        if decision.is_fully_satisfied() {
            info!("All required SDK components are installed");
        } else {
            let missing: Vec<String> = decision.missing().map(|c| c.to_string()).collect();
            info!("Missing components: {}", missing.join(", "));
        }

        Ok(())
    }
}

/// Install whatever the decision marks as missing.
pub struct InstallCommand {
    pub options: PipelineOptions,
    pub accept_licenses: bool,
    pub timeout_secs: Option<u64>,
}

impl InstallCommand {
    pub async fn execute(&self) -> Result<()> {
        let (decision, sdk_root) = self.options.resolve().await?;

        if decision.is_fully_satisfied() {
            info!("Nothing to install");
            return Ok(());
        }

        let sdk_root = sdk_root.ok_or_else(|| {
            DepsError::Configuration("no SDK root configured for installation".to_string())
        })?;

        let installer = SdkManagerInstaller::new(sdk_root)?;
        let mut driver = InstallerDriver::new(installer);
        if let Some(secs) = self.timeout_secs {
            driver = driver.with_timeout(Duration::from_secs(secs));
        }

        match driver.install(&decision, self.accept_licenses).await {
            Ok(report) if report.ok() => {
                info!("Installed {} component(s)", report.installed.len());
                Ok(())
            }
            Ok(report) => {
                for (component, reason) in &report.failed {
                    warn!("{}", DepsError::ComponentInstall {
                        component: component.to_string(),
                        reason: reason.clone(),
                    });
                }
                bail!(
                    "{} of {} component installation(s) failed",
                    report.failed.len(),
                    report.attempted()
                );
            }
            Err(error) if error.is_skippable() => {
                // Skip gracefully rather than misreport success or failure.
                warn!("Skipping installation: {}", error.user_message());
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }
}
