//! Installer Driver
//!
//! Drives an external package installer for missing components, with
//! license-acceptance gating and per-component result aggregation.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info, warn};

use droid_deps_core::{DepsError, Result};

use crate::component::ComponentId;
use crate::resolver::DependencyDecision;

/// Outcome of a single component installation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum InstallOutcome {
    Installed,
    Failed { reason: String },
    /// The installer is known to be unreliable on the current OS.
    UnsupportedPlatform { reason: String },
    Cancelled,
}

/// External package installer collaborator.
///
/// Implementations perform the actual fetch/unpack; this crate only drives
/// them.
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Whether installing this component requires license acceptance.
    fn requires_license(&self, component: &ComponentId) -> bool;

    /// Install one component. Must not prompt; license acceptance has
    /// already been granted when this is called.
    async fn install(&self, component: &ComponentId) -> InstallOutcome;
}

/// Aggregate result of an installation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// Components successfully installed
    pub installed: Vec<ComponentId>,
    /// Components that failed, with reasons
    pub failed: Vec<(ComponentId, String)>,
}

impl InstallReport {
    /// Number of installations attempted.
    pub fn attempted(&self) -> usize {
        self.installed.len() + self.failed.len()
    }

    /// Overall success: every required installation succeeded.
    pub fn ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives the external installer over a dependency decision.
pub struct InstallerDriver<I: PackageInstaller> {
    installer: I,
    timeout: Option<Duration>,
}

impl<I: PackageInstaller> InstallerDriver<I> {
    pub fn new(installer: I) -> Self {
        Self {
            installer,
            timeout: None,
        }
    }

    /// Bound each installer invocation; expiry is reported as cancellation.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Install every must-install component in the decision.
    ///
    /// License gate is all-or-nothing: if acceptance was not granted and
    /// any candidate requires it, nothing is attempted. A per-component
    /// failure does not abort the remaining installations; the report is
    /// only `ok()` when all of them succeeded. Unsupported-platform and
    /// cancellation abort with their own error variants so callers can
    /// skip or unwind rather than misreport success.
    pub async fn install(
        &self,
        decision: &DependencyDecision,
        accept_licenses: bool,
    ) -> Result<InstallReport> {
        let missing: Vec<&ComponentId> = decision.missing().collect();

        if missing.is_empty() {
            info!("No SDK components to install");
            return Ok(InstallReport::default());
        }

        if !accept_licenses {
            if let Some(component) = missing
                .iter()
                .find(|c| self.installer.requires_license(c))
            {
                return Err(DepsError::LicenseRequired(component.to_string()));
            }
        }

        let mut report = InstallReport::default();

        for component in missing {
            info!("Installing {}", component);

            let attempt = self.installer.install(component);
            let outcome = match self.timeout {
                Some(limit) => tokio::time::timeout(limit, attempt)
                    .await
                    .unwrap_or(InstallOutcome::Cancelled),
                None => attempt.await,
            };

            match outcome {
                InstallOutcome::Installed => {
                    info!("Installed {}", component);
                    report.installed.push(component.clone());
                }
                InstallOutcome::Failed { reason } => {
                    warn!("Failed to install {}: {}", component, reason);
                    report.failed.push((component.clone(), reason));
                }
                InstallOutcome::UnsupportedPlatform { reason } => {
                    return Err(DepsError::UnsupportedPlatform(reason));
                }
                InstallOutcome::Cancelled => {
                    warn!("Installation of {} was cancelled", component);
                    return Err(DepsError::Cancelled);
                }
            }
        }

        info!(
            "Installation finished: {} installed, {} failed",
            report.installed.len(),
            report.failed.len()
        );

        Ok(report)
    }
}

/// Installer backed by the Android `sdkmanager` command-line tool.
pub struct SdkManagerInstaller {
    sdk_root: PathBuf,
    sdkmanager_path: PathBuf,
}

impl SdkManagerInstaller {
    /// Locate `sdkmanager` under the SDK root.
    pub fn new(sdk_root: PathBuf) -> Result<Self> {
        let sdkmanager_path = Self::find_sdkmanager(&sdk_root).ok_or_else(|| {
            DepsError::Configuration(format!(
                "sdkmanager not found under {:?}; install cmdline-tools first",
                sdk_root
            ))
        })?;

        Ok(Self {
            sdk_root,
            sdkmanager_path,
        })
    }

    /// Find the sdkmanager executable
    fn find_sdkmanager(sdk_root: &std::path::Path) -> Option<PathBuf> {
        let exe_name = if cfg!(windows) { "sdkmanager.bat" } else { "sdkmanager" };

        // Preferred: cmdline-tools/latest
        let path = sdk_root
            .join("cmdline-tools")
            .join("latest")
            .join("bin")
            .join(exe_name);
        if path.exists() {
            return Some(path);
        }

        // Versioned cmdline-tools
        let cmdline_tools = sdk_root.join("cmdline-tools");
        if let Ok(entries) = std::fs::read_dir(&cmdline_tools) {
            for entry in entries.flatten() {
                let path = entry.path().join("bin").join(exe_name);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        // Legacy tools directory
        let path = sdk_root.join("tools").join("bin").join(exe_name);
        if path.exists() {
            return Some(path);
        }

        None
    }

    fn create_command(&self) -> Command {
        let mut cmd = Command::new(&self.sdkmanager_path);
        cmd.env("ANDROID_SDK_ROOT", &self.sdk_root);
        cmd.env("ANDROID_HOME", &self.sdk_root);
        cmd
    }
}

#[async_trait]
impl PackageInstaller for SdkManagerInstaller {
    fn requires_license(&self, _component: &ComponentId) -> bool {
        // Every SDK package ships under a license that must be accepted.
        true
    }

    async fn install(&self, component: &ComponentId) -> InstallOutcome {
        if cfg!(windows) {
            // sdkmanager-driven installs are unreliable on Windows; callers
            // should skip rather than misreport success.
            return InstallOutcome::UnsupportedPlatform {
                reason: "sdkmanager installs are not supported on Windows".to_string(),
            };
        }

        let package = component.package_name();
        debug!("Invoking sdkmanager for {}", package);

        let mut child = match self
            .create_command()
            .arg(&package)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return InstallOutcome::Failed {
                    reason: format!("failed to spawn sdkmanager: {}", e),
                }
            }
        };

        // Confirm remaining prompts; licenses were accepted up front.
        if let Some(mut stdin) = child.stdin.take() {
            use tokio::io::AsyncWriteExt;
            for _ in 0..10 {
                if stdin.write_all(b"y\n").await.is_err() {
                    break;
                }
            }
        }

        match child.wait_with_output().await {
            Ok(output) if output.status.success() => InstallOutcome::Installed,
            Ok(output) => InstallOutcome::Failed {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            },
            Err(e) => InstallOutcome::Failed {
                reason: format!("sdkmanager did not exit cleanly: {}", e),
            },
        }
    }
}
