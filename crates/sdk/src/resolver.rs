//! Dependency Resolution
//!
//! Diffs required components against the installed inventory and decides
//! what is already satisfied and what must be installed.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};

use droid_deps_core::{DepsError, Result};

use crate::component::{compare_versions, ComponentId};
use crate::inventory::SdkInventory;
use crate::requirements::Requirement;

/// Whether a required component is already present or must be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentStatus {
    AlreadySatisfied,
    MustInstall,
}

/// One resolved component in a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedComponent {
    pub id: ComponentId,
    pub status: ComponentStatus,
}

/// Ordered, duplicate-free list of resolved components.
///
/// Ordering is deterministic (platform, build-tools, platform-tools, NDK)
/// so emitted reports are stable across runs and platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyDecision {
    components: Vec<ResolvedComponent>,
}

impl DependencyDecision {
    /// Build a decision, enforcing the ordering and no-duplicates invariants.
    pub fn new(mut components: Vec<ResolvedComponent>) -> Self {
        components.sort_by(|a, b| a.id.cmp(&b.id));

        let mut seen = BTreeSet::new();
        components.retain(|c| seen.insert(c.id.clone()));

        Self { components }
    }

    /// All components in canonical order.
    pub fn components(&self) -> &[ResolvedComponent] {
        &self.components
    }

    /// Components that are not yet installed.
    pub fn missing(&self) -> impl Iterator<Item = &ComponentId> {
        self.components
            .iter()
            .filter(|c| c.status == ComponentStatus::MustInstall)
            .map(|c| &c.id)
    }

    /// True when nothing needs to be installed.
    pub fn is_fully_satisfied(&self) -> bool {
        self.missing().next().is_none()
    }
}

/// Resolves requirements against an installed inventory.
pub struct DependencyResolver;

impl DependencyResolver {
    /// Resolve each requirement to an installed component or an install
    /// target.
    ///
    /// Platforms match exactly; build-tools pick the lowest installed
    /// version satisfying the minimum, to avoid unnecessary installs;
    /// platform-tools and NDK are presence-only. An empty inventory is
    /// valid: every requirement then resolves to must-install.
    pub fn resolve(
        required: &[Requirement],
        inventory: &SdkInventory,
    ) -> Result<DependencyDecision> {
        let mut components = Vec::with_capacity(required.len());

        for requirement in required {
            let resolved = match requirement {
                Requirement::Platform { api } => ResolvedComponent {
                    id: ComponentId::Platform(*api),
                    status: presence(inventory.platforms.contains(api)),
                },
                Requirement::BuildTools { minimum } => {
                    Self::resolve_build_tools(minimum.as_deref(), inventory)?
                }
                Requirement::PlatformTools => ResolvedComponent {
                    id: ComponentId::PlatformTools,
                    status: presence(inventory.has_platform_tools),
                },
                Requirement::Ndk => ResolvedComponent {
                    id: ComponentId::NdkBundle,
                    status: presence(inventory.has_ndk()),
                },
            };
            debug!("Resolved {} -> {:?}", resolved.id, resolved.status);
            components.push(resolved);
        }

        let decision = DependencyDecision::new(components);
        let missing: Vec<String> = decision.missing().map(|c| c.to_string()).collect();
        if missing.is_empty() {
            info!("All required SDK components are installed");
        } else {
            info!("Missing SDK components: {}", missing.join(", "));
        }

        Ok(decision)
    }

    /// Lowest installed build-tools version at or above the minimum, or the
    /// minimum itself as the install target.
    fn resolve_build_tools(
        minimum: Option<&str>,
        inventory: &SdkInventory,
    ) -> Result<ResolvedComponent> {
        let minimum = minimum.ok_or_else(|| {
            DepsError::Configuration(
                "Required build-tools version could not be determined from build configuration"
                    .to_string(),
            )
        })?;

        let satisfying = inventory
            .build_tools
            .iter()
            .filter(|v| compare_versions(v, minimum) != Ordering::Less)
            .min_by(|a, b| compare_versions(a, b));

        Ok(match satisfying {
            Some(version) => ResolvedComponent {
                id: ComponentId::BuildTools(version.clone()),
                status: ComponentStatus::AlreadySatisfied,
            },
            None => ResolvedComponent {
                id: ComponentId::BuildTools(minimum.to_string()),
                status: ComponentStatus::MustInstall,
            },
        })
    }
}

fn presence(installed: bool) -> ComponentStatus {
    if installed {
        ComponentStatus::AlreadySatisfied
    } else {
        ComponentStatus::MustInstall
    }
}
