//! SDK Inventory
//!
//! Scans an SDK root and reports which components are currently installed.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::component::compare_versions;

/// Installed components found under an SDK root.
///
/// Rebuilt by scanning the filesystem on every invocation; the SDK root is
/// the source of truth, nothing is cached across processes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdkInventory {
    /// Installed platform API levels (platforms/android-N)
    pub platforms: BTreeSet<u32>,
    /// Installed build-tools versions, sorted ascending
    pub build_tools: Vec<String>,
    /// platform-tools directory present
    pub has_platform_tools: bool,
    /// ndk-bundle directory present
    pub has_ndk_bundle: bool,
    /// Versioned NDK installs (ndk/<version>), sorted ascending
    pub ndk_versions: Vec<String>,
}

impl SdkInventory {
    /// Scan an SDK root for installed components.
    ///
    /// A missing root yields an empty inventory rather than an error: a
    /// fresh root is a legitimate starting state for installation flows.
    /// Unknown or unreadable entries are skipped.
    pub async fn scan(root: &Path) -> Self {
        if !root.exists() {
            debug!("SDK root {:?} does not exist, inventory is empty", root);
            return Self::default();
        }

        let mut inventory = Self::default();

        for name in list_subdirectories(&root.join("platforms")).await {
            if let Some(api) = name.strip_prefix("android-").and_then(|v| v.parse().ok()) {
                inventory.platforms.insert(api);
            } else {
                debug!("Ignoring unrecognized platforms entry '{}'", name);
            }
        }

        inventory.build_tools = list_subdirectories(&root.join("build-tools")).await;
        inventory
            .build_tools
            .sort_by(|a, b| compare_versions(a, b));

        inventory.has_platform_tools = root.join("platform-tools").is_dir();
        inventory.has_ndk_bundle = root.join("ndk-bundle").is_dir();

        inventory.ndk_versions = list_subdirectories(&root.join("ndk")).await;
        inventory
            .ndk_versions
            .sort_by(|a, b| compare_versions(a, b));

        debug!(
            "Scanned {:?}: {} platform(s), {} build-tools, platform-tools={}, ndk={}",
            root,
            inventory.platforms.len(),
            inventory.build_tools.len(),
            inventory.has_platform_tools,
            inventory.has_ndk()
        );

        inventory
    }

    /// True when any NDK install is present (bundle or versioned).
    pub fn has_ndk(&self) -> bool {
        self.has_ndk_bundle || !self.ndk_versions.is_empty()
    }

    /// True when nothing is installed at all.
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
            && self.build_tools.is_empty()
            && !self.has_platform_tools
            && !self.has_ndk()
    }
}

/// List subdirectory names, skipping files and unreadable entries.
async fn list_subdirectories(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return names,
        Err(e) => {
            warn!("Could not read {:?}: {}", dir, e);
            return names;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_missing_root_is_empty_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let inventory = SdkInventory::scan(&missing).await;
        assert_eq!(inventory, SdkInventory::default());
        assert!(inventory.is_empty());
    }

    #[tokio::test]
    async fn test_empty_root_is_empty_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = SdkInventory::scan(dir.path()).await;
        assert!(inventory.is_empty());
    }

    #[tokio::test]
    async fn test_scan_populated_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("platforms/android-26")).unwrap();
        fs::create_dir_all(root.join("platforms/android-33")).unwrap();
        fs::create_dir_all(root.join("build-tools/34.0.0")).unwrap();
        fs::create_dir_all(root.join("build-tools/9.0.0")).unwrap();
        fs::create_dir_all(root.join("platform-tools")).unwrap();
        fs::create_dir_all(root.join("ndk/26.1.10909125")).unwrap();

        let inventory = SdkInventory::scan(root).await;
        assert_eq!(
            inventory.platforms.iter().copied().collect::<Vec<_>>(),
            vec![26, 33]
        );
        // Sorted numerically, not lexically.
        assert_eq!(inventory.build_tools, vec!["9.0.0", "34.0.0"]);
        assert!(inventory.has_platform_tools);
        assert!(!inventory.has_ndk_bundle);
        assert!(inventory.has_ndk());
    }

    #[tokio::test]
    async fn test_unknown_entries_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("platforms/android-26")).unwrap();
        fs::create_dir_all(root.join("platforms/not-a-platform")).unwrap();
        fs::create_dir_all(root.join("licenses")).unwrap();
        fs::write(root.join("platforms/stray-file"), b"").unwrap();

        let inventory = SdkInventory::scan(root).await;
        assert_eq!(
            inventory.platforms.iter().copied().collect::<Vec<_>>(),
            vec![26]
        );
    }
}
