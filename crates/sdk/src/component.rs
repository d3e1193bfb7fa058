//! SDK Components
//!
//! Typed identifiers for installable Android SDK components, with
//! version-aware ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// An Android SDK component: a kind plus, where applicable, a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "version", rename_all = "kebab-case")]
pub enum ComponentId {
    /// platforms/android-XX
    Platform(u32),
    /// build-tools/XX.X.X
    BuildTools(String),
    /// platform-tools
    PlatformTools,
    /// ndk-bundle
    NdkBundle,
}

impl ComponentId {
    /// Canonical path-like identifier as laid out under the SDK root.
    pub fn canonical_path(&self) -> String {
        match self {
            ComponentId::Platform(api) => format!("platforms/android-{}", api),
            ComponentId::BuildTools(version) => format!("build-tools/{}", version),
            ComponentId::PlatformTools => "platform-tools".to_string(),
            ComponentId::NdkBundle => "ndk-bundle".to_string(),
        }
    }

    /// Package name understood by the external SDK component installer.
    pub fn package_name(&self) -> String {
        match self {
            ComponentId::Platform(api) => format!("platforms;android-{}", api),
            ComponentId::BuildTools(version) => format!("build-tools;{}", version),
            ComponentId::PlatformTools => "platform-tools".to_string(),
            ComponentId::NdkBundle => "ndk-bundle".to_string(),
        }
    }

    /// Rank used for the canonical decision ordering: platform, then
    /// build-tools, then platform-tools, then NDK.
    fn kind_rank(&self) -> u8 {
        match self {
            ComponentId::Platform(_) => 0,
            ComponentId::BuildTools(_) => 1,
            ComponentId::PlatformTools => 2,
            ComponentId::NdkBundle => 3,
        }
    }
}

impl Ord for ComponentId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ComponentId::Platform(a), ComponentId::Platform(b)) => a.cmp(b),
            (ComponentId::BuildTools(a), ComponentId::BuildTools(b)) => compare_versions(a, b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for ComponentId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical_path())
    }
}

/// Compare dotted version strings as numeric tuples.
///
/// Non-numeric segments (e.g. "-rc1" suffixes) compare as zero, so
/// "35.0.0-rc1" orders with "35.0.0". Shorter versions are padded with
/// zeros: "34.0" == "34.0.0".
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| -> Vec<u64> {
        s.split('.')
            .map(|part| {
                let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    };

    let va = parse(a);
    let vb = parse(b);
    let len = va.len().max(vb.len());

    for i in 0..len {
        let x = va.get(i).copied().unwrap_or(0);
        let y = vb.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_paths() {
        assert_eq!(
            ComponentId::Platform(26).canonical_path(),
            "platforms/android-26"
        );
        assert_eq!(
            ComponentId::BuildTools("34.0.0".into()).canonical_path(),
            "build-tools/34.0.0"
        );
        assert_eq!(ComponentId::PlatformTools.canonical_path(), "platform-tools");
        assert_eq!(ComponentId::NdkBundle.canonical_path(), "ndk-bundle");
    }

    #[test]
    fn test_package_names() {
        assert_eq!(
            ComponentId::Platform(34).package_name(),
            "platforms;android-34"
        );
        assert_eq!(
            ComponentId::BuildTools("34.0.0".into()).package_name(),
            "build-tools;34.0.0"
        );
        assert_eq!(ComponentId::PlatformTools.package_name(), "platform-tools");
    }

    #[test]
    fn test_version_compare_is_numeric() {
        assert_eq!(compare_versions("9.0.0", "10.0.0"), Ordering::Less);
        assert_eq!(compare_versions("34.0.0", "34.0"), Ordering::Equal);
        assert_eq!(compare_versions("35.0.1", "35.0.0"), Ordering::Greater);
        assert_eq!(compare_versions("35.0.0-rc1", "35.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_component_ordering() {
        let mut components = vec![
            ComponentId::NdkBundle,
            ComponentId::BuildTools("34.0.0".into()),
            ComponentId::PlatformTools,
            ComponentId::Platform(26),
        ];
        components.sort();
        assert_eq!(
            components,
            vec![
                ComponentId::Platform(26),
                ComponentId::BuildTools("34.0.0".into()),
                ComponentId::PlatformTools,
                ComponentId::NdkBundle,
            ]
        );
    }

    #[test]
    fn test_build_tools_order_by_version_tuple() {
        let mut versions = vec![
            ComponentId::BuildTools("10.0.0".into()),
            ComponentId::BuildTools("9.0.0".into()),
        ];
        versions.sort();
        assert_eq!(versions[0], ComponentId::BuildTools("9.0.0".into()));
    }
}
