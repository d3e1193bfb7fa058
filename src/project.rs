//! Build property loading
//!
//! Reads the string-typed `Key=Value` build properties that drive
//! dependency calculation.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use droid_deps_core::Result;

/// Load build properties from a `Key=Value` file.
///
/// Blank lines and `#` comments are skipped; lines without `=` are
/// warn-logged and ignored. Later occurrences of a key win.
pub fn load_properties(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)?;
    let mut props = HashMap::new();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                props.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => warn!(
                "Ignoring malformed property at {}:{}: '{}'",
                path.display(),
                number + 1,
                line
            ),
        }
    }

    Ok(props)
}

/// Apply `KEY=VALUE` command-line overrides on top of loaded properties.
pub fn apply_overrides(props: &mut HashMap<String, String>, overrides: &[String]) {
    for entry in overrides {
        match entry.split_once('=') {
            Some((key, value)) => {
                props.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => warn!("Ignoring malformed property override '{}'", entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_properties() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# project build properties").unwrap();
        writeln!(file, "TargetFrameworkVersion = v8.0").unwrap();
        writeln!(file, "Configuration=Release").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "not a property").unwrap();
        writeln!(file, "Configuration=Debug").unwrap();

        let props = load_properties(file.path()).unwrap();
        assert_eq!(props.get("TargetFrameworkVersion").unwrap(), "v8.0");
        // Last occurrence wins.
        assert_eq!(props.get("Configuration").unwrap(), "Debug");
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_apply_overrides() {
        let mut props = HashMap::new();
        props.insert("Configuration".to_string(), "Debug".to_string());

        apply_overrides(
            &mut props,
            &[
                "Configuration=Release".to_string(),
                "EnableLLVM=true".to_string(),
                "malformed".to_string(),
            ],
        );

        assert_eq!(props.get("Configuration").unwrap(), "Release");
        assert_eq!(props.get("EnableLLVM").unwrap(), "true");
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_properties(Path::new("/nonexistent/build.props"));
        assert!(matches!(result, Err(droid_deps_core::DepsError::Io(_))));
    }
}
