//! Configuration file discovery and reading.
//!
//! # File Formats
//!
//! The module supports both JSON5 and JSON formats:
//!
//! - JSON5 (`.json5`): Preferred format with comments and trailing commas
//! - JSON (`.json`): Standard JSON format
//!
//! # File Locations
//!
//! Configuration lives at the project root, as `.changelog.json5` or
//! `.changelog.json` (first match wins).

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Configuration file names to search for, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".changelog.json5", ".changelog.json"];

/// Finds the configuration file under `root_dir`.
///
/// # Returns
///
/// Returns `Some(path)` if a config file is found, `None` otherwise.
///
/// # Examples
///
/// ```no_run
/// use relnotes_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file(".") {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file(root_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let root_dir = root_dir.as_ref();
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| root_dir.join(name))
        .find(|path| path.is_file())
}

/// Reads and parses a configuration file.
///
/// Supports both JSON5 and JSON formats.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file content cannot be parsed
///
/// # Examples
///
/// ```no_run
/// use relnotes_config::persistence::read_config_file;
/// use relnotes_config::Config;
///
/// # fn main() -> relnotes_config::Result<()> {
/// let config: Config = read_config_file(".changelog.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading config file");
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // JSON5 parser handles both JSON5 and JSON
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Deserialize)]
    struct TestConfig {
        name: String,
        value: i32,
    }

    #[test]
    fn read_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json");
        std::fs::write(&path, r#"{"name": "test", "value": 42}"#).unwrap();

        let config: TestConfig = read_config_file(&path).unwrap();
        assert_eq!(config.name, "test");
        assert_eq!(config.value, 42);
    }

    #[test]
    fn read_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json5");
        std::fs::write(
            &path,
            r#"
            {
                // This is a comment
                name: "test",
                value: 42,  // trailing comma
            }
            "#,
        )
        .unwrap();

        let config: TestConfig = read_config_file(&path).unwrap();
        assert_eq!(config.name, "test");
        assert_eq!(config.value, 42);
    }

    #[test]
    fn read_nonexistent_file() {
        let result: Result<TestConfig> = read_config_file("/nonexistent/path.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result: Result<TestConfig> = read_config_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseJson5(_))));
    }

    #[test]
    fn find_config_file_prefers_json5() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".changelog.json"), "{}").unwrap();
        std::fs::write(dir.path().join(".changelog.json5"), "{}").unwrap();

        let found = find_config_file(dir.path()).unwrap();
        assert!(found.ends_with(".changelog.json5"));
    }

    #[test]
    fn find_config_file_falls_back_to_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".changelog.json"), "{}").unwrap();

        let found = find_config_file(dir.path()).unwrap();
        assert!(found.ends_with(".changelog.json"));
    }

    #[test]
    fn find_config_file_none_when_absent() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file(dir.path()).is_none());
    }
}
