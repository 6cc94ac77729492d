//! TOML configuration loading.
//!
//! Every binary in the workspace reads one TOML file whose sections all have
//! defaults. A missing path (or no path at all) yields `T::default()`, so the
//! tools run out of the box; a file that exists but fails to parse is an error.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the expected shape.
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parses a config value from a TOML string.
pub fn parse_toml<T: DeserializeOwned>(text: &str, origin: &Path) -> Result<T, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}

/// Loads `T` from `path`, falling back to `T::default()` when `path` is `None`
/// or does not exist.
pub fn load_toml<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        debug!("no config path given, using defaults");
        return Ok(T::default());
    };
    if !path.exists() {
        debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(T::default());
    }

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&text, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default, deny_unknown_fields)]
    struct Sample {
        name: String,
        retries: u32,
    }

    #[test]
    fn none_path_gives_defaults() {
        let s: Sample = load_toml(None).unwrap();
        assert_eq!(s, Sample::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s: Sample = load_toml(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(s, Sample::default());
    }

    #[test]
    fn reads_partial_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "retries = 3").unwrap();
        let s: Sample = load_toml(Some(f.path())).unwrap();
        assert_eq!(s.retries, 3);
        assert_eq!(s.name, "");
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "colour = \"red\"").unwrap();
        let err = load_toml::<Sample>(Some(f.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
