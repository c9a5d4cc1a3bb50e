//! Dashboard configuration.
//!
//! A [`DashboardConfig`] is read from a TOML file naming the three source
//! tables and the loader policies:
//!
//! ```toml
//! [tables]
//! crime = "data/crime.csv"
//! race = "data/race.csv"
//! social = "data/social.csv"
//!
//! [loader]
//! delimiter = ","
//! unmapped_regions = "retain"
//! ```
//!
//! Relative table paths are resolved against the directory containing the
//! config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{LoadOptions, UnmappedRegionPolicy};

/// Errors reading or validating the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not usable.
    #[error("Invalid config: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardConfig {
    /// Locations of the three source tables.
    pub tables: TablePaths,
    /// Loader policies.
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// Paths of the source tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TablePaths {
    /// Crime counts by state, city, and year.
    pub crime: PathBuf,
    /// Race composition by state.
    pub race: PathBuf,
    /// Social indicators by state, plus the national row.
    pub social: PathBuf,
}

/// Per-row loading policies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoaderConfig {
    /// Field delimiter of the table files. Must be a single ASCII
    /// character. Defaults to `,`.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// What to do with crime rows whose region is not recognized.
    #[serde(default)]
    pub unmapped_regions: UnmappedRegionPolicy,
}

const fn default_delimiter() -> char {
    ','
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            unmapped_regions: UnmappedRegionPolicy::default(),
        }
    }
}

impl LoaderConfig {
    /// The delimiter as a byte. Falls back to `,` for a non-ASCII
    /// delimiter, which [`parse_config_toml`] already rejects.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .unwrap_or(b',')
    }

    #[must_use]
    pub const fn load_options(&self) -> LoadOptions {
        LoadOptions {
            unmapped_regions: self.unmapped_regions,
        }
    }
}

impl DashboardConfig {
    /// Resolves relative table paths against `base`.
    #[must_use]
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        for path in [
            &mut self.tables.crime,
            &mut self.tables.race,
            &mut self.tables.social,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Parses a configuration from a TOML string. Table paths are left as
/// written.
///
/// # Errors
///
/// Returns [`ConfigError`] if the TOML is malformed, missing a required
/// key, or names a non-ASCII delimiter.
pub fn parse_config_toml(toml_str: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = toml::de::from_str(toml_str)?;

    if !config.loader.delimiter.is_ascii() {
        return Err(ConfigError::Invalid {
            message: format!(
                "delimiter {:?} is not a single ASCII character",
                config.loader.delimiter
            ),
        });
    }

    Ok(config)
}

/// Reads a configuration file and resolves its table paths against the
/// file's directory.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config_toml(&contents)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    log::debug!("Loaded config from {}", path.display());

    Ok(config.resolve_paths(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [tables]
        crime = "crime.csv"
        race = "race.csv"
        social = "/abs/social.csv"
    "#;

    #[test]
    fn applies_loader_defaults() {
        let config = parse_config_toml(MINIMAL).unwrap();
        assert_eq!(config.loader, LoaderConfig::default());
        assert_eq!(config.loader.delimiter_byte(), b',');
        assert_eq!(
            config.loader.load_options().unmapped_regions,
            UnmappedRegionPolicy::Retain
        );
    }

    #[test]
    fn parses_loader_section() {
        let toml_str =
            format!("{MINIMAL}\n[loader]\ndelimiter = \";\"\nunmapped_regions = \"drop\"\n");
        let config = parse_config_toml(&toml_str).unwrap();
        assert_eq!(config.loader.delimiter_byte(), b';');
        assert_eq!(config.loader.unmapped_regions, UnmappedRegionPolicy::Drop);
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let toml_str = format!("{MINIMAL}\n[loader]\ndelimiter = \"§\"\n");
        assert!(matches!(
            parse_config_toml(&toml_str),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_table_is_parse_error() {
        let toml_str = "[tables]\ncrime = \"crime.csv\"\n";
        assert!(matches!(
            parse_config_toml(toml_str),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn resolves_relative_paths_only() {
        let config = parse_config_toml(MINIMAL)
            .unwrap()
            .resolve_paths(Path::new("/etc/dash"));
        assert_eq!(config.tables.crime, PathBuf::from("/etc/dash/crime.csv"));
        assert_eq!(config.tables.race, PathBuf::from("/etc/dash/race.csv"));
        assert_eq!(config.tables.social, PathBuf::from("/abs/social.csv"));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/dashboard.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
