//! Catalog configuration file support.
//!
//! This module reads catalog settings from TOML:
//!
//! ```toml
//! [ranking]
//! strategy = "maxmin"
//!
//! [catalog]
//! term = "Fall"
//! recompute = "eager"
//!
//! [source]
//! path = "catalog.json"
//! ```
//!
//! Every table and key is optional.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::algorithms::RankingStrategy;
use crate::error::{CatalogError, Result};
use crate::models::Term;
use crate::source::JsonCatalogSource;

/// When the choice store is rebuilt after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecomputePolicy {
    /// Rebuild as part of every mutation.
    #[default]
    Eager,
    /// Mark the store stale; rebuild the next time choices are read.
    Lazy,
}

impl RecomputePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecomputePolicy::Eager => "eager",
            RecomputePolicy::Lazy => "lazy",
        }
    }
}

impl fmt::Display for RecomputePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecomputePolicy {
    type Err = CatalogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eager" => Ok(RecomputePolicy::Eager),
            "lazy" => Ok(RecomputePolicy::Lazy),
            other => Err(CatalogError::Configuration(format!(
                "Unknown recompute policy: {}. Use 'eager' or 'lazy'",
                other
            ))),
        }
    }
}

/// Catalog configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub source: SourceSettings,
}

/// Ranking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

/// Catalog behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_term")]
    pub term: String,
    #[serde(default = "default_recompute")]
    pub recompute: String,
}

/// Offline course source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_strategy() -> String {
    RankingStrategy::default().as_str().to_string()
}

fn default_term() -> String {
    Term::default().as_str().to_string()
}

fn default_recompute() -> String {
    RecomputePolicy::default().as_str().to_string()
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            term: default_term(),
            recompute: default_recompute(),
        }
    }
}

impl CatalogConfig {
    /// Load catalog configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(CatalogConfig)` if successful
    /// * `Err(CatalogError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CatalogError::Configuration(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse catalog configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            CatalogError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load catalog configuration from the default location.
    ///
    /// Searches for `courselists.toml` in:
    /// 1. Current directory
    /// 2. `courselists/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(CatalogConfig)` if found and parsed successfully
    /// * `Err(CatalogError::Configuration)` if no config file found or parse error
    pub fn from_default_location() -> Result<Self> {
        let search_paths = [
            PathBuf::from("courselists.toml"),
            PathBuf::from("courselists/courselists.toml"),
            PathBuf::from("../courselists.toml"),
        ];

        for path in &search_paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Err(CatalogError::Configuration(
            "No courselists.toml found in standard locations".to_string(),
        ))
    }

    /// Get the ranking strategy from configuration.
    pub fn ranking_strategy(&self) -> Result<RankingStrategy> {
        self.ranking.strategy.parse()
    }

    /// Get the default import term from configuration.
    pub fn term(&self) -> Result<Term> {
        self.catalog.term.parse()
    }

    pub fn recompute_policy(&self) -> Result<RecomputePolicy> {
        self.catalog.recompute.parse()
    }

    /// Open the configured JSON catalog, if one is configured.
    ///
    /// # Returns
    /// * `Ok(None)` if no `[source] path` is set
    /// * `Err` if the file cannot be read or decoded
    pub fn load_source(&self) -> anyhow::Result<Option<JsonCatalogSource>> {
        self.source
            .path
            .as_ref()
            .map(JsonCatalogSource::from_file)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.ranking_strategy().unwrap(), RankingStrategy::MaxMin);
        assert_eq!(config.term().unwrap(), Term::Fall);
        assert_eq!(config.recompute_policy().unwrap(), RecomputePolicy::Eager);
        assert!(config.source.path.is_none());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CatalogConfig::from_toml_str("").unwrap();
        assert_eq!(config.ranking_strategy().unwrap(), RankingStrategy::MaxMin);
        assert_eq!(config.recompute_policy().unwrap(), RecomputePolicy::Eager);
    }

    #[test]
    fn test_parse_full_document() {
        let toml = r#"
[ranking]
strategy = "Max"

[catalog]
term = "winter"
recompute = "LAZY"

[source]
path = "catalog.json"
"#;
        let config = CatalogConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.ranking_strategy().unwrap(), RankingStrategy::Max);
        assert_eq!(config.term().unwrap(), Term::Winter);
        assert_eq!(config.recompute_policy().unwrap(), RecomputePolicy::Lazy);
        assert_eq!(config.source.path, Some(PathBuf::from("catalog.json")));
    }

    #[test]
    fn test_invalid_values_are_reported_on_access() {
        let toml = r#"
[ranking]
strategy = "min"

[catalog]
term = "Spring"
recompute = "sometimes"
"#;
        let config = CatalogConfig::from_toml_str(toml).unwrap();
        assert!(matches!(
            config.ranking_strategy(),
            Err(CatalogError::UnknownStrategy(_))
        ));
        assert!(matches!(config.term(), Err(CatalogError::InvalidTerm(_))));
        assert!(matches!(
            config.recompute_policy(),
            Err(CatalogError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let result = CatalogConfig::from_toml_str("[ranking\nstrategy = ");
        assert!(matches!(result, Err(CatalogError::Configuration(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ranking]\nstrategy = \"max\"").unwrap();

        let config = CatalogConfig::from_file(file.path()).unwrap();
        assert_eq!(config.ranking_strategy().unwrap(), RankingStrategy::Max);
    }

    #[test]
    fn test_from_missing_file() {
        let result = CatalogConfig::from_file("/nonexistent/courselists.toml");
        assert!(matches!(result, Err(CatalogError::Configuration(_))));
    }

    #[test]
    fn test_load_source_without_path() {
        let config = CatalogConfig::default();
        assert!(config.load_source().unwrap().is_none());
    }

    #[test]
    fn test_load_source_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "courses": [] }}"#).unwrap();

        let mut config = CatalogConfig::default();
        config.source.path = Some(file.path().to_path_buf());
        let source = config.load_source().unwrap().unwrap();
        assert!(source.is_empty());
    }

    #[test]
    fn test_recompute_policy_round_trip_names() {
        assert_eq!("eager".parse::<RecomputePolicy>().unwrap().as_str(), "eager");
        assert_eq!(RecomputePolicy::Lazy.to_string(), "lazy");
    }
}
