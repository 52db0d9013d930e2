//! Configuration for folio
//!
//! Loaded from a TOML file; every field has a default so a partial file (or
//! no file at all) works.
//!
//! ```toml
//! [data]
//! source = "directory"
//! root = "site/data"
//!
//! [data.documents]
//! publications = "pubs/all.json"
//!
//! [view]
//! search_debounce_ms = 300
//! copy_feedback_ms = 2000
//!
//! [server]
//! addr = "127.0.0.1:8080"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
#[cfg(feature = "http")]
use crate::loader::HttpSource;
use crate::loader::{DataSource, DirectorySource, DocumentCatalog};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where data documents come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Directory,
    Http,
}

/// Data document settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub source: SourceKind,
    /// Directory holding the JSON documents (directory source)
    pub root: PathBuf,
    /// Base URL the document paths are joined to (http source)
    pub base_url: Option<String>,
    pub user_agent: String,
    /// Extra or overridden logical name -> path mappings
    pub documents: BTreeMap<String, String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Directory,
            root: PathBuf::from("data"),
            base_url: None,
            user_agent: format!("folio/{}", env!("CARGO_PKG_VERSION")),
            documents: BTreeMap::new(),
        }
    }
}

impl DataConfig {
    /// Default catalog with this config's overrides applied
    pub fn catalog(&self) -> DocumentCatalog {
        self.documents
            .iter()
            .fold(DocumentCatalog::default(), |catalog, (name, path)| {
                catalog.with_document(name, path)
            })
    }

    /// Build the configured data source
    pub fn build_source(&self) -> Result<Arc<dyn DataSource>, ConfigError> {
        match self.source {
            SourceKind::Directory => Ok(Arc::new(DirectorySource::new(&self.root))),
            #[cfg(feature = "http")]
            SourceKind::Http => {
                let base_url = self.base_url.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("data.base_url is required for the http source".into())
                })?;
                let source = HttpSource::new(base_url, &self.user_agent)
                    .map_err(|e| ConfigError::Invalid(format!("HTTP client: {}", e)))?;
                Ok(Arc::new(source))
            }
            #[cfg(not(feature = "http"))]
            SourceKind::Http => Err(ConfigError::Invalid(
                "the http source requires the 'http' feature".into(),
            )),
        }
    }
}

/// Interaction timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Quiet period before typed search text is applied
    pub search_debounce_ms: u64,
    /// How long the "Copied!" label stays before reverting
    pub copy_feedback_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            copy_feedback_ms: 2000,
        }
    }
}

impl ViewConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl FolioConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.source == SourceKind::Http && self.data.base_url.is_none() {
            return Err(ConfigError::Invalid(
                "data.base_url is required for the http source".into(),
            ));
        }

        if self.view.search_debounce_ms == 0 {
            return Err(ConfigError::Invalid(
                "view.search_debounce_ms must be positive".into(),
            ));
        }

        if self.view.copy_feedback_ms == 0 {
            return Err(ConfigError::Invalid(
                "view.copy_feedback_ms must be positive".into(),
            ));
        }

        if let Some((name, _)) = self.data.documents.iter().find(|(_, p)| p.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "data.documents.{} has an empty path",
                name
            )));
        }

        if self.server.addr.trim().is_empty() {
            return Err(ConfigError::Invalid("server.addr is empty".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.view.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.view.copy_feedback(), Duration::from_millis(2000));
    }

    #[test]
    fn test_partial_toml() {
        let config = FolioConfig::from_toml(
            r#"
            [data]
            root = "site/data"

            [data.documents]
            publications = "pubs/all.json"

            [view]
            search_debounce_ms = 150
            "#,
        )
        .unwrap();
        assert_eq!(config.data.root, PathBuf::from("site/data"));
        assert_eq!(config.data.source, SourceKind::Directory);
        assert_eq!(config.view.search_debounce_ms, 150);
        assert_eq!(config.view.copy_feedback_ms, 2000);
        assert_eq!(config.server.addr, "127.0.0.1:8080");
        assert_eq!(
            config.data.catalog().resolve("publications"),
            Some("pubs/all.json")
        );
        assert_eq!(config.data.catalog().resolve("education"), Some("education.json"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FolioConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(FolioConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_http_requires_base_url() {
        let mut config = FolioConfig::default();
        config.data.source = SourceKind::Http;
        assert!(config.validate().is_err());
        assert!(config.data.build_source().is_err());

        config.data.base_url = Some("https://example.org/data".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let mut config = FolioConfig::default();
        config.view.search_debounce_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FolioConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
