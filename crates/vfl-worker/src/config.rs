//! Worker configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the file contents.
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },
}

/// Configuration for the worker.
///
/// The store prefix and version are injected here rather than read from a
/// global constant: one `version` value controls all stale-store cleanup,
/// and must be bumped together with any change to `offline_manifest` so
/// superseded stores are purged on activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Name prefix shared by all stores this worker owns.
    #[serde(default = "default_store_prefix")]
    pub store_prefix: String,

    /// Version tag of the current stores.
    #[serde(default = "default_version")]
    pub version: String,

    /// Origin the offline manifest paths resolve against.
    #[serde(default = "default_origin")]
    pub origin: Url,

    /// Core asset paths precached at install.
    #[serde(default = "default_offline_manifest")]
    pub offline_manifest: Vec<String>,

    /// Path of the document served to failed navigations.
    #[serde(default = "default_entry_document")]
    pub entry_document: String,

    /// Hostname fragments identifying the backend API.
    #[serde(default = "default_api_hosts")]
    pub api_hosts: Vec<String>,

    /// Path fragment identifying API calls on any host.
    #[serde(default = "default_api_path_segment")]
    pub api_path_segment: String,

    /// Hostname fragments identifying remote font assets.
    #[serde(default = "default_font_hosts")]
    pub font_hosts: Vec<String>,

    /// Header names participating in request identity.
    #[serde(default)]
    pub vary_headers: Vec<String>,
}

fn default_store_prefix() -> String {
    "betpawa-vfl".to_string()
}

fn default_version() -> String {
    "v5".to_string()
}

fn default_origin() -> Url {
    Url::parse("https://vfl.betpawa.app").expect("static origin URL")
}

fn default_offline_manifest() -> Vec<String> {
    vec![
        "/".to_string(),
        "/index.html".to_string(),
        "/manifest.json".to_string(),
    ]
}

fn default_entry_document() -> String {
    "/index.html".to_string()
}

fn default_api_hosts() -> Vec<String> {
    vec!["railway.app".to_string()]
}

fn default_api_path_segment() -> String {
    "/api/".to_string()
}

fn default_font_hosts() -> Vec<String> {
    vec![
        "fonts.googleapis.com".to_string(),
        "fonts.gstatic.com".to_string(),
    ]
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            store_prefix: default_store_prefix(),
            version: default_version(),
            origin: default_origin(),
            offline_manifest: default_offline_manifest(),
            entry_document: default_entry_document(),
            api_hosts: default_api_hosts(),
            api_path_segment: default_api_path_segment(),
            font_hosts: default_font_hosts(),
            vary_headers: Vec::new(),
        }
    }
}

impl WorkerConfig {
    /// Load config from a TOML or JSON file, switched on extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        if display.ends_with(".json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: display,
                message: e.to_string(),
            })
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: display,
                message: e.to_string(),
            })
        }
    }

    /// Name of the current primary store.
    pub fn primary_store_name(&self) -> String {
        format!("{}-{}", self.store_prefix, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_worker() {
        let config = WorkerConfig::default();
        assert_eq!(config.primary_store_name(), "betpawa-vfl-v5");
        assert_eq!(
            config.offline_manifest,
            vec!["/", "/index.html", "/manifest.json"]
        );
        assert_eq!(config.entry_document, "/index.html");
        assert_eq!(config.api_hosts, vec!["railway.app"]);
        assert_eq!(config.api_path_segment, "/api/");
        assert_eq!(
            config.font_hosts,
            vec!["fonts.googleapis.com", "fonts.gstatic.com"]
        );
        assert!(config.vary_headers.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: WorkerConfig = toml::from_str(
            r#"
            version = "v6"
            origin = "https://staging.vfl.betpawa.app"
            "#,
        )
        .unwrap();

        assert_eq!(config.version, "v6");
        assert_eq!(config.primary_store_name(), "betpawa-vfl-v6");
        assert_eq!(config.origin.as_str(), "https://staging.vfl.betpawa.app/");
        // Everything else keeps its default.
        assert_eq!(config.entry_document, "/index.html");
        assert_eq!(config.api_hosts, vec!["railway.app"]);
    }

    #[test]
    fn test_empty_json_fills_defaults() {
        let config: WorkerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.primary_store_name(), "betpawa-vfl-v5");
    }
}
