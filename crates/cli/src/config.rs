use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the MCP server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Endpoint path overrides keyed by service name
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoints: HashMap::new(),
        }
    }
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/toki/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("toki");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            let config = Self::default();
            // Create directory and write default config
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).ok();
            }
            let toml_str = toml::to_string_pretty(&config)
                .context("failed to serialize default config")?;
            std::fs::write(&config_path, toml_str).ok();
            Ok(config)
        }
    }

    /// Resolve the endpoint URL for a service.
    /// Priority: cli_override > MCP_URL env var > config file > default path.
    pub fn resolve_endpoint(&self, service: &str, cli_override: Option<&str>) -> String {
        // 1. CLI argument
        if let Some(url) = cli_override {
            return url.to_string();
        }

        // 2. Environment variable
        if let Ok(url) = std::env::var("MCP_URL") {
            if !url.is_empty() {
                return url;
            }
        }

        // 3. Config file override, 4. default path per service
        let base = self.base_url.trim_end_matches('/');
        if let Some(path) = self.endpoints.get(service) {
            return format!("{}{}", base, path);
        }
        match service {
            // BigQuery tools live on the server's default endpoint.
            "bigquery" => format!("{}/mcp/default", base),
            other => format!("{}/mcp/{}", base, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5001");
        assert!(config.endpoints.is_empty());
    }

    #[test]
    fn test_resolve_endpoint_cli_override() {
        let config = CliConfig::default();
        assert_eq!(
            config.resolve_endpoint("firestore", Some("http://localhost:9999/mcp/firestore")),
            "http://localhost:9999/mcp/firestore"
        );
    }

    #[test]
    fn test_resolve_endpoint_config_path() {
        let mut config = CliConfig::default();
        config
            .endpoints
            .insert("looker".to_string(), "/mcp/looker-staging".to_string());
        assert_eq!(
            config.resolve_endpoint("looker", None),
            "http://127.0.0.1:5001/mcp/looker-staging"
        );
    }

    #[test]
    fn test_resolve_endpoint_defaults() {
        let config = CliConfig::default();
        assert_eq!(
            config.resolve_endpoint("bigquery", None),
            "http://127.0.0.1:5001/mcp/default"
        );
        assert_eq!(
            config.resolve_endpoint("firestore", None),
            "http://127.0.0.1:5001/mcp/firestore"
        );
        assert_eq!(
            config.resolve_endpoint("looker", None),
            "http://127.0.0.1:5001/mcp/looker"
        );
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CliConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.base_url, config.base_url);
    }
}
