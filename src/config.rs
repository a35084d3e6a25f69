//! Configuration Management
//!
//! Handles persistent configuration storage for okta-discover. The API token
//! is never written to disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the org URL
pub const ORG_URL_ENV: &str = "OKTA_ORG_URL";

/// Environment variable holding the API token
pub const API_TOKEN_ENV: &str = "OKTA_API_TOKEN";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Org URL, e.g. `https://acme.okta.com`
    #[serde(default)]
    pub org_url: Option<String>,
    /// Services to run when none are given on the command line
    #[serde(default)]
    pub services: Vec<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("okta-discover").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse config JSON, falling back to defaults on malformed content
    pub fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config: {}", e);
            Self::default()
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Record what should be saved for later runs. An empty service list
    /// keeps the stored one.
    pub fn remember(&mut self, org_url: &str, services: &[String]) {
        self.org_url = Some(org_url.to_string());
        if !services.is_empty() {
            self.services = services.to_vec();
        }
    }

    /// Get effective org URL (CLI > env > config)
    pub fn effective_org_url(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| std::env::var(ORG_URL_ENV).ok())
            .or_else(|| self.org_url.clone())
            .filter(|url| !url.is_empty())
    }

    /// Get effective service list (CLI > config > everything registered)
    pub fn effective_services(&self, cli: &[String]) -> Vec<String> {
        if !cli.is_empty() {
            return cli.to_vec();
        }
        if !self.services.is_empty() {
            return self.services.clone();
        }
        crate::resource::get_all_service_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
