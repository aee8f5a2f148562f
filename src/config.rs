//! Configuration management for the snapvault CLI

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{DashboardError, Result};
use crate::ui::UI;
use crate::ConfigCommand;

/// Fixed prefix every resource path is resolved under
pub const API_PREFIX: &str = "/api/v1";

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_ROUTE: &str = "/studio/dashboard";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Backend origin, without the API prefix
    pub backend_url: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default = "default_use_proxy")]
    pub use_proxy: bool,
    /// Where `/` redirects. A placeholder for an identity-aware landing page.
    #[serde(default = "default_route")]
    pub default_route: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_use_proxy() -> bool {
    true
}

fn default_route() -> String {
    DEFAULT_ROUTE.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: default_timeout(),
            verbose: false,
            use_proxy: default_use_proxy(),
            default_route: default_route(),
        }
    }
}

impl DashboardConfig {
    /// Load from the given file (or the default location) layered under
    /// `SNAPVAULT_*` environment variables
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let path = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);
        Self::from_file_and_env(Some(path))
    }

    pub fn from_file_and_env<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .set_default("timeout", default_timeout())?
            .set_default("verbose", false)?
            .set_default("use_proxy", default_use_proxy())?
            .set_default("default_route", DEFAULT_ROUTE)?;

        if let Some(config_path) = config_file {
            if config_path.as_ref().exists() {
                builder = builder.add_source(File::from(config_path.as_ref()));
            }
        }
        builder = builder.add_source(Environment::with_prefix("SNAPVAULT").try_parsing(true));

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, config_path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.backend_url.trim();
        if url.is_empty() {
            return Err(DashboardError::invalid_endpoint("Backend URL cannot be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(DashboardError::invalid_endpoint(format!(
                "Backend URL must start with http:// or https://: {}",
                url
            )));
        }
        if self.timeout == 0 {
            return Err(DashboardError::config("Timeout must be at least one second"));
        }
        if !self.default_route.starts_with('/') || self.default_route.trim_end_matches('/').is_empty()
        {
            return Err(DashboardError::config(format!(
                "Default route must be an absolute path other than '/': {}",
                self.default_route
            )));
        }
        Ok(())
    }

    fn origin(&self) -> &str {
        self.backend_url.trim().trim_end_matches('/')
    }

    /// `<origin>/api/v1`
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.origin(), API_PREFIX)
    }

    /// Full URL of a resource endpoint, e.g. `/events/3`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
        format!("{}/{}", self.api_base_url(), endpoint)
    }

    /// Full URL of a path outside the API prefix, e.g. `/health`
    pub fn origin_url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.origin(), path)
    }

    /// Proxies are skipped for loopback backends
    pub fn proxy_enabled(&self) -> bool {
        self.use_proxy
            && !self.backend_url.contains("localhost")
            && !self.backend_url.contains("127.0.0.1")
    }
}

pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snapvault")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

/// Handles `snapvault config ...`
pub struct ConfigService {
    config: DashboardConfig,
    config_path: PathBuf,
    ui: UI,
}

impl ConfigService {
    pub fn with_config_path(config: DashboardConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            ui: UI::new(),
        }
    }

    pub async fn handle_config(&mut self, command: ConfigCommand) -> Result<()> {
        match command {
            ConfigCommand::Show => {
                self.show();
                return Ok(());
            }
            ConfigCommand::SetBackend { url } => {
                self.config.backend_url = url;
            }
            ConfigCommand::SetTimeout { seconds } => {
                self.config.timeout = seconds;
            }
            ConfigCommand::SetDefaultRoute { path } => {
                self.config.default_route = path;
            }
            ConfigCommand::Reset => {
                self.config = DashboardConfig::default();
            }
        }

        self.config.save(&self.config_path).await?;
        tracing::debug!(path = %self.config_path.display(), "configuration saved");
        self.ui.success("Configuration updated");
        self.show();
        Ok(())
    }

    fn show(&self) {
        self.ui.card(
            "Configuration",
            vec![
                ("File", self.config_path.display().to_string()),
                ("Backend", self.config.backend_url.clone()),
                ("API base", self.config.api_base_url()),
                ("Timeout", format!("{}s", self.config.timeout)),
                ("Proxy", self.config.proxy_enabled().to_string()),
                ("Default route", self.config.default_route.clone()),
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::test_helpers::{create_temp_dir, create_temp_file_with_content};

    #[test]
    fn test_api_base_url_appends_prefix() {
        let config = DashboardConfig {
            backend_url: "https://api.snapvault.io/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_base_url(), "https://api.snapvault.io/api/v1");
        assert_eq!(
            config.endpoint_url("/events/3"),
            "https://api.snapvault.io/api/v1/events/3"
        );
        assert_eq!(
            config.endpoint_url("collections/?event_id=5"),
            "https://api.snapvault.io/api/v1/collections/?event_id=5"
        );
        assert_eq!(config.origin_url("/health"), "https://api.snapvault.io/health");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DashboardConfig {
            backend_url: "".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.backend_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.backend_url = "http://example.com".to_string();
        config.default_route = "/".to_string();
        assert!(config.validate().is_err());

        config.default_route = "studio/dashboard".to_string();
        assert!(config.validate().is_err());

        config.default_route = "/super-admin/dashboard".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_proxy_skipped_for_loopback() {
        let config = DashboardConfig::default();
        assert!(!config.proxy_enabled());

        let remote = DashboardConfig {
            backend_url: "https://api.snapvault.io".to_string(),
            ..Default::default()
        };
        assert!(remote.proxy_enabled());
    }

    #[test]
    fn test_load_from_file() {
        let dir = create_temp_dir();
        let path = create_temp_file_with_content(
            &dir,
            "config.json",
            br#"{"backend_url":"https://staging.snapvault.io","timeout":5,"default_route":"/super-admin/dashboard"}"#,
        );

        let config = DashboardConfig::from_file_and_env(Some(&path)).unwrap();
        assert_eq!(config.backend_url, "https://staging.snapvault.io");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.default_route, "/super-admin/dashboard");
        assert!(config.use_proxy);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = create_temp_dir();
        let config = DashboardConfig::from_file_and_env(Some(dir.path().join("absent.json"))).unwrap();
        assert_eq!(config.default_route, "/studio/dashboard");
        assert_eq!(config.timeout, 30);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = create_temp_dir();
        let path = dir.path().join("nested").join("config.json");
        let config = DashboardConfig {
            backend_url: "https://api.snapvault.io".to_string(),
            timeout: 12,
            ..Default::default()
        };
        config.save(&path).await.unwrap();

        let loaded = DashboardConfig::from_file_and_env(Some(&path)).unwrap();
        assert_eq!(loaded.backend_url, "https://api.snapvault.io");
        assert_eq!(loaded.timeout, 12);
    }

    #[tokio::test]
    async fn test_set_default_route_persists() {
        let dir = create_temp_dir();
        let path = dir.path().join("config.json");
        let mut service = ConfigService::with_config_path(DashboardConfig::default(), path.clone());

        service
            .handle_config(ConfigCommand::SetDefaultRoute {
                path: "/super-admin/studios".to_string(),
            })
            .await
            .unwrap();

        let loaded = DashboardConfig::from_file_and_env(Some(&path)).unwrap();
        assert_eq!(loaded.default_route, "/super-admin/studios");
    }

    #[tokio::test]
    async fn test_invalid_setting_is_not_saved() {
        let dir = create_temp_dir();
        let path = dir.path().join("config.json");
        let mut service = ConfigService::with_config_path(DashboardConfig::default(), path.clone());

        let result = service
            .handle_config(ConfigCommand::SetBackend {
                url: "not a url".to_string(),
            })
            .await;
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
