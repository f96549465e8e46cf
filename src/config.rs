use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::pagination::DEFAULT_PAGE_SIZE;
use crate::usecase::services::query_service::DEFAULT_FETCH_CAP;

pub const TOKEN_ENV_VAR: &str = "SITE_PAGES_TOKEN";

/// Application configuration, read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Absolute URL of the site, e.g. `https://contoso.sharepoint.com/sites/kb`.
    pub site_url: String,
    pub list_title: String,
    pub view_id: String,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Upper bound on items returned by a single fetch.
    pub fetch_cap: usize,
    pub access_token: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            list_title: "Site Pages".to_string(),
            view_id: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 15, 20, 40, 60, 80, 100],
            fetch_cap: DEFAULT_FETCH_CAP,
            access_token: None,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Reads `path`, or the default location when `path` is `None`. A missing
    /// file yields the defaults; the token env var wins over the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };

        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            Self::from_toml(&text)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                config.access_token = Some(token);
            }
        }
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid config toml")?;
        if config.page_size == 0 {
            anyhow::bail!("page_size must be greater than zero")
        }
        if config.fetch_cap == 0 {
            anyhow::bail!("fetch_cap must be greater than zero")
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Path part of `site_url`, used to scope the folder filter.
    pub fn server_relative_url(&self) -> Result<String> {
        let url = reqwest::Url::parse(&self.site_url)
            .with_context(|| format!("invalid site_url: {:?}", self.site_url))?;
        Ok(url.path().trim_end_matches('/').to_string())
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "site-pages")
        .ok_or_else(|| anyhow!("unable to resolve config directory"))?;
    Ok(project_dirs.config_dir().join("config.toml"))
}
