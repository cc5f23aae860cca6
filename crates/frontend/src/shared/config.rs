use crate::shared::master_data::client::ClientSettings;
use crate::shared::master_data::query_cache::CacheSettings;
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub table: TableConfig,
    pub combobox: ComboboxConfig,
    pub cache: CacheConfig,
    pub notifications: NotificationConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Empty: same host as the page, port 3000
    pub base_url: String,
    pub get_retries: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ComboboxConfig {
    pub limit: u32,
    pub reference_list_cap: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cached pages older than this are fetched again
    pub stale_ms: u64,
    pub max_entries: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NotificationConfig {
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// When false every write affordance is shown
    pub enforce_permissions: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// Default configuration embedded in the bundle
pub const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
get_retries = 1

[table]
default_page_size = 10
page_size_options = [10, 20, 50, 100]

[combobox]
limit = 20
reference_list_cap = 1000

[cache]
stale_ms = 30000
max_entries = 200

[notifications]
timeout_ms = 5000

[auth]
enforce_permissions = false

[logging]
level = "debug"
"#;

/// Path of the optional override served next to the bundle
pub const CONFIG_URL: &str = "/config.toml";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            get_retries: 1,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            reference_list_cap: 1000,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_ms: 30_000,
            max_entries: 200,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enforce_permissions: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            table: TableConfig::default(),
            combobox: ComboboxConfig::default(),
            cache: CacheConfig::default(),
            notifications: NotificationConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            get_retries: self.api.get_retries,
            reference_list_cap: self.combobox.reference_list_cap,
        }
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            stale_ms: self.cache.stale_ms,
            max_entries: self.cache.max_entries.max(1),
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.logging.level.parse().unwrap_or(log::Level::Info)
    }

    /// Page size options, always containing the default size
    pub fn page_size_options(&self) -> Vec<u32> {
        let mut options: Vec<u32> = self
            .table
            .page_size_options
            .iter()
            .copied()
            .filter(|s| *s > 0)
            .collect();
        if !options.contains(&self.table.default_page_size) {
            options.push(self.table.default_page_size);
        }
        options.sort_unstable();
        options.dedup();
        options
    }

    /// API base without a trailing slash
    pub fn api_base(&self) -> String {
        let configured = self.api.base_url.trim().trim_end_matches('/');
        if configured.is_empty() {
            window_api_base()
        } else {
            configured.to_string()
        }
    }
}

/// Same host as the page, backend on port 3000
fn window_api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Parse a configuration file; missing keys keep their defaults
pub fn parse_config(contents: &str) -> anyhow::Result<ClientConfig> {
    let config: ClientConfig = toml::from_str(contents).context("invalid client configuration")?;
    if config.table.default_page_size == 0 {
        anyhow::bail!("table.default_page_size must be greater than zero");
    }
    Ok(config)
}

async fn fetch_override() -> anyhow::Result<ClientConfig> {
    let response = gloo_net::http::Request::get(CONFIG_URL)
        .send()
        .await
        .context("config request failed")?;
    if !response.ok() {
        anyhow::bail!("{} answered {}", CONFIG_URL, response.status());
    }
    let text = response.text().await.context("config body unreadable")?;
    parse_config(&text)
}

/// Load the configuration
///
/// Search order:
/// 1. `/config.toml` served next to the bundle
/// 2. Falls back to embedded default config
pub async fn load_config() -> ClientConfig {
    match fetch_override().await {
        Ok(config) => {
            log::info!("Loaded configuration from {}", CONFIG_URL);
            config
        }
        Err(err) => {
            log::info!("Using default embedded configuration ({:#})", err);
            parse_config(DEFAULT_CONFIG).unwrap_or_default()
        }
    }
}
