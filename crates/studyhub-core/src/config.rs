//! Configuration management for StudyHub.
//!
//! Loads configuration from ${STUDYHUB_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "STUDYHUB_API_BASE_URL";

/// Where the backend runs.
///
/// A local environment gets sample sessions when the session fetch fails,
/// so the view stays usable without a running backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local when the API host is a loopback address (default)
    #[default]
    Auto,
    Local,
    Production,
}

/// Backend endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub sessions_path: String,
    pub meetings_path: String,
    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
            sessions_path: Config::DEFAULT_SESSIONS_PATH.to_string(),
            meetings_path: Config::DEFAULT_MEETINGS_PATH.to_string(),
            request_timeout_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub toast_secs: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { toast_secs: 4 }
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template are always present,
/// while the user's customized values are preserved.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for StudyHub configuration and data directories.
    //!
    //! STUDYHUB_HOME resolution order:
    //! 1. STUDYHUB_HOME environment variable (if set)
    //! 2. ~/.config/studyhub (default)

    use std::path::PathBuf;

    /// Returns the StudyHub home directory.
    pub fn studyhub_home() -> PathBuf {
        if let Ok(home) = std::env::var("STUDYHUB_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".studyhub"),
            |h| h.join(".config").join("studyhub"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        studyhub_home().join("config.toml")
    }

    /// Returns the directory holding rolling log files.
    pub fn logs_dir() -> PathBuf {
        studyhub_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,

    /// Signed-in identity (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    pub api: ApiConfig,

    pub ui: UiConfig,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:3007";
    const DEFAULT_SESSIONS_PATH: &str = "/api/sessions/all";
    const DEFAULT_MEETINGS_PATH: &str = "/api/meetings";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the user_id field to the config file.
    pub fn save_user_id(user_id: Option<&str>) -> Result<()> {
        Self::save_user_id_to(&paths::config_path(), user_id)
    }

    /// Saves only the user_id field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// `None` removes the key.
    pub fn save_user_id_to(path: &Path, user_id: Option<&str>) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        match user_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => doc["user_id"] = value(id),
            None => {
                doc.remove("user_id");
            }
        }

        Self::write_config(path, &doc.to_string())
    }

    /// Resolves the API base URL.
    ///
    /// Resolution order:
    /// 1. `STUDYHUB_API_BASE_URL` env var (if set and non-empty)
    /// 2. `api.base_url` from config (if non-empty)
    /// 3. Default: `http://localhost:3007`
    pub fn effective_base_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var(BASE_URL_ENV) {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }

        let trimmed = self.api.base_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }

        Ok(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Returns true when failed fetches should fall back to sample sessions.
    pub fn is_local(&self, base_url: &str) -> bool {
        match self.environment {
            Environment::Local => true,
            Environment::Production => false,
            Environment::Auto => is_loopback_url(base_url),
        }
    }

    /// Returns the request timeout as a Duration, or None if disabled (0).
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.api.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.api.request_timeout_secs)))
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.ui.toast_secs.max(1)))
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    pub fn generate() -> Result<String> {
        let config = Config::default();
        let generated_toml =
            toml::to_string(&config).context("Failed to serialize default config to TOML")?;

        merge_with_template(&generated_toml)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid API base URL: {url}"))?;
    Ok(())
}

/// Returns true if the URL points at localhost or a loopback address.
fn is_loopback_url(raw: &str) -> bool {
    let Ok(parsed) = url::Url::parse(raw) else {
        return false;
    };
    match parsed.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
