use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gist: GistConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Settings for the Gist provider used to publish assistant documents.
/// The token is a server-held secret; it never reaches a client.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GistConfig {
    pub token: Option<String>,
    pub api_base: Option<String>,
    pub filename_prefix: Option<String>,
}

impl GistConfig {
    /// Resolve the provider token: config value first, then the
    /// GIST_TOKEN environment variable
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| std::env::var("GIST_TOKEN").ok().filter(|t| !t.trim().is_empty()))
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/indiceia.db"

[server]
port = 3000

[gist]
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Load the configuration once and keep it for the process lifetime
pub fn init_config() -> anyhow::Result<&'static Config> {
    if CONFIG.get().is_none() {
        let config = load_config()?;
        let _ = CONFIG.set(config);
    }
    Ok(CONFIG.get().expect("config was just set"))
}

pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Configuration has not been initialized")
}

/// Get the database file path from configuration.
/// Relative paths resolve against the executable directory.
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    // Fallback: relative to current directory
    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/indiceia.db");
        assert_eq!(config.server.port, 3000);
        assert!(config.gist.token.is_none());
    }

    #[test]
    fn test_gist_section_parses_token() {
        let config: Config = toml::from_str(
            r#"
            [database]
            path = "x.db"

            [gist]
            token = "ghp_test"
            filename_prefix = "demo"
            "#,
        )
        .unwrap();
        assert_eq!(config.gist.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.gist.filename_prefix.as_deref(), Some("demo"));
    }
}
