use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use hotelpush_bridge::config::{Config, EndpointsConfig};
use reqwest::Url;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g., `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the configuration to TOML (e.g., when saving changes).
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    /// An endpoint base is not an absolute http(s) URL.
    #[error("invalid {field} {url:?}: {reason}")]
    InvalidUrl {
        field: &'static str,
        url: String,
        reason: String,
    },
}

fn config_path() -> Result<PathBuf, ConfigError> {
    match ProjectDirs::from("com", "CodeBurrow", "HotelApp") {
        Some(path) => Ok(path.config_dir().join("config.toml")),
        None => Err(ConfigError::DirectoriesNotFound),
    }
}

fn validate_url(field: &'static str, url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

fn validate_endpoints(endpoints: &EndpointsConfig) -> Result<(), ConfigError> {
    validate_url("push_base_url", &endpoints.push_base_url)?;
    validate_url("registration_base_url", &endpoints.registration_base_url)
}

/// Checks every configured environment, not only the active one, so a typo
/// in a staging table is caught before switching to it.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let environments = &config.endpoints;
    validate_endpoints(&environments.production)?;
    for endpoints in [&environments.test, &environments.staging].into_iter().flatten() {
        validate_endpoints(endpoints)?;
    }
    Ok(())
}

/// Parses and validates the contents of a configuration file.
pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Loads the configuration at `config_path`, writing the defaults there when
/// the file does not exist yet.
pub async fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {config_path:?}");
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        return parse_config(&contents);
    }

    let config = Config::default();
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

/// Loads the application configuration from the user's configuration
/// directory. Returns the loaded config and the path it was loaded from.
pub async fn load_config() -> Result<(Config, PathBuf), ConfigError> {
    let config_path = config_path()?;
    let config = load_config_from(&config_path).await?;
    Ok((config, config_path))
}

/// Saves the configuration to `config_path`, overwriting any existing file.
pub async fn save_config(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(config_path)
        .await?;

    let contents = toml::to_string_pretty(config)?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}
