//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use lineup_api::apifootball::{ApiKey, FixtureQuery};
use lineup_sensor::{DEFAULT_NAME, Mode};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides `api_key`.
pub const API_KEY_ENV: &str = "API_FOOTBALL_KEY";

/// Default refresh interval.
const DEFAULT_SCAN_INTERVAL_MINUTES: u64 = 120;

/// Top-level application configuration.
///
/// Every field falls back to its default when absent from the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// API-Football key. `API_FOOTBALL_KEY` takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
    /// Entity display name.
    pub name: String,
    /// Which lineups to publish.
    pub mode: Mode,
    /// Minutes between refreshes.
    pub scan_interval_minutes: u64,
    /// Fixture filter (team, league, season).
    pub fixture: FixtureQuery,
    /// Upstream endpoint settings.
    pub api: ApiConfig,
}

/// Upstream endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of API-Football v3.
    pub base_url: String,
    /// Value of the `x-rapidapi-host` header.
    pub host: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://v3.football.api-sports.io/"),
            host: String::from("v3.football.api-sports.io"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            name: String::from(DEFAULT_NAME),
            mode: Mode::default(),
            scan_interval_minutes: DEFAULT_SCAN_INTERVAL_MINUTES,
            fixture: FixtureQuery::default(),
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Picks the API key: `env_key` first, then the file.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source holds a non-blank key.
    pub fn resolve_api_key(&self, env_key: Option<String>) -> Result<ApiKey> {
        let key = env_key
            .map(ApiKey::from)
            .filter(|k| !k.is_blank())
            .or_else(|| self.api_key.clone().filter(|k| !k.is_blank()));
        let Some(key) = key else {
            bail!("api_key is required (set it in config.toml or {API_KEY_ENV})");
        };
        Ok(key)
    }

    /// Parses the base URL, ensuring a trailing slash so endpoint paths join
    /// below it.
    ///
    /// # Errors
    ///
    /// Returns an error if `api.base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.api.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).with_context(|| format!("invalid api.base_url: {}", self.api.base_url))
    }

    /// Refresh interval.
    ///
    /// # Errors
    ///
    /// Returns an error if `minutes` is zero or overflows.
    pub fn scan_interval(minutes: u64) -> Result<Duration> {
        if minutes == 0 {
            bail!("scan interval must be at least 1 minute");
        }
        let secs = minutes
            .checked_mul(60)
            .context("scan interval is too large")?;
        Ok(Duration::from_secs(secs))
    }

    /// Copy of the config safe to log: the key is replaced by its masked form.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|k| ApiKey::new(k.masked())),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.api_key.is_none());
        assert_eq!(config.name, "Football Lineup");
        assert_eq!(config.mode, Mode::SingleTeam);
        assert_eq!(config.scan_interval_minutes, 120);
        assert_eq!(config.fixture, FixtureQuery::new(2023, 140, 529));
    }

    #[test]
    fn test_parse_full_config() {
        // Arrange
        let toml_str = r#"
            api_key = "abc123"
            name = "Clasico"
            mode = "both_sides"
            scan_interval_minutes = 30

            [fixture]
            team = 541
            league = 140
            season = 2024

            [api]
            base_url = "http://localhost:9000"
            host = "localhost"
        "#;

        // Act
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.api_key, Some(ApiKey::new("abc123")));
        assert_eq!(config.name, "Clasico");
        assert_eq!(config.mode, Mode::BothSides);
        assert_eq!(config.scan_interval_minutes, 30);
        assert_eq!(config.fixture, FixtureQuery::new(2024, 140, 541));
        assert_eq!(config.api.host, "localhost");
    }

    #[test]
    fn test_partial_fixture_table_uses_defaults() {
        // Arrange
        let toml_str = "[fixture]\nteam = 33\n";

        // Act
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.fixture, FixtureQuery::new(2023, 140, 33));
        assert_eq!(config.name, "Football Lineup");
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            api_key: Some(ApiKey::new("k-123")),
            mode: Mode::BothSides,
            ..AppConfig::default()
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_saved_default_has_no_api_key_line() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();

        // Assert
        assert!(!toml_str.contains("api_key"));
        assert!(toml_str.contains("scan_interval_minutes = 120"));
    }

    #[test]
    fn test_resolve_api_key_prefers_env() {
        // Arrange
        let config = AppConfig {
            api_key: Some(ApiKey::new("from-file")),
            ..AppConfig::default()
        };

        // Act
        let key = config
            .resolve_api_key(Some(String::from("from-env")))
            .unwrap();

        // Assert
        assert_eq!(key.expose(), "from-env");
    }

    #[test]
    fn test_resolve_api_key_falls_back_to_file() {
        // Arrange
        let config = AppConfig {
            api_key: Some(ApiKey::new("from-file")),
            ..AppConfig::default()
        };

        // Act
        let key = config.resolve_api_key(Some(String::new())).unwrap();

        // Assert
        assert_eq!(key.expose(), "from-file");
    }

    #[test]
    fn test_resolve_api_key_missing() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let result = config.resolve_api_key(None);

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_key is required")
        );
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        // Arrange
        let mut config = AppConfig::default();
        config.api.base_url = String::from("http://127.0.0.1:8080/v3");

        // Act
        let url = config.base_url().unwrap();

        // Assert
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v3/");
        assert_eq!(
            url.join("fixtures/lineups").unwrap().path(),
            "/v3/fixtures/lineups"
        );
    }

    #[test]
    fn test_scan_interval() {
        // Arrange & Act & Assert
        assert_eq!(
            AppConfig::scan_interval(120).unwrap(),
            Duration::from_secs(7_200)
        );
        assert!(AppConfig::scan_interval(0).is_err());
        assert!(AppConfig::scan_interval(u64::MAX).is_err());
    }

    #[test]
    fn test_redacted_masks_key() {
        // Arrange
        let config = AppConfig {
            api_key: Some(ApiKey::new("0123456789abcdef")),
            ..AppConfig::default()
        };

        // Act
        let redacted = config.redacted();

        // Assert
        assert_eq!(redacted.api_key.unwrap().expose(), "****cdef");
    }
}
