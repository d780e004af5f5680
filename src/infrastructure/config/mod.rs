//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::infrastructure::horoscope::DEFAULT_BASE_URL;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub horoscope: HoroscopeConfig,
    #[serde(default)]
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HoroscopeConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub telegram: Option<TelegramConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub token: Option<String>,
    /// Bot API server, for self-hosted servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: i64,
}

fn default_poll_timeout() -> i64 {
    30
}

impl Default for HoroscopeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: None,
            poll_timeout_seconds: default_poll_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "horoscope-bot".to_string(),
                prefix: "/".to_string(),
            },
            horoscope: HoroscopeConfig::default(),
            adapters: AdaptersConfig {
                telegram: Some(TelegramConfig::default()),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Load `path` if it exists, otherwise defaults; environment wins either way.
    pub fn load_or_env(path: impl Into<PathBuf>) -> Self {
        Self::load_or_env_with(path, |key| std::env::var(key).ok())
    }

    /// `load_or_env` with an explicit variable lookup
    pub fn load_or_env_with<F>(path: impl Into<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.into();
        let mut config = if path.exists() {
            Config::load(&path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            })
        } else {
            Config::default()
        };
        config.apply_env(lookup);
        config
    }

    /// Write the default config to `path`, refusing to replace an existing file
    pub fn write_default(path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let path = path.into();
        if path.exists() {
            return Err(ConfigError::InvalidValue(format!("{} already exists, not overwriting", path.display())));
        }

        let yaml = Config::default().to_yaml()?;
        std::fs::write(&path, yaml)
            .map_err(|e| ConfigError::Write(format!("{}: {}", path.display(), e)))
    }

    /// Apply `BOT_TOKEN`, `BOT_PREFIX` and `HOROSCOPE_API_URL` from `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("BOT_TOKEN").filter(|t| !t.trim().is_empty()) {
            self.adapters.telegram.get_or_insert_with(TelegramConfig::default).token = Some(token);
        }

        if let Some(prefix) = lookup("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Some(url) = lookup("HOROSCOPE_API_URL") {
            self.horoscope.base_url = url;
        }
    }

    /// The bot access token; required to run against Telegram
    pub fn telegram_token(&self) -> Result<String, ConfigError> {
        self.adapters.telegram
            .as_ref()
            .and_then(|t| t.token.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("BOT_TOKEN".to_string()))
    }

    pub fn poll_timeout(&self) -> i64 {
        self.adapters.telegram
            .as_ref()
            .map(|t| t.poll_timeout_seconds)
            .unwrap_or_else(default_poll_timeout)
    }

    pub fn telegram_api_base(&self) -> Option<&str> {
        self.adapters.telegram.as_ref().and_then(|t| t.api_base.as_deref())
    }

    pub fn horoscope_timeout(&self) -> Duration {
        Duration::from_secs(self.horoscope.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bot.prefix, "/");
        assert_eq!(config.horoscope.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_timeout(), 30);
        assert!(matches!(config.telegram_token(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(env(&[
            ("BOT_TOKEN", "123:abc"),
            ("BOT_PREFIX", "!"),
            ("HOROSCOPE_API_URL", "http://localhost:8080"),
        ]));
        assert_eq!(config.telegram_token().unwrap(), "123:abc");
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.horoscope.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_blank_token_is_missing() {
        let mut config = Config::default();
        config.apply_env(env(&[("BOT_TOKEN", "  ")]));
        assert!(config.telegram_token().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("bot:\n  name: stars\n  prefix: /\n").unwrap();
        assert_eq!(config.bot.name, "stars");
        assert_eq!(config.horoscope.timeout_seconds, 10);
        assert!(config.adapters.telegram.is_none());
        assert_eq!(config.poll_timeout(), 30);
    }

    #[test]
    fn test_yaml_keys_are_kebab_case() {
        let yaml = "bot:\n  name: stars\n  prefix: /\nhoroscope:\n  base-url: http://x\n  timeout-seconds: 3\nadapters:\n  telegram:\n    token: t\n    poll-timeout-seconds: 5\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.horoscope_timeout(), Duration::from_secs(3));
        assert_eq!(config.poll_timeout(), 5);
        assert_eq!(config.telegram_token().unwrap(), "t");
    }

    #[test]
    fn test_default_yaml_parses_back() {
        let yaml = Config::default().to_yaml().unwrap();
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.bot.name, "horoscope-bot");
    }

    #[test]
    fn test_unparseable_file_falls_back_to_defaults_and_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "bot: [not: valid").unwrap();

        let config = Config::load_or_env_with(file.path(), env(&[("BOT_TOKEN", "from-env")]));
        assert_eq!(config.bot.name, "horoscope-bot");
        assert_eq!(config.telegram_token().unwrap(), "from-env");
    }

    #[test]
    fn test_missing_file_uses_env() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_env_with(
            dir.path().join("absent.yaml"),
            env(&[("HOROSCOPE_API_URL", "http://local")]),
        );
        assert_eq!(config.horoscope.base_url, "http://local");
    }

    #[test]
    fn test_env_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "bot:\n  name: stars\n  prefix: /\nadapters:\n  telegram:\n    token: from-file\n").unwrap();

        let config = Config::load_or_env_with(file.path(), env(&[("BOT_TOKEN", "from-env")]));
        assert_eq!(config.bot.name, "stars");
        assert_eq!(config.telegram_token().unwrap(), "from-env");
    }

    #[test]
    fn test_write_default_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        Config::write_default(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(Config::from_yaml(&written).unwrap().bot.name, "horoscope-bot");

        std::fs::write(&path, "keep me").unwrap();
        assert!(matches!(Config::write_default(&path), Err(ConfigError::InvalidValue(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_api_base_is_optional() {
        assert_eq!(Config::default().telegram_api_base(), None);
        let yaml = "bot:\n  name: s\n  prefix: /\nadapters:\n  telegram:\n    api-base: http://bot-api:8081\n";
        assert_eq!(Config::from_yaml(yaml).unwrap().telegram_api_base(), Some("http://bot-api:8081"));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        assert!(matches!(Config::from_yaml("bot: ["), Err(ConfigError::Parse(_))));
    }
}
