//! Application configuration.
//!
//! Loaded with figment from, in increasing precedence: built-in defaults, a
//! TOML file, then `STUDYBUDDY_*` environment variables (`__` separates
//! nested keys, e.g. `STUDYBUDDY_STORAGE__DATABASE_PATH`).
//!
//! Environment keys are case-folded, so the `[auth.tokens]` table is read
//! from the TOML file only; `STUDYBUDDY_AUTH__TOKENS__*` is ignored.

use crate::logging::{default_log_level, normalize_level};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const APP_DIR_NAME: &str = "studybuddy";
const CONFIG_FILE_NAME: &str = "config.toml";
const DATABASE_FILE_NAME: &str = "studybuddy.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const ENV_PREFIX: &str = "STUDYBUDDY_";
const ENV_TOKEN_TABLE_PREFIX: &str = "auth__tokens";
pub const DEFAULT_APP_ID: &str = "default-app-id";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(deserialize_with = "lenient_string")]
    pub app_id: String,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Token presented to the identity verifier; anonymous when unset.
    #[serde(deserialize_with = "lenient_optional_string")]
    pub initial_auth_token: Option<String>,
    /// Token to uid table for the static verifier. TOML only.
    pub tokens: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Defaults to `<data dir>/studybuddy/studybuddy.sqlite3`.
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Defaults to `<data dir>/studybuddy/logs`.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Simulated generation latency.
    pub latency_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { latency_ms: 2_000 }
    }
}

/// Scalar accepted where a string is expected. Env values that look numeric
/// or boolean arrive typed, so ids and tokens like `2024` must still load.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientScalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Flag(bool),
}

impl From<LenientScalar> for String {
    fn from(value: LenientScalar) -> Self {
        match value {
            LenientScalar::Text(text) => text,
            LenientScalar::Unsigned(number) => number.to_string(),
            LenientScalar::Signed(number) => number.to_string(),
            LenientScalar::Float(number) => number.to_string(),
            LenientScalar::Flag(flag) => flag.to_string(),
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    LenientScalar::deserialize(deserializer).map(String::from)
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<LenientScalar>::deserialize(deserializer)?.map(String::from))
}

impl AppConfig {
    /// Loads configuration, reading `config_path` instead of the default file
    /// when given. A missing file is not an error.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);
        let config: AppConfig = Self::figment(&config_file).extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .filter(|key| {
                        !key.as_str()
                            .to_ascii_lowercase()
                            .starts_with(ENV_TOKEN_TABLE_PREFIX)
                    })
                    .split("__"),
            )
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let app_id = self.app_id.trim();
        if app_id.is_empty() {
            return Err(ConfigError::Invalid("app_id cannot be empty".to_string()));
        }
        if app_id.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "app_id cannot contain `/`, got `{app_id}`"
            )));
        }
        normalize_level(&self.logging.level).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .log_dir
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(LOG_DIR_NAME))
    }

    pub fn generation_latency(&self) -> Duration {
        Duration::from_millis(self.generation.latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DEFAULT_APP_ID};
    use figment::Jail;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should validate");
        assert_eq!(config.app_id, DEFAULT_APP_ID);
        assert!(config.auth.initial_auth_token.is_none());
        assert_eq!(config.generation_latency(), Duration::from_secs(2));
        assert!(config.database_path().ends_with("studybuddy/studybuddy.sqlite3"));
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "studybuddy.toml",
                r#"
                    app_id = "biology-101"

                    [auth]
                    initial_auth_token = "tok-1"

                    [auth.tokens]
                    tok-1 = "uid-alice"

                    [generation]
                    latency_ms = 0
                "#,
            )?;
            jail.set_env("STUDYBUDDY_STORAGE__DATABASE_PATH", "/tmp/notes.sqlite3");
            jail.set_env("STUDYBUDDY_APP_ID", "chemistry-201");

            let config = AppConfig::load_from(Some(Path::new("studybuddy.toml")))
                .expect("config should load");
            assert_eq!(config.app_id, "chemistry-201");
            assert_eq!(config.auth.initial_auth_token.as_deref(), Some("tok-1"));
            assert_eq!(config.auth.tokens.get("tok-1").map(String::as_str), Some("uid-alice"));
            assert_eq!(config.generation_latency(), Duration::ZERO);
            assert_eq!(config.database_path(), PathBuf::from("/tmp/notes.sqlite3"));
            Ok(())
        });
    }

    #[test]
    fn numeric_env_values_load_as_strings() {
        Jail::expect_with(|jail| {
            jail.set_env("STUDYBUDDY_APP_ID", "2024");
            jail.set_env("STUDYBUDDY_AUTH__INITIAL_AUTH_TOKEN", "123456");

            let config = AppConfig::load_from(Some(Path::new("absent.toml")))
                .expect("numeric env values should load");
            assert_eq!(config.app_id, "2024");
            assert_eq!(config.auth.initial_auth_token.as_deref(), Some("123456"));
            Ok(())
        });
    }

    #[test]
    fn numeric_toml_values_load_as_strings() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "studybuddy.toml",
                r#"
                    app_id = 42

                    [auth]
                    initial_auth_token = 7
                "#,
            )?;
            let config = AppConfig::load_from(Some(Path::new("studybuddy.toml")))
                .expect("numeric TOML values should load");
            assert_eq!(config.app_id, "42");
            assert_eq!(config.auth.initial_auth_token.as_deref(), Some("7"));
            Ok(())
        });
    }

    #[test]
    fn token_table_keeps_case_and_ignores_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "studybuddy.toml",
                r#"
                    [auth.tokens]
                    MixedCaseTok = "uid-bob"
                "#,
            )?;
            jail.set_env("STUDYBUDDY_AUTH__TOKENS__AbC", "uid-x");

            let config = AppConfig::load_from(Some(Path::new("studybuddy.toml")))
                .expect("config should load");
            assert_eq!(
                config.auth.tokens.get("MixedCaseTok").map(String::as_str),
                Some("uid-bob")
            );
            assert_eq!(config.auth.tokens.len(), 1);
            Ok(())
        });
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load_from(Some(Path::new("absent.toml")))
                .expect("missing file is not an error");
            assert_eq!(config.app_id, DEFAULT_APP_ID);
            Ok(())
        });
    }

    #[test]
    fn rejects_nested_app_id_and_unknown_level() {
        let mut config = AppConfig {
            app_id: "a/b".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.app_id = "ok".to_string();
        config.logging.level = "loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
