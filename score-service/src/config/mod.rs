use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

pub const DEFAULT_DATABASE: &str = "quiz_scores";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct ScoreServiceConfig {
    pub common: core_config::Config,
    pub store: StoreConfig,
    pub gemini: GeminiSettings,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "SCORE_STORE must be 'mongodb' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Connection string; `None` leaves the store unavailable.
    pub mongodb_uri: Option<String>,
    /// Used when the URI does not name a database.
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    /// No timeout is applied when unset.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Reject generated quizzes that do not follow the tagged format.
    pub strict_format: bool,
}

impl ScoreServiceConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Builds the service settings from any key lookup, so tests do not have
    /// to touch the process environment.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| -> Option<String> {
            keys.iter()
                .filter_map(|key| lookup(*key))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        let backend = match get(&["SCORE_STORE"]) {
            Some(value) => value.parse()?,
            None => StoreBackend::MongoDb,
        };

        Ok(ScoreServiceConfig {
            common,
            store: StoreConfig {
                backend,
                mongodb_uri: get(&["MONGO", "MONGODB_URI"]),
                database: get(&["MONGODB_DATABASE"]).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            },
            gemini: GeminiSettings {
                api_key: get(&["API_G", "GOOGLE_API_KEY"]),
                model: get(&["GEMINI_MODEL"]).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: get(&["GEMINI_API_BASE"])
                    .map(|base| base.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                timeout_secs: get(&["GEMINI_TIMEOUT_SECS"])
                    .map(|value| parse_setting::<u64>("GEMINI_TIMEOUT_SECS", &value))
                    .transpose()?,
            },
            quiz: QuizConfig {
                strict_format: get(&["QUIZ_STRICT_FORMAT"])
                    .map(|value| parse_setting::<bool>("QUIZ_STRICT_FORMAT", &value))
                    .transpose()?
                    .unwrap_or(false),
            },
        })
    }
}

fn parse_setting<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, value, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn common() -> core_config::Config {
        core_config::Config {
            port: 3000,
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }

    fn load(vars: &[(&str, &str)]) -> Result<ScoreServiceConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ScoreServiceConfig::from_lookup(common(), |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.store.backend, StoreBackend::MongoDb);
        assert!(config.store.mongodb_uri.is_none());
        assert_eq!(config.store.database, DEFAULT_DATABASE);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.gemini.api_base, DEFAULT_GEMINI_API_BASE);
        assert!(config.gemini.timeout_secs.is_none());
        assert!(!config.quiz.strict_format);
    }

    #[test]
    fn test_legacy_variable_names_take_precedence() {
        let config = load(&[
            ("MONGO", "mongodb://primary:27017/scores"),
            ("MONGODB_URI", "mongodb://secondary:27017"),
            ("API_G", "key-a"),
            ("GOOGLE_API_KEY", "key-b"),
        ])
        .unwrap();
        assert_eq!(
            config.store.mongodb_uri.as_deref(),
            Some("mongodb://primary:27017/scores")
        );
        assert_eq!(config.gemini.api_key.as_deref(), Some("key-a"));
    }

    #[test]
    fn test_blank_values_fall_through_to_alias() {
        let config = load(&[("API_G", "  "), ("GOOGLE_API_KEY", "key-b")]).unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("key-b"));
    }

    #[test]
    fn test_memory_backend_and_overrides() {
        let config = load(&[
            ("SCORE_STORE", "Memory"),
            ("GEMINI_API_BASE", "http://localhost:9999/v1beta/"),
            ("GEMINI_TIMEOUT_SECS", "30"),
            ("QUIZ_STRICT_FORMAT", "true"),
        ])
        .unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.gemini.api_base, "http://localhost:9999/v1beta");
        assert_eq!(config.gemini.timeout_secs, Some(30));
        assert!(config.quiz.strict_format);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            load(&[("SCORE_STORE", "redis")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            load(&[("GEMINI_TIMEOUT_SECS", "soon")]),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            load(&[("QUIZ_STRICT_FORMAT", "yes")]),
            Err(AppError::ConfigError(_))
        ));
    }
}
