use crate::error::AppError;
use config::{Config as Cfg, ConfigBuilder, File, builder::DefaultState};
use serde::Deserialize;
use std::env;

/// Settings shared by every service binary.
///
/// Sources, lowest to highest priority: `configuration.*` file, `APP__*`
/// environment variables, then the bare `PORT`, `LOG_LEVEL` and
/// `OTLP_ENDPOINT` variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let builder = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        Self::from_builder(with_plain_overrides(builder, |key| env::var(key).ok())?)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        Ok(builder.build()?.try_deserialize()?)
    }
}

/// Applies `PORT`, `LOG_LEVEL` and `OTLP_ENDPOINT` on top of `builder`.
/// Blank values count as unset.
fn with_plain_overrides<F>(
    builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    Ok(builder
        .set_override_option("port", get("PORT"))?
        .set_override_option("log_level", get("LOG_LEVEL"))?
        .set_override_option("otlp_endpoint", get("OTLP_ENDPOINT"))?)
}
