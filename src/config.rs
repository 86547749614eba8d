//! Configuración central de la aplicación.
//! Carga variables de entorno (.env, una sola vez) y las convierte en un
//! `Config` inmutable. Un valor mal formado es un error, nunca un default
//! silencioso.
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

use content_adapters::{PipelineSettings, CONTENT_WORKFLOW_ID};

use crate::errors::ConfigError;

pub const LOG_VAR: &str = "CONTENTFLOW_LOG";
pub const MIN_WORDS_VAR: &str = "CONTENTFLOW_MIN_WORDS";
pub const WORDS_PER_MINUTE_VAR: &str = "CONTENTFLOW_WORDS_PER_MINUTE";
pub const SUMMARY_THRESHOLD_VAR: &str = "CONTENTFLOW_SUMMARY_THRESHOLD";
pub const DEFAULT_WORKFLOW_VAR: &str = "CONTENTFLOW_DEFAULT_WORKFLOW";

/// `.env` se lee como mucho una vez por proceso; su ausencia no es un error.
static DOTENV: Lazy<()> = Lazy::new(|| {
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("loaded environment from {}", path.display());
    }
});

/// Configuración de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Filtro de logging (sintaxis `EnvFilter`).
    pub log_filter: String,
    /// Ajustes de los steps del pipeline.
    pub settings: PipelineSettings,
    /// Workflow usado cuando la CLI no recibe `--workflow`.
    pub default_workflow: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { log_filter: "info".into(),
               settings: PipelineSettings::default(),
               default_workflow: CONTENT_WORKFLOW_ID.into() }
    }
}

impl Config {
    /// Lee la configuración del entorno del proceso (tras cargar `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Lazy::force(&DOTENV);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let min_words = parse::<usize>(MIN_WORDS_VAR, get(MIN_WORDS_VAR))?.unwrap_or(defaults.settings.min_words);
        let words_per_minute = parse::<u32>(WORDS_PER_MINUTE_VAR, get(WORDS_PER_MINUTE_VAR))?.unwrap_or(defaults.settings.words_per_minute);
        let detail_threshold =
            parse::<usize>(SUMMARY_THRESHOLD_VAR, get(SUMMARY_THRESHOLD_VAR))?.unwrap_or(defaults.settings.detail_threshold);
        if words_per_minute == 0 {
            return Err(ConfigError::Invalid { key: WORDS_PER_MINUTE_VAR.into(),
                                              value: "0".into(),
                                              reason: "must be greater than zero".into() });
        }
        let settings = PipelineSettings { min_words,
                                          words_per_minute,
                                          detail_threshold };

        Ok(Config { log_filter: get(LOG_VAR).unwrap_or(defaults.log_filter),
                    settings,
                    default_workflow: get(DEFAULT_WORKFLOW_VAR).unwrap_or(defaults.default_workflow) })
    }
}

fn parse<T: FromStr>(key: &str, raw: Option<String>) -> Result<Option<T>, ConfigError> {
    raw.map(|value| {
           value.parse::<T>().map_err(|_| ConfigError::Invalid { key: key.into(),
                                                                 value: value.clone(),
                                                                 reason: "expected a non-negative integer".into() })
       })
       .transpose()
}
