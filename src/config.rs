//! Layered configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. a TOML file: the explicit path, else `FUNCTOR_CONFIG_PATH`, else an
//!    optional `functor.toml` in the working directory
//! 3. environment variables prefixed `FUNCTOR_`, with `__` between nested
//!    keys (e.g. `FUNCTOR_ENGINE__FINALLY_SIGNAL=propagate`)
//!
//! A `.env` file is loaded into the environment first when present.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::EngineSettings;

const ENV_PREFIX: &str = "FUNCTOR";
const CONFIG_PATH_VAR: &str = "FUNCTOR_CONFIG_PATH";
const DEFAULT_FILE: &str = "functor";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load with the default source search, environment included
    pub fn load() -> Result<Self> {
        Self::builder().with_env(true).build()
    }

    /// Render as TOML, e.g. to show the effective configuration
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    load_env: bool,
}

impl ConfigBuilder {
    /// Explicit config file; it must exist
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Also read `.env`, `FUNCTOR_CONFIG_PATH` and `FUNCTOR_*` variables
    pub fn with_env(mut self, load_env: bool) -> Self {
        self.load_env = load_env;
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.load_env {
            dotenvy::dotenv().ok();
        }

        let defaults = Config::default();
        let mut builder = ::config::Config::builder()
            .add_source(::config::File::from_str(
                &defaults.to_toml()?,
                ::config::FileFormat::Toml,
            ));

        let path = self.config_path.or_else(|| {
            if self.load_env {
                std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from)
            } else {
                None
            }
        });

        builder = match path {
            Some(path) => builder.add_source(::config::File::from(path).required(true)),
            None => builder.add_source(::config::File::with_name(DEFAULT_FILE).required(false)),
        };

        if self.load_env {
            builder = builder.add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
