//! Layered configuration.
//!
//! Settings resolve in order: built-in defaults, then `vedalex.toml` in the
//! working directory, then `VEDALEX_` environment variables. Double
//! underscores separate nesting levels:
//! - `VEDALEX_SERVER__PORT=9000` sets `server.port`
//! - `VEDALEX_DATA_PATH=/srv/data.json` sets `data_path`
//! - `VEDALEX_LOGGING__DEFAULT=debug` sets `logging.default`

use std::collections::HashMap;
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "vedalex.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Path to the precomputed clustering export.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with the static UI, served under `/ui`.
    #[serde(default = "default_ui_dir")]
    pub ui_dir: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides, e.g. `cluster = "debug"`.
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.json")
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_ui_dir() -> PathBuf {
    PathBuf::from("demos/ui")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ui_dir: default_ui_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from all layers.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("VEDALEX_").split("__"))
            .extract()
    }
}
