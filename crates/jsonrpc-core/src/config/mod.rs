use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::protocol::IdGenerator;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    /// Indent wire text when printing it
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct IdConfig {
    /// First id handed out to locally built requests
    #[serde(default)]
    pub start: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LoggingConfig {
    pub log_dir: Option<String>, // None means the system temp directory
}

impl Config {
    /// Default location: `<config_dir>/jsonrpc/config.json`
    pub fn default_path() -> PathBuf {
        let mut default_path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        default_path.push("jsonrpc");
        default_path.push("config.json");
        default_path
    }

    /// Load configuration from `config_path`, or from the default location.
    /// A missing file yields the defaults; nothing is written to disk.
    pub fn load(config_path: Option<&PathBuf>) -> std::io::Result<Self> {
        let config_path = config_path.cloned().unwrap_or_else(Self::default_path);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(&config_path)?;
        serde_json::from_str(&config_str)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Generator seeded from `ids.start`
    pub fn id_generator(&self) -> IdGenerator {
        IdGenerator::starting_at(self.ids.start)
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.logging.log_dir.as_deref().map(Path::new)
    }
}
