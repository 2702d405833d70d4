use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use serde::{Deserialize, Serialize};
use serfig::collectors::{from_file, from_self};
use serfig::parsers::Toml;
use thiserror::Error;
use tracing::Level;

use crate::Key;

/// Largest accepted upper bound. Every trajectory below it peaks well inside u64.
pub const MAX_SAMPLE: Key = u32::MAX as Key;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("minimum must be at least 1 (collatz is undefined for 0)")]
    ZeroMinimum,

    #[error("empty range: min {min} is greater than max {max}")]
    EmptyRange { min: Key, max: Key },

    #[error("max {max} exceeds the supported bound {}", MAX_SAMPLE)]
    RangeTooLarge { max: Key },

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("failed to load configuration: {0}")]
    Load(String),
}

// Defaults must match `Config::default()`: serfig drops CLI values equal to the
// default, which is what lets the config file fill them in.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[clap(author, version, about = "Collatz step counts with an optional LRU/LFU memo cache", long_about = None)]
#[serde(default)]
pub struct Config {
    /// Path to the configuration file
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,

    /// How many numbers to sample
    #[arg(short = 'n', long, default_value_t = 10)]
    pub samples: usize,

    /// Inclusive lower bound of the sampling range
    #[arg(long, default_value_t = 1)]
    pub min: Key,

    /// Inclusive upper bound of the sampling range
    #[arg(long, default_value_t = 100)]
    pub max: Key,

    /// Cache eviction policy
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = CachePolicy::None)]
    pub policy: CachePolicy,

    /// Cache capacity in entries
    #[arg(short, long, default_value_t = 16)]
    pub cache_size: usize,

    /// Seed for the number generator; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write every sample to this CSV file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_file: None,
            samples: 10,
            min: 1,
            max: 100,
            policy: CachePolicy::None,
            cache_size: 16,
            seed: None,
            output: None,
            log_level: "info".to_string(),
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    #[default]
    None,
    #[serde(alias = "LRU")]
    Lru,
    #[serde(alias = "LFU")]
    Lfu,
}

impl CachePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CachePolicy::None => "none",
            CachePolicy::Lru => "lru",
            CachePolicy::Lfu => "lfu",
        }
    }
}

impl Config {
    pub fn load(arg_conf: Self) -> Result<Self, ConfigError> {
        let mut builder: serfig::Builder<Self> = serfig::Builder::default();

        if let Some(config_file) = &arg_conf.config_file {
            let path = config_file
                .to_str()
                .ok_or_else(|| ConfigError::Load(format!("non UTF-8 path {config_file:?}")))?;
            builder = builder.collect(from_file(Toml, path));
        }

        // Arguments take precedence over the file
        builder = builder.collect(from_self(arg_conf));

        builder.build().map_err(|e| ConfigError::Load(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        if self.min > self.max {
            return Err(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.max > MAX_SAMPLE {
            return Err(ConfigError::RangeTooLarge { max: self.max });
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
