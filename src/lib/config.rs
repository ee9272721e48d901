use anyhow::Context;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: tracing::Level,
}

const INPUT_DIR_KEY: &str = "EXPORT_INPUT_DIR";
const OUTPUT_DIR_KEY: &str = "EXPORT_OUTPUT_DIR";
const LOG_DIR_KEY: &str = "EXPORT_LOG_DIR";
const LOG_LEVEL_KEY: &str = "LOG_LEVEL";

const DEFAULT_INPUT_DIR: &str = ".";
const DEFAULT_OUTPUT_DIR: &str = ".";
const DEFAULT_LOG_DIR: &str = "log";

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: tracing::Level::INFO,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let input_dir = lookup(INPUT_DIR_KEY)
            .map(PathBuf::from)
            .unwrap_or(defaults.input_dir);
        let output_dir = lookup(OUTPUT_DIR_KEY)
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let log_dir = lookup(LOG_DIR_KEY)
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);
        let log_level = match lookup(LOG_LEVEL_KEY) {
            Some(level) => level
                .trim()
                .parse()
                .with_context(|| format!("invalid {}: '{}'", LOG_LEVEL_KEY, level))?,
            None => defaults.log_level,
        };

        Ok(Self {
            input_dir,
            output_dir,
            log_dir,
            log_level,
        })
    }
}
