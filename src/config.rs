use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::addic7ed::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::workflows::scoring::ScoringWeights;

const DEFAULT_LANGUAGE: &str = "English";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    base_url: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    exact_match_weight: Option<f64>,
    exact_match_threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub user_agent: String,
    pub language: String,
    pub weights: ScoringWeights,
}

impl Settings {
    /// Config file first, then environment variables on top.
    pub fn load() -> Result<Self> {
        let file = read_config_file(&get_config_path())?;
        Self::from_sources(
            file,
            env::var("SUBTITLE_FINDER_URL").ok(),
            env::var("SUBTITLE_FINDER_LANGUAGE").ok(),
        )
    }

    fn from_sources(
        file: ConfigFile,
        env_url: Option<String>,
        env_language: Option<String>,
    ) -> Result<Self> {
        let defaults = ScoringWeights::default();
        let settings = Self {
            base_url: env_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: file
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            language: env_language
                .or(file.language)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            weights: ScoringWeights {
                exact_match_weight: file
                    .exact_match_weight
                    .unwrap_or(defaults.exact_match_weight),
                exact_match_threshold: file
                    .exact_match_threshold
                    .unwrap_or(defaults.exact_match_threshold),
            },
        };
        validate_weights(&settings.weights)?;
        Ok(settings)
    }
}

/// Scores stay non-negative only with a non-negative weight and a threshold inside [0, 1].
fn validate_weights(weights: &ScoringWeights) -> Result<()> {
    if !(weights.exact_match_weight >= 0.0) {
        bail!(
            "exact_match_weight must be zero or positive, got {}",
            weights.exact_match_weight
        );
    }
    if !(0.0..=1.0).contains(&weights.exact_match_threshold) {
        bail!(
            "exact_match_threshold must be between 0 and 1, got {}",
            weights.exact_match_threshold
        );
    }
    Ok(())
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("subtitle-finder"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

pub fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}
