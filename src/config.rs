//! Configuration module for the topic clustering tool.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `TOPIKA_` and use double
//! underscores to separate nested levels; single underscores within a key
//! map to dashes:
//! - `TOPIKA_KMEANS__MAX_ITERS=50` sets `kmeans.max-iters`
//! - `TOPIKA_KMEANS__INIT_METHOD=randk` sets `kmeans.init-method`
//!
//! The five historical kmeans keys (`max-iters`, `topics`, `init-method`,
//! `output-terms`, `model-prefix`) are required and deliberately carry no
//! defaults: a run with a missing key aborts before any model is built,
//! reporting every missing key.

use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up when no explicit path is given.
const DEFAULT_CONFIG_FILE: &str = "topika.toml";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    /// K-Means run parameters
    #[serde(default)]
    pub kmeans: KMeansSection,
}

/// The `[kmeans]` configuration section as loaded, before validation.
///
/// All required keys are optional here so that validation can report every
/// missing key at once instead of failing on the first.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct KMeansSection {
    /// Upper bound on iteration count
    #[serde(rename = "max-iters", skip_serializing_if = "Option::is_none")]
    pub max_iters: Option<u64>,

    /// Number of clusters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<usize>,

    /// Centroid initialization strategy: "kmeans++" or "randk"
    #[serde(rename = "init-method", skip_serializing_if = "Option::is_none")]
    pub init_method: Option<String>,

    /// Top terms to report per cluster; 0 disables reporting
    #[serde(rename = "output-terms", skip_serializing_if = "Option::is_none")]
    pub output_terms: Option<usize>,

    /// File prefix for the persisted model
    #[serde(rename = "model-prefix", skip_serializing_if = "Option::is_none")]
    pub model_prefix: Option<String>,

    /// RNG seed; omitted means seeding from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Validated kmeans run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansParams {
    pub max_iters: u64,
    pub topics: usize,
    pub init_method: String,
    pub output_terms: usize,
    pub model_prefix: String,
    pub seed: Option<u64>,
}

impl KMeansSection {
    /// Checks every required key, reporting all missing ones at once.
    pub fn validate(&self) -> Result<KMeansParams, Vec<ConfigError>> {
        let mut missing = Vec::new();
        if self.max_iters.is_none() {
            missing.push(ConfigError::MissingKey("max-iters"));
        }
        if self.topics.is_none() {
            missing.push(ConfigError::MissingKey("topics"));
        }
        if self.init_method.is_none() {
            missing.push(ConfigError::MissingKey("init-method"));
        }
        if self.output_terms.is_none() {
            missing.push(ConfigError::MissingKey("output-terms"));
        }
        if self.model_prefix.is_none() {
            missing.push(ConfigError::MissingKey("model-prefix"));
        }
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(KMeansParams {
            max_iters: self.max_iters.unwrap(),
            topics: self.topics.unwrap(),
            init_method: self.init_method.clone().unwrap(),
            output_terms: self.output_terms.unwrap(),
            model_prefix: self.model_prefix.clone().unwrap(),
            seed: self.seed,
        })
    }
}

impl Settings {
    /// Load configuration from all sources.
    ///
    /// `config_path` overrides the default `topika.toml` lookup in the
    /// current directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path))
            // Layer in environment variables with TOPIKA_ prefix.
            // Double underscore separates nesting levels; a single
            // underscore maps to the dash the TOML keys use.
            .merge(Env::prefixed("TOPIKA_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .replace('_', "-")
                    .into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Renders the merged settings as TOML for the `config` command.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
