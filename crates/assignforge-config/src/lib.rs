//! Configuration system for AssignForge.
//!
//! Load solver configuration from TOML or YAML files to control capacity
//! policy, slot layout and batch parallelism without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use assignforge_config::{CapacityPolicy, SlotLayoutKind, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     forbidden_threshold = 1e9
//!
//!     [capacity]
//!     policy = "uniform"
//!     uniform_capacity = 2
//!
//!     [expansion]
//!     layout = "compact"
//! "#).unwrap();
//!
//! assert_eq!(config.capacity.policy, CapacityPolicy::Uniform);
//! assert_eq!(config.capacity.capacity_for(Some(5)), 2);
//! assert_eq!(config.expansion.layout, SlotLayoutKind::Compact);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use assignforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("assign.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Costs at or above this value are treated as forbidden pairs.
    #[serde(default)]
    pub forbidden_threshold: Option<f64>,

    /// Capacity policy configuration.
    #[serde(default)]
    pub capacity: CapacityConfig,

    /// Slot expansion configuration.
    #[serde(default)]
    pub expansion: ExpansionConfig,

    /// Batch solving configuration.
    #[serde(default)]
    pub batch: BatchConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Switches to the uniform capacity policy with the given capacity.
    pub fn with_uniform_capacity(mut self, capacity: u32) -> Self {
        self.capacity.policy = CapacityPolicy::Uniform;
        self.capacity.uniform_capacity = Some(capacity);
        self
    }

    /// Sets the capacity used for resources that declare none.
    pub fn with_default_capacity(mut self, capacity: u32) -> Self {
        self.capacity.default_capacity = capacity;
        self
    }

    /// Sets the slot layout.
    pub fn with_layout(mut self, layout: SlotLayoutKind) -> Self {
        self.expansion.layout = layout;
        self
    }

    /// Materializes the expanded matrix instead of using a lazy view.
    pub fn with_materialize(mut self, materialize: bool) -> Self {
        self.expansion.materialize = materialize;
        self
    }

    /// Sets the forbidden-cost threshold.
    pub fn with_forbidden_threshold(mut self, threshold: f64) -> Self {
        self.forbidden_threshold = Some(threshold);
        self
    }

    /// Sets the batch thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.batch.thread_count = thread_count;
        self
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity.default_capacity == 0 {
            return Err(ConfigError::Invalid(
                "capacity.default_capacity must be at least 1".to_string(),
            ));
        }
        match (self.capacity.policy, self.capacity.uniform_capacity) {
            (CapacityPolicy::Uniform, None) => {
                return Err(ConfigError::Invalid(
                    "capacity.uniform_capacity is required by the uniform policy".to_string(),
                ));
            }
            (_, Some(0)) => {
                return Err(ConfigError::Invalid(
                    "capacity.uniform_capacity must be at least 1".to_string(),
                ));
            }
            _ => {}
        }
        if let Some(threshold) = self.forbidden_threshold {
            if threshold.is_nan() || threshold <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "forbidden_threshold must be positive, got {}",
                    threshold
                )));
            }
        }
        if self.batch.thread_count == ThreadCount::Specific(0) {
            return Err(ConfigError::Invalid(
                "batch.thread_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How resource capacities are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Each resource keeps its declared capacity.
    #[default]
    Declared,

    /// Every resource gets `uniform_capacity` slots regardless of declaration.
    Uniform,
}

/// Capacity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CapacityConfig {
    /// Capacity resolution policy.
    #[serde(default)]
    pub policy: CapacityPolicy,

    /// Capacity of resources that declare none.
    #[serde(default = "default_capacity")]
    pub default_capacity: u32,

    /// Capacity applied to every resource under the uniform policy.
    #[serde(default)]
    pub uniform_capacity: Option<u32>,
}

fn default_capacity() -> u32 {
    1
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            policy: CapacityPolicy::Declared,
            default_capacity: default_capacity(),
            uniform_capacity: None,
        }
    }
}

impl CapacityConfig {
    /// Resolves the capacity of one resource.
    pub fn capacity_for(&self, declared: Option<u32>) -> u32 {
        match self.policy {
            CapacityPolicy::Declared => declared.unwrap_or(self.default_capacity),
            CapacityPolicy::Uniform => self.uniform_capacity.unwrap_or(self.default_capacity),
        }
    }
}

/// Slot layout of the expanded cost matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotLayoutKind {
    /// `R × max_capacity` slots; slot `s` belongs to resource `s mod R`.
    #[default]
    Strided,

    /// Exactly `sum(capacities)` slots.
    Compact,
}

/// Expansion configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExpansionConfig {
    /// Slot layout.
    #[serde(default)]
    pub layout: SlotLayoutKind,

    /// Whether to build the full expanded matrix before solving.
    #[serde(default)]
    pub materialize: bool,
}

/// Batch solving configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchConfig {
    /// Worker threads for solving independent instances.
    #[serde(default)]
    pub thread_count: ThreadCount,
}

/// Thread count for batch solving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Automatically determine based on available CPU cores.
    #[default]
    Auto,
    /// Use all available CPU cores.
    Unlimited,
    /// Use a specific number of threads.
    Specific(usize),
}

impl ThreadCount {
    /// Resolves the thread count for `job_count` independent jobs.
    pub fn resolve(&self, job_count: usize) -> usize {
        let cpus = std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1);
        let threads = match self {
            ThreadCount::Auto => std::cmp::min(cpus, job_count),
            ThreadCount::Unlimited => cpus,
            ThreadCount::Specific(n) => std::cmp::min(*n, job_count),
        };
        threads.max(1)
    }
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadCount::Auto => write!(f, "Auto"),
            ThreadCount::Unlimited => write!(f, "Unlimited"),
            ThreadCount::Specific(n) => write!(f, "{}", n),
        }
    }
}
