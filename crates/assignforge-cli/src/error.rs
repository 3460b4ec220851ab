use std::process::ExitCode;

use assignforge::{AssignError, ConfigError};
use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported file extension for {0} (expected .toml, .yaml, .yml, .json or .csv)")]
    UnsupportedFormat(String),

    #[error("Invalid instance: {0}")]
    Instance(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Assign(#[from] AssignError),
}

impl CliError {
    /// Exit status: 1 for an infeasible problem, 2 for anything else.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Assign(err) if err.is_infeasible() => ExitCode::from(1),
            _ => ExitCode::from(2),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
