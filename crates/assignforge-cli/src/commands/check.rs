use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use owo_colors::OwoColorize;

use crate::error::{CliError, CliResult};
use crate::instance::{load_instance, CsvSchema};

/// Validates an instance without solving it.
pub fn run(instance: &Path, schema: &CsvSchema) -> CliResult<ExitCode> {
    let problem = load_instance(instance, schema)?;

    let declared: Vec<String> = problem
        .resources()
        .iter()
        .map(|r| match r.capacity {
            Some(c) => format!("{}={}", r.name, c),
            None => format!("{}=default", r.name),
        })
        .collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(
        handle,
        "{} {} agents, {} resources ({})",
        "OK".bright_green().bold(),
        problem.agent_count(),
        problem.resource_count(),
        declared.join(", ")
    )
    .map_err(|source| CliError::Io {
        path: "stdout".to_string(),
        source,
    })?;

    Ok(ExitCode::SUCCESS)
}
