use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use assignforge::{Assigner, SolverConfig, CONFIG_FILE};

use crate::error::{CliError, CliResult};
use crate::instance::{load_instance, CsvSchema, Encoding};
use crate::output::json::write_json_report;
use crate::output::text::write_text_report;
use crate::OutputFormat;

pub struct SolveArgs<'a> {
    pub instance: &'a Path,
    pub schema: CsvSchema,
    pub config: Option<&'a Path>,
    pub capacity: Option<u32>,
    pub format: OutputFormat,
    pub unit: &'a str,
    pub verbose: bool,
}

pub fn run(args: SolveArgs<'_>) -> CliResult<ExitCode> {
    if args.verbose {
        assignforge::console::init();
    }

    let problem = load_instance(args.instance, &args.schema)?;
    let mut config = load_config(args.config)?;
    if let Some(capacity) = args.capacity {
        config = config.with_uniform_capacity(capacity);
    }

    let report = Assigner::new(config).assign(&problem)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            write_text_report(&mut handle, &problem, &report, args.unit).map_err(|source| {
                CliError::Io {
                    path: "stdout".to_string(),
                    source,
                }
            })?
        }
        OutputFormat::Json => write_json_report(&mut handle, &problem, &report)?,
    }
    let _ = handle.flush();

    Ok(ExitCode::SUCCESS)
}

/// Loads `path` (TOML or YAML), or `assign.toml` from the working directory.
///
/// Defaults apply only when no `assign.toml` exists. A file that is present
/// but fails to parse or validate is an error.
pub fn load_config(path: Option<&Path>) -> CliResult<SolverConfig> {
    let Some(path) = path else {
        if !Path::new(CONFIG_FILE).exists() {
            return Ok(SolverConfig::default());
        }
        return Ok(SolverConfig::load(CONFIG_FILE)?);
    };
    let config = match Encoding::from_path(path)? {
        Encoding::Toml => SolverConfig::from_toml_file(path)?,
        Encoding::Yaml => SolverConfig::from_yaml_file(path)?,
        Encoding::Json | Encoding::Csv => {
            return Err(CliError::UnsupportedFormat(path.display().to_string()))
        }
    };
    config.validate()?;
    Ok(config)
}
