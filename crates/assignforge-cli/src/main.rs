mod commands;
mod error;
mod instance;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::solve::SolveArgs;
use crate::instance::CsvSchema;

#[derive(Parser)]
#[command(name = "assignforge")]
#[command(about = "Assign agents to capacitated resources at minimum total cost")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Solve an instance and print the optimal assignment")]
    Solve {
        #[arg(help = "Instance file (.toml, .yaml, .yml, .json or .csv)")]
        instance: PathBuf,
        #[command(flatten)]
        columns: CsvColumns,
        #[arg(long, short, value_name = "FILE", help = "Solver configuration (.toml or .yaml)")]
        config: Option<PathBuf>,
        #[arg(
            long,
            value_name = "N",
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Give every resource N slots, ignoring declared capacities"
        )]
        capacity: Option<u32>,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, default_value = "", help = "Unit label printed after costs (e.g. min)")]
        unit: String,
        #[arg(long, short, help = "Log solver progress to the console")]
        verbose: bool,
    },
    #[command(about = "Validate an instance without solving it")]
    Check {
        #[arg(help = "Instance file")]
        instance: PathBuf,
        #[command(flatten)]
        columns: CsvColumns,
    },
}

/// Column options for CSV instances.
#[derive(Args, Debug, Default)]
pub struct CsvColumns {
    #[arg(long, value_name = "HEADER", help = "CSV column holding agent names [default: first column]")]
    agent_column: Option<String>,
    #[arg(
        long,
        value_name = "HEADERS",
        value_delimiter = ',',
        help = "CSV columns read as resources [default: every other column]"
    )]
    resources: Option<Vec<String>>,
    #[arg(
        long = "resource-capacity",
        value_name = "HEADER=N",
        value_parser = parse_resource_capacity,
        help = "Declared capacity of a CSV resource column (repeatable)"
    )]
    capacities: Vec<(String, u32)>,
}

impl CsvColumns {
    fn schema(&self) -> CsvSchema {
        CsvSchema {
            agent_column: self.agent_column.clone(),
            resources: self.resources.clone(),
            capacities: self.capacities.clone(),
        }
    }
}

fn parse_resource_capacity(value: &str) -> Result<(String, u32), String> {
    let (name, capacity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected HEADER=N, got '{}'", value))?;
    let capacity = capacity
        .trim()
        .parse()
        .map_err(|_| format!("invalid capacity '{}'", capacity))?;
    Ok((name.trim().to_string(), capacity))
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Solve {
            instance,
            columns,
            config,
            capacity,
            format,
            unit,
            verbose,
        } => commands::solve::run(SolveArgs {
            instance,
            schema: columns.schema(),
            config: config.as_deref(),
            capacity: *capacity,
            format: *format,
            unit,
            verbose: *verbose,
        }),
        Commands::Check { instance, columns } => {
            commands::check::run(instance, &columns.schema())
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
