use std::io::{self, Write};

use assignforge::{AssignmentProblem, AssignmentReport};
use owo_colors::OwoColorize;

/// Writes one line per agent, then totals and the per-resource grouping.
pub fn write_text_report<W: Write>(
    w: &mut W,
    problem: &AssignmentProblem,
    report: &AssignmentReport,
    unit: &str,
) -> io::Result<()> {
    let agents = problem.agents();
    let resources = problem.resources();
    let name_width = agents.iter().map(|a| a.name.len()).max().unwrap_or(0);

    for a in report.result.assignments() {
        writeln!(
            w,
            "{:<width$}  {}  {}  {}",
            agents[a.agent].name,
            "->".bright_blue(),
            resources[a.resource].name.bright_cyan(),
            with_unit(a.cost, unit).yellow(),
            width = name_width,
        )?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "{} {}",
        "Total:".bold(),
        with_unit(report.total_cost(), unit).bright_green().bold()
    )?;
    writeln!(
        w,
        "{} {}",
        "Mean: ".bold(),
        with_unit(round2(report.mean_cost()), unit).green()
    )?;

    writeln!(w)?;
    let resource_width = resources.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for group in report.result.by_resource() {
        let load = format!("{}/{}", group.agents.len(), group.capacity);
        let names: Vec<&str> = group
            .agents
            .iter()
            .map(|&i| agents[i].name.as_str())
            .collect();
        writeln!(
            w,
            "{:<width$}  {:>7}  {}",
            resources[group.resource].name.bright_cyan(),
            if group.agents.is_empty() {
                load.bright_black().to_string()
            } else {
                load.white().to_string()
            },
            names.join(", "),
            width = resource_width,
        )?;
    }

    Ok(())
}

fn with_unit(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", value, unit)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
