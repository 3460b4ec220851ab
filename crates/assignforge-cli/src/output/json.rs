use std::io::Write;

use assignforge::{AssignmentProblem, AssignmentReport, SlotLayoutKind};
use serde::Serialize;

use crate::error::CliResult;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub assignments: Vec<JsonAssignment<'a>>,
    pub total_cost: f64,
    pub mean_cost: f64,
    pub resources: Vec<JsonResource<'a>>,
    pub layout: SlotLayoutKind,
    pub slot_count: usize,
    pub augmentations: u64,
    pub duration_us: u64,
}

#[derive(Debug, Serialize)]
pub struct JsonAssignment<'a> {
    pub agent: &'a str,
    pub resource: &'a str,
    pub cost: f64,
}

#[derive(Debug, Serialize)]
pub struct JsonResource<'a> {
    pub name: &'a str,
    pub capacity: u32,
    pub agents: Vec<&'a str>,
}

impl<'a> JsonReport<'a> {
    pub fn new(problem: &'a AssignmentProblem, report: &AssignmentReport) -> Self {
        let agents = problem.agents();
        let resources = problem.resources();
        Self {
            assignments: report
                .result
                .assignments()
                .iter()
                .map(|a| JsonAssignment {
                    agent: &agents[a.agent].name,
                    resource: &resources[a.resource].name,
                    cost: a.cost,
                })
                .collect(),
            total_cost: report.total_cost(),
            mean_cost: report.mean_cost(),
            resources: report
                .result
                .by_resource()
                .into_iter()
                .map(|g| JsonResource {
                    name: &resources[g.resource].name,
                    capacity: g.capacity,
                    agents: g.agents.iter().map(|&i| agents[i].name.as_str()).collect(),
                })
                .collect(),
            layout: report.layout,
            slot_count: report.slot_count,
            augmentations: report.statistics.augmentations,
            duration_us: report.statistics.duration.as_micros() as u64,
        }
    }
}

pub fn write_json_report<W: Write>(
    w: &mut W,
    problem: &AssignmentProblem,
    report: &AssignmentReport,
) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *w, &JsonReport::new(problem, report))?;
    writeln!(w).map_err(serde_json::Error::io)?;
    Ok(())
}
