//! Instance files.
//!
//! An instance lists resources explicitly and gives every agent one cost per
//! resource, keyed by resource name:
//!
//! ```toml
//! [[resources]]
//! name = "North"
//! capacity = 2
//!
//! [[resources]]
//! name = "South"
//!
//! [[agents]]
//! name = "Ann"
//! costs = { North = 10.0, South = 30.0 }
//!
//! [[agents]]
//! name = "Bob"
//! costs = { North = 20.0 }
//! forbidden = ["South"]
//! ```
//!
//! Pairs listed under `forbidden` may not be assigned. A resource with no
//! cost and no `forbidden` entry is an error.
//!
//! CSV instances are a table with one row per agent:
//!
//! ```text
//! Employee Name,BranchA,BranchB
//! Ann,10,30
//! Bob,20,inf
//! ```
//!
//! The agent column defaults to the first column and every other header is
//! a resource. [`CsvSchema`] narrows both to named headers, so tables with
//! extra columns (addresses, ids) load too. `inf` marks a forbidden pair and
//! a blank cell is a missing cost.

use std::collections::BTreeMap;
use std::path::Path;

use assignforge::{Agent, AssignmentProblem, CostMatrix, Resource, FORBIDDEN};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InstanceDocument {
    pub resources: Vec<ResourceEntry>,
    pub agents: Vec<AgentEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AgentEntry {
    pub name: String,
    #[serde(default)]
    pub costs: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden: Vec<String>,
}

/// Column selection for CSV instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvSchema {
    /// Header of the agent-name column. The first column when unset.
    pub agent_column: Option<String>,
    /// Headers read as resources, in order. Every other column when unset.
    pub resources: Option<Vec<String>>,
    /// Declared capacities by resource header.
    pub capacities: Vec<(String, u32)>,
}

impl CsvSchema {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Supported file encodings, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Toml,
    Yaml,
    Json,
    Csv,
}

impl Encoding {
    pub fn from_path(path: &Path) -> CliResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Encoding::Toml),
            Some("yaml") | Some("yml") => Ok(Encoding::Yaml),
            Some("json") => Ok(Encoding::Json),
            Some("csv") => Ok(Encoding::Csv),
            _ => Err(CliError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl InstanceDocument {
    pub fn parse(contents: &str, encoding: Encoding) -> CliResult<Self> {
        Ok(match encoding {
            Encoding::Toml => toml::from_str(contents)?,
            Encoding::Yaml => serde_yaml::from_str(contents)?,
            Encoding::Json => serde_json::from_str(contents)?,
            Encoding::Csv => Self::parse_csv(contents, &CsvSchema::default())?,
        })
    }

    /// Reads a CSV table into a document.
    ///
    /// Cells are kept as costs keyed by header, so missing, negative and
    /// NaN costs are rejected by [`InstanceDocument::into_problem`] exactly
    /// as for the other encodings.
    pub fn parse_csv(contents: &str, schema: &CsvSchema) -> CliResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(contents.as_bytes());
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(CliError::Instance("CSV instance has no header row".to_string()));
        }

        let agent_column = match &schema.agent_column {
            Some(name) => column_index(&headers, name)?,
            None => 0,
        };
        let resource_columns: Vec<(usize, String)> = match &schema.resources {
            Some(names) => names
                .iter()
                .map(|name| Ok((column_index(&headers, name)?, name.clone())))
                .collect::<CliResult<_>>()?,
            None => headers
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != agent_column)
                .map(|(i, h)| (i, h.to_string()))
                .collect(),
        };

        let mut agents = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let name = record.get(agent_column).unwrap_or_default();
            if name.is_empty() {
                return Err(CliError::Instance(format!(
                    "data row {} has no agent name",
                    line + 1
                )));
            }

            let mut costs = BTreeMap::new();
            for (column, resource) in &resource_columns {
                let cell = record.get(*column).unwrap_or_default();
                if cell.is_empty() {
                    continue;
                }
                let cost: f64 = cell.parse().map_err(|_| {
                    CliError::Instance(format!(
                        "agent '{}' has non-numeric cost '{}' for resource '{}'",
                        name, cell, resource
                    ))
                })?;
                costs.insert(resource.clone(), cost);
            }
            agents.push(AgentEntry {
                name: name.to_string(),
                costs,
                forbidden: Vec::new(),
            });
        }

        let mut resources: Vec<ResourceEntry> = resource_columns
            .into_iter()
            .map(|(_, name)| ResourceEntry {
                name,
                capacity: None,
            })
            .collect();
        for (name, capacity) in &schema.capacities {
            let entry = resources
                .iter_mut()
                .find(|r| &r.name == name)
                .ok_or_else(|| {
                    CliError::Instance(format!("capacity given for unknown resource '{}'", name))
                })?;
            entry.capacity = Some(*capacity);
        }

        Ok(Self { resources, agents })
    }

    /// Reads `path`, choosing the encoding by extension. `schema` applies
    /// to CSV files only.
    pub fn read(path: &Path, schema: &CsvSchema) -> CliResult<Self> {
        let encoding = Encoding::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match encoding {
            Encoding::Csv => Self::parse_csv(&contents, schema),
            _ if !schema.is_default() => Err(CliError::Instance(
                "column options only apply to .csv instances".to_string(),
            )),
            _ => Self::parse(&contents, encoding),
        }
    }

    /// Builds the validated problem.
    ///
    /// Rejects duplicate names, costs for unknown resources, missing costs
    /// and negative or NaN costs.
    pub fn into_problem(self) -> CliResult<AssignmentProblem> {
        let mut index = BTreeMap::new();
        for (j, resource) in self.resources.iter().enumerate() {
            if index.insert(resource.name.as_str(), j).is_some() {
                return Err(CliError::Instance(format!(
                    "duplicate resource '{}'",
                    resource.name
                )));
            }
        }

        let cols = self.resources.len();
        let mut data = Vec::with_capacity(self.agents.len() * cols);
        let mut seen_agents = BTreeMap::new();
        for agent in &self.agents {
            if seen_agents.insert(agent.name.as_str(), ()).is_some() {
                return Err(CliError::Instance(format!("duplicate agent '{}'", agent.name)));
            }
            data.extend(agent_row(agent, &index, &self.resources)?);
        }

        let costs = CostMatrix::new(self.agents.len(), cols, data)?;
        let agents = self.agents.into_iter().map(|a| Agent::new(a.name)).collect();
        let resources = self
            .resources
            .into_iter()
            .map(|r| Resource {
                name: r.name,
                capacity: r.capacity,
            })
            .collect();
        Ok(AssignmentProblem::new(agents, resources, costs)?)
    }
}

fn agent_row(
    agent: &AgentEntry,
    index: &BTreeMap<&str, usize>,
    resources: &[ResourceEntry],
) -> CliResult<Vec<f64>> {
    let mut row: Vec<Option<f64>> = vec![None; resources.len()];

    for (name, &cost) in &agent.costs {
        let j = *index.get(name.as_str()).ok_or_else(|| {
            CliError::Instance(format!("agent '{}' has a cost for unknown resource '{}'", agent.name, name))
        })?;
        if cost.is_nan() || cost < 0.0 {
            return Err(CliError::Instance(format!(
                "agent '{}' has invalid cost {} for resource '{}'",
                agent.name, cost, name
            )));
        }
        row[j] = Some(cost);
    }
    for name in &agent.forbidden {
        let j = *index.get(name.as_str()).ok_or_else(|| {
            CliError::Instance(format!("agent '{}' forbids unknown resource '{}'", agent.name, name))
        })?;
        row[j] = Some(FORBIDDEN);
    }

    row.into_iter()
        .zip(resources)
        .map(|(cost, resource)| {
            cost.ok_or_else(|| {
                CliError::Instance(format!(
                    "agent '{}' has no cost for resource '{}'",
                    agent.name, resource.name
                ))
            })
        })
        .collect()
}

fn column_index(headers: &csv::StringRecord, name: &str) -> CliResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| CliError::Instance(format!("CSV instance has no column '{}'", name)))
}

/// Reads and validates an instance file.
pub fn load_instance(path: &Path, schema: &CsvSchema) -> CliResult<AssignmentProblem> {
    InstanceDocument::read(path, schema)?.into_problem()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assignforge::{is_forbidden, AssignError};

    const BRANCHES: &str = r#"
        [[resources]]
        name = "North"
        capacity = 2

        [[resources]]
        name = "South"

        [[agents]]
        name = "Ann"
        costs = { North = 10.0, South = 30.0 }

        [[agents]]
        name = "Bob"
        costs = { North = 20.0 }
        forbidden = ["South"]
    "#;

    #[test]
    fn test_parse_toml() {
        let problem = InstanceDocument::parse(BRANCHES, Encoding::Toml)
            .unwrap()
            .into_problem()
            .unwrap();
        assert_eq!(problem.agent_count(), 2);
        assert_eq!(problem.resolved_capacities(1), vec![2, 1]);
        assert_eq!(problem.costs().get(0, 1), 30.0);
        assert!(is_forbidden(problem.costs().get(1, 1)));
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = "resources:\n  - name: A\nagents:\n  - name: x\n    costs: { A: 3.5 }\n";
        let from_yaml = InstanceDocument::parse(yaml, Encoding::Yaml).unwrap();
        let json = r#"{"resources":[{"name":"A"}],"agents":[{"name":"x","costs":{"A":3.5}}]}"#;
        let from_json = InstanceDocument::parse(json, Encoding::Json).unwrap();
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn test_missing_cost() {
        let doc = InstanceDocument::parse(
            r#"
            resources = [{ name = "A" }, { name = "B" }]
            agents = [{ name = "x", costs = { A = 1.0 } }]
            "#,
            Encoding::Toml,
        )
        .unwrap();
        let err = doc.into_problem().unwrap_err();
        assert!(err.to_string().contains("no cost for resource 'B'"));
    }

    #[test]
    fn test_unknown_resource() {
        let doc = InstanceDocument::parse(
            r#"
            resources = [{ name = "A" }]
            agents = [{ name = "x", costs = { A = 1.0, Z = 2.0 } }]
            "#,
            Encoding::Toml,
        )
        .unwrap();
        assert!(matches!(doc.into_problem(), Err(CliError::Instance(_))));
    }

    #[test]
    fn test_negative_cost() {
        let doc = InstanceDocument::parse(
            r#"
            resources = [{ name = "A" }]
            agents = [{ name = "x", costs = { A = -1.0 } }]
            "#,
            Encoding::Toml,
        )
        .unwrap();
        assert!(doc
            .into_problem()
            .unwrap_err()
            .to_string()
            .contains("invalid cost -1"));
    }

    #[test]
    fn test_duplicate_names() {
        let doc = InstanceDocument::parse(
            r#"
            resources = [{ name = "A" }, { name = "A" }]
            agents = []
            "#,
            Encoding::Toml,
        )
        .unwrap();
        assert!(doc.into_problem().unwrap_err().to_string().contains("duplicate resource"));
    }

    #[test]
    fn test_empty_agents() {
        let doc = InstanceDocument::parse(
            r#"
            resources = [{ name = "A" }]
            agents = []
            "#,
            Encoding::Toml,
        )
        .unwrap();
        assert!(matches!(
            doc.into_problem(),
            Err(CliError::Assign(AssignError::EmptyInput { agents: 0, .. }))
        ));
    }

    #[test]
    fn test_zero_capacity() {
        let doc = InstanceDocument::parse(
            r#"
            resources = [{ name = "A", capacity = 0 }]
            agents = [{ name = "x", costs = { A = 1.0 } }]
            "#,
            Encoding::Toml,
        )
        .unwrap();
        assert!(matches!(
            doc.into_problem(),
            Err(CliError::Assign(AssignError::InvalidCapacity { .. }))
        ));
    }

    #[test]
    fn test_encoding_from_path() {
        assert_eq!(Encoding::from_path(Path::new("a.yml")).unwrap(), Encoding::Yaml);
        assert_eq!(Encoding::from_path(Path::new("a.csv")).unwrap(), Encoding::Csv);
        assert!(Encoding::from_path(Path::new("a.xlsx")).is_err());
    }

    const COMMUTE_CSV: &str = "\
Employee Name,Address,BranchA,BranchB
Ann,1 Elm St,10,30
Bob,2 Oak Ave,20,inf
";

    #[test]
    fn test_parse_csv_with_schema() {
        let schema = CsvSchema {
            agent_column: Some("Employee Name".to_string()),
            resources: Some(vec!["BranchA".to_string(), "BranchB".to_string()]),
            capacities: vec![("BranchA".to_string(), 2)],
        };
        let problem = InstanceDocument::parse_csv(COMMUTE_CSV, &schema)
            .unwrap()
            .into_problem()
            .unwrap();
        assert_eq!(problem.agent_count(), 2);
        assert_eq!(problem.resources()[0].name, "BranchA");
        assert_eq!(problem.resolved_capacities(1), vec![2, 1]);
        assert_eq!(problem.costs().get(0, 1), 30.0);
        assert!(is_forbidden(problem.costs().get(1, 1)));
    }

    #[test]
    fn test_parse_csv_default_columns() {
        let csv = "name,North,South\nAnn, 10 ,30\nBob,20,15\n";
        let problem = InstanceDocument::parse(csv, Encoding::Csv)
            .unwrap()
            .into_problem()
            .unwrap();
        assert_eq!(problem.agents()[1].name, "Bob");
        assert_eq!(problem.resource_index("South"), Some(1));
        assert_eq!(problem.costs().get(0, 0), 10.0);
    }

    #[test]
    fn test_csv_every_other_column_is_a_resource() {
        // Without a schema the address column is read as costs.
        let err = InstanceDocument::parse(COMMUTE_CSV, Encoding::Csv).unwrap_err();
        assert!(err.to_string().contains("non-numeric cost '1 Elm St'"));
    }

    #[test]
    fn test_csv_blank_and_negative_cells() {
        let blank = InstanceDocument::parse("name,A,B\nx,1,\n", Encoding::Csv).unwrap();
        assert!(blank
            .into_problem()
            .unwrap_err()
            .to_string()
            .contains("no cost for resource 'B'"));

        let negative = InstanceDocument::parse("name,A\nx,-4\n", Encoding::Csv).unwrap();
        assert!(negative
            .into_problem()
            .unwrap_err()
            .to_string()
            .contains("invalid cost -4"));
    }

    #[test]
    fn test_csv_unknown_columns() {
        let schema = CsvSchema {
            resources: Some(vec!["BranchZ".to_string()]),
            ..CsvSchema::default()
        };
        let err = InstanceDocument::parse_csv(COMMUTE_CSV, &schema).unwrap_err();
        assert!(err.to_string().contains("no column 'BranchZ'"));

        let schema = CsvSchema {
            capacities: vec![("Nowhere".to_string(), 2)],
            ..CsvSchema::default()
        };
        let err = InstanceDocument::parse_csv("name,A\nx,1\n", &schema).unwrap_err();
        assert!(err.to_string().contains("unknown resource 'Nowhere'"));
    }

    #[test]
    fn test_csv_ragged_row() {
        let result = InstanceDocument::parse("name,A,B\nx,1\n", Encoding::Csv);
        assert!(matches!(result, Err(CliError::Csv(_))));
    }
}
