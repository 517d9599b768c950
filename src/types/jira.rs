//! Documents returned by the Jira agile and greenhopper endpoints.
//!
//! Only the fields the reports read are modelled; everything else in the
//! payloads is ignored by serde.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueType {
    Story,
    Bug,
    Design,
    Spike,
    Optimization,
    Task,
    Epic,
    Other(String),
}

impl From<String> for IssueType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Story" => IssueType::Story,
            "Bug" => IssueType::Bug,
            "Design" => IssueType::Design,
            "Spike" => IssueType::Spike,
            "Optimization" => IssueType::Optimization,
            "Task" => IssueType::Task,
            "Epic" => IssueType::Epic,
            _ => IssueType::Other(name),
        }
    }
}

impl IssueType {
    pub fn is_feature_work(&self) -> bool {
        matches!(self, IssueType::Story | IssueType::Design | IssueType::Spike)
    }

    pub fn is_optimization(&self) -> bool {
        matches!(self, IssueType::Optimization)
    }

    pub fn is_bug(&self) -> bool {
        matches!(self, IssueType::Bug)
    }

    /// Types that never contribute to completed or incomplete tallies.
    pub fn is_ignored(&self) -> bool {
        matches!(self, IssueType::Task | IssueType::Epic)
    }
}

impl<'de> Deserialize<'de> for IssueType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(IssueType::from)
    }
}

/// An estimate container kept as raw JSON. Jira instances disagree on its
/// shape, so nothing about it is validated while the report is decoded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct EstimateStatistic(Value);

impl EstimateStatistic {
    /// The `statFieldValue.value` entry, if the container has that shape.
    pub fn value(&self) -> Option<&Value> {
        self.0
            .get("statFieldValue")
            .and_then(|field| field.get("value"))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub key: String,
    pub type_name: IssueType,
    #[serde(default)]
    pub estimate_statistic: Option<EstimateStatistic>,
    #[serde(default)]
    pub current_estimate_statistic: Option<EstimateStatistic>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintReportContents {
    #[serde(default)]
    pub completed_issues: Vec<Issue>,
    #[serde(default)]
    pub issues_not_completed_in_current_sprint: Vec<Issue>,
    #[serde(default)]
    pub punted_issues: Vec<Issue>,
    #[serde(default)]
    pub issue_keys_added_during_sprint: IndexMap<String, Value>,
}

impl SprintReportContents {
    pub fn added_during_sprint(&self, key: &str) -> bool {
        self.issue_keys_added_during_sprint.contains_key(key)
    }
}

/// The sprint summary embedded in a greenhopper sprint report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSprint {
    #[serde(default)]
    pub name: String,
    pub goal: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SprintReport {
    #[serde(default)]
    pub contents: SprintReportContents,
    #[serde(default)]
    pub sprint: ReportSprint,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    pub origin_board_id: Option<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLocation {
    pub project_name: Option<String>,
    pub project_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub location: BoardLocation,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub id: String,
    #[serde(rename = "self", default)]
    pub link: String,
    pub jql: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    pub is_last: Option<bool>,
}

impl<T> Page<T> {
    /// A page without `isLast` is treated as the final one.
    pub fn is_last(&self) -> bool {
        self.is_last.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VelocityValue {
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VelocityEntry {
    #[serde(default)]
    pub completed: VelocityValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VelocitySprint {
    pub id: u64,
    pub sequence: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityReport {
    #[serde(default)]
    pub velocity_stat_entries: IndexMap<String, VelocityEntry>,
    #[serde(default)]
    pub sprints: Vec<VelocitySprint>,
}
