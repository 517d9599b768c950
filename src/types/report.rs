use crate::types::metrics::MetricsResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintReportData {
    pub sprint_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_end: Option<String>,
    pub sprint_goals: Vec<String>,
    pub issue_metrics: MetricsResult,
    pub project_name: String,
    pub project_key: String,
    pub average_velocity: i64,
}

impl SprintReportData {
    /// A sprint with nothing committed cannot say anything about predictability.
    pub fn has_commitment(&self) -> bool {
        self.issue_metrics.points.committed != 0
    }
}

/// Reply shape expected by the chat integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: String,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
