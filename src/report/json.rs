use crate::types::report::SprintReportData;

pub fn to_json(report: &SprintReportData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
