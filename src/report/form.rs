use crate::error::{AgileOpsError, Result};
use crate::types::report::SprintReportData;
use serde_json::Value;

const HEADER_ENTRIES: [(&str, &str); 2] = [
    // Assumes the project name is the team name.
    ("project_key", "entry.1082637073"),
    ("sprint_number", "entry.1975251686"),
];

const POINTS_ENTRIES: [(&str, &str); 8] = [
    ("committed", "entry.1427603868"),
    ("completed", "entry.1486076673"),
    ("feature_completed", "entry.254612996"),
    ("not_completed", "entry.611444996"),
    ("optimization_completed", "entry.2092919144"),
    ("planned_completed", "entry.493624591"),
    ("removed", "entry.976792423"),
    ("unplanned_completed", "entry.1333444050"),
];

const ITEMS_ENTRIES: [(&str, &str); 10] = [
    ("bugs_completed", "entry.448087930"),
    ("committed", "entry.2095001800"),
    ("completed", "entry.1399119358"),
    ("not_completed", "entry.128659456"),
    ("planned_completed", "entry.954885633"),
    ("removed", "entry.1137054034"),
    ("stories_completed", "entry.1980453543"),
    ("unplanned_bugs_completed", "entry.1252702382"),
    ("unplanned_completed", "entry.485777497"),
    ("unplanned_stories_completed", "entry.370334542"),
];

/// Metric groups of `issue_metrics` that are not submitted through the form.
const SKIPPED_GROUPS: [&str; 2] = ["meta", "issue_keys"];

fn entry_for(group: &str, metric: &str) -> Option<&'static str> {
    let table: &[(&str, &str)] = match group {
        "points" => &POINTS_ENTRIES,
        "items" => &ITEMS_ENTRIES,
        _ => return None,
    };
    table
        .iter()
        .find(|(name, _)| *name == metric)
        .map(|(_, entry)| *entry)
}

/// Builds a pre-filled submission URL for the sprint metrics form.
///
/// Values are appended in the order the report serializes them and are not
/// escaped.
pub fn to_form_url(report: &SprintReportData, form_url: &str) -> Result<String> {
    to_form_url_from_value(&serde_json::to_value(report)?, form_url)
}

pub fn to_form_url_from_value(report: &Value, form_url: &str) -> Result<String> {
    let mut url = form_url.to_string();

    for (field, entry) in HEADER_ENTRIES {
        let value = report
            .get(field)
            .ok_or_else(|| missing(format!("report has no '{field}'")))?;
        url.push_str(&format!("{entry}={}&", plain(value)));
    }

    let metrics = report
        .get("issue_metrics")
        .and_then(Value::as_object)
        .ok_or_else(|| missing("report has no 'issue_metrics'".to_string()))?;
    for (group, values) in metrics {
        if SKIPPED_GROUPS.contains(&group.as_str()) {
            continue;
        }
        let values = values
            .as_object()
            .ok_or_else(|| missing(format!("'{group}' is not a metric group")))?;
        for (metric, value) in values {
            let entry = entry_for(group, metric)
                .ok_or_else(|| missing(format!("no form entry for {group}.{metric}")))?;
            url.push_str(&format!("{entry}={}&", plain(value)));
        }
    }

    url.push_str("submit=Submit");
    Ok(url)
}

fn missing(detail: String) -> AgileOpsError {
    tracing::error!(%detail, "unable to generate form URL, expected keys missing");
    AgileOpsError::FormGeneration(detail)
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
