use crate::jira::links::issue_link;
use crate::types::report::SprintReportData;

pub fn to_markdown(report: &SprintReportData, base_url: &str) -> String {
    let metrics = &report.issue_metrics;
    let mut output = String::new();
    output.push_str(&format!(
        "# {} ({}) Sprint {}\n\n",
        report.project_name, report.project_key, report.sprint_number
    ));
    output.push_str(&format!(
        "- start: {}\n- end: {}\n- average velocity: {}\n\n",
        report.sprint_start.as_deref().unwrap_or("n/a"),
        report.sprint_end.as_deref().unwrap_or("n/a"),
        report.average_velocity
    ));

    output.push_str("## Goals\n\n");
    for goal in report.sprint_goals.iter().filter(|goal| !goal.trim().is_empty()) {
        output.push_str(&format!("- {}\n", goal.trim()));
    }
    output.push('\n');

    let points = &metrics.points;
    output.push_str("## Points\n\n");
    output.push_str(&format!(
        "- committed: {}\n- completed: {}\n- planned completed: {}\n- unplanned completed: {}\n- feature completed: {}\n- optimization completed: {}\n- not completed: {}\n- removed: {}\n\n",
        points.committed,
        points.completed,
        points.planned_completed,
        points.unplanned_completed,
        points.feature_completed,
        points.optimization_completed,
        points.not_completed,
        points.removed
    ));

    let items = &metrics.items;
    output.push_str("## Items\n\n");
    output.push_str(&format!(
        "- committed: {}\n- completed: {}\n- planned completed: {}\n- unplanned completed: {}\n- stories completed: {} ({} unplanned)\n- bugs completed: {} ({} unplanned)\n- not completed: {}\n- removed: {}\n\n",
        items.committed,
        items.completed,
        items.planned_completed,
        items.unplanned_completed,
        items.stories_completed,
        items.unplanned_stories_completed,
        items.bugs_completed,
        items.unplanned_bugs_completed,
        items.not_completed,
        items.removed
    ));

    output.push_str("## Predictability\n\n");
    output.push_str(&format!(
        "- overall: {}%\n- of commitments: {}%\n\n",
        metrics.meta.predictability, metrics.meta.predictability_of_commitments
    ));

    output.push_str("## Issues\n\n");
    let keys = &metrics.issue_keys;
    for (label, bucket) in [
        ("committed", &keys.committed),
        ("completed", &keys.completed),
        ("incomplete", &keys.incomplete),
        ("removed", &keys.removed),
    ] {
        if bucket.is_empty() {
            output.push_str(&format!("- {label}: none\n"));
        } else {
            output.push_str(&format!(
                "- [{label}]({}): {}\n",
                issue_link(base_url, bucket),
                bucket.join(", ")
            ));
        }
    }

    output
}
