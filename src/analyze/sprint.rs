use crate::types::jira::{EstimateStatistic, IssueType, SprintReport};
use crate::types::metrics::{Meta, MetricsResult};
use serde_json::Value;

/// Reads a story point estimate, defaulting to 0 when it is absent, oddly
/// shaped or not an integer-like value. Floats are truncated toward zero and
/// clamped to the `i64` range.
pub fn estimate_points(statistic: Option<&EstimateStatistic>) -> i64 {
    match statistic.and_then(EstimateStatistic::value) {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(raw)) => raw.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

pub fn calculate_sprint_metrics(report: &SprintReport) -> MetricsResult {
    let contents = &report.contents;
    let mut metrics = MetricsResult::default();
    let points = &mut metrics.points;
    let items = &mut metrics.items;
    let keys = &mut metrics.issue_keys;

    for issue in &contents.completed_issues {
        keys.completed.push(issue.key.clone());

        if issue.type_name.is_ignored() {
            continue;
        }
        if let IssueType::Other(name) = &issue.type_name {
            tracing::debug!(
                key = %issue.key,
                issue_type = %name,
                "tallying unrecognised issue type"
            );
        }

        let original = estimate_points(issue.estimate_statistic.as_ref());
        let current = estimate_points(issue.current_estimate_statistic.as_ref());

        points.completed = points.completed.saturating_add(current);
        items.completed += 1;

        let unplanned = contents.added_during_sprint(&issue.key);
        if unplanned {
            points.unplanned_completed = points.unplanned_completed.saturating_add(current);
            items.unplanned_completed += 1;
        } else {
            keys.committed.push(issue.key.clone());
            points.committed = points.committed.saturating_add(original);
            items.committed += 1;
            points.planned_completed = points.planned_completed.saturating_add(current);
            items.planned_completed += 1;
            // Growth of a planned issue during the sprint counts as unplanned points.
            if original < current {
                points.unplanned_completed = points
                    .unplanned_completed
                    .saturating_add(current.saturating_sub(original));
            }
        }

        if issue.type_name == IssueType::Story {
            items.stories_completed += 1;
            if unplanned {
                items.unplanned_stories_completed += 1;
            }
        }
        if issue.type_name.is_feature_work() {
            points.feature_completed = points.feature_completed.saturating_add(current);
        }
        if issue.type_name.is_optimization() {
            points.optimization_completed =
                points.optimization_completed.saturating_add(current);
        }
        if issue.type_name.is_bug() {
            items.bugs_completed += 1;
            if unplanned {
                items.unplanned_bugs_completed += 1;
            }
        }
    }

    for issue in &contents.issues_not_completed_in_current_sprint {
        keys.incomplete.push(issue.key.clone());

        if issue.type_name.is_ignored() {
            continue;
        }

        let current = estimate_points(issue.current_estimate_statistic.as_ref());
        points.not_completed = points.not_completed.saturating_add(current);
        items.not_completed += 1;

        if !contents.added_during_sprint(&issue.key) {
            keys.committed.push(issue.key.clone());
            points.committed = points.committed.saturating_add(current);
            items.committed += 1;
        }
    }

    // Removed work is tallied for every type, ignored ones included.
    for issue in &contents.punted_issues {
        keys.removed.push(issue.key.clone());

        let current = estimate_points(issue.current_estimate_statistic.as_ref());
        if !contents.added_during_sprint(&issue.key) {
            keys.committed.push(issue.key.clone());
            points.committed = points.committed.saturating_add(current);
            items.committed += 1;
        }

        points.removed = points.removed.saturating_add(current);
        items.removed += 1;
    }

    metrics.meta = predictability(&metrics);
    metrics
}

fn predictability(metrics: &MetricsResult) -> Meta {
    let points = &metrics.points;
    if points.committed == 0 {
        tracing::warn!("this sprint had no commitments, predictability is 0");
        return Meta::default();
    }

    let committed = points.committed as f64;
    Meta {
        predictability: (points.completed as f64 / committed * 100.0) as i64,
        predictability_of_commitments: (points.planned_completed as f64 / committed * 100.0)
            as i64,
    }
}
