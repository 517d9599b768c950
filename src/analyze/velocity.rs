use crate::types::jira::VelocityReport;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Number of trailing sprints that make up the rolling average.
pub const VELOCITY_WINDOW: usize = 3;

/// Position of a sprint on the board timeline. Every entry of a report is
/// keyed the same way, so only keys of one variant are ever compared.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum ChronologyKey {
    Label(String),
    Id(u64),
    Sequence(u64),
}

/// Sprint identifiers of the report, most recent first.
///
/// Jira hands back `velocityStatEntries` as an unordered map. The `sprints`
/// array carries a `sequence` for each sprint which follows board order even
/// for renumbered or imported sprints. It is used only when every entry has
/// one; otherwise the numeric sprint id orders all entries, and when some id
/// is not numeric the raw labels do.
pub fn chronological_sprint_ids(report: &VelocityReport) -> Vec<&str> {
    let sequences = report
        .sprints
        .iter()
        .filter_map(|sprint| sprint.sequence.map(|sequence| (sprint.id, sequence)))
        .collect::<HashMap<_, _>>();

    let ids = report
        .velocity_stat_entries
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>();
    let numeric = ids
        .iter()
        .map(|id| id.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>();
    let sequenced = numeric.as_ref().and_then(|numeric| {
        numeric
            .iter()
            .map(|id| sequences.get(id).copied())
            .collect::<Option<Vec<_>>>()
    });

    let keys: Vec<ChronologyKey> = match (sequenced, numeric) {
        (Some(sequenced), _) => sequenced.into_iter().map(ChronologyKey::Sequence).collect(),
        (None, Some(numeric)) => numeric.into_iter().map(ChronologyKey::Id).collect(),
        (None, None) => ids
            .iter()
            .map(|id| ChronologyKey::Label(id.to_string()))
            .collect(),
    };

    let mut keyed = keys.into_iter().zip(ids).collect::<Vec<_>>();
    keyed.sort_by(|(left, left_id), (right, right_id)| match right.cmp(left) {
        Ordering::Equal => right_id.cmp(left_id),
        other => other,
    });
    keyed.into_iter().map(|(_, id)| id).collect()
}

/// Rolling average of completed points over the last three sprints, as of
/// `sprint_id` when given. Returns 0 when no sprint contributed.
pub fn average_velocity(report: &VelocityReport, sprint_id: Option<&str>) -> i64 {
    let mut total = 0.0;
    let mut sprints = 0usize;
    let mut found = sprint_id.is_none();

    for id in chronological_sprint_ids(report) {
        if sprints >= VELOCITY_WINDOW {
            break;
        }
        if !found && Some(id) == sprint_id {
            found = true;
        }
        if found {
            if let Some(entry) = report.velocity_stat_entries.get(id) {
                total += entry.completed.value;
                sprints += 1;
            }
        }
    }

    if sprints == 0 {
        tracing::debug!(?sprint_id, "no sprints contributed to velocity");
        return 0;
    }
    (total / sprints as f64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn velocity(entries: &[(&str, f64)], sprints: Value) -> VelocityReport {
        let entries = entries
            .iter()
            .map(|(id, completed)| {
                (
                    id.to_string(),
                    json!({ "estimated": { "value": 0 }, "completed": { "value": completed } }),
                )
            })
            .collect::<serde_json::Map<_, _>>();
        serde_json::from_value(json!({
            "velocityStatEntries": entries,
            "sprints": sprints,
        }))
        .expect("velocity report should deserialize")
    }

    #[test]
    fn averages_three_most_recent_sprints() {
        let report = velocity(
            &[("1", 10.0), ("2", 20.0), ("3", 30.0), ("4", 40.0), ("5", 50.0)],
            json!([]),
        );
        assert_eq!(average_velocity(&report, None), 40);
    }

    #[test]
    fn starts_window_at_requested_sprint() {
        let report = velocity(
            &[("1", 10.0), ("2", 20.0), ("3", 30.0), ("4", 40.0), ("5", 50.0)],
            json!([]),
        );
        assert_eq!(average_velocity(&report, Some("4")), 30);
        // Only two sprints remain from sprint 2 backwards.
        assert_eq!(average_velocity(&report, Some("2")), 15);
    }

    #[test]
    fn unknown_sprint_or_empty_report_yields_zero() {
        let report = velocity(&[("1", 10.0)], json!([]));
        assert_eq!(average_velocity(&report, Some("99")), 0);
        assert_eq!(average_velocity(&VelocityReport::default(), None), 0);
    }

    #[test]
    fn ids_are_compared_numerically() {
        let report = velocity(&[("9", 9.0), ("10", 10.0), ("11", 11.0), ("8", 8.0)], json!([]));
        assert_eq!(chronological_sprint_ids(&report), vec!["11", "10", "9", "8"]);
        assert_eq!(average_velocity(&report, None), 10);
    }

    #[test]
    fn sequence_overrides_id_order() {
        // Sprint 900 was imported late but sits first on the board timeline.
        let report = velocity(
            &[("900", 3.0), ("101", 10.0), ("102", 20.0), ("103", 30.0)],
            json!([
                { "id": 103, "name": "S4", "state": "CLOSED", "sequence": 4 },
                { "id": 102, "name": "S3", "state": "CLOSED", "sequence": 3 },
                { "id": 101, "name": "S2", "state": "CLOSED", "sequence": 2 },
                { "id": 900, "name": "S1", "state": "CLOSED", "sequence": 1 }
            ]),
        );
        assert_eq!(
            chronological_sprint_ids(&report),
            vec!["103", "102", "101", "900"]
        );
        assert_eq!(average_velocity(&report, None), 20);
        assert_eq!(average_velocity(&report, Some("102")), 11);
    }

    #[test]
    fn partial_sequences_fall_back_to_id_order() {
        // The active sprint 103 has no sequence yet and must still rank first.
        let report = velocity(
            &[("100", 1.0), ("101", 2.0), ("102", 3.0), ("103", 100.0)],
            json!([
                { "id": 100, "sequence": 1 },
                { "id": 101, "sequence": 2 },
                { "id": 102, "sequence": 3 }
            ]),
        );
        assert_eq!(
            chronological_sprint_ids(&report),
            vec!["103", "102", "101", "100"]
        );
        assert_eq!(average_velocity(&report, None), 35);
    }

    #[test]
    fn non_numeric_id_orders_every_entry_by_label() {
        let report = velocity(
            &[("b", 20.0), ("a", 10.0), ("10", 30.0)],
            json!([{ "id": 10, "sequence": 99 }]),
        );
        assert_eq!(chronological_sprint_ids(&report), vec!["b", "a", "10"]);
    }

    #[test]
    fn truncates_fractional_average() {
        let report = velocity(&[("1", 10.0), ("2", 10.0), ("3", 11.0)], json!([]));
        assert_eq!(average_velocity(&report, None), 10);
    }
}
