pub mod sprint;
pub mod velocity;

use crate::error::{AgileOpsError, Result};
use crate::gateway::Gateway;
use crate::jira::JiraClient;
use crate::types::jira::ReportSprint;
use crate::types::report::SprintReportData;
use regex::Regex;
use std::sync::OnceLock;

pub use sprint::calculate_sprint_metrics;
pub use velocity::average_velocity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintInfo {
    pub sprint_number: String,
    pub sprint_start: Option<String>,
    pub sprint_end: Option<String>,
    pub sprint_goals: Vec<String>,
}

fn sprint_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(S|Sprint )(?P<number>\d+)").expect("sprint number pattern is valid")
    })
}

pub fn parse_sprint_info(sprint: &ReportSprint) -> Result<SprintInfo> {
    let sprint_number = sprint_number_pattern()
        .captures(&sprint.name)
        .and_then(|captures| captures.name("number"))
        .map(|number| number.as_str().to_string())
        .ok_or_else(|| {
            AgileOpsError::Parse(format!(
                "I couldn't find or parse a sprint number in '{}'. Please make sure that you name sprints to include `S#` or `Sprint #`, where `#` is the number of the sprint",
                sprint.name
            ))
        })?;

    if sprint.start_date.is_none() || sprint.end_date.is_none() {
        tracing::warn!(sprint = %sprint.name, "sprint does not have start and/or end dates");
    }

    let sprint_goals = match &sprint.goal {
        Some(goal) => goal.split('\n').map(str::to_string).collect(),
        None => {
            tracing::error!(sprint = %sprint.name, "unable to find sprint goal");
            return Err(AgileOpsError::Data(format!(
                "I couldn't find a sprint goal for '{}'. Every sprint is expected to declare one; please add a goal in Jira and try again",
                sprint.name
            )));
        }
    };

    Ok(SprintInfo {
        sprint_number,
        sprint_start: sprint.start_date.clone(),
        sprint_end: sprint.end_date.clone(),
        sprint_goals,
    })
}

/// Collects sprint, board and velocity data into a single sprint report.
pub fn generate_sprint_report<G: Gateway>(
    client: &JiraClient<G>,
    sprint_id: &str,
) -> Result<SprintReportData> {
    let sprint = client.get_sprint(sprint_id)?;
    let board_id = sprint.origin_board_id.ok_or_else(|| {
        AgileOpsError::Data(format!(
            "sprint {sprint_id} does not reference the board it belongs to"
        ))
    })?;
    tracing::info!(sprint_id, board_id, "generating sprint report");

    let sprint_report = client.get_sprint_report(sprint_id, board_id)?;
    let info = parse_sprint_info(&sprint_report.sprint)?;
    let issue_metrics = calculate_sprint_metrics(&sprint_report);

    let board = client.get_board(board_id)?;
    let missing_location =
        || AgileOpsError::Data(format!("board {board_id} is not attached to a project"));
    let project_name = board
        .location
        .project_name
        .clone()
        .ok_or_else(missing_location)?;
    let project_key = board
        .location
        .project_key
        .clone()
        .ok_or_else(missing_location)?;

    let velocity_report = client.get_velocity_report(board_id)?;
    let average_velocity = average_velocity(&velocity_report, Some(sprint_id));

    Ok(SprintReportData {
        sprint_number: info.sprint_number,
        sprint_start: info.sprint_start,
        sprint_end: info.sprint_end,
        sprint_goals: info.sprint_goals,
        issue_metrics,
        project_name,
        project_key,
        average_velocity,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::jira::tests::{static_client, StaticGateway};
    use serde_json::{json, Value};

    fn report_sprint(name: &str, goal: Option<&str>) -> ReportSprint {
        ReportSprint {
            name: name.to_string(),
            goal: goal.map(str::to_string),
            start_date: Some("01/Mar/24 9:00 AM".to_string()),
            end_date: None,
        }
    }

    pub(crate) fn sprint_fixtures() -> StaticGateway {
        StaticGateway::default()
            .with(
                "agile/latest/sprint/302",
                json!({ "id": 302, "name": "Platform Sprint 14", "state": "closed", "originBoardId": 12 }),
            )
            .with(
                "greenhopper/latest/rapid/charts/sprintreport?rapidViewId=12&sprintId=302",
                json!({
                    "contents": {
                        "completedIssues": [
                            issue("PLAT-1", "Story", 3, 5),
                            issue("PLAT-2", "Bug", 0, 2)
                        ],
                        "issuesNotCompletedInCurrentSprint": [issue("PLAT-3", "Story", 5, 5)],
                        "puntedIssues": [issue("PLAT-4", "Task", 8, 8)],
                        "issueKeysAddedDuringSprint": { "PLAT-2": true }
                    },
                    "sprint": {
                        "name": "Platform Sprint 14",
                        "goal": "Ship billing\nRetire legacy queue",
                        "startDate": "01/Mar/24 9:00 AM",
                        "endDate": "14/Mar/24 5:00 PM"
                    }
                }),
            )
            .with(
                "agile/latest/board/12",
                json!({
                    "id": 12,
                    "name": "PLAT board",
                    "type": "scrum",
                    "location": { "projectName": "Platform", "projectKey": "PLAT" }
                }),
            )
            .with(
                "greenhopper/latest/rapid/charts/velocity?rapidViewId=12",
                json!({
                    "velocityStatEntries": {
                        "300": { "completed": { "value": 12 } },
                        "301": { "completed": { "value": 18 } },
                        "302": { "completed": { "value": 7 } },
                        "303": { "completed": { "value": 40 } }
                    }
                }),
            )
    }

    fn issue(key: &str, type_name: &str, original: i64, current: i64) -> Value {
        json!({
            "key": key,
            "typeName": type_name,
            "estimateStatistic": { "statFieldValue": { "value": original } },
            "currentEstimateStatistic": { "statFieldValue": { "value": current } }
        })
    }

    #[test]
    fn sprint_number_accepts_both_naming_styles() {
        let info = parse_sprint_info(&report_sprint("Team S12", Some("goal"))).unwrap();
        assert_eq!(info.sprint_number, "12");
        let info = parse_sprint_info(&report_sprint("sprint 7 - cleanup", Some("goal"))).unwrap();
        assert_eq!(info.sprint_number, "7");
    }

    #[test]
    fn unnumbered_sprint_is_a_parse_error() {
        let err = parse_sprint_info(&report_sprint("Backlog grooming", Some("goal")))
            .expect_err("name has no number");
        assert!(matches!(err, AgileOpsError::Parse(_)));
        assert!(err.to_string().contains("`S#` or `Sprint #`"));
    }

    #[test]
    fn missing_goal_is_a_data_error_but_missing_dates_are_not() {
        let err = parse_sprint_info(&report_sprint("S3", None)).expect_err("goal required");
        assert!(matches!(err, AgileOpsError::Data(_)));

        let info = parse_sprint_info(&report_sprint("S3", Some("one\ntwo"))).unwrap();
        assert_eq!(info.sprint_goals, vec!["one", "two"]);
        assert_eq!(info.sprint_end, None);
    }

    #[test]
    fn generate_sprint_report_assembles_all_sources() {
        let client = static_client(sprint_fixtures());
        let report = generate_sprint_report(&client, "302").expect("report should build");

        assert_eq!(report.sprint_number, "14");
        assert_eq!(report.sprint_goals, vec!["Ship billing", "Retire legacy queue"]);
        assert_eq!(report.project_name, "Platform");
        assert_eq!(report.project_key, "PLAT");
        // 302, 301, 300 => (7 + 18 + 12) / 3
        assert_eq!(report.average_velocity, 12);

        let metrics = &report.issue_metrics;
        assert_eq!(metrics.points.committed, 3 + 5 + 8);
        assert_eq!(metrics.points.completed, 7);
        assert_eq!(metrics.points.removed, 8);
        assert_eq!(metrics.meta.predictability, 43);
        assert_eq!(metrics.meta.predictability_of_commitments, 31);
    }

    #[test]
    fn generate_sprint_report_surfaces_missing_sprint() {
        let client = static_client(StaticGateway::default());
        let err = generate_sprint_report(&client, "999").expect_err("sprint is unknown");
        assert!(matches!(err, AgileOpsError::NotFound(_)));
    }
}
