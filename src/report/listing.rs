use crate::types::jira::{Board, Filter, Sprint};
use chrono::DateTime;

/// Renders an agile API timestamp as a calendar date, passing through
/// anything that is not RFC 3339.
fn short_date(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "-".to_string(),
    }
}

pub fn sprints(sprints: &[Sprint]) -> String {
    if sprints.is_empty() {
        return "sprints: none\n".to_string();
    }
    sprints
        .iter()
        .map(|sprint| {
            format!(
                "{}\t{}\t{}\t{} .. {}\n",
                sprint.id,
                sprint.state,
                sprint.name,
                short_date(sprint.start_date.as_deref()),
                short_date(sprint.end_date.as_deref())
            )
        })
        .collect()
}

pub fn boards(boards: &[Board]) -> String {
    if boards.is_empty() {
        return "boards: none\n".to_string();
    }
    boards
        .iter()
        .map(|board| format!("{}\t{}\t{}\n", board.id, board.kind, board.name))
        .collect()
}

pub fn filters(filters: &[Filter]) -> String {
    filters
        .iter()
        .map(|filter| {
            format!(
                "Filter Link: {}\nFilter JQL: {}\n------------\n",
                filter.link,
                filter.jql.as_deref().unwrap_or_default()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sprint_dates_are_shortened() {
        let sprints_list: Vec<Sprint> = serde_json::from_value(json!([
            {
                "id": 37,
                "name": "S37",
                "state": "closed",
                "originBoardId": 5,
                "startDate": "2024-03-01T09:00:00.000+10:00",
                "endDate": "not a date"
            }
        ]))
        .unwrap();

        assert_eq!(
            sprints(&sprints_list),
            "37\tclosed\tS37\t2024-03-01 .. not a date\n"
        );
        assert_eq!(sprints(&[]), "sprints: none\n");
    }

    #[test]
    fn filters_print_link_and_jql() {
        let list: Vec<Filter> = serde_json::from_value(json!([
            { "id": "1", "name": "a", "self": "https://jira.test/rest/api/2/filter/1", "jql": "project = ABC" }
        ]))
        .unwrap();
        assert_eq!(
            filters(&list),
            "Filter Link: https://jira.test/rest/api/2/filter/1\nFilter JQL: project = ABC\n------------\n"
        );
    }
}
