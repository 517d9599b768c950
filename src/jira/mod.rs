pub mod links;

use crate::error::{AgileOpsError, Result};
use crate::gateway::Gateway;
use crate::types::jira::{Board, Filter, Page, Sprint, SprintReport, VelocityReport};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api: String,
    pub agile: String,
    pub greenhopper: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api: format!("{base}/rest/api/latest/"),
            agile: format!("{base}/rest/agile/latest/"),
            greenhopper: format!("{base}/rest/greenhopper/latest/"),
        }
    }
}

pub struct JiraClient<G: Gateway> {
    gateway: G,
    endpoints: Endpoints,
}

impl<G: Gateway> JiraClient<G> {
    pub fn new(gateway: G, base_url: &str) -> Self {
        Self {
            gateway,
            endpoints: Endpoints::new(base_url),
        }
    }

    /// Fetches the authenticated user as a connectivity check.
    pub fn test_connection(&self) -> Result<Value> {
        self.gateway.get(&format!("{}myself", self.endpoints.api))
    }

    pub fn get_sprint(&self, sprint_id: &str) -> Result<Sprint> {
        let url = format!("{}sprint/{sprint_id}", self.endpoints.agile);
        self.lookup(&url, &[], || format!("sprint with id {sprint_id}"))
    }

    pub fn get_board(&self, board_id: u64) -> Result<Board> {
        let url = format!("{}board/{board_id}", self.endpoints.agile);
        self.lookup(&url, &[], || format!("board with id {board_id}"))
    }

    pub fn get_sprint_report(&self, sprint_id: &str, board_id: u64) -> Result<SprintReport> {
        let url = format!("{}rapid/charts/sprintreport", self.endpoints.greenhopper);
        let params = [
            ("rapidViewId", board_id.to_string()),
            ("sprintId", sprint_id.to_string()),
        ];
        self.lookup(&url, &params, || {
            format!("a report for sprint {sprint_id} on board {board_id}")
        })
    }

    pub fn get_velocity_report(&self, board_id: u64) -> Result<VelocityReport> {
        let url = format!("{}rapid/charts/velocity", self.endpoints.greenhopper);
        let params = [("rapidViewId", board_id.to_string())];
        self.lookup(&url, &params, || {
            format!("the velocity report for board {board_id}")
        })
    }

    pub fn get_boards_in_project(&self, project_key: &str) -> Result<Vec<Board>> {
        let url = format!("{}board", self.endpoints.agile);
        let params = [("projectKeyOrId", project_key.to_uppercase())];
        let page: Page<Board> = self.lookup(&url, &params, || {
            format!("boards for project {}", project_key.to_uppercase())
        })?;
        Ok(page.values)
    }

    /// All sprints of a board, newest first.
    pub fn get_sprints_in_board(&self, board_id: u64) -> Vec<Sprint> {
        let url = format!("{}board/{board_id}/sprint", self.endpoints.agile);
        let mut sprints = self.paginate::<Sprint>(&url, &[]);
        sprints.reverse();
        tracing::debug!(board_id, count = sprints.len(), "fetched sprints");
        sprints
    }

    pub fn get_filters_with_jql(&self) -> Vec<Filter> {
        let url = format!("{}filter/search", self.endpoints.api);
        self.paginate::<Filter>(&url, &[("expand", "jql".to_string())])
    }

    /// Filters whose JQL matches `pattern` as a regular expression.
    pub fn search_filters_for_jql(&self, pattern: &str) -> Result<Vec<Filter>> {
        let regex = Regex::new(pattern)
            .map_err(|e| AgileOpsError::Parse(format!("invalid jql pattern '{pattern}': {e}")))?;

        let matches = self
            .get_filters_with_jql()
            .into_iter()
            .filter(|filter| match &filter.jql {
                Some(jql) => regex.is_match(jql),
                None => {
                    tracing::error!(filter = %filter.id, "filter does not have jql");
                    false
                }
            })
            .collect();
        Ok(matches)
    }

    fn lookup<T, F>(&self, url: &str, params: &[(&str, String)], what: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> String,
    {
        let value = match self.gateway.request(reqwest::Method::GET, url, params) {
            Ok(value) if !is_absent(&value) => value,
            Ok(_) => return Err(AgileOpsError::not_found(what())),
            Err(err) => {
                tracing::debug!(url, error = %err, "lookup failed");
                return Err(AgileOpsError::not_found(what()));
            }
        };
        serde_json::from_value(value)
            .map_err(|e| AgileOpsError::Data(format!("unexpected response for {}: {e}", what())))
    }

    /// Follows `startAt` pagination until the last page or the first failed
    /// page; whatever was fetched before a failure is kept.
    fn paginate<T: DeserializeOwned>(&self, url: &str, params: &[(&str, String)]) -> Vec<T> {
        let mut values = Vec::new();
        let mut start_at = 0usize;
        loop {
            let mut page_params = params.to_vec();
            if start_at > 0 {
                page_params.push(("startAt", start_at.to_string()));
            }

            let page = self
                .gateway
                .request(reqwest::Method::GET, url, &page_params)
                .and_then(|value| {
                    serde_json::from_value::<Page<T>>(value).map_err(AgileOpsError::from)
                });
            let page = match page {
                Ok(page) => page,
                Err(err) => {
                    tracing::warn!(url, start_at, error = %err, "stopping pagination");
                    break;
                }
            };

            let last = page.is_last();
            let fetched = page.values.len();
            values.extend(page.values);
            start_at += fetched;
            if last || fetched == 0 {
                break;
            }
        }
        values
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
