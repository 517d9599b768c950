use crate::analyze::calculate_sprint_metrics;
use crate::error::{AgileOpsError, Result};
use crate::gateway::Gateway;
use crate::jira::JiraClient;
use crate::types::report::ChatMessage;
use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::sync::OnceLock;

pub const NO_SPRINT_NUMBER_REPLY: &str = "Sorry, I don't see a valid sprint number there";

fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"sprint metrics ([0-9]+)").expect("command pattern is valid")
    })
}

/// Extracts the sprint id digits from a `sprint metrics <id>` chat command.
/// The digits are passed on as-is, so an id Jira does not know becomes a
/// not-found reply rather than a parse failure.
pub fn parse_chat_command(message: &str) -> Option<&str> {
    command_pattern()
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Answers a chat command with the metrics of the requested sprint.
pub fn sprint_metrics_command<G: Gateway>(
    client: &JiraClient<G>,
    message: &str,
) -> Result<ChatMessage> {
    let Some(sprint_id) = parse_chat_command(message) else {
        tracing::error!(message, "did not find a sprint number");
        return Ok(ChatMessage::new(NO_SPRINT_NUMBER_REPLY));
    };

    let sprint = client.get_sprint(sprint_id)?;
    let board_id = sprint.origin_board_id.ok_or_else(|| {
        AgileOpsError::Data(format!(
            "sprint {sprint_id} does not reference the board it belongs to"
        ))
    })?;
    let report = client.get_sprint_report(sprint_id, board_id)?;
    let metrics = calculate_sprint_metrics(&report);

    let text = to_sorted_pretty_json(&metrics)?;
    Ok(ChatMessage::new(format!("```{text}```")))
}

/// Pretty JSON with keys sorted at every level and four-space indentation.
pub fn to_sorted_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let value = sort_keys(serde_json::to_value(value)?);
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| AgileOpsError::Data(e.to_string()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect::<Map<_, _>>(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
