use thiserror::Error;

const HINT: &str = "Please check your arguments again. Are you using the right command for your jira instance?";

#[derive(Error, Debug)]
pub enum AgileOpsError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Data(String),

    #[error("unable to generate form URL: {0}")]
    FormGeneration(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("jira api error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgileOpsError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        AgileOpsError::NotFound(format!("I could not find {what}. {HINT}"))
    }
}

pub type Result<T> = std::result::Result<T, AgileOpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_is_actionable() {
        let err = AgileOpsError::not_found("sprint with id 42");
        let message = err.to_string();
        assert!(message.starts_with("I could not find sprint with id 42."));
        assert!(message.contains("right command for your jira instance"));
    }
}
