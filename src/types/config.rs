use crate::error::AgileOpsError;
use serde::Deserialize;

pub const DEFAULT_FORM_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSdF__V1ZMfl6H5q3xIQhSkeZMeCNkOHUdTBFdYA1HBavH31hA/formResponse?";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgileOpsConfig {
    #[serde(default)]
    pub jira: JiraConfig,
    pub http: Option<HttpConfig>,
    pub form: Option<FormConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraConfig {
    pub host: Option<String>,
    pub user: Option<String>,
    pub token: Option<String>,
    pub scheme: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    pub url: Option<String>,
}

/// Connection settings resolved from an [`AgileOpsConfig`] once every
/// required field is known to be present.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub host: String,
    pub user: String,
    pub token: String,
    pub scheme: String,
    pub timeout_secs: u64,
}

impl Connection {
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host.trim_end_matches('/'))
    }
}

impl AgileOpsConfig {
    pub fn default_timeout_secs() -> u64 {
        30
    }

    pub fn form_url(&self) -> &str {
        self.form
            .as_ref()
            .and_then(|form| form.url.as_deref())
            .unwrap_or(DEFAULT_FORM_URL)
    }

    fn host(&self) -> Result<&str, AgileOpsError> {
        required(&self.jira.host, "jira.host", "JIRA_HOST")
    }

    fn scheme(&self) -> Result<&str, AgileOpsError> {
        let scheme = self.jira.scheme.as_deref().unwrap_or("https");
        if !matches!(scheme, "http" | "https") {
            return Err(AgileOpsError::Config(format!(
                "unsupported jira.scheme: {scheme}"
            )));
        }
        Ok(scheme)
    }

    /// Base URL of the Jira site; needs only the host, not credentials.
    pub fn base_url(&self) -> Result<String, AgileOpsError> {
        Ok(format!(
            "{}://{}",
            self.scheme()?,
            self.host()?.trim_end_matches('/')
        ))
    }

    pub fn connection(&self) -> Result<Connection, AgileOpsError> {
        let host = self.host()?;
        let user = required(&self.jira.user, "jira.user", "JIRA_USER")?;
        let token = required(&self.jira.token, "jira.token", "JIRA_TOKEN")?;
        let scheme = self.scheme()?;
        let timeout_secs = self
            .http
            .as_ref()
            .and_then(|http| http.timeout_secs)
            .unwrap_or_else(Self::default_timeout_secs);
        if timeout_secs == 0 {
            return Err(AgileOpsError::Config(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(Connection {
            host: host.to_string(),
            user: user.to_string(),
            token: token.to_string(),
            scheme: scheme.to_string(),
            timeout_secs,
        })
    }
}

fn required<'a>(
    value: &'a Option<String>,
    key: &str,
    env: &str,
) -> Result<&'a str, AgileOpsError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AgileOpsError::Config(format!(
            "missing {key} (set it in the config file or via {env})"
        ))),
    }
}
