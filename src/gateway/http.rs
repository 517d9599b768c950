use crate::error::{AgileOpsError, Result};
use crate::gateway::Gateway;
use crate::types::config::Connection;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    user: String,
    token: String,
}

impl HttpGateway {
    pub fn new(connection: &Connection) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(connection.timeout_secs))
            .user_agent(concat!("agileops/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            user: connection.user.clone(),
            token: connection.token.clone(),
        })
    }
}

impl Gateway for HttpGateway {
    fn request(&self, verb: Method, url: &str, params: &[(&str, String)]) -> Result<Value> {
        tracing::debug!(%verb, url, "jira request");
        let response = self
            .client
            .request(verb, url)
            .header(ACCEPT, "application/json")
            .basic_auth(&self.user, Some(&self.token))
            .query(params)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), %body, "jira request failed");
            return Err(AgileOpsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    fn gateway() -> HttpGateway {
        HttpGateway::new(&Connection {
            host: "unused".to_string(),
            user: "bot@example.com".to_string(),
            token: "secret".to_string(),
            scheme: "http".to_string(),
            timeout_secs: 5,
        })
        .expect("gateway should build")
    }

    #[test]
    fn request_sends_basic_auth_and_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/agile/latest/board")
                .query_param("projectKeyOrId", "ABC")
                .header("accept", "application/json")
                .header_exists("authorization");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "values": [] }));
        });

        let value = gateway()
            .request(
                Method::GET,
                &server.url("/rest/agile/latest/board"),
                &[("projectKeyOrId", "ABC".to_string())],
            )
            .expect("request should succeed");
        assert_eq!(value, json!({ "values": [] }));
        mock.assert();
    }

    #[test]
    fn non_success_status_is_a_failure() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/rest/agile/latest/sprint/1");
            then.status(404).body("sprint does not exist");
        });

        let err = gateway()
            .get(&server.url("/rest/agile/latest/sprint/1"))
            .expect_err("404 should fail");
        assert!(matches!(err, AgileOpsError::Api { status: 404, .. }));
        assert!(err.to_string().contains("sprint does not exist"));
        mock.assert();
    }

    #[test]
    fn empty_body_is_null_not_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/empty");
            then.status(204);
        });

        let value = gateway()
            .get(&server.url("/empty"))
            .expect("empty body should be accepted");
        assert_eq!(value, Value::Null);
    }
}
