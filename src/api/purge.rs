use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ApiClient, ApiScope};

use super::parse_reply;

/// Client for the `/cache/v0.1/purge-requests` family.
///
/// Purges run asynchronously: [`Purge::submit`] returns a request id that
/// can be polled with [`Purge::status`] until the status is terminal.
pub struct Purge<'a> {
    client: &'a dyn ApiClient,
}

/// What to evict from the edge caches of one environment.
#[derive(Serialize, Debug, Clone)]
pub struct PurgeRequest {
    pub environment_id: String,
    /// `all_entries`, `path` or `surrogate_key`
    pub purge_type: String,
    pub values: Vec<String>,
    pub hostname: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct PurgeResponse {
    pub id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// Absent while the purge is still in progress.
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress_percentage: f32,
}

impl<'a> Purge<'a> {
    const PURGE_URL: &'static str = "/cache/v0.1/purge-requests";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    pub fn submit(&self, request: &PurgeRequest) -> Result<PurgeResponse, anyhow::Error> {
        let body = serde_json::to_value(request)?;

        let reply = self
            .client
            .http_post(ApiScope::CachePurge, Purge::PURGE_URL, &body)?;

        parse_reply(Purge::PURGE_URL, &reply)
    }

    pub fn status(&self, request_id: &str) -> Result<PurgeResponse, anyhow::Error> {
        let path = format!("{}/{}", Purge::PURGE_URL, request_id);

        let reply = self.client.http_get(ApiScope::CachePurge, &path, &[])?;

        parse_reply(&path, &reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EdgioApi;
    use httpmock::prelude::*;
    use serde_json::json;

    fn authenticated_api(server: &MockServer) -> EdgioApi {
        server.mock(|when, then| {
            when.method(POST).path("/connect/token");
            then.status(200)
                .json_body(json!({"access_token": "T", "expires_in": 300}));
        });

        let mut edgio = EdgioApi::new("id".to_string(), "secret".to_string())
            .with_token_url(format!("{}/connect/token", server.base_url()))
            .with_api_url(server.base_url());
        edgio.authenticate(ApiScope::CachePurge).unwrap();
        edgio
    }

    #[test]
    fn submit_posts_the_purge_request() {
        let server = MockServer::start();
        let edgio = authenticated_api(&server);

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/cache/v0.1/purge-requests")
                .header("authorization", "Bearer T")
                .json_body(json!({
                    "environment_id": "env-1",
                    "purge_type": "path",
                    "values": ["/index.html", "/assets/*"],
                    "hostname": null,
                }));
            then.status(201).json_body(json!({
                "id": "purge-1",
                "status": "in_progress",
                "created_at": "2024-04-01T00:00:00Z",
                "completed_at": null,
                "progress_percentage": 0.0,
            }));
        });

        let purge = Purge::new(&edgio);
        let response = purge
            .submit(&PurgeRequest {
                environment_id: "env-1".to_string(),
                purge_type: "path".to_string(),
                values: vec!["/index.html".to_string(), "/assets/*".to_string()],
                hostname: None,
            })
            .unwrap();

        mock.assert();
        assert_eq!(response.id, "purge-1");
        assert_eq!(response.status, "in_progress");
        assert!(response.completed_at.is_none());
    }

    #[test]
    fn status_polls_the_request_id() {
        let server = MockServer::start();
        let edgio = authenticated_api(&server);

        let mock = server.mock(|when, then| {
            when.method(GET).path("/cache/v0.1/purge-requests/purge-1");
            then.status(200).json_body(json!({
                "id": "purge-1",
                "status": "completed",
                "created_at": "2024-04-01T00:00:00Z",
                "completed_at": "2024-04-01T00:01:30Z",
                "progress_percentage": 100.0,
            }));
        });

        let purge = Purge::new(&edgio);
        let response = purge.status("purge-1").unwrap();

        mock.assert();
        assert_eq!(response.status, "completed");
        assert!(response.completed_at.is_some());
        assert_eq!(response.progress_percentage, 100.0);
    }
}
