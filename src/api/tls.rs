use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{ApiClient, ApiScope};

use super::{parse_reply, Page};

/// Client for the `/config/v0.1/tls-certs` family.
pub struct TlsCerts<'a> {
    client: &'a dyn ApiClient,
}

#[derive(Deserialize, Debug)]
pub struct TlsCert {
    pub id: String,
    pub environment_id: String,
    #[serde(default)]
    pub primary_cert: String,
    #[serde(default)]
    pub intermediate_cert: String,
    #[serde(default)]
    pub expiration: String,
    pub status: String,
    /// True for certificates issued by Edgio rather than uploaded.
    #[serde(default)]
    pub generated: bool,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub common_name: String,
    #[serde(default)]
    pub alternative_names: Vec<String>,
    #[serde(default)]
    pub activation_error: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Deserialize, Debug)]
pub struct TlsCertsResponse {
    #[serde(default)]
    pub environment_id: String,
    pub total_items: u32,
    pub items: Vec<TlsCert>,
}

#[derive(Serialize, Debug, Clone)]
pub struct UploadTlsCertRequest {
    pub environment_id: String,
    pub primary_cert: String,
    pub intermediate_cert: String,
    pub private_key: String,
}

impl<'a> TlsCerts<'a> {
    const TLS_CERTS_URL: &'static str = "/config/v0.1/tls-certs";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    pub fn get(&self, tls_cert_id: &str) -> Result<TlsCert, anyhow::Error> {
        let path = format!("{}/{}", TlsCerts::TLS_CERTS_URL, tls_cert_id);

        let reply = self.client.http_get(ApiScope::Config, &path, &[])?;

        parse_reply(&path, &reply)
    }

    /// Lists one page of the certificates attached to an environment.
    pub fn list(
        &self,
        page: &Page,
        environment_id: &str,
    ) -> Result<TlsCertsResponse, anyhow::Error> {
        let mut qs = page.to_query_string();
        qs.push(("environment_id".to_string(), environment_id.to_string()));

        let reply = self
            .client
            .http_get(ApiScope::Config, TlsCerts::TLS_CERTS_URL, &qs)?;

        parse_reply(TlsCerts::TLS_CERTS_URL, &reply)
    }

    pub fn upload(&self, request: &UploadTlsCertRequest) -> Result<TlsCert, anyhow::Error> {
        let body = serde_json::to_value(request)?;

        let reply = self
            .client
            .http_post(ApiScope::Config, TlsCerts::TLS_CERTS_URL, &body)?;

        parse_reply(TlsCerts::TLS_CERTS_URL, &reply)
    }

    /// Asks Edgio to issue a certificate for the environment's domains.
    pub fn generate(&self, environment_id: &str) -> Result<TlsCert, anyhow::Error> {
        let path = format!("{}/generate", TlsCerts::TLS_CERTS_URL);
        let body = json!({ "environment_id": environment_id });

        let reply = self.client.http_post(ApiScope::Config, &path, &body)?;

        parse_reply(&path, &reply)
    }
}
