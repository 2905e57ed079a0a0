use serde::{Deserialize, Serialize};

use crate::{ApiClient, ApiScope};

use super::parse_reply;

/// Client for the `/config/v0.1/configs` family.
pub struct CdnConfigurations<'a> {
    client: &'a dyn ApiClient,
}

/// A full CDN configuration for one environment.
///
/// `rules` is kept as raw JSON: the rules language is versioned by the
/// remote service and the client does not interpret it.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CdnConfiguration {
    pub id: String,
    pub environment_id: String,
    pub rules: serde_json::Value,
    pub origins: Vec<Origin>,
    pub hostnames: Vec<Hostname>,
    pub experiments: Vec<String>,
    pub edge_functions_sources: std::collections::HashMap<String, String>,
    pub edge_function_init_script: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Origin {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub hosts: Vec<OriginHost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balancer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_host_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shields: Option<Shields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pci_certified_shields: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_verify: Option<TlsVerify>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<OriginRetry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct OriginHost {
    pub weight: i32,
    pub dns_max_ttl: u32,
    pub dns_preference: String,
    pub max_hard_pool: u16,
    pub dns_min_ttl: u32,
    pub location: Vec<OriginLocation>,
    pub max_pool: u16,
    pub balancer: String,
    pub scheme: String,
    pub override_host_header: String,
    pub sni_hint_and_strict_san_check: String,
    pub use_sni: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct OriginLocation {
    pub port: u16,
    pub hostname: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Shields {
    pub apac: String,
    pub emea: String,
    pub us_west: String,
    pub us_east: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct TlsVerify {
    pub use_sni: bool,
    pub sni_hint_and_strict_san_check: String,
    pub allow_self_signed_certs: bool,
    pub pinned_certs: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct OriginRetry {
    pub status_codes: Vec<u16>,
    pub ignore_retry_after_header: bool,
    pub after_seconds: u32,
    pub max_requests: u32,
    pub max_wait_seconds: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Hostname {
    pub hostname: String,
    pub default_origin_name: String,
    pub report_code: i32,
    pub tls: HostnameTls,
    pub directory: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct HostnameTls {
    pub npn: bool,
    pub alpn: bool,
    pub protocols: String,
    pub use_sigalgs: bool,
    pub sni: bool,
    pub sni_strict: bool,
    pub sni_host_match: bool,
    pub client_renegotiation: bool,
    pub options: String,
    pub cipher_list: String,
    pub named_curve: String,
    #[serde(rename = "oscp")]
    pub ocsp: bool,
    pub pem: String,
    pub ca: String,
}

impl<'a> CdnConfigurations<'a> {
    const CONFIGS_URL: &'static str = "/config/v0.1/configs";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    /// Uploads a configuration, which queues a deployment to the edge.
    pub fn upload(
        &self,
        configuration: &CdnConfiguration,
    ) -> Result<CdnConfiguration, anyhow::Error> {
        let body = serde_json::to_value(configuration)?;

        let reply = self
            .client
            .http_post(ApiScope::Config, CdnConfigurations::CONFIGS_URL, &body)?;

        parse_reply(CdnConfigurations::CONFIGS_URL, &reply)
    }

    pub fn get(&self, configuration_id: &str) -> Result<CdnConfiguration, anyhow::Error> {
        let path = format!("{}/{}", CdnConfigurations::CONFIGS_URL, configuration_id);

        let reply = self.client.http_get(ApiScope::Config, &path, &[])?;

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
        edgio.authenticate(ApiScope::Config).unwrap();
        edgio
    }

    #[test]
    fn upload_round_trips_the_configuration() {
        let server = MockServer::start();
        let edgio = authenticated_api(&server);

        let rules = json!([{"if": [{"==": [{"request": "path"}, "/"]}, {"caching": {"max_age": "1h"}}]}]);

        let mock = server.mock(|when, then| {
            when.method(POST).path("/config/v0.1/configs");
            then.status(200).json_body(json!({
                "id": "cfg-1",
                "environment_id": "env-1",
                "rules": rules,
                "origins": [{
                    "name": "web",
                    "type": "customer_origin",
                    "hosts": [{
                        "weight": 200,
                        "dns_max_ttl": 3600,
                        "dns_preference": "ipv4",
                        "max_hard_pool": 10,
                        "dns_min_ttl": 600,
                        "location": [{"port": 443, "hostname": "origin.example.com"}],
                        "max_pool": 10,
                        "balancer": "round_robin",
                        "scheme": "https",
                        "override_host_header": "",
                        "sni_hint_and_strict_san_check": "origin.example.com",
                        "use_sni": true,
                    }],
                }],
                "hostnames": [{"hostname": "example.com", "default_origin_name": "web"}],
                "experiments": [],
                "edge_functions_sources": {},
                "edge_function_init_script": "",
            }));
        });

        let configs = CdnConfigurations::new(&edgio);
        let uploaded = configs
            .upload(&CdnConfiguration {
                environment_id: "env-1".to_string(),
                rules: rules.clone(),
                ..Default::default()
            })
            .unwrap();

        mock.assert();
        assert_eq!(uploaded.id, "cfg-1");
        assert_eq!(uploaded.rules, rules);
        assert_eq!(uploaded.origins[0].hosts[0].location[0].port, 443);
        assert_eq!(uploaded.hostnames[0].default_origin_name, "web");
    }

    #[test]
    fn get_fetches_a_configuration_by_id() {
        let server = MockServer::start();
        let edgio = authenticated_api(&server);

        let mock = server.mock(|when, then| {
            when.method(GET).path("/config/v0.1/configs/cfg-1");
            then.status(200).json_body(json!({
                "id": "cfg-1",
                "environment_id": "env-1",
                "rules": [],
            }));
        });

        let configs = CdnConfigurations::new(&edgio);
        let config = configs.get("cfg-1").unwrap();

        mock.assert();
        assert_eq!(config.environment_id, "env-1");
        assert!(config.origins.is_empty());
    }
}
