use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use oauth2::{AccessToken, ClientId, ClientSecret};
use serde::Deserialize;

pub mod api;

const TOKEN_URL: &str = "https://id.edgio.app/connect/token";
const API_BASE_URL: &str = "https://edgioapis.com";

/// OAuth2 scopes recognized by the Edgio identity service.
///
/// Each API family requires its own scope, so tokens are fetched and
/// cached per scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiScope {
    /// Properties and environments (`/accounts/v0.1`)
    Accounts,
    /// Cache purge requests (`/cache/v0.1`)
    CachePurge,
    /// TLS certificates and CDN configurations (`/config/v0.1`)
    Config,
}

impl fmt::Display for ApiScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = match self {
            ApiScope::Accounts => "app.accounts",
            ApiScope::CachePurge => "app.cache.purge",
            ApiScope::Config => "app.config",
        };
        write!(f, "{}", scope)
    }
}

#[derive(Debug)]
enum ApiException {
    /// Invalid or expired bearer token
    InvalidToken,
    /// The credentials are not entitled to this API family
    NotEntitled,
    /// No such resource
    NotFound,
    /// Too many requests
    TooManyRequests,
    UnknownError,
}

pub trait ApiClient {
    fn http_get(
        &self,
        scope: ApiScope,
        path: &str,
        query_string: &[(String, String)],
    ) -> Result<String, anyhow::Error>;

    fn http_post(
        &self,
        scope: ApiScope,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String, anyhow::Error>;

    fn http_patch(
        &self,
        scope: ApiScope,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String, anyhow::Error>;

    fn http_delete(&self, scope: ApiScope, path: &str) -> Result<String, anyhow::Error>;
}

/// Token endpoint reply. Only `access_token` is guaranteed by the
/// identity service; `expires_in` drives cache expiry when present.
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<u64>,
}

#[derive(Debug)]
struct CachedToken {
    token: AccessToken,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }
}

#[derive(Debug)]
pub struct EdgioApi {
    client_id: ClientId,
    client_secret: ClientSecret,
    token_url: String,
    api_url: String,

    tokens: HashMap<ApiScope, CachedToken>,
}

impl EdgioApi {
    pub fn new(client_id: String, client_secret: String) -> Self {
        EdgioApi {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            token_url: TOKEN_URL.to_string(),
            api_url: API_BASE_URL.to_string(),
            tokens: HashMap::new(),
        }
    }

    pub fn from_env_values() -> Self {
        let client_id = std::env::var("EDGIO_CLIENT_ID").expect("EDGIO_CLIENT_ID must be set");
        let client_secret =
            std::env::var("EDGIO_CLIENT_SECRET").expect("EDGIO_CLIENT_SECRET must be set");

        EdgioApi::new(client_id, client_secret)
    }

    pub fn with_token_url(mut self, token_url: String) -> Self {
        self.token_url = token_url;
        self
    }

    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }

    /// Exchanges the client credentials for a bearer token covering `scope`.
    ///
    /// A cached unexpired token for the same scope is reused without a
    /// network round trip.
    pub fn authenticate(&mut self, scope: ApiScope) -> anyhow::Result<()> {
        if let Some(cached) = self.tokens.get(&scope) {
            if !cached.is_expired() {
                return Ok(());
            }
        }

        let params = [
            ("client_id", self.client_id.to_string()),
            ("client_secret", self.client_secret.secret().to_string()),
            ("grant_type", "client_credentials".to_string()),
            ("scope", scope.to_string()),
        ];

        let http_client = reqwest::blocking::Client::new();
        let response = http_client.post(&self.token_url).form(&params).send()?;

        let status_code = response.status();
        let body = response.text()?;
        if !status_code.is_success() {
            eprintln!(
                "Error HTTP {} fetching token for scope {}: {}",
                status_code.as_str(),
                scope,
                body
            );
            return Err(anyhow::Error::msg(format!(
                "Token request failed with status {}",
                status_code
            )));
        }

        let token_response: TokenResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("Error: parsing token reply '{:?}': {:?}", body, e);
                return Err(anyhow::Error::msg("Failed to parse token response"));
            }
        };

        let expires_at = token_response
            .expires_in
            .map(|secs| Instant::now() + Duration::from_secs(secs));

        self.tokens.insert(
            scope,
            CachedToken {
                token: AccessToken::new(token_response.access_token),
                expires_at,
            },
        );

        Ok(())
    }

    /// Returns the cached bearer token for `scope`.
    pub fn get_token(&self, scope: ApiScope) -> anyhow::Result<&String> {
        match self.tokens.get(&scope) {
            Some(cached) if !cached.is_expired() => Ok(cached.token.secret()),
            Some(_) => Err(anyhow::Error::msg(format!(
                "Token for scope {} has expired, authenticate again",
                scope
            ))),
            None => Err(anyhow::Error::msg(format!(
                "Not authenticated for scope {}, call authenticate first",
                scope
            ))),
        }
    }

    fn success_body(response: reqwest::blocking::Response) -> Result<String, anyhow::Error> {
        let status_code = response.status();

        let body = response.text()?;
        if !status_code.is_success() {
            let status = match status_code.as_u16() {
                401 => ApiException::InvalidToken,
                403 => ApiException::NotEntitled,
                404 => ApiException::NotFound,
                429 => ApiException::TooManyRequests,
                _ => ApiException::UnknownError,
            };
            eprintln!(
                "Error HTTP {} ({:?}): {}",
                status_code.as_str(),
                status,
                body
            );
            return Err(anyhow::Error::msg(format!(
                "Request failed with status {}",
                status_code
            )));
        }

        Ok(body)
    }
}

impl ApiClient for EdgioApi {
    fn http_get(
        &self,
        scope: ApiScope,
        path: &str,
        query_string: &[(String, String)],
    ) -> Result<String, anyhow::Error> {
        let url = format!("{}{}", self.api_url, path);
        let token = self.get_token(scope)?;

        let http_client = reqwest::blocking::Client::new();

        let response = http_client
            .get(&url)
            .query(query_string)
            .bearer_auth(token)
            .send()?;

        EdgioApi::success_body(response)
    }

    fn http_post(
        &self,
        scope: ApiScope,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String, anyhow::Error> {
        let url = format!("{}{}", self.api_url, path);
        let token = self.get_token(scope)?;

        let http_client = reqwest::blocking::Client::new();

        let response = http_client
            .post(&url)
            .json(body)
            .bearer_auth(token)
            .send()?;

        EdgioApi::success_body(response)
    }

    fn http_patch(
        &self,
        scope: ApiScope,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String, anyhow::Error> {
        let url = format!("{}{}", self.api_url, path);
        let token = self.get_token(scope)?;

        let http_client = reqwest::blocking::Client::new();

        let response = http_client
            .patch(&url)
            .json(body)
            .bearer_auth(token)
            .send()?;

        EdgioApi::success_body(response)
    }

    fn http_delete(&self, scope: ApiScope, path: &str) -> Result<String, anyhow::Error> {
        let url = format!("{}{}", self.api_url, path);
        let token = self.get_token(scope)?;

        let http_client = reqwest::blocking::Client::new();

        let response = http_client.delete(&url).bearer_auth(token).send()?;

        EdgioApi::success_body(response)
    }
}
