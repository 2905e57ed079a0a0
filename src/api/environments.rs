use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiClient, ApiScope};

use super::{parse_reply, CollectionLinks, Page};

/// Client for the `/accounts/v0.1/environments` family.
pub struct Environments<'a> {
    client: &'a dyn ApiClient,
}

/// A deployment environment of a property.
#[derive(Deserialize, Debug)]
pub struct Environment {
    #[serde(rename = "@type", default)]
    pub ty: String,
    #[serde(rename = "@id", default)]
    pub id_link: String,
    pub id: String,
    pub property_id: String,
    #[serde(default)]
    pub legacy_account_number: String,
    pub name: String,
    pub can_members_deploy: bool,
    #[serde(default)]
    pub only_maintainers_can_deploy: bool,
    pub http_request_logging: bool,
    #[serde(default)]
    pub default_domain_name: String,
    #[serde(default)]
    pub pci_compliance: bool,
    #[serde(default)]
    pub dns_domain_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
pub struct EnvironmentsResponse {
    #[serde(rename = "@type", default)]
    pub ty: String,
    #[serde(rename = "@id", default)]
    pub id_link: String,
    #[serde(rename = "@links", default)]
    pub links: CollectionLinks,
    pub total_items: u32,
    pub items: Vec<Environment>,
}

/// Fields accepted when creating an environment.
#[derive(Debug, Clone)]
pub struct NewEnvironment {
    pub property_id: String,
    pub name: String,
    pub can_members_deploy: bool,
    pub only_maintainers_can_deploy: bool,
    pub http_request_logging: bool,
}

/// Fields accepted when updating an environment.
#[derive(Debug, Clone)]
pub struct EnvironmentUpdate {
    pub name: String,
    pub can_members_deploy: bool,
    pub http_request_logging: bool,
    pub preserve_cache: bool,
}

impl<'a> Environments<'a> {
    const ENVIRONMENTS_URL: &'static str = "/accounts/v0.1/environments";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    /// Lists one page of the environments belonging to a property.
    pub fn list(
        &self,
        page: &Page,
        property_id: &str,
    ) -> Result<EnvironmentsResponse, anyhow::Error> {
        let mut qs = page.to_query_string();
        qs.push(("property_id".to_string(), property_id.to_string()));

        let reply =
            self.client
                .http_get(ApiScope::Accounts, Environments::ENVIRONMENTS_URL, &qs)?;

        parse_reply(Environments::ENVIRONMENTS_URL, &reply)
    }

    pub fn get(&self, environment_id: &str) -> Result<Environment, anyhow::Error> {
        let path = format!("{}/{}", Environments::ENVIRONMENTS_URL, environment_id);

        let reply = self.client.http_get(ApiScope::Accounts, &path, &[])?;

        parse_reply(&path, &reply)
    }

    pub fn create(&self, environment: &NewEnvironment) -> Result<Environment, anyhow::Error> {
        let body = json!({
            "property_id": environment.property_id,
            "name": environment.name,
            "can_members_deploy": environment.can_members_deploy,
            "only_maintainers_can_deploy": environment.only_maintainers_can_deploy,
            "http_request_logging": environment.http_request_logging,
        });

        let reply = self.client.http_post(
            ApiScope::Accounts,
            Environments::ENVIRONMENTS_URL,
            &body,
        )?;

        parse_reply(Environments::ENVIRONMENTS_URL, &reply)
    }

    pub fn update(
        &self,
        environment_id: &str,
        update: &EnvironmentUpdate,
    ) -> Result<Environment, anyhow::Error> {
        let path = format!("{}/{}", Environments::ENVIRONMENTS_URL, environment_id);
        let body = json!({
            "name": update.name,
            "can_members_deploy": update.can_members_deploy,
            "http_request_logging": update.http_request_logging,
            "preserve_cache": update.preserve_cache,
        });

        let reply = self.client.http_patch(ApiScope::Accounts, &path, &body)?;

        parse_reply(&path, &reply)
    }

    pub fn delete(&self, environment_id: &str) -> Result<(), anyhow::Error> {
        let path = format!("{}/{}", Environments::ENVIRONMENTS_URL, environment_id);

        self.client.http_delete(ApiScope::Accounts, &path)?;

        Ok(())
    }
}
