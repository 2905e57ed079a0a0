use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiClient, ApiScope};

use super::{parse_reply, CollectionLinks, Page};

/// Client for the `/accounts/v0.1/properties` family.
pub struct Properties<'a> {
    client: &'a dyn ApiClient,
}

/// A single property (a site served through Edgio).
#[derive(Deserialize, Debug)]
pub struct Property {
    #[serde(rename = "@type", default)]
    pub ty: String,
    #[serde(rename = "@id", default)]
    pub id_link: String,
    pub id: String,
    pub organization_id: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
pub struct PropertiesResponse {
    #[serde(rename = "@type", default)]
    pub ty: String,
    #[serde(rename = "@id", default)]
    pub id_link: String,
    #[serde(rename = "@links", default)]
    pub links: CollectionLinks,
    pub total_items: u32,
    pub items: Vec<Property>,
}

impl<'a> Properties<'a> {
    const PROPERTIES_URL: &'static str = "/accounts/v0.1/properties";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    /// Lists one page of the properties belonging to an organization.
    pub fn list(
        &self,
        page: &Page,
        organization_id: &str,
    ) -> Result<PropertiesResponse, anyhow::Error> {
        let mut qs = page.to_query_string();
        qs.push((
            "organization_id".to_string(),
            organization_id.to_string(),
        ));

        let reply = self
            .client
            .http_get(ApiScope::Accounts, Properties::PROPERTIES_URL, &qs)?;

        parse_reply(Properties::PROPERTIES_URL, &reply)
    }

    pub fn get(&self, property_id: &str) -> Result<Property, anyhow::Error> {
        let path = format!("{}/{}", Properties::PROPERTIES_URL, property_id);

        let reply = self.client.http_get(ApiScope::Accounts, &path, &[])?;

        parse_reply(&path, &reply)
    }

    pub fn create(
        &self,
        organization_id: &str,
        slug: &str,
    ) -> Result<Property, anyhow::Error> {
        let body = json!({
            "organization_id": organization_id,
            "slug": slug,
        });

        let reply =
            self.client
                .http_post(ApiScope::Accounts, Properties::PROPERTIES_URL, &body)?;

        parse_reply(Properties::PROPERTIES_URL, &reply)
    }

    /// Renames a property. `slug` is the only mutable field.
    pub fn update(&self, property_id: &str, slug: &str) -> Result<Property, anyhow::Error> {
        let path = format!("{}/{}", Properties::PROPERTIES_URL, property_id);
        let body = json!({ "slug": slug });

        let reply = self.client.http_patch(ApiScope::Accounts, &path, &body)?;

        parse_reply(&path, &reply)
    }

    pub fn delete(&self, property_id: &str) -> Result<(), anyhow::Error> {
        let path = format!("{}/{}", Properties::PROPERTIES_URL, property_id);

        self.client.http_delete(ApiScope::Accounts, &path)?;

        Ok(())
    }
}
