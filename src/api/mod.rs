use serde::Deserialize;

pub mod config;
pub mod environments;
pub mod properties;
pub mod purge;
pub mod tls;

/// One page of a paginated collection request.
#[derive(Debug, Clone)]
pub struct Page {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            page: 1,
            page_size: 10,
        }
    }
}

impl Page {
    fn to_query_string(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ]
    }
}

/// The `@links` envelope carried by paginated collection responses.
#[derive(Deserialize, Debug, Default)]
pub struct CollectionLinks {
    #[serde(default)]
    pub first: CollectionLink,
    #[serde(default)]
    pub next: CollectionLink,
    #[serde(default)]
    pub previous: CollectionLink,
    #[serde(default)]
    pub last: CollectionLink,
}

#[derive(Deserialize, Debug, Default)]
pub struct CollectionLink {
    pub href: Option<String>,
}

fn parse_reply<T: serde::de::DeserializeOwned>(path: &str, reply: &str) -> Result<T, anyhow::Error> {
    match serde_json::from_str(reply) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            eprintln!("Error: parsing reply of {} => '{:?}': {:?}", path, reply, e);
            Err(anyhow::Error::msg("Failed to parse response"))
        }
    }
}
