//! HTTP-backed implementation of the object-model store contract.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::Config;
use crate::schema::{BehaviorDefinition, ObjectDefinition, SectionDefinition};

use super::constants::{self, headers, kinds};
use super::filter::Filter;
use super::store::ObjectStore;

/// Object-model store client with connection pooling.
///
/// One request per store operation: no retries, no backoff. A failed round
/// trip or a non-success status surfaces as an error carrying the response
/// body, and the caller decides what the failure aborts.
pub struct StoreClient {
    http: reqwest::Client,
    config: Config,
}

impl StoreClient {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .user_agent("provision-cli/0.1")
            .build()
            .expect("Failed to build HTTP client");

        Self { http, config }
    }

    /// Create a client with a custom HTTP client configuration.
    pub fn with_custom_client(config: Config, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.config.api_token)
    }

    async fn query<T: DeserializeOwned>(&self, kind: &str, filter: &Filter) -> Result<Vec<T>> {
        let url = format!(
            "{}?filter={}",
            constants::kind_endpoint(&self.config.host, &self.config.module, kind),
            urlencoding::encode(&filter.to_query_string())
        );
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.bearer())
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .send()
            .await?;

        parse_response("Query", kind, response).await
    }

    async fn create<T: Serialize + DeserializeOwned>(&self, kind: &str, entity: &T) -> Result<T> {
        let url = constants::kind_endpoint(&self.config.host, &self.config.module, kind);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.bearer())
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .json(entity)
            .send()
            .await?;

        parse_response("Create", kind, response).await
    }

    async fn update<T: Serialize + DeserializeOwned>(&self, kind: &str, id: &Uuid, entity: &T) -> Result<T> {
        let url = constants::record_endpoint(&self.config.host, &self.config.module, kind, id);
        debug!("PUT {}", url);

        let response = self
            .http
            .put(&url)
            .header("Authorization", self.bearer())
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .json(entity)
            .send()
            .await?;

        parse_response("Update", kind, response).await
    }
}

/// Decode a store response, or surface the error body on a non-success status.
async fn parse_response<T: DeserializeOwned>(
    operation: &str,
    kind: &str,
    response: reqwest::Response,
) -> Result<T> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        anyhow::bail!("{} on '{}' failed with status {}: {}", operation, kind, status, error_text)
    }
}

fn require_id(id: Option<Uuid>, kind: &str, name: &str) -> Result<Uuid> {
    id.ok_or_else(|| anyhow::anyhow!("Cannot update {} '{}' without a store identifier", kind, name))
}

#[async_trait]
impl ObjectStore for StoreClient {
    async fn query_sections(&self, filter: &Filter) -> Result<Vec<SectionDefinition>> {
        self.query(kinds::SECTION_DEFINITIONS, filter).await
    }

    async fn create_section(&self, section: SectionDefinition) -> Result<SectionDefinition> {
        self.create(kinds::SECTION_DEFINITIONS, &section).await
    }

    async fn update_section(&self, section: SectionDefinition) -> Result<SectionDefinition> {
        let id = require_id(section.id, "section definition", &section.name)?;
        self.update(kinds::SECTION_DEFINITIONS, &id, &section).await
    }

    async fn query_behaviors(&self, filter: &Filter) -> Result<Vec<BehaviorDefinition>> {
        self.query(kinds::BEHAVIOR_DEFINITIONS, filter).await
    }

    async fn create_behavior(&self, behavior: BehaviorDefinition) -> Result<BehaviorDefinition> {
        self.create(kinds::BEHAVIOR_DEFINITIONS, &behavior).await
    }

    async fn update_behavior(&self, behavior: BehaviorDefinition) -> Result<BehaviorDefinition> {
        let id = require_id(behavior.id, "behavior definition", &behavior.name)?;
        self.update(kinds::BEHAVIOR_DEFINITIONS, &id, &behavior).await
    }

    async fn query_definitions(&self, filter: &Filter) -> Result<Vec<ObjectDefinition>> {
        self.query(kinds::DEFINITIONS, filter).await
    }

    async fn create_definition(&self, definition: ObjectDefinition) -> Result<ObjectDefinition> {
        self.create(kinds::DEFINITIONS, &definition).await
    }

    async fn update_definition(&self, definition: ObjectDefinition) -> Result<ObjectDefinition> {
        let id = require_id(definition.id, "object definition", &definition.name)?;
        self.update(kinds::DEFINITIONS, &id, &definition).await
    }
}
