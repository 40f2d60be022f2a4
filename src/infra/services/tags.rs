//! Tag taxonomy client.

use async_trait::async_trait;
use reqwest::Method;

use crate::application::pagination::{ItemPage, ListQuery};
use crate::application::services::{ResourceService, ServiceError};
use crate::domain::entities::TagRecord;
use crate::infra::http::ApiClient;
use crate::infra::http::models::{NamePayload, TagListEnvelope, TagWire};

#[derive(Debug, Clone)]
pub struct TagClient {
    api: ApiClient,
}

impl TagClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, name: &str) -> Result<TagRecord, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::invalid_input("tag name must not be empty"));
        }
        let payload = NamePayload {
            name: name.to_string(),
        };
        let wire: TagWire = self.api.send_json(Method::POST, "tags", &payload).await?;
        Ok(wire.into())
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<TagRecord, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::invalid_input("tag name must not be empty"));
        }
        let payload = NamePayload {
            name: name.to_string(),
        };
        let wire: TagWire = self
            .api
            .send_json(Method::PUT, &format!("tags/{id}"), &payload)
            .await?;
        Ok(wire.into())
    }
}

#[async_trait]
impl ResourceService<TagRecord> for TagClient {
    async fn list(&self, query: &ListQuery) -> Result<ItemPage<TagRecord>, ServiceError> {
        let pairs = super::list_query_pairs(query);
        let envelope: TagListEnvelope = self.api.get_json("tags", &pairs).await?;
        Ok(ItemPage::new(
            envelope.tags.into_iter().map(Into::into).collect(),
            envelope.total,
        ))
    }

    async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        self.api.delete(&format!("tags/{id}")).await
    }
}
