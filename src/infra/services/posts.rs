//! Post administration client.

use async_trait::async_trait;
use reqwest::Method;

use crate::application::pagination::{ItemPage, ListQuery};
use crate::application::services::{ResourceService, ServiceError};
use crate::domain::entities::PostRecord;
use crate::infra::http::ApiClient;
use crate::infra::http::models::{PostListEnvelope, PostPayload, PostWire};

#[derive(Debug, Clone)]
pub struct PostClient {
    api: ApiClient,
}

impl PostClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self, id: &str) -> Result<PostRecord, ServiceError> {
        let wire: PostWire = self.api.get_json(&format!("posts/{id}"), &[]).await?;
        Ok(wire.into())
    }

    pub async fn create(&self, payload: &PostPayload) -> Result<PostRecord, ServiceError> {
        if payload.title.as_deref().unwrap_or_default().is_empty() {
            return Err(ServiceError::invalid_input("post title must not be empty"));
        }
        let wire: PostWire = self.api.send_json(Method::POST, "posts", payload).await?;
        Ok(wire.into())
    }

    pub async fn update(&self, id: &str, payload: &PostPayload) -> Result<PostRecord, ServiceError> {
        let wire: PostWire = self
            .api
            .send_json(Method::PUT, &format!("posts/{id}"), payload)
            .await?;
        Ok(wire.into())
    }
}

#[async_trait]
impl ResourceService<PostRecord> for PostClient {
    async fn list(&self, query: &ListQuery) -> Result<ItemPage<PostRecord>, ServiceError> {
        let pairs = super::list_query_pairs(query);
        let envelope: PostListEnvelope = self.api.get_json("posts", &pairs).await?;
        Ok(ItemPage::new(
            envelope.posts.into_iter().map(Into::into).collect(),
            envelope.total,
        ))
    }

    async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        self.api.delete(&format!("posts/{id}")).await
    }
}
