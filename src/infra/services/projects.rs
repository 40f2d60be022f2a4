//! Project portfolio client.

use async_trait::async_trait;
use reqwest::Method;

use crate::application::pagination::{ItemPage, ListQuery};
use crate::application::services::{ResourceService, ServiceError};
use crate::domain::entities::ProjectRecord;
use crate::infra::http::ApiClient;
use crate::infra::http::models::{ProjectListEnvelope, ProjectPayload, ProjectWire};

#[derive(Debug, Clone)]
pub struct ProjectClient {
    api: ApiClient,
}

impl ProjectClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self, id: &str) -> Result<ProjectRecord, ServiceError> {
        let wire: ProjectWire = self.api.get_json(&format!("projects/{id}"), &[]).await?;
        Ok(wire.into())
    }

    pub async fn create(&self, payload: &ProjectPayload) -> Result<ProjectRecord, ServiceError> {
        if payload.title.as_deref().unwrap_or_default().is_empty() {
            return Err(ServiceError::invalid_input("project title must not be empty"));
        }
        let wire: ProjectWire = self.api.send_json(Method::POST, "projects", payload).await?;
        Ok(wire.into())
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &ProjectPayload,
    ) -> Result<ProjectRecord, ServiceError> {
        let wire: ProjectWire = self
            .api
            .send_json(Method::PUT, &format!("projects/{id}"), payload)
            .await?;
        Ok(wire.into())
    }
}

#[async_trait]
impl ResourceService<ProjectRecord> for ProjectClient {
    async fn list(&self, query: &ListQuery) -> Result<ItemPage<ProjectRecord>, ServiceError> {
        let pairs = super::list_query_pairs(query);
        let envelope: ProjectListEnvelope = self.api.get_json("projects", &pairs).await?;
        Ok(ItemPage::new(
            envelope.projects.into_iter().map(Into::into).collect(),
            envelope.total,
        ))
    }

    async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        self.api.delete(&format!("projects/{id}")).await
    }
}
