//! Category taxonomy client.

use async_trait::async_trait;
use reqwest::Method;

use crate::application::pagination::{ItemPage, ListQuery};
use crate::application::services::{ResourceService, ServiceError};
use crate::domain::entities::CategoryRecord;
use crate::infra::http::ApiClient;
use crate::infra::http::models::{CategoryListEnvelope, CategoryWire, NamePayload};

#[derive(Debug, Clone)]
pub struct CategoryClient {
    api: ApiClient,
}

impl CategoryClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, name: &str) -> Result<CategoryRecord, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::invalid_input("category name must not be empty"));
        }
        let payload = NamePayload {
            name: name.to_string(),
        };
        let wire: CategoryWire = self
            .api
            .send_json(Method::POST, "categories", &payload)
            .await?;
        Ok(wire.into())
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<CategoryRecord, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::invalid_input("category name must not be empty"));
        }
        let payload = NamePayload {
            name: name.to_string(),
        };
        let wire: CategoryWire = self
            .api
            .send_json(Method::PUT, &format!("categories/{id}"), &payload)
            .await?;
        Ok(wire.into())
    }
}

#[async_trait]
impl ResourceService<CategoryRecord> for CategoryClient {
    async fn list(&self, query: &ListQuery) -> Result<ItemPage<CategoryRecord>, ServiceError> {
        let pairs = super::list_query_pairs(query);
        let envelope: CategoryListEnvelope = self.api.get_json("categories", &pairs).await?;
        Ok(ItemPage::new(
            envelope.categories.into_iter().map(Into::into).collect(),
            envelope.total,
        ))
    }

    async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        self.api.delete(&format!("categories/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::MockServer;

    use super::*;

    #[tokio::test]
    async fn create_posts_name() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/categories")
                .json_body(serde_json::json!({"name": "News"}));
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"id":"c1","name":"News"}"#);
        });

        let api = ApiClient::new(&server.base_url(), None, Duration::from_secs(5)).expect("client");
        let created = CategoryClient::new(api).create("News").await.expect("created");
        assert_eq!(created.id, "c1");
        mock.assert();
    }
}
