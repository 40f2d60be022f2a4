//! Quote ("thought") client.

use async_trait::async_trait;
use reqwest::Method;

use crate::application::pagination::{ItemPage, ListQuery};
use crate::application::services::{ResourceService, ServiceError};
use crate::domain::entities::QuoteRecord;
use crate::infra::http::ApiClient;
use crate::infra::http::models::{QuoteListEnvelope, QuotePayload, QuoteWire};

#[derive(Debug, Clone)]
pub struct QuoteClient {
    api: ApiClient,
}

impl QuoteClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, payload: &QuotePayload) -> Result<QuoteRecord, ServiceError> {
        if payload.content.as_deref().unwrap_or_default().is_empty() {
            return Err(ServiceError::invalid_input("quote content must not be empty"));
        }
        let wire: QuoteWire = self.api.send_json(Method::POST, "quotes", payload).await?;
        Ok(wire.into())
    }
}

#[async_trait]
impl ResourceService<QuoteRecord> for QuoteClient {
    async fn list(&self, query: &ListQuery) -> Result<ItemPage<QuoteRecord>, ServiceError> {
        let pairs = super::list_query_pairs(query);
        let envelope: QuoteListEnvelope = self.api.get_json("quotes", &pairs).await?;
        Ok(ItemPage::new(
            envelope.quotes.into_iter().map(Into::into).collect(),
            envelope.total,
        ))
    }

    async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        self.api.delete(&format!("quotes/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::MockServer;

    use super::*;

    fn client(server: &MockServer) -> QuoteClient {
        let api = ApiClient::new(&server.base_url(), None, Duration::from_secs(5)).expect("client");
        QuoteClient::new(api)
    }

    #[tokio::test]
    async fn create_posts_content_and_author() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/quotes")
                .json_body(serde_json::json!({"content": "Ship it.", "author": "Grace"}));
            then.status(201)
                .header("content-type", "application/json")
                .body(
                    r#"{"id":"q1","content":"Ship it.","author":"Grace","createdAt":"2024-05-01T08:00:00Z"}"#,
                );
        });

        let payload = QuotePayload {
            content: Some("Ship it.".into()),
            author: Some("Grace".into()),
            ..Default::default()
        };
        let quote = client(&server).create(&payload).await.expect("created");
        assert_eq!(quote.id, "q1");
        assert_eq!(quote.author.as_deref(), Some("Grace"));
        mock.assert();
    }

    #[tokio::test]
    async fn create_rejects_empty_content_locally() {
        let server = MockServer::start();
        let err = client(&server)
            .create(&QuotePayload::default())
            .await
            .expect_err("empty content");
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
}
