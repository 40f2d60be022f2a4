//! Comment moderation client.

use async_trait::async_trait;
use reqwest::Method;

use crate::application::pagination::{ItemPage, ListQuery};
use crate::application::services::{ResourceService, ServiceError};
use crate::domain::entities::CommentRecord;
use crate::infra::http::ApiClient;
use crate::infra::http::models::{CommentListEnvelope, CommentStatusPayload, CommentWire};

#[derive(Debug, Clone)]
pub struct CommentClient {
    api: ApiClient,
}

impl CommentClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self, id: &str) -> Result<CommentRecord, ServiceError> {
        let wire: CommentWire = self.api.get_json(&format!("comments/{id}"), &[]).await?;
        Ok(wire.into())
    }
}

#[async_trait]
impl ResourceService<CommentRecord> for CommentClient {
    async fn list(&self, query: &ListQuery) -> Result<ItemPage<CommentRecord>, ServiceError> {
        let pairs = super::list_query_pairs(query);
        let envelope: CommentListEnvelope = self.api.get_json("comments", &pairs).await?;
        Ok(ItemPage::new(
            envelope.comments.into_iter().map(Into::into).collect(),
            envelope.total,
        ))
    }

    async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        self.api.delete(&format!("comments/{id}")).await
    }

    /// Approve or unapprove a comment.
    async fn set_flag(&self, id: &str, enabled: bool) -> Result<(), ServiceError> {
        let payload = serde_json::to_value(CommentStatusPayload {
            is_approved: enabled,
        })
        .map_err(|err| ServiceError::invalid_input(err.to_string()))?;
        self.api
            .send_unit(Method::PUT, &format!("comments/{id}/status"), Some(payload))
            .await
    }
}
