//! Contact message inbox client.
//!
//! Messages live under `/contact` on the wire even though the admin surface
//! calls them messages.

use async_trait::async_trait;
use reqwest::Method;

use crate::application::pagination::{ItemPage, ListQuery};
use crate::application::services::{ResourceService, ServiceError};
use crate::domain::entities::ContactMessageRecord;
use crate::infra::http::ApiClient;
use crate::infra::http::models::{ContactMessageListEnvelope, UnreadCountEnvelope};

#[derive(Debug, Clone)]
pub struct MessageClient {
    api: ApiClient,
}

impl MessageClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Number of unread messages, shown as the inbox badge.
    pub async fn unread_count(&self) -> Result<u64, ServiceError> {
        let envelope: UnreadCountEnvelope =
            self.api.get_json("contact/unread/count", &[]).await?;
        Ok(envelope.count)
    }
}

#[async_trait]
impl ResourceService<ContactMessageRecord> for MessageClient {
    async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<ItemPage<ContactMessageRecord>, ServiceError> {
        let pairs = super::list_query_pairs(query);
        let envelope: ContactMessageListEnvelope = self.api.get_json("contact", &pairs).await?;
        Ok(ItemPage::new(
            envelope.messages.into_iter().map(Into::into).collect(),
            envelope.total,
        ))
    }

    async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        self.api.delete(&format!("contact/{id}")).await
    }

    /// Mark a message read or unread.
    async fn set_flag(&self, id: &str, enabled: bool) -> Result<(), ServiceError> {
        self.api
            .send_unit(
                Method::PATCH,
                &format!("contact/{id}/read"),
                Some(serde_json::json!({ "isRead": enabled })),
            )
            .await
    }
}
