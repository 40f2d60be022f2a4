//! Blog settings client.
//!
//! Settings are a server-side singleton, so this client sits outside the
//! `ResourceService` seam: there is nothing to list or delete, only one
//! object to read and patch.

use reqwest::Method;

use crate::application::services::ServiceError;
use crate::domain::entities::BlogSettingsRecord;
use crate::infra::http::ApiClient;
use crate::infra::http::models::{BlogSettingsWire, SettingsPayload};

#[derive(Debug, Clone)]
pub struct SettingsClient {
    api: ApiClient,
}

impl SettingsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<BlogSettingsRecord, ServiceError> {
        let wire: BlogSettingsWire = self.api.get_json("settings", &[]).await?;
        Ok(wire.into())
    }

    /// Partial update; fields left `None` keep their current server value.
    pub async fn update(&self, payload: &SettingsPayload) -> Result<BlogSettingsRecord, ServiceError> {
        if payload
            .blog_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ServiceError::invalid_input("blog name must not be empty"));
        }
        let wire: BlogSettingsWire = self.api.send_json(Method::PUT, "settings", payload).await?;
        Ok(wire.into())
    }
}
