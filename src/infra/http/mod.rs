//! Shared HTTP plumbing for the platform API.

pub mod models;

use std::time::Duration;

use metrics::{counter, histogram};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::services::ServiceError;
use crate::infra::error::InfraError;

/// Result of probing the API root.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub online: bool,
    pub latency_ms: u128,
}

/// One authenticated HTTP client shared by every resource service.
///
/// Owns the base URL, the optional bearer token, and the transport-level
/// timeout. Everything speaks JSON; server errors are captured with status
/// and body text so they stay legible all the way up the error chain.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    key: Option<String>,
}

impl ApiClient {
    pub fn new(site: &str, key: Option<String>, timeout: Duration) -> Result<Self, InfraError> {
        let base = Url::parse(site)?.join("/")?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(|err| InfraError::configuration(err.to_string()))?;
        Ok(Self { client, base, key })
    }

    pub fn user_agent() -> &'static str {
        concat!("quillboard/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ServiceError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| ServiceError::invalid_input(err.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            url.set_query(None);
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        let response = self.send(Method::GET, url, None).await?;
        Self::decode(response).await
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ServiceError> {
        let url = self.url(path)?;
        let body =
            serde_json::to_value(body).map_err(|err| ServiceError::invalid_input(err.to_string()))?;
        let response = self.send(method, url, Some(body)).await?;
        Self::decode(response).await
    }

    pub async fn send_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), ServiceError> {
        let url = self.url(path)?;
        let response = self.send(method, url, body).await?;
        let status = response.status();
        if !status.is_success() {
            counter!("quillboard_api_request_failed_total").increment(1);
            let text = response.text().await.unwrap_or_default();
            return Err(ServiceError::remote(status.as_u16(), text));
        }
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ServiceError> {
        self.send_unit(Method::DELETE, path, None).await
    }

    /// Probe the API root and measure round-trip latency.
    pub async fn health(&self) -> HealthReport {
        let started = std::time::Instant::now();
        let online = match self.url("/") {
            Ok(url) => self.send(Method::GET, url, None).await.is_ok(),
            Err(_) => false,
        };
        HealthReport {
            online,
            latency_ms: if online {
                started.elapsed().as_millis()
            } else {
                0
            },
        }
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ServiceError> {
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(key) = &self.key {
            request = request.header(AUTHORIZATION, format!("Bearer {key}"));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let started = std::time::Instant::now();
        counter!("quillboard_api_request_total").increment(1);
        let result = request.send().await;
        histogram!("quillboard_api_request_ms").record(started.elapsed().as_millis() as f64);

        match result {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "api request");
                Ok(response)
            }
            Err(err) => {
                counter!("quillboard_api_request_failed_total").increment(1);
                Err(ServiceError::transport(err))
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(ServiceError::transport)?;
        if !status.is_success() {
            counter!("quillboard_api_request_failed_total").increment(1);
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ServiceError::remote(status.as_u16(), text));
        }
        serde_json::from_slice(&bytes).map_err(ServiceError::decode)
    }
}
