//! The service-client seam between list controllers and the remote API.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::pagination::{ItemPage, ListQuery};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("operation is not supported for this resource")]
    Unsupported,
}

impl ServiceError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Remote operations a list controller needs from one resource type.
///
/// Listing is authoritative on the server side: implementations pass the
/// query through and normalize the response envelope into [`ItemPage`]
/// without filtering or sorting locally. Create/update operations stay on
/// the concrete clients; the controller only ever lists, removes, and flips
/// per-resource status flags.
#[async_trait]
pub trait ResourceService<T>: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ItemPage<T>, ServiceError>;

    async fn remove(&self, id: &str) -> Result<(), ServiceError>;

    /// Resource-specific boolean status mutation: approval for comments,
    /// read state for contact messages. Resources without one keep the
    /// default and report [`ServiceError::Unsupported`].
    async fn set_flag(&self, id: &str, enabled: bool) -> Result<(), ServiceError> {
        let _ = (id, enabled);
        Err(ServiceError::Unsupported)
    }
}
