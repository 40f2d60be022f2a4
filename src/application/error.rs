use thiserror::Error;

use crate::application::services::ServiceError;
use crate::config::LoadError;
use crate::infra::error::InfraError;

/// Top-level error for the binary; everything the console can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    List(#[from] ListError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

/// In-band error state for a list controller. Cloneable so it can live
/// inside [`LoadState::Failed`](crate::application::controller::LoadState)
/// snapshots; remote error chains are flattened to text at the boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("failed to load list: {0}")]
    Fetch(String),
    #[error("list request timed out after {0}s")]
    Timeout(u64),
    #[error("mutation failed: {0}")]
    Mutation(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("no pending action to confirm")]
    NoPendingAction,
}

impl ListError {
    pub fn fetch(err: impl std::fmt::Display) -> Self {
        Self::Fetch(err.to_string())
    }

    pub fn mutation(err: impl std::fmt::Display) -> Self {
        Self::Mutation(err.to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
