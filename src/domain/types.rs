//! Shared domain enumerations mirrored from the platform API.

use serde::{Deserialize, Serialize};

/// Moderation filter for comment listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
    #[default]
    All,
    Pending,
    Approved,
}

impl CommentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentStatus::All => "all",
            CommentStatus::Pending => "pending",
            CommentStatus::Approved => "approved",
        }
    }
}

impl std::fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CommentStatus {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "all" => Ok(CommentStatus::All),
            "pending" => Ok(CommentStatus::Pending),
            "approved" => Ok(CommentStatus::Approved),
            _ => Err(()),
        }
    }
}

/// Publication filter for post and project listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PublishState {
    #[default]
    All,
    Published,
    Draft,
}

impl PublishState {
    pub fn as_str(self) -> &'static str {
        match self {
            PublishState::All => "all",
            PublishState::Published => "published",
            PublishState::Draft => "draft",
        }
    }
}

impl std::fmt::Display for PublishState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The manageable entity types exposed by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResourceKind {
    Posts,
    Categories,
    Tags,
    Comments,
    Messages,
    Projects,
    Quotes,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Posts => "posts",
            ResourceKind::Categories => "categories",
            ResourceKind::Tags => "tags",
            ResourceKind::Comments => "comments",
            ResourceKind::Messages => "messages",
            ResourceKind::Projects => "projects",
            ResourceKind::Quotes => "quotes",
        }
    }
}
