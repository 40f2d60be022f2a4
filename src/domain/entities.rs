//! Canonical resource records as the application layer sees them.
//!
//! Wire-level quirks (nested `layout` objects, duplicated post references)
//! are flattened by the infra normalization adapters before records reach
//! this layer. Identifiers are opaque strings assigned by the platform.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub published: bool,
    pub pinned: bool,
    pub tags: Vec<String>,
    pub categories: Vec<CategoryRecord>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A comment joined with the title of the post it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: String,
    pub author: String,
    pub author_email: Option<String>,
    pub body: String,
    pub post_id: String,
    pub post_title: String,
    pub approved: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessageRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub published: bool,
    pub tags: Vec<TagRecord>,
    pub categories: Vec<CategoryRecord>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Site-wide blog settings: identity, SEO, and presentation knobs managed
/// from the admin surface. A singleton on the server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSettingsRecord {
    pub blog_name: String,
    pub tagline: String,
    pub logo_url: Option<String>,
    pub theme: String,
    pub posts_per_page: u32,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub social_links: BTreeMap<String, String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A "thought": a short quote with an optional attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: String,
    pub content: String,
    pub author: Option<String>,
    pub categories: Vec<CategoryRecord>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
