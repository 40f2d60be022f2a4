//! Wire-format DTOs for the platform API.
//!
//! The API speaks camelCase JSON. List endpoints wrap their items in an
//! envelope keyed by the plural resource name plus a `total` count, e.g.
//! `{"comments": [...], "total": 42}`. Conversion into the domain records
//! flattens the wire-level nesting (post layout, comment post references).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::entities::{
    BlogSettingsRecord, CategoryRecord, CommentRecord, ContactMessageRecord, PostRecord,
    ProjectRecord, QuoteRecord, TagRecord,
};

#[derive(Debug, Deserialize)]
pub struct CategoryWire {
    pub id: String,
    pub name: String,
}

impl From<CategoryWire> for CategoryRecord {
    fn from(wire: CategoryWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TagWire {
    pub id: String,
    pub name: String,
}

impl From<TagWire> for TagRecord {
    fn from(wire: TagWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutWire {
    #[serde(default)]
    pub pinned: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWire {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub layout: Option<LayoutWire>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<CategoryWire>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<PostWire> for PostRecord {
    fn from(wire: PostWire) -> Self {
        let pinned = wire
            .layout
            .and_then(|layout| layout.pinned)
            .unwrap_or(false);
        Self {
            id: wire.id,
            slug: wire.slug,
            title: wire.title,
            body: wire.body,
            published: wire.published,
            pinned,
            tags: wire.tags,
            categories: wire.categories.into_iter().map(Into::into).collect(),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

/// Abbreviated post reference embedded in comment payloads.
#[derive(Debug, Deserialize)]
pub struct PostRefWire {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWire {
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub author_email: Option<String>,
    pub body: String,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub post: Option<PostRefWire>,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<CommentWire> for CommentRecord {
    fn from(wire: CommentWire) -> Self {
        let (ref_id, post_title) = match wire.post {
            Some(post) => (Some(post.id), post.title),
            None => (None, String::new()),
        };
        Self {
            id: wire.id,
            author: wire.author,
            author_email: wire.author_email,
            body: wire.body,
            post_id: wire.post_id.or(ref_id).unwrap_or_default(),
            post_title,
            approved: wire.is_approved,
            created_at: wire.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageWire {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ContactMessageWire> for ContactMessageRecord {
    fn from(wire: ContactMessageWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            email: wire.email,
            subject: wire.subject,
            message: wire.message,
            read: wire.is_read,
            created_at: wire.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWire {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: Vec<TagWire>,
    #[serde(default)]
    pub categories: Vec<CategoryWire>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ProjectWire> for ProjectRecord {
    fn from(wire: ProjectWire) -> Self {
        Self {
            id: wire.id,
            slug: wire.slug,
            title: wire.title,
            description: wire.description,
            content: wire.content,
            published: wire.published,
            tags: wire.tags.into_iter().map(Into::into).collect(),
            categories: wire.categories.into_iter().map(Into::into).collect(),
            created_at: wire.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteWire {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryWire>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<QuoteWire> for QuoteRecord {
    fn from(wire: QuoteWire) -> Self {
        Self {
            id: wire.id,
            content: wire.content,
            author: wire.author,
            categories: wire.categories.into_iter().map(Into::into).collect(),
            created_at: wire.created_at,
        }
    }
}

/// Singleton settings object. Unlike the list endpoints it arrives bare,
/// without an envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSettingsWire {
    pub blog_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub theme: String,
    pub posts_per_page: u32,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub social_links: Option<BTreeMap<String, String>>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<BlogSettingsWire> for BlogSettingsRecord {
    fn from(wire: BlogSettingsWire) -> Self {
        Self {
            blog_name: wire.blog_name,
            tagline: wire.tagline,
            logo_url: wire.logo_url,
            theme: wire.theme,
            posts_per_page: wire.posts_per_page,
            seo_title: wire.seo_title,
            seo_description: wire.seo_description,
            social_links: wire.social_links.unwrap_or_default(),
            updated_at: wire.updated_at,
        }
    }
}

// List envelopes. Missing arrays and counts read as empty, matching how the
// API behaves on brand-new installs.

#[derive(Debug, Deserialize)]
pub struct PostListEnvelope {
    #[serde(default)]
    pub posts: Vec<PostWire>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct CategoryListEnvelope {
    #[serde(default)]
    pub categories: Vec<CategoryWire>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct TagListEnvelope {
    #[serde(default)]
    pub tags: Vec<TagWire>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct CommentListEnvelope {
    #[serde(default)]
    pub comments: Vec<CommentWire>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct ContactMessageListEnvelope {
    #[serde(default)]
    pub messages: Vec<ContactMessageWire>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct ProjectListEnvelope {
    #[serde(default)]
    pub projects: Vec<ProjectWire>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct QuoteListEnvelope {
    #[serde(default)]
    pub quotes: Vec<QuoteWire>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCountEnvelope {
    #[serde(default)]
    pub count: u64,
}

// Mutation payloads.

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct NamePayload {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentStatusPayload {
    pub is_approved: bool,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
}

/// Partial settings update; only the fields present change on the server.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_layout_pinned_flattens() {
        let json = r#"{
            "posts": [{
                "id": "p1",
                "slug": "hello",
                "title": "Hello",
                "body": "First post.",
                "published": true,
                "layout": {"pinned": true},
                "tags": ["intro"],
                "categories": [{"id": "c1", "name": "News"}],
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-02T00:00:00Z"
            }],
            "total": 1
        }"#;

        let envelope: PostListEnvelope = serde_json::from_str(json).expect("envelope");
        assert_eq!(envelope.total, 1);
        let post = PostRecord::from(envelope.posts.into_iter().next().expect("post"));
        assert!(post.pinned);
        assert_eq!(post.tags, vec!["intro".to_string()]);
        assert_eq!(post.categories[0].name, "News");
    }

    #[test]
    fn post_without_layout_is_unpinned() {
        let json = r#"{
            "id": "p2",
            "slug": "plain",
            "title": "Plain",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        let post = PostRecord::from(serde_json::from_str::<PostWire>(json).expect("post"));
        assert!(!post.pinned);
        assert!(!post.published);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn comment_post_reference_flattens() {
        let json = r#"{
            "comments": [{
                "id": "c2",
                "author": "Ada",
                "authorEmail": "ada@example.com",
                "body": "Nice write-up.",
                "postId": "p1",
                "post": {"id": "p1", "title": "Hello"},
                "isApproved": false,
                "createdAt": "2024-03-05T12:30:00Z"
            }],
            "total": 12
        }"#;

        let envelope: CommentListEnvelope = serde_json::from_str(json).expect("envelope");
        assert_eq!(envelope.total, 12);
        let comment = CommentRecord::from(envelope.comments.into_iter().next().expect("comment"));
        assert_eq!(comment.post_id, "p1");
        assert_eq!(comment.post_title, "Hello");
        assert!(!comment.approved);
    }

    #[test]
    fn empty_envelope_defaults() {
        let envelope: ContactMessageListEnvelope = serde_json::from_str("{}").expect("envelope");
        assert!(envelope.messages.is_empty());
        assert_eq!(envelope.total, 0);
    }

    #[test]
    fn message_read_flag_maps() {
        let json = r#"{
            "id": "m1",
            "name": "Grace",
            "email": "grace@example.com",
            "message": "Hi there",
            "isRead": true,
            "createdAt": "2024-06-01T09:00:00Z"
        }"#;

        let record =
            ContactMessageRecord::from(serde_json::from_str::<ContactMessageWire>(json).expect("wire"));
        assert!(record.read);
        assert!(record.subject.is_none());
    }

    #[test]
    fn settings_arrive_without_envelope() {
        let json = r#"{
            "blogName": "Quill & Ink",
            "tagline": "Notes from the workshop",
            "logoUrl": null,
            "theme": "paper",
            "postsPerPage": 12,
            "seoTitle": null,
            "seoDescription": "A workshop blog",
            "socialLinks": {"mastodon": "https://example.social/@quill"},
            "updatedAt": "2024-08-01T10:00:00Z"
        }"#;

        let record =
            BlogSettingsRecord::from(serde_json::from_str::<BlogSettingsWire>(json).expect("wire"));
        assert_eq!(record.blog_name, "Quill & Ink");
        assert_eq!(record.posts_per_page, 12);
        assert!(record.logo_url.is_none());
        assert_eq!(
            record.social_links.get("mastodon").map(String::as_str),
            Some("https://example.social/@quill")
        );
    }

    #[test]
    fn settings_payload_is_partial_and_camel_case() {
        let payload = SettingsPayload {
            blog_name: Some("Quill & Ink".into()),
            posts_per_page: Some(8),
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).expect("json");
        assert_eq!(
            value,
            serde_json::json!({"blogName": "Quill & Ink", "postsPerPage": 8})
        );
    }

    #[test]
    fn payload_omits_unset_fields() {
        let payload = PostPayload {
            title: Some("Hello".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).expect("json");
        assert_eq!(value, serde_json::json!({"title": "Hello"}));
    }
}
