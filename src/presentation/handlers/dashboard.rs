//! Aggregate overview: the five newest posts, content totals, and the API
//! health probe rolled into one JSON report.

use serde::Serialize;
use tracing::warn;

use crate::application::error::AppError;
use crate::application::pagination::{ItemPage, ListQuery};
use crate::application::services::{ResourceService, ServiceError};
use crate::domain::entities::PostRecord;
use crate::infra::http::{ApiClient, HealthReport};
use crate::infra::services::{CategoryClient, PostClient, TagClient};
use crate::presentation::print::print_json;

const RECENT_POST_COUNT: u32 = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub recent_posts: Vec<PostRecord>,
    pub total_posts: u64,
    pub total_tags: u64,
    pub total_categories: u64,
    pub health: HealthReport,
}

pub async fn handle(api: &ApiClient) -> Result<(), AppError> {
    let report = gather(api).await;
    print_json(&report)
}

/// Collect every section concurrently. A section whose fetch fails is
/// reported empty instead of sinking the whole overview, so the dashboard
/// stays useful while parts of the API are down.
pub async fn gather(api: &ApiClient) -> DashboardReport {
    let posts = PostClient::new(api.clone());
    let tags = TagClient::new(api.clone());
    let categories = CategoryClient::new(api.clone());

    let post_query = ListQuery::new(RECENT_POST_COUNT);
    let tag_query = ListQuery::new(1);
    let category_query = ListQuery::new(1);
    let (posts, tags, categories, health) = tokio::join!(
        posts.list(&post_query),
        tags.list(&tag_query),
        categories.list(&category_query),
        api.health(),
    );

    let (recent_posts, total_posts) = match posts {
        Ok(page) => (page.items, page.total_count),
        Err(err) => {
            warn!(error = %err, section = "posts", "dashboard section unavailable");
            (Vec::new(), 0)
        }
    };

    DashboardReport {
        recent_posts,
        total_posts,
        total_tags: total_or_zero(tags, "tags"),
        total_categories: total_or_zero(categories, "categories"),
        health,
    }
}

fn total_or_zero<T>(result: Result<ItemPage<T>, ServiceError>, section: &str) -> u64 {
    match result {
        Ok(page) => page.total_count,
        Err(err) => {
            warn!(error = %err, section, "dashboard section unavailable");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::MockServer;

    use super::*;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url(), None, Duration::from_secs(5)).expect("client")
    }

    #[tokio::test]
    async fn aggregates_recent_posts_totals_and_health() {
        let server = MockServer::start();
        let posts = server.mock(|when, then| {
            when.method("GET")
                .path("/posts")
                .query_param("page", "1")
                .query_param("limit", "5");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"posts":[{"id":"p1","slug":"hello","title":"Hello","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}],"total":23}"#,
                );
        });
        server.mock(|when, then| {
            when.method("GET").path("/tags");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"tags":[],"total":7}"#);
        });
        server.mock(|when, then| {
            when.method("GET").path("/categories");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"categories":[],"total":3}"#);
        });
        server.mock(|when, then| {
            when.method("GET").path("/");
            then.status(200);
        });

        let report = gather(&client(&server)).await;
        assert_eq!(report.recent_posts.len(), 1);
        assert_eq!(report.total_posts, 23);
        assert_eq!(report.total_tags, 7);
        assert_eq!(report.total_categories, 3);
        assert!(report.health.online);
        posts.assert();
    }

    #[tokio::test]
    async fn failed_sections_degrade_independently() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/posts");
            then.status(500).body("boom");
        });
        server.mock(|when, then| {
            when.method("GET").path("/tags");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"tags":[],"total":7}"#);
        });
        server.mock(|when, then| {
            when.method("GET").path("/categories");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"categories":[],"total":3}"#);
        });
        server.mock(|when, then| {
            when.method("GET").path("/");
            then.status(200);
        });

        let report = gather(&client(&server)).await;
        assert!(report.recent_posts.is_empty());
        assert_eq!(report.total_posts, 0);
        assert_eq!(report.total_tags, 7);
        assert_eq!(report.total_categories, 3);
    }
}
