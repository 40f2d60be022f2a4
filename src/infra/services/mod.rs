//! Concrete API clients, one per admin resource.
//!
//! Each client wraps the shared [`ApiClient`](crate::infra::http::ApiClient);
//! the listable ones implement
//! [`ResourceService`](crate::application::services::ResourceService) for
//! their record type, so list controllers stay resource-agnostic. Settings
//! are a singleton and get a plain get/update client instead.

pub mod categories;
pub mod comments;
pub mod messages;
pub mod posts;
pub mod projects;
pub mod quotes;
pub mod settings;
pub mod tags;

pub use categories::CategoryClient;
pub use comments::CommentClient;
pub use messages::MessageClient;
pub use posts::PostClient;
pub use projects::ProjectClient;
pub use quotes::QuoteClient;
pub use settings::SettingsClient;
pub use tags::TagClient;

use crate::application::pagination::ListQuery;

/// Translate query state into the wire query string. Filters pass through
/// under their own names; the server owns filtering and search semantics.
pub(crate) fn list_query_pairs(query: &ListQuery) -> Vec<(&str, String)> {
    let mut pairs = vec![
        ("page", query.page().to_string()),
        ("limit", query.page_size().to_string()),
    ];
    if !query.search().is_empty() {
        pairs.push(("search", query.search().to_string()));
    }
    for name in query.filter_names() {
        for value in query.filter(name) {
            pairs.push((name, value.to_string()));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_include_search_and_filters() {
        let mut query = ListQuery::new(10);
        query.set_search("rust");
        query.set_filter("status", "pending");
        query.set_page(3);

        let pairs = list_query_pairs(&query);
        assert!(pairs.contains(&("page", "3".to_string())));
        assert!(pairs.contains(&("limit", "10".to_string())));
        assert!(pairs.contains(&("search", "rust".to_string())));
        assert!(pairs.contains(&("status", "pending".to_string())));
    }

    #[test]
    fn empty_search_is_omitted() {
        let query = ListQuery::new(10);
        let pairs = list_query_pairs(&query);
        assert!(pairs.iter().all(|(key, _)| *key != "search"));
    }
}
