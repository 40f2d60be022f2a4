//! Offset pagination and query state shared by every list controller.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The wildcard filter value: selecting it clears the filter entirely.
pub const FILTER_ALL: &str = "all";

/// Query state for one resource listing.
///
/// `page` is 1-based. Any change to the search text or to a filter resets
/// `page` to 1; page numbers only survive plain page navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    page_size: u32,
    search: String,
    filters: BTreeMap<String, BTreeSet<String>>,
}

impl ListQuery {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Selected values for a named filter, in insertion-independent order.
    pub fn filter(&self, name: &str) -> impl Iterator<Item = &str> {
        self.filters
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Move to an explicit page; search and filters are untouched.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Replace a single-select filter. The sentinel value [`FILTER_ALL`]
    /// removes the filter, matching the "All" option on every admin page.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value == FILTER_ALL {
            self.filters.remove(&name.into());
        } else {
            self.filters
                .insert(name.into(), BTreeSet::from([value]));
        }
        self.page = 1;
    }

    /// Toggle membership in a multi-select filter.
    pub fn toggle_filter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let selected = self.filters.entry(name.clone()).or_default();
        if !selected.remove(&value) {
            selected.insert(value);
        }
        if selected.is_empty() {
            self.filters.remove(&name);
        }
        self.page = 1;
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One page of a server-filtered listing plus the authoritative total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> ItemPage<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Number of pages at the given page size, never less than 1: an empty
    /// listing still occupies one page in the pagination widget.
    pub fn total_pages(&self, page_size: u32) -> u32 {
        let page_size = u64::from(page_size.max(1));
        let pages = self.total_count.div_ceil(page_size);
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_change_resets_page() {
        let mut query = ListQuery::new(10);
        query.set_page(4);
        query.set_search("rust");
        assert_eq!(query.page(), 1);
        assert_eq!(query.search(), "rust");
    }

    #[test]
    fn filter_change_resets_page() {
        let mut query = ListQuery::new(10);
        query.set_page(3);
        query.set_filter("status", "approved");
        assert_eq!(query.page(), 1);
        assert_eq!(query.filter("status").collect::<Vec<_>>(), ["approved"]);
    }

    #[test]
    fn all_sentinel_clears_filter() {
        let mut query = ListQuery::new(10);
        query.set_filter("status", "pending");
        query.set_filter("status", FILTER_ALL);
        assert_eq!(query.filter("status").count(), 0);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut query = ListQuery::new(10);
        query.toggle_filter("category", "c1");
        query.toggle_filter("category", "c2");
        assert_eq!(
            query.filter("category").collect::<Vec<_>>(),
            ["c1", "c2"]
        );

        query.toggle_filter("category", "c1");
        assert_eq!(query.filter("category").collect::<Vec<_>>(), ["c2"]);

        query.toggle_filter("category", "c2");
        assert_eq!(query.filter_names().count(), 0);
    }

    #[test]
    fn page_never_drops_below_one() {
        let mut query = ListQuery::new(10);
        query.set_page(0);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn total_pages_is_at_least_one() {
        let page: ItemPage<u8> = ItemPage::empty();
        assert_eq!(page.total_pages(10), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: ItemPage<u8> = ItemPage::new(Vec::new(), 21);
        assert_eq!(page.total_pages(10), 3);
        let page: ItemPage<u8> = ItemPage::new(Vec::new(), 20);
        assert_eq!(page.total_pages(10), 2);
        let page: ItemPage<u8> = ItemPage::new(Vec::new(), 1);
        assert_eq!(page.total_pages(10), 1);
    }
}
