//! Interactive catalog query state

use serde::{Deserialize, Serialize};

use super::record::ALL_GROUPS;

/// The user's current search, group selection and page
///
/// Fields are private so the reset rules hold: any change to the search text
/// or the active group moves the query back to page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    search_text: String,
    active_group: String,
    page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            active_group: ALL_GROUPS.to_string(),
            page: 1,
        }
    }
}

impl CatalogQuery {
    /// Create the identity query (no search, all groups, page 1)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`CatalogQuery::set_search`]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.set_search(text);
        self
    }

    /// Builder form of [`CatalogQuery::set_group`]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.set_group(group);
        self
    }

    /// Builder form of [`CatalogQuery::set_page`]
    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    /// Raw search text as typed
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Selected group, `"All"` when unfiltered
    pub fn active_group(&self) -> &str {
        &self.active_group
    }

    /// Current 1-based page
    pub fn page(&self) -> usize {
        self.page
    }

    /// Trimmed, lowercased search text used for matching
    pub fn normalized_search(&self) -> String {
        self.search_text.trim().to_lowercase()
    }

    /// Replace the search text and return to page 1
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
        tracing::trace!(search = %self.search_text, "catalog search changed");
    }

    /// Select a group and return to page 1
    ///
    /// An empty group name is treated as `"All"`.
    pub fn set_group(&mut self, group: impl Into<String>) {
        let group = group.into();
        self.active_group = if group.trim().is_empty() {
            ALL_GROUPS.to_string()
        } else {
            group
        };
        self.page = 1;
        tracing::trace!(group = %self.active_group, "catalog group changed");
    }

    /// Move to another page, leaving search and group untouched
    ///
    /// Page 0 is sanitized to page 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Reset search, group and page (the "clear filters" affordance)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a search or a group filter is active
    pub fn has_filters(&self) -> bool {
        !self.search_text.is_empty() || self.active_group != ALL_GROUPS
    }

    /// Whether `group` is the selected group
    pub fn is_group_selected(&self, group: &str) -> bool {
        self.active_group == group
    }

    /// Clamp the page into `[1, max(1, total_pages)]`
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }
}
