//! Catalog record abstraction

/// Reserved group key meaning "no group filter"
pub const ALL_GROUPS: &str = "All";

/// An item in a filterable, paginated collection
///
/// Blog posts and gallery images implement this so a single engine can serve
/// both views. Records are immutable once loaded.
pub trait CatalogRecord {
    /// Stable unique identifier (slug or image path)
    fn id(&self) -> &str;

    /// Strings matched by free-text search, in display order
    fn searchable_text(&self) -> Vec<&str>;

    /// Key used by the group selector (author for posts, category for images)
    fn group_key(&self) -> &str;

    /// Whether any searchable string contains `needle`
    ///
    /// `needle` must already be trimmed and lowercased.
    fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.searchable_text()
            .iter()
            .any(|text| text.to_lowercase().contains(needle))
    }
}

impl<R: CatalogRecord + ?Sized> CatalogRecord for &R {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn searchable_text(&self) -> Vec<&str> {
        (**self).searchable_text()
    }

    fn group_key(&self) -> &str {
        (**self).group_key()
    }
}
