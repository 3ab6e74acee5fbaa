//! Filter and paginate engine

use serde::Serialize;

use super::pagination::PageControls;
use super::query::CatalogQuery;
use super::record::{CatalogRecord, ALL_GROUPS};

/// Collect distinct group keys in first-seen order, prefixed with `"All"`
///
/// Records with an empty group key are skipped.
pub fn list_groups<R: CatalogRecord>(records: &[R]) -> Vec<String> {
    let mut groups = vec![ALL_GROUPS.to_string()];

    for record in records {
        let key = record.group_key();
        if key.is_empty() || key == ALL_GROUPS {
            continue;
        }
        if !groups.iter().any(|g| g == key) {
            groups.push(key.to_string());
        }
    }

    groups
}

/// Select records matching the query's group and search text
///
/// Stable: survivors keep their relative input order.
pub fn filter<'a, R: CatalogRecord>(records: &'a [R], query: &CatalogQuery) -> Vec<&'a R> {
    let needle = query.normalized_search();
    let group = query.active_group();

    records
        .iter()
        .filter(|record| group == ALL_GROUPS || record.group_key() == group)
        .filter(|record| record.matches_search(&needle))
        .collect()
}

/// Slice out one page of `items`
///
/// Returns `[(page-1)*page_size, page*page_size)` clamped to the available
/// range, or an empty slice when the page lies past the end. Page 0 is
/// treated as page 1; a zero page size yields an empty page.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }

    let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());

    &items[start..end]
}

/// Number of pages needed for `count` items
///
/// Zero items (or a zero page size) means zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// A fixed record collection with its page size and group menu
#[derive(Debug, Clone)]
pub struct Catalog<R> {
    records: Vec<R>,
    page_size: usize,
    groups: Vec<String>,
}

impl<R: CatalogRecord> Catalog<R> {
    /// Wrap a record collection
    ///
    /// A zero page size is sanitized to "everything on one page".
    pub fn new(records: Vec<R>, page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            records.len().max(1)
        } else {
            page_size
        };
        let groups = list_groups(&records);

        tracing::debug!(
            records = records.len(),
            page_size,
            groups = groups.len(),
            "catalog loaded"
        );

        Self {
            records,
            page_size,
            groups,
        }
    }

    /// Wrap a collection that is always shown on a single page
    pub fn single_page(records: Vec<R>) -> Self {
        Self::new(records, 0)
    }

    /// All records in load order
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Group menu entries, starting with `"All"`
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Configured page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Find a record by id
    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Compute the visible page for a query
    ///
    /// The query's page is clamped against the filtered result count before
    /// slicing, so a stale page number still shows the nearest valid page.
    pub fn view(&self, query: &CatalogQuery) -> CatalogView<'_, R> {
        let filtered = filter(&self.records, query);
        let total_matches = filtered.len();
        let total_pages = total_pages(total_matches, self.page_size);
        let page = query.page().clamp(1, total_pages.max(1));

        let items = paginate(&filtered, page, self.page_size).to_vec();
        let controls = PageControls::new(total_pages, page);

        tracing::debug!(
            search = %query.search_text(),
            group = %query.active_group(),
            requested_page = query.page(),
            page,
            total_matches,
            "catalog view computed"
        );

        CatalogView {
            items,
            total_matches,
            total_pages,
            page,
            controls,
            groups: &self.groups,
            has_filters: query.has_filters(),
        }
    }
}

/// The visible slice of a catalog for one query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<'a, R> {
    /// Records on the current page
    pub items: Vec<&'a R>,

    /// Number of records matching the query across all pages
    pub total_matches: usize,

    /// Number of pages for the matching records (0 when none match)
    pub total_pages: usize,

    /// Page actually shown, after clamping
    pub page: usize,

    /// Pager state, `None` when everything fits on one page
    pub controls: Option<PageControls>,

    /// Group menu entries, starting with `"All"`
    pub groups: &'a [String],

    /// Whether the query narrows the catalog (drives the "clear" affordance)
    pub has_filters: bool,
}

impl<R> CatalogView<'_, R> {
    /// Nothing matched; render the empty state with a "clear filters" action
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }

    /// Result summary such as "No images found" or "3 images found"
    pub fn summary(&self, noun: &str) -> String {
        match self.total_matches {
            0 => format!("No {noun}s found"),
            n => {
                let plural = if n == 1 { "" } else { "s" };
                let found = if self.has_filters { " found" } else { "" };
                format!("{n} {noun}{plural}{found}")
            }
        }
    }
}
