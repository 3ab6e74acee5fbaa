//! FreshPod Catalog - search, group filter and pagination over site content
//!
//! The blog index and the gallery are both "catalogs": a fixed, ordered set
//! of records browsed through an interactive query. This module provides the
//! one engine both views use.
//!
//! # Overview
//!
//! The catalog engine lets callers:
//! - List the distinct group keys (authors, categories) for a filter menu
//! - Filter records by group and free-text search, preserving input order
//! - Slice the filtered records into fixed-size pages
//! - Compute the page-number window and jump affordances for a pager
//!
//! # Architecture
//!
//! ```text
//! records (loaded once)      CatalogQuery (mutated by the user)
//!        │                          │
//!        └──────────┬───────────────┘
//!                   ▼
//!            filter() ── stable, case-insensitive
//!                   │
//!                   ▼
//!            paginate() ── [(page-1)*size, page*size)
//!                   │
//!                   ▼
//!            CatalogView ── items + PageControls
//! ```
//!
//! Every operation is total: bad input is sanitized, never rejected.

mod engine;
mod pagination;
mod query;
mod record;

pub use engine::{filter, list_groups, paginate, total_pages, Catalog, CatalogView};
pub use pagination::{page_window, PageControls, MAX_PAGE_WINDOW};
pub use query::CatalogQuery;
pub use record::{CatalogRecord, ALL_GROUPS};
