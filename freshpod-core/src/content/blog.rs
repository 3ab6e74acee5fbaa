//! Blog post records and the ordered post index
//!
//! Posts arrive as a JSON array. Each post carries its body as a map of
//! typed content blocks plus an `order` list naming which blocks to show.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::catalog::{Catalog, CatalogRecord};
use crate::error::ContentError;

/// Posts per page on the blog index
pub const BLOG_PAGE_SIZE: usize = 6;

/// A single blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Unique URL slug
    pub slug: String,

    pub title: String,

    pub description: String,

    /// Author name, also the blog filter group
    #[serde(default)]
    pub author: String,

    /// ISO date (`2025-01-31` or a full RFC 3339 timestamp)
    pub published_at: String,

    /// Banner image path
    #[serde(default)]
    pub banner: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Block keys in display order
    #[serde(default)]
    pub order: Vec<String>,

    /// Content blocks keyed by block key
    #[serde(default)]
    pub content: HashMap<String, ContentBlock>,

    #[serde(default)]
    pub seo: Option<SeoMeta>,
}

/// A typed content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        body: String,
    },
    Section {
        #[serde(default)]
        heading: String,
        #[serde(default)]
        body: String,
    },
    Image {
        #[serde(default)]
        src: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        caption: Option<String>,
    },
    Gallery {
        #[serde(default)]
        heading: Option<String>,
        #[serde(default)]
        images: Vec<GalleryBlockImage>,
    },
    List {
        #[serde(default)]
        heading: Option<String>,
        #[serde(default)]
        items: Vec<String>,
    },
    Quote {
        #[serde(default)]
        body: String,
    },
    Cta {
        #[serde(default)]
        heading: Option<String>,
        #[serde(default)]
        text: String,
        #[serde(default)]
        label: String,
        #[serde(default)]
        href: String,
    },
    /// Block types this version does not know how to render
    #[serde(other)]
    Unknown,
}

/// Image inside a gallery block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryBlockImage {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// SEO sub-record, carried through untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub schema_type: Option<String>,
    #[serde(default)]
    pub geo: Option<SeoGeo>,
    #[serde(default)]
    pub aeo: Option<SeoAeo>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeoGeo {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoAeo {
    #[serde(default)]
    pub faq_items: Vec<FaqItem>,
}

/// Question/answer pair shown under a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub q: String,
    pub a: String,
}

impl BlogPost {
    /// Resolve `order` against `content`
    ///
    /// Keys without a block and blocks of unknown type are skipped.
    pub fn blocks(&self) -> Vec<(&str, &ContentBlock)> {
        self.order
            .iter()
            .filter_map(|key| {
                let block = self.content.get(key)?;
                if matches!(block, ContentBlock::Unknown) {
                    tracing::debug!(slug = %self.slug, key = %key, "skipping unknown block type");
                    return None;
                }
                Some((key.as_str(), block))
            })
            .collect()
    }

    /// Publication date, when `published_at` parses
    pub fn published_date(&self) -> Option<NaiveDate> {
        let raw = self.published_at.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    /// Date as shown on cards, e.g. "5 Mar 2025"
    pub fn display_date(&self) -> String {
        self.published_date()
            .map(|d| d.format("%-d %b %Y").to_string())
            .unwrap_or_else(|| self.published_at.clone())
    }

    /// FAQ entries from the SEO record, if any
    pub fn faq_items(&self) -> &[FaqItem] {
        self.seo
            .as_ref()
            .and_then(|seo| seo.aeo.as_ref())
            .map(|aeo| aeo.faq_items.as_slice())
            .unwrap_or(&[])
    }
}

impl CatalogRecord for BlogPost {
    fn id(&self) -> &str {
        &self.slug
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.author]
    }

    fn group_key(&self) -> &str {
        &self.author
    }
}

/// Previous and next posts around a given post, by position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostNeighbors<'a> {
    pub previous: Option<&'a BlogPost>,
    pub next: Option<&'a BlogPost>,
}

/// All blog posts in publication-file order
#[derive(Debug, Clone, Default)]
pub struct BlogIndex {
    posts: Vec<BlogPost>,
}

impl BlogIndex {
    /// Build an index, rejecting empty or duplicate slugs
    pub fn new(posts: Vec<BlogPost>) -> Result<Self, ContentError> {
        let mut seen = HashSet::new();
        for (position, post) in posts.iter().enumerate() {
            if post.slug.trim().is_empty() {
                return Err(ContentError::EmptySlug { position });
            }
            if !seen.insert(post.slug.as_str()) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug.clone(),
                });
            }
        }

        Ok(Self { posts })
    }

    /// Parse posts from a JSON array
    pub fn from_json(content: &str) -> Result<Self, ContentError> {
        let posts: Vec<BlogPost> =
            serde_json::from_str(content).map_err(|source| ContentError::Parse { source })?;
        Self::new(posts)
    }

    /// Load posts from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let index = Self::from_json(&content)?;
        tracing::debug!("Loaded {} posts from {}", index.len(), path.display());
        Ok(index)
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Find a post by slug
    pub fn get(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Adjacent posts for prev/next navigation
    ///
    /// Returns `None` when the slug is unknown.
    pub fn neighbors(&self, slug: &str) -> Option<PostNeighbors<'_>> {
        let index = self.posts.iter().position(|p| p.slug == slug)?;

        Some(PostNeighbors {
            previous: index.checked_sub(1).and_then(|i| self.posts.get(i)),
            next: self.posts.get(index + 1),
        })
    }

    /// Wrap the posts in a catalog with the blog page size
    pub fn catalog(&self) -> Catalog<&BlogPost> {
        self.catalog_with_page_size(BLOG_PAGE_SIZE)
    }

    /// Wrap the posts in a catalog with a custom page size
    pub fn catalog_with_page_size(&self, page_size: usize) -> Catalog<&BlogPost> {
        Catalog::new(self.posts.iter().collect(), page_size)
    }
}
