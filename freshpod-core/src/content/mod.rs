//! Site content consumed by the catalog views
//!
//! Blog posts are loaded once from a static JSON file; gallery images are a
//! fixed built-in list. Both implement [`CatalogRecord`](crate::catalog::CatalogRecord)
//! so the blog index and the gallery share one filter/paginate engine.

mod blog;
mod gallery;

pub use blog::{
    BlogIndex, BlogPost, ContentBlock, FaqItem, GalleryBlockImage, PostNeighbors, SeoAeo,
    SeoGeo, SeoMeta, BLOG_PAGE_SIZE,
};
pub use gallery::{default_gallery, GalleryImage};
