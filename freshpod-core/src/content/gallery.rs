//! Gallery images

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogRecord};

/// A gallery image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Image path, unique within the gallery
    pub src: String,

    /// Alt text, also the caption
    pub alt: String,

    /// Filter category
    pub category: String,
}

impl GalleryImage {
    pub fn new(src: &str, alt: &str, category: &str) -> Self {
        Self {
            src: src.to_string(),
            alt: alt.to_string(),
            category: category.to_string(),
        }
    }

    /// Wrap a list of images in a catalog
    ///
    /// `page_size` of `None` keeps every match on one page.
    pub fn catalog(images: Vec<GalleryImage>, page_size: Option<usize>) -> Catalog<GalleryImage> {
        match page_size {
            Some(size) => Catalog::new(images, size),
            None => Catalog::single_page(images),
        }
    }
}

impl CatalogRecord for GalleryImage {
    fn id(&self) -> &str {
        &self.src
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.alt, &self.category]
    }

    fn group_key(&self) -> &str {
        &self.category
    }
}

/// The images shipped with the site
pub fn default_gallery() -> Vec<GalleryImage> {
    let mut images = vec![
        GalleryImage::new(
            "/images/FM_1.png",
            "FreshPod Machine – Sunflare Yellow Color",
            "Product",
        ),
        GalleryImage::new(
            "/images/FM_2.png",
            "FreshPod Machine – Carbon Black Color",
            "Product",
        ),
        GalleryImage::new(
            "/images/FM_3.png",
            "FreshPod Machine – Glacier Blue Color",
            "Product",
        ),
        GalleryImage::new(
            "/images/FM_4.png",
            "FreshPod Machine – Crimson Red Color",
            "Product",
        ),
        GalleryImage::new("/images/gallery/1.webp", "Freshpod Machines", "Product"),
    ];

    images.extend((2..=12).map(|n| {
        GalleryImage::new(
            &format!("/images/gallery/{n}.webp"),
            "Freshpod Event",
            "Freshpod Event",
        )
    }));

    images
}

#[cfg(test)]
mod gallery_tests {
    use super::*;
    use crate::catalog::CatalogQuery;

    #[test]
    fn test_default_gallery_shape() {
        let images = default_gallery();
        assert_eq!(images.len(), 16);
        assert_eq!(images[5].src, "/images/gallery/2.webp");
        assert_eq!(images[15].src, "/images/gallery/12.webp");
    }

    #[test]
    fn test_gallery_categories() {
        let catalog = GalleryImage::catalog(default_gallery(), None);
        assert_eq!(catalog.groups(), &["All", "Product", "Freshpod Event"]);
    }

    #[test]
    fn test_gallery_search_covers_alt_and_category() {
        let catalog = GalleryImage::catalog(default_gallery(), None);

        let view = catalog.view(&CatalogQuery::new().with_search("glacier"));
        assert_eq!(view.total_matches, 1);
        assert_eq!(view.items[0].src, "/images/FM_3.png");

        // "event" only appears in the alt text and category of event photos
        let view = catalog.view(&CatalogQuery::new().with_search("EVENT"));
        assert_eq!(view.total_matches, 11);
        assert!(view.controls.is_none());
    }

    #[test]
    fn test_gallery_category_filter() {
        let catalog = GalleryImage::catalog(default_gallery(), Some(4));
        let view = catalog.view(&CatalogQuery::new().with_group("Product"));

        assert_eq!(view.total_matches, 5);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.items.len(), 4);
    }
}
