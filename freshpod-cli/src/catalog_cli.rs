//! Blog and gallery browsing commands

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use freshpod_core::catalog::{CatalogQuery, CatalogView, ALL_GROUPS};
use freshpod_core::config::SiteConfig;
use freshpod_core::content::{default_gallery, BlogIndex, BlogPost, ContentBlock, GalleryImage};

/// Blog subcommand
#[derive(Parser, Debug)]
pub struct BlogCommand {
    #[clap(subcommand)]
    pub command: BlogSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BlogSubcommand {
    /// List posts matching a search and author filter
    List {
        /// Path to the posts JSON file
        #[clap(long)]
        data: PathBuf,

        #[clap(flatten)]
        query: QueryArgs,

        /// Filter by author
        #[clap(long, default_value = ALL_GROUPS)]
        author: String,
    },

    /// Show a single post
    Show {
        /// Post slug
        slug: String,

        /// Path to the posts JSON file
        #[clap(long)]
        data: PathBuf,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// List the authors in the filter menu
    Authors {
        /// Path to the posts JSON file
        #[clap(long)]
        data: PathBuf,
    },
}

/// Search and paging flags shared by the catalog views
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Free-text search (case-insensitive)
    #[clap(long, default_value = "")]
    search: String,

    /// Page to show (clamped into range)
    #[clap(long, default_value_t = 1)]
    page: usize,

    /// Output as JSON
    #[clap(long)]
    json: bool,
}

impl QueryArgs {
    fn to_query(&self, group: &str) -> CatalogQuery {
        CatalogQuery::new()
            .with_search(self.search.clone())
            .with_group(group)
            .with_page(self.page)
    }
}

/// Gallery arguments
#[derive(Args, Debug)]
pub struct GalleryArgs {
    #[clap(flatten)]
    query: QueryArgs,

    /// Filter by category
    #[clap(long, default_value = ALL_GROUPS)]
    category: String,

    /// Images per page (defaults to the configured size, or a single page)
    #[clap(long)]
    page_size: Option<usize>,
}

impl BlogCommand {
    pub fn execute(self, config: &SiteConfig) -> Result<()> {
        match self.command {
            BlogSubcommand::List {
                data,
                query,
                author,
            } => execute_blog_list(&data, &query, &author, config),
            BlogSubcommand::Show { slug, data, json } => execute_blog_show(&slug, &data, json),
            BlogSubcommand::Authors { data } => {
                let index = load_index(&data)?;
                for author in index.catalog().groups() {
                    println!("{author}");
                }
                Ok(())
            }
        }
    }
}

fn load_index(path: &std::path::Path) -> Result<BlogIndex> {
    BlogIndex::from_file(path).with_context(|| format!("Failed to load posts from {}", path.display()))
}

/// Table row for blog listings
#[derive(Tabled)]
struct PostRow {
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Published")]
    published: String,
}

fn execute_blog_list(
    data: &std::path::Path,
    args: &QueryArgs,
    author: &str,
    config: &SiteConfig,
) -> Result<()> {
    let index = load_index(data)?;
    let catalog = index.catalog_with_page_size(config.catalog.blog_page_size);
    let view = catalog.view(&args.to_query(author));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("{}. Try clearing the search or author filter.", view.summary("post"));
        return Ok(());
    }

    let rows: Vec<PostRow> = view
        .items
        .iter()
        .map(|post| PostRow {
            slug: post.slug.clone(),
            title: truncate(&post.title, 50),
            author: post.author.clone(),
            published: post.display_date(),
        })
        .collect();

    print_table(&rows);
    print_footer(&view, "post");
    Ok(())
}

fn execute_blog_show(slug: &str, data: &std::path::Path, json_output: bool) -> Result<()> {
    let index = load_index(data)?;
    let post = index
        .get(slug)
        .with_context(|| format!("Post '{slug}' not found"))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(post)?);
        return Ok(());
    }

    print_post(post);

    if let Some(neighbors) = index.neighbors(slug) {
        println!();
        if let Some(previous) = neighbors.previous {
            println!("‹ Previous: {} ({})", previous.title, previous.slug);
        }
        if let Some(next) = neighbors.next {
            println!("Next ›: {} ({})", next.title, next.slug);
        }
    }

    Ok(())
}

fn print_post(post: &BlogPost) {
    println!("{}", post.title);
    println!("{} · {}", post.author, post.display_date());
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    println!();
    println!("{}", post.description);

    for (_, block) in post.blocks() {
        println!();
        match block {
            ContentBlock::Text { body } | ContentBlock::Quote { body } => println!("{body}"),
            ContentBlock::Section { heading, body } => {
                println!("## {heading}");
                println!("{body}");
            }
            ContentBlock::Image { src, alt, caption } => {
                println!("[image: {alt}] {src}");
                if let Some(caption) = caption {
                    println!("{caption}");
                }
            }
            ContentBlock::Gallery { heading, images } => {
                if let Some(heading) = heading {
                    println!("## {heading}");
                }
                for image in images {
                    println!("  [image: {}] {}", image.alt, image.src);
                }
            }
            ContentBlock::List { heading, items } => {
                if let Some(heading) = heading {
                    println!("## {heading}");
                }
                for item in items {
                    println!("  • {item}");
                }
            }
            ContentBlock::Cta {
                heading,
                text,
                label,
                href,
            } => {
                if let Some(heading) = heading {
                    println!("## {heading}");
                }
                if !text.is_empty() {
                    println!("{text}");
                }
                println!("→ {label}: {href}");
            }
            ContentBlock::Unknown => {}
        }
    }

    let faq = post.faq_items();
    if !faq.is_empty() {
        println!();
        println!("FAQ");
        for item in faq {
            println!("  Q: {}", item.q);
            println!("  A: {}", item.a);
        }
    }
}

/// Table row for gallery listings
#[derive(Tabled)]
struct ImageRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Caption")]
    caption: String,
    #[tabled(rename = "Source")]
    src: String,
}

pub fn execute_gallery(args: GalleryArgs, config: &SiteConfig) -> Result<()> {
    let page_size = args.page_size.or(config.catalog.gallery_page_size);
    let catalog = GalleryImage::catalog(default_gallery(), page_size);
    let view = catalog.view(&args.query.to_query(&args.category));

    if args.query.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Categories: {}", view.groups.join(" | "));
    println!();

    if view.is_empty() {
        println!("{}. Try clearing the search or category filter.", view.summary("image"));
        return Ok(());
    }

    let rows: Vec<ImageRow> = view
        .items
        .iter()
        .map(|image| ImageRow {
            category: image.category.clone(),
            caption: truncate(&image.alt, 50),
            src: image.src.clone(),
        })
        .collect();

    print_table(&rows);
    print_footer(&view, "image");
    Ok(())
}

fn print_table<T: Tabled>(rows: &[T]) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
}

fn print_footer<R>(view: &CatalogView<'_, R>, noun: &str) {
    println!("{}", view.summary(noun));
    if let Some(controls) = &view.controls {
        println!("Page {} of {}   {}", controls.current, controls.total, controls.render_text());
    }
}

/// Shorten to `max` characters with a trailing ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
