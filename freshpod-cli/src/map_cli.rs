//! World map commands

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use freshpod_core::config::SiteConfig;
use freshpod_core::geo::{
    render_svg, try_load_topology, ActivationTable, FileTopologySource, GeoPoint,
    HttpTopologySource, MapView, RenderTarget, TopologySource,
};

/// Map subcommand
#[derive(Parser, Debug)]
pub struct MapCommand {
    #[clap(subcommand)]
    pub command: MapSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MapSubcommand {
    /// Render the map as SVG
    Render {
        /// Write the SVG here instead of stdout
        #[clap(long, short)]
        out: Option<PathBuf>,

        /// Render as if the pointer is over this country id
        #[clap(long)]
        hover: Option<String>,

        /// Render the server-side placeholder
        #[clap(long)]
        server: bool,

        /// Read the topology from a local TopoJSON file
        #[clap(long)]
        topology: Option<PathBuf>,

        /// Force refresh of the cached topology
        #[clap(long)]
        refresh: bool,
    },

    /// Show whether a country is an active market
    Classify {
        /// Numeric ISO-3166 country code, e.g. 356
        country_id: String,
    },

    /// Project a longitude/latitude onto the map surface
    Project {
        #[clap(allow_hyphen_values = true)]
        longitude: f64,

        #[clap(allow_hyphen_values = true)]
        latitude: f64,
    },

    /// List the configured markers
    Markers,
}

impl MapCommand {
    /// Only `render` reads the site config
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        match self.command {
            MapSubcommand::Render {
                out,
                hover,
                server,
                topology,
                refresh,
            } => {
                let config = crate::load_config(config_path)?;
                execute_render(&config, out, hover, server, topology, refresh).await
            }
            MapSubcommand::Classify { country_id } => execute_classify(&country_id),
            MapSubcommand::Project {
                longitude,
                latitude,
            } => execute_project(longitude, latitude),
            MapSubcommand::Markers => execute_markers(),
        }
    }
}

fn topology_source(
    config: &SiteConfig,
    path: Option<PathBuf>,
    refresh: bool,
) -> Result<Box<dyn TopologySource>> {
    if let Some(path) = path {
        return Ok(Box::new(FileTopologySource::new(path)));
    }

    let cache = SiteConfig::file_cache().context("Failed to locate cache directory")?;
    Ok(Box::new(
        HttpTopologySource::new(config.map.topology_url.clone())
            .with_cache(cache, config.map.cache_ttl())
            .with_refresh(refresh),
    ))
}

async fn execute_render(
    config: &SiteConfig,
    out: Option<PathBuf>,
    hover: Option<String>,
    server: bool,
    topology: Option<PathBuf>,
    refresh: bool,
) -> Result<()> {
    let mut view = MapView::new(ActivationTable::default());

    let target = if server {
        RenderTarget::Server
    } else {
        let source = topology_source(config, topology, refresh)?;
        let world = match try_load_topology(source.as_ref()).await {
            Ok(world) => Some(world),
            Err(e) => {
                tracing::warn!(source = source.name(), "World topology unavailable: {}", e);
                None
            }
        };
        view.resolve_topology(world);
        RenderTarget::Viewport
    };

    if let Some(id) = hover.as_deref() {
        view.pointer_enter(id);
    }

    let svg = render_svg(&view, target);

    match out {
        Some(path) => {
            std::fs::write(&path, &svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote map ({} countries, {} markers) to {}",
                view.countries().len(),
                view.table().markers().count(),
                path.display()
            );
        }
        None => println!("{svg}"),
    }

    Ok(())
}

fn execute_classify(country_id: &str) -> Result<()> {
    let table = ActivationTable::default();
    let class = table.classify(country_id);

    match class.meta {
        Some(meta) => {
            println!("{} {} (active)", meta.glyph, meta.label);
            println!("{}", meta.description);
        }
        None => println!("{country_id}: not an active market"),
    }

    Ok(())
}

fn execute_project(longitude: f64, latitude: f64) -> Result<()> {
    let view = MapView::default();
    let projection = view.projection();
    let point = projection.project(GeoPoint::new(longitude, latitude));

    let visible = if projection.is_visible(point) {
        "visible"
    } else {
        "off surface"
    };
    println!("x = {:.2}, y = {:.2} ({visible})", point.x, point.y);

    Ok(())
}

/// Table row for marker listings
#[derive(Tabled)]
struct MarkerRow {
    #[tabled(rename = "Marker")]
    label: String,
    #[tabled(rename = "Lon")]
    longitude: String,
    #[tabled(rename = "Lat")]
    latitude: String,
    #[tabled(rename = "x")]
    x: String,
    #[tabled(rename = "y")]
    y: String,
}

fn execute_markers() -> Result<()> {
    let view = MapView::default();
    let projection = view.projection();

    let rows: Vec<MarkerRow> = view
        .table()
        .markers()
        .map(|marker| {
            let p = projection.project(marker.position());
            MarkerRow {
                label: format!("{} {}", marker.icon_glyph, marker.label),
                longitude: format!("{:.4}", marker.longitude),
                latitude: format!("{:.4}", marker.latitude),
                x: format!("{:.1}", p.x),
                y: format!("{:.1}", p.y),
            }
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
    Ok(())
}
