//! SVG rendering of the world map

use super::activation::Marker;
use super::projection::{MercatorProjection, ScreenPoint};
use super::topology::CountryShape;
use super::view::{MapView, Tooltip};

pub const BACKGROUND_FILL: &str = "#0f1729";
pub const ACTIVE_FILL: &str = "#6cebf9";
pub const ACTIVE_HOVER_FILL: &str = "#99f5ffff";
pub const INACTIVE_FILL: &str = "#1e2d4a";
pub const INACTIVE_HOVER_FILL: &str = "#243352";
pub const INACTIVE_OPACITY: f64 = 0.7;
pub const BORDER_STROKE: &str = "#0f1729";
pub const BORDER_WIDTH: f64 = 0.4;
pub const MARKER_FILL: &str = "#27c0d1ff";

/// Marker dot radius
pub const MARKER_RADIUS: f64 = 5.0;

/// Resting radius of the pulse ring
pub const PULSE_RADIUS: f64 = 10.0;

/// One full pulse cycle
pub const PULSE_DURATION: &str = "2.5s";

/// Where the map is being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderTarget {
    /// Pre-rendered markup with no viewport; only the placeholder is emitted
    Server,
    /// Interactive viewport; the full map once the topology has resolved
    #[default]
    Viewport,
}

/// Render the map for a target
///
/// The placeholder keeps the final dimensions so the page does not shift
/// when the map arrives.
pub fn render_svg(view: &MapView, target: RenderTarget) -> String {
    if target == RenderTarget::Server || view.is_pending() {
        return render_placeholder(view.projection());
    }

    let projection = view.projection();
    let mut svg = open_svg(projection);

    svg.push_str(&format!(
        r#"<rect class="map-background" width="{}" height="{}" fill="{BACKGROUND_FILL}"/>"#,
        projection.width(),
        projection.height()
    ));
    svg.push('\n');

    svg.push_str(r#"<g class="countries">"#);
    svg.push('\n');
    for country in view.countries() {
        svg.push_str(&render_country(view, country));
    }
    svg.push_str("</g>\n");

    svg.push_str(r#"<g class="markers">"#);
    svg.push('\n');
    for marker in view.table().markers() {
        svg.push_str(&render_marker(projection, marker));
    }
    svg.push_str("</g>\n");

    svg.push_str(&render_legend(projection));

    if let Some(tooltip) = view.tooltip() {
        svg.push_str(&render_tooltip(tooltip, view.tooltip_anchor()));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Pulsing block with the dimensions of the finished map
pub fn render_placeholder(projection: &MercatorProjection) -> String {
    let mut svg = open_svg(projection);
    svg.push_str(&format!(
        concat!(
            r#"<rect class="map-placeholder" width="{}" height="{}" rx="24" fill="{}">"#,
            r#"<animate attributeName="opacity" values="1;0.5;1" dur="2s" repeatCount="indefinite"/>"#,
            "</rect>\n"
        ),
        projection.width(),
        projection.height(),
        BACKGROUND_FILL
    ));
    svg.push_str("</svg>\n");
    svg
}

fn open_svg(projection: &MercatorProjection) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = projection.width(),
        h = projection.height()
    );
    svg.push('\n');
    svg.push_str(&format!(
        "<style>.country{{outline:none}}.country.active:hover{{fill:{ACTIVE_HOVER_FILL};cursor:pointer}}.country.inactive:hover{{fill:{INACTIVE_HOVER_FILL}}}</style>\n"
    ));
    svg
}

fn render_country(view: &MapView, country: &CountryShape) -> String {
    let path = country_path(view.projection(), country);
    if path.is_empty() {
        return String::new();
    }

    let class = view.table().classify(&country.id);
    let hovered = view.hovered() == Some(country.id.as_str());

    let (state, fill, opacity) = match (class.active, hovered) {
        (true, false) => ("active", ACTIVE_FILL, 1.0),
        (true, true) => ("active", ACTIVE_HOVER_FILL, 1.0),
        (false, false) => ("inactive", INACTIVE_FILL, INACTIVE_OPACITY),
        (false, true) => ("inactive", INACTIVE_HOVER_FILL, INACTIVE_OPACITY),
    };

    let title = match (class.meta, &country.name) {
        (Some(meta), _) => format!("<title>{}</title>", escape_xml(&meta.label)),
        (None, Some(name)) => format!("<title>{}</title>", escape_xml(name)),
        (None, None) => String::new(),
    };

    format!(
        r#"<path class="country {state}" data-id="{}" d="{path}" fill="{fill}" fill-opacity="{opacity}" stroke="{BORDER_STROKE}" stroke-width="{BORDER_WIDTH}">{title}</path>"#,
        escape_xml(&country.id)
    ) + "\n"
}

/// SVG path data for every ring of a country
pub fn country_path(projection: &MercatorProjection, country: &CountryShape) -> String {
    let mut d = String::new();

    for ring in country.polygons.iter().flatten() {
        if ring.len() < 3 {
            continue;
        }
        for (i, point) in ring.iter().enumerate() {
            let p = projection.project(*point);
            let command = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{command}{:.2},{:.2}", p.x, p.y));
        }
        d.push('Z');
    }

    d
}

fn render_marker(projection: &MercatorProjection, marker: &Marker) -> String {
    let p = projection.project(marker.position());

    format!(
        concat!(
            r#"<g class="marker" transform="translate({:.2},{:.2})">"#,
            "<title>{}</title>",
            r##"<circle r="{MARKER_RADIUS}" fill="{MARKER_FILL}" stroke="#fff" stroke-width="1.5" opacity="0.9"/>"##,
            r#"<circle r="{PULSE_RADIUS}" fill="{MARKER_FILL}" opacity="0.25">"#,
            r#"<animate attributeName="r" values="6;14;6" dur="{PULSE_DURATION}" repeatCount="indefinite"/>"#,
            r#"<animate attributeName="opacity" values="0.4;0;0.4" dur="{PULSE_DURATION}" repeatCount="indefinite"/>"#,
            "</circle></g>\n"
        ),
        p.x,
        p.y,
        escape_xml(&format!("{} {}", marker.icon_glyph, marker.label)),
        MARKER_RADIUS = MARKER_RADIUS,
        MARKER_FILL = MARKER_FILL,
        PULSE_RADIUS = PULSE_RADIUS,
        PULSE_DURATION = PULSE_DURATION,
    )
}

fn render_legend(projection: &MercatorProjection) -> String {
    let x = projection.width() - 130.0;

    format!(
        concat!(
            r##"<g class="legend" font-size="11" fill="#ffffff" fill-opacity="0.7">"##,
            r#"<rect x="{x}" y="16" width="10" height="10" rx="2" fill="{active}"/>"#,
            r#"<text x="{tx}" y="25">Active markets</text>"#,
            r#"<rect x="{x}" y="34" width="10" height="10" rx="2" fill="{inactive}"/>"#,
            r#"<text x="{tx}" y="43">Other regions</text>"#,
            "</g>\n"
        ),
        x = x,
        tx = x + 16.0,
        active = MARKER_FILL,
        inactive = INACTIVE_FILL,
    )
}

fn render_tooltip(tooltip: &Tooltip, anchor: ScreenPoint) -> String {
    format!(
        concat!(
            r#"<g class="tooltip" text-anchor="middle" pointer-events="none">"#,
            r##"<rect x="{rx:.2}" y="{ry:.2}" width="260" height="52" rx="16" fill="#ffffff" fill-opacity="0.1" stroke="#ffffff" stroke-opacity="0.2"/>"##,
            r##"<text x="{x:.2}" y="{hy:.2}" font-size="16" font-weight="bold" fill="#ffffff">{headline}</text>"##,
            r##"<text x="{x:.2}" y="{dy:.2}" font-size="11" fill="#ffffff" fill-opacity="0.7">{description}</text>"##,
            "</g>\n"
        ),
        rx = anchor.x - 130.0,
        ry = anchor.y - 52.0,
        x = anchor.x,
        hy = anchor.y - 30.0,
        dy = anchor.y - 12.0,
        headline = escape_xml(&tooltip.headline()),
        description = escape_xml(&tooltip.description),
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
