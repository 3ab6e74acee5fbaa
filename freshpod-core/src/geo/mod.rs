//! World map of active markets
//!
//! ```text
//! TopologySource ──fetch──> TopoJSON ──decode──> WorldTopology
//!                                                     │
//! ActivationTable ──classify──┐                       │
//!                             ▼                       ▼
//!                   MapView (hover, tooltip) ──> render_svg ──> SVG
//!                             ▲
//!              MercatorProjection (scale 140, center [20, 15])
//! ```
//!
//! The topology is fetched once. Until it resolves the renderer emits a
//! placeholder of the final size; a failed fetch renders markers over an
//! empty country layer.

mod activation;
mod projection;
mod render;
mod source;
mod topology;
mod view;

pub use activation::{
    default_entities, ActivationMeta, ActivationTable, Classification, MapEntity, Marker,
};
pub use projection::{
    GeoPoint, MercatorProjection, ScreenPoint, MAP_CENTER, MAP_HEIGHT, MAP_SCALE, MAP_WIDTH,
    MERCATOR_MAX_LAT_DEG,
};
pub use render::{country_path, render_placeholder, render_svg, RenderTarget};
pub use source::{
    load_topology, try_load_topology, FileTopologySource, HttpTopologySource,
    StaticTopologySource, TopologySource, DEFAULT_TOPOLOGY_TTL, DEFAULT_TOPOLOGY_URL,
};
pub use topology::{normalize_country_id, CountryShape, Polygon, Ring, WorldTopology};
pub use view::{MapView, TopologyState, Tooltip};
