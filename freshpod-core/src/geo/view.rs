//! Interactive map state: topology load status and the hover tooltip

use serde::Serialize;

use super::activation::{ActivationMeta, ActivationTable};
use super::projection::{MercatorProjection, ScreenPoint};
use super::topology::{normalize_country_id, CountryShape, WorldTopology};

/// Where the topology load stands
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TopologyState {
    /// Fetch not resolved yet; render the placeholder
    #[default]
    Pending,
    Ready(WorldTopology),
    /// Fetch failed; render an empty country layer
    Unavailable,
}

/// Tooltip content shown at the bottom center of the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub glyph: String,
    pub label: String,
    pub description: String,
}

impl From<&ActivationMeta> for Tooltip {
    fn from(meta: &ActivationMeta) -> Self {
        Self {
            glyph: meta.glyph.clone(),
            label: meta.label.clone(),
            description: meta.description.clone(),
        }
    }
}

impl Tooltip {
    /// Headline line: glyph then label
    pub fn headline(&self) -> String {
        format!("{} {}", self.glyph, self.label)
    }
}

/// Map component state
#[derive(Debug, Clone, Default)]
pub struct MapView {
    table: ActivationTable,
    projection: MercatorProjection,
    topology: TopologyState,
    hovered: Option<String>,
    tooltip: Option<Tooltip>,
}

impl MapView {
    pub fn new(table: ActivationTable) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    pub fn with_projection(mut self, projection: MercatorProjection) -> Self {
        self.projection = projection;
        self
    }

    pub fn table(&self) -> &ActivationTable {
        &self.table
    }

    pub fn projection(&self) -> &MercatorProjection {
        &self.projection
    }

    pub fn topology(&self) -> &TopologyState {
        &self.topology
    }

    /// Countries to draw; empty while pending or after a failed load
    pub fn countries(&self) -> &[CountryShape] {
        match &self.topology {
            TopologyState::Ready(world) => world.countries(),
            _ => &[],
        }
    }

    /// Resolve the topology load
    ///
    /// `None` marks the fetch as failed; the map keeps rendering markers
    /// over an empty country layer.
    pub fn resolve_topology(&mut self, topology: Option<WorldTopology>) {
        self.topology = match topology {
            Some(world) => {
                tracing::debug!(countries = world.len(), "map topology ready");
                TopologyState::Ready(world)
            }
            None => {
                tracing::debug!("map topology unavailable, rendering empty layer");
                TopologyState::Unavailable
            }
        };
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.topology, TopologyState::Pending)
    }

    /// Pointer moved onto a country
    ///
    /// Active countries take over the tooltip slot. Moving onto an inactive
    /// country clears it, since the pointer has left the previous shape.
    pub fn pointer_enter(&mut self, country_id: &str) {
        let class = self.table.classify(country_id);
        self.tooltip = class.meta.map(Tooltip::from);
        self.hovered = Some(normalize_country_id(country_id));
        tracing::trace!(country_id, active = class.active, "map pointer enter");
    }

    /// Pointer left a country
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
        self.tooltip = None;
    }

    /// Country currently under the pointer, active or not
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Fixed tooltip anchor: bottom center of the surface
    pub fn tooltip_anchor(&self) -> ScreenPoint {
        ScreenPoint {
            x: self.projection.width() * 0.5,
            y: self.projection.height() - 20.0,
        }
    }
}
