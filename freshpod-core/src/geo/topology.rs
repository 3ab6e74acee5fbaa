//! TopoJSON decoding into per-country polygons
//!
//! The world map consumes the public `world-atlas` country collection. In
//! TopoJSON, shared borders are stored once as "arcs"; geometries list arc
//! indices, with a negative index `!i` meaning arc `i` walked backwards. When
//! the topology is quantized, arc positions are delta-encoded integers that
//! the `transform` maps back to degrees.

use serde::Deserialize;
use std::collections::HashMap;

use super::projection::GeoPoint;
use crate::error::TopologyError;

/// Object holding the country geometries in `world-atlas`
pub const COUNTRIES_OBJECT: &str = "countries";

/// A closed ring of coordinates
pub type Ring = Vec<GeoPoint>;

/// Exterior ring followed by any holes
pub type Polygon = Vec<Ring>;

/// One country's outline
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShape {
    /// Numeric ISO-3166 code as a string, normalized to three digits
    pub id: String,

    /// Display name from the topology properties
    pub name: Option<String>,

    pub polygons: Vec<Polygon>,
}

/// Decoded country collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldTopology {
    countries: Vec<CountryShape>,
}

#[derive(Debug, Deserialize)]
struct RawTopology {
    #[serde(default)]
    transform: Option<RawTransform>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    objects: HashMap<String, RawGeometry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawTransform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    /// Geometry type; TopoJSON allows `null` for an empty geometry
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    geometries: Vec<RawGeometry>,
    #[serde(default)]
    arcs: serde_json::Value,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    properties: Option<RawProperties>,
}

enum RawShape<'a> {
    GeometryCollection(&'a [RawGeometry]),
    Polygon(Vec<Vec<i64>>),
    MultiPolygon(Vec<Vec<Vec<i64>>>),
    /// Null geometries, points and lines carry no country area
    Other,
}

impl RawGeometry {
    fn shape(&self) -> Result<RawShape<'_>, TopologyError> {
        let parse = |source| TopologyError::Parse { source };

        Ok(match self.kind.as_deref() {
            Some("GeometryCollection") => RawShape::GeometryCollection(&self.geometries),
            Some("Polygon") => {
                RawShape::Polygon(Vec::<Vec<i64>>::deserialize(&self.arcs).map_err(parse)?)
            }
            Some("MultiPolygon") => RawShape::MultiPolygon(
                Vec::<Vec<Vec<i64>>>::deserialize(&self.arcs).map_err(parse)?,
            ),
            _ => RawShape::Other,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    #[serde(default)]
    name: Option<String>,
}

/// Normalize a numeric country code to its three-digit form
///
/// `"4"`, `"004"` and `4` all become `"004"`. Non-numeric ids pass through
/// trimmed.
pub fn normalize_country_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<u16>() {
        Ok(code) => format!("{code:03}"),
        Err(_) => trimmed.to_string(),
    }
}

fn id_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(normalize_country_id(s)),
        serde_json::Value::Number(n) => Some(normalize_country_id(&n.to_string())),
        _ => None,
    }
}

/// Arcs decoded to absolute coordinates
struct ArcTable {
    arcs: Vec<Vec<GeoPoint>>,
}

impl ArcTable {
    fn decode(raw: &[Vec<Vec<f64>>], transform: Option<RawTransform>) -> Self {
        let arcs = raw
            .iter()
            .map(|arc| {
                let mut x = 0.0;
                let mut y = 0.0;
                arc.iter()
                    .filter(|position| position.len() >= 2)
                    .map(|position| match transform {
                        Some(t) => {
                            x += position[0];
                            y += position[1];
                            GeoPoint::new(
                                x * t.scale[0] + t.translate[0],
                                y * t.scale[1] + t.translate[1],
                            )
                        }
                        None => GeoPoint::new(position[0], position[1]),
                    })
                    .collect()
            })
            .collect();

        Self { arcs }
    }

    /// Stitch a ring from arc references, dropping each shared joint point
    fn ring(&self, indices: &[i64]) -> Result<Ring, TopologyError> {
        let mut ring: Ring = Vec::new();

        for &index in indices {
            let (arc_index, reversed) = if index < 0 {
                (!index, true)
            } else {
                (index, false)
            };

            let arc = usize::try_from(arc_index)
                .ok()
                .and_then(|i| self.arcs.get(i))
                .ok_or(TopologyError::ArcOutOfRange {
                    index,
                    available: self.arcs.len(),
                })?;

            if !ring.is_empty() {
                ring.pop();
            }
            if reversed {
                ring.extend(arc.iter().rev().copied());
            } else {
                ring.extend(arc.iter().copied());
            }
        }

        Ok(ring)
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Polygon, TopologyError> {
        rings.iter().map(|ring| self.ring(ring)).collect()
    }
}

impl WorldTopology {
    /// Topology with no countries (fetch failed or not yet loaded)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build directly from decoded shapes
    pub fn from_countries(countries: Vec<CountryShape>) -> Self {
        Self { countries }
    }

    /// Decode the `countries` object of a TopoJSON document
    pub fn from_topojson(content: &str) -> Result<Self, TopologyError> {
        Self::from_topojson_object(content, COUNTRIES_OBJECT)
    }

    /// Decode a named object of a TopoJSON document
    pub fn from_topojson_object(content: &str, object: &str) -> Result<Self, TopologyError> {
        let raw: RawTopology =
            serde_json::from_str(content).map_err(|source| TopologyError::Parse { source })?;

        let root = raw
            .objects
            .get(object)
            .ok_or_else(|| TopologyError::MissingObject {
                name: object.to_string(),
            })?;

        let arcs = ArcTable::decode(&raw.arcs, raw.transform);
        let mut countries = Vec::new();
        collect_countries(root, &arcs, &mut countries)?;

        tracing::debug!(
            countries = countries.len(),
            arcs = raw.arcs.len(),
            "decoded world topology"
        );

        Ok(Self { countries })
    }

    pub fn countries(&self) -> &[CountryShape] {
        &self.countries
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Look up a country by (normalized) id
    pub fn country(&self, id: &str) -> Option<&CountryShape> {
        let id = normalize_country_id(id);
        self.countries.iter().find(|c| c.id == id)
    }
}

fn collect_countries(
    geometry: &RawGeometry,
    arcs: &ArcTable,
    out: &mut Vec<CountryShape>,
) -> Result<(), TopologyError> {
    let polygons = match geometry.shape()? {
        RawShape::GeometryCollection(geometries) => {
            for child in geometries {
                collect_countries(child, arcs, out)?;
            }
            return Ok(());
        }
        RawShape::Polygon(rings) => vec![arcs.polygon(&rings)?],
        RawShape::MultiPolygon(polygons) => polygons
            .iter()
            .map(|rings| arcs.polygon(rings))
            .collect::<Result<Vec<_>, _>>()?,
        RawShape::Other => return Ok(()),
    };

    // Shapes without an id cannot be classified; keep them as muted land
    let id = geometry
        .id
        .as_ref()
        .and_then(id_to_string)
        .unwrap_or_default();

    out.push(CountryShape {
        id,
        name: geometry.properties.as_ref().and_then(|p| p.name.clone()),
        polygons,
    });

    Ok(())
}
