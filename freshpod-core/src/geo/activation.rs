//! Activation table: which countries are live markets, and their markers

use serde::{Deserialize, Serialize};

use super::projection::GeoPoint;
use super::topology::normalize_country_id;

/// Tooltip metadata for an active country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationMeta {
    pub label: String,
    pub glyph: String,
    pub description: String,
}

/// A labeled point pin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub longitude: f64,
    pub latitude: f64,
    pub label: String,
    pub icon_glyph: String,
}

impl Marker {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }
}

/// Static per-country map configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntity {
    /// Numeric ISO-3166 code as a string
    pub country_id: String,

    #[serde(default)]
    pub marker: Option<Marker>,

    /// Present when the country renders in the active style and is hoverable
    #[serde(default)]
    pub activation: Option<ActivationMeta>,
}

/// Result of looking up a country in the activation table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    pub active: bool,
    pub meta: Option<&'a ActivationMeta>,
}

impl Classification<'_> {
    const INACTIVE: Self = Classification {
        active: false,
        meta: None,
    };
}

/// Lookup table from country id to activation and marker
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationTable {
    entities: Vec<MapEntity>,
}

impl Default for ActivationTable {
    fn default() -> Self {
        Self::new(default_entities())
    }
}

impl ActivationTable {
    /// Build a table, normalizing every country id
    pub fn new(entities: Vec<MapEntity>) -> Self {
        let entities = entities
            .into_iter()
            .map(|mut entity| {
                entity.country_id = normalize_country_id(&entity.country_id);
                entity
            })
            .collect();

        Self { entities }
    }

    pub fn entities(&self) -> &[MapEntity] {
        &self.entities
    }

    pub fn get(&self, country_id: &str) -> Option<&MapEntity> {
        let id = normalize_country_id(country_id);
        self.entities.iter().find(|e| e.country_id == id)
    }

    /// Classify a country; unknown ids are inactive
    pub fn classify(&self, country_id: &str) -> Classification<'_> {
        match self.get(country_id).and_then(|e| e.activation.as_ref()) {
            Some(meta) => Classification {
                active: true,
                meta: Some(meta),
            },
            None => Classification::INACTIVE,
        }
    }

    /// Markers in table order
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.entities.iter().filter_map(|e| e.marker.as_ref())
    }

    /// Number of active countries
    pub fn active_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.activation.is_some())
            .count()
    }
}

fn entity(
    country_id: &str,
    label: &str,
    glyph: &str,
    description: &str,
    longitude: f64,
    latitude: f64,
) -> MapEntity {
    MapEntity {
        country_id: country_id.to_string(),
        marker: Some(Marker {
            longitude,
            latitude,
            label: label.to_string(),
            icon_glyph: glyph.to_string(),
        }),
        activation: Some(ActivationMeta {
            label: label.to_string(),
            glyph: glyph.to_string(),
            description: description.to_string(),
        }),
    }
}

/// India, Nepal and Sri Lanka, with a pin at each country's centroid
pub fn default_entities() -> Vec<MapEntity> {
    vec![
        entity(
            "356",
            "India",
            "🇮🇳",
            "Headquartered · 12+ distributors · 6 states",
            78.9629,
            20.5937,
        ),
        entity(
            "524",
            "Nepal",
            "🇳🇵",
            "Active · Kathmandu & key urban centres",
            84.1240,
            28.3949,
        ),
        entity(
            "144",
            "Sri Lanka",
            "🇱🇰",
            "Active · Colombo · Western Province",
            80.7718,
            7.8731,
        ),
    ]
}

#[cfg(test)]
mod activation_tests {
    use super::*;

    #[test]
    fn test_classify_active_country() {
        let table = ActivationTable::default();
        let class = table.classify("356");

        assert!(class.active);
        let meta = class.meta.unwrap();
        assert_eq!(meta.label, "India");
        assert_eq!(meta.glyph, "🇮🇳");
        assert_eq!(meta.description, "Headquartered · 12+ distributors · 6 states");
    }

    #[test]
    fn test_classify_inactive_country() {
        let table = ActivationTable::default();
        let class = table.classify("840");

        assert!(!class.active);
        assert!(class.meta.is_none());
    }

    #[test]
    fn test_classify_normalizes_ids() {
        let table = ActivationTable::new(vec![MapEntity {
            country_id: "40".to_string(),
            marker: None,
            activation: Some(ActivationMeta {
                label: "Austria".to_string(),
                glyph: "AT".to_string(),
                description: "Pilot".to_string(),
            }),
        }]);

        assert!(table.classify("040").active);
        assert!(table.classify("40").active);
        assert_eq!(table.markers().count(), 0);
    }

    #[test]
    fn test_default_markers() {
        let table = ActivationTable::default();
        let labels: Vec<&str> = table.markers().map(|m| m.label.as_str()).collect();

        assert_eq!(labels, vec!["India", "Nepal", "Sri Lanka"]);
        assert_eq!(table.active_count(), 3);

        let nepal = table.get("524").and_then(|e| e.marker.as_ref()).unwrap();
        assert_eq!(nepal.position(), GeoPoint::new(84.1240, 28.3949));
    }
}
