//! Mercator projection onto the fixed map surface

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Design-surface width
pub const MAP_WIDTH: f64 = 800.0;

/// Design-surface height (2:1 aspect)
pub const MAP_HEIGHT: f64 = 400.0;

/// Pixels per radian of longitude
pub const MAP_SCALE: f64 = 140.0;

/// Geographic point drawn at the middle of the surface, `[lon, lat]`
pub const MAP_CENTER: [f64; 2] = [20.0, 15.0];

/// Mercator is undefined at the poles; clamp to the Web Mercator limit
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_78;

/// A longitude/latitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// A position on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

fn mercator_y(lat_deg: f64) -> f64 {
    let lat = lat_deg
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    (FRAC_PI_4 + 0.5 * lat).tan().ln()
}

/// Stateless Mercator projection with a fixed scale and center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorProjection {
    scale: f64,
    center: GeoPoint,
    width: f64,
    height: f64,
}

impl Default for MercatorProjection {
    fn default() -> Self {
        Self::new(
            MAP_SCALE,
            GeoPoint::new(MAP_CENTER[0], MAP_CENTER[1]),
            MAP_WIDTH,
            MAP_HEIGHT,
        )
    }
}

impl MercatorProjection {
    pub fn new(scale: f64, center: GeoPoint, width: f64, height: f64) -> Self {
        Self {
            scale,
            center,
            width,
            height,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Project a geographic point; the center lands at the middle of the surface
    pub fn project(&self, point: GeoPoint) -> ScreenPoint {
        let dx = (point.longitude - self.center.longitude).to_radians();
        let dy = mercator_y(point.latitude) - mercator_y(self.center.latitude);

        ScreenPoint {
            x: self.width * 0.5 + self.scale * dx,
            y: self.height * 0.5 - self.scale * dy,
        }
    }

    /// Map a surface position back to geographic coordinates
    pub fn invert(&self, point: ScreenPoint) -> GeoPoint {
        let lon = self.center.longitude + ((point.x - self.width * 0.5) / self.scale).to_degrees();
        let y = mercator_y(self.center.latitude) + (self.height * 0.5 - point.y) / self.scale;
        let lat = (2.0 * y.exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();

        GeoPoint::new(lon, lat)
    }

    /// Whether a projected point falls on the drawing surface
    pub fn is_visible(&self, point: ScreenPoint) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

#[cfg(test)]
mod projection_tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_center_maps_to_middle() {
        let projection = MercatorProjection::default();
        let p = projection.project(GeoPoint::new(20.0, 15.0));
        assert!(close(p.x, 400.0));
        assert!(close(p.y, 200.0));
    }

    #[test]
    fn test_east_is_right_and_north_is_up() {
        let projection = MercatorProjection::default();
        let center = projection.project(GeoPoint::new(20.0, 15.0));
        let india = projection.project(GeoPoint::new(78.9629, 20.5937));

        assert!(india.x > center.x);
        assert!(india.y < center.y);
        // 58.9629 degrees east at 140 px/rad
        assert!(close(india.x, 400.0 + 140.0 * 58.9629_f64.to_radians()));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let projection = MercatorProjection::default();
        let point = GeoPoint::new(80.7718, 7.8731);
        assert_eq!(projection.project(point), projection.project(point));
    }

    #[test]
    fn test_poles_are_clamped() {
        let projection = MercatorProjection::default();
        let north = projection.project(GeoPoint::new(0.0, 90.0));
        let limit = projection.project(GeoPoint::new(0.0, MERCATOR_MAX_LAT_DEG));
        assert!(north.y.is_finite());
        assert!(close(north.y, limit.y));
    }

    #[test]
    fn test_invert_round_trips() {
        let projection = MercatorProjection::default();
        let point = GeoPoint::new(84.124, 28.3949);
        let back = projection.invert(projection.project(point));
        assert!(close(back.longitude, point.longitude));
        assert!(close(back.latitude, point.latitude));
    }

    #[test]
    fn test_visibility() {
        let projection = MercatorProjection::default();
        assert!(projection.is_visible(projection.project(GeoPoint::new(78.9629, 20.5937))));
        assert!(!projection.is_visible(projection.project(GeoPoint::new(-170.0, 0.0))));
    }
}
