//! Geographic helpers for previews opened from the places map

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_METERS: f64 = 6_371_008.8;
const METERS_PER_MILE: f64 = 1609.344;
const FEET_PER_METER: f64 = 3.28084;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance_to(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_METERS * c
    }
}

/// Unit system used for distance labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnits {
    #[default]
    Metric,
    Imperial,
}

/// Format a distance for display.
///
/// Metric: whole meters below 1 km, otherwise km with one decimal.
/// Imperial: whole feet below 0.1 mi, otherwise miles with one decimal.
pub fn format_distance(meters: f64, units: DistanceUnits) -> String {
    match units {
        DistanceUnits::Metric => {
            if meters < 1000.0 {
                format!("{} m", meters.round() as i64)
            } else {
                format!("{:.1} km", meters / 1000.0)
            }
        }
        DistanceUnits::Imperial => {
            let miles = meters / METERS_PER_MILE;
            if miles < 0.1 {
                format!("{} ft", (meters * FEET_PER_METER).round() as i64)
            } else {
                format!("{:.1} mi", miles)
            }
        }
    }
}

/// Distance label between two points.
pub fn distance_label(start: &Location, end: &Location, units: DistanceUnits) -> String {
    format_distance(start.distance_to(end), units)
}
