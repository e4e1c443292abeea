use serde::{Deserialize, Serialize};

use crate::object::serde_object;

/// A point on the map.
///
/// Two locations are equal when their `(longitude, latitude,
/// horizontal_accuracy)` tuples are equal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    longitude: f64,
    latitude: f64,
    /// Radius of uncertainty in meters, 0-1500 (not checked locally).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    horizontal_accuracy: Option<f64>,
}

serde_object!(Location => "location");

impl Location {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            horizontal_accuracy: None,
        }
    }

    pub fn with_horizontal_accuracy(mut self, meters: f64) -> Self {
        self.horizontal_accuracy = Some(meters);
        self
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn horizontal_accuracy(&self) -> Option<f64> {
        self.horizontal_accuracy
    }

    pub fn id(&self) -> (f64, f64, Option<f64>) {
        (self.longitude, self.latitude, self.horizontal_accuracy)
    }

    /// Google Maps link for this point.
    pub fn link(&self) -> String {
        format!(
            "https://maps.google.com/maps?q=loc:{},{}",
            self.longitude, self.latitude
        )
    }
}
