//! Vehicle classes used to filter graph edges during routing.
//!
//! Routing always minimises distance; the vehicle only decides which road
//! categories are usable.  Speeds are used to estimate a travel time for a
//! finished route.

use crate::Category;

/// The means of travel for a route query.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vehicle {
    /// Private motor vehicle.
    #[default]
    Car,
    /// Bicycle.
    Bike,
    /// On foot.
    Walk,
}

impl Vehicle {
    /// Whether an edge of `category` may be traversed by this vehicle.
    #[inline]
    pub fn can_traverse(self, category: Category) -> bool {
        match self {
            Vehicle::Car  => matches!(category, Category::Motorway | Category::Road),
            Vehicle::Bike => matches!(category, Category::Road | Category::Cycleway),
            Vehicle::Walk => matches!(category, Category::Road | Category::Footway),
        }
    }

    /// Assumed cruising speed in km/h on a road of `category` when the road
    /// carries no usable speed limit.
    pub fn default_speed_kmh(self, category: Category) -> f64 {
        match (self, category) {
            (Vehicle::Car, Category::Motorway) => 110.0,
            (Vehicle::Car, _)                  => 50.0,
            (Vehicle::Bike, _)                 => 16.0,
            (Vehicle::Walk, _)                 => 5.0,
        }
    }

    /// Effective speed in km/h: cars follow a posted limit when one exists;
    /// bikes and pedestrians never exceed their own pace.
    pub fn speed_kmh(self, category: Category, limit_kmh: Option<u16>) -> f64 {
        let pace = self.default_speed_kmh(category);
        match (self, limit_kmh) {
            (Vehicle::Car, Some(limit)) if limit > 0 => f64::from(limit),
            (_, Some(limit)) if limit > 0 => pace.min(f64::from(limit)),
            _ => pace,
        }
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Vehicle::Car  => "car",
            Vehicle::Bike => "bike",
            Vehicle::Walk => "walk",
        }
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Vehicle {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car"  => Ok(Vehicle::Car),
            "bike" | "bicycle" => Ok(Vehicle::Bike),
            "walk" | "foot"    => Ok(Vehicle::Walk),
            other => Err(crate::CoreError::Parse(format!("unknown vehicle `{other}`"))),
        }
    }
}
