//! Geographic coordinate type, bounding rectangles, and distance helpers.
//!
//! Coordinates are `f64`.  Route lengths are summed over thousands of edges
//! and the resolution step compares tiny planar offsets, so the extra
//! precision is worth the memory.

/// Mean Earth radius in kilometres used by [`GeoPoint::distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Euclidean distance in raw degree space.
    ///
    /// Only meaningful for ranking candidates that are close together; used
    /// by address resolution.
    #[inline]
    pub fn planar_distance(self, other: GeoPoint) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lon = self.lon - other.lon;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }

    /// Coordinate along `axis`.
    #[inline]
    pub fn coord(self, axis: Axis) -> f64 {
        match axis {
            Axis::Lon => self.lon,
            Axis::Lat => self.lat,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Axis ──────────────────────────────────────────────────────────────────────

/// Partition axis of the spatial index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Lon,
    Lat,
}

impl Axis {
    /// The other axis.  Splits alternate lon → lat → lon …
    #[inline]
    pub fn next(self) -> Axis {
        match self {
            Axis::Lon => Axis::Lat,
            Axis::Lat => Axis::Lon,
        }
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned latitude/longitude rectangle.  Edges are inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Rect {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    /// The empty rectangle: contains nothing, and is the identity for
    /// [`union`](Self::union) and [`expand`](Self::expand).
    pub const EMPTY: Rect = Rect {
        min_lat: f64::INFINITY,
        max_lat: f64::NEG_INFINITY,
        min_lon: f64::INFINITY,
        max_lon: f64::NEG_INFINITY,
    };

    /// Smallest rectangle containing every point.  Empty input gives
    /// [`Rect::EMPTY`].
    pub fn from_points<I: IntoIterator<Item = GeoPoint>>(points: I) -> Self {
        points.into_iter().fold(Rect::EMPTY, Rect::expand)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lon > self.max_lon
    }

    /// Grow to include `p`.
    #[inline]
    pub fn expand(self, p: GeoPoint) -> Rect {
        Rect {
            min_lat: self.min_lat.min(p.lat),
            max_lat: self.max_lat.max(p.lat),
            min_lon: self.min_lon.min(p.lon),
            max_lon: self.max_lon.max(p.lon),
        }
    }

    pub fn union(self, other: Rect) -> Rect {
        Rect {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lon: self.min_lon.min(other.min_lon),
            max_lon: self.max_lon.max(other.max_lon),
        }
    }

    /// `true` if the rectangles share at least one point.  Empty rectangles
    /// intersect nothing.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
            && self.min_lon <= other.max_lon
            && other.min_lon <= self.max_lon
    }

    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.min_lat && p.lat <= self.max_lat && p.lon >= self.min_lon && p.lon <= self.max_lon
    }

    #[inline]
    pub fn min(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Lon => self.min_lon,
            Axis::Lat => self.min_lat,
        }
    }

    #[inline]
    pub fn max(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Lon => self.max_lon,
            Axis::Lat => self.max_lat,
        }
    }

    /// Midpoint along `axis`.
    #[inline]
    pub fn center(&self, axis: Axis) -> f64 {
        (self.min(axis) + self.max(axis)) * 0.5
    }

    /// Cut along `axis` at `at`, returning the (low, high) halves.  Both
    /// halves include the split line.
    pub fn split(&self, axis: Axis, at: f64) -> (Rect, Rect) {
        let mut low = *self;
        let mut high = *self;
        match axis {
            Axis::Lon => {
                low.max_lon = at;
                high.min_lon = at;
            }
            Axis::Lat => {
                low.max_lat = at;
                high.min_lat = at;
            }
        }
        (low, high)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::EMPTY
    }
}
