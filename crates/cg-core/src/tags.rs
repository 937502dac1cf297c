//! Tag-derived way and relation attributes.
//!
//! The parsing layer hands over raw `(key, value)` pairs; everything the core
//! needs from them is extracted here once, at entity construction.

/// Road attributes carried from a way onto every graph edge built from it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadInfo {
    /// `name=*`, if present.
    pub name: Option<String>,
    /// `maxspeed=*` in km/h.  Values in mph are converted.
    pub max_speed_kmh: Option<u16>,
    /// Traffic may only follow the way's node order.
    pub one_way: bool,
}

impl RoadInfo {
    pub fn from_tags(tags: &[(&str, &str)]) -> Self {
        let highway = tag(tags, "highway");
        Self {
            name:          tag(tags, "name").map(str::to_owned),
            max_speed_kmh: tag(tags, "maxspeed").and_then(parse_max_speed),
            one_way:       is_one_way(highway.unwrap_or(""), tags),
        }
    }
}

/// First value for `key`.
pub fn tag<'a>(tags: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// `type=multipolygon`.
pub fn is_multipolygon(tags: &[(&str, &str)]) -> bool {
    tag(tags, "type") == Some("multipolygon")
}

/// Parse `maxspeed` values such as `"50"`, `"50 km/h"` or `"30 mph"`.
/// Symbolic values (`"none"`, `"walk"`, `"DE:urban"`) yield `None`.
pub fn parse_max_speed(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    let digits_end = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    let value: u16 = raw[..digits_end].parse().ok()?;
    let unit = raw[digits_end..].trim();
    match unit {
        "" | "km/h" | "kmh" | "kph" => Some(value),
        "mph" => Some((f64::from(value) * 1.609_344).round() as u16),
        _ => None,
    }
}

/// `oneway=-1`: traffic runs against the way's node order.
pub fn is_reverse_one_way(tags: &[(&str, &str)]) -> bool {
    tag(tags, "oneway") == Some("-1")
}

/// Determine whether a way is one-way.
///
/// Motorways are implicitly one-way in OSM convention.  `oneway=-1` counts
/// too; [`Way::from_tags`](crate::Way::from_tags) flips the node order so the
/// permitted direction is always first → last.
fn is_one_way(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = matches!(tag(tags, "oneway"), Some("yes" | "1" | "true" | "-1"));
    let implicit = matches!(highway, "motorway" | "motorway_link");
    explicit || implicit
}
