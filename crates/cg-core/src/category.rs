//! Tag-derived classification of ways and relations.
//!
//! Classification is total: anything not recognised becomes
//! [`Category::Unknown`] rather than an error.

/// The closed set of path categories.
///
/// The first four variants form the road family; they are the only
/// categories the graph builder looks at.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Motorway,
    Road,
    Cycleway,
    Footway,
    Coastline,
    Forest,
    Farmland,
    Building,
    Meadow,
    Heath,
    Place,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Motorway,
        Category::Road,
        Category::Cycleway,
        Category::Footway,
        Category::Coastline,
        Category::Forest,
        Category::Farmland,
        Category::Building,
        Category::Meadow,
        Category::Heath,
        Category::Place,
        Category::Unknown,
    ];

    /// Classify a tag list.  When several tags match, the strongest wins
    /// (`highway` > coastline > `building` > land cover > `place`), so a way
    /// tagged both `highway` and `building` is a road.
    pub fn classify<'a, I>(tags: I) -> Category
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut best = Category::Unknown;
        let mut best_rank = usize::MAX;

        for (key, value) in tags {
            let Some((rank, cat)) = classify_tag(key, value) else { continue };
            if rank < best_rank {
                best = cat;
                best_rank = rank;
            }
        }
        best
    }

    /// Whether this category renders as a filled polygon.  Stitched coastline
    /// rings outline land masses, so they fill too.
    pub fn fill(self) -> bool {
        matches!(
            self,
            Category::Coastline
                | Category::Forest
                | Category::Farmland
                | Category::Building
                | Category::Meadow
                | Category::Heath
        )
    }

    /// Road family member: its paths feed the routing graph.
    #[inline]
    pub fn is_routable(self) -> bool {
        matches!(
            self,
            Category::Motorway | Category::Road | Category::Cycleway | Category::Footway
        )
    }

    /// Multipolygon ring category: relation members are concatenated in id
    /// order without endpoint matching.
    #[inline]
    pub fn is_ring(self) -> bool {
        matches!(self, Category::Building | Category::Meadow | Category::Heath)
    }

    /// Areal boundary category: relation members are stitched by endpoint.
    #[inline]
    pub fn is_boundary(self) -> bool {
        matches!(self, Category::Forest | Category::Farmland)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Motorway  => "motorway",
            Category::Road      => "road",
            Category::Cycleway  => "cycleway",
            Category::Footway   => "footway",
            Category::Coastline => "coastline",
            Category::Forest    => "forest",
            Category::Farmland  => "farmland",
            Category::Building  => "building",
            Category::Meadow    => "meadow",
            Category::Heath     => "heath",
            Category::Place     => "place",
            Category::Unknown   => "unknown",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank and category for a single tag.  Lower rank wins.
fn classify_tag(key: &str, value: &str) -> Option<(usize, Category)> {
    let cat = match (key, value) {
        ("highway", v) => return highway_category(v).map(|c| (0, c)),
        ("natural", "coastline")              => (1, Category::Coastline),
        ("building", _)                       => (2, Category::Building),
        ("landuse", "forest") | ("natural", "wood") => (3, Category::Forest),
        ("landuse", "farmland")               => (3, Category::Farmland),
        ("landuse", "meadow")                 => (3, Category::Meadow),
        ("natural", "heath")                  => (3, Category::Heath),
        ("place", _)                          => (4, Category::Place),
        _ => return None,
    };
    Some(cat)
}

/// Road sub-category for a `highway=*` value, or `None` for values that do
/// not describe a way (e.g. `highway=bus_stop` on a stray way).
fn highway_category(value: &str) -> Option<Category> {
    match value {
        "motorway" | "motorway_link" | "trunk" | "trunk_link" => Some(Category::Motorway),
        "primary" | "primary_link" | "secondary" | "secondary_link"
        | "tertiary" | "tertiary_link" | "residential" | "unclassified"
        | "living_street" | "service" | "road" => Some(Category::Road),
        "cycleway" => Some(Category::Cycleway),
        "footway" | "pedestrian" | "path" | "steps" | "track" => Some(Category::Footway),
        _ => None,
    }
}
