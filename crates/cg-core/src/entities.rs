//! Input data model: nodes, ways, relations, and the dataset that owns them.
//!
//! # Ownership
//!
//! Nodes live in a single [`NodeStore`] arena.  Ways reference them by
//! [`NodeId`]; derived structures (line paths, graph vertices) reference them
//! by the dense [`NodeIdx`] the store hands out.  Nothing holds a copy of a
//! node, so "same node" is always an id comparison.
//!
//! # Sort invariants
//!
//! [`Dataset::new`] sorts ways by id and each relation's member list by id.
//! Member lookup is a binary search and relies on both.

use rustc_hash::FxHashMap;

use crate::tags::{self, RoadInfo};
use crate::{Category, CoreError, CoreResult, GeoPoint, NodeId, NodeIdx, Rect, RelationId, WayId};

// ── Node ──────────────────────────────────────────────────────────────────────

/// A map point.  Immutable once created.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub pos: GeoPoint,
}

impl Node {
    pub fn new(id: i64, lat: f64, lon: f64) -> Self {
        Self { id: id.into(), pos: GeoPoint::new(lat, lon) }
    }
}

// ── NodeStore ─────────────────────────────────────────────────────────────────

/// Arena of nodes with an id → index map.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeStore {
    nodes: Vec<Node>,
    index: FxHashMap<NodeId, NodeIdx>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
            index: FxHashMap::with_capacity_and_hasher(n, Default::default()),
        }
    }

    /// Build a store from any node source, rejecting duplicate ids.
    pub fn from_nodes<I: IntoIterator<Item = Node>>(nodes: I) -> CoreResult<Self> {
        let iter = nodes.into_iter();
        let mut store = Self::with_capacity(iter.size_hint().0);
        for node in iter {
            store.insert(node)?;
        }
        Ok(store)
    }

    /// Add a node and return its arena index.
    pub fn insert(&mut self, node: Node) -> CoreResult<NodeIdx> {
        if self.index.contains_key(&node.id) {
            return Err(CoreError::DuplicateNode(node.id));
        }
        let idx = NodeIdx(self.nodes.len() as u32);
        self.index.insert(node.id, idx);
        self.nodes.push(node);
        Ok(idx)
    }

    /// Arena index of `id`, or [`NodeIdx::INVALID`] if the node is unknown.
    #[inline]
    pub fn resolve(&self, id: NodeId) -> NodeIdx {
        self.index.get(&id).copied().unwrap_or(NodeIdx::INVALID)
    }

    /// The node at `idx`.  `None` for `INVALID` or out-of-range indices.
    #[inline]
    pub fn get(&self, idx: NodeIdx) -> Option<&Node> {
        self.nodes.get(idx.index())
    }

    #[inline]
    pub fn pos(&self, idx: NodeIdx) -> Option<GeoPoint> {
        self.get(idx).map(|n| n.pos)
    }

    pub fn by_id(&self, id: NodeId) -> Option<&Node> {
        self.get(self.resolve(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }
}

// ── Way ───────────────────────────────────────────────────────────────────────

/// An ordered chain of node ids with tag-derived attributes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Way {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
    pub category: Category,
    pub road: RoadInfo,
    pub multipolygon: bool,
}

impl Way {
    pub fn new(id: i64, nodes: Vec<NodeId>, category: Category) -> Self {
        Self {
            id: id.into(),
            nodes,
            category,
            road: RoadInfo::default(),
            multipolygon: false,
        }
    }

    /// Build a way from raw tags.
    ///
    /// `oneway=-1` ways are stored reversed so that a one-way way always
    /// permits travel first → last.
    pub fn from_tags(id: i64, mut nodes: Vec<NodeId>, tags: &[(&str, &str)]) -> Self {
        if tags::is_reverse_one_way(tags) {
            nodes.reverse();
        }
        Self {
            id: id.into(),
            nodes,
            category: Category::classify(tags.iter().copied()),
            road: RoadInfo::from_tags(tags),
            multipolygon: tags::is_multipolygon(tags),
        }
    }

    pub fn with_road(mut self, road: RoadInfo) -> Self {
        self.road = road;
        self
    }

    pub fn with_multipolygon(mut self, multipolygon: bool) -> Self {
        self.multipolygon = multipolygon;
        self
    }

    #[inline]
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

// ── Relation ──────────────────────────────────────────────────────────────────

/// A tagged group of member ways.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    pub id: RelationId,
    pub category: Category,
    pub name: Option<String>,
    pub multipolygon: bool,
    pub members: Vec<WayId>,
}

impl Relation {
    pub fn new(id: i64, category: Category, members: Vec<WayId>) -> Self {
        Self {
            id: id.into(),
            category,
            name: None,
            multipolygon: false,
            members,
        }
    }

    /// Build a relation from raw tags.  Only way members are passed in; node
    /// and relation members carry no geometry the stitcher uses.
    pub fn from_tags(id: i64, members: Vec<WayId>, tags: &[(&str, &str)]) -> Self {
        Self {
            id: id.into(),
            category: Category::classify(tags.iter().copied()),
            name: tags::tag(tags, "name").map(str::to_owned),
            multipolygon: tags::is_multipolygon(tags),
            members,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_multipolygon(mut self, multipolygon: bool) -> Self {
        self.multipolygon = multipolygon;
        self
    }

    /// `true` when the relation's name starts with `prefix`.  Coastline
    /// regions are recognised this way rather than by tag.
    pub fn name_starts_with(&self, prefix: &str) -> bool {
        self.name.as_deref().is_some_and(|n| n.starts_with(prefix))
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Everything the build pipeline consumes, with sort invariants established.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    nodes: NodeStore,
    ways: Vec<Way>,
    relations: Vec<Relation>,
    bounds: Rect,
}

impl Dataset {
    /// Validate and normalise the inputs.
    ///
    /// - ways are sorted by id; duplicate way ids are rejected
    /// - every relation's member list is sorted by id
    /// - `bounds` must be a finite, non-empty rectangle
    pub fn new(
        nodes:     NodeStore,
        mut ways:  Vec<Way>,
        mut relations: Vec<Relation>,
        bounds:    Rect,
    ) -> CoreResult<Self> {
        let finite = [bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon]
            .iter()
            .all(|v| v.is_finite());
        if !finite || bounds.is_empty() {
            return Err(CoreError::InvalidBounds(format!("{bounds:?}")));
        }

        ways.sort_by_key(|w| w.id);
        if let Some(dup) = ways.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(CoreError::DuplicateWay(dup[0].id));
        }

        for relation in &mut relations {
            relation.members.sort_unstable();
        }

        Ok(Self { nodes, ways, relations, bounds })
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    /// Ways, sorted by id.
    pub fn ways(&self) -> &[Way] {
        &self.ways
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Binary-search the id-sorted way collection.
    pub fn way(&self, id: WayId) -> Option<&Way> {
        self.ways
            .binary_search_by_key(&id, |w| w.id)
            .ok()
            .map(|i| &self.ways[i])
    }
}
