//! Stitched, render/route-ready geometry.

use std::collections::BTreeMap;

use cg_core::{Category, GeoPoint, NodeId, NodeIdx, NodeStore, Rect, Way, WayId};

// ── LinePath ──────────────────────────────────────────────────────────────────

/// A category-tagged chain of nodes derived from one or more ways.
///
/// `nodes` holds arena indices resolved from the backing node-id sequence.
/// Ids the store does not know become [`NodeIdx::INVALID`] so that positions
/// stay aligned with the source sequence; consumers skip them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinePath {
    pub category: Category,
    pub fill: bool,
    pub multipolygon: bool,
    /// The way this path was built from.  For merged paths, the lowest id
    /// among the contributing ways.
    pub way: WayId,
    pub nodes: Vec<NodeIdx>,
    /// Bounding box of the resolved nodes.  Empty if none resolved.
    pub bbox: Rect,
}

impl LinePath {
    /// Resolve `node_ids` against `store` and build a path.
    pub fn materialize(
        way:          WayId,
        node_ids:     &[NodeId],
        category:     Category,
        multipolygon: bool,
        store:        &NodeStore,
    ) -> Self {
        let nodes: Vec<NodeIdx> = node_ids.iter().map(|&id| store.resolve(id)).collect();
        let bbox = Rect::from_points(nodes.iter().filter_map(|&idx| store.pos(idx)));
        Self {
            category,
            fill: category.fill(),
            multipolygon,
            way,
            nodes,
            bbox,
        }
    }

    /// A standalone way, taken as-is.
    pub fn from_way(way: &Way, store: &NodeStore) -> Self {
        Self::materialize(way.id, &way.nodes, way.category, way.multipolygon, store)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First and last node coincide.
    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 2 && self.nodes.first() == self.nodes.last()
    }

    /// Positions of the resolved nodes, in order.
    pub fn positions<'a>(&'a self, store: &'a NodeStore) -> impl Iterator<Item = GeoPoint> + 'a {
        self.nodes.iter().filter_map(move |&idx| store.pos(idx))
    }
}

// ── PathCollection ────────────────────────────────────────────────────────────

/// Line paths grouped by category, in deterministic category order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCollection {
    by_category: BTreeMap<Category, Vec<LinePath>>,
}

impl PathCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: LinePath) {
        self.by_category.entry(path.category).or_default().push(path);
    }

    /// Paths of `category`; empty if none were produced.
    pub fn get(&self, category: Category) -> &[LinePath] {
        self.by_category.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories that hold at least one path.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.by_category.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[LinePath])> + '_ {
        self.by_category.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// Every path in a road-family category.
    pub fn routable(&self) -> impl Iterator<Item = &LinePath> + '_ {
        self.by_category
            .iter()
            .filter(|(c, _)| c.is_routable())
            .flat_map(|(_, v)| v.iter())
    }

    /// Total number of paths across all categories.
    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.values().all(Vec::is_empty)
    }
}
