//! 2-D KD-tree over bounding boxes, for viewport range queries.
//!
//! # Build
//!
//! Starting from a root rectangle, each node splits along alternating axes
//! (longitude first) at the median of its items' box centres.  An item goes
//! to every child whose half it touches, so items straddling the split line
//! sit in both subtrees.  A node becomes a leaf when it holds at most
//! `leaf_capacity` items, reaches `max_depth`, or the split would not
//! separate anything (every item lands on both sides).
//!
//! # Query
//!
//! Descend only into children whose rectangle intersects the query; at each
//! leaf test the held boxes directly.  Results are item indices, sorted and
//! deduplicated.
//!
//! Nodes live in a flat arena and reference each other by index.

use log::debug;

use cg_core::geo::Axis;
use cg_core::Rect;
use cg_paths::LinePath;

/// Tuning knobs for [`KdTree::build`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexConfig {
    /// A node holding this many items or fewer is not split.
    pub leaf_capacity: usize,
    /// Hard limit on tree depth.
    pub max_depth: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { leaf_capacity: 8, max_depth: 24 }
    }
}

/// Anything with a bounding box.
pub trait Bounded {
    fn bbox(&self) -> Rect;
}

impl Bounded for LinePath {
    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Bounded for Rect {
    fn bbox(&self) -> Rect {
        *self
    }
}

impl<T: Bounded> Bounded for &T {
    fn bbox(&self) -> Rect {
        (**self).bbox()
    }
}

// ── Tree ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Cell {
    Leaf { items: Vec<u32> },
    Split { axis: Axis, median: f64, low: u32, high: u32 },
}

#[derive(Clone, Debug)]
struct KdNode {
    rect: Rect,
    cell: Cell,
}

/// Immutable spatial index over a slice of [`Bounded`] items.
///
/// The tree stores only indices into the slice it was built from, plus a
/// copy of each item's box.  Items with an empty box (no resolved geometry)
/// are never returned.
#[derive(Clone, Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    boxes: Vec<Rect>,
    depth: usize,
}

impl KdTree {
    /// Build over `items`.  The root rectangle is `bounds` grown to cover
    /// every item box, so geometry outside the nominal bounds stays
    /// reachable.
    pub fn build<T: Bounded>(items: &[T], bounds: Rect, config: &IndexConfig) -> Self {
        let boxes: Vec<Rect> = items.iter().map(Bounded::bbox).collect();
        let live: Vec<u32> = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .map(|(i, _)| i as u32)
            .collect();

        let root = live.iter().fold(bounds, |r, &i| r.union(boxes[i as usize]));

        let mut tree = KdTree { nodes: Vec::new(), boxes, depth: 0 };
        tree.split(root, live, Axis::Lon, 0, config);
        debug!(
            "kd-tree: {} items, {} nodes, depth {}",
            tree.boxes.len(),
            tree.nodes.len(),
            tree.depth
        );
        tree
    }

    /// Recursively build the subtree for `items` inside `rect`; returns its
    /// arena index.
    fn split(
        &mut self,
        rect:   Rect,
        items:  Vec<u32>,
        axis:   Axis,
        depth:  usize,
        config: &IndexConfig,
    ) -> u32 {
        self.depth = self.depth.max(depth);
        let id = self.nodes.len() as u32;

        if items.len() <= config.leaf_capacity || depth >= config.max_depth {
            self.nodes.push(KdNode { rect, cell: Cell::Leaf { items } });
            return id;
        }

        let median = self.median(&items, axis).clamp(rect.min(axis), rect.max(axis));
        let (low_items, high_items): (Vec<u32>, Vec<u32>) = (
            items.iter().copied().filter(|&i| self.boxes[i as usize].min(axis) <= median).collect(),
            items.iter().copied().filter(|&i| self.boxes[i as usize].max(axis) >= median).collect(),
        );

        if low_items.len() == items.len() && high_items.len() == items.len() {
            self.nodes.push(KdNode { rect, cell: Cell::Leaf { items } });
            return id;
        }

        // Reserve the slot so children get higher indices.
        self.nodes.push(KdNode { rect, cell: Cell::Leaf { items: Vec::new() } });

        let (low_rect, high_rect) = rect.split(axis, median);
        let low  = self.split(low_rect, low_items, axis.next(), depth + 1, config);
        let high = self.split(high_rect, high_items, axis.next(), depth + 1, config);

        self.nodes[id as usize].cell = Cell::Split { axis, median, low, high };
        id
    }

    fn median(&self, items: &[u32], axis: Axis) -> f64 {
        let mut centers: Vec<f64> = items
            .iter()
            .map(|&i| self.boxes[i as usize].center(axis))
            .collect();
        centers.sort_unstable_by(f64::total_cmp);
        centers[centers.len() / 2]
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Indices of every item whose box intersects `area`, ascending.
    pub fn query(&self, area: &Rect) -> Vec<usize> {
        let mut out = Vec::new();
        if self.nodes.is_empty() || area.is_empty() {
            return out;
        }

        let mut stack = vec![0u32];
        while let Some(n) = stack.pop() {
            let node = &self.nodes[n as usize];
            if !node.rect.intersects(area) {
                continue;
            }
            match &node.cell {
                Cell::Leaf { items } => out.extend(
                    items
                        .iter()
                        .map(|&i| i as usize)
                        .filter(|&i| self.boxes[i].intersects(area)),
                ),
                Cell::Split { low, high, .. } => {
                    stack.push(*high);
                    stack.push(*low);
                }
            }
        }

        out.sort_unstable();
        out.dedup();
        out
    }

    /// As [`query`](Self::query), resolved against the slice the tree was
    /// built from.
    ///
    /// # Panics
    ///
    /// If `items` is shorter than the slice passed to [`build`](Self::build).
    pub fn query_items<'a, T>(&self, items: &'a [T], area: &Rect) -> Vec<&'a T> {
        self.query(area).into_iter().map(|i| &items[i]).collect()
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// Number of items the tree was built over, including unindexed ones.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest level reached during the build; the root is depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Root rectangle.
    pub fn bounds(&self) -> Rect {
        self.nodes.first().map(|n| n.rect).unwrap_or(Rect::EMPTY)
    }

    /// Split line of the root, if the root was split.
    pub fn root_split(&self) -> Option<(Axis, f64)> {
        match self.nodes.first()?.cell {
            Cell::Split { axis, median, .. } => Some((axis, median)),
            Cell::Leaf { .. } => None,
        }
    }
}
