//! Routing graph representation and builder.
//!
//! # Data layout
//!
//! Edges are kept in **insertion order** and addressed by [`EdgeId`].  Two
//! derived indices sit on top:
//!
//! - a **CSR** adjacency over vertices.  Given a `VertexId v`, its outgoing
//!   edges are
//!
//!   ```text
//!   out_edges[ out_start[v] .. out_start[v+1] ]
//!   ```
//!
//! - a **name index**: every `EdgeId`, stably sorted by road name.  Address
//!   resolution binary-searches it.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `[lat, lon]` to the nearest vertex.  Used to
//! resolve bare-coordinate waypoints.

use std::sync::Arc;

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use cg_core::{Category, Dataset, EdgeId, GeoPoint, NodeIdx, NodeStore, RoadInfo, VertexId};
use cg_paths::LinePath;

use crate::{SpatialError, SpatialResult};

// ── Edge ──────────────────────────────────────────────────────────────────────

/// A directed road segment between two consecutive path nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub category: Category,
    pub source: VertexId,
    pub target: VertexId,
    /// Great-circle length in kilometres.
    pub length_km: f64,
    pub name: Option<Arc<str>>,
    pub max_speed_kmh: Option<u16>,
    pub one_way: bool,
}

// ── R-tree vertex entry ───────────────────────────────────────────────────────

#[derive(Clone)]
struct VertexEntry {
    point: [f64; 2], // [lat, lon]
    id: VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared Euclidean distance in lat/lon space, consistent with the
    /// planar metric used for street resolution.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed road graph.  Immutable after [`GraphBuilder::build`]; safe to
/// share across threads.
///
/// Construct with [`GraphBuilder`] or [`Graph::from_paths`].
pub struct Graph {
    // ── Vertex data (indexed by VertexId) ─────────────────────────────────
    /// Node-store index of each vertex.
    pub vertex_node: Vec<NodeIdx>,
    /// Position of each vertex.
    pub vertex_pos: Vec<GeoPoint>,

    // ── Edge data (indexed by EdgeId = insertion order) ───────────────────
    pub edges: Vec<Edge>,

    vertex_index: FxHashMap<NodeIdx, VertexId>,
    by_name: Vec<EdgeId>,
    out_start: Vec<u32>,
    out_edges: Vec<EdgeId>,
    spatial_idx: RTree<VertexEntry>,
}

/// Serializable content of a [`Graph`].  Indices are rebuilt on load.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphParts {
    pub vertex_node: Vec<NodeIdx>,
    pub vertex_pos: Vec<GeoPoint>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// A graph with no vertices or edges.
    pub fn empty() -> Self {
        Self::from_parts(GraphParts::default())
    }

    /// Build from the routable paths of a stitched dataset.  Road attributes
    /// come from each path's backing way.
    pub fn from_paths<'p, I>(paths: I, dataset: &Dataset) -> Self
    where
        I: IntoIterator<Item = &'p LinePath>,
    {
        let mut builder = GraphBuilder::new(dataset.nodes());
        let fallback = RoadInfo::default();
        for path in paths {
            let road = dataset.way(path.way).map(|w| &w.road).unwrap_or(&fallback);
            builder.add_line_path(path, road);
        }
        builder.build()
    }

    /// Rebuild a graph from previously exported parts.
    pub fn from_parts(parts: GraphParts) -> Self {
        let GraphParts { vertex_node, vertex_pos, edges } = parts;
        let vertex_count = vertex_node.len();

        let vertex_index = vertex_node
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, VertexId(i as u32)))
            .collect();

        // Name index: stable sort keeps insertion order among equal names.
        let mut by_name: Vec<EdgeId> = (0..edges.len()).map(|i| EdgeId(i as u32)).collect();
        by_name.sort_by(|a, b| edges[a.index()].name.cmp(&edges[b.index()].name));

        // CSR row pointer.
        let mut out_start = vec![0u32; vertex_count + 1];
        for e in &edges {
            out_start[e.source.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            out_start[i] += out_start[i - 1];
        }

        // Counting sort of edge ids by source; preserves insertion order.
        let mut cursor = out_start.clone();
        let mut out_edges = vec![EdgeId::INVALID; edges.len()];
        for (i, e) in edges.iter().enumerate() {
            let slot = &mut cursor[e.source.index()];
            out_edges[*slot as usize] = EdgeId(i as u32);
            *slot += 1;
        }

        // Bulk-load R-tree for O(N log N) construction.
        let entries: Vec<VertexEntry> = vertex_pos
            .iter()
            .enumerate()
            .map(|(i, p)| VertexEntry { point: [p.lat, p.lon], id: VertexId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Graph {
            vertex_node,
            vertex_pos,
            edges,
            vertex_index,
            by_name,
            out_start,
            out_edges,
            spatial_idx,
        }
    }

    /// Export the graph's content for persistence.
    pub fn to_parts(&self) -> GraphParts {
        GraphParts {
            vertex_node: self.vertex_node.clone(),
            vertex_pos: self.vertex_pos.clone(),
            edges: self.edges.clone(),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_node.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_node.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Vertex for a node-store index, if that node carries any edge.
    pub fn vertex_of(&self, node: NodeIdx) -> Option<VertexId> {
        self.vertex_index.get(&node).copied()
    }

    /// Like [`vertex_of`](Self::vertex_of), but an error if the node carries
    /// no edge.
    pub fn require_vertex(&self, node: NodeIdx) -> SpatialResult<VertexId> {
        self.vertex_of(node).ok_or(SpatialError::NodeNotInGraph(node))
    }

    #[inline]
    pub fn node(&self, v: VertexId) -> NodeIdx {
        self.vertex_node[v.index()]
    }

    #[inline]
    pub fn pos(&self, v: VertexId) -> GeoPoint {
        self.vertex_pos[v.index()]
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `v`.
    #[inline]
    pub fn out_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.out_start[v.index()] as usize;
        let end   = self.out_start[v.index() + 1] as usize;
        self.out_edges[start..end].iter().copied()
    }

    #[inline]
    pub fn out_degree(&self, v: VertexId) -> usize {
        (self.out_start[v.index() + 1] - self.out_start[v.index()]) as usize
    }

    /// Every edge id, sorted by road name (unnamed edges first).
    pub fn edges_by_name(&self) -> &[EdgeId] {
        &self.by_name
    }

    /// Position in [`edges_by_name`](Self::edges_by_name) of some edge named
    /// `name`, found by binary search.
    pub fn find_name(&self, name: &str) -> Option<usize> {
        self.by_name
            .binary_search_by(|e| self.edge(*e).name.as_deref().cmp(&Some(name)))
            .ok()
    }

    /// Nearest vertex to `pos` in planar lat/lon distance.
    pub fn snap_to_vertex(&self, pos: GeoPoint) -> Option<VertexId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertex_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Vertices are created lazily, the first time a node appears on an edge,
/// so the finished graph has no isolated vertices.
///
/// # Example
///
/// ```
/// use cg_core::{Category, Node, NodeId, NodeStore, RoadInfo, WayId};
/// use cg_paths::LinePath;
/// use cg_spatial::GraphBuilder;
///
/// let store = NodeStore::from_nodes([Node::new(1, 55.0, 12.0), Node::new(2, 55.01, 12.0)]).unwrap();
/// let path = LinePath::materialize(WayId(1), &[NodeId(1), NodeId(2)], Category::Road, false, &store);
///
/// let mut b = GraphBuilder::new(&store);
/// b.add_line_path(&path, &RoadInfo::default());
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // two-way
/// ```
pub struct GraphBuilder<'s> {
    store:        &'s NodeStore,
    vertex_index: FxHashMap<NodeIdx, VertexId>,
    vertex_node:  Vec<NodeIdx>,
    vertex_pos:   Vec<GeoPoint>,
    edges:        Vec<Edge>,
}

impl<'s> GraphBuilder<'s> {
    pub fn new(store: &'s NodeStore) -> Self {
        Self {
            store,
            vertex_index: FxHashMap::default(),
            vertex_node:  Vec::new(),
            vertex_pos:   Vec::new(),
            edges:        Vec::new(),
        }
    }

    /// Vertex for `node`, creating it on first sight.  `None` if the node
    /// does not resolve in the store.
    pub fn vertex(&mut self, node: NodeIdx) -> Option<VertexId> {
        if let Some(&v) = self.vertex_index.get(&node) {
            return Some(v);
        }
        let pos = self.store.pos(node)?;
        let v = VertexId(self.vertex_node.len() as u32);
        self.vertex_index.insert(node, v);
        self.vertex_node.push(node);
        self.vertex_pos.push(pos);
        Some(v)
    }

    /// Add a **directed** edge.
    pub fn add_directed_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Emit edges for every consecutive node pair of `path`: one forward,
    /// plus one reverse unless `road` is one-way.  Pairs with an unresolved
    /// node are skipped.  Returns the number of edges added.
    pub fn add_line_path(&mut self, path: &LinePath, road: &RoadInfo) -> usize {
        let name: Option<Arc<str>> = road.name.as_deref().map(Arc::from);
        let before = self.edges.len();

        for pair in path.nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if !a.is_valid() || !b.is_valid() {
                continue;
            }
            let (Some(pa), Some(pb)) = (self.store.pos(a), self.store.pos(b)) else { continue };
            let (Some(va), Some(vb)) = (self.vertex(a), self.vertex(b)) else { continue };

            let length_km = pa.distance_km(pb);
            let edge = Edge {
                category: path.category,
                source: va,
                target: vb,
                length_km,
                name: name.clone(),
                max_speed_kmh: road.max_speed_kmh,
                one_way: road.one_way,
            };
            let reverse = (!road.one_way).then(|| Edge { source: vb, target: va, ..edge.clone() });
            self.edges.push(edge);
            self.edges.extend(reverse);
        }
        self.edges.len() - before
    }

    pub fn vertex_count(&self) -> usize { self.vertex_node.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// Time complexity: O(E log E) for the name sort + O(N log N) for the
    /// R-tree bulk load, where N = vertices, E = edges.
    pub fn build(self) -> Graph {
        Graph::from_parts(GraphParts {
            vertex_node: self.vertex_node,
            vertex_pos:  self.vertex_pos,
            edges:       self.edges,
        })
    }
}
