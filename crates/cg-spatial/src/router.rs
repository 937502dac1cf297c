//! Waypoint resolution, the routing trait, and the default Dijkstra engine.
//!
//! # Resolution
//!
//! A street waypoint resolves by binary-searching the graph's name index,
//! scanning a fixed window of positions around the hit for edges with the
//! same name, and picking the target vertex closest (planar lat/lon) to the
//! waypoint's coordinate.  The window makes this an approximation: a very
//! long street with more edges than the window holds may not yield its
//! globally closest vertex.
//!
//! # Cost units
//!
//! Edge cost is great-circle length in kilometres.  The vehicle class only
//! filters which edges are usable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use cg_core::{EdgeId, GeoPoint, VertexId, Vehicle};

use crate::address::Address;
use crate::graph::Graph;
use crate::{SpatialError, SpatialResult};

/// Positions scanned on each side of a name-index hit.
pub const DEFAULT_RESOLVE_WINDOW: usize = 500;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    /// Sum of the edge lengths.
    pub distance_km: f64,
}

impl Route {
    /// `true` if source and destination are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Estimated travel time.  Cars follow posted limits where present;
    /// otherwise each vehicle's default pace applies.
    pub fn duration_hours(&self, graph: &Graph, vehicle: Vehicle) -> f64 {
        self.edges
            .iter()
            .map(|&e| {
                let edge = graph.edge(e);
                edge.length_km / vehicle.speed_kmh(edge.category, edge.max_speed_kmh)
            })
            .sum()
    }
}

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// Something a route can start or end at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waypoint<'a> {
    /// A street name plus a coordinate on or near it.
    Street { name: &'a str, pos: GeoPoint },
    /// A bare coordinate; resolves to the nearest vertex.
    Position(GeoPoint),
}

impl<'a> From<&'a Address> for Waypoint<'a> {
    fn from(a: &'a Address) -> Self {
        Waypoint::Street { name: &a.street, pos: a.pos }
    }
}

/// Resolve a waypoint to a graph vertex.
pub fn resolve(graph: &Graph, waypoint: Waypoint<'_>, window: usize) -> SpatialResult<VertexId> {
    match waypoint {
        Waypoint::Street { name, pos } => resolve_street(graph, name, pos, window),
        Waypoint::Position(pos) => graph.snap_to_vertex(pos).ok_or(SpatialError::EmptyGraph),
    }
}

/// Street-name resolution; see the module docs.
pub fn resolve_street(
    graph:  &Graph,
    street: &str,
    pos:    GeoPoint,
    window: usize,
) -> SpatialResult<VertexId> {
    let not_found = || SpatialError::AddressNotFound(street.to_owned());
    let hit = graph.find_name(street).ok_or_else(not_found)?;

    let by_name = graph.edges_by_name();
    let lo = hit.saturating_sub(window);
    let hi = hit.saturating_add(window).saturating_add(1).min(by_name.len());

    let best = by_name[lo..hi]
        .iter()
        .map(|&e| graph.edge(e))
        .filter(|edge| edge.name.as_deref() == Some(street))
        .map(|edge| (edge.target, graph.pos(edge.target).planar_distance(pos)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(v, _)| v)
        .ok_or_else(not_found)?;

    trace!("resolved `{street}` near {pos} to {best}");
    Ok(best)
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; a single router is shared by
/// concurrent queries.  Per-query working state must live inside
/// [`route`](Self::route), never in `self`.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to` for the given vehicle.
    ///
    /// `from == to` yields an empty route rather than an error.
    fn route(
        &self,
        graph:   &Graph,
        from:    VertexId,
        to:      VertexId,
        vehicle: Vehicle,
    ) -> SpatialResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra over the CSR graph, minimising distance.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph:   &Graph,
        from:    VertexId,
        to:      VertexId,
        vehicle: Vehicle,
    ) -> SpatialResult<Route> {
        dijkstra(graph, from, to, vehicle)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap entry ordered so that `BinaryHeap` pops the smallest cost first.
/// Ties break on vertex id for determinism.
#[derive(Copy, Clone, PartialEq)]
struct Frontier {
    cost:   f64,
    vertex: VertexId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(
    graph:   &Graph,
    from:    VertexId,
    to:      VertexId,
    vehicle: Vehicle,
) -> SpatialResult<Route> {
    let n = graph.vertex_count();
    for v in [from, to] {
        if v.index() >= n {
            return Err(SpatialError::UnknownVertex(v));
        }
    }
    if from == to {
        return Ok(Route { edges: vec![], distance_km: 0.0 });
    }

    // dist[v] = best known distance to v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; INVALID for unreached vertices.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { cost: 0.0, vertex: from });

    while let Some(Frontier { cost, vertex }) = heap.pop() {
        if vertex == to {
            break;
        }

        // Skip stale heap entries.
        if cost > dist[vertex.index()] {
            continue;
        }

        for e in graph.out_edges(vertex) {
            let edge = graph.edge(e);
            if !vehicle.can_traverse(edge.category) {
                continue;
            }
            let next = edge.target;
            let new_cost = cost + edge.length_km;

            if new_cost < dist[next.index()] {
                dist[next.index()] = new_cost;
                prev_edge[next.index()] = e;
                heap.push(Frontier { cost: new_cost, vertex: next });
            }
        }
    }

    let total = dist[to.index()];
    if total.is_infinite() {
        debug!("{from} → {to} unreachable for {vehicle}");
        return Err(SpatialError::Unreachable { from, to, distance: f64::INFINITY });
    }

    Ok(Route { edges: reconstruct(graph, &prev_edge, from, to), distance_km: total })
}

/// Walk back from `to` along recorded edges until `from` is reached.  At
/// each step the edge's far end is whichever of its source/target is not
/// the current vertex.
fn reconstruct(graph: &Graph, prev_edge: &[EdgeId], from: VertexId, to: VertexId) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        if !e.is_valid() {
            break;
        }
        edges.push(e);
        let edge = graph.edge(e);
        cur = if edge.target == cur { edge.source } else { edge.target };
    }
    edges.reverse();
    edges
}
