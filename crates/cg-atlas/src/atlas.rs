//! The built, query-ready map and its swap handle.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, trace};

use cg_core::{Category, Dataset, GeoPoint, Rect, VertexId, Vehicle};
use cg_paths::{LinePath, PathCollection, StitchError};
use cg_spatial::{AddressBook, DijkstraRouter, Graph, KdTree, Route, Router, Waypoint, resolve};

use crate::{AtlasConfig, AtlasResult};

// ── Trip ──────────────────────────────────────────────────────────────────────

/// A resolved route query.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub from:    VertexId,
    pub to:      VertexId,
    pub vehicle: Vehicle,
    pub route:   Route,
    /// Estimated from edge speed limits and the vehicle's pace.
    pub duration_hours: f64,
}

impl Trip {
    pub fn distance_km(&self) -> f64 {
        self.route.distance_km
    }

    /// Polyline of the route, from the source vertex to the destination.
    pub fn positions(&self, graph: &Graph) -> Vec<GeoPoint> {
        let mut out = Vec::with_capacity(self.route.edges.len() + 1);
        out.push(graph.pos(self.from));
        out.extend(self.route.edges.iter().map(|&e| graph.pos(graph.edge(e).target)));
        out
    }
}

// ── Atlas ─────────────────────────────────────────────────────────────────────

/// Stitched paths, the road graph, and per-category spatial indexes built
/// from one [`Dataset`].
///
/// Immutable once built; share it behind an `Arc` or an [`AtlasHandle`].
/// All queries take `&self` and keep their working state local.
pub struct Atlas<R: Router = DijkstraRouter> {
    pub(crate) dataset:   Dataset,
    pub(crate) config:    AtlasConfig,
    pub(crate) paths:     PathCollection,
    pub(crate) issues:    Vec<StitchError>,
    pub(crate) graph:     Graph,
    pub(crate) indexes:   BTreeMap<Category, KdTree>,
    pub(crate) addresses: AddressBook,
    pub(crate) router:    R,
}

impl<R: Router> Atlas<R> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn paths(&self) -> &PathCollection {
        &self.paths
    }

    /// Every path of `category`.
    pub fn paths_of(&self, category: Category) -> &[LinePath] {
        self.paths.get(category)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    /// Non-fatal problems met while stitching.
    pub fn stitch_issues(&self) -> &[StitchError] {
        &self.issues
    }

    /// Spatial index of `category`; `None` for unindexed or absent
    /// categories.
    pub fn index(&self, category: Category) -> Option<&KdTree> {
        self.indexes.get(&category)
    }

    // ── Range queries ─────────────────────────────────────────────────────

    /// Paths of `category` whose bounding box intersects `area`.
    ///
    /// Indexed categories answer through their KD-tree; unindexed ones are
    /// scanned.  Either way the result holds each path at most once, in
    /// collection order.
    pub fn range_query(&self, category: Category, area: &Rect) -> Vec<&LinePath> {
        let paths = self.paths.get(category);
        match self.indexes.get(&category) {
            Some(index) => index.query_items(paths, area),
            None => {
                trace!("{category} is unindexed; scanning {} paths", paths.len());
                paths.iter().filter(|p| p.bbox.intersects(area)).collect()
            }
        }
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Route between two free-text addresses.
    ///
    /// Both texts are looked up in the address book, then resolved to graph
    /// vertices by street name.  A lookup or resolution miss is
    /// `AddressNotFound`; a disconnected pair is `Unreachable`.
    pub fn route(&self, from: &str, to: &str, vehicle: Vehicle) -> AtlasResult<Trip> {
        let src = self.addresses.lookup(from)?;
        let dst = self.addresses.lookup(to)?;
        debug!("route `{src}` → `{dst}` by {vehicle}");
        self.route_between(Waypoint::from(src), Waypoint::from(dst), vehicle)
    }

    pub fn route_between(
        &self,
        from:    Waypoint<'_>,
        to:      Waypoint<'_>,
        vehicle: Vehicle,
    ) -> AtlasResult<Trip> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        let route = self.router.route(&self.graph, from, to, vehicle)?;
        let duration_hours = route.duration_hours(&self.graph, vehicle);
        Ok(Trip { from, to, vehicle, route, duration_hours })
    }

    /// Resolve a waypoint with this atlas' configured window.
    pub fn resolve(&self, waypoint: Waypoint<'_>) -> AtlasResult<VertexId> {
        Ok(resolve(&self.graph, waypoint, self.config.resolve_window)?)
    }

    /// Answer many queries.  Results line up with `queries`.  With the
    /// `parallel` feature the batch runs on Rayon's thread pool.
    pub fn route_many(
        &self,
        queries: &[(Waypoint<'_>, Waypoint<'_>)],
        vehicle: Vehicle,
    ) -> Vec<AtlasResult<Trip>> {
        #[cfg(not(feature = "parallel"))]
        {
            queries
                .iter()
                .map(|&(from, to)| self.route_between(from, to, vehicle))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            queries
                .par_iter()
                .map(|&(from, to)| self.route_between(from, to, vehicle))
                .collect()
        }
    }
}

impl<R: Router> std::fmt::Debug for Atlas<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Atlas")
            .field("paths", &self.paths.len())
            .field("graph", &self.graph)
            .field("indexes", &self.indexes.keys().collect::<Vec<_>>())
            .field("addresses", &self.addresses.len())
            .finish()
    }
}

// ── AtlasHandle ───────────────────────────────────────────────────────────────

/// Shared access to the current [`Atlas`], replaceable as a whole.
///
/// Readers take a cheap `Arc` snapshot with [`load`](Self::load) and keep
/// using it for as long as they like; a rebuild publishes a new atlas
/// without disturbing them.  There is no way to mutate an atlas in place.
pub struct AtlasHandle<R: Router = DijkstraRouter> {
    current: RwLock<Arc<Atlas<R>>>,
}

impl<R: Router> AtlasHandle<R> {
    pub fn new(atlas: Atlas<R>) -> Self {
        Self { current: RwLock::new(Arc::new(atlas)) }
    }

    /// Snapshot of the current atlas.
    pub fn load(&self) -> Arc<Atlas<R>> {
        // The lock only guards an `Arc` swap; a panicking writer cannot leave
        // it half-updated.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publish `atlas`, returning the one it replaces.
    pub fn replace(&self, atlas: Atlas<R>) -> Arc<Atlas<R>> {
        let next = Arc::new(atlas);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

impl<R: Router> From<Atlas<R>> for AtlasHandle<R> {
    fn from(atlas: Atlas<R>) -> Self {
        Self::new(atlas)
    }
}
