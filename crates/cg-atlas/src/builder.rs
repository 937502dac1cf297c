//! Fluent builder for constructing an [`Atlas`].

use std::collections::BTreeMap;

use log::{debug, info};

use cg_core::{Category, Dataset, Node, NodeStore, Rect, Relation, Way};
use cg_paths::{PathCollection, Stitcher};
use cg_spatial::{AddressBook, DijkstraRouter, Graph, KdTree, Router};

use crate::{Atlas, AtlasConfig, AtlasResult};

/// Fluent builder for [`Atlas<R>`].
///
/// # Required inputs
///
/// - a [`Dataset`] (or raw nodes/ways/relations via [`from_raw`](Self::from_raw))
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                   |
/// |-------------------|---------------------------|
/// | `.config(c)`      | `AtlasConfig::default()`  |
/// | `.addresses(b)`   | empty `AddressBook`       |
/// | `.router(r)`      | `DijkstraRouter`          |
///
/// # Example
///
/// ```rust,ignore
/// let atlas = AtlasBuilder::new(dataset)
///     .addresses(book)
///     .build()?;
/// let trip = atlas.route("Nørregade 4", "Vestergade 12", Vehicle::Bike)?;
/// ```
pub struct AtlasBuilder<R: Router = DijkstraRouter> {
    dataset:   Dataset,
    config:    AtlasConfig,
    addresses: Option<AddressBook>,
    router:    R,
}

impl AtlasBuilder<DijkstraRouter> {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            config:    AtlasConfig::default(),
            addresses: None,
            router:    DijkstraRouter,
        }
    }

    /// Validate raw inputs into a [`Dataset`] first.  Duplicate node or way
    /// ids and unusable bounds are rejected.
    pub fn from_raw(
        nodes:     impl IntoIterator<Item = Node>,
        ways:      Vec<Way>,
        relations: Vec<Relation>,
        bounds:    Rect,
    ) -> AtlasResult<Self> {
        let store = NodeStore::from_nodes(nodes)?;
        Ok(Self::new(Dataset::new(store, ways, relations, bounds)?))
    }
}

impl<R: Router> AtlasBuilder<R> {
    pub fn config(mut self, config: AtlasConfig) -> Self {
        self.config = config;
        self
    }

    /// Addresses used by text route queries.
    pub fn addresses(mut self, addresses: AddressBook) -> Self {
        self.addresses = Some(addresses);
        self
    }

    /// Swap the routing engine.
    pub fn router<R2: Router>(self, router: R2) -> AtlasBuilder<R2> {
        AtlasBuilder {
            dataset:   self.dataset,
            config:    self.config,
            addresses: self.addresses,
            router,
        }
    }

    /// Stitch, then build the road graph and the per-category spatial
    /// indexes.  With the `parallel` feature the graph and the indexes are
    /// built concurrently.
    pub fn build(self) -> AtlasResult<Atlas<R>> {
        self.config.validate()?;

        let stitched = Stitcher::new(self.config.stitch.clone()).run(&self.dataset);

        #[cfg(not(feature = "parallel"))]
        let (graph, indexes) = (
            build_graph(&self.dataset, &stitched.paths),
            build_indexes(&stitched.paths, self.dataset.bounds(), &self.config),
        );

        #[cfg(feature = "parallel")]
        let (graph, indexes) = {
            let job = || {
                rayon::join(
                    || build_graph(&self.dataset, &stitched.paths),
                    || build_indexes(&stitched.paths, self.dataset.bounds(), &self.config),
                )
            };
            match self.config.num_threads {
                Some(n) => rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| crate::AtlasError::Config(e.to_string()))?
                    .install(job),
                None => job(),
            }
        };

        info!(
            "atlas ready: {} paths, {} vertices, {} edges, {} indexed categories",
            stitched.paths.len(),
            graph.vertex_count(),
            graph.edge_count(),
            indexes.len()
        );

        Ok(Atlas {
            dataset:   self.dataset,
            config:    self.config,
            paths:     stitched.paths,
            issues:    stitched.issues,
            graph,
            indexes,
            addresses: self.addresses.unwrap_or_default(),
            router:    self.router,
        })
    }
}

// ── Stages ────────────────────────────────────────────────────────────────────

fn build_graph(dataset: &Dataset, paths: &PathCollection) -> Graph {
    let graph = Graph::from_paths(paths.routable(), dataset);
    debug!("{graph:?}");
    graph
}

fn build_indexes(
    paths:  &PathCollection,
    bounds: Rect,
    config: &AtlasConfig,
) -> BTreeMap<Category, KdTree> {
    let categories: Vec<_> = paths
        .iter()
        .filter(|(category, _)| config.is_indexed(*category))
        .collect();

    #[cfg(not(feature = "parallel"))]
    {
        categories
            .into_iter()
            .map(|(category, list)| (category, KdTree::build(list, bounds, &config.index)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        categories
            .into_par_iter()
            .map(|(category, list)| (category, KdTree::build(list, bounds, &config.index)))
            .collect()
    }
}
