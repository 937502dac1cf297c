//! The stitch pass: ways and relations in, per-category line paths out.
//!
//! # Algorithm
//!
//! 1. Every way with a known category, except coastline, becomes a
//!    standalone path.  Coastline ways only appear through their region
//!    relation.
//! 2. Each relation is processed once, in input order:
//!    - ring categories (building, meadow, heath) concatenate their members
//!      in id order and park the result as pending;
//!    - boundary categories (forest, farmland) and coastline regions
//!      (recognised by name prefix) merge each member with whatever
//!      pending fragments touch its start and end, then park the result.
//! 3. All fragments still pending are flushed into paths.
//!
//! This is a single greedy pass, not a fixed point: fragments that only
//! become connectable after a later relation has been processed are not
//! revisited.

use std::collections::BTreeMap;

use log::{debug, info, trace, warn};

use cg_core::{Category, Dataset, Relation};

use crate::{Fragment, LinePath, PathCollection, PendingEndpoints, StitchError, concat, merge};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Stitcher settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StitchConfig {
    /// Relations whose name starts with this prefix are coastline regions.
    pub coastline_prefix: String,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self { coastline_prefix: "Region ".to_owned() }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

/// Result of a stitch pass.
#[derive(Clone, Debug, Default)]
pub struct Stitched {
    pub paths: PathCollection,
    /// Non-fatal problems met along the way, in the order they occurred.
    pub issues: Vec<StitchError>,
}

// ── Stitcher ──────────────────────────────────────────────────────────────────

/// Turns a [`Dataset`] into a [`PathCollection`].
#[derive(Clone, Debug, Default)]
pub struct Stitcher {
    config: StitchConfig,
}

impl Stitcher {
    pub fn new(config: StitchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Run the full pass.  Never fails; see [`Stitched::issues`].
    pub fn run(&self, dataset: &Dataset) -> Stitched {
        let mut pass = Pass {
            dataset,
            paths:   PathCollection::new(),
            pending: BTreeMap::new(),
            issues:  Vec::new(),
        };

        pass.standalone_ways();
        for relation in dataset.relations() {
            if relation.category.is_boundary() {
                pass.connect(relation, relation.category);
            } else if relation.name_starts_with(&self.config.coastline_prefix) {
                pass.connect(relation, Category::Coastline);
            } else if relation.category.is_ring() {
                pass.connect_ring(relation);
            }
        }
        pass.flush();

        info!(
            "stitched {} paths in {} categories ({} issues)",
            pass.paths.len(),
            pass.paths.categories().count(),
            pass.issues.len()
        );
        Stitched { paths: pass.paths, issues: pass.issues }
    }
}

// ── Joining ───────────────────────────────────────────────────────────────────

/// Merge `before` onto the start of `fragment` and `after` onto its end.
///
/// A neighbour that does not share an endpoint is recorded as an issue and
/// parked again in `pending`; the other side still joins.
pub(crate) fn attach(
    fragment: Fragment,
    before:   Option<Fragment>,
    after:    Option<Fragment>,
    pending:  &mut PendingEndpoints,
    issues:   &mut Vec<StitchError>,
) -> Fragment {
    let mut current = fragment;
    for (neighbour, neighbour_first) in [(before, true), (after, false)] {
        let Some(neighbour) = neighbour else { continue };
        let joined = if neighbour_first {
            merge(&neighbour, &current)
        } else {
            merge(&current, &neighbour)
        };
        match joined {
            Ok(m) => current = m,
            Err(err) => {
                warn!("{err}");
                issues.push(err);
                pending.register(neighbour);
            }
        }
    }
    current
}

// ── Pass state ────────────────────────────────────────────────────────────────

struct Pass<'d> {
    dataset: &'d Dataset,
    paths:   PathCollection,
    pending: BTreeMap<Category, PendingEndpoints>,
    issues:  Vec<StitchError>,
}

impl Pass<'_> {
    fn standalone_ways(&mut self) {
        let store = self.dataset.nodes();
        let mut count = 0usize;
        for way in self.dataset.ways() {
            if matches!(way.category, Category::Coastline | Category::Unknown) {
                continue;
            }
            if way.nodes.len() < 2 {
                trace!("skipping degenerate {}", way.id);
                continue;
            }
            self.paths.push(LinePath::from_way(way, store));
            count += 1;
        }
        debug!("{count} standalone paths");
    }

    /// Look up a member way by binary search, recording a miss.
    fn member(&mut self, relation: &Relation, id: cg_core::WayId) -> Option<Fragment> {
        match self.dataset.way(id) {
            Some(way) if !way.nodes.is_empty() => Some(Fragment::from_way(way)),
            Some(_) => {
                self.issues.push(StitchError::EmptyFragment(id));
                None
            }
            None => {
                warn!("{} references missing {}; skipped", relation.id, id);
                self.issues.push(StitchError::MissingMember { relation: relation.id, way: id });
                None
            }
        }
    }

    /// Multipolygon ring: concatenate members in id order, trusting the
    /// source ordering of outer and inner rings.
    fn connect_ring(&mut self, relation: &Relation) {
        if !relation.multipolygon {
            return;
        }

        let mut ring: Option<Fragment> = None;
        for &id in &relation.members {
            let Some(next) = self.member(relation, id) else { continue };
            ring = Some(match ring {
                None => next,
                Some(acc) => concat(&acc, &next),
            });
        }

        let Some(mut ring) = ring else {
            debug!("{} has no usable members", relation.id);
            return;
        };
        ring.multipolygon = true;
        trace!("{} ring with {} nodes", relation.id, ring.nodes.len());
        self.pending.entry(relation.category).or_default().register(ring);
    }

    /// Boundary or coastline: merge each member with the pending fragments
    /// at its two ends.
    fn connect(&mut self, relation: &Relation, category: Category) {
        for &id in &relation.members {
            let Some(mut fragment) = self.member(relation, id) else { continue };
            if relation.multipolygon {
                fragment.multipolygon = true;
            }

            let pending = self.pending.entry(category).or_default();
            let before = fragment.first().and_then(|n| pending.take(n));
            let after = fragment.last().and_then(|n| pending.take(n));

            let current = attach(fragment, before, after, pending, &mut self.issues);
            pending.register(current);
        }
    }

    fn flush(&mut self) {
        let store = self.dataset.nodes();
        for (category, pending) in std::mem::take(&mut self.pending) {
            let mut count = 0usize;
            for fragment in pending.drain() {
                self.paths.push(LinePath::materialize(
                    fragment.way,
                    &fragment.nodes,
                    category,
                    fragment.multipolygon,
                    store,
                ));
                count += 1;
            }
            debug!("flushed {count} {category} paths");
        }
    }
}
