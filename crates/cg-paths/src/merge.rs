//! Fragment joining.
//!
//! Every join produces a fresh node sequence; inputs are never modified, so a
//! fragment that is still referenced elsewhere (e.g. from a second pending
//! endpoint) cannot be corrupted by a merge.

use cg_core::{NodeId, Way, WayId};

use crate::{StitchError, StitchResult};

/// A way fragment under construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Lowest contributing way id.
    pub way: WayId,
    pub nodes: Vec<NodeId>,
    pub multipolygon: bool,
}

impl Fragment {
    pub fn new(way: WayId, nodes: Vec<NodeId>, multipolygon: bool) -> Self {
        Self { way, nodes, multipolygon }
    }

    pub fn from_way(way: &Way) -> Self {
        Self::new(way.id, way.nodes.clone(), way.multipolygon)
    }

    #[inline]
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Join two fragments at a shared endpoint, dropping the duplicated joint.
///
/// Orientation rules, first match wins:
///
/// | Shared endpoint                  | Result                                   |
/// |----------------------------------|------------------------------------------|
/// | `before.first == after.first`    | reverse(`before`) minus joint + `after`  |
/// | `before.first == after.last`     | `after` minus joint + `before`           |
/// | `before.last == after.first`     | `before` minus joint + `after`           |
/// | `before.last == after.last`      | `before` minus joint + reverse(`after`)  |
///
/// Fragments that share no endpoint fail with [`StitchError::Unconnected`].
pub fn merge(before: &Fragment, after: &Fragment) -> StitchResult<Fragment> {
    let unconnected = || StitchError::Unconnected { before: before.way, after: after.way };

    let (bf, bl) = before.first().zip(before.last()).ok_or_else(unconnected)?;
    let (af, al) = after.first().zip(after.last()).ok_or_else(unconnected)?;

    let mut nodes = Vec::with_capacity(before.nodes.len() + after.nodes.len() - 1);
    if bf == af {
        nodes.extend(before.nodes.iter().rev());
        nodes.pop();
        nodes.extend_from_slice(&after.nodes);
    } else if bf == al {
        nodes.extend_from_slice(&after.nodes);
        nodes.pop();
        nodes.extend_from_slice(&before.nodes);
    } else if bl == af {
        nodes.extend_from_slice(&before.nodes);
        nodes.pop();
        nodes.extend_from_slice(&after.nodes);
    } else if bl == al {
        nodes.extend_from_slice(&before.nodes);
        nodes.pop();
        nodes.extend(after.nodes.iter().rev());
    } else {
        return Err(unconnected());
    }

    Ok(Fragment {
        way: before.way.min(after.way),
        nodes,
        multipolygon: before.multipolygon || after.multipolygon,
    })
}

/// Append `after` to `before` without looking at endpoints.  Used for
/// multipolygon rings, whose member order is trusted.
pub fn concat(before: &Fragment, after: &Fragment) -> Fragment {
    let mut nodes = Vec::with_capacity(before.nodes.len() + after.nodes.len());
    nodes.extend_from_slice(&before.nodes);
    nodes.extend_from_slice(&after.nodes);
    Fragment {
        way: before.way.min(after.way),
        nodes,
        multipolygon: before.multipolygon || after.multipolygon,
    }
}
