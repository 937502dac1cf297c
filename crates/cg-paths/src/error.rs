//! Stitching error type.
//!
//! None of these abort a stitch pass.  The stitcher records them in
//! [`Stitched::issues`](crate::Stitched) and carries on.

use thiserror::Error;

use cg_core::{RelationId, WayId};

/// Data-integrity problems met while stitching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StitchError {
    #[error("cannot merge unconnected fragments {before} and {after}")]
    Unconnected { before: WayId, after: WayId },

    #[error("{relation} references missing member {way}")]
    MissingMember { relation: RelationId, way: WayId },

    #[error("{0} has no nodes")]
    EmptyFragment(WayId),
}

pub type StitchResult<T> = Result<T, StitchError>;
