//! Spatial-subsystem error type.

use thiserror::Error;

use cg_core::{NodeIdx, VertexId};

/// Errors produced by `cg-spatial`.
///
/// Address resolution failures and unreachable targets are distinct so that
/// callers can tell "we could not find that street" from "there is no way
/// to get there".
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("address not found: {0}")]
    AddressNotFound(String),

    #[error("no route from {from} to {to}")]
    Unreachable {
        from: VertexId,
        to: VertexId,
        /// Always `f64::INFINITY`.
        distance: f64,
    },

    #[error("{0} is not part of the routing graph")]
    NodeNotInGraph(NodeIdx),

    #[error("{0} is out of range for this graph")]
    UnknownVertex(VertexId),

    #[error("routing graph is empty")]
    EmptyGraph,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
