//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where dataset construction can fail underneath them.

use thiserror::Error;

use crate::{NodeId, WayId};

/// Errors raised while assembling the input data model.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} appears more than once")]
    DuplicateNode(NodeId),

    #[error("{0} appears more than once")]
    DuplicateWay(WayId),

    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `cg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
