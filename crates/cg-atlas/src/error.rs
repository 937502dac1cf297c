use thiserror::Error;

use cg_core::CoreError;
use cg_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("atlas configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type AtlasResult<T> = Result<T, AtlasError>;
