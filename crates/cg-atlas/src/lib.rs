//! `cg-atlas` — one owned build context from raw map data to queries.
//!
//! # Pipeline
//!
//! ```text
//! Dataset ──► Stitcher ──► PathCollection ─┬─► Graph ──────────► route / route_many
//!                                          └─► KdTree per category ─► range_query
//! ```
//!
//! The graph and the indexes only read the stitched paths, so they are
//! built side by side (concurrently with the `parallel` feature).  An
//! [`Atlas`] only exists once every stage has finished; there is no
//! half-built state to query.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Concurrent graph/index build and parallel `route_many`. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `AtlasConfig`.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cg_atlas::{AtlasBuilder, AtlasHandle};
//! use cg_core::Vehicle;
//!
//! let handle = AtlasHandle::new(AtlasBuilder::new(dataset).addresses(book).build()?);
//! let trip = handle.load().route("Nørregade 4", "Vestergade 12", Vehicle::Walk)?;
//! ```

pub mod atlas;
pub mod builder;
pub mod config;
pub mod error;


pub use atlas::{Atlas, AtlasHandle, Trip};
pub use builder::AtlasBuilder;
pub use config::AtlasConfig;
pub use error::{AtlasError, AtlasResult};
