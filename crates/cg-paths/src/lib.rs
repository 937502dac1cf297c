//! `cg-paths` — reassembles fragmented map geometry into line paths.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`line_path`] | `LinePath`, `PathCollection`                              |
//! | [`merge`]     | `Fragment`, endpoint-orientation `merge`, `concat`        |
//! | [`pending`]   | `PendingEndpoints` — open fragments keyed by endpoint     |
//! | [`stitcher`]  | `Stitcher`, `StitchConfig`, `Stitched`                    |
//! | [`error`]     | `StitchError`, `StitchResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod line_path;
pub mod merge;
pub mod pending;
pub mod stitcher;


pub use error::{StitchError, StitchResult};
pub use line_path::{LinePath, PathCollection};
pub use merge::{Fragment, concat, merge};
pub use pending::PendingEndpoints;
pub use stitcher::{StitchConfig, Stitched, Stitcher};
