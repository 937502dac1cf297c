//! `cg-spatial` — road graph, routing, address lookup, and range queries.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `Graph` (CSR + name index + R-tree), `GraphBuilder`         |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`, `Waypoint`, resolution |
//! | [`address`] | `Address`, `AddressBook`                                    |
//! | [`kdtree`]  | `KdTree`, `IndexConfig`, `Bounded`                          |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod address;
pub mod error;
pub mod graph;
pub mod kdtree;
pub mod router;

#[cfg(test)]
mod tests;

pub use address::{Address, AddressBook};
pub use error::{SpatialError, SpatialResult};
pub use graph::{Edge, Graph, GraphBuilder, GraphParts};
pub use kdtree::{Bounded, IndexConfig, KdTree};
pub use router::{
    DEFAULT_RESOLVE_WINDOW, DijkstraRouter, Route, Router, Waypoint, resolve, resolve_street,
};
