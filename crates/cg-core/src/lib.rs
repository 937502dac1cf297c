//! `cg-core` — foundational types for the `cartograph` workspace.
//!
//! Every other `cg-*` crate depends on this one.  It has no `cg-*`
//! dependencies and only a couple of external ones (`thiserror`,
//! `rustc-hash`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`ids`]        | `NodeId`, `WayId`, `RelationId`, `NodeIdx`, `VertexId`, `EdgeId` |
//! | [`geo`]        | `GeoPoint`, `Rect`, haversine distance                   |
//! | [`category`]   | `Category` classification and fill rules                 |
//! | [`tags`]       | `RoadInfo` and other tag-derived attributes              |
//! | [`entities`]   | `Node`, `Way`, `Relation`, `NodeStore`, `Dataset`        |
//! | [`vehicle`]    | `Vehicle` class used for edge filtering                  |
//! | [`error`]      | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod category;
pub mod entities;
pub mod error;
pub mod geo;
pub mod ids;
pub mod tags;
pub mod vehicle;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::Category;
pub use entities::{Dataset, Node, NodeStore, Relation, Way};
pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, Rect};
pub use ids::{EdgeId, NodeId, NodeIdx, RelationId, VertexId, WayId};
pub use tags::RoadInfo;
pub use vehicle::Vehicle;
