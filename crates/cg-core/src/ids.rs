//! Strongly typed identifier wrappers.
//!
//! Two families live here:
//!
//! - **External ids** (`NodeId`, `WayId`, `RelationId`) carry the `i64`
//!   identity assigned by the map source.  They are only compared, hashed and
//!   sorted, never used as indices.
//! - **Dense indices** (`NodeIdx`, `VertexId`, `EdgeId`) are positions in
//!   arena `Vec`s.  They expose `.index()` and an `INVALID` sentinel.
//!
//! All ids are `Copy + Ord + Hash` so they work as map keys and sort keys
//! without ceremony.

use std::fmt;

/// Generate a dense index wrapper around an unsigned integer.
macro_rules! typed_index {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid index".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized indices are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

/// Generate an external-identity wrapper around `i64`.
macro_rules! source_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident => $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "/{}"), self.0)
            }
        }

        impl From<i64> for $name {
            #[inline(always)]
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

source_id! {
    /// Source identity of a map node.
    pub struct NodeId => "node";
}

source_id! {
    /// Source identity of a way.
    pub struct WayId => "way";
}

source_id! {
    /// Source identity of a relation.
    pub struct RelationId => "relation";
}

typed_index! {
    /// Position of a node in the [`NodeStore`](crate::NodeStore) arena.
    pub struct NodeIdx(u32);
}

typed_index! {
    /// Index of a routing-graph vertex.
    pub struct VertexId(u32);
}

typed_index! {
    /// Index of a directed routing-graph edge, in insertion order.
    pub struct EdgeId(u32);
}
