//! Orientation network formation and analysis for `rignet`.
//!
//! A [`Geometry`] is an undirected multigraph whose vertices are station
//! frames and whose edges carry relative rigid-body transforms. Repeated
//! observations of the same station pair accumulate into robust edges;
//! a minimum-weight spanning tree thins the network to its most trusted
//! connectivity, and breadth-first propagation turns one anchored absolute
//! pose into absolute poses for every reachable station.

/// Edge variants and direction bookkeeping.
pub mod edge;
/// Network graph container and algorithms.
pub mod geometry;
/// Station frames and keys.
pub mod station;

pub use edge::{DirCompare, Edge, EdgeDir, EdgeError, EdgeOri, EdgeRobust, WEIGHT_UNESTIMATED};
pub use geometry::Geometry;
pub use station::{key_is_valid, StaFrame, StaKey, NULL_STA_KEY};
