//! Core math and geometry primitives for `rignet`.
//!
//! This crate contains:
//! - linear algebra type aliases and validity sentinels (`Real`, `Vec3`,
//!   `Att`, `Iso3`, [`Validity`]),
//! - attitude recovery from direction pairs ([`align`]),
//! - the hexad transform comparator ([`compare`]),
//! - streaming order-statistics trackers ([`stat`]),
//! - robust transform estimators ([`robust`]).
//!
//! Network formation and propagation live in `rignet-graph`, simulation
//! helpers in `rignet-sim`, and everything is re-exported via the top-level
//! `rignet` crate.

/// Attitude alignment from reference/body direction pairs.
pub mod align;
/// Rotation-aware similarity metrics between transforms.
pub mod compare;
/// Linear algebra type aliases and validity helpers.
pub mod math;
/// Robust (median-based) transform estimation.
pub mod robust;
/// Streaming order-statistics trackers.
pub mod stat;

pub use align::*;
pub use compare::*;
pub use math::*;
