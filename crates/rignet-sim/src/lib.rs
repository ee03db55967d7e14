//! Deterministic simulation helpers for `rignet`.
//!
//! Everything here drives tests, demos and validation runs: none of it is
//! required to adjust a real network. Generators are injected explicitly
//! (`&mut StdRng`) and every call site seeds its own generator at a fixed
//! constant, so a given seed always reproduces the same data stream.

/// Pseudo-random transforms, noise and blunder streams.
pub mod random;
/// Station layouts and backsight observation bundles.
pub mod scenario;
/// Moving-sensor trajectories and feature sightings.
pub mod trajectory;

pub use random::*;
pub use scenario::{random_stations, sequential_stations, NoiseModel};
