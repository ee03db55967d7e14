//! High-level entry crate for the `rignet` toolbox.
//!
//! `rignet` adjusts rigid-body orientation networks: many noisy, partially
//! redundant and occasionally blunderous relative-pose measurements between
//! pairs of station frames are fused into one consistent absolute pose per
//! station.
//!
//! A typical adjustment:
//!
//! ```
//! use rignet::prelude::*;
//!
//! // two stations, three observations of the same backsight
//! let x_1_wrt_0 = iso3_from_parts(&Vec3::new(10.0, 0.0, 0.0), &Att::identity());
//! let mut net = Geometry::new();
//! for _ in 0..3 {
//!     net.accumulate_xform(EdgeDir::new(0, 1), &x_1_wrt_0, 8).unwrap();
//! }
//!
//! // thin to the spanning tree, anchor station 0, solve the rest
//! let tree = net.network_tree(&net.spanning_edges());
//! let poses = tree.propagate_transforms(0, &Iso3::identity());
//! assert_eq!(poses.len(), 2);
//! assert!((poses[&1].translation.vector - Vec3::new(10.0, 0.0, 0.0)).norm() < 1.0e-9);
//! ```
//!
//! ## Module organization
//!
//! - **[`core`]**: math types, alignment, hexad comparison, trackers,
//!   robust estimators
//! - **[`graph`]**: the network [`Geometry`](graph::Geometry), edges,
//!   spanning trees, propagation
//! - **[`sim`]**: deterministic measurement simulation for tests and demos

/// Core math types, comparators and robust estimators.
pub mod core {
    pub use rignet_core::*;
}

/// Network graph: stations, edges, spanning trees, propagation.
pub mod graph {
    pub use rignet_graph::*;
}

/// Deterministic simulation of noisy measurement streams.
pub mod sim {
    pub use rignet_sim::*;
}

// Re-exports for convenience
pub use rignet_core::{
    attitude_from_dir_pairs, max_mag_diff, similar_result, Att, DirPair, Iso3, Real, Validity,
    Vec3,
};
pub use rignet_core::robust::{transform_via_effect, transform_via_parameters};
pub use rignet_graph::{Edge, EdgeDir, Geometry, StaKey};

/// Convenient re-exports for common use cases.
pub mod prelude {
    pub use rignet_core::robust::{transform_via_effect, transform_via_parameters};
    pub use rignet_core::{
        att_from_phys_angle, attitude_from_dir_pairs, iso3_from_parts, max_mag_diff, phys_angle,
        relative_transform, similar_result, Att, DirPair, Iso3, Real, Validity, Vec3,
    };
    pub use rignet_graph::{Edge, EdgeDir, EdgeError, Geometry, StaFrame, StaKey};
    pub use rignet_sim::NoiseModel;
}
