//! Moving-sensor trajectories and landmark sighting simulation.
//!
//! Supports continuous-mapping scenarios: a sensor follows a deterministic
//! path, observes nearby landmark frames at each epoch, and the resulting
//! relative orientations feed a network that is re-adjusted online.

use rand::rngs::StdRng;
use rand::Rng;

use rignet_core::{iso3_from_parts, relative_transform, Att, Iso3, Real, Vec3, E1, E2};

use crate::scenario::{observed_orientation, NoiseModel};

/// Orientation as a function of time along a deterministic path.
pub trait Trajectory {
    /// Pose of the moving frame at time `tau` (seconds) in the reference
    /// frame, without any measurement noise.
    fn path_orientation(&self, tau: Real) -> Iso3;

    /// Noisy observation of the pose at time `tau`: a Gaussian perturbation
    /// of the path pose, or (with probability `noise.prob_err`) an outright
    /// blunder.
    fn perturbed_orientation(&self, rng: &mut StdRng, tau: Real, noise: &NoiseModel) -> Iso3 {
        observed_orientation(rng, &self.path_orientation(tau), noise)
    }
}

/// Constant-velocity straight-line path.
#[derive(Debug, Clone, Copy)]
pub struct LineTrajectory {
    /// Starting location.
    pub start: Vec3,
    /// Unit travel direction.
    pub dir: Vec3,
    /// Travel speed (m/s).
    pub speed: Real,
}

impl Default for LineTrajectory {
    fn default() -> Self {
        Self {
            start: Vec3::zeros(),
            dir: E1,
            speed: 0.25,
        }
    }
}

impl Trajectory for LineTrajectory {
    fn path_orientation(&self, tau: Real) -> Iso3 {
        let loc = self.start + self.speed * tau * self.dir;
        iso3_from_parts(&loc, &Att::identity())
    }
}

/// Constant-speed circular path in the plane spanned by two directions.
#[derive(Debug, Clone, Copy)]
pub struct CircleTrajectory {
    /// Circle radius (m).
    pub radius: Real,
    /// Circle center.
    pub center: Vec3,
    /// First in-plane direction (location at `tau = 0`).
    pub plane_dir1: Vec3,
    /// Second in-plane direction.
    pub plane_dir2: Vec3,
    /// Travel speed along the arc (m/s).
    pub speed: Real,
}

impl Default for CircleTrajectory {
    fn default() -> Self {
        Self {
            radius: 1.0,
            center: Vec3::zeros(),
            plane_dir1: E1,
            plane_dir2: E2,
            speed: 0.25,
        }
    }
}

impl Trajectory for CircleTrajectory {
    fn path_orientation(&self, tau: Real) -> Iso3 {
        let axis = self.plane_dir1.cross(&self.plane_dir2).normalize();
        let ang_speed = self.speed / self.radius;
        let att = Att::from_scaled_axis(tau * ang_speed * axis);
        let loc = self.center + self.radius * (att * self.plane_dir1);
        iso3_from_parts(&loc, &Att::identity())
    }
}

/// Relative orientations "sensor w.r.t. feature" for a handful of randomly
/// selected landmark features sighted at time `tau`.
///
/// Returns `(feature index, x_sensor_wrt_feature)` pairs. Every sighting
/// carries its own observation noise (detection and matching errors are
/// independent per feature), so relative orientations derived from two
/// co-sighted features do not share a common error that cancels.
pub fn feature_sightings(
    rng: &mut StdRng,
    trajectory: &dyn Trajectory,
    tau: Real,
    features: &[Iso3],
    num_sightings: usize,
    noise: &NoiseModel,
) -> Vec<(usize, Iso3)> {
    assert!(
        !features.is_empty(),
        "feature_sightings requires a non-empty feature collection"
    );

    let x_cam_wrt_ref = trajectory.path_orientation(tau);

    let mut sightings = Vec::with_capacity(num_sightings);
    for _ in 0..num_sightings {
        let ndx = rng.random_range(0..features.len());
        let exp_cam_wrt_fea = relative_transform(&features[ndx], &x_cam_wrt_ref);
        sightings.push((ndx, observed_orientation(rng, &exp_cam_wrt_fea, noise)));
    }
    sightings
}
