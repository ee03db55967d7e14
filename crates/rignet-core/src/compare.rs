//! Rotation-aware similarity metrics between rigid transforms.
//!
//! Comparing transforms by their parameter vectors is not rotation invariant
//! and behaves poorly for large angles. The metrics here instead compare the
//! *effect* of two transforms on the hexad of probe points `±e1, ±e2, ±e3`,
//! which bounds the discrepancy any unit-sphere point can experience.

use serde::{Deserialize, Serialize};

use crate::math::{Att, Iso3, Real, Validity, Vec3, E1, E2, E3};
use crate::robust::median_of;

/// Differences of the basis vectors transformed by each attitude:
/// `att2·e_k − att1·e_k` for `k = 1, 2, 3`.
///
/// Any invalid input yields null vectors.
pub fn triad_deltas(att1: &Att, att2: &Att) -> [Vec3; 3] {
    if !(att1.is_valid() && att2.is_valid()) {
        return [Vec3::null(); 3];
    }
    [
        att2 * E1 - att1 * E1,
        att2 * E2 - att1 * E2,
        att2 * E3 - att1 * E3,
    ]
}

/// Difference vectors between the images of the six hexad probes under each
/// transform.
///
/// Uses the reduced identity: with `Δt = x.t − y.t` and per-basis attitude
/// deltas `Δ_k`, the six probe differences are `Δt ± ρ·Δ_k`. When
/// `normalize` is set, `ρ = max(1, (|x.t| + |y.t|) / 2)` scales the angular
/// contribution to the translation magnitude so that distant setups are
/// compared on commensurate terms.
pub fn hexad_deltas(x: &Iso3, y: &Iso3, normalize: bool) -> [Vec3; 6] {
    if !(x.is_valid() && y.is_valid()) {
        return [Vec3::null(); 6];
    }

    let mut rho = 1.0;
    if normalize {
        let ave_mag = 0.5 * (x.translation.vector.norm() + y.translation.vector.norm());
        rho = ave_mag.max(1.0);
    }

    let delta_t = x.translation.vector - y.translation.vector;
    let deltas = triad_deltas(&x.rotation, &y.rotation);
    let d1 = rho * deltas[0];
    let d2 = rho * deltas[1];
    let d3 = rho * deltas[2];

    [
        delta_t + d1,
        delta_t - d1,
        delta_t + d2,
        delta_t - d2,
        delta_t + d3,
        delta_t - d3,
    ]
}

/// Maximum magnitude among the six hexad difference vectors.
///
/// NaN when either transform is invalid.
pub fn max_mag_diff(x: &Iso3, y: &Iso3, normalize: bool) -> Real {
    if !(x.is_valid() && y.is_valid()) {
        return Real::null();
    }
    hexad_deltas(x, y, normalize)
        .iter()
        .map(|d| d.norm())
        .fold(-1.0, f64::max)
}

/// Mean magnitude of the six hexad difference vectors.
///
/// NaN when either transform is invalid.
pub fn ave_mag_diff(x: &Iso3, y: &Iso3, normalize: bool) -> Real {
    if !(x.is_valid() && y.is_valid()) {
        return Real::null();
    }
    let sum: Real = hexad_deltas(x, y, normalize).iter().map(|d| d.norm()).sum();
    sum / 6.0
}

/// True if both transforms produce similar effects on the hexad probes,
/// i.e. `max_mag_diff(x, y, normalize) < tol`.
///
/// Invalid inputs compare as dissimilar.
pub fn similar_result(x: &Iso3, y: &Iso3, normalize: bool, tol: Real) -> bool {
    max_mag_diff(x, y, normalize) < tol
}

/// True if both attitudes produce similar effects on the basis triad.
pub fn similar_attitude(att1: &Att, att2: &Att, tol: Real) -> bool {
    if !(att1.is_valid() && att2.is_valid()) {
        return false;
    }
    let max_mag = triad_deltas(att1, att2)
        .iter()
        .map(|d| d.norm())
        .fold(-1.0, f64::max);
    max_mag < tol
}

/// Scalar statistics of hexad distances from a transform collection to a
/// reference transform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stats {
    /// Number of transforms considered.
    pub num_samps: usize,
    /// Smallest hexad distance.
    pub min_mag_diff: Real,
    /// Median hexad distance.
    pub med_mag_diff: Real,
    /// Mean hexad distance.
    pub ave_mag_diff: Real,
    /// Largest hexad distance.
    pub max_mag_diff: Real,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            num_samps: 0,
            min_mag_diff: Real::null(),
            med_mag_diff: Real::null(),
            ave_mag_diff: Real::null(),
            max_mag_diff: Real::null(),
        }
    }
}

/// Compute [`Stats`] of [`max_mag_diff`] values for a transform collection
/// relative to `ref_xform`.
///
/// An empty collection yields the null [`Stats`].
pub fn difference_stats(xforms: &[Iso3], ref_xform: &Iso3, normalize: bool) -> Stats {
    if xforms.is_empty() {
        return Stats::default();
    }

    let mut mags = Vec::with_capacity(xforms.len());
    let mut min = f64::MAX;
    let mut max: f64 = -1.0;
    let mut sum = 0.0;
    for xform in xforms {
        let mag = max_mag_diff(xform, ref_xform, normalize);
        min = min.min(mag);
        max = max.max(mag);
        sum += mag;
        mags.push(mag);
    }

    Stats {
        num_samps: xforms.len(),
        min_mag_diff: min,
        med_mag_diff: median_of(&mut mags),
        ave_mag_diff: sum / (xforms.len() as Real),
        max_mag_diff: max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{att_from_phys_angle, iso3_from_parts};
    use nalgebra::Point3;

    fn xform_a() -> Iso3 {
        iso3_from_parts(
            &Vec3::new(1.2, -0.7, 2.1),
            &att_from_phys_angle(&Vec3::new(0.3, 0.8, -0.4)),
        )
    }

    fn xform_b() -> Iso3 {
        iso3_from_parts(
            &Vec3::new(0.9, -0.5, 2.6),
            &att_from_phys_angle(&Vec3::new(-0.2, 1.1, 0.5)),
        )
    }

    #[test]
    fn hexad_matches_explicit_probe_enumeration() {
        let x = xform_a();
        let y = xform_b();

        // brute force over the seven probes (hexad plus origin)
        let probes = [E1, -E1, E2, -E2, E3, -E3, Vec3::zeros()];
        let brute_max = probes
            .iter()
            .map(|p| {
                let px = x.transform_point(&Point3::from(*p));
                let py = y.transform_point(&Point3::from(*p));
                (px - py).norm()
            })
            .fold(-1.0, f64::max);

        let got = max_mag_diff(&x, &y, false);
        assert!((got - brute_max).abs() <= 128.0 * f64::EPSILON * brute_max.max(1.0));
    }

    #[test]
    fn identical_transforms_have_zero_difference() {
        let x = xform_a();
        assert_eq!(max_mag_diff(&x, &x, false), 0.0);
        assert_eq!(ave_mag_diff(&x, &x, true), 0.0);
        assert!(similar_result(&x, &x, false, f64::EPSILON));
    }

    #[test]
    fn invalid_inputs_yield_nan() {
        let x = xform_a();
        let bad = Iso3::null();
        assert!(!max_mag_diff(&x, &bad, false).is_valid());
        assert!(!ave_mag_diff(&bad, &x, true).is_valid());
        assert!(!similar_result(&x, &bad, false, 1.0e6));
        for delta in hexad_deltas(&bad, &x, false) {
            assert!(!delta.is_valid());
        }
    }

    #[test]
    fn normalization_scales_angular_contribution() {
        // pure rotation difference at a large standoff distance
        let loc = Vec3::new(100.0, 0.0, 0.0);
        let x = iso3_from_parts(&loc, &Att::identity());
        let y = iso3_from_parts(&loc, &att_from_phys_angle(&Vec3::new(0.0, 0.0, 0.01)));

        let plain = max_mag_diff(&x, &y, false);
        let scaled = max_mag_diff(&x, &y, true);
        assert!((scaled / plain - 100.0).abs() < 1.0e-9);
    }

    #[test]
    fn difference_stats_summarize_collection() {
        let reference = xform_a();
        let xforms = vec![reference, xform_b(), xform_b()];
        let stats = difference_stats(&xforms, &reference, false);

        assert_eq!(stats.num_samps, 3);
        assert_eq!(stats.min_mag_diff, 0.0);
        let pair_mag = max_mag_diff(&xform_b(), &reference, false);
        assert!((stats.max_mag_diff - pair_mag).abs() < 1.0e-12);
        assert!((stats.med_mag_diff - pair_mag).abs() < 1.0e-12);
        assert!(stats.ave_mag_diff <= stats.max_mag_diff);

        let empty = difference_stats(&[], &reference, false);
        assert_eq!(empty.num_samps, 0);
        assert!(!empty.med_mag_diff.is_valid());
    }

    #[test]
    fn similar_attitude_detects_small_rotations() {
        let att1 = att_from_phys_angle(&Vec3::new(0.1, 0.2, 0.3));
        let att2 = att_from_phys_angle(&Vec3::new(0.1, 0.2, 0.3 + 1.0e-10));
        assert!(similar_attitude(&att1, &att2, 1.0e-8));
        assert!(!similar_attitude(&att1, &att2, 1.0e-12));
    }
}
