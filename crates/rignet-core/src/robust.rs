//! Robust estimation of a single transform from a noisy collection.
//!
//! Both estimators here tolerate gross outliers (blunders drawn from a
//! uniform distribution across the whole parameter range) by reducing the
//! fusion to component-wise medians. [`transform_via_parameters`] takes the
//! medians in parameter space and is appropriate only for small rotations;
//! [`transform_via_effect`] takes the medians of probe-vector images and is
//! safe for arbitrary rotations.

use log::debug;

use crate::align::attitude_from_dir_pairs;
use crate::math::{att_from_phys_angle, iso3_from_parts, phys_angle, Iso3, Real, Validity, Vec3, E1, E2};

/// Median of a mutable slice of finite values.
///
/// Partially orders the slice in expected O(n): for odd `n` the middle
/// element, for even `n` the mean of the largest of the lower half and the
/// smallest of the upper half. Empty input yields NaN.
///
/// All values are assumed finite (sortable).
pub fn median_of(values: &mut [Real]) -> Real {
    let size = values.len();
    if size == 0 {
        return Real::null();
    }
    if size == 1 {
        return values[0];
    }

    let is_odd = size % 2 == 1;
    // index of the largest element of the lower half
    let mid = if is_odd { size / 2 } else { size / 2 - 1 };

    let (_, at_mid, upper) = values.select_nth_unstable_by(mid, f64::total_cmp);
    if is_odd {
        *at_mid
    } else {
        // average with the smallest of the remaining (all larger) values
        let next = upper.iter().copied().fold(f64::MAX, f64::min);
        0.5 * (*at_mid + next)
    }
}

/// Robust transform from per-component parameter medians.
///
/// Each valid input decomposes into six scalars (three location components
/// and three physical-angle components); the result is rebuilt from the six
/// component medians. Angle-space medians are not rotation covariant, so
/// this estimator is recommended only when all rotations are small.
///
/// Invalid inputs are skipped; the result is invalid iff no valid input
/// exists. A single input is returned unchanged and two inputs average
/// element-wise (the even-`n` median rule).
pub fn transform_via_parameters(xforms: &[Iso3]) -> Iso3 {
    let mut comps: [Vec<Real>; 6] = Default::default();
    for comp in comps.iter_mut() {
        comp.reserve(xforms.len());
    }

    for xform in xforms {
        if !xform.is_valid() {
            debug!("skipping invalid transform sample");
            continue;
        }
        let loc = xform.translation.vector;
        let ang = phys_angle(&xform.rotation);
        for k in 0..3 {
            comps[k].push(loc[k]);
            comps[k + 3].push(ang[k]);
        }
    }

    if comps[0].is_empty() {
        return Iso3::null();
    }

    let loc = Vec3::new(
        median_of(&mut comps[0]),
        median_of(&mut comps[1]),
        median_of(&mut comps[2]),
    );
    let ang = Vec3::new(
        median_of(&mut comps[3]),
        median_of(&mut comps[4]),
        median_of(&mut comps[5]),
    );
    iso3_from_parts(&loc, &att_from_phys_angle(&ang))
}

/// Robust transform from the medians of transform *effects*.
///
/// The translation is the component-wise median of the input translations.
/// The attitude is recovered by transforming the probe directions `e1` and
/// `e2` with every input attitude, taking the component-wise median of each
/// resulting point cloud, and aligning the probe pair onto the median pair.
///
/// Invalid inputs are skipped; the result is invalid iff no valid input
/// exists. A single input is returned unchanged and two inputs average
/// element-wise (the even-`n` median rule).
pub fn transform_via_effect(xforms: &[Iso3]) -> Iso3 {
    let mut comp_locs: [Vec<Real>; 3] = Default::default();
    let mut comp_a1s: [Vec<Real>; 3] = Default::default();
    let mut comp_b1s: [Vec<Real>; 3] = Default::default();
    for k in 0..3 {
        comp_locs[k].reserve(xforms.len());
        comp_a1s[k].reserve(xforms.len());
        comp_b1s[k].reserve(xforms.len());
    }

    for xform in xforms {
        if !xform.is_valid() {
            debug!("skipping invalid transform sample");
            continue;
        }
        let loc = xform.translation.vector;
        let a1 = xform.rotation * E1;
        let b1 = xform.rotation * E2;
        for k in 0..3 {
            comp_locs[k].push(loc[k]);
            comp_a1s[k].push(a1[k]);
            comp_b1s[k].push(b1[k]);
        }
    }

    if comp_locs[0].is_empty() {
        return Iso3::null();
    }

    let median_loc = Vec3::new(
        median_of(&mut comp_locs[0]),
        median_of(&mut comp_locs[1]),
        median_of(&mut comp_locs[2]),
    );
    let median_a1 = Vec3::new(
        median_of(&mut comp_a1s[0]),
        median_of(&mut comp_a1s[1]),
        median_of(&mut comp_a1s[2]),
    );
    let median_b1 = Vec3::new(
        median_of(&mut comp_b1s[0]),
        median_of(&mut comp_b1s[1]),
        median_of(&mut comp_b1s[2]),
    );

    let median_att = attitude_from_dir_pairs(&(E1, E2), &(median_a1, median_b1));
    iso3_from_parts(&median_loc, &median_att)
}
