//! Pseudo-random transform generation.
//!
//! Two populations drive the robustness scenarios: "measurements" with
//! Gaussian component noise around an expected transform, and "blunders"
//! with components drawn uniformly across the whole allowed range.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{StandardNormal, UnitSphere};

use rignet_core::{att_from_phys_angle, iso3_from_parts, phys_angle, Iso3, Real, Vec3};

/// Default range of translation components: plus/minus this limit.
pub const LIM_LOC: Real = 10.0;

/// Default range of rotation angle components: plus/minus this limit.
pub const LIM_ANG: Real = std::f64::consts::PI;

/// Deterministic generator for one simulation call site.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Heuristic hexad-magnitude scatter for transforms whose location and
/// angle components each carry the given standard deviations.
///
/// Location error maps directly onto probe displacement; angle error maps
/// through the unit probe arm. The two add in quadrature over the three
/// components of each.
pub fn sigma_mag_for_sigma_loc_ang(sigma_loc: Real, sigma_ang: Real) -> Real {
    (3.0 * sigma_loc * sigma_loc + 3.0 * sigma_ang * sigma_ang).sqrt()
}

/// Uniformly distributed unit direction.
pub fn direction_vector(rng: &mut StdRng) -> Vec3 {
    let comps: [Real; 3] = rng.sample(UnitSphere);
    Vec3::new(comps[0], comps[1], comps[2])
}

/// Transform with Gaussian perturbation of each location and angle
/// component around the given means.
pub fn perturbed_transform(
    rng: &mut StdRng,
    mean_loc: &Vec3,
    mean_ang: &Vec3,
    sigma_loc: Real,
    sigma_ang: Real,
) -> Iso3 {
    let mut gauss = |sigma: Real| -> Real {
        let unit: Real = rng.sample(StandardNormal);
        sigma * unit
    };
    let loc = Vec3::new(
        mean_loc[0] + gauss(sigma_loc),
        mean_loc[1] + gauss(sigma_loc),
        mean_loc[2] + gauss(sigma_loc),
    );
    let ang = Vec3::new(
        mean_ang[0] + gauss(sigma_ang),
        mean_ang[1] + gauss(sigma_ang),
        mean_ang[2] + gauss(sigma_ang),
    );
    iso3_from_parts(&loc, &att_from_phys_angle(&ang))
}

/// Transform with location and angle components drawn uniformly from the
/// given ranges.
///
/// Angle components can combine to magnitudes past the principal range;
/// the rotation-vector exponential wraps them back.
pub fn uniform_transform(
    rng: &mut StdRng,
    loc_min_max: (Real, Real),
    ang_min_max: (Real, Real),
) -> Iso3 {
    let loc = Vec3::new(
        rng.random_range(loc_min_max.0..loc_min_max.1),
        rng.random_range(loc_min_max.0..loc_min_max.1),
        rng.random_range(loc_min_max.0..loc_min_max.1),
    );
    let ang = Vec3::new(
        rng.random_range(ang_min_max.0..ang_min_max.1),
        rng.random_range(ang_min_max.0..ang_min_max.1),
        rng.random_range(ang_min_max.0..ang_min_max.1),
    );
    iso3_from_parts(&loc, &att_from_phys_angle(&ang))
}

/// Simulated observation bundle: `num_mea` Gaussian measurements of
/// `exp_xform` followed by `num_err` uniform blunders.
#[allow(clippy::too_many_arguments)]
pub fn noisy_transforms(
    rng: &mut StdRng,
    exp_xform: &Iso3,
    num_mea: usize,
    num_err: usize,
    sigma_loc: Real,
    sigma_ang: Real,
    loc_min_max: (Real, Real),
    ang_min_max: (Real, Real),
) -> Vec<Iso3> {
    let mut xforms = Vec::with_capacity(num_mea + num_err);

    let exp_loc = exp_xform.translation.vector;
    let exp_ang = phys_angle(&exp_xform.rotation);

    for _ in 0..num_mea {
        xforms.push(perturbed_transform(
            rng, &exp_loc, &exp_ang, sigma_loc, sigma_ang,
        ));
    }
    for _ in 0..num_err {
        xforms.push(uniform_transform(rng, loc_min_max, ang_min_max));
    }

    xforms
}
