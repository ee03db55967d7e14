//! Station layouts, noise parameterization and backsight observation
//! bundles for whole-network scenarios.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use rignet_core::{
    iso3_from_parts, phys_angle, relative_transform, Att, DirPair, Iso3, Real, Vec3, E1,
};

use crate::random::{direction_vector, noisy_transforms, perturbed_transform, uniform_transform};

/// Noise parameters for simulated observation streams.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Standard deviation of each measured location component.
    pub sigma_loc: Real,
    /// Standard deviation of each measured angle component.
    pub sigma_ang: Real,
    /// Probability that an observation is a blunder.
    pub prob_err: Real,
    /// Component range of blunder locations.
    pub loc_min_max: (Real, Real),
    /// Component range of blunder angles.
    pub ang_min_max: (Real, Real),
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self {
            sigma_loc: 1.0 / 100.0,
            sigma_ang: 5.0 / 1000.0,
            prob_err: 0.2,
            loc_min_max: (-0.5, 0.5),
            ang_min_max: (-0.5, 0.5),
        }
    }
}

/// Random pair of unit directions separated by an angle within
/// `min_max_angle_mag` (radians), rejecting near-(anti)parallel draws.
pub fn direction_pair(rng: &mut StdRng, min_max_angle_mag: (Real, Real)) -> DirPair {
    loop {
        let a_dir = direction_vector(rng);
        let b_dir = direction_vector(rng);

        let angle_mag = a_dir.dot(&b_dir).clamp(-1.0, 1.0).acos();
        if min_max_angle_mag.0 < angle_mag && angle_mag < min_max_angle_mag.1 {
            return (a_dir, b_dir);
        }
    }
}

/// Body-frame image of a reference direction pair under `att_bod_wrt_ref`,
/// with the individual directions perturbed within the reference plane.
///
/// The perturbation shifts both directions toward/away from each other
/// while keeping the pair coplanar with the originals and the mean
/// direction fixed, so the best-fit alignment attitude is unchanged.
pub fn body_direction_pair(
    rng: &mut StdRng,
    ref_pair: &DirPair,
    att_bod_wrt_ref: &Att,
) -> DirPair {
    let (a0, b0) = ref_pair;

    let nu: Real = rng.random_range(1.0 / 128.0..32.0 / 128.0);
    let wp = 1.0 + nu;
    let wn = 1.0 - nu;
    let a_tmp = (0.5 * (wp * a0 + wn * b0)).normalize();
    let b_tmp = (0.5 * (wn * a0 + wp * b0)).normalize();

    (att_bod_wrt_ref * a_tmp, att_bod_wrt_ref * b_tmp)
}

/// Stations every 10 m along `e1` with identity attitudes.
pub fn sequential_stations(num_stas: usize) -> Vec<Iso3> {
    (0..num_stas)
        .map(|ndx| iso3_from_parts(&((ndx as Real) * 10.0 * E1), &Att::identity()))
        .collect()
}

/// Stations with uniformly random poses inside the given location range.
pub fn random_stations(
    rng: &mut StdRng,
    num_stas: usize,
    loc_min_max: (Real, Real),
) -> Vec<Iso3> {
    let ang_min_max = (-std::f64::consts::PI, std::f64::consts::PI);
    (0..num_stas)
        .map(|_| uniform_transform(rng, loc_min_max, ang_min_max))
        .collect()
}

/// Simulated backsight observation bundles for a station traverse.
///
/// Visiting stations in order, each newly occupied station takes noisy
/// relative-orientation bundles to up to `num_backsight` randomly chosen
/// previously occupied stations. Keys are `(from, into)` station index
/// pairs with `from` the backsighted station; each bundle holds `num_mea`
/// measurements plus `num_err` blunders of the expected relative transform.
pub fn backsight_transforms(
    rng: &mut StdRng,
    exp_stas: &[Iso3],
    num_backsight: usize,
    num_mea: usize,
    num_err: usize,
    noise: &NoiseModel,
) -> BTreeMap<(usize, usize), Vec<Iso3>> {
    let mut pair_xforms = BTreeMap::new();

    let mut sta_ndxs: Vec<usize> = (0..exp_stas.len()).collect();
    for curr_sta in 0..exp_stas.len() {
        let exp_curr_wrt_ref = &exp_stas[curr_sta];

        // connect with a random subset of the previously occupied stations
        sta_ndxs[..curr_sta].shuffle(rng);
        let num_back = curr_sta.min(num_backsight);
        for &from_ndx in &sta_ndxs[..num_back] {
            let exp_back_wrt_ref = &exp_stas[from_ndx];
            let exp_curr_wrt_back = relative_transform(exp_back_wrt_ref, exp_curr_wrt_ref);

            let obs_xforms = noisy_transforms(
                rng,
                &exp_curr_wrt_back,
                num_mea,
                num_err,
                noise.sigma_loc,
                noise.sigma_ang,
                noise.loc_min_max,
                noise.ang_min_max,
            );
            pair_xforms.insert((from_ndx, curr_sta), obs_xforms);
        }
    }

    pair_xforms
}

/// One observation drawn from the measurement-or-blunder mixture around an
/// expected pose.
pub fn observed_orientation(rng: &mut StdRng, exp_xform: &Iso3, noise: &NoiseModel) -> Iso3 {
    let is_blunder = rng.random_range(0.0..1.0) < noise.prob_err;
    if is_blunder {
        uniform_transform(rng, noise.loc_min_max, noise.ang_min_max)
    } else {
        perturbed_transform(
            rng,
            &exp_xform.translation.vector,
            &phys_angle(&exp_xform.rotation),
            noise.sigma_loc,
            noise.sigma_ang,
        )
    }
}
