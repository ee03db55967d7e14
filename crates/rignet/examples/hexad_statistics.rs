//! Monte-Carlo relationship of the hexad `max_mag_diff` metric to the
//! location/angle noise deviations of perturbed transforms.
//!
//! Writes `sigma_loc sigma_ang max_mag` records suitable for fitting a
//! scatter-prediction heuristic:
//!
//! ```text
//! cargo run --example hexad_statistics -- hexad_stats.dat
//! ```

use std::fmt::Write as _;
use std::fs;

use rignet::prelude::*;
use rignet::sim::{
    noisy_transforms, seeded_rng, sigma_mag_for_sigma_loc_ang, uniform_transform, LIM_ANG,
    LIM_LOC,
};

/// `num_samps + 1` evenly spaced values covering `[min, max]`.
fn samples(num_samps: usize, min_max: (Real, Real)) -> Vec<Real> {
    let delta = (min_max.1 - min_max.0) / (num_samps as Real);
    (0..=num_samps).map(|nn| min_max.0 + (nn as Real) * delta).collect()
}

fn main() {
    let out_path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("Usage: hexad_statistics <outfile>");
            std::process::exit(1);
        }
    };

    let mut rng = seeded_rng(74844020);

    let num_mea = 19;
    let sigma_locs = samples(16, (0.0, 4.0 / 16.0));
    let sigma_angs = samples(16, (0.0, 4.0 / 128.0));

    let xform_base = uniform_transform(&mut rng, (-LIM_LOC, LIM_LOC), (-LIM_ANG, LIM_ANG));

    let mut text = String::new();
    for sigma_loc in &sigma_locs {
        for sigma_ang in &sigma_angs {
            // perturbation population only, no blunders
            let xform_samps = noisy_transforms(
                &mut rng,
                &xform_base,
                num_mea,
                0,
                *sigma_loc,
                *sigma_ang,
                (-LIM_LOC, LIM_LOC),
                (-LIM_ANG, LIM_ANG),
            );

            for xform_samp in &xform_samps {
                let max_mag = max_mag_diff(xform_samp, &xform_base, false);
                let _ = writeln!(
                    text,
                    " {sigma_loc:.9} {sigma_ang:.9} {max_mag:.9} {:.9}",
                    sigma_mag_for_sigma_loc_ang(*sigma_loc, *sigma_ang)
                );
            }
            text.push('\n');
        }
    }

    if let Err(err) = fs::write(&out_path, text) {
        eprintln!("error writing {out_path}: {err}");
        std::process::exit(1);
    }
    println!("wrote {out_path}");
}
