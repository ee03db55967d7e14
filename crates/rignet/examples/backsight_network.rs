//! Simulate a small backsight survey, robust-fit the network and print the
//! adjusted station poses.
//!
//! Optionally writes the network as a graphviz `.dot` file:
//!
//! ```text
//! cargo run --example backsight_network -- network.dot
//! ```

use std::path::PathBuf;

use rignet::core::compare::difference_stats;
use rignet::prelude::*;
use rignet::sim::scenario::backsight_transforms;
use rignet::sim::{random_stations, seeded_rng};

fn main() {
    let dot_path = std::env::args().nth(1).map(PathBuf::from);

    let mut rng = seeded_rng(55342463);

    // simulate ground truth and noisy backsight bundles
    let num_stas = 10;
    let exp_stas = random_stations(&mut rng, num_stas, (-50.0, 100.0));
    let noise = NoiseModel {
        sigma_loc: 1.0 / 8.0,
        sigma_ang: 5.0 / 1024.0,
        prob_err: 0.0,
        loc_min_max: (-50.0, 100.0),
        ang_min_max: (-3.14, 3.14),
    };
    let bundles = backsight_transforms(&mut rng, &exp_stas, 3, 15, 2, &noise);

    // robust-fit each bundle into a weighted edge
    let mut net = Geometry::new();
    for ((from, into), xforms) in &bundles {
        let fit_xform = transform_via_effect(xforms);
        let stats = difference_stats(xforms, &fit_xform, false);
        net.insert_edge(Edge::ori(
            EdgeDir::new(*from, *into),
            fit_xform,
            stats.med_mag_diff,
        ));
    }
    println!("{}", net.info_string("full network:"));

    // thin to the minimum spanning tree and propagate from station 0
    let tree = net.network_tree(&net.spanning_edges());
    println!("{}", tree.info_string("spanning tree:"));

    let got_stas = tree.propagate_transforms(0, &exp_stas[0]);
    println!("\nadjusted stations (location error vs simulation truth):");
    for (key, got) in &got_stas {
        let exp = &exp_stas[*key];
        let loc_err = (got.translation.vector - exp.translation.vector).norm();
        println!(
            "  sta {key:2}  loc [{:8.3} {:8.3} {:8.3}]  err {loc_err:.4}",
            got.translation.vector.x, got.translation.vector.y, got.translation.vector.z,
        );
    }

    if let Some(path) = dot_path {
        match net.save_network_graphic(&path) {
            Ok(()) => println!("\nwrote {}", path.display()),
            Err(err) => eprintln!("error writing {}: {err}", path.display()),
        }
    }
}
