//! Integration test: network thinning and propagation on a small survey.
//!
//! Six stations with known poses, nine redundant relative-orientation
//! edges. The spanning tree must reduce the network to five edges and
//! propagation from any held station must reproduce every pose to within
//! floating-point noise of the translation scale.

use rignet_core::{
    att_from_phys_angle, iso3_from_parts, max_mag_diff, relative_transform, Iso3, Vec3,
};
use rignet_graph::{Edge, EdgeDir, Geometry, StaKey};

fn expected_stations() -> Vec<Iso3> {
    // poses spread through a ±50 m working volume with large attitudes
    let locs = [
        [12.5, -31.0, 4.0],
        [-46.0, 8.5, 17.0],
        [33.0, 42.0, -9.5],
        [-5.0, -48.0, 28.0],
        [49.0, -2.5, -36.0],
        [-21.5, 19.0, 44.5],
    ];
    let angs = [
        [0.6, -1.1, 2.4],
        [-2.8, 0.4, 1.0],
        [1.9, 2.2, -0.7],
        [-0.3, -2.5, 1.6],
        [2.9, 0.8, 0.2],
        [-1.4, 1.7, -2.1],
    ];
    locs.iter()
        .zip(angs.iter())
        .map(|(loc, ang)| {
            iso3_from_parts(
                &Vec3::new(loc[0], loc[1], loc[2]),
                &att_from_phys_angle(&Vec3::new(ang[0], ang[1], ang[2])),
            )
        })
        .collect()
}

fn build_network(stations: &[Iso3]) -> Geometry {
    let edge_pairs: [(StaKey, StaKey); 9] = [
        (0, 1),
        (0, 2),
        (0, 4),
        (1, 2),
        (1, 4),
        (2, 3),
        (2, 5),
        (3, 4),
        (4, 5),
    ];

    let mut net_geo = Geometry::new();
    let fit_err = 0.001;
    for (from, into) in edge_pairs {
        let xform = relative_transform(&stations[from], &stations[into]);
        net_geo.insert_edge(Edge::ori(EdgeDir::new(from, into), xform, fit_err));
    }
    net_geo
}

#[test]
fn spanning_tree_and_propagation_recover_all_stations() {
    let stations = expected_stations();
    let net_geo = build_network(&stations);
    assert_eq!(net_geo.size_verts(), 6);
    assert_eq!(net_geo.size_edges(), 9);

    let span_eids = net_geo.spanning_edges();
    assert_eq!(span_eids.len(), 5);

    let mst_geo = net_geo.network_tree(&span_eids);
    assert_eq!(mst_geo.size_verts(), 6);
    assert_eq!(mst_geo.size_edges(), 5);

    // hold station 3, propagate everything else
    let hold_key: StaKey = 3;
    let got_stas = mst_geo.propagate_transforms(hold_key, &stations[hold_key]);
    assert_eq!(got_stas.len(), stations.len());

    let loc_mag = 50.0_f64.hypot(50.0);
    let tol = loc_mag * 64.0 * f64::EPSILON;
    for (key, exp) in stations.iter().enumerate() {
        let got = got_stas[&key];
        let diff = max_mag_diff(&got, exp, false);
        assert!(diff < tol, "station {key}: hexad diff {diff:.3e}");
    }
}

#[test]
fn propagation_is_anchor_independent() {
    let stations = expected_stations();
    let net_geo = build_network(&stations);
    let mst_geo = net_geo.network_tree(&net_geo.spanning_edges());

    let loc_mag = 50.0_f64.hypot(50.0);
    let tol = loc_mag * 64.0 * f64::EPSILON;
    for hold_key in 0..stations.len() {
        let got_stas = mst_geo.propagate_transforms(hold_key, &stations[hold_key]);
        assert_eq!(got_stas.len(), stations.len(), "anchor {hold_key}");
        for (key, exp) in stations.iter().enumerate() {
            assert!(max_mag_diff(&got_stas[&key], exp, false) < tol);
        }
    }
}

#[test]
fn spanning_tree_prefers_light_edges() {
    let stations = expected_stations();

    // same topology, but edges touching station 5 are heavily penalized
    // except one, which must then be the tree's only route to it
    let mut net_geo = Geometry::new();
    let edge_pairs: [(StaKey, StaKey, f64); 9] = [
        (0, 1, 0.001),
        (0, 2, 0.001),
        (0, 4, 0.001),
        (1, 2, 0.001),
        (1, 4, 0.001),
        (2, 3, 0.001),
        (2, 5, 9.0),
        (3, 4, 0.001),
        (4, 5, 0.002),
    ];
    for (from, into, fit_err) in edge_pairs {
        let xform = relative_transform(&stations[from], &stations[into]);
        net_geo.insert_edge(Edge::ori(EdgeDir::new(from, into), xform, fit_err));
    }

    let mst_geo = net_geo.network_tree(&net_geo.spanning_edges());
    // the expensive (2,5) edge must be absent, the cheap (4,5) present
    assert!(mst_geo.edge(&EdgeDir::new(2, 5)).is_none());
    assert!(mst_geo.edge(&EdgeDir::new(4, 5)).is_some());
}
