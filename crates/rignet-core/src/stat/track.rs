//! Running order-statistics trackers.
//!
//! Each tracker holds every inserted sample (memory is O(n)) so that the
//! exact median and its flanking neighbors are available after every
//! insert. Scalars insert in O(log n) search plus O(n) shift; the composite
//! trackers apply the scalar tracker component-wise.

use crate::align::attitude_from_dir_pairs;
use crate::compare::max_mag_diff;
use crate::math::{iso3_from_parts, Att, Iso3, Real, Validity, Vec3, E1, E2};

/// Track running statistics for individual scalar values.
#[derive(Debug, Clone)]
pub struct Values {
    values: Vec<Real>,
}

impl Values {
    /// Allocate space to hold all anticipated data values.
    ///
    /// The tracker stores a copy of every sample, so reserving up front
    /// avoids reallocation during insertion.
    pub fn new(reserve: usize) -> Self {
        Self {
            values: Vec::with_capacity(reserve),
        }
    }

    /// Number of values inserted so far.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Incorporate a value, maintaining sorted order.
    pub fn insert(&mut self, value: Real) {
        let ndx = self.values.partition_point(|&have| have < value);
        self.values.insert(ndx, value);
    }

    /// Median of all inserted values.
    ///
    /// NaN if empty; the middle element for odd counts, the mean of the two
    /// middle elements for even counts.
    pub fn median(&self) -> Real {
        let size = self.values.len();
        if size == 0 {
            return Real::null();
        }
        let half = size / 2;
        if size % 2 == 1 {
            self.values[half]
        } else {
            0.5 * (self.values[half - 1] + self.values[half])
        }
    }

    /// Largest inserted value at or below the median.
    ///
    /// NaN for fewer than two samples.
    pub fn median_prev(&self) -> Real {
        let size = self.values.len();
        if size < 2 {
            return Real::null();
        }
        // same index for both parities: the element just below the middle
        self.values[size / 2 - 1]
    }

    /// Smallest inserted value at or above the median.
    ///
    /// NaN for fewer than two samples.
    pub fn median_next(&self) -> Real {
        let size = self.values.len();
        if size < 2 {
            return Real::null();
        }
        let half = size / 2;
        if size % 2 == 1 {
            self.values[half + 1]
        } else {
            self.values[half]
        }
    }
}

/// Track running statistics for 3-vector values, component-wise.
#[derive(Debug, Clone)]
pub struct Vectors {
    comps: [Values; 3],
}

impl Vectors {
    /// Allocate space to hold all anticipated data values.
    pub fn new(reserve: usize) -> Self {
        Self {
            comps: [Values::new(reserve), Values::new(reserve), Values::new(reserve)],
        }
    }

    /// Number of vectors inserted so far.
    pub fn size(&self) -> usize {
        self.comps[0].size()
    }

    /// Incorporate a vector into the component collections.
    pub fn insert(&mut self, value: &Vec3) {
        self.comps[0].insert(value[0]);
        self.comps[1].insert(value[1]);
        self.comps[2].insert(value[2]);
    }

    /// Vector of component medians (null if empty).
    pub fn median(&self) -> Vec3 {
        Vec3::new(
            self.comps[0].median(),
            self.comps[1].median(),
            self.comps[2].median(),
        )
    }

    /// Vector of component [`Values::median_prev`] values.
    pub fn median_prev(&self) -> Vec3 {
        Vec3::new(
            self.comps[0].median_prev(),
            self.comps[1].median_prev(),
            self.comps[2].median_prev(),
        )
    }

    /// Vector of component [`Values::median_next`] values.
    pub fn median_next(&self) -> Vec3 {
        Vec3::new(
            self.comps[0].median_next(),
            self.comps[1].median_next(),
            self.comps[2].median_next(),
        )
    }
}

/// Track running statistics for attitudes.
///
/// Each inserted attitude transforms the probe directions `e1` and `e2`;
/// the two image point clouds are tracked component-wise. The median
/// attitude is the one aligning the probe pair onto the median images.
#[derive(Debug, Clone)]
pub struct Attitudes {
    into_vecs: [Vectors; 2],
}

impl Attitudes {
    /// Allocate space to hold all anticipated data values.
    pub fn new(reserve: usize) -> Self {
        Self {
            into_vecs: [Vectors::new(reserve), Vectors::new(reserve)],
        }
    }

    /// Number of attitudes inserted so far.
    pub fn size(&self) -> usize {
        self.into_vecs[0].size()
    }

    /// Incorporate an attitude via its probe-direction images.
    pub fn insert(&mut self, att: &Att) {
        self.into_vecs[0].insert(&(att * E1));
        self.into_vecs[1].insert(&(att * E2));
    }

    fn from_images(&self, into_a: Vec3, into_b: Vec3) -> Att {
        attitude_from_dir_pairs(&(E1, E2), &(into_a, into_b))
    }

    /// Median attitude (null if empty).
    pub fn median(&self) -> Att {
        self.from_images(self.into_vecs[0].median(), self.into_vecs[1].median())
    }

    /// Attitude reconstructed from the flanking-previous probe images.
    pub fn median_prev(&self) -> Att {
        self.from_images(
            self.into_vecs[0].median_prev(),
            self.into_vecs[1].median_prev(),
        )
    }

    /// Attitude reconstructed from the flanking-next probe images.
    pub fn median_next(&self) -> Att {
        self.from_images(
            self.into_vecs[0].median_next(),
            self.into_vecs[1].median_next(),
        )
    }
}

/// Track running statistics for full rigid transforms.
#[derive(Debug, Clone)]
pub struct Transforms {
    locs: Vectors,
    atts: Attitudes,
}

impl Transforms {
    /// Allocate space to hold all anticipated data values.
    pub fn new(reserve: usize) -> Self {
        Self {
            locs: Vectors::new(reserve),
            atts: Attitudes::new(reserve),
        }
    }

    /// Number of transforms inserted so far.
    pub fn size(&self) -> usize {
        self.locs.size()
    }

    /// Incorporate a transform into the component trackers.
    pub fn insert(&mut self, xform: &Iso3) {
        self.locs.insert(&xform.translation.vector);
        self.atts.insert(&xform.rotation);
    }

    /// Transform with median translation and median attitude.
    pub fn median(&self) -> Iso3 {
        iso3_from_parts(&self.locs.median(), &self.atts.median())
    }

    /// Transform reconstructed from the flanking-previous components.
    pub fn median_prev(&self) -> Iso3 {
        iso3_from_parts(&self.locs.median_prev(), &self.atts.median_prev())
    }

    /// Transform reconstructed from the flanking-next components.
    pub fn median_next(&self) -> Iso3 {
        iso3_from_parts(&self.locs.median_next(), &self.atts.median_next())
    }

    /// Scatter estimate for the median transform.
    ///
    /// The hexad distance between the flanking transforms brackets the
    /// sample spread at the middle of the order statistics. For an odd
    /// count the flanks straddle the median so half the distance applies;
    /// for an even count the flanks are the central adjacent pair. NaN for
    /// fewer than two samples.
    pub fn median_error_estimate(&self, normalize: bool) -> Real {
        if self.size() < 2 {
            return Real::null();
        }
        let err = max_mag_diff(&self.median_prev(), &self.median_next(), normalize);
        if self.size() % 2 == 1 {
            0.5 * err
        } else {
            err
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::att_from_phys_angle;
    use approx::assert_relative_eq;

    #[test]
    fn scalar_tracker_reports_running_median() {
        let mut stats = Values::new(32);
        assert!(!stats.median().is_valid());

        // running medians over the insertion sequence
        let inserts = [-8.0, -6.0, 9.0, -1.0, 3.0, 1.0, 4.0];
        let medians = [-8.0, -7.0, -6.0, -3.5, -1.0, 0.0, 1.0];
        for (value, exp) in inserts.iter().zip(medians.iter()) {
            stats.insert(*value);
            assert_eq!(stats.median(), *exp);
        }
        assert_eq!(stats.size(), inserts.len());
    }

    #[test]
    fn scalar_flanks_follow_count_parity() {
        let mut stats = Values::new(8);
        stats.insert(5.0);
        assert!(!stats.median_prev().is_valid());
        assert!(!stats.median_next().is_valid());

        stats.insert(1.0);
        // even: flanks are the central pair itself
        assert_eq!(stats.median_prev(), 1.0);
        assert_eq!(stats.median_next(), 5.0);
        assert_eq!(stats.median(), 3.0);

        stats.insert(3.0);
        // odd: flanks straddle the median element
        assert_eq!(stats.median_prev(), 1.0);
        assert_eq!(stats.median(), 3.0);
        assert_eq!(stats.median_next(), 5.0);
    }

    #[test]
    fn scalar_tracker_agrees_with_batch_median() {
        let data = [3.25, -1.5, 0.0, 7.75, -4.125, 2.5, 2.5, -0.25, 9.0];

        let mut stats = Values::new(data.len());
        for (count, value) in data.iter().enumerate() {
            stats.insert(*value);
            let mut prefix: Vec<Real> = data[..=count].to_vec();
            assert_eq!(stats.median(), crate::robust::median_of(&mut prefix));
        }
    }

    #[test]
    fn vector_tracker_is_component_wise() {
        let mut stats = Vectors::new(8);
        stats.insert(&Vec3::new(1.0, 10.0, -1.0));
        stats.insert(&Vec3::new(3.0, 30.0, -3.0));
        stats.insert(&Vec3::new(2.0, 20.0, -2.0));

        assert_relative_eq!(stats.median(), Vec3::new(2.0, 20.0, -2.0));
        assert_relative_eq!(stats.median_prev(), Vec3::new(1.0, 10.0, -1.0));
        assert_relative_eq!(stats.median_next(), Vec3::new(3.0, 30.0, -3.0));
    }

    #[test]
    fn attitude_tracker_recovers_median_rotation() {
        let rot_dir = Vec3::new(2.0, 3.0, -4.0).normalize();
        let angles = [-0.08, -0.06, 0.01, 0.01, 0.03, 0.04, 0.09];

        let mut stats = Attitudes::new(16);
        for ang in angles {
            stats.insert(&att_from_phys_angle(&(ang * rot_dir)));
        }
        assert_eq!(stats.size(), angles.len());

        let exp = att_from_phys_angle(&(0.01 * rot_dir));
        let diff = stats.median() * exp.inverse();
        assert!(diff.angle() < 1.0e-4);
    }

    #[test]
    fn transform_tracker_combines_components() {
        let rot_dir = Vec3::new(2.0, 3.0, -4.0).normalize();
        let values = [-0.08, -0.06, 0.01, 0.01, 0.03, 0.04, 0.09];

        let mut stats = Transforms::new(16);
        for value in values {
            let loc = Vec3::new(value, value, value);
            stats.insert(&iso3_from_parts(
                &loc,
                &att_from_phys_angle(&(value * rot_dir)),
            ));
        }

        let got = stats.median();
        assert_relative_eq!(
            got.translation.vector,
            Vec3::new(0.01, 0.01, 0.01),
            epsilon = 1.0e-12
        );
        let exp_att = att_from_phys_angle(&(0.01 * rot_dir));
        assert!((got.rotation * exp_att.inverse()).angle() < 1.0e-4);
    }

    #[test]
    fn error_estimate_tracks_flank_spread() {
        let mut stats = Transforms::new(8);
        stats.insert(&Iso3::identity());
        assert!(!stats.median_error_estimate(false).is_valid());

        stats.insert(&iso3_from_parts(&Vec3::new(1.0, 0.0, 0.0), &Att::identity()));
        // even count: full flank distance
        let even_err = stats.median_error_estimate(false);
        assert_relative_eq!(even_err, 1.0, epsilon = 1.0e-12);

        stats.insert(&iso3_from_parts(&Vec3::new(0.5, 0.0, 0.0), &Att::identity()));
        // odd count: flanks straddle the median, halve the distance
        let odd_err = stats.median_error_estimate(false);
        assert_relative_eq!(odd_err, 0.5, epsilon = 1.0e-12);
    }
}
