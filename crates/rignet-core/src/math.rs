//! Mathematical type definitions and validity sentinels.
//!
//! The geometric kernel is `nalgebra`: attitudes are unit quaternions
//! (rotors), rigid transforms are isometries acting as `x ↦ R·x + t`, and
//! the physical rotation angle is carried as a rotation vector whose
//! direction is the rotation axis and whose magnitude is the angle.
//!
//! Invalid values are NaN-bearing, never absent: arithmetic on an invalid
//! input yields an invalid output without branching. Consumers test with
//! [`Validity::is_valid`] before interpreting a result.

use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// Attitude: a unit rotor specifying a rigid-body orientation.
pub type Att = UnitQuaternion<Real>;
/// Even-grade element (scalar + bivector); the unnormalized rotor algebra.
pub type Spinor = Quaternion<Real>;
/// 3D rigid transform (SE(3)) acting as `x ↦ R·x + t`.
pub type Iso3 = Isometry3<Real>;

/// First basis vector.
pub const E1: Vec3 = Vec3::new(1.0, 0.0, 0.0);
/// Second basis vector.
pub const E2: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Third basis vector.
pub const E3: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Null/invalid sentinel construction and testing.
///
/// A value with any NaN component is invalid. The null constructor produces
/// the all-NaN representative of the type.
pub trait Validity: Sized {
    /// The designated invalid value.
    fn null() -> Self;

    /// True if every component is finite.
    fn is_valid(&self) -> bool;
}

impl Validity for Real {
    fn null() -> Self {
        f64::NAN
    }

    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validity for Vec3 {
    fn null() -> Self {
        Vec3::new(f64::NAN, f64::NAN, f64::NAN)
    }

    fn is_valid(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}

impl Validity for Att {
    fn null() -> Self {
        UnitQuaternion::new_unchecked(Quaternion::new(
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
        ))
    }

    fn is_valid(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}

impl Validity for Iso3 {
    fn null() -> Self {
        Iso3::from_parts(Translation3::from(Vec3::null()), Att::null())
    }

    fn is_valid(&self) -> bool {
        self.translation.vector.is_valid() && self.rotation.is_valid()
    }
}

/// Physical angle of an attitude: rotation vector `angle * axis`.
///
/// Inverse of [`att_from_phys_angle`]; the identity attitude maps to the
/// zero vector.
pub fn phys_angle(att: &Att) -> Vec3 {
    att.scaled_axis()
}

/// Attitude from a physical angle rotation vector.
pub fn att_from_phys_angle(ang: &Vec3) -> Att {
    Att::from_scaled_axis(*ang)
}

/// Rigid transform from a location vector and an attitude.
pub fn iso3_from_parts(loc: &Vec3, att: &Att) -> Iso3 {
    Iso3::from_parts(Translation3::from(*loc), *att)
}

/// Relative transform carrying `from`-frame coordinates into `into`-frame
/// coordinates, given both absolute poses in a shared reference frame.
pub fn relative_transform(x_from_wrt_ref: &Iso3, x_into_wrt_ref: &Iso3) -> Iso3 {
    x_into_wrt_ref * x_from_wrt_ref.inverse()
}
