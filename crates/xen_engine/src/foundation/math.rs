//! Math utilities and types
//!
//! Provides the nalgebra aliases used across the engine and the TRS
//! compose/decompose helpers the scene graph relies on.
//!
//! ## Conventions
//!
//! - Column vectors: a world matrix is `parent_world * local`.
//! - Composed transforms are `T * R * S`.
//! - Euler angles are stored in degrees as `(pitch, yaw, roll)` where pitch
//!   rotates about Y, yaw about X and roll about Z, and the rotation matrix is
//!   `Rz(roll) * Ry(pitch) * Rx(yaw)`. [`euler_degrees_from_quat`] is the exact
//!   inverse of [`quat_from_euler_degrees`] away from the gimbal-lock region.

pub use nalgebra::{Matrix3, Matrix4, Rotation3, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Below this `|cos(pitch)|` the Euler decomposition is treated as gimbal locked.
pub const GIMBAL_LOCK_EPSILON: f64 = 1e-4;

/// Gimbal-lock band for rotations recovered from `f32` matrices.
///
/// Rounding in an `f32` matrix built at exactly ±90° pitch leaves
/// `|cos(pitch)|` at up to about 2.1e-4 after decomposition, above
/// [`GIMBAL_LOCK_EPSILON`]. This band covers that noise with headroom and
/// still sends 89.97° and below through the regular branch.
pub const MATRIX_GIMBAL_LOCK_EPSILON: f64 = 5e-4;

/// Scale magnitudes below this cannot yield a rotation basis.
const DEGENERATE_SCALE: f64 = 1e-12;

/// A matrix split into translation, rotation and scale.
///
/// Decomposition runs in `f64`; Euler extraction uses the wider
/// [`MATRIX_GIMBAL_LOCK_EPSILON`] band since the source data is `f32`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedMatrix {
    /// Translation column
    pub translation: Vector3<f64>,
    /// Unit rotation
    pub rotation: UnitQuaternion<f64>,
    /// Per-axis scale, with X negated for mirrored bases
    pub scale: Vector3<f64>,
}

impl DecomposedMatrix {
    /// Decompose an affine TRS matrix.
    ///
    /// A degenerate basis (any axis scaled to zero) yields the identity rotation.
    pub fn new(matrix: &Mat4) -> Self {
        let m = matrix.cast::<f64>();
        let translation = Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]);

        let basis: Matrix3<f64> = m.fixed_view::<3, 3>(0, 0).into_owned();
        let mut scale = Vector3::new(
            basis.column(0).norm(),
            basis.column(1).norm(),
            basis.column(2).norm(),
        );
        if basis.determinant() < 0.0 {
            scale.x = -scale.x;
        }

        let rotation = if scale.iter().any(|s| s.abs() < DEGENERATE_SCALE) {
            UnitQuaternion::identity()
        } else {
            let mut rotation_matrix = basis;
            for (mut column, s) in rotation_matrix.column_iter_mut().zip(scale.iter()) {
                column /= *s;
            }
            UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation_matrix))
        };

        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Rotation as Euler degrees `(pitch, yaw, roll)`
    pub fn euler_degrees(&self) -> Vector3<f64> {
        euler_degrees_within(&self.rotation, MATRIX_GIMBAL_LOCK_EPSILON)
    }
}

/// Convert a unit quaternion to Euler degrees `(pitch, yaw, roll)`.
///
/// Near ±90° pitch the yaw and roll axes coincide; yaw is then forced to zero
/// and the remaining rotation is reported as roll.
pub fn euler_degrees_from_quat(rotation: &UnitQuaternion<f64>) -> Vector3<f64> {
    euler_degrees_within(rotation, GIMBAL_LOCK_EPSILON)
}

fn euler_degrees_within(rotation: &UnitQuaternion<f64>, gimbal_epsilon: f64) -> Vector3<f64> {
    let (qw, qx, qy, qz) = (rotation.w, rotation.i, rotation.j, rotation.k);

    let pitch = (-2.0 * (qx * qz - qw * qy)).clamp(-1.0, 1.0).asin();
    let (yaw, roll) = if pitch.cos().abs() > gimbal_epsilon {
        (
            (2.0 * (qy * qz + qw * qx)).atan2(1.0 - 2.0 * (qx * qx + qy * qy)),
            (2.0 * (qx * qy + qw * qz)).atan2(1.0 - 2.0 * (qy * qy + qz * qz)),
        )
    } else {
        (
            0.0,
            (-2.0 * (qx * qy - qw * qz)).atan2(1.0 - 2.0 * (qx * qx + qz * qz)),
        )
    };

    Vector3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}

/// Build a rotation from Euler degrees `(pitch, yaw, roll)`
pub fn quat_from_euler_degrees(euler: &Vec3) -> Quat {
    // nalgebra orders the arguments as rotations about X, Y, Z
    Quat::from_euler_angles(
        utils::deg_to_rad(euler.y),
        utils::deg_to_rad(euler.x),
        utils::deg_to_rad(euler.z),
    )
}

/// Compose `T * R * S` from a position, Euler degrees and scale
pub fn compose_trs(position: &Vec3, euler_degrees: &Vec3, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(position)
        * quat_from_euler_degrees(euler_degrees).to_homogeneous()
        * Mat4::new_nonuniform_scaling(scale)
}

/// Invert an affine matrix, falling back to the identity when singular
pub fn inverse_or_identity(matrix: &Mat4) -> Mat4 {
    matrix.try_inverse().unwrap_or_else(|| {
        log::warn!("Singular transform matrix has no inverse; using identity");
        Mat4::identity()
    })
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}
