//! Pose value types for goal submission.
//!
//! A [`Pose`] is immutable once constructed: one fresh value per waypoint,
//! so successive submissions can never alias each other's state.

/// Orientation as a unit quaternion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    /// Identity rotation (no heading change).
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }

    /// Rotation about the vertical axis by `theta` radians.
    pub fn from_yaw(theta: f64) -> Self {
        let half = theta * 0.5;
        Self {
            x: 0.0,
            y: 0.0,
            z: half.sin(),
            w: half.cos(),
        }
    }

    /// Recover the yaw angle in radians.
    pub fn yaw(&self) -> f64 {
        2.0 * self.z.atan2(self.w)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

/// Target position and orientation for a navigation goal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub orientation: Quaternion,
}

impl Pose {
    /// Create a pose with an explicit orientation.
    pub fn new(x: f64, y: f64, orientation: Quaternion) -> Self {
        Self { x, y, orientation }
    }

    /// Create a pose facing `theta` radians from the x-axis.
    pub fn with_yaw(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            orientation: Quaternion::from_yaw(theta),
        }
    }

    /// Euclidean distance to another pose (position only).
    pub fn distance(&self, other: &Pose) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_quaternion() {
        let q = Quaternion::identity();
        assert!((q.w - 1.0).abs() < 1e-12);
        assert!(q.z.abs() < 1e-12);
        assert!(q.yaw().abs() < 1e-12);
    }

    #[test]
    fn test_from_yaw_roundtrip() {
        for theta in [-PI * 0.75, -0.5, 0.0, 0.5, 1.0, PI * 0.75] {
            let q = Quaternion::from_yaw(theta);
            assert!(
                (q.yaw() - theta).abs() < 1e-12,
                "yaw roundtrip failed for {}",
                theta
            );
        }
    }

    #[test]
    fn test_from_yaw_half_turn() {
        let q = Quaternion::from_yaw(PI);
        assert!((q.z - 1.0).abs() < 1e-12);
        assert!(q.w.abs() < 1e-12);
    }

    #[test]
    fn test_pose_distance() {
        let a = Pose::with_yaw(0.0, 0.0, 0.0);
        let b = Pose::with_yaw(3.0, 4.0, 1.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }
}
