use nalgebra::{Matrix3, Vector3};

/// Frame time as raw integer microseconds, the unit embedded in the
/// sequence filenames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }
    pub fn as_micros(&self) -> i64 {
        self.0
    }
    pub fn as_sec(&self) -> f64 {
        self.0 as f64 / 1e6
    }
}

/// Rigid transform. Tracking hands back the world-to-camera form; the
/// trajectory stores the camera-to-world form obtained with [`Pose::inverse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Pose {
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// R' = Rᵀ, t' = -Rᵀ·t
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.transpose();
        let translation = -(rotation * self.translation);
        Self {
            rotation,
            translation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
