use nalgebra::{Rotation3, Vector3};

use super::arguments::greenwich_mean_sidereal_time;
use super::epoch::Epoch;
use crate::error::TideResult;

/// Pole coordinates (arcsec).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolarMotion {
    pub x: f64,
    pub y: f64,
}

/// Inertial to Earth-fixed transformation and Earth orientation data.
pub trait FrameReduction: Send + Sync {
    fn inertial_to_earth_fixed(&self, v: &Vector3<f64>, epoch: Epoch) -> TideResult<Vector3<f64>>;

    /// Greenwich sidereal time (rad).
    fn sidereal_time(&self, epoch: Epoch) -> f64;

    /// Whether polar motion data is loaded. When false, pole tide terms are skipped.
    fn is_earth_orientation_initialized(&self) -> bool;

    fn polar_motion(&self, epoch: Epoch) -> TideResult<PolarMotion>;

    /// Running mean pole (arcsec).
    fn polar_motion_mean(&self, epoch: Epoch) -> TideResult<PolarMotion>;
}

// ---------------------------------------------------------------------------
// Earth rotation about the pole by mean sidereal time
// ---------------------------------------------------------------------------

/// Frame reduction by a single rotation through GMST about the z axis.
/// Precession, nutation and polar motion are not applied to vectors; the
/// optional pole values are only reported for the pole tide terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarthRotation {
    pole: Option<(PolarMotion, PolarMotion)>, // (instantaneous, mean)
}

impl EarthRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report constant instantaneous and mean pole coordinates.
    pub fn with_polar_motion(mut self, pole: PolarMotion, mean: PolarMotion) -> Self {
        self.pole = Some((pole, mean));
        self
    }
}

impl FrameReduction for EarthRotation {
    fn inertial_to_earth_fixed(&self, v: &Vector3<f64>, epoch: Epoch) -> TideResult<Vector3<f64>> {
        let theta = self.sidereal_time(epoch);
        Ok(Rotation3::from_axis_angle(&Vector3::z_axis(), -theta) * *v)
    }

    fn sidereal_time(&self, epoch: Epoch) -> f64 {
        greenwich_mean_sidereal_time(epoch)
    }

    fn is_earth_orientation_initialized(&self) -> bool {
        self.pole.is_some()
    }

    fn polar_motion(&self, _epoch: Epoch) -> TideResult<PolarMotion> {
        Ok(self.pole.map(|(p, _)| p).unwrap_or_default())
    }

    fn polar_motion_mean(&self, _epoch: Epoch) -> TideResult<PolarMotion> {
        Ok(self.pole.map(|(_, m)| m).unwrap_or_default())
    }
}
