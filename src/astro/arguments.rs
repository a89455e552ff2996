//! Astronomical arguments driving the tidal constituent phases.

use std::f64::consts::TAU;

use super::epoch::Epoch;

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Five Delaunay fundamental arguments (rad), IERS Conventions (2010) eq. 5.43
/// truncated to the linear term in TT Julian centuries since J2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaunayArguments {
    pub l: f64,       // mean anomaly of the Moon
    pub l_prime: f64, // mean anomaly of the Sun
    pub f: f64,       // mean argument of latitude of the Moon
    pub d: f64,       // mean elongation of the Moon from the Sun
    pub omega: f64,   // mean longitude of the Moon's ascending node
}

impl DelaunayArguments {
    pub fn at(epoch: Epoch) -> Self {
        let t = epoch.centuries_since_j2000();
        let arg = |deg0: f64, rate_arcsec: f64| -> f64 {
            (deg0.to_radians() + rate_arcsec * t * ARCSEC_TO_RAD).rem_euclid(TAU)
        };

        Self {
            l: arg(134.963_402_51, 1_717_915_923.217_8),
            l_prime: arg(357.529_109_18, 129_596_581.048_1),
            f: arg(93.272_090_62, 1_739_527_262.847_8),
            d: arg(297.850_195_47, 1_602_961_601.209_0),
            omega: arg(125.044_555_01, -6_962_890.543_1),
        }
    }

    /// Linear combination N·F with integer multipliers ordered (l, l', F, D, Ω).
    pub fn dot(&self, n: &[i8; 5]) -> f64 {
        n[0] as f64 * self.l
            + n[1] as f64 * self.l_prime
            + n[2] as f64 * self.f
            + n[3] as f64 * self.d
            + n[4] as f64 * self.omega
    }
}

/// Greenwich mean sidereal time (rad) from the Earth rotation angle plus the
/// IAU 2006 polynomial. The epoch stands in for both UT1 and TT.
pub fn greenwich_mean_sidereal_time(epoch: Epoch) -> f64 {
    let du = epoch.days_since_j2000();
    let t = epoch.centuries_since_j2000();

    let era = TAU * (0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du + du.fract());
    let poly_arcsec = 0.014_506
        + t * (4612.156_534 + t * (1.391_581_7 + t * (-0.000_000_44 + t * (-0.000_029_956))));

    (era + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}
