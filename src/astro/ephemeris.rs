use nalgebra::Vector3;

use super::epoch::Epoch;
use crate::error::TideResult;

pub const GM_SUN: f64 = 1.327_124_400_18e11; // km^3/s^2
pub const GM_MOON: f64 = 4_902.800_066;      // km^3/s^2

const OBLIQUITY_J2000_DEG: f64 = 23.439_291_11;
const ARCSEC_TO_DEG: f64 = 1.0 / 3600.0;

/// Tide-raising bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    pub const ALL: [Body; 2] = [Body::Sun, Body::Moon];
}

/// Source of geocentric Sun and Moon positions in the inertial frame.
pub trait Ephemeris: Send + Sync {
    fn is_initialized(&self) -> bool {
        true
    }

    /// Geocentric inertial position (km).
    fn body_position(&self, epoch: Epoch, body: Body) -> TideResult<Vector3<f64>>;

    /// Gravitational parameter (km^3/s^2).
    fn body_gm(&self, body: Body) -> f64;
}

// ---------------------------------------------------------------------------
// Analytic low-precision ephemeris
// ---------------------------------------------------------------------------

/// Truncated analytic series for the Sun (~0.01 deg) and Moon (~few arcmin),
/// Montenbruck & Gill, Satellite Orbits, sections 3.3.2-3.3.3.
/// Positions are referred to the mean equator and equinox of J2000.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowPrecisionEphemeris;

impl Ephemeris for LowPrecisionEphemeris {
    fn body_position(&self, epoch: Epoch, body: Body) -> TideResult<Vector3<f64>> {
        let t = epoch.centuries_since_j2000();
        Ok(match body {
            Body::Sun => sun_position(t),
            Body::Moon => moon_position(t),
        })
    }

    fn body_gm(&self, body: Body) -> f64 {
        match body {
            Body::Sun => GM_SUN,
            Body::Moon => GM_MOON,
        }
    }
}

fn sun_position(t: f64) -> Vector3<f64> {
    let m = (357.525_6 + 35_999.049 * t).to_radians();
    let lon = (282.940
        + m.to_degrees()
        + (6_892.0 * m.sin() + 72.0 * (2.0 * m).sin()) * ARCSEC_TO_DEG)
        .to_radians();
    let r = (149.619 - 2.499 * m.cos() - 0.021 * (2.0 * m).cos()) * 1.0e6; // km

    ecliptic_to_equatorial(r, lon, 0.0)
}

fn moon_position(t: f64) -> Vector3<f64> {
    // Mean arguments (deg)
    let l0 = 218.316_17 + 481_267.880_88 * t - 1.3972 * t;
    let l = (134.962_92 + 477_198.867_53 * t).to_radians();
    let lp = (357.525_43 + 35_999.049_44 * t).to_radians();
    let f = (93.272_83 + 483_202.018_73 * t).to_radians();
    let d = (297.850_27 + 445_267.111_35 * t).to_radians();

    let dlon_arcsec = 22_640.0 * l.sin() + 769.0 * (2.0 * l).sin()
        - 4_586.0 * (l - 2.0 * d).sin()
        + 2_370.0 * (2.0 * d).sin()
        - 668.0 * lp.sin()
        - 412.0 * (2.0 * f).sin()
        - 212.0 * (2.0 * l - 2.0 * d).sin()
        - 206.0 * (l + lp - 2.0 * d).sin()
        + 192.0 * (l + 2.0 * d).sin()
        - 165.0 * (lp - 2.0 * d).sin()
        + 148.0 * (l - lp).sin()
        - 125.0 * d.sin()
        - 110.0 * (l + lp).sin()
        - 55.0 * (2.0 * f - 2.0 * d).sin();
    let lon_deg = l0 + dlon_arcsec * ARCSEC_TO_DEG;

    let arg = f + ((lon_deg - l0) + (412.0 * (2.0 * f).sin() + 541.0 * lp.sin()) * ARCSEC_TO_DEG)
        .to_radians();
    let lat_arcsec = 18_520.0 * arg.sin() - 526.0 * (f - 2.0 * d).sin()
        + 44.0 * (l + f - 2.0 * d).sin()
        - 31.0 * (-l + f - 2.0 * d).sin()
        - 25.0 * (-2.0 * l + f).sin()
        - 23.0 * (lp + f - 2.0 * d).sin()
        + 21.0 * (-l + f).sin()
        + 11.0 * (-lp + f - 2.0 * d).sin();

    let r = 385_000.0
        - 20_905.0 * l.cos()
        - 3_699.0 * (2.0 * d - l).cos()
        - 2_956.0 * (2.0 * d).cos()
        - 570.0 * (2.0 * l).cos()
        + 246.0 * (2.0 * l - 2.0 * d).cos()
        - 205.0 * (lp - 2.0 * d).cos()
        - 171.0 * (l + 2.0 * d).cos()
        - 152.0 * (l + lp - 2.0 * d).cos();

    ecliptic_to_equatorial(
        r,
        lon_deg.to_radians(),
        (lat_arcsec * ARCSEC_TO_DEG).to_radians(),
    )
}

fn ecliptic_to_equatorial(r: f64, lon: f64, lat: f64) -> Vector3<f64> {
    let eps = OBLIQUITY_J2000_DEG.to_radians();
    let ecl = Vector3::new(r * lon.cos() * lat.cos(), r * lon.sin() * lat.cos(), r * lat.sin());
    Vector3::new(
        ecl.x,
        eps.cos() * ecl.y - eps.sin() * ecl.z,
        eps.sin() * ecl.y + eps.cos() * ecl.z,
    )
}
