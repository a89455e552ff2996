use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;

use super::legendre::LegendreTable;
use crate::tides::CoefficientDeviations;

/// Latitudes are kept this far (rad) from the poles before tan(lat) is taken.
pub const POLE_GUARD: f64 = 1e-10;

/// Partial derivatives of the tidal disturbing potential in geocentric
/// spherical coordinates.
///
/// `du_dr` is the radial partial already divided by r, the form the Cartesian
/// transform consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PotentialGradient {
    pub du_dr: f64,   // 1/s^2
    pub du_dlat: f64, // km^2/s^2 per rad
    pub du_dlon: f64, // km^2/s^2 per rad
}

impl PotentialGradient {
    /// Sum the coefficient deviations against the satellite's Legendre values.
    ///
    /// `radius` (km), `latitude` and `longitude` (rad) are geocentric and
    /// Earth-fixed; `earth_radius` (km) and `gm` (km^3/s^2) scale the field.
    pub fn evaluate(
        radius: f64,
        latitude: f64,
        longitude: f64,
        deviations: &CoefficientDeviations,
        earth_radius: f64,
        gm: f64,
    ) -> Self {
        let lmax = deviations.max_degree();
        let lat = latitude.clamp(-FRAC_PI_2 + POLE_GUARD, FRAC_PI_2 - POLE_GUARD);
        if lat != latitude {
            log::debug!("Latitude {latitude} clamped to {lat} for tidal gradient");
        }
        let p = LegendreTable::new(lat, lmax);
        let tan_lat = lat.tan();

        // cos(m*lon), sin(m*lon) by the angle-addition recursion
        let mut cos_m = vec![0.0; lmax + 1];
        let mut sin_m = vec![0.0; lmax + 1];
        cos_m[0] = 1.0;
        cos_m[1] = longitude.cos();
        sin_m[1] = longitude.sin();
        for m in 2..=lmax {
            cos_m[m] = 2.0 * cos_m[1] * cos_m[m - 1] - cos_m[m - 2];
            sin_m[m] = 2.0 * cos_m[1] * sin_m[m - 1] - sin_m[m - 2];
        }

        let ratio = earth_radius / radius;
        let mut sum_r = 0.0;
        let mut sum_lat = 0.0;
        let mut sum_lon = 0.0;

        for l in 2..=lmax {
            let scale = ratio.powi(l as i32);
            for m in 0..=l {
                let (c, s) = (deviations.c(l, m), deviations.s(l, m));
                let mf = m as f64;
                let in_phase = c * cos_m[m] + s * sin_m[m];
                let quadrature = s * cos_m[m] - c * sin_m[m];

                sum_r += scale * (l as f64 + 1.0) * p.get(l, m) * in_phase;
                sum_lat += scale * (p.get(l, m + 1) - mf * tan_lat * p.get(l, m)) * in_phase;
                sum_lon += scale * mf * p.get(l, m) * quadrature;
            }
        }

        Self {
            du_dr: -gm / radius.powi(3) * sum_r,
            du_dlat: gm / radius * sum_lat,
            du_dlon: gm / radius * sum_lon,
        }
    }

    /// Cartesian acceleration from the spherical partials and the position `pos` (km).
    ///
    /// On the rotation axis (x = y = 0) the horizontal components are zero.
    pub fn to_acceleration(&self, pos: &Vector3<f64>) -> Vector3<f64> {
        let r2 = pos.norm_squared();
        let rho2 = pos.x * pos.x + pos.y * pos.y;
        if rho2 == 0.0 {
            return Vector3::new(0.0, 0.0, self.du_dr * pos.z);
        }
        let rho = rho2.sqrt();

        let t1 = self.du_dlon / rho2;
        let t2 = self.du_dr - pos.z / (r2 * rho) * self.du_dlat;

        Vector3::new(
            t2 * pos.x - t1 * pos.y,
            t2 * pos.y + t1 * pos.x,
            self.du_dr * pos.z + rho / r2 * self.du_dlat,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const RE: f64 = 6378.1363;
    const GM: f64 = 398_600.4415;

    fn single(l: usize, m: usize, c: f64, s: f64) -> CoefficientDeviations {
        let mut d = CoefficientDeviations::new(l.max(2));
        d.add(l, m, c, s);
        d
    }

    /// Potential of the deviation field, for finite-difference checks.
    fn potential(r: f64, lat: f64, lon: f64, d: &CoefficientDeviations) -> f64 {
        let p = LegendreTable::new(lat, d.max_degree());
        let mut u = 0.0;
        for l in 2..=d.max_degree() {
            for m in 0..=l {
                let mf = m as f64;
                u += (RE / r).powi(l as i32)
                    * p.get(l, m)
                    * (d.c(l, m) * (mf * lon).cos() + d.s(l, m) * (mf * lon).sin());
            }
        }
        GM / r * u
    }

    #[test]
    fn zero_deviations_give_zero_gradient() {
        let d = CoefficientDeviations::new(6);
        let g = PotentialGradient::evaluate(7000.0, 0.4, 1.1, &d, RE, GM);
        assert_eq!(g, PotentialGradient::default());
        let a = g.to_acceleration(&Vector3::new(4000.0, 3000.0, 4500.0));
        assert_eq!(a, Vector3::zeros());
    }

    #[test]
    fn partials_match_finite_differences() {
        let mut d = CoefficientDeviations::new(4);
        d.add(2, 0, -1.2e-8, 0.0);
        d.add(2, 1, 3.0e-10, -2.0e-10);
        d.add(2, 2, 4.0e-9, 1.5e-9);
        d.add(3, 1, -7.0e-11, 2.0e-11);
        d.add(4, 3, 5.0e-13, -6.0e-13);

        let (r, lat, lon) = (6900.0, 0.55, -2.1);
        let g = PotentialGradient::evaluate(r, lat, lon, &d, RE, GM);

        let h = 1e-6;
        let du_dr = (potential(r + h, lat, lon, &d) - potential(r - h, lat, lon, &d)) / (2.0 * h);
        let du_dlat = (potential(r, lat + h, lon, &d) - potential(r, lat - h, lon, &d)) / (2.0 * h);
        let du_dlon = (potential(r, lat, lon + h, &d) - potential(r, lat, lon - h, &d)) / (2.0 * h);

        assert_relative_eq!(g.du_dr * r, du_dr, max_relative = 1e-5);
        assert_relative_eq!(g.du_dlat, du_dlat, max_relative = 1e-5);
        assert_relative_eq!(g.du_dlon, du_dlon, max_relative = 1e-5);
    }

    #[test]
    fn acceleration_is_cartesian_gradient() {
        let d = single(2, 2, 3.0e-9, -1.0e-9);
        let pos: Vector3<f64> = Vector3::new(5200.0, -3100.0, 3600.0);
        let (r, lat, lon) = (pos.norm(), (pos.z / pos.norm()).asin(), pos.y.atan2(pos.x));
        let a = PotentialGradient::evaluate(r, lat, lon, &d, RE, GM).to_acceleration(&pos);

        let u = |p: Vector3<f64>| potential(p.norm(), (p.z / p.norm()).asin(), p.y.atan2(p.x), &d);
        let h = 1e-3;
        for i in 0..3 {
            let mut e = Vector3::<f64>::zeros();
            e[i] = h;
            let fd = (u(pos + e) - u(pos - e)) / (2.0 * h);
            assert_relative_eq!(a[i], fd, max_relative = 1e-5);
        }
    }

    #[test]
    fn zonal_field_on_equator_is_radial() {
        let d = single(2, 0, -1.0e-8, 0.0);
        let pos = Vector3::new(7000.0, 0.0, 0.0);
        let a = PotentialGradient::evaluate(7000.0, 0.0, 0.0, &d, RE, GM).to_acceleration(&pos);
        assert_abs_diff_eq!(a.y, 0.0);
        assert_abs_diff_eq!(a.z, 0.0, epsilon = 1e-25);
        // dU/dr = -3 GM/r^2 (RE/r)^2 C20 P20(0), P20(0) = -1/2
        let expected = -3.0 * GM / (7000.0 * 7000.0) * (RE / 7000.0).powi(2) * -1.0e-8 * -0.5;
        assert_relative_eq!(a.x, expected, max_relative = 1e-12);
    }

    #[test]
    fn exact_pole_is_finite() {
        let mut d = CoefficientDeviations::new(3);
        d.add(2, 1, 2.0e-10, 1.0e-10);
        d.add(3, 2, 1.0e-11, 0.0);
        let g = PotentialGradient::evaluate(7000.0, FRAC_PI_2, 0.3, &d, RE, GM);
        assert!(g.du_dr.is_finite() && g.du_dlat.is_finite() && g.du_dlon.is_finite());

        let a = g.to_acceleration(&Vector3::new(0.0, 0.0, 7000.0));
        assert!(a.iter().all(|v| v.is_finite()));
        assert_eq!(a.x, 0.0);
        assert_eq!(a.y, 0.0);
    }
}
