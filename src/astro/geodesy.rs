use nalgebra::Vector3;

/// Geodetic coordinates on a reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub latitude: f64,  // rad
    pub longitude: f64, // rad
    pub height: f64,    // km
}

/// Geodetic coordinates of an Earth-fixed position (Montenbruck & Gill iteration).
pub fn geodetic(pos: &Vector3<f64>, radius: f64, flattening: f64) -> Geodetic {
    let e2 = flattening * (2.0 - flattening);
    let rho2 = pos.x * pos.x + pos.y * pos.y;

    let mut dz = e2 * pos.z;
    let mut n = radius;
    for _ in 0..20 {
        let zdz = pos.z + dz;
        let nh = (rho2 + zdz * zdz).sqrt();
        if nh == 0.0 {
            break;
        }
        let sin_phi = zdz / nh;
        n = radius / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let dz_new = n * e2 * sin_phi;
        if (dz_new - dz).abs() < 1e-12 * radius {
            dz = dz_new;
            break;
        }
        dz = dz_new;
    }

    let zdz = pos.z + dz;
    Geodetic {
        latitude: zdz.atan2(rho2.sqrt()),
        longitude: pos.y.atan2(pos.x),
        height: (rho2 + zdz * zdz).sqrt() - n,
    }
}

/// Geocentric spherical coordinates and their rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricState {
    pub radius: f64,         // km
    pub latitude: f64,       // rad
    pub longitude: f64,      // rad
    pub radius_rate: f64,    // km/s
    pub latitude_rate: f64,  // rad/s
    pub longitude_rate: f64, // rad/s
}

impl GeocentricState {
    /// From an Earth-fixed position (km) and velocity (km/s).
    pub fn from_state(pos: &Vector3<f64>, vel: &Vector3<f64>) -> Self {
        let r = pos.norm();
        let rho2 = pos.x * pos.x + pos.y * pos.y;
        let rho = rho2.sqrt();

        let radius_rate = if r > 0.0 { pos.dot(vel) / r } else { 0.0 };
        let (latitude_rate, longitude_rate) = if rho > 0.0 {
            let rho_rate = (pos.x * vel.x + pos.y * vel.y) / rho;
            (
                (vel.z * rho - pos.z * rho_rate) / (r * r),
                (pos.x * vel.y - pos.y * vel.x) / rho2,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            radius: r,
            latitude: pos.z.atan2(rho),
            longitude: pos.y.atan2(pos.x),
            radius_rate,
            latitude_rate,
            longitude_rate,
        }
    }
}
