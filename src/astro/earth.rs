// ---------------------------------------------------------------------------
// Earth reference constants (EGM2008 / WGS84)
// ---------------------------------------------------------------------------

pub const EARTH_RADIUS_KM: f64 = 6_378.136_3;    // EGM2008 reference radius, km
pub const MU_EARTH: f64 = 398_600.441_5;          // km^3/s^2
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Reference ellipsoid and gravity field scale used by the tide models.
pub trait EarthModel: Send + Sync {
    /// Reference radius of the gravity field (km).
    fn radius(&self) -> f64;

    /// Gravitational parameter (km^3/s^2).
    fn gm(&self) -> f64;

    fn flattening(&self) -> f64;
}

#[derive(Debug, Clone, Copy)]
pub struct EarthConstants {
    pub radius: f64,     // km
    pub gm: f64,         // km^3/s^2
    pub flattening: f64,
}

impl Default for EarthConstants {
    fn default() -> Self {
        Self {
            radius: EARTH_RADIUS_KM,
            gm: MU_EARTH,
            flattening: EARTH_FLATTENING,
        }
    }
}

impl EarthModel for EarthConstants {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn gm(&self) -> f64 {
        self.gm
    }

    fn flattening(&self) -> f64 {
        self.flattening
    }
}
