//! Tide-induced deviations of the spherical-harmonic gravity coefficients.
//!
//! Each tide model implements [`CoefficientModel`]: given the Sun and Moon
//! state and the epoch it fills a [`CoefficientDeviations`] table of
//! unnormalized dC/dS values, which the gravity module turns into an
//! acceleration.

pub mod constituents;
pub mod ocean;
pub mod pole;
pub mod solid;

use nalgebra::Vector3;

use crate::astro::{geodetic, Body, EarthModel, Epoch};

pub use ocean::{OceanTide, OceanTideTable, TideAmplitudes};
pub use pole::PolarWobble;
pub use solid::SolidTide;

/// Highest degree any tide model populates.
pub const MAX_DEGREE: usize = 6;

/// Which tidal effect to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TideKind {
    Solid,
    Ocean,
}

// ---------------------------------------------------------------------------
// Coefficient deviation table
// ---------------------------------------------------------------------------

/// dC[l][m], dS[l][m] for 2 <= l <= max_degree. Entries outside the populated
/// range read as zero and dS[l][0] is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientDeviations {
    lmax: usize,
    c: [[f64; MAX_DEGREE + 1]; MAX_DEGREE + 1],
    s: [[f64; MAX_DEGREE + 1]; MAX_DEGREE + 1],
}

impl CoefficientDeviations {
    /// Empty table covering degrees 2..=lmax (clamped to 2..=6).
    pub fn new(lmax: usize) -> Self {
        Self {
            lmax: lmax.clamp(2, MAX_DEGREE),
            c: [[0.0; MAX_DEGREE + 1]; MAX_DEGREE + 1],
            s: [[0.0; MAX_DEGREE + 1]; MAX_DEGREE + 1],
        }
    }

    pub fn max_degree(&self) -> usize {
        self.lmax
    }

    pub fn c(&self, l: usize, m: usize) -> f64 {
        if l > MAX_DEGREE || m > l {
            return 0.0;
        }
        self.c[l][m]
    }

    pub fn s(&self, l: usize, m: usize) -> f64 {
        if l > MAX_DEGREE || m > l {
            return 0.0;
        }
        self.s[l][m]
    }

    /// Accumulate into (l, m). The sine term is dropped at order zero, and
    /// entries outside degree 2..=max_degree or with m > l are ignored, so
    /// they keep reading as zero.
    pub fn add(&mut self, l: usize, m: usize, dc: f64, ds: f64) {
        if l < 2 || l > self.lmax || m > l {
            return;
        }
        self.c[l][m] += dc;
        if m > 0 {
            self.s[l][m] += ds;
        }
    }
}

// ---------------------------------------------------------------------------
// Model inputs
// ---------------------------------------------------------------------------

/// Sun or Moon as seen from the geocentre at the evaluation epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerturbingBody {
    pub body: Body,
    pub inertial: Vector3<f64>,    // km
    pub earth_fixed: Vector3<f64>, // km
    pub gm: f64,                   // km^3/s^2
    pub distance: f64,             // km
    pub latitude: f64,             // rad, geodetic
    pub longitude: f64,            // rad
}

impl PerturbingBody {
    pub fn new(
        body: Body,
        inertial: Vector3<f64>,
        earth_fixed: Vector3<f64>,
        gm: f64,
        earth: &dyn EarthModel,
    ) -> Self {
        let g = geodetic(&earth_fixed, earth.radius(), earth.flattening());
        Self {
            body,
            inertial,
            earth_fixed,
            gm,
            distance: earth_fixed.norm(),
            latitude: g.latitude,
            longitude: g.longitude,
        }
    }
}

/// Everything a coefficient model may read for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct TideInputs<'a> {
    pub epoch: Epoch,
    pub bodies: &'a [PerturbingBody],
    pub earth_radius: f64,  // km
    pub earth_gm: f64,      // km^3/s^2
    pub sidereal_time: f64, // rad
    /// Present only when Earth orientation data is available.
    pub wobble: Option<PolarWobble>,
}

/// A tide model producing coefficient deviations.
pub trait CoefficientModel {
    fn max_degree(&self) -> usize;

    fn deviations(&self, inputs: &TideInputs) -> CoefficientDeviations;
}

/// The two tide models, each carrying its own constant tables.
#[derive(Debug, Clone)]
pub enum TideModel {
    Solid(SolidTide),
    Ocean(OceanTide),
}

impl TideModel {
    pub fn kind(&self) -> TideKind {
        match self {
            TideModel::Solid(_) => TideKind::Solid,
            TideModel::Ocean(_) => TideKind::Ocean,
        }
    }
}

impl CoefficientModel for TideModel {
    fn max_degree(&self) -> usize {
        match self {
            TideModel::Solid(m) => m.max_degree(),
            TideModel::Ocean(m) => m.max_degree(),
        }
    }

    fn deviations(&self, inputs: &TideInputs) -> CoefficientDeviations {
        match self {
            TideModel::Solid(m) => m.deviations(inputs),
            TideModel::Ocean(m) => m.deviations(inputs),
        }
    }
}

pub(crate) fn factorial(n: usize) -> f64 {
    (1..=n).map(|k| k as f64).product()
}
