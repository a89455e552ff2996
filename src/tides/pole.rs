use crate::astro::PolarMotion;

// IERS Conventions (2010) eqs. 6.22 and 6.24, normalized coefficients per arcsec
const SOLID_POLE_SCALE: f64 = -1.333e-9;
const SOLID_POLE_CROSS: f64 = 0.0115;

const OCEAN_POLE_C21: f64 = -2.1778e-10;
const OCEAN_POLE_S21: f64 = -1.7232e-10;
const OCEAN_POLE_C21_CROSS: f64 = 0.01724;
const OCEAN_POLE_S21_CROSS: f64 = 0.03365;

/// sqrt(2 (2l+1) (l-m)!/(l+m)!) for (l, m) = (2, 1): normalized to unnormalized.
const UNNORMALIZE_21: f64 = 1.290_994_448_735_805_6;

/// Wobble of the pole about its running mean (arcsec).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolarWobble {
    pub m1: f64,
    pub m2: f64,
}

impl PolarWobble {
    /// m1 = xp - mean xp, m2 = -(yp - mean yp).
    pub fn new(pole: PolarMotion, mean: PolarMotion) -> Self {
        Self {
            m1: pole.x - mean.x,
            m2: -(pole.y - mean.y),
        }
    }

    /// Solid Earth pole tide (dC21, dS21), unnormalized.
    pub fn solid_correction(&self) -> (f64, f64) {
        let dc = SOLID_POLE_SCALE * (self.m1 + SOLID_POLE_CROSS * self.m2);
        let ds = SOLID_POLE_SCALE * (self.m2 - SOLID_POLE_CROSS * self.m1);
        (dc * UNNORMALIZE_21, ds * UNNORMALIZE_21)
    }

    /// Ocean pole tide (dC21, dS21), unnormalized.
    pub fn ocean_correction(&self) -> (f64, f64) {
        let dc = OCEAN_POLE_C21 * (self.m1 - OCEAN_POLE_C21_CROSS * self.m2);
        let ds = OCEAN_POLE_S21 * (self.m2 - OCEAN_POLE_S21_CROSS * self.m1);
        (dc * UNNORMALIZE_21, ds * UNNORMALIZE_21)
    }
}
