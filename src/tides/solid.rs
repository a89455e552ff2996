use super::{factorial, CoefficientDeviations, CoefficientModel, TideInputs};
use crate::physics::legendre::LegendreTable;

/// Nominal Love numbers k(l, m) for degree 2 and 3, indexed [l][m]
/// (IERS Conventions 2010, Table 6.3, anelastic Earth).
pub const LOVE_NUMBERS: [[f64; 4]; 4] = [
    [0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0],
    [0.301_90, 0.298_30, 0.301_02, 0.0],
    [0.093, 0.093, 0.093, 0.094],
];

/// k(+)_2m for the degree-4 response to degree-2 forcing, by order.
pub const LOVE_NUMBERS_PLUS: [f64; 3] = [-0.000_87, -0.000_79, -0.000_57];

/// Solid Earth tide: degree 2 and 3 response plus the degree-4 term driven
/// by degree-2 forcing.
#[derive(Debug, Clone, Copy)]
pub struct SolidTide {
    pub love: [[f64; 4]; 4],
    pub love_plus: [f64; 3],
}

impl Default for SolidTide {
    fn default() -> Self {
        Self {
            love: LOVE_NUMBERS,
            love_plus: LOVE_NUMBERS_PLUS,
        }
    }
}

impl CoefficientModel for SolidTide {
    fn max_degree(&self) -> usize {
        4
    }

    fn deviations(&self, inputs: &TideInputs) -> CoefficientDeviations {
        let mut dev = CoefficientDeviations::new(4);

        for body in inputs.bodies {
            let p = LegendreTable::new(body.latitude, 3);
            let ratio = inputs.earth_radius / body.distance;
            let gm_ratio = body.gm / inputs.earth_gm;

            for l in 2..=3 {
                for m in 0..=l {
                    let dm = if m == 0 { 1.0 } else { 2.0 };
                    let fac = factorial(l - m) / factorial(l + m);
                    let templ = self.love[l][m] * dm * fac / inputs.earth_gm;
                    let term = templ * body.gm * ratio.powi(l as i32 + 1) * p.get(l, m);
                    let (sin_ml, cos_ml) = (m as f64 * body.longitude).sin_cos();
                    dev.add(l, m, term * cos_ml, term * sin_ml);
                }
            }

            // Degree 4 from degree-2 forcing
            for m in 0..=2 {
                let dm = if m == 0 { 1.0 } else { 2.0 };
                let fac = factorial(2 - m) / factorial(2 + m);
                let mf = m as f64;
                let norm = (1.8 * (4.0 - mf) * (3.0 - mf) / ((4.0 + mf) * (3.0 + mf))).sqrt();
                let term = self.love_plus[m] * dm * fac * norm * gm_ratio * ratio.powi(3) * p.get(2, m);
                let (sin_ml, cos_ml) = (mf * body.longitude).sin_cos();
                dev.add(4, m, term * cos_ml, term * sin_ml);
            }
        }

        if let Some(wobble) = inputs.wobble {
            let (dc, ds) = wobble.solid_correction();
            dev.add(2, 1, dc, ds);
        }

        dev
    }
}
