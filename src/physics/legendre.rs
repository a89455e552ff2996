// ---------------------------------------------------------------------------
// Unnormalized associated Legendre functions P[l][m](sin(lat))
// ---------------------------------------------------------------------------

/// Table of P[l][m] for 0 <= m <= l <= lmax, with P[l][l+1] = 0 kept as a
/// sentinel for the latitude derivative.
///
/// Built by forward column recursion from P[1][0] = sin(lat) and
/// P[1][1] = cos(lat), which stays stable where the closed-form factorial
/// expressions lose precision.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendreTable {
    lmax: usize,
    values: Vec<f64>, // row-major, (lmax + 1) rows x (lmax + 2) columns
}

impl LegendreTable {
    pub fn new(latitude: f64, lmax: usize) -> Self {
        let lmax = lmax.max(1);
        let stride = lmax + 2;
        let mut p = vec![0.0; (lmax + 1) * stride];
        let idx = |l: usize, m: usize| l * stride + m;

        let (sin_lat, cos_lat) = latitude.sin_cos();
        p[idx(0, 0)] = 1.0;
        p[idx(1, 0)] = sin_lat;
        p[idx(1, 1)] = cos_lat;

        for m in 0..=lmax {
            for l in m.max(2)..=lmax {
                let lf = l as f64;
                let mf = m as f64;
                p[idx(l, m)] = if l == m {
                    (2.0 * mf - 1.0) * p[idx(1, 1)] * p[idx(m - 1, m - 1)]
                } else if l == m + 1 {
                    (2.0 * mf + 1.0) * p[idx(1, 0)] * p[idx(l - 1, m)]
                } else {
                    ((2.0 * lf - 1.0) * p[idx(1, 0)] * p[idx(l - 1, m)]
                        - (lf + mf - 1.0) * p[idx(l - 2, m)])
                        / (lf - mf)
                };
            }
        }

        Self { lmax, values: p }
    }

    pub fn max_degree(&self) -> usize {
        self.lmax
    }

    /// P[l][m]; zero for m > l (including the P[l][l+1] sentinel).
    pub fn get(&self, l: usize, m: usize) -> f64 {
        if l > self.lmax || m > l {
            return 0.0;
        }
        self.values[l * (self.lmax + 2) + m]
    }
}
