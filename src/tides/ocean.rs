use std::f64::consts::PI;
use std::path::Path;
use std::sync::Arc;

use super::constituents::{classify, CONSTITUENTS, CONSTITUENT_COUNT};
use super::{factorial, CoefficientDeviations, CoefficientModel, TideInputs, MAX_DEGREE};
use crate::astro::DelaunayArguments;
use crate::error::{TideError, TideResult};
use crate::io::coefficients::{read_records, CoefficientRecord, CoefficientSource};

// ---------------------------------------------------------------------------
// Physical constants (IERS Conventions 2010, section 6.3)
// ---------------------------------------------------------------------------

pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_28e-11; // m^3/(kg s^2)
pub const WATER_DENSITY: f64 = 1025.0;                // kg/m^3
pub const EQUATORIAL_GRAVITY: f64 = 9.780_327_8;      // m/s^2

/// Load deformation coefficients k'_l, indexed by degree.
pub const LOAD_LOVE_NUMBERS: [f64; MAX_DEGREE + 1] =
    [0.0, 0.0, -0.3075, -0.195, -0.132, -0.1032, -0.0892];

const CM_TO_M: f64 = 0.01;

/// Prograde (+) and retrograde (-) ocean height coefficients of one
/// constituent at one (degree, order), in metres.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TideAmplitudes {
    pub c_plus: f64,
    pub s_plus: f64,
    pub c_minus: f64,
    pub s_minus: f64,
}

type AmplitudeGrid = [[TideAmplitudes; MAX_DEGREE + 1]; MAX_DEGREE + 1];

// ---------------------------------------------------------------------------
// Constituent table
// ---------------------------------------------------------------------------

/// Ocean tide amplitudes for the 17 recognised constituents, degree 2..=lmax.
/// Read-only once built.
#[derive(Debug, Clone)]
pub struct OceanTideTable {
    lmax: usize,
    grids: Vec<AmplitudeGrid>,
    counts: [usize; CONSTITUENT_COUNT],
}

impl OceanTideTable {
    /// Keep records of degree 2..=lmax whose Doodson number falls in a
    /// constituent range. Fails when nothing is kept.
    pub fn from_records(records: &[CoefficientRecord], lmax: usize, location: &Path) -> TideResult<Self> {
        let lmax = lmax.clamp(2, MAX_DEGREE);
        let mut table = Self {
            lmax,
            grids: vec![[[TideAmplitudes::default(); MAX_DEGREE + 1]; MAX_DEGREE + 1]; CONSTITUENT_COUNT],
            counts: [0; CONSTITUENT_COUNT],
        };

        let mut filled = [[[false; MAX_DEGREE + 1]; MAX_DEGREE + 1]; CONSTITUENT_COUNT];
        let mut discarded = 0;
        for r in records {
            let slot = match classify(r.doodson) {
                Some(slot) if (2..=lmax).contains(&r.degree) && r.order <= r.degree => slot,
                _ => {
                    discarded += 1;
                    continue;
                }
            };
            // A repeated (constituent, degree, order) row replaces the earlier one
            if filled[slot][r.degree][r.order] {
                log::warn!(
                    "Duplicate {} ({}, {}) record at Doodson {}, keeping the later one",
                    CONSTITUENTS[slot].name,
                    r.degree,
                    r.order,
                    r.doodson
                );
            } else {
                filled[slot][r.degree][r.order] = true;
                table.counts[slot] += 1;
            }
            table.grids[slot][r.degree][r.order] = TideAmplitudes {
                c_plus: r.c_plus * CM_TO_M,
                s_plus: r.s_plus * CM_TO_M,
                c_minus: r.c_minus * CM_TO_M,
                s_minus: r.s_minus * CM_TO_M,
            };
        }

        if table.is_empty() {
            return Err(TideError::table_unavailable(
                location,
                format!("no constituent records of degree 2..={lmax}"),
            ));
        }
        log::debug!(
            "Ocean tide table: kept {} records, discarded {}",
            table.len(),
            discarded
        );
        Ok(table)
    }

    /// Read and build the table from `source`.
    pub fn load(source: &dyn CoefficientSource, lmax: usize) -> TideResult<Self> {
        let location = source.location();
        let reader = source
            .open()
            .map_err(|e| TideError::table_unavailable(location, e.to_string()))?;
        let records = read_records(reader, location)?;
        let table = Self::from_records(&records, lmax, location)?;
        log::info!(
            "Loaded {} ocean tide coefficients from {}",
            table.len(),
            location.display()
        );
        Ok(table)
    }

    pub fn max_degree(&self) -> usize {
        self.lmax
    }

    /// Number of distinct (constituent, degree, order) cells filled.
    pub fn len(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records_in(&self, slot: usize) -> usize {
        self.counts.get(slot).copied().unwrap_or(0)
    }

    pub fn amplitudes(&self, slot: usize, l: usize, m: usize) -> TideAmplitudes {
        if slot >= CONSTITUENT_COUNT || l > self.lmax || m > l {
            return TideAmplitudes::default();
        }
        self.grids[slot][l][m]
    }
}

// ---------------------------------------------------------------------------
// Ocean tide model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct OceanTide {
    table: Arc<OceanTideTable>,
    lmax: usize,
    pub load_numbers: [f64; MAX_DEGREE + 1],
}

impl OceanTide {
    /// Degrees beyond those held by `table` are not evaluated.
    pub fn new(table: Arc<OceanTideTable>, lmax: usize) -> Self {
        let lmax = lmax.clamp(2, table.max_degree());
        Self {
            table,
            lmax,
            load_numbers: LOAD_LOVE_NUMBERS,
        }
    }

    pub fn table(&self) -> &OceanTideTable {
        &self.table
    }
}

impl CoefficientModel for OceanTide {
    fn max_degree(&self) -> usize {
        self.lmax
    }

    fn deviations(&self, inputs: &TideInputs) -> CoefficientDeviations {
        let mut dev = CoefficientDeviations::new(self.lmax);
        let args = DelaunayArguments::at(inputs.epoch);
        let scale = 4.0 * PI * GRAVITATIONAL_CONSTANT * WATER_DENSITY / EQUATORIAL_GRAVITY;

        // Phase part that does not depend on the order
        let mut nf = [0.0; CONSTITUENT_COUNT];
        for (slot, c) in CONSTITUENTS.iter().enumerate() {
            nf[slot] = args.dot(&c.multipliers);
        }

        for l in 2..=self.lmax {
            let lf = l as f64;
            for m in 0..=l {
                let dm = if m == 0 { 1.0 } else { 2.0 };
                let norm = (factorial(l - m) * dm * (2.0 * lf + 1.0) / factorial(l + m)).sqrt();
                let fac = scale * (1.0 + self.load_numbers[l]) / (2.0 * lf + 1.0) * norm;

                let mut dc = 0.0;
                let mut ds = 0.0;
                for (slot, phase) in nf.iter().enumerate() {
                    let a = self.table.amplitudes(slot, l, m);
                    let theta = m as f64 * (inputs.sidereal_time + PI) - phase;
                    let (sin_t, cos_t) = theta.sin_cos();
                    dc += fac * ((a.c_plus + a.c_minus) * cos_t + (a.s_plus + a.s_minus) * sin_t);
                    ds += fac * ((a.c_minus - a.c_plus) * sin_t + (a.s_plus - a.s_minus) * cos_t);
                }
                dev.add(l, m, dc, if m > 0 { ds } else { 0.0 });
            }
        }

        if let Some(wobble) = inputs.wobble {
            let (dc, ds) = wobble.ocean_correction();
            dev.add(2, 1, dc, ds);
        }

        dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::{Epoch, PolarMotion};
    use crate::tides::constituents::slot_of;
    use crate::tides::PolarWobble;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn record(doodson: f64, degree: usize, order: usize, amps: [f64; 4]) -> CoefficientRecord {
        CoefficientRecord {
            doodson,
            label: "test".into(),
            degree,
            order,
            c_plus: amps[0],
            s_plus: amps[1],
            c_minus: amps[2],
            s_minus: amps[3],
        }
    }

    fn inputs(epoch: Epoch, sidereal_time: f64) -> TideInputs<'static> {
        TideInputs {
            epoch,
            bodies: &[],
            earth_radius: 6378.1363,
            earth_gm: 398_600.4415,
            sidereal_time,
            wobble: None,
        }
    }

    #[test]
    fn records_sorted_into_slots() {
        let records = vec![
            record(255.555, 2, 2, [1.0, 0.5, 0.0, 0.0]),
            record(145.555, 3, 1, [0.2, 0.0, 0.1, 0.0]),
            record(455.555, 2, 2, [9.0, 9.0, 9.0, 9.0]), // M4: no slot
            record(255.555, 7, 2, [9.0, 9.0, 9.0, 9.0]), // degree too high
        ];
        let t = OceanTideTable::from_records(&records, 6, Path::new("mem")).unwrap();
        let m2 = slot_of("M2").unwrap();
        let o1 = slot_of("O1").unwrap();

        assert_eq!(t.len(), 2);
        assert_eq!(t.records_in(m2), 1);
        assert_eq!(t.records_in(o1), 1);
        assert_abs_diff_eq!(t.amplitudes(m2, 2, 2).c_plus, 0.01, epsilon = 1e-15);
        assert_abs_diff_eq!(t.amplitudes(m2, 2, 2).s_plus, 0.005, epsilon = 1e-15);
        assert_eq!(t.amplitudes(m2, 3, 1), TideAmplitudes::default());
    }

    #[test]
    fn repeated_record_replaces_without_double_count() {
        let records = vec![
            record(255.555, 2, 2, [1.0, 0.0, 0.0, 0.0]),
            record(255.556, 2, 2, [3.0, 0.0, 0.0, 0.0]),
            record(255.555, 3, 2, [2.0, 0.0, 0.0, 0.0]),
        ];
        let t = OceanTideTable::from_records(&records, 6, Path::new("mem")).unwrap();
        let m2 = slot_of("M2").unwrap();
        assert_eq!(t.records_in(m2), 2);
        assert_eq!(t.len(), 2);
        assert_abs_diff_eq!(t.amplitudes(m2, 2, 2).c_plus, 0.03, epsilon = 1e-15);
    }

    #[test]
    fn degree_limit_filters_records() {
        let records = vec![record(255.555, 4, 2, [1.0, 0.0, 0.0, 0.0])];
        let err = OceanTideTable::from_records(&records, 3, Path::new("mem")).unwrap_err();
        assert!(matches!(err, TideError::CoefficientTableUnavailable { .. }));
    }

    #[test]
    fn empty_table_is_an_error() {
        assert!(OceanTideTable::from_records(&[], 6, Path::new("mem")).is_err());
    }

    #[test]
    fn single_constituent_closed_form() {
        // K1 has no Delaunay dependence: theta = m (gmst + pi)
        let records = vec![record(165.555, 2, 1, [2.0, 1.0, 0.5, 0.25])];
        let table = Arc::new(OceanTideTable::from_records(&records, 2, Path::new("mem")).unwrap());
        let model = OceanTide::new(table, 6);
        assert_eq!(model.max_degree(), 2);

        let gmst = 1.2;
        let dev = model.deviations(&inputs(Epoch::from_mjd(58_849.0), gmst));

        let scale = 4.0 * PI * GRAVITATIONAL_CONSTANT * WATER_DENSITY / EQUATORIAL_GRAVITY;
        let fac = scale * (1.0 - 0.3075) / 5.0 * (2.0 * 5.0 / 6.0_f64).sqrt();
        let theta = gmst + PI;
        let (cp, sp, cm, sm) = (0.02, 0.01, 0.005, 0.0025);
        let dc = fac * ((cp + cm) * theta.cos() + (sp + sm) * theta.sin());
        let ds = fac * ((cm - cp) * theta.sin() + (sp - sm) * theta.cos());

        assert_relative_eq!(dev.c(2, 1), dc, max_relative = 1e-12);
        assert_relative_eq!(dev.s(2, 1), ds, max_relative = 1e-12);
        assert_eq!(dev.c(2, 0), 0.0);
        assert_eq!(dev.c(2, 2), 0.0);
    }

    #[test]
    fn order_zero_sine_stays_zero() {
        let records = vec![
            record(75.555, 2, 0, [1.0, 2.0, 3.0, 4.0]),
            record(65.455, 4, 0, [0.5, -1.0, 0.2, 0.1]),
        ];
        let table = Arc::new(OceanTideTable::from_records(&records, 6, Path::new("mem")).unwrap());
        let dev = OceanTide::new(table, 6).deviations(&inputs(Epoch::from_mjd(60_100.3), 0.4));
        assert!(dev.c(2, 0) != 0.0);
        assert!(dev.c(4, 0) != 0.0);
        for l in 2..=6 {
            assert_eq!(dev.s(l, 0), 0.0);
        }
    }

    #[test]
    fn phases_depend_on_epoch() {
        let records = vec![record(255.555, 2, 2, [1.0, 0.3, 0.1, 0.0])];
        let table = Arc::new(OceanTideTable::from_records(&records, 6, Path::new("mem")).unwrap());
        let model = OceanTide::new(table, 6);
        let a = model.deviations(&inputs(Epoch::from_mjd(58_000.0), 0.7));
        let b = model.deviations(&inputs(Epoch::from_mjd(58_000.2), 0.7));
        assert!(a.c(2, 2) != b.c(2, 2));
    }

    #[test]
    fn ocean_pole_tide_applied_only_with_wobble() {
        let records = vec![record(255.555, 2, 2, [1.0, 0.0, 0.0, 0.0])];
        let table = Arc::new(OceanTideTable::from_records(&records, 6, Path::new("mem")).unwrap());
        let model = OceanTide::new(table, 6);
        let epoch = Epoch::from_mjd(59_000.0);

        let base = model.deviations(&inputs(epoch, 0.1));
        assert_eq!(base.c(2, 1), 0.0);

        let wobble = PolarWobble::new(PolarMotion { x: 0.15, y: 0.3 }, PolarMotion { x: 0.05, y: 0.35 });
        let mut with_pole = inputs(epoch, 0.1);
        with_pole.wobble = Some(wobble);
        let dev = model.deviations(&with_pole);
        let (dc, ds) = wobble.ocean_correction();
        assert_eq!(dev.c(2, 1), dc);
        assert_eq!(dev.s(2, 1), ds);
        assert_eq!(dev.c(2, 2), base.c(2, 2));
    }
}
