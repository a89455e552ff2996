//! The tidal perturbing acceleration as a force model.
//!
//! [`TidalAcceleration`] owns the collaborators (ephemeris, frame reduction,
//! Earth constants, ocean coefficient source) and the ocean tide table, which
//! is read once and shared until [`TidalAcceleration::reset`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use nalgebra::Vector3;

use crate::astro::{
    Body, EarthConstants, EarthModel, Ephemeris, Epoch, FrameReduction, GeocentricState,
};
use crate::config::TideConfig;
use crate::error::{TideError, TideResult};
use crate::io::coefficients::{CoefficientSource, FileCoefficientSource};
use crate::physics::gravity::PotentialGradient;
use crate::tides::{
    CoefficientModel, OceanTide, OceanTideTable, PerturbingBody, PolarWobble, SolidTide,
    TideInputs, TideKind, TideModel,
};

pub struct TidalAcceleration {
    config: TideConfig,
    ephemeris: Box<dyn Ephemeris>,
    reduction: Box<dyn FrameReduction>,
    earth: Box<dyn EarthModel>,
    /// `None` reads `config.coefficient_path`.
    source: Option<Box<dyn CoefficientSource>>,
    solid: SolidTide,
    initialized: AtomicBool,
    ocean_table: Mutex<Option<Arc<OceanTideTable>>>,
}

impl TidalAcceleration {
    pub fn new(ephemeris: impl Ephemeris + 'static, reduction: impl FrameReduction + 'static) -> Self {
        Self {
            config: TideConfig::default(),
            ephemeris: Box::new(ephemeris),
            reduction: Box::new(reduction),
            earth: Box::new(EarthConstants::default()),
            source: None,
            solid: SolidTide::default(),
            initialized: AtomicBool::new(false),
            ocean_table: Mutex::new(None),
        }
    }

    pub fn with_config(mut self, config: TideConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_earth(mut self, earth: impl EarthModel + 'static) -> Self {
        self.earth = Box::new(earth);
        self
    }

    /// Read ocean coefficients from `source` instead of the configured file.
    pub fn with_coefficient_source(mut self, source: impl CoefficientSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn config(&self) -> &TideConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Check preconditions. Repeated calls after success do nothing.
    pub fn initialize(&self) -> TideResult<()> {
        if self.is_initialized() {
            return Ok(());
        }
        self.config.validate()?;
        if !self.ephemeris.is_initialized() {
            return Err(TideError::EphemerisNotInitialized);
        }
        if self.config.preload_ocean_table {
            self.ocean_table()?;
        }
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    /// Drop the cached ocean table; the next call initializes again.
    pub fn reset(&self) {
        self.initialized.store(false, Ordering::Release);
        *self.ocean_table.lock().unwrap_or_else(PoisonError::into_inner) = None;
        log::debug!("Tidal acceleration reset");
    }

    /// The ocean tide table, read from the coefficient source on first use.
    pub fn ocean_table(&self) -> TideResult<Arc<OceanTideTable>> {
        let mut cached = self.ocean_table.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = cached.as_ref() {
            return Ok(Arc::clone(table));
        }

        let degree = self.config.ocean_max_degree;
        let table = match &self.source {
            Some(source) => OceanTideTable::load(source.as_ref(), degree)?,
            None => {
                let file = FileCoefficientSource::new(&self.config.coefficient_path);
                OceanTideTable::load(&file, degree)?
            }
        };
        let table = Arc::new(table);
        *cached = Some(Arc::clone(&table));
        Ok(table)
    }

    pub fn model(&self, kind: TideKind) -> TideResult<TideModel> {
        Ok(match kind {
            TideKind::Solid => TideModel::Solid(self.solid),
            TideKind::Ocean => {
                TideModel::Ocean(OceanTide::new(self.ocean_table()?, self.config.ocean_max_degree))
            }
        })
    }

    /// Tidal acceleration (km/s^2, inertial frame) on a satellite.
    ///
    /// `inertial` is the satellite position (km) in the inertial frame;
    /// `ef_pos` (km) and `ef_vel` (km/s) are the same state in the Earth-fixed
    /// frame.
    pub fn compute(
        &self,
        kind: TideKind,
        epoch: Epoch,
        inertial: &Vector3<f64>,
        ef_pos: &Vector3<f64>,
        ef_vel: &Vector3<f64>,
    ) -> TideResult<Vector3<f64>> {
        self.initialize()?;

        let bodies = self.perturbing_bodies(epoch)?;
        let model = self.model(kind)?;
        let inputs = TideInputs {
            epoch,
            bodies: &bodies,
            earth_radius: self.earth.radius(),
            earth_gm: self.earth.gm(),
            sidereal_time: self.reduction.sidereal_time(epoch),
            wobble: self.wobble(epoch)?,
        };
        let satellite = GeocentricState::from_state(ef_pos, ef_vel);

        Ok(tidal_acceleration(&model, &inputs, &satellite, inertial))
    }

    fn perturbing_bodies(&self, epoch: Epoch) -> TideResult<Vec<PerturbingBody>> {
        Body::ALL
            .iter()
            .map(|&b| -> TideResult<PerturbingBody> {
                let inertial = self.ephemeris.body_position(epoch, b)?;
                let earth_fixed = self.reduction.inertial_to_earth_fixed(&inertial, epoch)?;
                Ok(PerturbingBody::new(
                    b,
                    inertial,
                    earth_fixed,
                    self.ephemeris.body_gm(b),
                    self.earth.as_ref(),
                ))
            })
            .collect()
    }

    fn wobble(&self, epoch: Epoch) -> TideResult<Option<PolarWobble>> {
        if !self.config.pole_tide {
            return Ok(None);
        }
        if !self.reduction.is_earth_orientation_initialized() {
            log::debug!("Earth orientation unavailable, pole tide skipped");
            return Ok(None);
        }
        let pole = self.reduction.polar_motion(epoch)?;
        let mean = self.reduction.polar_motion_mean(epoch)?;
        Ok(Some(PolarWobble::new(pole, mean)))
    }
}

/// Evaluate `model` at the satellite and transform to Cartesian.
///
/// The spherical partials are taken in the Earth-fixed frame and combined
/// with the inertial position.
pub fn tidal_acceleration(
    model: &dyn CoefficientModel,
    inputs: &TideInputs,
    satellite: &GeocentricState,
    inertial: &Vector3<f64>,
) -> Vector3<f64> {
    let deviations = model.deviations(inputs);
    PotentialGradient::evaluate(
        satellite.radius,
        satellite.latitude,
        satellite.longitude,
        &deviations,
        inputs.earth_radius,
        inputs.earth_gm,
    )
    .to_acceleration(inertial)
}
