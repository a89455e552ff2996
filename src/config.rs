use std::path::PathBuf;

use crate::error::{TideError, TideResult};
use crate::tides::MAX_DEGREE;

pub const DEFAULT_COEFFICIENT_PATH: &str = "data/fes2004_Cnm-Snm.dat";

/// Tidal acceleration settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TideConfig {
    /// Highest degree of the ocean tide expansion (2..=6).
    pub ocean_max_degree: usize,
    pub coefficient_path: PathBuf,
    /// Apply the solid and ocean pole tide when Earth orientation is available.
    pub pole_tide: bool,
    /// Load the ocean table in `initialize()` instead of on first use.
    pub preload_ocean_table: bool,
}

impl Default for TideConfig {
    fn default() -> Self {
        Self {
            ocean_max_degree: MAX_DEGREE,
            coefficient_path: PathBuf::from(DEFAULT_COEFFICIENT_PATH),
            pole_tide: true,
            preload_ocean_table: false,
        }
    }
}

impl TideConfig {
    pub fn validate(&self) -> TideResult<()> {
        if !(2..=MAX_DEGREE).contains(&self.ocean_max_degree) {
            return Err(TideError::invalid_config(format!(
                "ocean_max_degree {} outside 2..={MAX_DEGREE}",
                self.ocean_max_degree
            )));
        }
        if self.coefficient_path.as_os_str().is_empty() {
            return Err(TideError::invalid_config("coefficient_path is empty"));
        }
        Ok(())
    }
}
