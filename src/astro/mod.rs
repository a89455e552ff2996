//! Time, Sun/Moon ephemeris, Earth orientation and coordinate conversions
//! consumed by the tide models.

pub mod arguments;
pub mod earth;
pub mod ephemeris;
pub mod epoch;
pub mod geodesy;
pub mod reduction;

pub use arguments::{greenwich_mean_sidereal_time, DelaunayArguments};
pub use earth::{EarthConstants, EarthModel};
pub use ephemeris::{Body, Ephemeris, LowPrecisionEphemeris};
pub use epoch::Epoch;
pub use geodesy::{geodetic, GeocentricState, Geodetic};
pub use reduction::{EarthRotation, FrameReduction, PolarMotion};
