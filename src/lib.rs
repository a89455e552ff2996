pub mod astro;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod tides;

pub use config::TideConfig;
pub use error::{TideError, TideResult};
pub use model::{tidal_acceleration, TidalAcceleration};
pub use tides::TideKind;
