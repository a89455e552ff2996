use std::path::PathBuf;

use thiserror::Error;

use crate::astro::Body;

pub type TideResult<T> = Result<T, TideError>;

#[derive(Debug, Error)]
pub enum TideError {
    #[error("Ephemeris provider is not initialized")]
    EphemerisNotInitialized,

    /// Failure reported by the ephemeris or frame reduction collaborators.
    #[error("Lookup failed for {body:?}: {message}")]
    BodyLookupFailed { body: Body, message: String },

    #[error("Ocean tide coefficient table {} unavailable: {message}", path.display())]
    CoefficientTableUnavailable { path: PathBuf, message: String },

    #[error("Invalid tide configuration: {message}")]
    InvalidConfig { message: String },
}

impl TideError {
    pub fn body_lookup(body: Body, message: impl Into<String>) -> Self {
        Self::BodyLookupFailed {
            body,
            message: message.into(),
        }
    }

    pub fn table_unavailable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CoefficientTableUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
