pub mod coefficients;
pub mod csv;

pub use coefficients::{read_records, CoefficientRecord, CoefficientSource, FileCoefficientSource};
pub use csv::{write_samples, write_samples_file, AccelerationSample};
