use std::io::{self, Write};
use std::path::Path;

use nalgebra::Vector3;

/// Tidal acceleration at one instant along a satellite track.
#[derive(Debug, Clone)]
pub struct AccelerationSample {
    pub time: f64,                    // s since start
    pub mjd: f64,                     // TT
    pub position: Vector3<f64>,       // km, inertial
    pub solid: Vector3<f64>,          // km/s^2
    pub ocean: Option<Vector3<f64>>,  // km/s^2
}

/// Write acceleration samples in CSV format, accelerations in m/s^2.
///
/// Columns: time, mjd, pos_x, pos_y, pos_z, solid_x, solid_y, solid_z,
///          ocean_x, ocean_y, ocean_z (empty when the ocean tide was not run)
pub fn write_samples<W: Write>(writer: &mut W, samples: &[AccelerationSample]) -> io::Result<()> {
    writeln!(
        writer,
        "time,mjd,pos_x,pos_y,pos_z,\
         solid_x,solid_y,solid_z,ocean_x,ocean_y,ocean_z"
    )?;

    for s in samples {
        let solid = s.solid * 1e3;
        let ocean = match s.ocean {
            Some(a) => {
                let a = a * 1e3;
                format!("{:.6e},{:.6e},{:.6e}", a.x, a.y, a.z)
            }
            None => ",,".to_string(),
        };
        writeln!(
            writer,
            "{:.1},{:.8},{:.3},{:.3},{:.3},{:.6e},{:.6e},{:.6e},{}",
            s.time,
            s.mjd,
            s.position.x, s.position.y, s.position.z,
            solid.x, solid.y, solid.z,
            ocean,
        )?;
    }

    Ok(())
}

/// Write samples to a CSV file at the given path.
pub fn write_samples_file(path: impl AsRef<Path>, samples: &[AccelerationSample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_samples(&mut file, samples)
}
