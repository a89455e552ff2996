use std::error::Error;
use std::path::PathBuf;

use nalgebra::Vector3;

use earth_tides::astro::{EarthRotation, Epoch, FrameReduction, LowPrecisionEphemeris, PolarMotion};
use earth_tides::io::csv::{self, AccelerationSample};
use earth_tides::{TidalAcceleration, TideConfig, TideKind};

const EARTH_ROTATION_RATE: f64 = 7.292_115e-5; // rad/s
const MU: f64 = 398_600.441_5;                 // km^3/s^2

/// Usage: tides [COEFFICIENT_FILE] [OUTPUT_CSV]
///
/// Without a coefficient file only the solid Earth tide is evaluated.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let coefficients = args.next().map(PathBuf::from);
    let output = args.next();

    // -----------------------------------------------------------------------
    // Force model
    // -----------------------------------------------------------------------
    let reduction = EarthRotation::new().with_polar_motion(
        PolarMotion { x: 0.172, y: 0.402 }, // arcsec
        PolarMotion { x: 0.061, y: 0.349 },
    );
    let mut config = TideConfig::default();
    if let Some(path) = &coefficients {
        config.coefficient_path = path.clone();
        config.preload_ocean_table = true;
    }
    let tides = TidalAcceleration::new(LowPrecisionEphemeris, reduction).with_config(config);
    tides.initialize()?;

    // -----------------------------------------------------------------------
    // ISS-like circular orbit, 420 km, 51.6 deg
    // -----------------------------------------------------------------------
    let radius: f64 = 6_378.137 + 420.0;
    let inclination = 51.6_f64.to_radians();
    let mean_motion = (MU / radius.powi(3)).sqrt();
    let start = Epoch::from_calendar(2024, 3, 20, 0, 0, 0.0);

    println!("====================================================================");
    println!("  Tidal acceleration, circular orbit {:.0} km x {:.1} deg", radius - 6_378.137, inclination.to_degrees());
    println!("  Start: MJD {:.5}   Ocean tide: {}", start.mjd, if coefficients.is_some() { "on" } else { "off" });
    println!("====================================================================");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>12}  {:>12}",
        "t (h)", "lat (deg)", "lon (deg)", "solid (m/s2)", "ocean (m/s2)"
    );
    println!("  {}", "─".repeat(58));

    let mut samples = Vec::new();
    for step in 0..=144 {
        let time = step as f64 * 600.0;
        let epoch = start.add_seconds(time);

        let u = mean_motion * time;
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_i, cos_i) = inclination.sin_cos();
        let pos = radius * Vector3::new(cos_u, cos_i * sin_u, sin_i * sin_u);
        let vel = radius * mean_motion * Vector3::new(-sin_u, cos_i * cos_u, sin_i * cos_u);

        let ef_pos = reduction.inertial_to_earth_fixed(&pos, epoch)?;
        let omega = Vector3::new(0.0, 0.0, EARTH_ROTATION_RATE);
        let ef_vel = reduction.inertial_to_earth_fixed(&vel, epoch)? - omega.cross(&ef_pos);

        let solid = tides.compute(TideKind::Solid, epoch, &pos, &ef_pos, &ef_vel)?;
        let ocean = match coefficients {
            Some(_) => Some(tides.compute(TideKind::Ocean, epoch, &pos, &ef_pos, &ef_vel)?),
            None => None,
        };

        if step % 6 == 0 {
            let lat = ef_pos.z.atan2(ef_pos.xy().norm());
            let lon = ef_pos.y.atan2(ef_pos.x);
            let ocean_str = ocean.map_or("-".to_string(), |a| format!("{:.4e}", a.norm() * 1e3));
            println!(
                "  {:>7.1}  {:>9.2}  {:>9.2}  {:>12.4e}  {:>12}",
                time / 3600.0,
                lat.to_degrees(),
                lon.to_degrees(),
                solid.norm() * 1e3,
                ocean_str
            );
        }

        samples.push(AccelerationSample { time, mjd: epoch.mjd, position: pos, solid, ocean });
    }

    let peak = samples.iter().map(|s| s.solid.norm()).fold(0.0_f64, f64::max);
    println!();
    println!("  Peak solid tide acceleration: {:.4e} m/s^2", peak * 1e3);

    if let Some(path) = output {
        csv::write_samples_file(&path, &samples)?;
        println!("  Exported: {path}");
    }
    println!("====================================================================");

    Ok(())
}
