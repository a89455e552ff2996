use nalgebra::Vector3;

use earth_tides::astro::{
    Body, EarthRotation, Ephemeris, Epoch, FrameReduction, LowPrecisionEphemeris, PolarMotion,
};
use earth_tides::{TidalAcceleration, TideKind, TideResult};

/// Solid tide acceleration below the Moon and the size of the pole tide
/// term, from LEO to GNSS altitude.
fn main() -> TideResult<()> {
    let epoch = Epoch::from_calendar(2024, 6, 21, 12, 0, 0.0);
    let pole = PolarMotion { x: 0.20, y: 0.38 };
    let mean = PolarMotion { x: 0.06, y: 0.35 };

    let reduction = EarthRotation::new().with_polar_motion(pole, mean);
    let with_pole = TidalAcceleration::new(LowPrecisionEphemeris, reduction);
    let without_pole = TidalAcceleration::new(LowPrecisionEphemeris, EarthRotation::new());

    let moon = LowPrecisionEphemeris.body_position(epoch, Body::Moon)?;
    let dir = moon.normalize();

    println!("=== Solid tide below the Moon, MJD {:.3} ===\n", epoch.mjd);
    println!("{:>10}  {:>14}  {:>14}", "alt (km)", "total (m/s2)", "pole (m/s2)");

    for alt in [300.0_f64, 500.0, 800.0, 1_500.0, 5_000.0, 20_200.0] {
        let pos = dir * (6_378.137 + alt);
        let ef_pos = reduction.inertial_to_earth_fixed(&pos, epoch)?;
        let ef_vel = Vector3::zeros();

        let a = with_pole.compute(TideKind::Solid, epoch, &pos, &ef_pos, &ef_vel)?;
        let b = without_pole.compute(TideKind::Solid, epoch, &pos, &ef_pos, &ef_vel)?;

        println!("{:>10.0}  {:>14.4e}  {:>14.4e}", alt, a.norm() * 1e3, (a - b).norm() * 1e3);
    }

    Ok(())
}
