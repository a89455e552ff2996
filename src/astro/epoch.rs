// ---------------------------------------------------------------------------
// Time constants
// ---------------------------------------------------------------------------

pub const MJD_J2000: f64 = 51_544.5;            // J2000.0 (2000-01-01 12:00 TT)
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// An instant on the Terrestrial Time scale, stored as a Modified Julian Date.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch {
    pub mjd: f64, // days
}

impl Epoch {
    pub fn from_mjd(mjd: f64) -> Self {
        Self { mjd }
    }

    pub fn j2000() -> Self {
        Self::from_mjd(MJD_J2000)
    }

    /// Gregorian calendar date and time of day.
    pub fn from_calendar(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        let (y, m) = if month <= 2 {
            (year - 1, month + 12)
        } else {
            (year, month)
        };
        let a = (y as f64 / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();
        let day_fraction =
            (hour as f64 * 3600.0 + minute as f64 * 60.0 + second) / SECONDS_PER_DAY;

        let jd = (365.25 * (y as f64 + 4716.0)).floor()
            + (30.6001 * (m as f64 + 1.0)).floor()
            + day as f64
            + b
            - 1524.5
            + day_fraction;
        Self::from_mjd(jd - 2_400_000.5)
    }

    pub fn days_since_j2000(&self) -> f64 {
        self.mjd - MJD_J2000
    }

    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self::from_mjd(self.mjd + seconds / SECONDS_PER_DAY)
    }
}
