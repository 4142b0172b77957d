//! Time Engine - wall-clock time to hand angles
//!
//! Angles are "clock angles": degrees clockwise from the 12 o'clock position,
//! not from the positive X axis.

use chrono::{Local, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_HALF_DAY: u64 = 43_200_000;

/// Hand angles for a single render tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeAngles {
    /// Hour hand, one turn per 12 hours
    pub hour: f32,
    /// Minute hand, one turn per hour
    pub minute: f32,
    /// Second indicator, one turn per minute
    pub second: f32,
}

impl TimeAngles {
    /// Compute the angles at a time of day, with millisecond precision.
    ///
    /// The hour wraps on a 12-hour dial, so 06:00 and 18:00 both give 180°.
    pub fn at<T: Timelike>(time: &T) -> Self {
        let h = u64::from(time.hour() % 12);
        let m = u64::from(time.minute());
        let s = u64::from(time.second());
        // chrono encodes a leap second as nanos >= 1e9
        let millis = u64::from((time.nanosecond() / 1_000_000).min(999));

        let in_minute = millis + s * 1000;
        let in_hour = in_minute + m * MS_PER_MINUTE;
        let in_half_day = in_hour + h * MS_PER_HOUR;

        Self {
            hour: dial_degrees(in_half_day, MS_PER_HALF_DAY),
            minute: dial_degrees(in_hour, MS_PER_HOUR),
            second: dial_degrees(in_minute, MS_PER_MINUTE),
        }
    }
}

/// Fraction of a full turn in degrees, kept inside [0, 360)
fn dial_degrees(elapsed: u64, period: u64) -> f32 {
    let degrees = (360.0 * (elapsed as f64 / period as f64)) as f32;
    // narrowing can round 359.99999 up to 360.0
    if degrees >= 360.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

/// Current wall-clock time of day
///
/// Uses the system local zone unless a fixed zone is configured.
pub fn wall_clock(zone: Option<Tz>) -> NaiveTime {
    match zone {
        Some(tz) => Utc::now().with_timezone(&tz).time(),
        None => Local::now().time(),
    }
}

/// Parse a timezone string into a Tz
pub fn parse_timezone(tz_str: &str) -> Result<Tz, String> {
    tz_str
        .parse::<Tz>()
        .map_err(|_| format!("Invalid timezone: {}", tz_str))
}
