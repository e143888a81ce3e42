//! Human-readable formatting for simulated minutes.
//!
//! The simulated calendar is flat: every month has 31 days and the year is
//! fixed. Formatting is only used by report/export sinks and has no effect
//! on the simulation itself.

use crate::clock::{MINUTES_PER_DAY, MINUTES_PER_HOUR, MINUTES_PER_MONTH};

/// Year stamped onto formatted dates.
pub const SIMULATED_YEAR: u32 = 2023;

/// Format an absolute minute as `MM/DD/YYYY HH:MM` with zero-padded fields.
/// Months and days are 1-based.
pub fn format_datetime(minute: u64) -> String {
    let month = minute / MINUTES_PER_MONTH;
    let rem = minute - month * MINUTES_PER_MONTH;
    let day = rem / MINUTES_PER_DAY;
    let rem = rem - day * MINUTES_PER_DAY;
    let hour = rem / MINUTES_PER_HOUR;
    let min = rem - hour * MINUTES_PER_HOUR;
    format!(
        "{:02}/{:02}/{} {:02}:{:02}",
        month + 1,
        day + 1,
        SIMULATED_YEAR,
        hour,
        min
    )
}

/// Format a minute-of-day as a wall clock `HH:MM`.
pub fn format_clock(minute: u64) -> String {
    let hour = minute / MINUTES_PER_HOUR;
    let min = minute - hour * MINUTES_PER_HOUR;
    format!("{hour:02}:{min:02}")
}
